use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub completed: bool,
}

impl Task {
    /// Shape check for one stored record: `id` an integral number, `name`
    /// and `description` strings, `completed` a boolean. Extra fields are
    /// ignored; a missing or mistyped field rejects the whole record.
    pub fn from_value(value: &Value) -> Option<Self> {
        Some(Self {
            id: value.get("id")?.as_i64()?,
            name: value.get("name")?.as_str()?.to_owned(),
            description: value.get("description")?.as_str()?.to_owned(),
            completed: value.get("completed")?.as_bool()?,
        })
    }
}

/// Task payload without an identity, as submitted by the presentation
/// layer. The store validates the name and assigns the id.
#[derive(Debug, Clone, Default)]
pub struct TaskDraft {
    pub name: String,
    pub description: String,
    pub completed: bool,
}

impl TaskDraft {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            completed: false,
        }
    }
}

/// View partition over the collection. Not persisted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StatusFilter {
    #[default]
    All,
    Pending,
    Completed,
}

impl StatusFilter {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Pending => "pending",
            Self::Completed => "completed",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "all" => Some(Self::All),
            "pending" => Some(Self::Pending),
            "completed" => Some(Self::Completed),
            _ => None,
        }
    }

    pub fn matches(&self, task: &Task) -> bool {
        match self {
            Self::All => true,
            Self::Pending => !task.completed,
            Self::Completed => task.completed,
        }
    }
}
