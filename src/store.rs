use std::time::Duration;

use crate::error::TaskmanError;
use crate::models::{StatusFilter, Task, TaskDraft};
use crate::storage::debounce::DebouncedWriter;
use crate::storage::gateway::Gateway;

/// Quiet window between a mutation and its persistence write.
pub const WRITE_DEBOUNCE: Duration = Duration::from_millis(500);

/// Counts per completion partition.
#[derive(Debug, Default, Clone, serde::Serialize)]
pub struct TaskCounts {
    pub total: usize,
    pub pending: usize,
    pub completed: usize,
    pub percentage: f64,
}

/// Authoritative in-memory task collection plus the active view filter.
/// Every mutation that changes the collection schedules a debounced write
/// through the gateway; reads never touch storage.
pub struct TaskStore {
    tasks: Vec<Task>,
    next_id: i64,
    filter: StatusFilter,
    writer: DebouncedWriter,
}

impl TaskStore {
    /// Loads the persisted collection and takes ownership of the gateway
    /// for debounced writes.
    pub fn open(gateway: Gateway) -> Result<Self, TaskmanError> {
        Self::with_debounce(gateway, WRITE_DEBOUNCE)
    }

    pub fn with_debounce(mut gateway: Gateway, delay: Duration) -> Result<Self, TaskmanError> {
        let tasks = gateway.load()?;
        // Fresh ids continue above everything ever loaded; timestamps (the
        // original id source) collide under rapid creation, a counter cannot.
        let next_id = tasks.iter().map(|t| t.id).max().unwrap_or(0) + 1;
        Ok(Self {
            tasks,
            next_id,
            filter: StatusFilter::All,
            writer: DebouncedWriter::spawn(gateway, delay),
        })
    }

    /// Appends a new task. The draft name must not be blank; the trimmed
    /// form is what gets stored.
    pub fn create(&mut self, draft: TaskDraft) -> Result<Task, TaskmanError> {
        let name = validated_name(&draft.name)?;
        let task = Task {
            id: self.next_id,
            name,
            description: draft.description,
            completed: draft.completed,
        };
        self.next_id += 1;
        self.tasks.push(task.clone());
        self.schedule_save();
        Ok(task)
    }

    /// Full-record replacement keyed by id, keeping the task's position.
    /// An unknown id is tolerated: `Ok(false)`, nothing mutated, nothing
    /// scheduled. The name is validated exactly as in [`Self::create`],
    /// before the id lookup.
    pub fn update(&mut self, id: i64, draft: TaskDraft) -> Result<bool, TaskmanError> {
        let name = validated_name(&draft.name)?;
        match self.tasks.iter_mut().find(|t| t.id == id) {
            Some(task) => {
                *task = Task {
                    id,
                    name,
                    description: draft.description,
                    completed: draft.completed,
                };
                self.schedule_save();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Removes the task with this id; an unknown id is a silent no-op.
    pub fn delete(&mut self, id: i64) -> bool {
        let before = self.tasks.len();
        self.tasks.retain(|t| t.id != id);
        let removed = self.tasks.len() != before;
        if removed {
            self.schedule_save();
        }
        removed
    }

    /// Flips the completion flag in place and returns the new value; an
    /// unknown id is a silent no-op.
    pub fn toggle_completed(&mut self, id: i64) -> Option<bool> {
        let completed = match self.tasks.iter_mut().find(|t| t.id == id) {
            Some(task) => {
                task.completed = !task.completed;
                task.completed
            }
            None => return None,
        };
        self.schedule_save();
        Some(completed)
    }

    pub fn set_filter(&mut self, filter: StatusFilter) {
        self.filter = filter;
    }

    pub fn active_filter(&self) -> StatusFilter {
        self.filter
    }

    /// Tasks matching the active filter, in insertion order.
    pub fn filtered(&self) -> Vec<&Task> {
        self.filtered_by(self.filter)
    }

    pub fn filtered_by(&self, filter: StatusFilter) -> Vec<&Task> {
        self.tasks.iter().filter(|t| filter.matches(t)).collect()
    }

    pub fn all(&self) -> &[Task] {
        &self.tasks
    }

    pub fn get(&self, id: i64) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    pub fn counts(&self) -> TaskCounts {
        let total = self.tasks.len();
        let completed = self.tasks.iter().filter(|t| t.completed).count();
        let percentage = if total > 0 {
            (completed as f64 / total as f64) * 100.0
        } else {
            0.0
        };
        TaskCounts {
            total,
            pending: total - completed,
            completed,
            percentage,
        }
    }

    /// Forces any pending write to storage and waits for it.
    pub fn flush(&self) {
        self.writer.flush();
    }

    /// Flushes, then tears the store down. Plain `Drop` instead cancels
    /// whatever write is still pending.
    pub fn close(self) {
        self.writer.flush();
    }

    fn schedule_save(&self) {
        self.writer.schedule(self.tasks.clone());
    }
}

fn validated_name(raw: &str) -> Result<String, TaskmanError> {
    let name = raw.trim();
    if name.is_empty() {
        return Err(TaskmanError::validation("task name is required"));
    }
    Ok(name.to_owned())
}
