use clap::{Parser, Subcommand};

const VERSION: &str = env!("GIT_VERSION");

#[derive(Parser)]
#[command(
    name = "taskman",
    version = VERSION,
    about = "Local task list manager",
    after_help = "\
NOTE:
  Tasks are stored in <dir>/.taskman/tasks.db, where <dir> is the nearest
  ancestor directory that already contains `.taskman`, or the current
  directory otherwise. The database is created on first use.

EXIT CODES:
  0  Success
  1  Error (validation, unknown id, storage)"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output as JSON
    #[arg(long, global = true)]
    pub json: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Add a task
    Add {
        /// Task name (must not be blank)
        name: String,

        #[arg(long, default_value = "")]
        description: String,

        /// Create the task already completed
        #[arg(long)]
        completed: bool,
    },

    /// List tasks
    List {
        /// Show `all`, `pending`, or `completed` tasks
        #[arg(long, default_value = "all")]
        filter: String,
    },

    /// Edit a task; omitted fields keep their current value
    Edit {
        id: i64,

        #[arg(long)]
        name: Option<String>,

        #[arg(long)]
        description: Option<String>,

        /// Set the completion flag to `true` or `false`
        #[arg(long)]
        completed: Option<bool>,
    },

    /// Remove a task
    Remove { id: i64 },

    /// Toggle a task between pending and completed
    Toggle { id: i64 },

    /// Show task counts
    Status,
}
