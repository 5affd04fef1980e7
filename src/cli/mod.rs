pub mod commands;
pub mod status;
pub mod task;

pub use commands::*;

use crate::error::TaskmanError;
use crate::output;
use crate::storage::gateway::Gateway;
use crate::storage::sqlite::SqliteSlot;
use crate::store::TaskStore;

pub fn run(command: Commands, json_output: bool) -> i32 {
    let result = match command {
        Commands::Add {
            name,
            description,
            completed,
        } => task::run_add(&name, &description, completed, json_output),
        Commands::List { filter } => task::run_list(&filter, json_output),
        Commands::Edit {
            id,
            name,
            description,
            completed,
        } => task::run_edit(id, name, description, completed, json_output),
        Commands::Remove { id } => task::run_remove(id, json_output),
        Commands::Toggle { id } => task::run_toggle(id, json_output),
        Commands::Status => status::run(json_output),
    };
    match result {
        Ok(code) => code,
        Err(e) => {
            if json_output {
                output::json::print(&output::json::error(&e));
            } else {
                eprintln!("Error: {}", e.message);
            }
            1
        }
    }
}

pub(crate) fn open_store() -> Result<TaskStore, TaskmanError> {
    let slot = SqliteSlot::open_default()?;
    TaskStore::open(Gateway::new(slot))
}
