use serde_json::json;

use crate::cli::open_store;
use crate::error::TaskmanError;
use crate::models::{StatusFilter, TaskDraft};
use crate::output;

pub fn run_add(
    name: &str,
    description: &str,
    completed: bool,
    json_output: bool,
) -> Result<i32, TaskmanError> {
    let mut store = open_store()?;
    let task = store.create(TaskDraft {
        name: name.to_owned(),
        description: description.to_owned(),
        completed,
    })?;
    store.close();

    if json_output {
        output::json::print(&output::json::success(json!({
            "task": output::json::task_json(&task)
        })));
    } else {
        println!("Added task: {} (#{})", task.name, task.id);
    }
    Ok(0)
}

pub fn run_list(filter: &str, json_output: bool) -> Result<i32, TaskmanError> {
    let filter = StatusFilter::from_str(filter).ok_or_else(|| {
        TaskmanError::validation(format!(
            "unknown filter `{filter}`; expected all, pending or completed"
        ))
    })?;
    let mut store = open_store()?;
    store.set_filter(filter);

    if json_output {
        let tasks: Vec<_> = store
            .filtered()
            .iter()
            .map(|t| output::json::task_json(t))
            .collect();
        output::json::print(&output::json::success(json!({
            "filter": filter.as_str(),
            "tasks": tasks,
            "counts": output::json::counts_json(&store.counts())
        })));
    } else {
        output::text::print_task_list(&store.filtered());
    }
    Ok(0)
}

pub fn run_edit(
    id: i64,
    name: Option<String>,
    description: Option<String>,
    completed: Option<bool>,
    json_output: bool,
) -> Result<i32, TaskmanError> {
    let mut store = open_store()?;
    // The store tolerates unknown ids silently; a human asked for this one
    // specifically, so report it. Also the base record for merging.
    let current = store
        .get(id)
        .cloned()
        .ok_or_else(|| TaskmanError::task_not_found(id))?;

    let draft = TaskDraft {
        name: name.unwrap_or(current.name),
        description: description.unwrap_or(current.description),
        completed: completed.unwrap_or(current.completed),
    };
    store.update(id, draft)?;

    let task = store
        .get(id)
        .cloned()
        .ok_or_else(|| TaskmanError::task_not_found(id))?;
    store.close();

    if json_output {
        output::json::print(&output::json::success(json!({
            "task": output::json::task_json(&task)
        })));
    } else {
        println!("Updated task: {} (#{})", task.name, task.id);
    }
    Ok(0)
}

pub fn run_remove(id: i64, json_output: bool) -> Result<i32, TaskmanError> {
    let mut store = open_store()?;
    if !store.delete(id) {
        return Err(TaskmanError::task_not_found(id));
    }
    store.close();

    if json_output {
        output::json::print(&output::json::success(json!({
            "removed": { "id": id }
        })));
    } else {
        println!("Removed task #{id}");
    }
    Ok(0)
}

pub fn run_toggle(id: i64, json_output: bool) -> Result<i32, TaskmanError> {
    let mut store = open_store()?;
    let completed = store
        .toggle_completed(id)
        .ok_or_else(|| TaskmanError::task_not_found(id))?;
    store.close();

    if json_output {
        output::json::print(&output::json::success(json!({
            "task": { "id": id, "completed": completed }
        })));
    } else {
        let state = if completed { "completed" } else { "pending" };
        println!("Task #{id} is now {state}");
    }
    Ok(0)
}
