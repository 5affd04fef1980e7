use serde_json::{json, Value};

use crate::error::TaskmanError;
use crate::models::Task;
use crate::store::TaskCounts;

pub fn print(value: &Value) {
    println!("{}", serde_json::to_string_pretty(value).unwrap());
}

pub fn success(data: Value) -> Value {
    json!({
        "success": true,
        "data": data
    })
}

pub fn error(err: &TaskmanError) -> Value {
    json!({
        "success": false,
        "error": {
            "code": err.code.as_str(),
            "message": err.message
        }
    })
}

pub fn task_json(t: &Task) -> Value {
    json!({
        "id": t.id,
        "name": t.name,
        "description": t.description,
        "completed": t.completed
    })
}

pub fn counts_json(c: &TaskCounts) -> Value {
    json!({
        "total": c.total,
        "pending": c.pending,
        "completed": c.completed,
        "percentage": (c.percentage * 10.0).round() / 10.0
    })
}
