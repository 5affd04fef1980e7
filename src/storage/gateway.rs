use log::warn;
use serde_json::Value;

use crate::error::TaskmanError;
use crate::models::Task;
use crate::storage::slot::Slot;

/// Serialized collections larger than this are never written.
pub const MAX_SERIALIZED_LEN: usize = 5_000_000;

/// Persistence boundary for the task collection: JSON encoding, shape
/// validation on the way in, the size ceiling on the way out. Corruption
/// never surfaces as an error; it degrades to an empty collection.
pub struct Gateway {
    slot: Box<dyn Slot>,
}

impl Gateway {
    pub fn new(slot: impl Slot + 'static) -> Self {
        Self {
            slot: Box::new(slot),
        }
    }

    /// Reads the whole collection. An absent slot is an empty collection.
    /// Unparseable or non-array content is scrubbed from the slot and
    /// treated the same, so it is not reprocessed on every load.
    /// Individually malformed records are dropped, keeping the valid
    /// subset in stored order.
    pub fn load(&mut self) -> Result<Vec<Task>, TaskmanError> {
        let raw = match self.slot.read()? {
            Some(raw) => raw,
            None => return Ok(Vec::new()),
        };
        let parsed: Value = match serde_json::from_str(&raw) {
            Ok(parsed) => parsed,
            Err(err) => {
                warn!("stored task data is not valid JSON ({err}); clearing slot");
                self.slot.clear()?;
                return Ok(Vec::new());
            }
        };
        let items = match parsed.as_array() {
            Some(items) => items,
            None => {
                warn!("stored task data is not an array; clearing slot");
                self.slot.clear()?;
                return Ok(Vec::new());
            }
        };
        let tasks: Vec<Task> = items.iter().filter_map(Task::from_value).collect();
        let dropped = items.len() - tasks.len();
        if dropped > 0 {
            warn!("dropped {dropped} malformed task record(s) on load");
        }
        Ok(tasks)
    }

    /// Writes the whole collection. An oversized serialization abandons
    /// the write and leaves the previously stored value untouched.
    pub fn save(&mut self, tasks: &[Task]) -> Result<(), TaskmanError> {
        let data = serde_json::to_string(tasks)?;
        if data.len() > MAX_SERIALIZED_LEN {
            return Err(TaskmanError::write_too_large(data.len(), MAX_SERIALIZED_LEN));
        }
        self.slot.write(&data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use crate::storage::slot::MemorySlot;
    use serde_json::json;

    fn gateway_with_handle() -> (Gateway, MemorySlot) {
        let slot = MemorySlot::new();
        let handle = slot.clone();
        (Gateway::new(slot), handle)
    }

    fn seed(handle: &MemorySlot, raw: &str) {
        let mut slot = handle.clone();
        slot.write(raw).unwrap();
    }

    fn task(id: i64, name: &str, completed: bool) -> Task {
        Task {
            id,
            name: name.to_owned(),
            description: String::new(),
            completed,
        }
    }

    #[test]
    fn load_of_absent_slot_is_empty() {
        let (mut gateway, _handle) = gateway_with_handle();
        assert_eq!(gateway.load().unwrap(), Vec::new());
    }

    #[test]
    fn load_of_garbage_empties_and_scrubs() {
        let (mut gateway, handle) = gateway_with_handle();
        seed(&handle, "{ not json at all");
        assert_eq!(gateway.load().unwrap(), Vec::new());
        assert_eq!(handle.contents(), None);
    }

    #[test]
    fn load_of_non_array_empties_and_scrubs() {
        let (mut gateway, handle) = gateway_with_handle();
        seed(&handle, r#"{"id":1,"name":"n","description":"","completed":false}"#);
        assert_eq!(gateway.load().unwrap(), Vec::new());
        assert_eq!(handle.contents(), None);
    }

    #[test]
    fn load_keeps_valid_subset_in_order() {
        let (mut gateway, handle) = gateway_with_handle();
        let stored = json!([
            {"id": 1, "name": "first", "description": "", "completed": false},
            {"id": "2", "name": "bad id", "description": "", "completed": false},
            {"id": 3, "name": "second", "description": "d", "completed": true},
            {"name": "no id", "description": "", "completed": false},
            {"id": 5, "name": "third", "description": "", "completed": false, "extra": 1}
        ]);
        seed(&handle, &stored.to_string());
        let tasks = gateway.load().unwrap();
        let names: Vec<&str> = tasks.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, ["first", "second", "third"]);
        // Partially corrupt data is not scrubbed; only the load result shrinks.
        assert!(handle.contents().is_some());
    }

    #[test]
    fn save_then_load_round_trips() {
        let (mut gateway, _handle) = gateway_with_handle();
        let tasks = vec![task(1, "a", false), task(2, "b", true)];
        gateway.save(&tasks).unwrap();
        assert_eq!(gateway.load().unwrap(), tasks);
    }

    #[test]
    fn oversized_save_is_rejected_and_slot_untouched() {
        let (mut gateway, handle) = gateway_with_handle();
        gateway.save(&[task(1, "keep me", false)]).unwrap();
        let before = handle.contents();

        let mut huge = task(2, "huge", false);
        huge.description = "x".repeat(MAX_SERIALIZED_LEN + 1);
        let err = gateway.save(&[huge]).unwrap_err();
        assert_eq!(err.code, ErrorCode::WriteTooLarge);
        assert_eq!(handle.contents(), before);
    }
}
