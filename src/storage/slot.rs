use std::sync::{Arc, Mutex};

use crate::error::TaskmanError;

/// A single named location in local durable storage, read and replaced
/// whole. Implementations own the key; callers only ever see one slot.
pub trait Slot: Send {
    /// Raw stored value, `None` when nothing has been written yet.
    fn read(&mut self) -> Result<Option<String>, TaskmanError>;
    /// Replaces the stored value.
    fn write(&mut self, value: &str) -> Result<(), TaskmanError>;
    /// Removes the stored value, as if nothing had ever been written.
    fn clear(&mut self) -> Result<(), TaskmanError>;
}

/// Slot held in memory behind a shared handle. Clones share contents, so
/// one handle can inspect what another wrote. Used for ephemeral sessions
/// and tests.
#[derive(Clone, Default)]
pub struct MemorySlot {
    cell: Arc<Mutex<MemoryCell>>,
}

#[derive(Default)]
struct MemoryCell {
    value: Option<String>,
    writes: u64,
}

impl MemorySlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current contents, if any.
    pub fn contents(&self) -> Option<String> {
        self.cell.lock().unwrap().value.clone()
    }

    /// Number of completed writes so far.
    pub fn writes(&self) -> u64 {
        self.cell.lock().unwrap().writes
    }
}

impl Slot for MemorySlot {
    fn read(&mut self) -> Result<Option<String>, TaskmanError> {
        Ok(self.cell.lock().unwrap().value.clone())
    }

    fn write(&mut self, value: &str) -> Result<(), TaskmanError> {
        let mut cell = self.cell.lock().unwrap();
        cell.value = Some(value.to_owned());
        cell.writes += 1;
        Ok(())
    }

    fn clear(&mut self) -> Result<(), TaskmanError> {
        self.cell.lock().unwrap().value = None;
        Ok(())
    }
}
