pub mod debounce;
pub mod gateway;
pub mod slot;
pub mod sqlite;

pub use debounce::DebouncedWriter;
pub use gateway::Gateway;
pub use slot::{MemorySlot, Slot};
pub use sqlite::SqliteSlot;
