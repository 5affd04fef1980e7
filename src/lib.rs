//! Local task list manager.
//!
//! An in-memory task collection persisted to a single key-value slot:
//! records are shape-validated on load, writes carry a size ceiling and are
//! debounced against rapid mutation bursts. The CLI in [`cli`] is a thin
//! presentation layer over [`store::TaskStore`].

pub mod cli;
pub mod error;
pub mod logging;
pub mod models;
pub mod output;
pub mod storage;
pub mod store;
