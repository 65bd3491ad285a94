//! Actions on confirmed duplicate sets.
//!
//! Decision and effect are kept separate: [`retain`] decides which member of
//! a set survives (a pure function), [`delete`] performs the filesystem
//! mutation. The retention selector never touches the filesystem.

pub mod delete;
pub mod retain;

pub use delete::{delete_discards, BatchDeleteResult, DeleteConfig, DeleteError, DeleteResult};
pub use retain::{select, KeepStrategy, Retention};
