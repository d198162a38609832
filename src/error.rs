//! Error types for store and service operations.
//!
//! Load failures never show up here: a missing or malformed backing file
//! degrades to an empty store or catalog instead (see `Database::load` and
//! `Catalog::load`). Everything else an operation can hit is a tagged
//! variant, so callers can react without string matching.

use thiserror::Error;

/// Errors surfaced by task operations.
#[derive(Error, Debug)]
pub enum Error {
    #[error("no task found with id starting with '{0}'")]
    NotFound(String),

    #[error("multiple tasks found with id starting with '{0}', add more characters")]
    AmbiguousPrefix(String),

    #[error("a task with id {0} already exists")]
    DuplicateId(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for task operations.
pub type Result<T> = std::result::Result<T, Error>;
