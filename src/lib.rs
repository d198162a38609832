//! # todo - Daily Task Tracking
//!
//! A small file-backed todo tracker where tasks are addressed by a short
//! prefix of their content-hash id instead of a full identifier.
//!
//! ## Key Features
//!
//! - **Short-hash addressing**: every task gets a hex digest id; any
//!   unambiguous prefix of it addresses the task in `view`, `update`,
//!   `delete`, `start`, and `finish`. An ambiguous prefix is always
//!   reported back, never silently resolved.
//! - **Catalog-driven statuses and priorities**: the status and priority
//!   tables are small JSON files loaded at startup, not hard-coded enums.
//!   A missing catalog degrades to "Not available" labels, never a crash.
//! - **Local File Storage**: one JSON file holding the full task list,
//!   rewritten on every mutation.
//!
//! ## Module Organization
//!
//! - `cli`: top-level argument parser
//! - `cmd`: subcommand definitions and console output
//! - `task`: the task entity, partial updates, and the merged view
//! - `db`: the file-backed store and prefix resolution
//! - `catalog`: read-only status/priority reference tables
//! - `service`: facade composing store and catalogs
//! - `error`: error types and result alias
//!
//! Data is stored in `~/.config/todo/tasks.json`; the status and priority
//! catalogs default to `/etc/todo/status.json` and
//! `/etc/todo/priority.json`. All three paths can be overridden with the
//! global `--db`, `--status-file`, and `--priority-file` flags.

pub mod catalog;
pub mod cli;
pub mod cmd;
pub mod db;
pub mod error;
pub mod service;
pub mod task;

pub use error::{Error, Result};
