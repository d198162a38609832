//! Facade composing the task store with the reference catalogs.
//!
//! `TaskService` is the surface the command layer talks to. It owns the
//! `Database` plus both catalogs (injected at construction, so tests can
//! substitute synthetic ones) and returns merged views: tasks decorated
//! with their resolved status and priority records.

use std::path::Path;

use chrono::{DateTime, Utc};

use crate::catalog::Catalog;
use crate::db::Database;
use crate::error::Result;
use crate::task::{generate_task_id, MergedTask, Task, TaskPatch};

/// Well-known status names in the stock catalog.
pub const STATUS_TODO: &str = "todo";
pub const STATUS_IN_PROGRESS: &str = "in-progress";
pub const STATUS_DONE: &str = "done";

// Conventional catalog ids, used as fallbacks when the status catalog
// failed to load. Keeps start/finish usable under an empty catalog.
const TODO_ID: u32 = 1;
const IN_PROGRESS_ID: u32 = 2;
const DONE_ID: u32 = 3;

/// List selection: everything, or only tasks whose resolved status carries
/// the given name.
#[derive(Debug, Clone, PartialEq)]
pub enum ListFilter {
    All,
    Status(String),
}

impl ListFilter {
    /// Interpret a CLI argument: absent or the sentinel "all" selects
    /// everything, any other value is treated as a status name.
    pub fn parse(arg: Option<&str>) -> Self {
        match arg {
            None | Some("all") => ListFilter::All,
            Some(name) => ListFilter::Status(name.to_string()),
        }
    }
}

/// Caller-facing task operations returning merged views.
pub struct TaskService {
    db: Database,
    statuses: Catalog,
    priorities: Catalog,
}

impl TaskService {
    /// Compose a service from an already-loaded store and catalogs.
    pub fn new(db: Database, statuses: Catalog, priorities: Catalog) -> Self {
        TaskService {
            db,
            statuses,
            priorities,
        }
    }

    /// Construct from backing file paths. Missing or malformed files
    /// degrade to an empty store and empty catalogs.
    pub fn open(task_file: &Path, status_file: &Path, priority_file: &Path) -> Self {
        TaskService::new(
            Database::load(task_file),
            Catalog::load(status_file),
            Catalog::load(priority_file),
        )
    }

    fn merge(&self, task: &Task) -> MergedTask {
        MergedTask {
            task: task.clone(),
            status: self.statuses.get_by_id(task.status_id).cloned(),
            priority: self.priorities.get_by_id(task.priority_id).cloned(),
        }
    }

    fn status_id_for(&self, name: &str, fallback: u32) -> u32 {
        self.statuses.get_by_name(name).map(|r| r.id).unwrap_or(fallback)
    }

    /// Create a task with a fresh content-hash id and persist it.
    ///
    /// New tasks land in the todo status; both timestamps start at the
    /// creation instant.
    pub fn create(
        &mut self,
        title: String,
        description: String,
        due: DateTime<Utc>,
        priority_id: u32,
    ) -> Result<MergedTask> {
        let now = Utc::now();
        let task = Task {
            id: generate_task_id(now),
            title,
            description,
            created_at: now,
            updated_at: now,
            due,
            status_id: self.status_id_for(STATUS_TODO, TODO_ID),
            priority_id,
        };
        let merged = self.merge(&task);
        self.db.add(task)?;
        Ok(merged)
    }

    /// Resolve a prefix and decorate the match with its catalog records.
    pub fn detail(&self, prefix: &str) -> Result<MergedTask> {
        let task = self.db.resolve_prefix(prefix)?;
        Ok(self.merge(task))
    }

    /// Merged tasks in store order, optionally narrowed to a status name.
    ///
    /// A task whose status id does not resolve is excluded from named
    /// filters; it still shows up under `All` and in `detail`.
    pub fn list(&self, filter: &ListFilter) -> Vec<MergedTask> {
        self.db
            .tasks()
            .iter()
            .filter(|t| match filter {
                ListFilter::All => true,
                ListFilter::Status(name) => self
                    .statuses
                    .get_by_id(t.status_id)
                    .map(|r| r.name == *name)
                    .unwrap_or(false),
            })
            .map(|t| self.merge(t))
            .collect()
    }

    /// Apply a partial update to the task matching `prefix`.
    pub fn update(&mut self, prefix: &str, patch: &TaskPatch) -> Result<MergedTask> {
        let task = self.db.update(prefix, patch)?.clone();
        Ok(self.merge(&task))
    }

    /// Remove the task matching `prefix`, returning the removed record.
    pub fn delete(&mut self, prefix: &str) -> Result<Task> {
        self.db.delete(prefix)
    }

    /// Mark the matching task done.
    pub fn finish(&mut self, prefix: &str) -> Result<MergedTask> {
        let status_id = self.status_id_for(STATUS_DONE, DONE_ID);
        self.set_status(prefix, status_id)
    }

    /// Move the matching task to in-progress.
    pub fn start(&mut self, prefix: &str) -> Result<MergedTask> {
        let status_id = self.status_id_for(STATUS_IN_PROGRESS, IN_PROGRESS_ID);
        self.set_status(prefix, status_id)
    }

    fn set_status(&mut self, prefix: &str, status_id: u32) -> Result<MergedTask> {
        let patch = TaskPatch {
            status_id: Some(status_id),
            ..TaskPatch::default()
        };
        self.update(prefix, &patch)
    }
}
