//! Task data structure and related functionality.
//!
//! This module defines the core `Task` struct that represents a single unit
//! of work, the `TaskPatch` partial update applied by the store, and the
//! `MergedTask` projection handed to callers for display.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use uuid::Uuid;

use crate::catalog::CatalogRecord;

/// A unit of work tracked by the store.
///
/// The `id` is a content-derived hex digest assigned at creation and never
/// rewritten. `status_id` and `priority_id` are opaque references into the
/// catalogs; they are only interpreted at read time, when a merge resolves
/// them (or fails to).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: String,
    pub title: String,
    pub description: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub due: DateTime<Utc>,
    pub status_id: u32,
    pub priority_id: u32,
}

/// Partial update for an existing task. Fields left `None` are untouched.
///
/// `id` and `created_at` are deliberately absent: no update path may rewrite
/// them. The store stamps `updated_at` itself after applying a patch.
#[derive(Debug, Clone, Default)]
pub struct TaskPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub due: Option<DateTime<Utc>>,
    pub status_id: Option<u32>,
    pub priority_id: Option<u32>,
}

impl TaskPatch {
    /// Copy every present field onto `task`.
    pub fn apply(&self, task: &mut Task) {
        if let Some(ref title) = self.title {
            task.title = title.clone();
        }
        if let Some(ref description) = self.description {
            task.description = description.clone();
        }
        if let Some(due) = self.due {
            task.due = due;
        }
        if let Some(status_id) = self.status_id {
            task.status_id = status_id;
        }
        if let Some(priority_id) = self.priority_id {
            task.priority_id = priority_id;
        }
    }
}

/// A task decorated with its resolved status and priority records.
///
/// Either record may be `None` when the referenced id has no match in its
/// catalog; display layers render that as "Not available".
#[derive(Debug, Clone)]
pub struct MergedTask {
    pub task: Task,
    pub status: Option<CatalogRecord>,
    pub priority: Option<CatalogRecord>,
}

/// Generate a content-derived task id: SHA-256 over the creation time and a
/// random salt, hex encoded.
pub fn generate_task_id(created_at: DateTime<Utc>) -> String {
    let mut hasher = Sha256::new();
    hasher.update(created_at.to_rfc3339().as_bytes());
    hasher.update(Uuid::new_v4().as_bytes());
    hex::encode(hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_ids_are_unique_hex() {
        let now = Utc::now();
        let a = generate_task_id(now);
        let b = generate_task_id(now);
        assert_ne!(a, b);
        assert_eq!(a.len(), 64);
        assert!(a.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn patch_applies_only_present_fields() {
        let now = Utc::now();
        let mut task = Task {
            id: "abc".into(),
            title: "Buy milk".into(),
            description: "2L".into(),
            created_at: now,
            updated_at: now,
            due: now,
            status_id: 1,
            priority_id: 1,
        };
        let patch = TaskPatch {
            title: Some("Buy oat milk".into()),
            status_id: Some(2),
            ..TaskPatch::default()
        };
        patch.apply(&mut task);
        assert_eq!(task.title, "Buy oat milk");
        assert_eq!(task.status_id, 2);
        assert_eq!(task.description, "2L");
        assert_eq!(task.priority_id, 1);
        assert_eq!(task.created_at, now);
    }
}
