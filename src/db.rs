//! Task storage, persistence, and prefix resolution.
//!
//! This module provides the `Database` struct that owns the persisted task
//! list, along with the due-date parsing and formatting helpers used by the
//! command layer.
//!
//! Persistence is whole-file: every mutation rewrites the complete task
//! list. There is no locking, so two processes writing the same file race
//! and the last writer wins; the temp-plus-rename save only protects
//! against a torn write, not against concurrent writers.

use std::fs::{self, File};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Duration, Local, NaiveDate, NaiveDateTime, Utc};
use tracing::warn;

use crate::error::{Error, Result};
use crate::task::{Task, TaskPatch};

/// Hour of day used when a due date is given or defaulted without a time.
const DEFAULT_DUE_HOUR: u32 = 17;

/// File-backed task store.
#[derive(Debug)]
pub struct Database {
    path: PathBuf,
    tasks: Vec<Task>,
}

impl Database {
    /// Load the store from `path`, starting empty if the file doesn't exist.
    ///
    /// An unreadable or malformed file also degrades to an empty store
    /// with a logged warning; construction never fails.
    pub fn load(path: &Path) -> Self {
        let tasks = if path.exists() {
            let mut buf = String::new();
            match File::open(path).and_then(|mut f| f.read_to_string(&mut buf)) {
                Ok(_) => match serde_json::from_str(&buf) {
                    Ok(tasks) => tasks,
                    Err(e) => {
                        warn!("error parsing {}, starting empty: {e}", path.display());
                        Vec::new()
                    }
                },
                Err(e) => {
                    warn!("error reading {}, starting empty: {e}", path.display());
                    Vec::new()
                }
            }
        } else {
            Vec::new()
        };
        Database {
            path: path.to_path_buf(),
            tasks,
        }
    }

    /// All tasks in insertion order.
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// Resolve a short id prefix to the single matching task.
    ///
    /// Matching is case-sensitive over the full literal prefix; an empty
    /// prefix matches every task. Zero matches is `NotFound`, two or more
    /// is `AmbiguousPrefix`; the store never picks a "best" match.
    pub fn resolve_prefix(&self, prefix: &str) -> Result<&Task> {
        self.resolve_prefix_index(prefix).map(|i| &self.tasks[i])
    }

    fn resolve_prefix_index(&self, prefix: &str) -> Result<usize> {
        let mut matches = self
            .tasks
            .iter()
            .enumerate()
            .filter(|(_, t)| t.id.starts_with(prefix));
        match (matches.next(), matches.next()) {
            (None, _) => Err(Error::NotFound(prefix.to_string())),
            (Some((i, _)), None) => Ok(i),
            (Some(_), Some(_)) => Err(Error::AmbiguousPrefix(prefix.to_string())),
        }
    }

    /// Append a task and persist.
    ///
    /// A task whose id already exists is rejected without touching the
    /// store or the backing file.
    pub fn add(&mut self, task: Task) -> Result<()> {
        if self.tasks.iter().any(|t| t.id == task.id) {
            return Err(Error::DuplicateId(task.id));
        }
        self.tasks.push(task);
        self.save()
    }

    /// Apply `patch` to the task matching `prefix` and persist.
    ///
    /// `updated_at` is always stamped with the current time, even when the
    /// caller supplied no fields; `id` and `created_at` are never touched.
    /// Nothing is persisted when resolution fails.
    pub fn update(&mut self, prefix: &str, patch: &TaskPatch) -> Result<&Task> {
        let idx = self.resolve_prefix_index(prefix)?;
        let task = &mut self.tasks[idx];
        patch.apply(task);
        task.updated_at = Utc::now();
        self.save()?;
        Ok(&self.tasks[idx])
    }

    /// Remove the task matching `prefix` and persist.
    pub fn delete(&mut self, prefix: &str) -> Result<Task> {
        let idx = self.resolve_prefix_index(prefix)?;
        let task = self.tasks.remove(idx);
        self.save()?;
        Ok(task)
    }

    /// Write the full task list back to the backing file.
    ///
    /// Uses a temp file + rename so an interrupted write can't truncate
    /// the store. Write failures propagate to the caller.
    pub fn save(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let tmp = self.path.with_extension("json.tmp");
        let data = serde_json::to_string_pretty(&self.tasks)?;
        let mut f = File::create(&tmp)?;
        f.write_all(data.as_bytes())?;
        f.flush()?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

/// Parse human-readable due date input.
///
/// Supports:
/// - "YYYY-MM-DD" (due time defaults to 17:00 local)
/// - "YYYY-MM-DD HH:MM"
/// - "today", "tomorrow"
/// - "in 3d"
pub fn parse_due_input(s: &str) -> Option<DateTime<Utc>> {
    let s = s.trim().to_lowercase();
    let today = Local::now().date_naive();

    match s.as_str() {
        "today" => return at_default_hour(today),
        "tomorrow" => return at_default_hour(today + Duration::days(1)),
        _ => {}
    }

    if let Some(rest) = s.strip_prefix("in ") {
        if let Some(nd) = rest.strip_suffix('d') {
            if let Ok(days) = nd.trim().parse::<i64>() {
                return at_default_hour(today + Duration::days(days));
            }
        }
    }

    if let Ok(dt) = NaiveDateTime::parse_from_str(&s, "%Y-%m-%d %H:%M") {
        return local_to_utc(dt);
    }
    if let Ok(d) = NaiveDate::parse_from_str(&s, "%Y-%m-%d") {
        return at_default_hour(d);
    }
    None
}

/// Default due date when none is supplied: tomorrow at 17:00 local.
pub fn default_due() -> DateTime<Utc> {
    let tomorrow = Local::now().date_naive() + Duration::days(1);
    at_default_hour(tomorrow).unwrap_or_else(Utc::now)
}

fn at_default_hour(date: NaiveDate) -> Option<DateTime<Utc>> {
    local_to_utc(date.and_hms_opt(DEFAULT_DUE_HOUR, 0, 0)?)
}

fn local_to_utc(naive: NaiveDateTime) -> Option<DateTime<Utc>> {
    naive
        .and_local_timezone(Local)
        .earliest()
        .map(|dt| dt.with_timezone(&Utc))
}

/// Format a stored timestamp for display in local time, e.g. "Mar 4 2026 5:00 PM".
pub fn format_datetime(dt: DateTime<Utc>) -> String {
    dt.with_timezone(&Local)
        .format("%b %-d %Y %-I:%M %p")
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn task(id: &str, title: &str) -> Task {
        let now = Utc::now();
        Task {
            id: id.into(),
            title: title.into(),
            description: String::new(),
            created_at: now,
            updated_at: now,
            due: now,
            status_id: 1,
            priority_id: 1,
        }
    }

    fn empty_db(dir: &tempfile::TempDir) -> Database {
        Database::load(&dir.path().join("tasks.json"))
    }

    #[test]
    fn missing_file_starts_empty() {
        let dir = tempfile::tempdir().expect("tempdir");
        let db = empty_db(&dir);
        assert!(db.tasks().is_empty());
    }

    #[test]
    fn malformed_file_starts_empty() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("tasks.json");
        fs::write(&path, "not json at all").expect("write");
        let db = Database::load(&path);
        assert!(db.tasks().is_empty());
    }

    #[test]
    fn save_then_load_round_trips_all_fields() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("tasks.json");
        let mut db = Database::load(&path);
        let mut t = task("abc123", "Buy milk");
        t.description = "2L, oat".into();
        t.status_id = 2;
        t.priority_id = 3;
        db.add(t.clone()).expect("add");

        let reloaded = Database::load(&path);
        assert_eq!(reloaded.tasks(), &[t]);
    }

    #[test]
    fn add_rejects_duplicate_id_without_mutating() {
        let dir = tempfile::tempdir().expect("tempdir");
        let mut db = empty_db(&dir);
        db.add(task("abc123", "first")).expect("add");
        let err = db.add(task("abc123", "second")).unwrap_err();
        assert!(matches!(err, Error::DuplicateId(ref id) if id == "abc123"));
        assert_eq!(db.tasks().len(), 1);
        assert_eq!(db.tasks()[0].title, "first");
    }

    #[test]
    fn prefix_resolution_unique_ambiguous_not_found() {
        let dir = tempfile::tempdir().expect("tempdir");
        let mut db = empty_db(&dir);
        db.add(task("abc123", "one")).expect("add");
        db.add(task("abcd99", "two")).expect("add");

        assert!(matches!(
            db.resolve_prefix("abc"),
            Err(Error::AmbiguousPrefix(_))
        ));
        assert_eq!(db.resolve_prefix("abc1").expect("unique").id, "abc123");
        assert!(matches!(db.resolve_prefix("zzz"), Err(Error::NotFound(_))));
    }

    #[test]
    fn empty_prefix_matches_everything() {
        let dir = tempfile::tempdir().expect("tempdir");
        let mut db = empty_db(&dir);
        db.add(task("abc123", "one")).expect("add");
        assert_eq!(db.resolve_prefix("").expect("unique").id, "abc123");

        db.add(task("def456", "two")).expect("add");
        assert!(matches!(
            db.resolve_prefix(""),
            Err(Error::AmbiguousPrefix(_))
        ));
    }

    #[test]
    fn prefix_matching_is_case_sensitive() {
        let dir = tempfile::tempdir().expect("tempdir");
        let mut db = empty_db(&dir);
        db.add(task("abc123", "one")).expect("add");
        assert!(matches!(db.resolve_prefix("ABC"), Err(Error::NotFound(_))));
    }

    #[test]
    fn update_preserves_identity_and_bumps_updated_at() {
        let dir = tempfile::tempdir().expect("tempdir");
        let mut db = empty_db(&dir);
        db.add(task("abc123", "Buy milk")).expect("add");
        let created = db.tasks()[0].created_at;
        let before = db.tasks()[0].updated_at;

        let patch = TaskPatch {
            title: Some("Buy oat milk".into()),
            ..TaskPatch::default()
        };
        let updated = db.update("abc1", &patch).expect("update");
        assert_eq!(updated.id, "abc123");
        assert_eq!(updated.title, "Buy oat milk");
        assert_eq!(updated.created_at, created);
        assert!(updated.updated_at >= before);
    }

    #[test]
    fn update_unresolvable_prefix_persists_nothing() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("tasks.json");
        let mut db = Database::load(&path);
        db.add(task("abc123", "one")).expect("add");
        db.add(task("abcd99", "two")).expect("add");

        let patch = TaskPatch {
            title: Some("changed".into()),
            ..TaskPatch::default()
        };
        assert!(db.update("abc", &patch).is_err());

        let reloaded = Database::load(&path);
        assert!(reloaded.tasks().iter().all(|t| t.title != "changed"));
    }

    #[test]
    fn delete_removes_exactly_one() {
        let dir = tempfile::tempdir().expect("tempdir");
        let mut db = empty_db(&dir);
        db.add(task("abc123", "one")).expect("add");
        db.add(task("def456", "two")).expect("add");

        let removed = db.delete("abc").expect("delete");
        assert_eq!(removed.id, "abc123");
        assert_eq!(db.tasks().len(), 1);
        assert_eq!(db.tasks()[0].id, "def456");
    }

    #[test]
    fn delete_unresolvable_prefix_is_an_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        let mut db = empty_db(&dir);
        db.add(task("abc123", "one")).expect("add");
        assert!(matches!(db.delete("zzz"), Err(Error::NotFound(_))));
        assert_eq!(db.tasks().len(), 1);
    }

    #[test]
    fn parse_due_accepts_iso_date_and_datetime() {
        assert!(parse_due_input("2026-03-04").is_some());
        assert!(parse_due_input("2026-03-04 09:30").is_some());
        assert!(parse_due_input("today").is_some());
        assert!(parse_due_input("tomorrow").is_some());
        assert!(parse_due_input("in 3d").is_some());
        assert!(parse_due_input("next century").is_none());
        assert!(parse_due_input("2026-13-99").is_none());
    }
}
