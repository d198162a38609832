//! Command implementations for the CLI interface.
//!
//! This module contains the subcommand definitions and the handlers that
//! call into the service and lay out console output. Everything here is
//! presentation: resolution, merging, and persistence live in the service
//! and store.

use chrono::{DateTime, Utc};
use clap::Subcommand;
use clap_complete::{generate, Shell};

use crate::db::{default_due, format_datetime, parse_due_input};
use crate::service::{ListFilter, TaskService};
use crate::task::{MergedTask, TaskPatch};

/// Rendered in place of a status or priority whose id has no catalog match.
const NOT_AVAILABLE: &str = "Not available";

#[derive(Subcommand)]
pub enum Commands {
    /// Add a new task.
    Add {
        /// Short title for the task.
        title: String,
        /// Optional longer description.
        #[arg(long, default_value = "")]
        desc: String,
        /// Due date: YYYY-MM-DD, "YYYY-MM-DD HH:MM", "today", "tomorrow",
        /// or "in Nd". Defaults to tomorrow 17:00.
        #[arg(long)]
        due: Option<String>,
        /// Priority catalog id (1: Low, 2: Medium, 3: High).
        #[arg(long, default_value_t = 1)]
        priority: u32,
    },

    /// List tasks, optionally filtered by status name.
    List {
        /// "all" (default) or a status name such as "todo" or "done".
        status: Option<String>,
    },

    /// View task details by id prefix.
    View {
        /// Task id prefix.
        prefix: String,
    },

    /// Update fields on a task.
    Update {
        /// Task id prefix.
        prefix: String,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        desc: Option<String>,
        /// Due date: YYYY-MM-DD, "YYYY-MM-DD HH:MM", "today", "tomorrow", or "in Nd".
        #[arg(long)]
        due: Option<String>,
        /// Status catalog id.
        #[arg(long)]
        status: Option<u32>,
        /// Priority catalog id.
        #[arg(long)]
        priority: Option<u32>,
    },

    /// Delete a task by id prefix.
    Delete {
        /// Task id prefix.
        prefix: String,
    },

    /// Start working on a task.
    Start {
        /// Task id prefix.
        prefix: String,
    },

    /// Mark a task done.
    Finish {
        /// Task id prefix.
        prefix: String,
    },

    /// Generate shell completion scripts.
    Completions {
        /// Shell to generate completions for.
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Add a new task to the store.
pub fn cmd_add(
    service: &mut TaskService,
    title: String,
    desc: String,
    due: Option<String>,
    priority: u32,
) {
    let due = match due.as_deref() {
        Some(raw) => parse_due_or_exit(raw),
        None => default_due(),
    };
    match service.create(title, desc, due, priority) {
        Ok(merged) => println!("Added task {}", merged.task.id),
        Err(e) => {
            eprintln!("Failed to add task: {e}");
            std::process::exit(1);
        }
    }
}

/// List tasks, one line each, narrowed to a status name when given.
pub fn cmd_list(service: &TaskService, status: Option<String>) {
    let filter = ListFilter::parse(status.as_deref());
    let tasks = service.list(&filter);
    if tasks.is_empty() {
        println!("No tasks found");
        return;
    }
    for merged in tasks {
        let status_icon = merged.status.as_ref().map(|r| r.icon.as_str()).unwrap_or("");
        let priority_icon = merged
            .priority
            .as_ref()
            .map(|r| r.icon.as_str())
            .unwrap_or("");
        println!(
            "[{status_icon}] {} - {} [{priority_icon}]",
            merged.task.id, merged.task.title
        );
    }
}

/// View detailed information about a single task.
pub fn cmd_view(service: &TaskService, prefix: String) {
    let merged = match service.detail(&prefix) {
        Ok(m) => m,
        Err(e) => {
            eprintln!("Error resolving task: {e}");
            std::process::exit(1);
        }
    };
    print_detail(&merged);
}

fn print_detail(merged: &MergedTask) {
    let task = &merged.task;
    println!("\nTask Details:\n-------------");
    println!("ID         : {}", task.id);
    println!("Title      : {}", task.title);
    println!("Description: {}", task.description);
    println!("Created at : {}", format_datetime(task.created_at));
    println!("Updated at : {}", format_datetime(task.updated_at));
    println!("Due        : {}", format_datetime(task.due));
    match merged.status {
        Some(ref s) => println!("Status     : {} {}", s.icon, s.label),
        None => println!("Status     : {NOT_AVAILABLE}"),
    }
    match merged.priority {
        Some(ref p) => println!("Priority   : {} {}", p.icon, p.label),
        None => println!("Priority   : {NOT_AVAILABLE}"),
    }
    println!("-------------\n");
}

/// Update an existing task's fields.
pub fn cmd_update(
    service: &mut TaskService,
    prefix: String,
    title: Option<String>,
    desc: Option<String>,
    due: Option<String>,
    status: Option<u32>,
    priority: Option<u32>,
) {
    let due = due.as_deref().map(parse_due_or_exit);
    let patch = TaskPatch {
        title,
        description: desc,
        due,
        status_id: status,
        priority_id: priority,
    };
    match service.update(&prefix, &patch) {
        Ok(merged) => println!("Updated task {}", merged.task.id),
        Err(e) => {
            eprintln!("Error resolving task: {e}");
            std::process::exit(1);
        }
    }
}

/// Delete a task by id prefix.
pub fn cmd_delete(service: &mut TaskService, prefix: String) {
    match service.delete(&prefix) {
        Ok(task) => println!("Deleted task with ID: {}", task.id),
        Err(e) => {
            eprintln!("Error resolving task: {e}");
            std::process::exit(1);
        }
    }
}

/// Move a task to in-progress.
pub fn cmd_start(service: &mut TaskService, prefix: String) {
    match service.start(&prefix) {
        Ok(merged) => println!("Started task {}", merged.task.id),
        Err(e) => {
            eprintln!("Error resolving task: {e}");
            std::process::exit(1);
        }
    }
}

/// Mark a task done.
pub fn cmd_finish(service: &mut TaskService, prefix: String) {
    match service.finish(&prefix) {
        Ok(merged) => println!("Finished task {}", merged.task.id),
        Err(e) => {
            eprintln!("Error resolving task: {e}");
            std::process::exit(1);
        }
    }
}

/// Generate completion scripts for the given shell.
pub fn cmd_completions(shell: Shell) {
    use clap::CommandFactory;

    use crate::cli::Cli;

    let mut app = Cli::command();
    let app_name = app.get_name().to_string();
    generate(shell, &mut app, app_name, &mut std::io::stdout());
}

fn parse_due_or_exit(raw: &str) -> DateTime<Utc> {
    match parse_due_input(raw) {
        Some(dt) => dt,
        None => {
            eprintln!(
                "Unrecognised due date '{raw}'. Use YYYY-MM-DD, 'YYYY-MM-DD HH:MM', 'today', 'tomorrow', or 'in Nd'."
            );
            std::process::exit(1);
        }
    }
}
