//! todo - daily task tracking CLI.
//!
//! Thin binary over the library: initializes tracing, resolves the
//! backing file paths, constructs the service, and dispatches.

use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use todo_tracker::cli::Cli;
use todo_tracker::cmd::{
    cmd_add, cmd_completions, cmd_delete, cmd_finish, cmd_list, cmd_start, cmd_update, cmd_view,
    Commands,
};
use todo_tracker::service::TaskService;

const DEFAULT_STATUS_FILE: &str = "/etc/todo/status.json";
const DEFAULT_PRIORITY_FILE: &str = "/etc/todo/priority.json";

fn main() {
    init_tracing();

    let cli = Cli::parse();

    // Completions need no files at all.
    if let Commands::Completions { shell } = &cli.command {
        cmd_completions(*shell);
        return;
    }

    let task_file = cli.db.unwrap_or_else(default_task_file);
    let status_file = cli
        .status_file
        .unwrap_or_else(|| PathBuf::from(DEFAULT_STATUS_FILE));
    let priority_file = cli
        .priority_file
        .unwrap_or_else(|| PathBuf::from(DEFAULT_PRIORITY_FILE));

    let mut service = TaskService::open(&task_file, &status_file, &priority_file);

    match cli.command {
        Commands::Completions { .. } => unreachable!("completions handled above"),

        Commands::Add {
            title,
            desc,
            due,
            priority,
        } => cmd_add(&mut service, title, desc, due, priority),

        Commands::List { status } => cmd_list(&service, status),

        Commands::View { prefix } => cmd_view(&service, prefix),

        Commands::Update {
            prefix,
            title,
            desc,
            due,
            status,
            priority,
        } => cmd_update(&mut service, prefix, title, desc, due, status, priority),

        Commands::Delete { prefix } => cmd_delete(&mut service, prefix),

        Commands::Start { prefix } => cmd_start(&mut service, prefix),

        Commands::Finish { prefix } => cmd_finish(&mut service, prefix),
    }
}

// Tracing is opt-in via RUST_LOG; invalid filters fall back to silence.
fn init_tracing() {
    let filter = std::env::var("RUST_LOG")
        .ok()
        .and_then(|raw| EnvFilter::try_new(raw.trim()).ok())
        .unwrap_or_else(|| EnvFilter::new("off"));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}

fn default_task_file() -> PathBuf {
    let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
    PathBuf::from(home)
        .join(".config")
        .join("todo")
        .join("tasks.json")
}
