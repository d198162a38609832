use std::path::PathBuf;

use clap::Parser;

use crate::cmd::Commands;

/// Simple, file-backed todo CLI addressed by short id prefixes.
/// Storage defaults to ~/.config/todo/tasks.json or a path passed via --db.
#[derive(Parser)]
#[command(name = "todo", version, about = "Daily todo tracking CLI")]
pub struct Cli {
    /// Path to the JSON task file.
    #[arg(long, global = true)]
    pub db: Option<PathBuf>,

    /// Path to the status catalog file.
    #[arg(long, global = true)]
    pub status_file: Option<PathBuf>,

    /// Path to the priority catalog file.
    #[arg(long, global = true)]
    pub priority_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}
