//! CLI argument parsing

use clap::Parser;
use fwtask_core::task::{self, Task};
use std::path::PathBuf;

/// Parse a task name or alias
fn parse_task(s: &str) -> Result<Task, String> {
    task::find_task(s)
        .map_err(|e| format!("{} [available: {}]", e, task::task_names_short()))
}

/// Generate dynamic help text for the task argument
fn task_help() -> String {
    format!("Tasks to run [available: {}]", task::task_names_short())
}

#[derive(Parser)]
#[command(name = "fwtask")]
#[command(
    author,
    version,
    about = "Build task runner for the li_can_slv firmware",
    long_about = None
)]
pub struct Cli {
    /// Verbosity level (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Project root; tasks resolve all paths against it
    #[arg(short = 'C', long, default_value = ".")]
    pub root: PathBuf,

    /// Tool configuration file (TOML)
    /// Defaults to fwtask.toml in the project root, then the built-in table
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Force CI mode for the documentation build
    #[arg(long)]
    pub ci: bool,

    /// List tasks and exit
    #[arg(short, long)]
    pub list: bool,

    #[arg(
        value_name = "TASK",
        value_parser = parse_task,
        required_unless_present = "list",
        help = task_help()
    )]
    pub tasks: Vec<Task>,
}
