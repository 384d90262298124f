//! fwtask - Build task runner for the li_can_slv firmware
//!
//! Runs the named steps of the firmware pipeline: configuring the cross
//! build with cmake, building and testing with ninja, coverage with gcovr and
//! documentation with doxygen and sphinx.
//!
//! # Architecture
//!
//! Every task is a short, linear sequence of steps (clean a directory,
//! run one external tool, move a report). The tool locations come from a
//! static table (`fwtask.toml` or the built-in defaults), and each run
//! threads a single `Context` through the tasks instead of mutating the
//! process environment. Tasks declare prerequisites; the requested tasks are
//! expanded into a plan and run strictly one after another, stopping at the
//! first failure.

mod cli;
mod commands;

use clap::Parser;
use cli::Cli;
use fwtask_core::{Config, Context, SystemRunner};
use std::path::{Path, PathBuf};

/// Config file looked up in the project root when `--config` is not given
const DEFAULT_CONFIG: &str = "fwtask.toml";

fn main() {
    let cli = Cli::parse();

    // RUST_LOG still takes precedence over -v
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(log_level(cli.verbose)),
    )
    .init();

    if cli.list {
        commands::list_tasks();
        return;
    }

    let root = match project_root(&cli.root) {
        Ok(root) => root,
        Err(e) => {
            eprintln!("Failed to resolve project root {}: {}", cli.root.display(), e);
            std::process::exit(1);
        }
    };

    let config = match load_config(cli.config.as_deref(), &root) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load config: {}", e);
            std::process::exit(1);
        }
    };

    let ci = cli.ci || config.ci.detect();
    log::info!("{}", run_banner(&config, ci));

    let mut runner = SystemRunner;
    let mut ctx = Context::new(&config, root, ci, &mut runner);

    if let Err(e) = commands::run_tasks(&mut ctx, &cli.tasks) {
        log::error!("{}", e);
        std::process::exit(e.exit_code());
    }
}

/// Default log filter for the given `-v` count
fn log_level(verbose: u8) -> &'static str {
    match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    }
}

/// One-line description of the run, logged before the first task
fn run_banner(config: &Config, ci: bool) -> String {
    if ci {
        format!("Project {} (CI mode)", config.project.name)
    } else {
        format!("Project {}", config.project.name)
    }
}

/// Make the project root absolute so tools see full paths
fn project_root(root: &Path) -> std::io::Result<PathBuf> {
    Ok(std::env::current_dir()?.join(root))
}

/// Load the tool configuration from the specified path or default locations
fn load_config(path: Option<&Path>, root: &Path) -> fwtask_core::Result<Config> {
    if let Some(path) = path {
        // User specified a path
        let config = Config::from_toml_file(path)?;
        log::debug!("Loaded config from {}", path.display());
        return Ok(config);
    }

    let default_path = root.join(DEFAULT_CONFIG);
    if default_path.is_file() {
        let config = Config::from_toml_file(&default_path)?;
        log::debug!("Loaded config from {}", default_path.display());
        Ok(config)
    } else {
        log::debug!("No {} found, using built-in tool table", DEFAULT_CONFIG);
        Ok(Config::default())
    }
}
