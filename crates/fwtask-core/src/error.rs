//! Error types for fwtask-core

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while loading configuration or running tasks
#[derive(Debug, Error)]
pub enum Error {
    /// Failed to remove a directory tree (anything but "not found")
    #[error("Failed to remove {}: {source}", .path.display())]
    RemoveDir {
        /// Directory that could not be removed
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Failed to create a directory
    #[error("Failed to create {}: {source}", .path.display())]
    CreateDir {
        /// Directory that could not be created
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Failed to move a file or directory
    #[error("Failed to move {} to {}: {source}", .from.display(), .to.display())]
    Relocate {
        /// Source path
        from: PathBuf,
        /// Destination path
        to: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Failed to copy a directory tree
    #[error("Failed to copy {} to {}: {source}", .from.display(), .to.display())]
    Copy {
        /// Source path
        from: PathBuf,
        /// Destination path
        to: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// The program could not be started at all
    #[error("Failed to launch {program}: {source}")]
    Launch {
        /// Program as it was passed to the OS
        program: String,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// The program ran and exited unsuccessfully
    #[error("{program} failed with {}", describe_exit(.code))]
    ToolFailed {
        /// Program that failed
        program: String,
        /// Exit code, `None` if terminated by a signal
        code: Option<i32>,
    },

    /// The augmented search path could not be assembled
    #[error("Invalid search path entry: {0}")]
    SearchPath(#[source] std::env::JoinPathsError),

    /// A `path` entry referenced by the configuration does not exist
    #[error("Unknown path entry '{0}'")]
    UnknownPath(String),

    /// A `make`/`tools` entry referenced by the configuration does not exist
    #[error("Unknown tool '{0}'")]
    UnknownTool(String),

    /// Failed to read the configuration file
    #[error("Failed to read config {}: {source}", .path.display())]
    ConfigRead {
        /// Configuration file path
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse the configuration
    #[error("Invalid config: {0}")]
    ConfigParse(#[from] toml::de::Error),

    /// A generated file a task depends on is not there
    #[error("{} not found", .0.display())]
    MissingFile(PathBuf),

    /// Task name or alias not in the registry
    #[error("Unknown task '{0}'")]
    UnknownTask(String),
}

impl Error {
    /// Process exit code to report for this error
    ///
    /// A failing tool hands its own exit code through; everything else is 1.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::ToolFailed {
                code: Some(code), ..
            } if *code != 0 => *code,
            _ => 1,
        }
    }
}

fn describe_exit(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("exit code {}", code),
        None => "termination by signal".to_string(),
    }
}

/// Result type for fwtask-core operations
pub type Result<T> = std::result::Result<T, Error>;
