//! External process invocation
//!
//! An [`Invocation`] describes one call to an external tool: program,
//! arguments, working directory and an optional replacement search path.
//! A [`Runner`] executes it. [`SystemRunner`] spawns a real process with
//! inherited stdio and blocks until it exits; tests substitute a runner that
//! only records what would have been run.

use std::ffi::{OsStr, OsString};
use std::fmt;
use std::path::{Path, PathBuf};
use std::process::Command;

use crate::error::{Error, Result};

/// A single external command
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    /// Program, either a bare name resolved via the search path or a full path
    pub program: OsString,
    /// Arguments, passed as-is (no shell)
    pub args: Vec<OsString>,
    /// Working directory for the child
    pub cwd: PathBuf,
    /// Replacement `PATH` for the child, if any
    pub search_path: Option<OsString>,
}

impl Invocation {
    /// Start an invocation of `program` in `cwd`
    pub fn new(program: impl AsRef<OsStr>, cwd: impl Into<PathBuf>) -> Self {
        Self {
            program: program.as_ref().to_os_string(),
            args: Vec::new(),
            cwd: cwd.into(),
            search_path: None,
        }
    }

    /// Append one argument
    pub fn arg(mut self, arg: impl AsRef<OsStr>) -> Self {
        self.args.push(arg.as_ref().to_os_string());
        self
    }

    /// Append several arguments
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        self.args
            .extend(args.into_iter().map(|a| a.as_ref().to_os_string()));
        self
    }

    /// Run with the given `PATH`
    pub fn search_path(mut self, path: Option<OsString>) -> Self {
        self.search_path = path;
        self
    }

    /// Program name as a lossy string, for messages
    pub fn program_name(&self) -> String {
        self.program.to_string_lossy().into_owned()
    }

    /// Whether the program is `name` or a path ending in `name`
    ///
    /// A trailing `.exe` is ignored so tests can match Windows tool paths.
    pub fn is_program(&self, name: &str) -> bool {
        let program = Path::new(&self.program);
        let stem = match program.extension() {
            Some(ext) if ext.eq_ignore_ascii_case("exe") => program.file_stem(),
            _ => program.file_name(),
        };
        // Windows paths in the default table use backslashes
        let lossy = stem.map(|s| s.to_string_lossy().into_owned());
        match lossy {
            Some(s) => s.rsplit('\\').next() == Some(name),
            None => false,
        }
    }

    /// Arguments as lossy strings
    pub fn arg_strings(&self) -> Vec<String> {
        self.args
            .iter()
            .map(|a| a.to_string_lossy().into_owned())
            .collect()
    }

    /// Build the `std::process::Command` for this invocation
    pub fn to_command(&self) -> Command {
        let mut command = Command::new(&self.program);
        command.args(&self.args).current_dir(&self.cwd);
        if let Some(path) = &self.search_path {
            command.env("PATH", path);
        }
        command
    }
}

impl fmt::Display for Invocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", quote(&self.program))?;
        for arg in &self.args {
            write!(f, " {}", quote(arg))?;
        }
        Ok(())
    }
}

fn quote(s: &OsStr) -> String {
    let s = s.to_string_lossy();
    if s.is_empty() || s.contains(char::is_whitespace) {
        format!("\"{}\"", s)
    } else {
        s.into_owned()
    }
}

/// Something that can execute invocations
pub trait Runner {
    /// Run the invocation to completion
    ///
    /// Must return an error if the program cannot be started or exits
    /// unsuccessfully.
    fn run(&mut self, invocation: &Invocation) -> Result<()>;
}

/// Runs invocations as real child processes
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemRunner;

impl Runner for SystemRunner {
    fn run(&mut self, invocation: &Invocation) -> Result<()> {
        log::info!("[{}] {}", invocation.cwd.display(), invocation);

        let status = invocation
            .to_command()
            .status()
            .map_err(|source| Error::Launch {
                program: invocation.program_name(),
                source,
            })?;

        if status.success() {
            Ok(())
        } else {
            Err(Error::ToolFailed {
                program: invocation.program_name(),
                code: status.code(),
            })
        }
    }
}
