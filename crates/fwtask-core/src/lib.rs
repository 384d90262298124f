//! fwtask-core - Core library for the firmware build task runner
//!
//! This crate holds everything the `fwtask` binary needs except the task
//! bodies themselves:
//!
//! - [`config`] - the static tool/path table and directory layout
//! - [`env`] - search path construction for spawned tools
//! - [`task`] - the task registry and prerequisite planning
//! - [`fs`] - directory cleanup and relocation helpers
//! - [`runner`] - the [`Runner`] trait and the real process runner
//! - [`context`] - the execution context threaded through every task
//!
//! # Example
//!
//! ```no_run
//! use fwtask_core::task::{self, Task};
//!
//! let order = task::plan(&[Task::Test]);
//! assert_eq!(order, [Task::Env, Task::TestRun, Task::TestJunit, Task::Test]);
//! for t in order {
//!     println!("{}", t.name());
//! }
//! ```

#![warn(missing_docs)]
#![warn(rust_2018_idioms)]

pub mod config;
pub mod context;
pub mod env;
pub mod error;
pub mod fs;
pub mod runner;
pub mod task;

pub use config::Config;
pub use context::Context;
pub use error::{Error, Result};
pub use runner::{Invocation, Runner, SystemRunner};
pub use task::Task;
