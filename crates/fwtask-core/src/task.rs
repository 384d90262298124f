//! Task registry and planning
//!
//! The set of tasks is fixed. Each task has a primary name, optional
//! aliases, and prerequisite tasks that must finish before it starts.
//! [`plan`] expands a list of requested tasks into the order they actually
//! run in, with every task appearing at most once.

use std::fmt;
use std::str::FromStr;

use crate::env::PathProfile;
use crate::error::{Error, Result};

/// A named build task
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Task {
    /// Resolve the full tool search path
    Env,
    /// Resolve the search path for the cross compiler
    EnvGcc,
    /// Generate a fresh build tree
    Configure,
    /// Build the default targets
    All,
    /// Same as `all`
    Make,
    /// Run the build tool's clean target
    Clean,
    /// Remove the build tree and generated doc intermediates
    CleanAll,
    /// Generate the unit test runners
    TestConf,
    /// Run the unit tests
    TestRun,
    /// Convert unit test output to a JUnit report
    TestJunit,
    /// Run the unit tests and produce the JUnit report
    Test,
    /// Generate the HTML coverage report
    Cov,
    /// Generate the API documentation XML
    Doxy,
    /// Build the documentation site
    Breathe,
    /// Same as `breathe`
    Doc,
    /// Open the built documentation in a browser
    ShowDoc,
    /// Directory diff of the working tree
    Diff,
}

/// Static description of a task
pub struct TaskInfo {
    /// The task
    pub task: Task,
    /// Primary name
    pub name: &'static str,
    /// Alternative names
    pub aliases: &'static [&'static str],
    /// Short description
    pub description: &'static str,
    /// Tasks that run first, in this order
    pub prerequisites: &'static [Task],
}

/// Every task, in listing order
pub const TASKS: &[TaskInfo] = &[
    TaskInfo {
        task: Task::Env,
        name: "env",
        aliases: &[],
        description: "Show the search path with all tool directories",
        prerequisites: &[],
    },
    TaskInfo {
        task: Task::EnvGcc,
        name: "env_gcc",
        aliases: &[],
        description: "Show the search path used to configure the cross build",
        prerequisites: &[],
    },
    TaskInfo {
        task: Task::Configure,
        name: "configure",
        aliases: &["cmakeGenerateMakeFileMINGW"],
        description: "Recreate the build directory and run cmake with the toolchain file",
        prerequisites: &[Task::EnvGcc],
    },
    TaskInfo {
        task: Task::All,
        name: "all",
        aliases: &[],
        description: "Build the default targets",
        prerequisites: &[Task::Env],
    },
    TaskInfo {
        task: Task::Make,
        name: "make",
        aliases: &[],
        description: "Same as all",
        prerequisites: &[Task::All],
    },
    TaskInfo {
        task: Task::Clean,
        name: "clean",
        aliases: &[],
        description: "Run the build tool's clean target",
        prerequisites: &[Task::Env],
    },
    TaskInfo {
        task: Task::CleanAll,
        name: "clean_all",
        aliases: &[],
        description: "Remove the build directory and generated doc intermediates",
        prerequisites: &[],
    },
    TaskInfo {
        task: Task::TestConf,
        name: "test_conf",
        aliases: &["unittestGenerateTestRunner"],
        description: "Generate the unit test runners",
        prerequisites: &[Task::Env],
    },
    TaskInfo {
        task: Task::TestRun,
        name: "test_run",
        aliases: &["unittestWorkstationRunMinGWGcc"],
        description: "Run the compiled unit tests",
        prerequisites: &[Task::Env],
    },
    TaskInfo {
        task: Task::TestJunit,
        name: "test_junit",
        aliases: &[],
        description: "Convert unit test output to a JUnit report",
        prerequisites: &[Task::Env],
    },
    TaskInfo {
        task: Task::Test,
        name: "test",
        aliases: &[],
        description: "Run the unit tests and produce the JUnit report",
        prerequisites: &[Task::TestRun, Task::TestJunit],
    },
    TaskInfo {
        task: Task::Cov,
        name: "cov",
        aliases: &["coverage"],
        description: "Generate the HTML coverage report",
        prerequisites: &[Task::Env],
    },
    TaskInfo {
        task: Task::Doxy,
        name: "doxy",
        aliases: &[],
        description: "Generate API documentation XML with doxygen",
        prerequisites: &[],
    },
    TaskInfo {
        task: Task::Breathe,
        name: "breathe",
        aliases: &[],
        description: "Build the HTML documentation with sphinx",
        prerequisites: &[],
    },
    TaskInfo {
        task: Task::Doc,
        name: "doc",
        aliases: &[],
        description: "Same as breathe",
        prerequisites: &[Task::Breathe],
    },
    TaskInfo {
        task: Task::ShowDoc,
        name: "show_doc",
        aliases: &[],
        description: "Open the built documentation in the default browser",
        prerequisites: &[],
    },
    TaskInfo {
        task: Task::Diff,
        name: "diff",
        aliases: &[],
        description: "Run git difftool over the whole working tree",
        prerequisites: &[],
    },
];

impl Task {
    /// Registry entry for this task
    pub fn info(self) -> &'static TaskInfo {
        TASKS
            .iter()
            .find(|info| info.task == self)
            .unwrap_or_else(|| unreachable!("task {:?} missing from registry", self))
    }

    /// Primary name
    pub fn name(self) -> &'static str {
        self.info().name
    }

    /// Prerequisite tasks, in run order
    pub fn prerequisites(self) -> &'static [Task] {
        self.info().prerequisites
    }

    /// Search path profile this task's tools run with, if any
    ///
    /// Follows the `env`/`env_gcc` prerequisite the task declares.
    pub fn path_profile(self) -> Option<PathProfile> {
        let prereqs = self.prerequisites();
        if prereqs.contains(&Task::EnvGcc) {
            Some(PathProfile::Gcc)
        } else if prereqs.contains(&Task::Env) {
            Some(PathProfile::Full)
        } else {
            None
        }
    }
}

impl fmt::Display for Task {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Task {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        find_task(s)
    }
}

/// Look up a task by name or alias (exact match)
pub fn find_task(name: &str) -> Result<Task> {
    TASKS
        .iter()
        .find(|info| info.name == name || info.aliases.contains(&name))
        .map(|info| info.task)
        .ok_or_else(|| Error::UnknownTask(name.to_string()))
}

/// Comma-separated list of primary task names, for help text
pub fn task_names_short() -> String {
    let names: Vec<&str> = TASKS.iter().map(|info| info.name).collect();
    names.join(", ")
}

/// Expand prerequisites and drop repeats
///
/// Prerequisites come before the task that needs them, depth first in
/// declaration order. A task already planned is not planned again, so
/// `plan(&[Test])` is `[Env, TestRun, TestJunit, Test]`.
pub fn plan(requested: &[Task]) -> Vec<Task> {
    let mut order = Vec::new();
    for &task in requested {
        visit(task, &mut order);
    }
    order
}

fn visit(task: Task, order: &mut Vec<Task>) {
    if order.contains(&task) {
        return;
    }
    for &pre in task.prerequisites() {
        visit(pre, order);
    }
    order.push(task);
}
