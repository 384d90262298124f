//! Task implementations
//!
//! Each task body is a plain function taking the shared [`Context`]. The
//! bodies know nothing about prerequisites; [`run_tasks`] plans the
//! requested tasks and runs the plan in order, stopping at the first error.
//!
//! ## Build tasks
//!
//! `configure`, `all`/`make`, `clean`, `clean_all` in [`build`].
//!
//! ## Test and coverage tasks
//!
//! `test_conf`, `test_run`, `test_junit`, `test` in [`test`], `cov` in
//! [`coverage`].
//!
//! ## Documentation tasks
//!
//! `doxy`, `breathe`/`doc`, `show_doc` in [`docs`].

pub mod build;
pub mod coverage;
pub mod docs;
mod env;
mod list;
mod vcs;

pub use list::list_tasks;

use fwtask_core::env::PathProfile;
use fwtask_core::task::{self, Task};
use fwtask_core::{Context, Result};

/// Plan `requested` and run every task of the plan
pub fn run_tasks(ctx: &mut Context<'_>, requested: &[Task]) -> Result<()> {
    let order = task::plan(requested);
    log::debug!(
        "Plan: {}",
        order.iter().map(|t| t.name()).collect::<Vec<_>>().join(", ")
    );

    for task in order {
        log::info!("Running task '{}'", task);
        run_task(ctx, task)?;
    }

    Ok(())
}

/// Run a single task body, without its prerequisites
pub fn run_task(ctx: &mut Context<'_>, task: Task) -> Result<()> {
    match task {
        Task::Env => env::cmd_env(ctx, PathProfile::Full),
        Task::EnvGcc => env::cmd_env(ctx, PathProfile::Gcc),
        Task::Configure => build::cmd_configure(ctx),
        Task::All => build::cmd_all(ctx),
        Task::Clean => build::cmd_clean(ctx),
        Task::CleanAll => build::cmd_clean_all(ctx),
        Task::TestConf => test::cmd_test_conf(ctx),
        Task::TestRun => test::cmd_test_run(ctx),
        Task::TestJunit => test::cmd_test_junit(ctx),
        Task::Cov => coverage::cmd_cov(ctx),
        Task::Doxy => docs::cmd_doxy(ctx),
        Task::Breathe => docs::cmd_breathe(ctx),
        Task::ShowDoc => docs::cmd_show_doc(ctx),
        Task::Diff => vcs::cmd_diff(ctx),
        // Aggregates; all work happens in their prerequisites
        Task::Make | Task::Test | Task::Doc => Ok(()),
    }
}

/// Run the generated build tool in the build directory
fn run_build_tool(ctx: &mut Context<'_>, task: Task, args: &[&str]) -> Result<()> {
    let build_tool = ctx.config().build_tool()?;
    let invocation = ctx
        .command(build_tool, ctx.build_dir(), task.path_profile())?
        .args(args);
    ctx.run(&invocation)
}

#[cfg(test)]
pub(crate) mod testutil {
    use fwtask_core::Config;

    /// Tool table with paths that are valid search path entries everywhere
    pub fn config() -> Config {
        Config::from_toml_str(
            r#"
[[path]]
name = "gnu_arm"
dir = "/opt/gcc-arm/bin"

[[path]]
name = "mingw32"
dir = "/opt/mingw32/bin"

[[path]]
name = "cmake"
dir = "/opt/cmake/bin"

[[path]]
name = "ninja"
dir = "/opt/ninja"

[make]
ninja_make = "{ninja}/ninja"

[tools]
cmake = "{cmake}/cmake"
doxygen = "/opt/doxygen/bin/doxygen"
"#,
        )
        .unwrap()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fwtask_core::Error;
    use fwtask_dummy::RecordingRunner;

    #[test]
    fn test_test_runs_unit_tests_before_junit() {
        let tmp = tempfile::tempdir().unwrap();
        std::fs::create_dir(tmp.path().join("build")).unwrap();
        let config = testutil::config();
        let mut runner = RecordingRunner::new().on("python", |inv| {
            std::fs::write(inv.cwd.join("result.xml"), "<testsuites/>").unwrap();
            Ok(())
        });

        {
            let mut ctx = Context::new(&config, tmp.path(), false, &mut runner);
            run_tasks(&mut ctx, &[Task::Test]).unwrap();
        }

        assert_eq!(runner.programs(), ["ninja", "python"]);
        assert_eq!(runner.invocations()[0].arg_strings(), ["unittest_run"]);
        assert!(tmp.path().join("build/result.xml").is_file());
    }

    #[test]
    fn test_failure_aborts_plan() {
        let tmp = tempfile::tempdir().unwrap();
        std::fs::create_dir(tmp.path().join("build")).unwrap();
        let config = testutil::config();
        let mut runner = RecordingRunner::new().fail("ninja", 1);

        let result = {
            let mut ctx = Context::new(&config, tmp.path(), false, &mut runner);
            run_tasks(&mut ctx, &[Task::Test])
        };

        assert!(matches!(result, Err(Error::ToolFailed { code: Some(1), .. })));
        // test_junit never ran
        assert_eq!(runner.programs(), ["ninja"]);
    }

    #[test]
    fn test_make_builds_once() {
        let tmp = tempfile::tempdir().unwrap();
        let config = testutil::config();
        let mut runner = RecordingRunner::new();

        {
            let mut ctx = Context::new(&config, tmp.path(), false, &mut runner);
            run_tasks(&mut ctx, &[Task::All, Task::Make]).unwrap();
        }

        assert_eq!(runner.programs(), ["ninja"]);
        assert_eq!(runner.invocations()[0].arg_strings(), ["-j8", "all"]);
    }

    #[test]
    fn test_clean_all_then_configure() {
        let tmp = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(tmp.path().join("build/CMakeFiles")).unwrap();
        let config = testutil::config();
        let mut runner = RecordingRunner::new();

        {
            let mut ctx = Context::new(&config, tmp.path(), false, &mut runner);
            run_tasks(&mut ctx, &[Task::CleanAll, Task::Configure]).unwrap();
        }

        assert_eq!(runner.programs(), ["cmake"]);
        assert!(tmp.path().join("build").is_dir());
        assert!(!tmp.path().join("build/CMakeFiles").exists());
    }
}
