//! Coverage task (`cov`)

use std::ffi::OsStr;

use fwtask_core::fs;
use fwtask_core::task::Task;
use fwtask_core::{Context, Result};

/// Report entry page written by gcovr
const REPORT_PAGE: &str = "coverage-details.html";

/// Generate the HTML coverage report and collect it
///
/// gcovr runs from the build directory and writes into a freshly created
/// coverage directory. The tree is then moved under the artifacts directory,
/// unless it already lives there (the default layout).
pub fn cmd_cov(ctx: &mut Context<'_>) -> Result<()> {
    let layout = &ctx.config().layout;
    let coverage_dir = ctx.path(&layout.coverage_dir);
    fs::ensure_fresh(&coverage_dir)?;

    let invocation = ctx
        .command("gcovr", ctx.build_dir(), Task::Cov.path_profile())?
        .args(["-r", ".", "--html", "--html-details", "-o"])
        .arg(coverage_dir.join(REPORT_PAGE));
    ctx.run(&invocation)?;

    let name = layout
        .coverage_dir
        .file_name()
        .unwrap_or_else(|| OsStr::new("coverage"));
    let dest = ctx.path(&layout.artifacts_dir).join(name);
    if dest != coverage_dir {
        fs::ensure_absent(&dest)?;
        fs::relocate(&coverage_dir, &dest)?;
    }

    log::info!("Coverage report: {}", dest.join(REPORT_PAGE).display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::testutil;
    use fwtask_core::Error;
    use fwtask_dummy::RecordingRunner;
    use std::path::PathBuf;

    fn gcovr() -> RecordingRunner {
        RecordingRunner::new().on("gcovr", |inv| {
            let out = PathBuf::from(inv.args.last().unwrap());
            std::fs::write(out, "<html/>").unwrap();
            Ok(())
        })
    }

    #[test]
    fn test_cov_default_layout() {
        let tmp = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(tmp.path().join("build/coverage")).unwrap();
        std::fs::write(tmp.path().join("build/coverage/old.html"), "stale").unwrap();

        let config = testutil::config();
        let mut runner = gcovr();
        {
            let mut ctx = Context::new(&config, tmp.path(), false, &mut runner);
            cmd_cov(&mut ctx).unwrap();
        }

        let inv = &runner.invocations()[0];
        assert_eq!(inv.cwd, tmp.path().join("build"));
        let args = inv.arg_strings();
        assert_eq!(args[..5], ["-r", ".", "--html", "--html-details", "-o"]);

        let coverage = tmp.path().join("build/coverage");
        assert!(coverage.join(REPORT_PAGE).is_file());
        assert!(!coverage.join("old.html").exists());
    }

    #[test]
    fn test_cov_relocated_to_artifacts() {
        let tmp = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(tmp.path().join("build/artifacts/coverage")).unwrap();

        let mut config = testutil::config();
        config.layout.artifacts_dir = PathBuf::from("build/artifacts");
        let mut runner = gcovr();
        {
            let mut ctx = Context::new(&config, tmp.path(), false, &mut runner);
            cmd_cov(&mut ctx).unwrap();
        }

        assert!(!tmp.path().join("build/coverage").exists());
        assert!(tmp
            .path()
            .join("build/artifacts/coverage")
            .join(REPORT_PAGE)
            .is_file());
    }

    #[test]
    fn test_cov_missing_artifacts_dir() {
        let tmp = tempfile::tempdir().unwrap();
        let mut config = testutil::config();
        config.layout.artifacts_dir = PathBuf::from("out/artifacts");
        let mut runner = gcovr();
        let mut ctx = Context::new(&config, tmp.path(), false, &mut runner);
        assert!(matches!(cmd_cov(&mut ctx), Err(Error::Relocate { .. })));
    }

    #[test]
    fn test_cov_tool_failure() {
        let tmp = tempfile::tempdir().unwrap();
        let config = testutil::config();
        let mut runner = RecordingRunner::new().fail("gcovr", 1);
        let mut ctx = Context::new(&config, tmp.path(), false, &mut runner);
        assert!(matches!(cmd_cov(&mut ctx), Err(Error::ToolFailed { .. })));
    }
}
