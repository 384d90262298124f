//! Documentation tasks (`doxy`, `breathe`, `show_doc`)
//!
//! doxygen produces XML that sphinx (through breathe) renders into the HTML
//! documentation. On the documentation CI host the checkout sits two levels
//! above the build's working directory and doxygen is on `PATH`, so CI mode
//! switches both the path prefix and how doxygen is invoked.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use fwtask_core::fs;
use fwtask_core::task::Task;
use fwtask_core::{Context, Error, Invocation, Result};

/// Generate the API documentation XML and stage it for sphinx
pub fn cmd_doxy(ctx: &mut Context<'_>) -> Result<()> {
    let config = ctx.config();
    let layout = &config.layout;

    let (prefix, doxygen): (PathBuf, OsString) = if ctx.is_ci() {
        log::info!("CI documentation build");
        (ctx.path(&layout.ci_prefix), OsString::from("doxygen"))
    } else {
        log::info!("Normal documentation build");
        (ctx.root().to_path_buf(), config.tool("doxygen")?.into_os_string())
    };

    let out_dir = prefix.join(&layout.doxy_out_dir);
    let staged = prefix.join(&layout.doxy_xml_dir);
    fs::ensure_fresh(&out_dir)?;
    fs::ensure_absent(&staged)?;

    let invocation = ctx
        .command(
            doxygen,
            prefix.join(&layout.doxy_conf_dir),
            Task::Doxy.path_profile(),
        )?
        .arg(&config.project.doxyfile);
    ctx.run(&invocation)?;

    let xml = out_dir.join("xml");
    fs::copy_tree(&xml, &staged)?;
    fs::ensure_absent(&xml)
}

/// Build the HTML documentation site
///
/// The stale breathe intermediate is always removed first.
pub fn cmd_breathe(ctx: &mut Context<'_>) -> Result<()> {
    let config = ctx.config();
    let layout = &config.layout;
    let version = &config.project.doc_version;

    fs::ensure_absent(&ctx.path(&layout.sphinx_stale_dir))?;

    let invocation = ctx
        .command("sphinx-build", ctx.root(), Task::Breathe.path_profile())?
        .arg(format!("-Dversion={}", version))
        .arg(format!("-Drelease={}", version))
        .arg(format!("-Aversion={}", version))
        .args(["-b", "html"])
        .arg(ctx.path(&layout.sphinx_source_dir))
        .arg(ctx.path(&layout.sphinx_out_dir));
    ctx.run(&invocation)
}

/// Open the documentation entry page in the default browser
pub fn cmd_show_doc(ctx: &mut Context<'_>) -> Result<()> {
    let index = ctx.path(&ctx.config().layout.sphinx_out_dir).join("index.html");
    if !index.is_file() {
        log::warn!("Documentation not built yet, run `doc` first");
        return Err(Error::MissingFile(index));
    }

    let invocation = opener(&index, ctx.root());
    ctx.run(&invocation)
}

/// Platform command that opens a file with its default application
fn opener(file: &Path, cwd: &Path) -> Invocation {
    if cfg!(windows) {
        // `start` is a shell builtin; the empty string is the window title
        Invocation::new("cmd", cwd).args(["/C", "start", ""]).arg(file)
    } else if cfg!(target_os = "macos") {
        Invocation::new("open", cwd).arg(file)
    } else {
        Invocation::new("xdg-open", cwd).arg(file)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::testutil;
    use fwtask_dummy::RecordingRunner;

    /// Emulates doxygen writing XML into the output directory
    fn doxygen(out_dir: PathBuf) -> RecordingRunner {
        RecordingRunner::new().on("doxygen", move |_| {
            std::fs::create_dir_all(out_dir.join("xml")).unwrap();
            std::fs::write(out_dir.join("xml/index.xml"), "<doxygenindex/>").unwrap();
            Ok(())
        })
    }

    #[test]
    fn test_doxy_normal() {
        let tmp = tempfile::tempdir().unwrap();
        let root = tmp.path();
        std::fs::create_dir_all(root.join("docs/sphinx/_doxyxml/old")).unwrap();
        std::fs::create_dir_all(root.join("build/docs/doxy/html")).unwrap();

        let config = testutil::config();
        let mut runner = doxygen(root.join("build/docs/doxy"));
        {
            let mut ctx = Context::new(&config, root, false, &mut runner);
            cmd_doxy(&mut ctx).unwrap();
        }

        let inv = &runner.invocations()[0];
        assert_eq!(inv.program, OsString::from("/opt/doxygen/bin/doxygen"));
        assert_eq!(inv.arg_strings(), ["li_can_slv.doxyfile"]);
        assert_eq!(inv.cwd, root.join("docs/doxy"));

        // Fresh output, XML staged for sphinx and removed from the output
        assert!(!root.join("build/docs/doxy/html").exists());
        assert!(!root.join("build/docs/doxy/xml").exists());
        assert!(root.join("docs/sphinx/_doxyxml/index.xml").is_file());
        assert!(!root.join("docs/sphinx/_doxyxml/old").exists());
    }

    #[test]
    fn test_doxy_ci() {
        let tmp = tempfile::tempdir().unwrap();
        // CI prefix is ../.. relative to the root
        let checkout = tmp.path();
        let root = checkout.join("a/b");
        std::fs::create_dir_all(&root).unwrap();

        let config = testutil::config();
        let mut runner = doxygen(root.join("../../build/docs/doxy"));
        {
            let mut ctx = Context::new(&config, &root, true, &mut runner);
            cmd_doxy(&mut ctx).unwrap();
        }

        let inv = &runner.invocations()[0];
        assert_eq!(inv.program, OsString::from("doxygen"));
        assert_eq!(inv.arg_strings(), ["li_can_slv.doxyfile"]);
        assert_eq!(inv.cwd, root.join("../../docs/doxy"));
        assert!(checkout.join("docs/sphinx/_doxyxml/index.xml").is_file());
    }

    #[test]
    fn test_doxy_without_xml_output() {
        let tmp = tempfile::tempdir().unwrap();
        let config = testutil::config();
        let mut runner = RecordingRunner::new();
        let mut ctx = Context::new(&config, tmp.path(), false, &mut runner);
        assert!(matches!(cmd_doxy(&mut ctx), Err(Error::Copy { .. })));
    }

    #[test]
    fn test_breathe_removes_stale_before_build() {
        let tmp = tempfile::tempdir().unwrap();
        let root = tmp.path().to_path_buf();
        let stale = root.join("docs/sphinx/_doxy/xml");
        std::fs::create_dir_all(&stale).unwrap();

        let config = testutil::config();
        let check = stale.clone();
        let mut runner = RecordingRunner::new().on("sphinx-build", move |_| {
            assert!(!check.exists(), "stale intermediates present during build");
            Ok(())
        });
        {
            let mut ctx = Context::new(&config, &root, false, &mut runner);
            cmd_breathe(&mut ctx).unwrap();
        }

        let inv = &runner.invocations()[0];
        assert_eq!(
            inv.arg_strings(),
            [
                "-Dversion=master".to_string(),
                "-Drelease=master".to_string(),
                "-Aversion=master".to_string(),
                "-b".to_string(),
                "html".to_string(),
                root.join("docs/sphinx").to_string_lossy().into_owned(),
                root.join("build/docs/sphinx/html").to_string_lossy().into_owned(),
            ]
        );
        assert!(inv.search_path.is_none());
    }

    #[test]
    fn test_show_doc() {
        let tmp = tempfile::tempdir().unwrap();
        let html = tmp.path().join("build/docs/sphinx/html");
        std::fs::create_dir_all(&html).unwrap();
        std::fs::write(html.join("index.html"), "<html/>").unwrap();

        let config = testutil::config();
        let mut runner = RecordingRunner::new();
        {
            let mut ctx = Context::new(&config, tmp.path(), false, &mut runner);
            cmd_show_doc(&mut ctx).unwrap();
        }

        let inv = &runner.invocations()[0];
        let last = inv.args.last().unwrap();
        assert_eq!(PathBuf::from(last), html.join("index.html"));
    }

    #[test]
    fn test_show_doc_not_built() {
        let tmp = tempfile::tempdir().unwrap();
        let config = testutil::config();
        let mut runner = RecordingRunner::new();
        let mut ctx = Context::new(&config, tmp.path(), false, &mut runner);
        assert!(matches!(cmd_show_doc(&mut ctx), Err(Error::MissingFile(_))));
    }
}
