//! Execution context
//!
//! A [`Context`] is built once per run and handed to every task. It owns
//! nothing global: the working directory and search path of each tool are
//! derived from it per invocation, so tasks can run in any order without
//! depending on what an earlier task did to the process environment.

use std::ffi::{OsStr, OsString};
use std::path::{Path, PathBuf};

use crate::config::Config;
use crate::env::{self, PathProfile};
use crate::error::Result;
use crate::runner::{Invocation, Runner};

/// Everything a task needs to run
pub struct Context<'a> {
    config: &'a Config,
    root: PathBuf,
    ci: bool,
    runner: &'a mut dyn Runner,
}

impl<'a> Context<'a> {
    /// Create a context rooted at `root`
    pub fn new(
        config: &'a Config,
        root: impl Into<PathBuf>,
        ci: bool,
        runner: &'a mut dyn Runner,
    ) -> Self {
        Self {
            config,
            root: root.into(),
            ci,
            runner,
        }
    }

    /// The tool configuration
    pub fn config(&self) -> &'a Config {
        self.config
    }

    /// Project root
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Whether CI mode is active
    pub fn is_ci(&self) -> bool {
        self.ci
    }

    /// Resolve a project-relative path
    pub fn path(&self, rel: impl AsRef<Path>) -> PathBuf {
        self.root.join(rel)
    }

    /// The build output directory
    pub fn build_dir(&self) -> PathBuf {
        self.path(&self.config.layout.build_dir)
    }

    /// Search path for a profile, `None` to inherit the parent's
    pub fn search_path(&self, profile: Option<PathProfile>) -> Result<Option<OsString>> {
        profile
            .map(|p| env::search_path(self.config, p))
            .transpose()
    }

    /// Prepare an invocation of `program` in `cwd` with the given profile
    pub fn command(
        &self,
        program: impl AsRef<OsStr>,
        cwd: impl Into<PathBuf>,
        profile: Option<PathProfile>,
    ) -> Result<Invocation> {
        Ok(Invocation::new(program, cwd).search_path(self.search_path(profile)?))
    }

    /// Run an invocation to completion
    pub fn run(&mut self, invocation: &Invocation) -> Result<()> {
        self.runner.run(invocation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runner::SystemRunner;

    #[test]
    fn test_paths_are_rooted() {
        let config = Config::default();
        let mut runner = SystemRunner;
        let ctx = Context::new(&config, "/work/li_can_slv", false, &mut runner);
        assert_eq!(ctx.build_dir(), PathBuf::from("/work/li_can_slv/build"));
        assert_eq!(
            ctx.path("docs/doxy"),
            PathBuf::from("/work/li_can_slv/docs/doxy")
        );
        assert!(!ctx.is_ci());
    }

    #[test]
    fn test_command_search_path() {
        let config = Config::from_toml_str(
            r#"
[[path]]
name = "mingw32"
dir = "/opt/mingw32/bin"

[[path]]
name = "cmake"
dir = "/opt/cmake/bin"

[[path]]
name = "ninja"
dir = "/opt/ninja"
"#,
        )
        .unwrap();
        let mut runner = SystemRunner;
        let ctx = Context::new(&config, ".", false, &mut runner);

        let inv = ctx.command("cmake", ".", Some(PathProfile::Gcc)).unwrap();
        let path = inv.search_path.unwrap();
        let first: Vec<PathBuf> = std::env::split_paths(&path).take(3).collect();
        assert_eq!(
            first,
            ["/opt/mingw32/bin", "/opt/cmake/bin", "/opt/ninja"].map(PathBuf::from)
        );

        let inv = ctx.command("git", ".", None).unwrap();
        assert!(inv.search_path.is_none());
    }
}
