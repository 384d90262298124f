//! Search path construction
//!
//! Tools are invoked by bare name (`cmake`, `gcovr`, `sphinx-build`) and
//! resolved through `PATH`. Instead of rewriting the process environment,
//! each invocation gets its own augmented search path: the configured tool
//! directories are prepended, in order, to the inherited `PATH`.
//!
//! Existing entries are kept as they are, duplicates included, and a tool
//! directory that does not exist is not an error. A missing tool shows up
//! when it is launched.

use std::ffi::{OsStr, OsString};
use std::path::{Path, PathBuf};

use crate::config::Config;
use crate::error::{Error, Result};

/// Which tool directories to prepend
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathProfile {
    /// Every `path` entry, in table order
    Full,
    /// The `gcc_paths` selection used to configure the cross build
    Gcc,
}

impl PathProfile {
    /// Directories selected by this profile
    pub fn dirs<'a>(&self, config: &'a Config) -> Result<Vec<&'a Path>> {
        match self {
            Self::Full => Ok(config.all_dirs()),
            Self::Gcc => config.gcc_dirs(),
        }
    }
}

/// Prepend `dirs` to `inherited`, keeping both in order
pub fn prepend<P: AsRef<Path>>(dirs: &[P], inherited: Option<&OsStr>) -> Result<OsString> {
    let mut entries: Vec<PathBuf> = dirs.iter().map(|d| d.as_ref().to_path_buf()).collect();
    if let Some(inherited) = inherited {
        entries.extend(std::env::split_paths(inherited));
    }
    std::env::join_paths(entries).map_err(Error::SearchPath)
}

/// Build the search path for a profile on top of the current `PATH`
pub fn search_path(config: &Config, profile: PathProfile) -> Result<OsString> {
    let dirs = profile.dirs(config)?;
    let inherited = std::env::var_os("PATH");
    let path = prepend(&dirs, inherited.as_deref())?;
    log::trace!("{:?} search path: {:?}", profile, path);
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn split(path: &OsStr) -> Vec<PathBuf> {
        std::env::split_paths(path).collect()
    }

    #[test]
    fn test_prepend_order() {
        let inherited = std::env::join_paths(["/usr/bin", "/bin"]).unwrap();
        let path = prepend(&["/opt/a", "/opt/b"], Some(&inherited)).unwrap();
        assert_eq!(
            split(&path),
            ["/opt/a", "/opt/b", "/usr/bin", "/bin"].map(PathBuf::from)
        );
    }

    #[test]
    fn test_prepend_keeps_duplicates() {
        let inherited = std::env::join_paths(["/opt/a", "/usr/bin"]).unwrap();
        let path = prepend(&["/opt/a"], Some(&inherited)).unwrap();
        assert_eq!(
            split(&path),
            ["/opt/a", "/opt/a", "/usr/bin"].map(PathBuf::from)
        );
    }

    #[test]
    fn test_prepend_nonexistent_dir() {
        let path = prepend(&["/definitely/not/here"], None).unwrap();
        assert_eq!(split(&path), [PathBuf::from("/definitely/not/here")]);
    }

    #[test]
    fn test_gcc_profile_selection() {
        let config = Config::default();
        let dirs = PathProfile::Gcc.dirs(&config).unwrap();
        assert_eq!(dirs.len(), 3);
        assert_eq!(dirs[0], Path::new(r"c:\MinGW32\bin"));

        let all = PathProfile::Full.dirs(&config).unwrap();
        assert_eq!(all.len(), config.paths.len());
    }

    #[test]
    fn test_gcc_profile_unknown_entry() {
        let mut config = Config::default();
        config.project.gcc_paths.push("tdm_gcc".into());
        assert!(matches!(
            PathProfile::Gcc.dirs(&config),
            Err(Error::UnknownPath(name)) if name == "tdm_gcc"
        ));
    }

    #[cfg(unix)]
    #[test]
    fn test_separator_in_dir_rejected() {
        assert!(matches!(
            prepend(&["/opt/a:b"], None),
            Err(Error::SearchPath(_))
        ));
    }
}
