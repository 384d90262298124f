//! TOML configuration file parsing
//!
//! Every section is optional and falls back to the built-in table:
//!
//! ```toml
//! [project]
//! jobs = 4
//!
//! [layout]
//! artifacts_dir = "build/artifacts"
//!
//! [ci]
//! env = "CI"
//! value = "true"
//!
//! [[path]]
//! name = "ninja"
//! dir = "/opt/ninja/bin"
//!
//! [make]
//! ninja_make = "{ninja}/ninja"
//! ```
//!
//! `[project]`, `[layout]` and `[ci]` override field by field. A `[[path]]`
//! list replaces the default list as a whole since its order is the prepend
//! order. `[make]` and `[tools]` entries are merged over the defaults.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use super::{CiDetection, Config, DirLayout, Project, ToolDir};
use crate::error::{Error, Result};

/// TOML configuration file structure
#[derive(Debug, Default, serde::Deserialize)]
#[serde(deny_unknown_fields)]
struct TomlConfigFile {
    project: Option<Project>,
    layout: Option<DirLayout>,
    ci: Option<CiDetection>,
    path: Option<Vec<ToolDir>>,
    #[serde(default)]
    make: BTreeMap<String, String>,
    #[serde(default)]
    tools: BTreeMap<String, String>,
}

impl Config {
    /// Load a configuration from a TOML file
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| Error::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    /// Parse a configuration from a TOML string
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let file: TomlConfigFile = ::toml::from_str(content)?;
        let mut config = Config::default();

        if let Some(project) = file.project {
            config.project = project;
        }
        if let Some(layout) = file.layout {
            config.layout = layout;
        }
        if let Some(ci) = file.ci {
            config.ci = ci;
        }
        if let Some(paths) = file.path {
            config.paths = paths;
        }
        config.make.extend(file.make);
        config.tools.extend(file.tools);

        Ok(config)
    }
}
