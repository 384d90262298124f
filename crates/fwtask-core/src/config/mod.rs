//! Tool/path table and directory layout
//!
//! The configuration is a static table mapping logical tool names to
//! locations on the development host, plus the fixed directory layout and
//! command parameters used by the tasks. It is loaded once at startup and
//! never mutated afterwards.
//!
//! Three tables describe where tools live:
//!
//! - `path` - ordered list of tool directories, prepended to `PATH`
//! - `make` - build tool executables (`ninja_make`, `mingw32_make`, ...)
//! - `tools` - other executables (`doxygen`, `cmake`, ...)
//!
//! Values in `make` and `tools` may reference a `path` entry with a
//! `{name}` placeholder, e.g. `{ninja}\ninja.exe`. Placeholders are expanded
//! on lookup, so an entry nobody asks for is never validated.

mod toml;

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{Error, Result};

/// A named tool directory from the `path` table
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ToolDir {
    /// Logical name (`cmake`, `ninja`, ...)
    pub name: String,
    /// Directory containing the tool's executables
    pub dir: PathBuf,
}

impl ToolDir {
    fn new(name: &str, dir: &str) -> Self {
        Self {
            name: name.to_string(),
            dir: PathBuf::from(dir),
        }
    }
}

/// Command parameters shared by the tasks
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Project {
    /// Project name, used in log output
    pub name: String,
    /// Cross-compilation toolchain file passed to cmake (relative to the build dir's parent)
    pub toolchain_file: String,
    /// cmake generator name
    pub generator: String,
    /// Parallel jobs for the default build
    pub jobs: u32,
    /// Key in the `make` table of the generated build tool
    pub build_tool: String,
    /// `path` entries prepended for the configure step, in order
    pub gcc_paths: Vec<String>,
    /// Doxygen configuration file, relative to the doxygen config dir
    pub doxyfile: String,
    /// Version string substituted into the sphinx build
    pub doc_version: String,
    /// Python interpreter used for the JUnit conversion script
    pub python: String,
    /// Unity-to-JUnit conversion script
    pub junit_script: PathBuf,
    /// File name of the JUnit report written by the conversion script
    pub junit_report: String,
}

impl Default for Project {
    fn default() -> Self {
        Self {
            name: "li_can_slv".to_string(),
            toolchain_file: "tools/toolchain-tdm_gcc32.cmake".to_string(),
            generator: "Ninja".to_string(),
            jobs: 8,
            build_tool: "ninja_make".to_string(),
            gcc_paths: vec!["mingw32".into(), "cmake".into(), "ninja".into()],
            doxyfile: "li_can_slv.doxyfile".to_string(),
            doc_version: "master".to_string(),
            python: "python".to_string(),
            junit_script: PathBuf::from("verify/unity/auto/unity_to_junit.py"),
            junit_report: "result.xml".to_string(),
        }
    }
}

/// Directory layout, relative to the project root
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct DirLayout {
    /// Build output directory
    pub build_dir: PathBuf,
    /// Coverage report output
    pub coverage_dir: PathBuf,
    /// Raw unit test output consumed by the JUnit conversion
    pub unittest_dir: PathBuf,
    /// Where generated reports are collected
    pub artifacts_dir: PathBuf,
    /// Doxygen output directory
    pub doxy_out_dir: PathBuf,
    /// Directory holding the doxyfile; doxygen runs from here
    pub doxy_conf_dir: PathBuf,
    /// Doxygen XML staged for the sphinx build
    pub doxy_xml_dir: PathBuf,
    /// Sphinx source directory
    pub sphinx_source_dir: PathBuf,
    /// Sphinx HTML output directory
    pub sphinx_out_dir: PathBuf,
    /// Stale intermediate removed before every sphinx build
    pub sphinx_stale_dir: PathBuf,
    /// Prefix applied to the documentation paths in CI mode
    pub ci_prefix: PathBuf,
}

impl Default for DirLayout {
    fn default() -> Self {
        Self {
            build_dir: PathBuf::from("build"),
            coverage_dir: PathBuf::from("build/coverage"),
            unittest_dir: PathBuf::from("build/verify/source"),
            artifacts_dir: PathBuf::from("build"),
            doxy_out_dir: PathBuf::from("build/docs/doxy"),
            doxy_conf_dir: PathBuf::from("docs/doxy"),
            doxy_xml_dir: PathBuf::from("docs/sphinx/_doxyxml"),
            sphinx_source_dir: PathBuf::from("docs/sphinx"),
            sphinx_out_dir: PathBuf::from("build/docs/sphinx/html"),
            sphinx_stale_dir: PathBuf::from("docs/sphinx/_doxy/xml"),
            ci_prefix: PathBuf::from("../.."),
        }
    }
}

/// How a CI host is recognized
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct CiDetection {
    /// Environment variable to inspect
    pub env: String,
    /// Value that marks a CI build
    pub value: String,
}

impl Default for CiDetection {
    fn default() -> Self {
        Self {
            env: "READTHEDOCS".to_string(),
            value: "True".to_string(),
        }
    }
}

impl CiDetection {
    /// Check the current process environment for the CI marker
    pub fn detect(&self) -> bool {
        std::env::var(&self.env).is_ok_and(|v| v == self.value)
    }
}

/// Complete tool configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Command parameters
    pub project: Project,
    /// Directory layout
    pub layout: DirLayout,
    /// CI detection
    pub ci: CiDetection,
    /// Ordered tool directories
    pub paths: Vec<ToolDir>,
    /// Build tool executables, unexpanded
    pub make: BTreeMap<String, String>,
    /// Other tool executables, unexpanded
    pub tools: BTreeMap<String, String>,
}

impl Default for Config {
    /// The tool locations of the Windows development machine
    fn default() -> Self {
        let paths = vec![
            ToolDir::new(
                "gnu_arm",
                r"c:\Program Files (x86)\GNU Tools ARM Embedded\4.9 2015q2\bin",
            ),
            ToolDir::new("mingw32", r"c:\MinGW32\bin"),
            ToolDir::new(
                "gnu_arm_tools",
                r"c:\Program Files\GNU ARM Eclipse\Build Tools\2.6-201507152002\bin",
            ),
            ToolDir::new("cmake", r"c:\Program Files\CMake\bin"),
            ToolDir::new("ninja", r"c:\PortableApps\ninja-win"),
        ];

        let make = [
            ("gnu_arm_make", r"{gnu_arm_tools}\make.exe"),
            ("mingw32_make", r"{mingw32}\mingw32-make.exe"),
            ("ninja_make", r"{ninja}\ninja.exe"),
        ];
        let tools = [
            ("doxygen", r"c:\Program Files\doxygen\bin\doxygen.exe"),
            ("ant_bat", r"c:\v_infrastructure\ant\bin\ant.bat"),
            ("cmake", r"{cmake}\cmake.exe"),
        ];

        Self {
            project: Project::default(),
            layout: DirLayout::default(),
            ci: CiDetection::default(),
            paths,
            make: to_table(&make),
            tools: to_table(&tools),
        }
    }
}

fn to_table(entries: &[(&str, &str)]) -> BTreeMap<String, String> {
    entries
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

impl Config {
    /// Look up a tool directory by name
    pub fn path_dir(&self, name: &str) -> Result<&Path> {
        self.paths
            .iter()
            .find(|p| p.name == name)
            .map(|p| p.dir.as_path())
            .ok_or_else(|| Error::UnknownPath(name.to_string()))
    }

    /// All tool directories in table order
    pub fn all_dirs(&self) -> Vec<&Path> {
        self.paths.iter().map(|p| p.dir.as_path()).collect()
    }

    /// Tool directories used for the configure step, in `gcc_paths` order
    pub fn gcc_dirs(&self) -> Result<Vec<&Path>> {
        self.project
            .gcc_paths
            .iter()
            .map(|name| self.path_dir(name))
            .collect()
    }

    /// Resolve an entry from the `make` table
    pub fn make_tool(&self, name: &str) -> Result<PathBuf> {
        let raw = self
            .make
            .get(name)
            .ok_or_else(|| Error::UnknownTool(name.to_string()))?;
        self.expand(raw)
    }

    /// Resolve an entry from the `tools` table
    pub fn tool(&self, name: &str) -> Result<PathBuf> {
        let raw = self
            .tools
            .get(name)
            .ok_or_else(|| Error::UnknownTool(name.to_string()))?;
        self.expand(raw)
    }

    /// The generated build tool (`ninja.exe` by default)
    pub fn build_tool(&self) -> Result<PathBuf> {
        self.make_tool(&self.project.build_tool)
    }

    /// Replace `{name}` placeholders with the matching `path` entry
    pub fn expand(&self, raw: &str) -> Result<PathBuf> {
        let mut out = String::with_capacity(raw.len());
        let mut rest = raw;

        while let Some(open) = rest.find('{') {
            out.push_str(&rest[..open]);
            let after = &rest[open + 1..];
            let close = after
                .find('}')
                .ok_or_else(|| Error::UnknownPath(after.to_string()))?;
            let name = &after[..close];
            let dir = self.path_dir(name)?;
            out.push_str(&dir.to_string_lossy());
            rest = &after[close + 1..];
        }
        out.push_str(rest);

        Ok(PathBuf::from(out))
    }
}
