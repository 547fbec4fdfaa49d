//! Optional `themelion.toml` project configuration.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{ContentError, Result};
use crate::paths::CONFIG_FILE_NAME;

/// Project configuration; every path is relative to the project root.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProjectConfig {
    pub sources: SourcesConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SourcesConfig {
    /// Tree of `topic.mdx` documents.
    pub content: PathBuf,
    /// Holds `rooms/` and `roadmaps/`.
    pub registry: PathBuf,
    pub languages: PathBuf,
}

impl Default for SourcesConfig {
    fn default() -> Self {
        Self {
            content: PathBuf::from("data/content"),
            registry: PathBuf::from("data/registry"),
            languages: PathBuf::from("data/languages"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OutputConfig {
    /// Where `build` and `watch` write the generated module.
    pub module: PathBuf,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            module: PathBuf::from(".themelion/virtual-content.js"),
        }
    }
}

impl ProjectConfig {
    /// Load `<root>/themelion.toml`, falling back to defaults when it is absent.
    pub fn load(root: &Path) -> Result<Self> {
        let path = root.join(CONFIG_FILE_NAME);
        if !path.is_file() {
            return Ok(Self::default());
        }
        let raw = std::fs::read_to_string(&path).map_err(|e| ContentError::io(&path, e))?;
        Self::parse(&path, &raw)
    }

    pub fn parse(path: &Path, raw: &str) -> Result<Self> {
        toml::from_str(raw).map_err(|source| ContentError::Config {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Absolute output module path for `root`.
    pub fn module_path(&self, root: &Path) -> PathBuf {
        root.join(&self.output.module)
    }
}
