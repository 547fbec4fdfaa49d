//! Project root and source directory resolution.

use std::path::{Path, PathBuf};

use crate::config::ProjectConfig;

/// Environment variable for overriding the project root.
pub const ROOT_ENV_VAR: &str = "THEMELION_ROOT";

/// Optional configuration file at the project root.
pub const CONFIG_FILE_NAME: &str = "themelion.toml";

/// Get the project root directory.
///
/// Resolution order:
/// 1. explicit path (the `--root` flag)
/// 2. `THEMELION_ROOT` environment variable
/// 3. current working directory
pub fn resolve_root(explicit: Option<&Path>) -> PathBuf {
    if let Some(path) = explicit {
        return path.to_path_buf();
    }
    if let Ok(root) = std::env::var(ROOT_ENV_VAR) {
        return PathBuf::from(root);
    }
    PathBuf::from(".")
}

/// Absolute locations of the four source trees of one project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentSources {
    pub root: PathBuf,
    pub content_dir: PathBuf,
    pub registry_dir: PathBuf,
    pub languages_dir: PathBuf,
}

impl ContentSources {
    /// Default layout under `root` (`data/content`, `data/registry`, `data/languages`).
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self::from_config(root, &ProjectConfig::default())
    }

    pub fn from_config(root: impl Into<PathBuf>, config: &ProjectConfig) -> Self {
        let root = root.into();
        Self {
            content_dir: root.join(&config.sources.content),
            registry_dir: root.join(&config.sources.registry),
            languages_dir: root.join(&config.sources.languages),
            root,
        }
    }

    pub fn rooms_dir(&self) -> PathBuf {
        self.registry_dir.join("rooms")
    }

    pub fn roadmaps_dir(&self) -> PathBuf {
        self.registry_dir.join("roadmaps")
    }

    /// Directories whose changes invalidate the generated module.
    pub fn watch_roots(&self) -> [&Path; 3] {
        [
            self.content_dir.as_path(),
            self.registry_dir.as_path(),
            self.languages_dir.as_path(),
        ]
    }

    /// Returns true if `path` lies under one of the watch roots.
    pub fn is_watched(&self, path: &Path) -> bool {
        self.watch_roots().iter().any(|root| path.starts_with(root))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_root_wins() {
        assert_eq!(
            resolve_root(Some(Path::new("/srv/site"))),
            PathBuf::from("/srv/site")
        );
    }

    #[test]
    fn default_layout() {
        let sources = ContentSources::new("/site");
        assert_eq!(sources.content_dir, PathBuf::from("/site/data/content"));
        assert_eq!(sources.rooms_dir(), PathBuf::from("/site/data/registry/rooms"));
        assert_eq!(
            sources.roadmaps_dir(),
            PathBuf::from("/site/data/registry/roadmaps")
        );
        assert_eq!(sources.languages_dir, PathBuf::from("/site/data/languages"));
    }

    #[test]
    fn watched_paths_are_limited_to_source_roots() {
        let sources = ContentSources::new("/site");
        assert!(sources.is_watched(Path::new("/site/data/content/a/topic.mdx")));
        assert!(sources.is_watched(Path::new("/site/data/registry/rooms/a.yaml")));
        assert!(sources.is_watched(Path::new("/site/data/languages/python.json")));
        assert!(!sources.is_watched(Path::new("/site/src/main.tsx")));
        assert!(!sources.is_watched(Path::new("/site/data/contentious.txt")));
    }
}
