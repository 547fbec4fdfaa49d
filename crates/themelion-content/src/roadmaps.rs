//! Roadmap loading.

use std::collections::BTreeMap;
use std::path::Path;

use serde::Deserialize;
use themelion_model::{Roadmap, Stage};
use tracing::debug;

use crate::discovery::list_files_with_extension;
use crate::error::{ContentError, Result};

#[derive(Debug, Deserialize)]
struct RoadmapDescriptor {
    roadmap: String,
    name: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    icon: String,
    #[serde(default)]
    stages: Vec<Stage>,
}

/// Loads every `*.yaml` roadmap directly inside `dir`.
///
/// Stages pass through verbatim. Roadmaps are keyed by slug (a later file
/// replaces an earlier one) and returned sorted by name, unlike rooms which
/// sort by `order`.
pub fn load_roadmaps(dir: &Path) -> Result<Vec<Roadmap>> {
    let mut by_slug: BTreeMap<String, Roadmap> = BTreeMap::new();
    for path in list_files_with_extension(dir, "yaml")? {
        let raw = std::fs::read_to_string(&path).map_err(|e| ContentError::io(&path, e))?;
        let descriptor: RoadmapDescriptor =
            serde_yaml::from_str(&raw).map_err(|e| ContentError::yaml(&path, e))?;
        debug!(
            roadmap = %descriptor.roadmap,
            stage_count = descriptor.stages.len(),
            source_filename = %path.display(),
            "loaded roadmap"
        );
        by_slug.insert(
            descriptor.roadmap.clone(),
            Roadmap {
                slug: descriptor.roadmap,
                name: descriptor.name,
                description: descriptor.description,
                icon: descriptor.icon,
                stages: descriptor.stages,
            },
        );
    }
    let mut roadmaps: Vec<Roadmap> = by_slug.into_values().collect();
    sort_by_name(&mut roadmaps);
    Ok(roadmaps)
}

/// Case-insensitive name order, ties broken by the exact name.
fn sort_by_name(roadmaps: &mut [Roadmap]) {
    roadmaps.sort_by(|a, b| {
        a.name
            .to_lowercase()
            .cmp(&b.name.to_lowercase())
            .then_with(|| a.name.cmp(&b.name))
    });
}
