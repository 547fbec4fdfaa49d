//! The aggregated content catalog.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::language::Language;
use crate::registry::Room;
use crate::roadmap::Roadmap;
use crate::topic::Topic;

/// Everything one aggregation pass produces.
///
/// Lookups are linear scans over the stored vectors; the catalog is small
/// and rebuilt from scratch on every pass, so there is no index to keep in
/// sync.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentCatalog {
    /// Rooms sorted ascending by `order`.
    pub rooms: Vec<Room>,
    /// Topics in content-path order, one per slug.
    pub topics: Vec<Topic>,
    pub languages: Vec<Language>,
    /// Roadmaps sorted by `name`.
    pub roadmaps: Vec<Roadmap>,
}

impl ContentCatalog {
    pub fn room_by_slug(&self, slug: &str) -> Option<&Room> {
        self.rooms.iter().find(|room| room.slug == slug)
    }

    pub fn topic_by_slug(&self, slug: &str) -> Option<&Topic> {
        self.topics.iter().find(|topic| topic.slug == slug)
    }

    pub fn roadmap_by_slug(&self, slug: &str) -> Option<&Roadmap> {
        self.roadmaps.iter().find(|roadmap| roadmap.slug == slug)
    }

    /// Finds the language whose extension is `extension` (given without the dot).
    pub fn language_by_extension(&self, extension: &str) -> Option<&Language> {
        self.languages
            .iter()
            .find(|language| language.matches_extension(extension))
    }

    /// Slugs of every loaded topic.
    pub fn implemented_slugs(&self) -> BTreeSet<&str> {
        self.topics.iter().map(|topic| topic.slug.as_str()).collect()
    }

    /// Maps every registered summary slug to its title.
    ///
    /// When two rooms register the same slug, the later room's title wins.
    pub fn topic_titles(&self) -> BTreeMap<&str, &str> {
        let mut titles = BTreeMap::new();
        for room in &self.rooms {
            for summary in room.topic_summaries() {
                titles.insert(summary.slug.as_str(), summary.title.as_str());
            }
        }
        titles
    }
}
