use std::collections::{BTreeMap, BTreeSet};

use themelion_model::{ContentCatalog, Room};

/// Authoritative slug sets of one catalog.
pub(crate) struct SlugIndex<'a> {
    /// Slugs with content.
    pub topics: BTreeSet<&'a str>,
    /// Slugs registered in any category.
    pub summaries: BTreeSet<&'a str>,
    /// First room registered under each slug.
    pub rooms: BTreeMap<&'a str, &'a Room>,
}

impl<'a> SlugIndex<'a> {
    pub fn build(catalog: &'a ContentCatalog) -> Self {
        let mut rooms = BTreeMap::new();
        let mut summaries = BTreeSet::new();
        for room in &catalog.rooms {
            rooms.entry(room.slug.as_str()).or_insert(room);
            summaries.extend(room.topic_summaries().map(|summary| summary.slug.as_str()));
        }
        Self {
            topics: catalog.implemented_slugs(),
            summaries,
            rooms,
        }
    }

    /// A slug is known when it has content or is registered somewhere.
    pub fn is_known_topic(&self, slug: &str) -> bool {
        self.topics.contains(slug) || self.summaries.contains(slug)
    }
}
