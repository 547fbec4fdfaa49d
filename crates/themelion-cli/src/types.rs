use std::path::PathBuf;

use serde::Serialize;
use themelion_model::{ContentCatalog, IntegrityReport};
use themelion_module::WriteOutcome;

/// Headline numbers for one catalog.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CatalogCounts {
    pub rooms: usize,
    pub categories: usize,
    pub registered_topics: usize,
    pub implemented_topics: usize,
    pub topics: usize,
    pub languages: usize,
    pub roadmaps: usize,
}

impl CatalogCounts {
    pub fn of(catalog: &ContentCatalog) -> Self {
        let summaries = catalog.rooms.iter().flat_map(|room| room.topic_summaries());
        let (registered_topics, implemented_topics) =
            summaries.fold((0, 0), |(registered, implemented), summary| {
                (
                    registered + 1,
                    implemented + usize::from(summary.status.is_implemented()),
                )
            });
        Self {
            rooms: catalog.rooms.len(),
            categories: catalog.rooms.iter().map(|room| room.categories.len()).sum(),
            registered_topics,
            implemented_topics,
            topics: catalog.topics.len(),
            languages: catalog.languages.len(),
            roadmaps: catalog.roadmaps.len(),
        }
    }
}

#[derive(Debug)]
pub struct BuildResult {
    pub root: PathBuf,
    pub output: PathBuf,
    /// `None` when the write was blocked by integrity errors.
    pub write: Option<WriteOutcome>,
    pub fingerprint: String,
    pub counts: CatalogCounts,
    pub report: IntegrityReport,
    pub has_errors: bool,
}

#[derive(Debug)]
pub struct CheckResult {
    pub root: PathBuf,
    pub counts: CatalogCounts,
    pub report: IntegrityReport,
}
