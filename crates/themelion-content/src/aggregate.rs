//! The full aggregation pass.

use std::collections::BTreeSet;
use std::time::Instant;

use themelion_model::ContentCatalog;
use tracing::{debug, info, info_span};

use crate::error::Result;
use crate::languages::load_languages;
use crate::paths::ContentSources;
use crate::reconcile::reconcile;
use crate::roadmaps::load_roadmaps;
use crate::rooms::load_rooms;
use crate::topics::{DuplicateTopic, ExampleFallback, load_topics};

/// Findings of the loaders that do not fail the pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadDiagnostics {
    pub duplicate_topics: Vec<DuplicateTopic>,
    pub example_fallbacks: Vec<ExampleFallback>,
}

/// Output of one aggregation pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Aggregation {
    pub catalog: ContentCatalog,
    pub diagnostics: LoadDiagnostics,
}

/// Runs every loader and reconciles the registry against loaded content.
///
/// Languages load first because topic examples are classified by extension.
/// Rooms and roadmaps are independent of each other. Reconciliation runs
/// once both rooms and topics are in.
pub fn aggregate(sources: &ContentSources) -> Result<Aggregation> {
    let span = info_span!("aggregate", root = %sources.root.display());
    let _guard = span.enter();
    let start = Instant::now();

    let languages = info_span!("languages").in_scope(|| -> Result<_> {
        let start = Instant::now();
        let languages = load_languages(&sources.languages_dir)?;
        info!(
            language_count = languages.len(),
            duration_ms = start.elapsed().as_millis(),
            "languages loaded"
        );
        Ok(languages)
    })?;
    let rooms = info_span!("rooms").in_scope(|| -> Result<_> {
        let start = Instant::now();
        let rooms = load_rooms(&sources.rooms_dir())?;
        info!(
            room_count = rooms.len(),
            duration_ms = start.elapsed().as_millis(),
            "rooms loaded"
        );
        Ok(rooms)
    })?;
    let roadmaps = info_span!("roadmaps").in_scope(|| -> Result<_> {
        let start = Instant::now();
        let roadmaps = load_roadmaps(&sources.roadmaps_dir())?;
        info!(
            roadmap_count = roadmaps.len(),
            duration_ms = start.elapsed().as_millis(),
            "roadmaps loaded"
        );
        Ok(roadmaps)
    })?;
    let topic_set = info_span!("topics").in_scope(|| -> Result<_> {
        let start = Instant::now();
        let topic_set = load_topics(&sources.root, &sources.content_dir, &languages)?;
        info!(
            topic_count = topic_set.topics.len(),
            example_count = topic_set
                .topics
                .iter()
                .map(|topic| topic.examples.len())
                .sum::<usize>(),
            fallback_count = topic_set.fallbacks.len(),
            duration_ms = start.elapsed().as_millis(),
            "topics loaded"
        );
        Ok(topic_set)
    })?;

    let rooms = info_span!("reconcile").in_scope(|| {
        let start = Instant::now();
        let implemented: BTreeSet<&str> = topic_set
            .topics
            .iter()
            .map(|topic| topic.slug.as_str())
            .collect();
        let rooms = reconcile(rooms, &implemented);
        debug!(
            implemented_count = implemented.len(),
            duration_ms = start.elapsed().as_millis(),
            "registry reconciled"
        );
        rooms
    });

    info!(
        language_count = languages.len(),
        room_count = rooms.len(),
        roadmap_count = roadmaps.len(),
        topic_count = topic_set.topics.len(),
        duplicate_count = topic_set.duplicates.len(),
        duration_ms = start.elapsed().as_millis(),
        "aggregation complete"
    );

    Ok(Aggregation {
        catalog: ContentCatalog {
            rooms,
            topics: topic_set.topics,
            languages: languages.into_vec(),
            roadmaps,
        },
        diagnostics: LoadDiagnostics {
            duplicate_topics: topic_set.duplicates,
            example_fallbacks: topic_set.fallbacks,
        },
    })
}
