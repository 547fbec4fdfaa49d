use std::collections::BTreeMap;

use themelion_content::LoadDiagnostics;
use themelion_model::{ContentCatalog, IntegrityIssue, IssueSeverity};

use crate::codes;
use crate::index::SlugIndex;

pub(crate) fn duplicates(
    catalog: &ContentCatalog,
    diagnostics: &LoadDiagnostics,
    issues: &mut Vec<IntegrityIssue>,
) {
    for duplicate in &diagnostics.duplicate_topics {
        issues.push(
            IntegrityIssue::new(
                codes::TOPIC_DUPLICATE_SLUG,
                IssueSeverity::Warning,
                &duplicate.slug,
                format!(
                    "slug '{}' is declared by several documents; '{}' replaced '{}'",
                    duplicate.slug, duplicate.kept, duplicate.replaced
                ),
            )
            .with_source(&duplicate.replaced),
        );
    }

    let mut room_counts: BTreeMap<&str, usize> = BTreeMap::new();
    for room in &catalog.rooms {
        *room_counts.entry(room.slug.as_str()).or_insert(0) += 1;
    }
    for (slug, count) in room_counts {
        if count > 1 {
            issues.push(IntegrityIssue::new(
                codes::ROOM_DUPLICATE_SLUG,
                IssueSeverity::Warning,
                slug,
                format!("room slug '{slug}' is registered {count} times"),
            ));
        }
    }
}

/// Registry summaries: planned topics and their prerequisites.
pub(crate) fn summaries(
    catalog: &ContentCatalog,
    index: &SlugIndex<'_>,
    issues: &mut Vec<IntegrityIssue>,
) {
    for room in &catalog.rooms {
        for category in &room.categories {
            let source = format!("{}/{}", room.slug, category.slug);
            for summary in &category.topics {
                if !index.topics.contains(summary.slug.as_str()) {
                    issues.push(
                        IntegrityIssue::new(
                            codes::TOPIC_PLANNED,
                            IssueSeverity::Info,
                            &summary.slug,
                            format!("'{}' is registered but has no content yet", summary.title),
                        )
                        .with_source(&source),
                    );
                }
                for prerequisite in &summary.prerequisites {
                    if !index.is_known_topic(prerequisite) {
                        issues.push(
                            IntegrityIssue::new(
                                codes::PREREQUISITE_UNKNOWN,
                                IssueSeverity::Warning,
                                &summary.slug,
                                format!("prerequisite '{prerequisite}' matches no topic"),
                            )
                            .with_source(&source),
                        );
                    }
                }
            }
        }
    }
}

pub(crate) fn examples(diagnostics: &LoadDiagnostics, issues: &mut Vec<IntegrityIssue>) {
    for fallback in &diagnostics.example_fallbacks {
        issues.push(
            IntegrityIssue::new(
                codes::EXAMPLE_UNKNOWN_LANGUAGE,
                IssueSeverity::Info,
                &fallback.topic,
                format!(
                    "no language for extension '{}', labelled by the raw extension",
                    fallback.extension
                ),
            )
            .with_source(&fallback.file_path),
        );
    }
}
