use themelion_model::{ContentCatalog, IntegrityIssue, IssueSeverity, Topic};

use crate::codes;
use crate::index::SlugIndex;

/// Content topics: front matter completeness and outgoing references.
pub(crate) fn topics(
    catalog: &ContentCatalog,
    index: &SlugIndex<'_>,
    issues: &mut Vec<IntegrityIssue>,
) {
    for topic in &catalog.topics {
        missing_fields(topic, issues);
        placement(topic, index, issues);

        if !index.summaries.contains(topic.slug.as_str()) {
            issues.push(
                IntegrityIssue::new(
                    codes::TOPIC_UNREGISTERED,
                    IssueSeverity::Info,
                    &topic.slug,
                    "content exists but no room lists it; reachable only by direct link",
                )
                .with_source(&topic.content_path),
            );
        }

        for prerequisite in &topic.prerequisites {
            if !index.is_known_topic(prerequisite) {
                issues.push(
                    IntegrityIssue::new(
                        codes::PREREQUISITE_UNKNOWN,
                        IssueSeverity::Warning,
                        &topic.slug,
                        format!("prerequisite '{prerequisite}' matches no topic"),
                    )
                    .with_source(&topic.content_path),
                );
            }
        }
    }
}

pub(crate) fn roadmaps(
    catalog: &ContentCatalog,
    index: &SlugIndex<'_>,
    issues: &mut Vec<IntegrityIssue>,
) {
    for roadmap in &catalog.roadmaps {
        for stage in &roadmap.stages {
            for slug in &stage.topics {
                if !index.is_known_topic(slug) {
                    issues.push(
                        IntegrityIssue::new(
                            codes::ROADMAP_UNKNOWN_TOPIC,
                            IssueSeverity::Warning,
                            slug,
                            format!(
                                "roadmap '{}' stage '{}' references an unknown topic",
                                roadmap.slug, stage.slug
                            ),
                        )
                        .with_source(format!("{}/{}", roadmap.slug, stage.slug)),
                    );
                }
            }
        }
    }
}

fn missing_fields(topic: &Topic, issues: &mut Vec<IntegrityIssue>) {
    let missing: Vec<&str> = [
        ("title", &topic.title),
        ("room", &topic.room),
        ("category", &topic.category),
    ]
    .into_iter()
    .filter(|(_, value)| value.trim().is_empty())
    .map(|(field, _)| field)
    .collect();
    if missing.is_empty() {
        return;
    }
    issues.push(
        IntegrityIssue::new(
            codes::TOPIC_MISSING_FIELD,
            IssueSeverity::Warning,
            &topic.slug,
            format!("front matter is missing: {}", missing.join(", ")),
        )
        .with_source(&topic.content_path),
    );
}

/// `Topic.room` must name a room, and `Topic.category` a category of that room.
fn placement(topic: &Topic, index: &SlugIndex<'_>, issues: &mut Vec<IntegrityIssue>) {
    if topic.room.is_empty() {
        return;
    }
    let Some(room) = index.rooms.get(topic.room.as_str()) else {
        issues.push(
            IntegrityIssue::new(
                codes::TOPIC_UNKNOWN_ROOM,
                IssueSeverity::Warning,
                &topic.slug,
                format!("room '{}' is not registered", topic.room),
            )
            .with_source(&topic.content_path),
        );
        return;
    };
    if !topic.category.is_empty() && room.category(&topic.category).is_none() {
        issues.push(
            IntegrityIssue::new(
                codes::TOPIC_UNKNOWN_CATEGORY,
                IssueSeverity::Warning,
                &topic.slug,
                format!(
                    "category '{}' is not part of room '{}'",
                    topic.category, topic.room
                ),
            )
            .with_source(&topic.content_path),
        );
    }
}
