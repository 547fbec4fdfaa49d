//! Registry/content reconciliation.

use std::borrow::Borrow;
use std::collections::BTreeSet;

use themelion_model::{Category, Room, TopicStatus};

/// Recomputes every summary status from the implemented slug set.
///
/// Consumes the room tree and returns a new one: a summary is implemented
/// exactly when its slug is in `implemented`, planned otherwise. No other
/// field changes, and nothing about the previous status is carried over.
pub fn reconcile<S>(rooms: Vec<Room>, implemented: &BTreeSet<S>) -> Vec<Room>
where
    S: Borrow<str> + Ord,
{
    rooms
        .into_iter()
        .map(|room| Room {
            categories: room
                .categories
                .into_iter()
                .map(|category| reconcile_category(category, implemented))
                .collect(),
            ..room
        })
        .collect()
}

fn reconcile_category<S>(category: Category, implemented: &BTreeSet<S>) -> Category
where
    S: Borrow<str> + Ord,
{
    Category {
        topics: category
            .topics
            .into_iter()
            .map(|topic| {
                let status = if implemented.contains(topic.slug.as_str()) {
                    TopicStatus::Implemented
                } else {
                    TopicStatus::Planned
                };
                topic.with_status(status)
            })
            .collect(),
        ..category
    }
}
