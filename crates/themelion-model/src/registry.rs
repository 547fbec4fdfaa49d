//! Room/category registry records.

use serde::{Deserialize, Serialize};

use crate::enums::{Difficulty, TopicStatus};

/// Lightweight topic entry listed inside a category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopicSummary {
    pub slug: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub difficulty: Option<Difficulty>,
    #[serde(default)]
    pub order: i64,
    #[serde(default)]
    pub status: TopicStatus,
    #[serde(default)]
    pub prerequisites: Vec<String>,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl TopicSummary {
    /// Returns a copy of this summary with `status` replaced.
    #[must_use]
    pub fn with_status(mut self, status: TopicStatus) -> Self {
        self.status = status;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub slug: String,
    pub name: String,
    #[serde(default)]
    pub order: i64,
    #[serde(default)]
    pub topics: Vec<TopicSummary>,
}

impl Category {
    /// Topics ordered by their `order` field; storage order is not guaranteed.
    pub fn sorted_topics(&self) -> Vec<&TopicSummary> {
        let mut topics: Vec<&TopicSummary> = self.topics.iter().collect();
        topics.sort_by_key(|topic| topic.order);
        topics
    }
}

/// Top-level grouping of categories.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Room {
    pub slug: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub icon: String,
    #[serde(default)]
    pub order: i64,
    #[serde(default)]
    pub categories: Vec<Category>,
}

impl Room {
    pub fn sorted_categories(&self) -> Vec<&Category> {
        let mut categories: Vec<&Category> = self.categories.iter().collect();
        categories.sort_by_key(|category| category.order);
        categories
    }

    pub fn category(&self, slug: &str) -> Option<&Category> {
        self.categories.iter().find(|category| category.slug == slug)
    }

    /// Iterates every topic summary of every category, in storage order.
    pub fn topic_summaries(&self) -> impl Iterator<Item = &TopicSummary> {
        self.categories
            .iter()
            .flat_map(|category| category.topics.iter())
    }
}
