use serde::{Deserialize, Serialize};

use crate::enums::{Difficulty, TopicStatus};

/// External tool suggested alongside a topic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RelatedTool {
    pub name: String,
    #[serde(default)]
    pub search_term: String,
    #[serde(default)]
    pub url: String,
}

/// One source file shown in a topic's code tabs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TopicExample {
    /// Resolved language id, or the raw file extension when no language matched.
    pub language_id: String,
    pub file_path: String,
    pub code: String,
}

/// Full topic record assembled from a content document and its examples.
///
/// `room` and `category` are plain slugs; nothing guarantees they resolve.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Topic {
    pub title: String,
    pub slug: String,
    pub room: String,
    pub category: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub difficulty: Option<Difficulty>,
    pub order: i64,
    pub prerequisites: Vec<String>,
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub related_tools: Option<Vec<RelatedTool>>,
    pub status: TopicStatus,
    pub content_path: String,
    pub content: String,
    pub examples: Vec<TopicExample>,
}

impl Topic {
    pub fn example_for(&self, language_id: &str) -> Option<&TopicExample> {
        self.examples
            .iter()
            .find(|example| example.language_id == language_id)
    }
}
