//! Front matter / body splitting for topic documents.

use std::path::Path;

use serde::Deserialize;
use themelion_model::{Difficulty, RelatedTool};

use crate::error::{ContentError, Result};

const DELIMITER: &str = "---";

/// Metadata block at the top of a `topic.mdx` document.
///
/// Only `slug` is mandatory; missing fields default and are reported by the
/// integrity pass rather than failing the build. Unknown keys are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TopicFrontmatter {
    pub title: String,
    pub slug: Option<String>,
    pub room: String,
    pub category: String,
    pub difficulty: Option<Difficulty>,
    pub order: i64,
    pub prerequisites: Vec<String>,
    pub tags: Vec<String>,
    pub related_tools: Option<Vec<RelatedTool>>,
}

/// A parsed content document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrontMatterDocument {
    pub metadata: TopicFrontmatter,
    /// Body with surrounding whitespace trimmed.
    pub body: String,
}

/// Outcome of looking for a front matter block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrontMatterSplit<'a> {
    /// The document does not open with a `---` line.
    Absent,
    Block { yaml: &'a str, body: &'a str },
    /// The opening `---` is never closed.
    Unterminated,
}

/// Splits `raw` into its front matter block and body.
pub fn split_front_matter(raw: &str) -> FrontMatterSplit<'_> {
    let raw = raw.strip_prefix('\u{feff}').unwrap_or(raw);
    let Some(first_end) = raw.find('\n') else {
        return if raw.trim_end() == DELIMITER {
            FrontMatterSplit::Unterminated
        } else {
            FrontMatterSplit::Absent
        };
    };
    if raw[..first_end].trim_end() != DELIMITER {
        return FrontMatterSplit::Absent;
    }

    let rest = &raw[first_end + 1..];
    let mut offset = 0;
    for line in rest.split_inclusive('\n') {
        if line.trim_end() == DELIMITER {
            return FrontMatterSplit::Block {
                yaml: &rest[..offset],
                body: &rest[offset + line.len()..],
            };
        }
        offset += line.len();
    }
    FrontMatterSplit::Unterminated
}

/// Parses a content document read from `path`.
pub fn parse_document(path: &Path, raw: &str) -> Result<FrontMatterDocument> {
    let raw = raw.strip_prefix('\u{feff}').unwrap_or(raw);
    let (metadata, body) = match split_front_matter(raw) {
        FrontMatterSplit::Block { yaml, body } => (parse_metadata(path, yaml)?, body),
        FrontMatterSplit::Absent => (TopicFrontmatter::default(), raw),
        FrontMatterSplit::Unterminated => {
            return Err(ContentError::UnterminatedFrontMatter {
                path: path.to_path_buf(),
            });
        }
    };
    Ok(FrontMatterDocument {
        metadata,
        body: body.trim().to_string(),
    })
}

fn parse_metadata(path: &Path, yaml: &str) -> Result<TopicFrontmatter> {
    if yaml.trim().is_empty() {
        return Ok(TopicFrontmatter::default());
    }
    serde_yaml::from_str(yaml).map_err(|e| ContentError::yaml(path, e))
}
