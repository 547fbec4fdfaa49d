//! Topic content loading.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use themelion_model::{Topic, TopicExample, TopicStatus};
use tracing::{debug, warn};

use crate::discovery::{find_documents, list_files, relative_path};
use crate::error::{ContentError, Result};
use crate::frontmatter::parse_document;
use crate::languages::LanguageRegistry;

/// File name of the content document inside each topic directory.
pub const TOPIC_DOCUMENT: &str = "topic.mdx";

/// Directory next to the content document holding per-language examples.
pub const EXAMPLES_DIR: &str = "examples";

/// Two content documents declared the same slug.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DuplicateTopic {
    pub slug: String,
    /// Document that was replaced.
    pub replaced: String,
    /// Document whose content is kept (the later one in path order).
    pub kept: String,
}

/// An example file whose extension matched no language.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExampleFallback {
    pub topic: String,
    pub file_path: String,
    pub extension: String,
}

/// Result of loading the content tree.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TopicSet {
    /// One topic per slug, positioned where the slug was first seen.
    pub topics: Vec<Topic>,
    pub duplicates: Vec<DuplicateTopic>,
    pub fallbacks: Vec<ExampleFallback>,
}

impl TopicSet {
    /// Adds `topic` with the fallbacks found among its examples.
    ///
    /// A replaced topic takes its fallbacks with it.
    fn insert(
        &mut self,
        topic: Topic,
        fallbacks: Vec<ExampleFallback>,
        index: &mut BTreeMap<String, usize>,
    ) {
        match index.get(&topic.slug) {
            Some(&position) => {
                let replaced = std::mem::replace(&mut self.topics[position], topic);
                let kept = &self.topics[position];
                self.fallbacks.retain(|fallback| fallback.topic != kept.slug);
                warn!(
                    slug = %kept.slug,
                    replaced = %replaced.content_path,
                    kept = %kept.content_path,
                    "duplicate topic slug, later document wins"
                );
                self.duplicates.push(DuplicateTopic {
                    slug: kept.slug.clone(),
                    replaced: replaced.content_path,
                    kept: kept.content_path.clone(),
                });
            }
            None => {
                index.insert(topic.slug.clone(), self.topics.len());
                self.topics.push(topic);
            }
        }
        self.fallbacks.extend(fallbacks);
    }
}

/// Loads every `topic.mdx` under `content_dir`.
///
/// Paths recorded on topics and examples are relative to `root`.
pub fn load_topics(
    root: &Path,
    content_dir: &Path,
    languages: &LanguageRegistry,
) -> Result<TopicSet> {
    let mut set = TopicSet::default();
    let mut index = BTreeMap::new();
    for path in find_documents(content_dir, TOPIC_DOCUMENT)? {
        let (topic, fallbacks) = load_topic(root, &path, languages)?;
        debug!(
            slug = %topic.slug,
            example_count = topic.examples.len(),
            source_filename = %topic.content_path,
            "loaded topic"
        );
        set.insert(topic, fallbacks, &mut index);
    }
    Ok(set)
}

fn load_topic(
    root: &Path,
    path: &Path,
    languages: &LanguageRegistry,
) -> Result<(Topic, Vec<ExampleFallback>)> {
    let raw = read_text(path)?;
    let document = parse_document(path, &raw)?;
    let metadata = document.metadata;
    let slug = metadata
        .slug
        .filter(|slug| !slug.trim().is_empty())
        .ok_or_else(|| ContentError::MissingSlug {
            path: path.to_path_buf(),
        })?;

    let mut examples = Vec::new();
    let mut fallbacks = Vec::new();
    for example_path in list_files(&examples_dir(path))? {
        let extension = file_extension(&example_path);
        let file_path = relative_path(root, &example_path);
        if languages.resolve_extension(&extension).is_none() {
            fallbacks.push(ExampleFallback {
                topic: slug.clone(),
                file_path: file_path.clone(),
                extension: extension.clone(),
            });
        }
        let code = read_text(&example_path)?;
        examples.push(TopicExample {
            language_id: languages.language_id_for(&extension),
            file_path,
            code,
        });
    }

    let topic = Topic {
        title: metadata.title,
        slug,
        room: metadata.room,
        category: metadata.category,
        difficulty: metadata.difficulty,
        order: metadata.order,
        prerequisites: metadata.prerequisites,
        tags: metadata.tags,
        related_tools: metadata.related_tools,
        status: TopicStatus::Implemented,
        content_path: relative_path(root, path),
        content: document.body,
        examples,
    };
    Ok((topic, fallbacks))
}

/// Reads a file as text, replacing invalid UTF-8 sequences with U+FFFD.
fn read_text(path: &Path) -> Result<String> {
    let bytes = std::fs::read(path).map_err(|e| ContentError::io(path, e))?;
    match String::from_utf8(bytes) {
        Ok(text) => Ok(text),
        Err(err) => {
            warn!(path = %path.display(), "file is not valid UTF-8, decoding lossily");
            Ok(String::from_utf8_lossy(err.as_bytes()).into_owned())
        }
    }
}

/// `.../arrays/topic.mdx` → `.../arrays/examples`.
fn examples_dir(document: &Path) -> PathBuf {
    document.with_file_name(EXAMPLES_DIR)
}

/// Text after the final dot of the file name; empty when there is none.
fn file_extension(path: &Path) -> String {
    path.extension()
        .map(|ext| ext.to_string_lossy().into_owned())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn examples_dir_replaces_document_name() {
        assert_eq!(
            examples_dir(Path::new("/site/data/content/a/arrays/topic.mdx")),
            PathBuf::from("/site/data/content/a/arrays/examples")
        );
    }

    #[test]
    fn extension_is_last_dot_segment() {
        assert_eq!(file_extension(Path::new("python.py")), "py");
        assert_eq!(file_extension(Path::new("archive.tar.gz")), "gz");
        assert_eq!(file_extension(Path::new("Makefile")), "");
    }
}
