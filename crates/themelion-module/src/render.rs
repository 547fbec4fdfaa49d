//! Module body generation.

use serde::Serialize;
use themelion_model::ContentCatalog;

use crate::error::Result;

/// Id the client imports.
pub const VIRTUAL_MODULE_ID: &str = "virtual:content";

/// Internal id the bundler resolves [`VIRTUAL_MODULE_ID`] to. The NUL prefix
/// keeps other plugins from treating it as a file path.
pub const RESOLVED_VIRTUAL_MODULE_ID: &str = "\0virtual:content";

pub fn resolve_id(id: &str) -> Option<&'static str> {
    (id == VIRTUAL_MODULE_ID).then_some(RESOLVED_VIRTUAL_MODULE_ID)
}

/// Renders the ES module body for `catalog`.
///
/// Identical catalogs render to identical bytes.
pub fn render_module(catalog: &ContentCatalog) -> Result<String> {
    let rooms = serde_json::to_string(&catalog.rooms)?;
    let topics = serde_json::to_string(&catalog.topics)?;
    let languages = serde_json::to_string(&catalog.languages)?;
    let roadmaps = serde_json::to_string(&catalog.roadmaps)?;

    Ok(format!(
        r#"
const _rooms = {rooms};
const _topics = {topics};
const _languages = {languages};
const _roadmaps = {roadmaps};

export const rooms = _rooms;
export const topics = _topics;
export const languages = _languages;
export const roadmaps = _roadmaps;

export function getRoomBySlug(slug) {{
	return _rooms.find((r) => r.slug === slug) || null;
}}

export function getTopicBySlug(slug) {{
	return _topics.find((t) => t.slug === slug) || null;
}}

export function getRoadmapBySlug(slug) {{
	return _roadmaps.find((r) => r.slug === slug) || null;
}}
"#
    ))
}

#[derive(Serialize)]
struct JsonPayload<'a> {
    rooms: &'a [themelion_model::Room],
    topics: &'a [themelion_model::Topic],
    languages: &'a [themelion_model::Language],
    roadmaps: &'a [themelion_model::Roadmap],
}

/// Renders the same payload as a pretty-printed JSON document.
pub fn render_json(catalog: &ContentCatalog) -> Result<String> {
    let payload = JsonPayload {
        rooms: &catalog.rooms,
        topics: &catalog.topics,
        languages: &catalog.languages,
        roadmaps: &catalog.roadmaps,
    };
    let mut json = serde_json::to_string_pretty(&payload)?;
    json.push('\n');
    Ok(json)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_the_virtual_id_resolves() {
        assert_eq!(resolve_id("virtual:content"), Some("\0virtual:content"));
        assert_eq!(resolve_id("virtual:other"), None);
        assert_eq!(resolve_id("\0virtual:content"), None);
    }

    #[test]
    fn json_payload_keeps_collection_order() {
        let json = render_json(&ContentCatalog::default()).unwrap();
        let keys: Vec<&str> = json
            .lines()
            .filter_map(|line| line.strip_prefix("  \""))
            .filter_map(|line| line.split('"').next())
            .collect();
        assert_eq!(keys, vec!["rooms", "topics", "languages", "roadmaps"]);
    }
}
