//! Stable issue codes.

pub const TOPIC_DUPLICATE_SLUG: &str = "TOPIC_DUPLICATE_SLUG";
pub const ROOM_DUPLICATE_SLUG: &str = "ROOM_DUPLICATE_SLUG";
pub const TOPIC_UNKNOWN_ROOM: &str = "TOPIC_UNKNOWN_ROOM";
pub const TOPIC_UNKNOWN_CATEGORY: &str = "TOPIC_UNKNOWN_CATEGORY";
pub const TOPIC_MISSING_FIELD: &str = "TOPIC_MISSING_FIELD";
pub const TOPIC_UNREGISTERED: &str = "TOPIC_UNREGISTERED";
pub const TOPIC_PLANNED: &str = "TOPIC_PLANNED";
pub const ROADMAP_UNKNOWN_TOPIC: &str = "ROADMAP_UNKNOWN_TOPIC";
pub const PREREQUISITE_UNKNOWN: &str = "PREREQUISITE_UNKNOWN";
pub const EXAMPLE_UNKNOWN_LANGUAGE: &str = "EXAMPLE_UNKNOWN_LANGUAGE";
