//! Content model shared by the Themelion crates.
//!
//! Every record here serializes to the exact JSON shape the client reads
//! from the generated `virtual:content` module, so field names follow the
//! client's camelCase vocabulary rather than Rust's.

pub mod catalog;
pub mod enums;
pub mod integrity;
pub mod language;
pub mod registry;
pub mod roadmap;
pub mod topic;

pub use catalog::ContentCatalog;
pub use enums::{Difficulty, TopicStatus};
pub use integrity::{IntegrityIssue, IntegrityReport, IssueSeverity};
pub use language::Language;
pub use registry::{Category, Room, TopicSummary};
pub use roadmap::{Roadmap, Stage};
pub use topic::{RelatedTool, Topic, TopicExample};
