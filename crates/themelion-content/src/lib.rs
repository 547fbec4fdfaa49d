//! Build-time content aggregation for Themelion.
//!
//! One aggregation pass reads four source trees and produces a
//! [`ContentCatalog`](themelion_model::ContentCatalog):
//!
//! ```text
//! <root>/
//! ├── themelion.toml              # optional, overrides the paths below
//! └── data/
//!     ├── languages/*.json        # one descriptor per language
//!     ├── registry/
//!     │   ├── rooms/*.yaml        # room → category → topic summaries
//!     │   └── roadmaps/*.yaml     # learning paths
//!     └── content/**/topic.mdx    # front matter + body, sibling examples/
//! ```
//!
//! Loaders run in dependency order (languages first, topics last), then
//! [`reconcile`] marks registry summaries whose slug has content as
//! implemented. Every pass starts from nothing; no state survives between
//! passes.

pub mod aggregate;
pub mod config;
pub mod discovery;
pub mod error;
pub mod frontmatter;
pub mod languages;
pub mod paths;
pub mod reconcile;
pub mod roadmaps;
pub mod rooms;
pub mod topics;

pub use aggregate::{Aggregation, LoadDiagnostics, aggregate};
pub use config::{OutputConfig, ProjectConfig, SourcesConfig};
pub use error::{ContentError, Result};
pub use frontmatter::{
    FrontMatterDocument, FrontMatterSplit, TopicFrontmatter, parse_document, split_front_matter,
};
pub use languages::{LanguageRegistry, load_languages};
pub use paths::{CONFIG_FILE_NAME, ContentSources, ROOT_ENV_VAR, resolve_root};
pub use reconcile::reconcile;
pub use roadmaps::load_roadmaps;
pub use rooms::load_rooms;
pub use topics::{DuplicateTopic, ExampleFallback, TOPIC_DOCUMENT, TopicSet, load_topics};
