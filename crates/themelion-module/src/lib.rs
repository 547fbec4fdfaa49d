//! The `virtual:content` module.
//!
//! [`render_module`] turns a catalog into an ES module exposing `rooms`,
//! `topics`, `languages`, `roadmaps` and three `get*BySlug` helpers.
//! [`ContentPlugin`] caches the generated module and drops it whenever a
//! file under one of the source roots changes; [`watch`] drives that from
//! filesystem events. Invalidation is always whole-module followed by a full
//! client reload.

pub mod error;
pub mod fingerprint;
pub mod output;
pub mod plugin;
pub mod render;
pub mod watch;

pub use error::{ModuleError, Result};
pub use fingerprint::sha256_hex;
pub use output::{WriteOutcome, write_if_changed};
pub use plugin::{ChangeOutcome, ContentPlugin, GeneratedModule, ModuleFormat};
pub use render::{
    RESOLVED_VIRTUAL_MODULE_ID, VIRTUAL_MODULE_ID, render_json, render_module, resolve_id,
};
pub use watch::{DEFAULT_DEBOUNCE, ReloadSink, process_events, watch};
