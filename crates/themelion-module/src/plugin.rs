//! Cached module generation with whole-module invalidation.

use std::path::Path;
use std::time::Instant;

use themelion_content::{Aggregation, ContentSources, aggregate};
use tracing::{debug, info};

use crate::error::Result;
use crate::fingerprint::sha256_hex;
use crate::render::{RESOLVED_VIRTUAL_MODULE_ID, render_json, render_module, resolve_id};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ModuleFormat {
    /// ES module with named exports and lookup helpers.
    #[default]
    EsModule,
    /// Plain JSON payload.
    Json,
}

/// One generated module together with the aggregation it came from.
#[derive(Debug, Clone)]
pub struct GeneratedModule {
    pub code: String,
    /// SHA-256 of `code`.
    pub fingerprint: String,
    pub aggregation: Aggregation,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeOutcome {
    /// The cached module was dropped; the client must reload fully.
    FullReload,
    /// The path is outside every source root.
    Ignored,
}

/// Serves `virtual:content` and drops the cached module on source changes.
#[derive(Debug)]
pub struct ContentPlugin {
    sources: ContentSources,
    format: ModuleFormat,
    cached: Option<GeneratedModule>,
}

impl ContentPlugin {
    pub fn new(sources: ContentSources) -> Self {
        Self {
            sources,
            format: ModuleFormat::default(),
            cached: None,
        }
    }

    #[must_use]
    pub fn with_format(mut self, format: ModuleFormat) -> Self {
        self.format = format;
        self
    }

    pub fn sources(&self) -> &ContentSources {
        &self.sources
    }

    pub fn resolve_id(&self, id: &str) -> Option<&'static str> {
        resolve_id(id)
    }

    /// Returns the module for a resolved id, aggregating on a cache miss.
    ///
    /// Any other id yields `Ok(None)`.
    pub fn load(&mut self, id: &str) -> Result<Option<&GeneratedModule>> {
        if id != RESOLVED_VIRTUAL_MODULE_ID {
            return Ok(None);
        }
        self.module().map(Some)
    }

    /// Shorthand for loading the resolved virtual module.
    pub fn module(&mut self) -> Result<&GeneratedModule> {
        let module = match self.cached.take() {
            Some(module) => module,
            None => self.generate()?,
        };
        Ok(self.cached.insert(module))
    }

    pub fn is_cached(&self) -> bool {
        self.cached.is_some()
    }

    pub fn invalidate(&mut self) {
        if self.cached.take().is_some() {
            debug!("virtual module invalidated");
        }
    }

    /// Reacts to a changed file: anything under a source root invalidates.
    pub fn handle_change(&mut self, path: &Path) -> ChangeOutcome {
        if self.sources.is_watched(path) {
            self.invalidate();
            ChangeOutcome::FullReload
        } else {
            ChangeOutcome::Ignored
        }
    }

    fn generate(&self) -> Result<GeneratedModule> {
        let start = Instant::now();
        let aggregation = aggregate(&self.sources)?;
        let code = match self.format {
            ModuleFormat::EsModule => render_module(&aggregation.catalog)?,
            ModuleFormat::Json => render_json(&aggregation.catalog)?,
        };
        let fingerprint = sha256_hex(code.as_bytes());
        info!(
            fingerprint = %fingerprint,
            bytes = code.len(),
            duration_ms = start.elapsed().as_millis(),
            "virtual module generated"
        );
        Ok(GeneratedModule {
            code,
            fingerprint,
            aggregation,
        })
    }
}
