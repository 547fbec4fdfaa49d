//! Build and check passes shared by the subcommands.

use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use themelion_content::{ContentSources, ProjectConfig, resolve_root};
use themelion_model::IntegrityReport;
use themelion_module::{ContentPlugin, GeneratedModule, ModuleFormat, write_if_changed};
use themelion_validate::validate_catalog;
use tracing::{info, info_span, warn};

use crate::types::{BuildResult, CatalogCounts, CheckResult};

/// A resolved project: canonical root, its configuration and source layout.
#[derive(Debug, Clone)]
pub struct Project {
    pub root: PathBuf,
    pub config: ProjectConfig,
    pub sources: ContentSources,
}

impl Project {
    /// Resolves the root (flag, then `THEMELION_ROOT`, then the current
    /// directory) and loads its optional `themelion.toml`.
    ///
    /// The root is canonicalized so watcher paths compare against it.
    pub fn open(explicit_root: Option<&Path>) -> Result<Self> {
        let requested = resolve_root(explicit_root);
        let root = requested
            .canonicalize()
            .with_context(|| format!("resolve project root {}", requested.display()))?;
        let config = ProjectConfig::load(&root).context("load project config")?;
        let sources = ContentSources::from_config(&root, &config);
        Ok(Self {
            root,
            config,
            sources,
        })
    }

    /// Output module path: explicit override, else the configured one.
    pub fn output_path(&self, explicit: Option<&Path>) -> PathBuf {
        match explicit {
            Some(path) if path.is_absolute() => path.to_path_buf(),
            Some(path) => self.root.join(path),
            None => self.config.module_path(&self.root),
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct BuildOptions {
    pub format: ModuleFormat,
    /// Treat integrity warnings as errors and refuse to write on errors.
    pub strict: bool,
}

pub fn build(project: &Project, output: &Path, options: BuildOptions) -> Result<BuildResult> {
    let span = info_span!("build", root = %project.root.display());
    let _guard = span.enter();
    let start = Instant::now();

    let mut plugin = ContentPlugin::new(project.sources.clone()).with_format(options.format);
    let module = plugin.module().context("generate virtual module")?;
    let report = integrity_report(module, options.strict);
    let has_errors = report.has_errors();

    let write = if has_errors && options.strict {
        warn!(
            errors = report.error_count(),
            "integrity errors found, module not written"
        );
        None
    } else {
        let outcome = write_if_changed(output, &module.code)
            .with_context(|| format!("write {}", output.display()))?;
        Some(outcome)
    };

    info!(
        output = %output.display(),
        write = ?write,
        errors = report.error_count(),
        warnings = report.warning_count(),
        duration_ms = start.elapsed().as_millis(),
        "build complete"
    );

    Ok(BuildResult {
        root: project.root.clone(),
        output: output.to_path_buf(),
        write,
        fingerprint: module.fingerprint.clone(),
        counts: CatalogCounts::of(&module.aggregation.catalog),
        report,
        has_errors,
    })
}

pub fn check(project: &Project, strict: bool) -> Result<CheckResult> {
    let span = info_span!("check", root = %project.root.display());
    let _guard = span.enter();

    let aggregation =
        themelion_content::aggregate(&project.sources).context("aggregate content")?;
    let mut report = validate_catalog(&aggregation);
    if strict {
        report = report.promote_warnings();
    }
    Ok(CheckResult {
        root: project.root.clone(),
        counts: CatalogCounts::of(&aggregation.catalog),
        report,
    })
}

/// Validates a generated module, promoting warnings under `strict`.
pub fn integrity_report(module: &GeneratedModule, strict: bool) -> IntegrityReport {
    let report = validate_catalog(&module.aggregation);
    if strict {
        report.promote_warnings()
    } else {
        report
    }
}
