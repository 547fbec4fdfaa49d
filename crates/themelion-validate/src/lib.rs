//! Referential-integrity validation.
//!
//! Loading never checks that slugs resolve: a room may list a topic with no
//! content, a roadmap may point at a slug that exists nowhere, a topic may
//! name a room that was never registered. This crate walks every such
//! reference after aggregation and reports each one as an
//! [`IntegrityIssue`](themelion_model::IntegrityIssue). It never modifies the
//! catalog and never fails by itself; callers decide what an issue means for
//! their exit code.

mod checks;
pub mod codes;
mod index;

use themelion_content::Aggregation;
use themelion_model::IntegrityReport;
use tracing::debug;

use crate::index::SlugIndex;

/// Run every integrity check over one aggregation result.
///
/// Issues are ordered by severity, then code, then subject.
pub fn validate_catalog(aggregation: &Aggregation) -> IntegrityReport {
    let catalog = &aggregation.catalog;
    let index = SlugIndex::build(catalog);

    let mut issues = Vec::new();
    checks::duplicates(catalog, &aggregation.diagnostics, &mut issues);
    checks::topics(catalog, &index, &mut issues);
    checks::summaries(catalog, &index, &mut issues);
    checks::roadmaps(catalog, &index, &mut issues);
    checks::examples(&aggregation.diagnostics, &mut issues);

    issues.sort_by(|a, b| {
        a.severity
            .cmp(&b.severity)
            .then_with(|| a.code.cmp(&b.code))
            .then_with(|| a.subject.cmp(&b.subject))
            .then_with(|| a.source.cmp(&b.source))
    });

    let report = IntegrityReport { issues };
    debug!(
        error_count = report.error_count(),
        warning_count = report.warning_count(),
        info_count = report.info_count(),
        "integrity check complete"
    );
    report
}
