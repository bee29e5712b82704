use std::path::Path;

use tracing::info;

use crate::aggregate::{Aggregation, ScanOptions, aggregate};
use crate::classify::FileClassification;
use crate::plan::{Planner, RemediationPlan};
use crate::terms::TermSet;

/// Everything one scan produced, kept together for reporting
#[derive(Debug, Clone)]
pub struct ScanReport {
    pub aggregation: Aggregation,
    pub classification: FileClassification,
    pub plan: RemediationPlan,
}

/// Run parser, aggregator, classifier and planner over a buffered export.
///
/// `worktree` is the directory the export's paths are relative to.
pub fn scan(
    export: &str,
    terms: &TermSet,
    options: &ScanOptions,
    worktree: &Path,
    planner: &Planner,
) -> ScanReport {
    let aggregation = aggregate(export, terms, options);
    info!(
        "Scanned {} lines for {} terms: {} files, {} commits matched",
        aggregation.lines,
        terms.len(),
        aggregation.files().len(),
        aggregation.commits.len()
    );

    let classification = FileClassification::classify(&aggregation, worktree);
    let plan = planner.plan(&aggregation, &classification, terms);

    ScanReport {
        aggregation,
        classification,
        plan,
    }
}
