use indexmap::IndexSet;
use revdiff_core::{ChangeType, ProjectSnapshot};
use revdiff_detect::ChangeDetector;
use revdiff_diff::{ContentProvider, DiffOptions, DiffRenderer, NoContent};
use revdiff_version::{ComparisonOutcome, Strategy, VersionComparison, VersioningStrategy};

use crate::api::api_changes;
use crate::serialize::serialize;
use crate::{
    CompareError, ComparisonResult, MetricDeltas, RenderedReport, ReportFormat, ReportMetadata,
    Result,
};

/// Runs change detection, diffing and version comparison over one snapshot
/// pair and folds the outcome into a [`ComparisonResult`].
pub struct ComparisonAggregator<'p> {
    strategy: VersioningStrategy,
    provider: &'p dyn ContentProvider,
    diff_options: DiffOptions,
}

impl Default for ComparisonAggregator<'_> {
    fn default() -> Self {
        Self::new()
    }
}

impl ComparisonAggregator<'_> {
    /// Semantic versioning, default diff options, and no file bodies.
    #[must_use]
    pub fn new() -> Self {
        Self {
            strategy: VersioningStrategy::default(),
            provider: &NoContent,
            diff_options: DiffOptions::default(),
        }
    }
}

impl<'p> ComparisonAggregator<'p> {
    #[must_use]
    pub fn with_strategy(mut self, strategy: VersioningStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    #[must_use]
    pub fn with_provider<'q>(self, provider: &'q dyn ContentProvider) -> ComparisonAggregator<'q> {
        ComparisonAggregator {
            strategy: self.strategy,
            provider,
            diff_options: self.diff_options,
        }
    }

    #[must_use]
    pub fn with_diff_options(mut self, diff_options: DiffOptions) -> Self {
        self.diff_options = diff_options;
        self
    }

    #[must_use]
    pub fn strategy(&self) -> &VersioningStrategy {
        &self.strategy
    }

    /// Compares the old snapshot `a` with the new snapshot `b`.
    ///
    /// # Errors
    ///
    /// Returns [`CompareError::InvalidVersions`] if either snapshot breaks
    /// its structural invariants.
    pub fn compare_versions(
        &self,
        a: &ProjectSnapshot,
        b: &ProjectSnapshot,
    ) -> Result<ComparisonResult> {
        a.validate()
            .map_err(|source| CompareError::InvalidVersions { side: "old", source })?;
        b.validate()
            .map_err(|source| CompareError::InvalidVersions { side: "new", source })?;

        let change_report = ChangeDetector::generate_change_report(a, b);
        let diff = DiffRenderer::new(self.provider).generate_diff(a, b, &self.diff_options);
        let api_changes = api_changes(a, b);

        let breaking_changes = api_changes.iter().filter(|c| c.breaking).count();
        let new_features = api_changes
            .iter()
            .filter(|c| c.change_type == ChangeType::Added)
            .count();
        let bug_fixes = api_changes
            .iter()
            .filter(|c| c.change_type == ChangeType::Modified && !c.breaking)
            .count();

        let paths = |change| -> Vec<String> {
            change_report
                .changes
                .paths_with(change)
                .into_iter()
                .map(str::to_string)
                .collect()
        };

        let mut result = ComparisonResult {
            project: b.name.clone(),
            version_a: a.version_label.clone(),
            version_b: b.version_label.clone(),
            generated_at: diff.metadata.generated_at,
            files_added: paths(ChangeType::Added),
            files_modified: paths(ChangeType::Modified),
            files_deleted: paths(ChangeType::Deleted),
            api_changes,
            metrics: MetricDeltas::between(a, b),
            breaking_changes,
            new_features,
            bug_fixes,
            change_report,
            diff_summary: diff.summary,
            version_comparison: self.compare_labels(a, b),
            recommendations: Vec::new(),
        };
        result.recommendations =
            recommend(&result, self.strategy.strategy_name(), self.is_semantic());

        tracing::debug!(
            project = %result.project,
            from = %result.version_a,
            to = %result.version_b,
            api_changes = result.api_changes.len(),
            breaking = result.breaking_changes,
            risk = %result.change_report.summary.risk_level,
            "compared snapshots"
        );

        Ok(result)
    }

    /// Compares `a` with `b` and encodes the result as `format`.
    ///
    /// # Errors
    ///
    /// Returns the errors of [`ComparisonAggregator::compare_versions`], or
    /// [`CompareError::Serialization`] if JSON encoding fails.
    pub fn generate_diff_report(
        &self,
        a: &ProjectSnapshot,
        b: &ProjectSnapshot,
        format: ReportFormat,
    ) -> Result<RenderedReport> {
        let result = self.compare_versions(a, b)?;
        let content = serialize(&result, format)?;

        Ok(RenderedReport {
            format,
            content,
            metadata: ReportMetadata::from(&result),
        })
    }

    /// `Greater` means `b` carries the newer label.
    fn compare_labels(&self, a: &ProjectSnapshot, b: &ProjectSnapshot) -> VersionComparison {
        match self
            .strategy
            .compare_versions(&b.version_label, &a.version_label)
        {
            Ok(comparison) => comparison,
            Err(err) => {
                tracing::debug!(
                    strategy = self.strategy.strategy_name(),
                    error = %err,
                    "version labels are not comparable"
                );
                VersionComparison::incompatible(format!(
                    "cannot compare '{}' with '{}': {err}",
                    b.version_label, a.version_label
                ))
            }
        }
    }

    fn is_semantic(&self) -> bool {
        matches!(self.strategy, VersioningStrategy::Semantic(_))
    }
}

fn plural(count: usize) -> &'static str {
    if count == 1 { "" } else { "s" }
}

fn recommend(result: &ComparisonResult, strategy: &str, semantic: bool) -> Vec<String> {
    let mut out: IndexSet<String> = IndexSet::new();

    if result.breaking_changes > 0 {
        out.insert(format!(
            "Release as a major version: {} breaking API change{}",
            result.breaking_changes,
            plural(result.breaking_changes)
        ));
    } else if result.new_features > 0 {
        out.insert(format!(
            "Release as a minor version: {} new export{}",
            result.new_features,
            plural(result.new_features)
        ));
    } else if result.has_changes() {
        out.insert("Release as a patch version".to_string());
    }

    let comparison = &result.version_comparison;
    match comparison.result {
        ComparisonOutcome::Incompatible => {
            out.insert(format!(
                "Version labels '{}' and '{}' cannot be ordered with the {strategy} strategy",
                result.version_a, result.version_b
            ));
        }
        ComparisonOutcome::Less | ComparisonOutcome::Equal if result.has_changes() => {
            out.insert(format!(
                "Version label '{}' does not advance past '{}'",
                result.version_b, result.version_a
            ));
        }
        ComparisonOutcome::Greater
            if semantic && result.breaking_changes > 0 && !comparison.breaking_changes =>
        {
            out.insert(format!(
                "Version '{}' does not signal the breaking changes; bump the major version",
                result.version_b
            ));
        }
        _ => {}
    }

    let metrics = &result.metrics;
    if metrics.cyclomatic.increased() {
        out.insert(format!(
            "Cyclomatic complexity rose by {:.2}; review the most complex changes",
            metrics.cyclomatic.difference
        ));
    }
    if metrics.cognitive.increased() {
        out.insert(format!(
            "Cognitive complexity rose by {:.2}",
            metrics.cognitive.difference
        ));
    }
    if metrics.maintainability.decreased() {
        out.insert(format!(
            "Maintainability dropped by {:.2}",
            -metrics.maintainability.difference
        ));
    }
    if metrics.quality_score.decreased() {
        out.insert(format!(
            "Quality score fell from {:.2} to {:.2}",
            metrics.quality_score.old, metrics.quality_score.new
        ));
    }
    if metrics.issue_count.increased() {
        out.insert(format!(
            "Resolve the {:.0} new quality issue(s)",
            metrics.issue_count.difference
        ));
    }

    out.extend(result.change_report.impact.recommendations.iter().cloned());
    out.into_iter().collect()
}
