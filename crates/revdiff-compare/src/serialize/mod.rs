mod html;
mod json;
mod markdown;

pub use html::HtmlSerializer;
pub use json::JsonSerializer;
pub use markdown::MarkdownSerializer;

use crate::{ComparisonResult, MetricDelta, ReportFormat, Result};

pub trait ReportSerializer {
    /// # Errors
    ///
    /// Returns [`crate::CompareError::Serialization`] if encoding fails.
    fn serialize(&self, result: &ComparisonResult) -> Result<String>;
}

/// Encodes `result` with the serializer for `format`.
///
/// # Errors
///
/// Returns [`crate::CompareError::Serialization`] if encoding fails.
pub fn serialize(result: &ComparisonResult, format: ReportFormat) -> Result<String> {
    let serializer: &dyn ReportSerializer = match format {
        ReportFormat::Json => &JsonSerializer,
        ReportFormat::Markdown => &MarkdownSerializer,
        ReportFormat::Html => &HtmlSerializer,
    };
    serializer.serialize(result)
}

// Rows shared by the text serializers so both show the same figures.

fn summary_rows(result: &ComparisonResult) -> Vec<(&'static str, String)> {
    let summary = &result.change_report.summary;
    let comparison = &result.version_comparison;
    vec![
        ("Files added", result.files_added.len().to_string()),
        ("Files modified", result.files_modified.len().to_string()),
        ("Files deleted", result.files_deleted.len().to_string()),
        ("Lines added", result.diff_summary.lines_added.to_string()),
        ("Lines removed", result.diff_summary.lines_removed.to_string()),
        ("API changes", result.api_changes.len().to_string()),
        ("Breaking changes", result.breaking_changes.to_string()),
        ("New features", result.new_features.to_string()),
        ("Bug fixes", result.bug_fixes.to_string()),
        ("Risk level", summary.risk_level.to_string()),
        (
            "Impact score",
            result.change_report.impact.impact_score.to_string(),
        ),
        (
            "Version comparison",
            format!("{} ({})", comparison.result, comparison.explanation),
        ),
    ]
}

fn file_sections(result: &ComparisonResult) -> [(&'static str, &[String]); 3] {
    [
        ("Files Added", result.files_added.as_slice()),
        ("Files Modified", result.files_modified.as_slice()),
        ("Files Deleted", result.files_deleted.as_slice()),
    ]
}

fn metric_rows(result: &ComparisonResult) -> [(&'static str, MetricDelta); 5] {
    let metrics = &result.metrics;
    [
        ("Cyclomatic complexity", metrics.cyclomatic),
        ("Cognitive complexity", metrics.cognitive),
        ("Maintainability", metrics.maintainability),
        ("Quality score", metrics.quality_score),
        ("Quality issues", metrics.issue_count),
    ]
}

fn yes_no(flag: bool) -> &'static str {
    if flag { "yes" } else { "no" }
}
