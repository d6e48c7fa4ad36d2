use chrono::{DateTime, Utc};
use revdiff_detect::ChangeReport;
use revdiff_diff::DiffSummary;
use revdiff_version::VersionComparison;
use serde::{Deserialize, Serialize};

use crate::{ApiChange, MetricDeltas, ReportFormat};

/// Everything learned from comparing two snapshots. Serializers render this
/// value and never look at the snapshots again.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComparisonResult {
    pub project: String,
    pub version_a: String,
    pub version_b: String,
    pub generated_at: DateTime<Utc>,
    pub files_added: Vec<String>,
    pub files_modified: Vec<String>,
    pub files_deleted: Vec<String>,
    pub api_changes: Vec<ApiChange>,
    pub metrics: MetricDeltas,
    pub breaking_changes: usize,
    pub new_features: usize,
    pub bug_fixes: usize,
    pub change_report: ChangeReport,
    pub diff_summary: DiffSummary,
    pub version_comparison: VersionComparison,
    pub recommendations: Vec<String>,
}

impl ComparisonResult {
    #[must_use]
    pub fn has_changes(&self) -> bool {
        !self.files_added.is_empty()
            || !self.files_modified.is_empty()
            || !self.files_deleted.is_empty()
            || !self.api_changes.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportMetadata {
    pub project: String,
    pub version_a: String,
    pub version_b: String,
    pub generated_at: DateTime<Utc>,
}

/// A [`ComparisonResult`] encoded as text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderedReport {
    pub format: ReportFormat,
    pub content: String,
    pub metadata: ReportMetadata,
}

impl From<&ComparisonResult> for ReportMetadata {
    fn from(result: &ComparisonResult) -> Self {
        Self {
            project: result.project.clone(),
            version_a: result.version_a.clone(),
            version_b: result.version_b.clone(),
            generated_at: result.generated_at,
        }
    }
}
