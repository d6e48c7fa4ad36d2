use revdiff_core::{ChangeCategory, ChangeType, RiskLevel, Severity};
use serde::{Deserialize, Serialize};

use crate::{BreakingChangeInfo, BreakingKind, ChangeImpact, ChangeInfo};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangeSummary {
    pub total_changes: usize,
    pub breaking_changes: usize,
    pub new_features: usize,
    pub bug_fixes: usize,
    pub risk_level: RiskLevel,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportRecommendations {
    pub migration_guide: Vec<String>,
    pub testing_strategy: Vec<String>,
    pub documentation_updates: Vec<String>,
}

/// Everything known about one snapshot pair: file delta, API breaks, impact
/// and the advice derived from them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangeReport {
    pub changes: ChangeInfo,
    pub breaking_changes: Vec<BreakingChangeInfo>,
    pub impact: ChangeImpact,
    pub summary: ChangeSummary,
    pub recommendations: ReportRecommendations,
}

impl ChangeReport {
    pub(crate) fn compose(
        changes: ChangeInfo,
        breaking_changes: Vec<BreakingChangeInfo>,
        impact: ChangeImpact,
    ) -> Self {
        let summary = ChangeSummary {
            total_changes: changes.change_count,
            breaking_changes: breaking_changes.len(),
            new_features: changes.count_of(ChangeType::Added),
            bug_fixes: changes.count_of(ChangeType::Modified),
            risk_level: impact.risk_level,
        };
        let recommendations = ReportRecommendations {
            migration_guide: migration_guide(&breaking_changes),
            testing_strategy: testing_strategy(&changes, &impact),
            documentation_updates: documentation_updates(&changes, &breaking_changes),
        };

        Self {
            changes,
            breaking_changes,
            impact,
            summary,
            recommendations,
        }
    }

    #[must_use]
    pub fn has_breaking_changes(&self) -> bool {
        !self.breaking_changes.is_empty() || self.changes.has_category(ChangeCategory::Breaking)
    }
}

/// API breaks of at least `High` severity make the change set breaking even
/// when no file was deleted.
pub(crate) fn escalate(mut changes: ChangeInfo, breaking: &[BreakingChangeInfo]) -> ChangeInfo {
    let api_break = breaking.iter().any(|b| b.severity >= Severity::High);
    if api_break && !changes.has_category(ChangeCategory::Breaking) {
        changes.categories.push(ChangeCategory::Breaking);
    }
    changes
}

fn migration_guide(breaking: &[BreakingChangeInfo]) -> Vec<String> {
    breaking
        .iter()
        .map(|b| {
            let advice = b.migration_hint.as_deref().unwrap_or(&b.description);
            format!("{}: {advice}", b.symbol_name)
        })
        .collect()
}

fn testing_strategy(changes: &ChangeInfo, impact: &ChangeImpact) -> Vec<String> {
    let mut out = Vec::new();

    if changes.has_category(ChangeCategory::Breaking) {
        out.push("Run integration tests against every consumer of the changed API".to_string());
    }
    if impact.risk_level >= RiskLevel::High {
        out.push("Run the full regression suite".to_string());
    }
    let added = changes.paths_with(ChangeType::Added);
    if !added.is_empty() {
        out.push(format!("Add tests for new files: {}", added.join(", ")));
    }
    let modified = changes.paths_with(ChangeType::Modified);
    if !modified.is_empty() {
        out.push(format!("Add regression tests for: {}", modified.join(", ")));
    }
    if !impact.affected_files.is_empty() {
        let affected: Vec<&str> = impact.affected_files.iter().map(String::as_str).collect();
        out.push(format!("Re-run tests covering dependents: {}", affected.join(", ")));
    }
    if out.is_empty() && !changes.is_empty() {
        out.push("Run the standard unit test suite".to_string());
    }

    out
}

fn documentation_updates(changes: &ChangeInfo, breaking: &[BreakingChangeInfo]) -> Vec<String> {
    let mut out = Vec::new();

    for b in breaking {
        let line = match b.kind {
            BreakingKind::Deprecated => {
                format!("Mark '{}' as deprecated in the API reference", b.symbol_name)
            }
            BreakingKind::RemovedExport => {
                format!("Remove '{}' from the API reference", b.symbol_name)
            }
            BreakingKind::ChangedSignature
            | BreakingKind::ChangedReturnType
            | BreakingKind::ChangedParameter => {
                format!("Update the API reference for '{}' in {}", b.symbol_name, b.file)
            }
        };
        out.push(line);
    }
    if changes.has_category(ChangeCategory::Breaking) {
        out.push("Add upgrade notes to the changelog".to_string());
    }
    let added = changes.paths_with(ChangeType::Added);
    if !added.is_empty() {
        out.push(format!("Document new files: {}", added.join(", ")));
    }

    out
}
