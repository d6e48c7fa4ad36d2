use std::collections::BTreeSet;

use indexmap::IndexSet;
use revdiff_core::{ChangeCategory, ProjectSnapshot, RiskLevel};
use serde::{Deserialize, Serialize};

use crate::ChangeInfo;

const MAX_SCORE: usize = 100;

/// How far a change set reaches through the import graph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangeImpact {
    pub affected_files: BTreeSet<String>,
    pub dependency_chains: Vec<Vec<String>>,
    pub risk_level: RiskLevel,
    pub categories: Vec<ChangeCategory>,
    pub impact_score: u8,
    pub recommendations: Vec<String>,
}

impl ChangeImpact {
    pub(crate) fn analyze(changes: &ChangeInfo, snapshot: &ProjectSnapshot) -> Self {
        let mut affected_files = BTreeSet::new();
        let mut dependency_chains = Vec::new();

        for path in &changes.files_changed {
            let neighbours: IndexSet<&str> = snapshot
                .importers_of(path)
                .chain(snapshot.imports_of(path))
                .filter(|neighbour| *neighbour != path.as_str())
                .collect();
            if neighbours.is_empty() {
                continue;
            }

            affected_files.extend(neighbours.iter().map(|n| (*n).to_string()));
            let mut chain = Vec::with_capacity(neighbours.len() + 1);
            chain.push(path.clone());
            chain.extend(neighbours.into_iter().map(str::to_string));
            dependency_chains.push(chain);
        }

        let risk_level = assess_risk(
            &changes.categories,
            changes.change_count,
            affected_files.len(),
        );
        let impact_score = impact_score(
            changes.change_count,
            affected_files.len(),
            dependency_chains.len(),
        );
        let recommendations = recommend(risk_level, &changes.categories, affected_files.len());

        tracing::debug!(
            changed = changes.change_count,
            affected = affected_files.len(),
            chains = dependency_chains.len(),
            risk = %risk_level,
            score = impact_score,
            "analyzed change impact"
        );

        Self {
            affected_files,
            dependency_chains,
            risk_level,
            categories: changes.categories.clone(),
            impact_score,
            recommendations,
        }
    }
}

/// Risk of releasing a change set.
///
/// Any breaking category or more than ten affected files is `Critical`; more
/// than five affected files is `High`; more than five changes or more than two
/// affected files is `Medium`.
#[must_use]
pub fn assess_risk(
    categories: &[ChangeCategory],
    change_count: usize,
    affected: usize,
) -> RiskLevel {
    let breaking = categories.contains(&ChangeCategory::Breaking);
    if breaking || affected > 10 {
        RiskLevel::Critical
    } else if affected > 5 {
        RiskLevel::High
    } else if change_count > 5 || affected > 2 {
        RiskLevel::Medium
    } else {
        RiskLevel::Low
    }
}

/// `changes * 10 + affected * 5 + chains * 15`, capped at 100.
#[must_use]
pub fn impact_score(change_count: usize, affected: usize, chains: usize) -> u8 {
    let raw = change_count
        .saturating_mul(10)
        .saturating_add(affected.saturating_mul(5))
        .saturating_add(chains.saturating_mul(15));
    u8::try_from(raw.min(MAX_SCORE)).unwrap_or(u8::MAX)
}

fn recommend(risk: RiskLevel, categories: &[ChangeCategory], affected: usize) -> Vec<String> {
    let mut out = Vec::new();

    if risk >= RiskLevel::High {
        out.push("Run the full regression test suite before release".to_string());
    }
    if risk == RiskLevel::Critical {
        out.push("Roll out in stages and prepare a rollback plan".to_string());
    }
    if categories.contains(&ChangeCategory::Breaking) {
        out.push("Create a migration guide for downstream consumers".to_string());
        out.push("Release as a new major version".to_string());
    }
    if categories.contains(&ChangeCategory::Feature) {
        out.push("Document the new functionality".to_string());
    }
    if affected > 0 {
        out.push(format!(
            "Review the {affected} dependent file{} for side effects",
            if affected == 1 { "" } else { "s" }
        ));
    }
    if out.is_empty() && !categories.is_empty() {
        out.push("Standard code review is sufficient".to_string());
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use revdiff_core::ChangeType;

    fn changes(entries: &[(&str, ChangeType)]) -> ChangeInfo {
        let mut categories = Vec::new();
        for (_, change) in entries {
            let category = ChangeCategory::for_change(*change);
            if !categories.contains(&category) {
                categories.push(category);
            }
        }
        ChangeInfo {
            files_changed: entries.iter().map(|(p, _)| (*p).to_string()).collect(),
            change_types: entries.iter().map(|(_, c)| *c).collect(),
            change_count: entries.len(),
            change_hash: String::new(),
            categories,
        }
    }

    #[test]
    fn follows_imports_one_hop_in_both_directions() {
        let snapshot = ProjectSnapshot::new("app", "2")
            .with_import("main.x", "lib.x")
            .with_import("lib.x", "util.x")
            .with_import("util.x", "deep.x");

        let impact = ChangeImpact::analyze(&changes(&[("lib.x", ChangeType::Modified)]), &snapshot);

        assert_eq!(
            impact.affected_files.iter().map(String::as_str).collect::<Vec<_>>(),
            vec!["main.x", "util.x"]
        );
        assert_eq!(impact.dependency_chains, vec![vec!["lib.x", "main.x", "util.x"]]);
    }

    #[test]
    fn isolated_changes_record_no_chain() {
        let snapshot = ProjectSnapshot::new("app", "2");

        let impact =
            ChangeImpact::analyze(&changes(&[("lone.x", ChangeType::Modified)]), &snapshot);

        assert!(impact.dependency_chains.is_empty());
        assert!(impact.affected_files.is_empty());
        assert_eq!(impact.risk_level, RiskLevel::Low);
        assert_eq!(impact.impact_score, 10);
        assert_eq!(impact.recommendations, vec!["Standard code review is sufficient"]);
    }

    #[test]
    fn risk_thresholds() {
        let bugfix = [ChangeCategory::Bugfix];
        assert_eq!(assess_risk(&bugfix, 1, 0), RiskLevel::Low);
        assert_eq!(assess_risk(&bugfix, 6, 0), RiskLevel::Medium);
        assert_eq!(assess_risk(&bugfix, 1, 3), RiskLevel::Medium);
        assert_eq!(assess_risk(&bugfix, 1, 6), RiskLevel::High);
        assert_eq!(assess_risk(&bugfix, 1, 11), RiskLevel::Critical);
        assert_eq!(
            assess_risk(&[ChangeCategory::Breaking], 1, 0),
            RiskLevel::Critical
        );
    }

    #[test]
    fn score_is_capped() {
        assert_eq!(impact_score(2, 3, 1), 50);
        assert_eq!(impact_score(20, 0, 0), 100);
        assert_eq!(impact_score(usize::MAX, usize::MAX, usize::MAX), 100);
    }

    #[test]
    fn breaking_changes_get_migration_recommendations() {
        let snapshot = ProjectSnapshot::new("app", "2").with_import("main.x", "gone.x");

        let impact = ChangeImpact::analyze(&changes(&[("gone.x", ChangeType::Deleted)]), &snapshot);

        assert_eq!(impact.risk_level, RiskLevel::Critical);
        assert!(
            impact
                .recommendations
                .iter()
                .any(|r| r.contains("migration guide"))
        );
        assert!(
            impact
                .recommendations
                .iter()
                .any(|r| r.contains("regression"))
        );
    }

    #[test]
    fn adding_breaking_changes_never_lowers_risk() {
        for change_count in 0..15 {
            for affected in 0..15 {
                let base = assess_risk(&[ChangeCategory::Bugfix], change_count, affected);
                let with_breaking = assess_risk(
                    &[ChangeCategory::Bugfix, ChangeCategory::Breaking],
                    change_count + 1,
                    affected,
                );
                assert!(with_breaking >= base);
            }
        }
    }
}
