use revdiff_core::ProjectSnapshot;

use crate::breaking::BreakingEngine;
use crate::report::escalate;
use crate::{
    BreakingChangeInfo, BreakingContext, BreakingRule, ChangeImpact, ChangeInfo, ChangeReport,
    DeprecationRule, RemovedExportRule, SignatureRule,
};

/// Detects and classifies changes between two snapshots.
pub struct ChangeDetector;

impl ChangeDetector {
    /// Added, deleted and modified files between `old` and `new`.
    #[must_use]
    pub fn detect_changes(old: &ProjectSnapshot, new: &ProjectSnapshot) -> ChangeInfo {
        let info = ChangeInfo::between(old, new);
        tracing::debug!(
            from = %old.version_label,
            to = %new.version_label,
            changes = info.change_count,
            hash = %info.change_hash,
            "detected file changes"
        );
        info
    }

    /// Breaking API changes found by the built-in rules: removed exports,
    /// signature changes and new deprecations, in that order.
    #[must_use]
    pub fn detect_breaking_changes(
        old: &ProjectSnapshot,
        new: &ProjectSnapshot,
    ) -> Vec<BreakingChangeInfo> {
        Self::detect_breaking_changes_with(
            old,
            new,
            &[&RemovedExportRule, &SignatureRule, &DeprecationRule],
        )
    }

    /// Like [`ChangeDetector::detect_breaking_changes`] with a caller-chosen rule set.
    #[must_use]
    pub fn detect_breaking_changes_with(
        old: &ProjectSnapshot,
        new: &ProjectSnapshot,
        rules: &[&dyn BreakingRule],
    ) -> Vec<BreakingChangeInfo> {
        let mut engine = BreakingEngine::new();
        for rule in rules {
            engine.add_rule(*rule);
        }

        let found = engine.detect(&BreakingContext::new(old, new));
        tracing::debug!(breaking = found.len(), "classified breaking changes");
        found
    }

    /// Files one import hop away from each change, with risk and score.
    #[must_use]
    pub fn analyze_impact(changes: &ChangeInfo, snapshot: &ProjectSnapshot) -> ChangeImpact {
        ChangeImpact::analyze(changes, snapshot)
    }

    #[must_use]
    pub fn generate_change_report(old: &ProjectSnapshot, new: &ProjectSnapshot) -> ChangeReport {
        let changes = Self::detect_changes(old, new);
        let breaking = Self::detect_breaking_changes(old, new);
        let changes = escalate(changes, &breaking);
        let impact = Self::analyze_impact(&changes, new);
        ChangeReport::compose(changes, breaking, impact)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use revdiff_core::{ChangeType, ExportedSymbol, FileEntry, RiskLevel};

    use crate::BreakingKind;

    fn snapshot_a() -> ProjectSnapshot {
        ProjectSnapshot::new("app", "1.0.0")
            .with_file(FileEntry::new("a.x", 100, 10))
            .with_file(FileEntry::new("b.x", 50, 5))
            .with_symbol(ExportedSymbol::new("foo", "a.x"))
    }

    fn snapshot_b() -> ProjectSnapshot {
        ProjectSnapshot::new("app", "1.1.0")
            .with_file(FileEntry::new("a.x", 120, 12))
            .with_file(FileEntry::new("c.x", 30, 3))
    }

    #[test]
    fn two_snapshot_scenario() {
        let report = ChangeDetector::generate_change_report(&snapshot_a(), &snapshot_b());

        assert_eq!(report.changes.files_changed, vec!["c.x", "b.x", "a.x"]);
        assert_eq!(
            report.changes.change_types,
            vec![ChangeType::Added, ChangeType::Deleted, ChangeType::Modified]
        );
        assert_eq!(
            report
                .breaking_changes
                .iter()
                .filter(|b| b.kind == BreakingKind::RemovedExport && b.symbol_name == "foo")
                .count(),
            1
        );
        assert!(report.summary.risk_level >= RiskLevel::High);
        assert_eq!(report.summary.new_features, 1);
        assert_eq!(report.summary.bug_fixes, 1);
    }

    #[test]
    fn same_snapshot_has_no_changes() {
        let changes = ChangeDetector::detect_changes(&snapshot_a(), &snapshot_a());

        assert_eq!(changes.change_count, 0);
    }

    #[test]
    fn custom_rule_set() {
        let found = ChangeDetector::detect_breaking_changes_with(
            &snapshot_a(),
            &snapshot_b(),
            &[&SignatureRule],
        );

        assert!(found.is_empty());
    }
}
