use revdiff_core::{ExportedSymbol, Severity};

use super::{BreakingChangeInfo, BreakingContext, BreakingKind};

const CONTRACT_KEYS: [&str; 2] = ["returnType", "parameters"];

pub trait BreakingRule {
    /// Appends every breaking change this rule recognises to `found`.
    fn check(&self, context: &BreakingContext<'_>, found: &mut Vec<BreakingChangeInfo>);
}

/// Symbols exported by the old snapshot and missing from the new one.
pub struct RemovedExportRule;

impl BreakingRule for RemovedExportRule {
    fn check(&self, context: &BreakingContext<'_>, found: &mut Vec<BreakingChangeInfo>) {
        for (name, symbol) in &context.old_symbols {
            if context.new_symbols.contains_key(name) {
                continue;
            }

            let severity = if symbol.is_default {
                Severity::Critical
            } else {
                Severity::High
            };
            found.push(BreakingChangeInfo {
                kind: BreakingKind::RemovedExport,
                symbol_name: symbol.name.clone(),
                file: symbol.file.clone(),
                description: format!("Export '{}' was removed from {}", symbol.name, symbol.file),
                severity,
                migration_hint: Some(format!(
                    "Remove usages of '{}' or replace them with an equivalent export",
                    symbol.name
                )),
                affected_files: context.importers_of(&symbol.file),
            });
        }
    }
}

/// Symbols whose signature text or `returnType`/`parameters` metadata
/// changed. The metadata narrows the classification when present.
pub struct SignatureRule;

impl SignatureRule {
    fn changed(old: &ExportedSymbol, new: &ExportedSymbol) -> bool {
        old.signature != new.signature
            || CONTRACT_KEYS
                .iter()
                .any(|key| old.metadata.get(*key) != new.metadata.get(*key))
    }

    fn classify(old: &ExportedSymbol, new: &ExportedSymbol) -> (BreakingKind, String) {
        if old.metadata.get("returnType") != new.metadata.get("returnType") {
            (
                BreakingKind::ChangedReturnType,
                format!("Return type of '{}' changed", new.name),
            )
        } else if old.metadata.get("parameters") != new.metadata.get("parameters") {
            (
                BreakingKind::ChangedParameter,
                format!("Parameters of '{}' changed", new.name),
            )
        } else {
            (
                BreakingKind::ChangedSignature,
                format!(
                    "Signature of '{}' changed from `{}` to `{}`",
                    new.name, old.signature, new.signature
                ),
            )
        }
    }
}

impl BreakingRule for SignatureRule {
    fn check(&self, context: &BreakingContext<'_>, found: &mut Vec<BreakingChangeInfo>) {
        for (old, new) in context.retained() {
            if !Self::changed(old, new) {
                continue;
            }

            let (kind, description) = Self::classify(old, new);
            found.push(BreakingChangeInfo {
                kind,
                symbol_name: new.name.clone(),
                file: new.file.clone(),
                description,
                severity: Severity::High,
                migration_hint: Some(format!(
                    "Update call sites of '{}' to match `{}`",
                    new.name, new.signature
                )),
                affected_files: context.importers_of(&new.file),
            });
        }
    }
}

/// Symbols newly marked deprecated.
pub struct DeprecationRule;

impl BreakingRule for DeprecationRule {
    fn check(&self, context: &BreakingContext<'_>, found: &mut Vec<BreakingChangeInfo>) {
        for (old, new) in context.retained() {
            if old.is_deprecated() || !new.is_deprecated() {
                continue;
            }

            let note = new
                .metadata
                .get("deprecated")
                .and_then(|v| v.as_str())
                .filter(|s| !s.is_empty());
            found.push(BreakingChangeInfo {
                kind: BreakingKind::Deprecated,
                symbol_name: new.name.clone(),
                file: new.file.clone(),
                description: match note {
                    Some(note) => format!("'{}' is deprecated: {note}", new.name),
                    None => format!("'{}' is deprecated", new.name),
                },
                severity: Severity::Low,
                migration_hint: Some(format!(
                    "Plan a move away from '{}' before it is removed",
                    new.name
                )),
                affected_files: context.importers_of(&new.file),
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use revdiff_core::ProjectSnapshot;
    use serde_json::json;

    fn run(
        rule: &dyn BreakingRule,
        old: &ProjectSnapshot,
        new: &ProjectSnapshot,
    ) -> Vec<BreakingChangeInfo> {
        let mut found = Vec::new();
        rule.check(&BreakingContext::new(old, new), &mut found);
        found
    }

    #[test]
    fn removed_export_is_high_severity() {
        let old = ProjectSnapshot::new("app", "1").with_symbol(ExportedSymbol::new("foo", "a.x"));
        let new = ProjectSnapshot::new("app", "2").with_import("main.x", "a.x");

        let found = run(&RemovedExportRule, &old, &new);

        assert_eq!(found.len(), 1);
        assert_eq!(found[0].kind, BreakingKind::RemovedExport);
        assert_eq!(found[0].severity, Severity::High);
        assert_eq!(found[0].affected_files, vec!["main.x"]);
        assert!(found[0].migration_hint.is_some());
    }

    #[test]
    fn removed_default_export_is_critical() {
        let old = ProjectSnapshot::new("app", "1")
            .with_symbol(ExportedSymbol::new("App", "app.x").as_default());
        let new = ProjectSnapshot::new("app", "2");

        let found = run(&RemovedExportRule, &old, &new);

        assert_eq!(found[0].severity, Severity::Critical);
    }

    #[test]
    fn unchanged_signature_is_not_reported() {
        let symbol = ExportedSymbol::new("foo", "a.x").with_signature("foo(a: i32)");
        let old = ProjectSnapshot::new("app", "1").with_symbol(symbol.clone());
        let new = ProjectSnapshot::new("app", "2").with_symbol(symbol);

        assert!(run(&SignatureRule, &old, &new).is_empty());
    }

    #[test]
    fn plain_signature_change() {
        let old = ProjectSnapshot::new("app", "1")
            .with_symbol(ExportedSymbol::new("foo", "a.x").with_signature("foo(a)"));
        let new = ProjectSnapshot::new("app", "2")
            .with_symbol(ExportedSymbol::new("foo", "a.x").with_signature("foo(a, b)"));

        let found = run(&SignatureRule, &old, &new);

        assert_eq!(found[0].kind, BreakingKind::ChangedSignature);
        assert_eq!(found[0].severity, Severity::High);
    }

    #[test]
    fn return_type_metadata_takes_precedence() {
        let old = ProjectSnapshot::new("app", "1").with_symbol(
            ExportedSymbol::new("foo", "a.x")
                .with_signature("foo(): A")
                .with_metadata("returnType", json!("A"))
                .with_metadata("parameters", json!([])),
        );
        let new = ProjectSnapshot::new("app", "2").with_symbol(
            ExportedSymbol::new("foo", "a.x")
                .with_signature("foo(x): B")
                .with_metadata("returnType", json!("B"))
                .with_metadata("parameters", json!(["x"])),
        );

        assert_eq!(
            run(&SignatureRule, &old, &new)[0].kind,
            BreakingKind::ChangedReturnType
        );
    }

    #[test]
    fn parameter_metadata_change() {
        let old = ProjectSnapshot::new("app", "1").with_symbol(
            ExportedSymbol::new("foo", "a.x")
                .with_signature("foo()")
                .with_metadata("parameters", json!([])),
        );
        let new = ProjectSnapshot::new("app", "2").with_symbol(
            ExportedSymbol::new("foo", "a.x")
                .with_signature("foo(x)")
                .with_metadata("parameters", json!(["x"])),
        );

        assert_eq!(
            run(&SignatureRule, &old, &new)[0].kind,
            BreakingKind::ChangedParameter
        );
    }

    #[test]
    fn return_type_change_with_same_signature_text() {
        let old = ProjectSnapshot::new("app", "1").with_symbol(
            ExportedSymbol::new("foo", "a.x")
                .with_signature("foo()")
                .with_metadata("returnType", json!("A")),
        );
        let new = ProjectSnapshot::new("app", "2").with_symbol(
            ExportedSymbol::new("foo", "a.x")
                .with_signature("foo()")
                .with_metadata("returnType", json!("B")),
        );

        let found = run(&SignatureRule, &old, &new);

        assert_eq!(found.len(), 1);
        assert_eq!(found[0].kind, BreakingKind::ChangedReturnType);
    }

    #[test]
    fn newly_deprecated_symbol_is_low_severity() {
        let old = ProjectSnapshot::new("app", "1").with_symbol(ExportedSymbol::new("foo", "a.x"));
        let new = ProjectSnapshot::new("app", "2").with_symbol(
            ExportedSymbol::new("foo", "a.x").with_metadata("deprecated", json!("use bar")),
        );

        let found = run(&DeprecationRule, &old, &new);

        assert_eq!(found.len(), 1);
        assert_eq!(found[0].severity, Severity::Low);
        assert_eq!(found[0].description, "'foo' is deprecated: use bar");
    }

    #[test]
    fn already_deprecated_symbol_is_not_reported_again() {
        let symbol = ExportedSymbol::new("foo", "a.x").with_metadata("deprecated", json!(true));
        let old = ProjectSnapshot::new("app", "1").with_symbol(symbol.clone());
        let new = ProjectSnapshot::new("app", "2").with_symbol(symbol);

        assert!(run(&DeprecationRule, &old, &new).is_empty());
    }
}
