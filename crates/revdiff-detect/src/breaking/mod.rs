pub mod rules;

use std::fmt;

use indexmap::{IndexMap, IndexSet};
use revdiff_core::{ExportedSymbol, ProjectSnapshot, Severity};
use serde::{Deserialize, Serialize};

use rules::BreakingRule;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BreakingKind {
    RemovedExport,
    ChangedSignature,
    ChangedReturnType,
    ChangedParameter,
    Deprecated,
}

impl fmt::Display for BreakingKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::RemovedExport => "removed export",
            Self::ChangedSignature => "changed signature",
            Self::ChangedReturnType => "changed return type",
            Self::ChangedParameter => "changed parameters",
            Self::Deprecated => "deprecated",
        };
        write!(f, "{s}")
    }
}

/// A change to an exported symbol that can break existing callers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BreakingChangeInfo {
    pub kind: BreakingKind,
    pub symbol_name: String,
    pub file: String,
    pub description: String,
    pub severity: Severity,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub migration_hint: Option<String>,
    #[serde(default)]
    pub affected_files: Vec<String>,
}

/// Symbol lookups shared by every [`BreakingRule`].
pub struct BreakingContext<'a> {
    pub old: &'a ProjectSnapshot,
    pub new: &'a ProjectSnapshot,
    pub old_symbols: IndexMap<&'a str, &'a ExportedSymbol>,
    pub new_symbols: IndexMap<&'a str, &'a ExportedSymbol>,
}

impl<'a> BreakingContext<'a> {
    #[must_use]
    pub fn new(old: &'a ProjectSnapshot, new: &'a ProjectSnapshot) -> Self {
        Self {
            old,
            new,
            old_symbols: symbols_by_name(old),
            new_symbols: symbols_by_name(new),
        }
    }

    /// Symbols present in both snapshots, in the old snapshot's order.
    pub fn retained(&self) -> impl Iterator<Item = (&'a ExportedSymbol, &'a ExportedSymbol)> + '_ {
        self.old_symbols
            .iter()
            .filter_map(|(name, old)| self.new_symbols.get(name).map(|new| (*old, *new)))
    }

    /// New-snapshot files that import `file`, deduplicated in relation order.
    #[must_use]
    pub fn importers_of(&self, file: &str) -> Vec<String> {
        self.new
            .importers_of(file)
            .filter(|importer| *importer != file)
            .collect::<IndexSet<_>>()
            .into_iter()
            .map(str::to_string)
            .collect()
    }
}

fn symbols_by_name(snapshot: &ProjectSnapshot) -> IndexMap<&str, &ExportedSymbol> {
    snapshot
        .exported_symbols
        .iter()
        .map(|s| (s.name.as_str(), s))
        .collect()
}

/// Runs each rule in order over one snapshot pair.
pub struct BreakingEngine<'r> {
    rules: Vec<&'r dyn BreakingRule>,
}

impl<'r> BreakingEngine<'r> {
    #[must_use]
    pub fn new() -> Self {
        Self { rules: Vec::new() }
    }

    pub fn add_rule(&mut self, rule: &'r dyn BreakingRule) {
        self.rules.push(rule);
    }

    #[must_use]
    pub fn detect(&self, context: &BreakingContext<'_>) -> Vec<BreakingChangeInfo> {
        let mut found = Vec::new();
        for rule in &self.rules {
            rule.check(context, &mut found);
        }
        found
    }
}

impl Default for BreakingEngine<'_> {
    fn default() -> Self {
        Self::new()
    }
}
