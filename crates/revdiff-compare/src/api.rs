use indexmap::IndexMap;
use revdiff_core::{ChangeType, ExportedSymbol, ProjectSnapshot, SymbolKind};
use serde::{Deserialize, Serialize};

/// Metadata keys that describe a symbol's calling contract.
const CONTRACT_KEYS: [&str; 2] = ["returnType", "parameters"];

/// One exported symbol that was added, removed or altered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiChange {
    pub name: String,
    pub change_type: ChangeType,
    pub kind: SymbolKind,
    pub file: String,
    pub breaking: bool,
    pub details: String,
}

/// Additions first, then removals, then modifications, each in snapshot
/// order. Removals are always breaking.
pub(crate) fn api_changes(old: &ProjectSnapshot, new: &ProjectSnapshot) -> Vec<ApiChange> {
    let before: IndexMap<&str, &ExportedSymbol> = old
        .exported_symbols
        .iter()
        .map(|s| (s.name.as_str(), s))
        .collect();
    let after: IndexMap<&str, &ExportedSymbol> = new
        .exported_symbols
        .iter()
        .map(|s| (s.name.as_str(), s))
        .collect();

    let mut changes = Vec::new();

    for (name, symbol) in &after {
        if !before.contains_key(name) {
            changes.push(ApiChange {
                name: symbol.name.clone(),
                change_type: ChangeType::Added,
                kind: symbol.kind,
                file: symbol.file.clone(),
                breaking: false,
                details: format!("new {} exported from {}", symbol.kind, symbol.file),
            });
        }
    }

    for (name, symbol) in &before {
        if !after.contains_key(name) {
            changes.push(ApiChange {
                name: symbol.name.clone(),
                change_type: ChangeType::Deleted,
                kind: symbol.kind,
                file: symbol.file.clone(),
                breaking: true,
                details: format!("{} removed from {}", symbol.kind, symbol.file),
            });
        }
    }

    for (name, current) in &after {
        let Some(previous) = before.get(name) else {
            continue;
        };
        let (breaking, notes) = compare_symbols(previous, current);
        if notes.is_empty() {
            continue;
        }
        changes.push(ApiChange {
            name: current.name.clone(),
            change_type: ChangeType::Modified,
            kind: current.kind,
            file: current.file.clone(),
            breaking,
            details: notes.join("; "),
        });
    }

    changes
}

/// Returns whether the difference breaks consumers, and one note per
/// differing attribute.
fn compare_symbols(old: &ExportedSymbol, new: &ExportedSymbol) -> (bool, Vec<String>) {
    let mut breaking = false;
    let mut notes = Vec::new();

    if old.kind != new.kind {
        breaking = true;
        notes.push(format!("kind changed from {} to {}", old.kind, new.kind));
    }
    if old.file != new.file {
        breaking = true;
        notes.push(format!("moved from {} to {}", old.file, new.file));
    }
    if old.is_default != new.is_default {
        breaking = true;
        notes.push(if new.is_default {
            "became the default export".to_string()
        } else {
            "is no longer the default export".to_string()
        });
    }
    if old.is_exported != new.is_exported {
        breaking = true;
        notes.push(if new.is_exported {
            "became exported".to_string()
        } else {
            "is no longer exported".to_string()
        });
    }
    if old.signature != new.signature {
        breaking = true;
        notes.push(format!(
            "signature changed from `{}` to `{}`",
            old.signature, new.signature
        ));
    }

    let introduced = new
        .metadata
        .keys()
        .filter(|key| !old.metadata.contains_key(key.as_str()));
    for key in old.metadata.keys().chain(introduced) {
        if old.metadata.get(key) == new.metadata.get(key) {
            continue;
        }
        if CONTRACT_KEYS.contains(&key.as_str()) {
            breaking = true;
        }
        notes.push(format!("metadata '{key}' changed"));
    }

    (breaking, notes)
}
