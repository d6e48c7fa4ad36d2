//! Immutable analysis snapshot of a project at one point in time.
//!
//! Snapshots are produced by an external parser. This crate only describes
//! their shape and checks the two structural invariants every consumer relies
//! on: file paths and exported symbol names are unique.

use std::collections::HashSet;
use std::fmt;

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{CoreError, Result};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectSnapshot {
    pub name: String,
    pub version_label: String,
    #[serde(default)]
    pub files: Vec<FileEntry>,
    #[serde(default)]
    pub exported_symbols: Vec<ExportedSymbol>,
    #[serde(default)]
    pub relations: Vec<Relation>,
    #[serde(default)]
    pub complexity: ComplexityMetrics,
    #[serde(default)]
    pub quality: QualityMetrics,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileEntry {
    pub path: String,
    pub size: u64,
    pub line_count: u64,
    #[serde(default)]
    pub last_modified: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportedSymbol {
    pub name: String,
    pub file: String,
    #[serde(default)]
    pub signature: String,
    #[serde(default)]
    pub is_default: bool,
    #[serde(default = "default_true")]
    pub is_exported: bool,
    #[serde(default)]
    pub kind: SymbolKind,
    #[serde(default)]
    pub metadata: IndexMap<String, Value>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SymbolKind {
    Function,
    Class,
    Interface,
    Type,
    Variable,
    Constant,
    Enum,
    Module,
    #[default]
    #[serde(other)]
    Unknown,
}

impl SymbolKind {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Function => "function",
            Self::Class => "class",
            Self::Interface => "interface",
            Self::Type => "type",
            Self::Variable => "variable",
            Self::Constant => "constant",
            Self::Enum => "enum",
            Self::Module => "module",
            Self::Unknown => "unknown",
        }
    }
}

impl fmt::Display for SymbolKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Relation {
    pub from: String,
    pub to: String,
    pub kind: RelationKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RelationKind {
    Import,
    Export,
    Call,
    Inherit,
    Reference,
    #[serde(other)]
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ComplexityMetrics {
    pub cyclomatic: f64,
    pub cognitive: f64,
    pub maintainability: f64,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct QualityMetrics {
    pub score: f64,
    #[serde(default)]
    pub issues: Vec<QualityIssue>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QualityIssue {
    pub severity: String,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
}

fn default_true() -> bool {
    true
}

impl ProjectSnapshot {
    #[must_use]
    pub fn new(name: impl Into<String>, version_label: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version_label: version_label.into(),
            files: Vec::new(),
            exported_symbols: Vec::new(),
            relations: Vec::new(),
            complexity: ComplexityMetrics::default(),
            quality: QualityMetrics::default(),
        }
    }

    /// # Errors
    ///
    /// Returns [`CoreError::Decode`] for malformed JSON and the invariant
    /// errors of [`ProjectSnapshot::validate`].
    pub fn from_json(json: &str) -> Result<Self> {
        let snapshot: Self = serde_json::from_str(json)?;
        snapshot.validate()?;
        Ok(snapshot)
    }

    /// # Errors
    ///
    /// Returns an error if the name is empty or a file path or exported
    /// symbol name appears twice.
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(CoreError::EmptySnapshotName);
        }

        let mut paths = HashSet::new();
        for file in &self.files {
            if !paths.insert(file.path.as_str()) {
                return Err(CoreError::DuplicatePath {
                    snapshot: self.name.clone(),
                    path: file.path.clone(),
                });
            }
        }

        let mut names = HashSet::new();
        for symbol in &self.exported_symbols {
            if !names.insert(symbol.name.as_str()) {
                return Err(CoreError::DuplicateSymbol {
                    snapshot: self.name.clone(),
                    name: symbol.name.clone(),
                });
            }
        }

        Ok(())
    }

    #[must_use]
    pub fn file(&self, path: &str) -> Option<&FileEntry> {
        self.files.iter().find(|f| f.path == path)
    }

    #[must_use]
    pub fn symbol(&self, name: &str) -> Option<&ExportedSymbol> {
        self.exported_symbols.iter().find(|s| s.name == name)
    }

    /// Files with an `import` relation pointing at `path`.
    pub fn importers_of<'a>(&'a self, path: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.relations
            .iter()
            .filter(move |r| r.kind == RelationKind::Import && r.to == path)
            .map(|r| r.from.as_str())
    }

    /// Files `path` imports.
    pub fn imports_of<'a>(&'a self, path: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.relations
            .iter()
            .filter(move |r| r.kind == RelationKind::Import && r.from == path)
            .map(|r| r.to.as_str())
    }

    #[must_use]
    pub fn with_file(mut self, file: FileEntry) -> Self {
        self.files.push(file);
        self
    }

    #[must_use]
    pub fn with_symbol(mut self, symbol: ExportedSymbol) -> Self {
        self.exported_symbols.push(symbol);
        self
    }

    #[must_use]
    pub fn with_import(mut self, from: impl Into<String>, to: impl Into<String>) -> Self {
        self.relations.push(Relation {
            from: from.into(),
            to: to.into(),
            kind: RelationKind::Import,
        });
        self
    }

    #[must_use]
    pub fn with_complexity(mut self, complexity: ComplexityMetrics) -> Self {
        self.complexity = complexity;
        self
    }

    #[must_use]
    pub fn with_quality(mut self, quality: QualityMetrics) -> Self {
        self.quality = quality;
        self
    }
}

impl FileEntry {
    #[must_use]
    pub fn new(path: impl Into<String>, size: u64, line_count: u64) -> Self {
        Self {
            path: path.into(),
            size,
            line_count,
            last_modified: DateTime::<Utc>::UNIX_EPOCH,
        }
    }

    #[must_use]
    pub fn modified_at(mut self, last_modified: DateTime<Utc>) -> Self {
        self.last_modified = last_modified;
        self
    }

    /// Two entries for the same path describe different content when any of
    /// size, line count or modification time differ.
    #[must_use]
    pub fn differs_from(&self, other: &Self) -> bool {
        self.size != other.size
            || self.line_count != other.line_count
            || self.last_modified != other.last_modified
    }
}

impl ExportedSymbol {
    #[must_use]
    pub fn new(name: impl Into<String>, file: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            file: file.into(),
            signature: String::new(),
            is_default: false,
            is_exported: true,
            kind: SymbolKind::Unknown,
            metadata: IndexMap::new(),
        }
    }

    #[must_use]
    pub fn with_signature(mut self, signature: impl Into<String>) -> Self {
        self.signature = signature.into();
        self
    }

    #[must_use]
    pub fn with_kind(mut self, kind: SymbolKind) -> Self {
        self.kind = kind;
        self
    }

    #[must_use]
    pub fn as_default(mut self) -> Self {
        self.is_default = true;
        self
    }

    #[must_use]
    pub fn with_metadata(mut self, key: impl Into<String>, value: Value) -> Self {
        self.metadata.insert(key.into(), value);
        self
    }

    #[must_use]
    pub fn is_deprecated(&self) -> bool {
        self.metadata
            .get("deprecated")
            .is_some_and(|v| v.as_bool().unwrap_or(false) || v.is_string())
    }
}
