pub mod error;
pub mod snapshot;
pub mod types;

pub use error::*;
pub use snapshot::{
    ComplexityMetrics, ExportedSymbol, FileEntry, ProjectSnapshot, QualityIssue, QualityMetrics,
    Relation, RelationKind, SymbolKind,
};
pub use types::*;
