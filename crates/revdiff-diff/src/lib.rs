//! Line-level diffs between two project snapshots.
//!
//! [`DiffRenderer`] partitions files the same way change detection does and
//! hunks modified files from bodies supplied by a [`ContentProvider`]. The
//! resulting [`DiffReport`] renders as unified, context or side-by-side text.

mod format;
mod hunk;
mod options;
mod provider;
mod renderer;
mod types;

pub use format::{format_context, format_side_by_side, format_unified, render, render_with};
pub use hunk::hunks;
pub use options::{
    DEFAULT_CONTEXT_LINES, DEFAULT_LCS_CELL_LIMIT, DEFAULT_SIDE_BY_SIDE_WIDTH, DiffFormat,
    DiffOptions, HunkAlgorithm,
};
pub use provider::{ContentProvider, InMemoryContent, NoContent};
pub use renderer::DiffRenderer;
pub use types::{DiffMetadata, DiffReport, DiffSummary, FileDiff, Hunk, LineChange, LineKind};
