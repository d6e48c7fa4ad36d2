use chrono::{DateTime, Utc};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

pub const DEFAULT_CONTEXT_LINES: usize = 3;
pub const DEFAULT_SIDE_BY_SIDE_WIDTH: usize = 80;
/// About 32 MiB of alignment table on 64-bit targets.
pub const DEFAULT_LCS_CELL_LIMIT: usize = 4_000_000;

/// How modified files are split into hunks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum HunkAlgorithm {
    /// Compares line `k` of the old text with line `k` of the new text and
    /// emits one hunk per differing pair. Cheap, but insertions and deletions
    /// in the middle of a file show up as a run of replacements.
    #[default]
    Lockstep,
    /// Longest-common-subsequence alignment with merged context windows.
    Lcs,
}

/// Text layout for rendering a [`DiffReport`](crate::DiffReport).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum DiffFormat {
    #[default]
    Unified,
    Context,
    SideBySide,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct DiffOptions {
    pub context_lines: usize,
    pub algorithm: HunkAlgorithm,
    pub format: DiffFormat,
    pub side_by_side_width: usize,
    /// Largest alignment table [`HunkAlgorithm::Lcs`] may allocate.
    pub lcs_cell_limit: usize,
    /// Fixed report timestamp; the current time is used when unset.
    #[serde(skip)]
    pub generated_at: Option<DateTime<Utc>>,
}

impl Default for DiffOptions {
    fn default() -> Self {
        Self {
            context_lines: DEFAULT_CONTEXT_LINES,
            algorithm: HunkAlgorithm::default(),
            format: DiffFormat::default(),
            side_by_side_width: DEFAULT_SIDE_BY_SIDE_WIDTH,
            lcs_cell_limit: DEFAULT_LCS_CELL_LIMIT,
            generated_at: None,
        }
    }
}

impl DiffOptions {
    #[must_use]
    pub fn with_context_lines(mut self, context_lines: usize) -> Self {
        self.context_lines = context_lines;
        self
    }

    #[must_use]
    pub fn with_algorithm(mut self, algorithm: HunkAlgorithm) -> Self {
        self.algorithm = algorithm;
        self
    }

    #[must_use]
    pub fn with_format(mut self, format: DiffFormat) -> Self {
        self.format = format;
        self
    }

    #[must_use]
    pub fn with_side_by_side_width(mut self, width: usize) -> Self {
        self.side_by_side_width = width;
        self
    }

    #[must_use]
    pub fn with_lcs_cell_limit(mut self, cells: usize) -> Self {
        self.lcs_cell_limit = cells;
        self
    }

    #[must_use]
    pub fn generated_at(mut self, moment: DateTime<Utc>) -> Self {
        self.generated_at = Some(moment);
        self
    }
}
