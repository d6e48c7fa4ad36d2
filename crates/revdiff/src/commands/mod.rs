mod changes;
mod compare;
mod diff;
mod version;

use std::path::PathBuf;

use clap::{Args, Subcommand};
use revdiff_compare::ReportFormat;
use revdiff_core::ProjectSnapshot;
use revdiff_diff::{DiffFormat, HunkAlgorithm};
use revdiff_version::BumpKind;

use crate::config::Config;
use crate::content::DirectoryContent;
use crate::error::Result;
use crate::snapshot;

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Compare two snapshots and render a report
    Compare(CompareArgs),
    /// Print the change report for two snapshots as JSON
    Changes(PairArgs),
    /// Print a line diff between two snapshots
    Diff(DiffArgs),
    /// Parse, check and advance version identifiers
    #[command(subcommand)]
    Version(VersionCommand),
}

#[derive(Args)]
pub(crate) struct PairArgs {
    /// Snapshot JSON of the older state
    pub old: PathBuf,
    /// Snapshot JSON of the newer state
    pub new: PathBuf,
}

impl PairArgs {
    fn load(&self) -> Result<(ProjectSnapshot, ProjectSnapshot)> {
        Ok((snapshot::load(&self.old)?, snapshot::load(&self.new)?))
    }
}

#[derive(Args)]
pub(crate) struct ContentArgs {
    /// Directory with the file bodies of the older snapshot
    #[arg(long)]
    pub old_root: Option<PathBuf>,
    /// Directory with the file bodies of the newer snapshot
    #[arg(long)]
    pub new_root: Option<PathBuf>,
}

impl ContentArgs {
    fn provider(&self, old: &ProjectSnapshot, new: &ProjectSnapshot) -> DirectoryContent {
        DirectoryContent::new()
            .with_root(&old.version_label, self.old_root.as_deref())
            .with_root(&new.version_label, self.new_root.as_deref())
    }
}

#[derive(Args)]
pub(crate) struct CompareArgs {
    #[command(flatten)]
    pub pair: PairArgs,
    #[command(flatten)]
    pub content: ContentArgs,
    /// Report encoding [default: from config, else markdown]
    #[arg(long, short = 'f', value_enum)]
    pub format: Option<ReportFormat>,
    /// Write the report to this file instead of stdout
    #[arg(long, short = 'o')]
    pub output: Option<PathBuf>,
}

#[derive(Args)]
pub(crate) struct DiffArgs {
    #[command(flatten)]
    pub pair: PairArgs,
    #[command(flatten)]
    pub content: ContentArgs,
    /// Text layout [default: from config, else unified]
    #[arg(long, value_enum)]
    pub layout: Option<DiffFormat>,
    /// Unchanged lines shown around each change
    #[arg(long, short = 'U')]
    pub context: Option<usize>,
    /// Hunking algorithm
    #[arg(long, value_enum)]
    pub algorithm: Option<HunkAlgorithm>,
    /// Total width of the side-by-side layout
    #[arg(long)]
    pub width: Option<usize>,
}

#[derive(Subcommand)]
pub(crate) enum VersionCommand {
    /// Print the metadata of a version as JSON
    Parse { version: String },
    /// Check that a version is valid under the configured strategy
    Validate { version: String },
    /// Order version A relative to version B
    Compare { a: String, b: String },
    /// Print the bumped version
    Bump {
        version: String,
        #[arg(long, short, value_enum, default_value_t = BumpKind::Patch)]
        kind: BumpKind,
        /// Prerelease identifier for prerelease bumps
        #[arg(long)]
        preid: Option<String>,
    },
    /// Print the version that follows CURRENT (timestamps use the clock)
    Next { current: Option<String> },
}

impl Commands {
    pub(crate) fn execute(self, config: &Config) -> Result<()> {
        match self {
            Self::Compare(args) => compare::run(args, config),
            Self::Changes(args) => changes::run(&args),
            Self::Diff(args) => diff::run(args, config),
            Self::Version(command) => version::run(command, config),
        }
    }
}
