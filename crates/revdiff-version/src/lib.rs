//! Versioning strategies for project snapshots.
//!
//! Every strategy implements the same five operations through the
//! [`Strategy`] trait. Callers usually pick one through [`StrategyConfig`]
//! and work with the closed [`VersioningStrategy`] enum.

mod branch;
mod custom;
mod error;
mod metadata;
mod semantic;
mod strategy;
mod timestamp;

pub use branch::{BranchConfig, BranchStrategy};
pub use custom::{CompareHook, CustomConfig, CustomStrategy, GenerateHook, ParseHook, ValidateHook};
pub use error::VersionError;
pub use metadata::{
    BumpKind, ComparisonOutcome, StrategySpecific, VersionComparison, VersionMetadata,
};
pub use semantic::SemanticStrategy;
pub use strategy::{Strategy, StrategyConfig, VersioningStrategy};
pub use timestamp::{Precision, TimestampConfig, TimestampFormat, TimestampStrategy};

pub type Result<T> = std::result::Result<T, VersionError>;
