//! Classifies what changed between two project snapshots and how far the
//! change reaches.
//!
//! [`ChangeDetector`] is the entry point. It partitions files into added,
//! deleted and modified sets, flags backward-incompatible API changes, follows
//! import relations one hop to estimate impact, and composes all of it into a
//! [`ChangeReport`].

mod breaking;
mod changes;
mod detector;
mod impact;
mod report;

pub use breaking::rules::{BreakingRule, DeprecationRule, RemovedExportRule, SignatureRule};
pub use breaking::{BreakingChangeInfo, BreakingContext, BreakingEngine, BreakingKind};
pub use changes::ChangeInfo;
pub use detector::ChangeDetector;
pub use impact::{ChangeImpact, assess_risk, impact_score};
pub use report::{ChangeReport, ChangeSummary, ReportRecommendations};
