use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use clap::ValueEnum;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::VersionError;

/// Parsed form of a version string. Bumping returns a new value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VersionMetadata {
    pub version_string: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub strategy_specific: Option<StrategySpecific>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "strategy", rename_all_fields = "camelCase")]
pub enum StrategySpecific {
    Semantic {
        major: u64,
        minor: u64,
        patch: u64,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        prerelease: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        build: Option<String>,
    },
    Timestamp {
        iso: String,
        unix_seconds: i64,
        readable: String,
        timezone: String,
    },
    Custom {
        values: IndexMap<String, String>,
    },
    Branch {
        branch: String,
        build: u64,
    },
}

impl StrategySpecific {
    pub(crate) fn variant_name(&self) -> &'static str {
        match self {
            Self::Semantic { .. } => "semantic",
            Self::Timestamp { .. } => "timestamp",
            Self::Custom { .. } => "custom",
            Self::Branch { .. } => "branch",
        }
    }
}

impl VersionMetadata {
    #[must_use]
    pub fn new(version_string: impl Into<String>, strategy_specific: StrategySpecific) -> Self {
        Self {
            version_string: version_string.into(),
            created_at: None,
            tags: Vec::new(),
            strategy_specific: Some(strategy_specific),
        }
    }

    #[must_use]
    pub fn semantic(major: u64, minor: u64, patch: u64) -> Self {
        Self::new(
            format!("{major}.{minor}.{patch}"),
            StrategySpecific::Semantic {
                major,
                minor,
                patch,
                prerelease: None,
                build: None,
            },
        )
    }

    #[must_use]
    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.push(tag.into());
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ComparisonOutcome {
    Greater,
    Less,
    Equal,
    Incompatible,
}

impl From<Ordering> for ComparisonOutcome {
    fn from(ordering: Ordering) -> Self {
        match ordering {
            Ordering::Greater => Self::Greater,
            Ordering::Less => Self::Less,
            Ordering::Equal => Self::Equal,
        }
    }
}

impl fmt::Display for ComparisonOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Greater => "Greater",
            Self::Less => "Less",
            Self::Equal => "Equal",
            Self::Incompatible => "Incompatible",
        };
        write!(f, "{s}")
    }
}

/// Result of ordering two version strings. Built fresh per comparison.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VersionComparison {
    pub result: ComparisonOutcome,
    pub difference: i64,
    pub compatible: bool,
    pub breaking_changes: bool,
    pub new_features: bool,
    pub bug_fixes: bool,
    pub explanation: String,
}

impl VersionComparison {
    #[must_use]
    pub fn ordered(ordering: Ordering, difference: i64, explanation: impl Into<String>) -> Self {
        Self {
            result: ordering.into(),
            difference,
            compatible: true,
            breaking_changes: false,
            new_features: false,
            bug_fixes: false,
            explanation: explanation.into(),
        }
    }

    #[must_use]
    pub fn incompatible(explanation: impl Into<String>) -> Self {
        Self {
            result: ComparisonOutcome::Incompatible,
            difference: 0,
            compatible: false,
            breaking_changes: false,
            new_features: false,
            bug_fixes: false,
            explanation: explanation.into(),
        }
    }

    #[must_use]
    pub fn is_equal(&self) -> bool {
        self.result == ComparisonOutcome::Equal
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum BumpKind {
    Patch,
    Minor,
    Major,
    Prerelease,
}

impl FromStr for BumpKind {
    type Err = VersionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "major" => Ok(Self::Major),
            "minor" => Ok(Self::Minor),
            "patch" => Ok(Self::Patch),
            "prerelease" => Ok(Self::Prerelease),
            _ => Err(VersionError::InvalidBumpType(s.to_string())),
        }
    }
}

impl fmt::Display for BumpKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Major => "major",
            Self::Minor => "minor",
            Self::Patch => "patch",
            Self::Prerelease => "prerelease",
        };
        write!(f, "{s}")
    }
}

/// Signed delta between two unsigned components, saturating at the `i64` bounds.
pub(crate) fn signed_delta(a: u64, b: u64) -> i64 {
    let delta = i128::from(a) - i128::from(b);
    i64::try_from(delta).unwrap_or(if delta > 0 { i64::MAX } else { i64::MIN })
}
