use serde::{Deserialize, Serialize};

use crate::{
    BranchConfig, BranchStrategy, BumpKind, CustomConfig, CustomStrategy, Result,
    SemanticStrategy, TimestampConfig, TimestampStrategy, VersionComparison, VersionError,
    VersionMetadata,
};

/// The contract shared by every versioning strategy.
pub trait Strategy {
    /// # Errors
    ///
    /// Returns [`VersionError::MissingStrategyInfo`], [`VersionError::InvalidMetadata`]
    /// or [`VersionError::InvalidComponents`] for unusable metadata, and
    /// [`VersionError::InvalidGeneratedVersion`] if the result fails
    /// [`Strategy::is_valid_version`].
    fn generate_version(&self, metadata: &VersionMetadata) -> Result<String>;

    /// # Errors
    ///
    /// Returns [`VersionError::InvalidVersionFormat`] if `version` is malformed.
    fn parse_version(&self, version: &str) -> Result<VersionMetadata>;

    /// Orders `a` relative to `b`: `Greater` means `a` is the newer version.
    ///
    /// # Errors
    ///
    /// Returns [`VersionError::InvalidVersionFormat`] if either input is malformed.
    fn compare_versions(&self, a: &str, b: &str) -> Result<VersionComparison>;

    fn is_valid_version(&self, version: &str) -> bool;

    fn strategy_name(&self) -> &'static str;
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum StrategyConfig {
    #[default]
    Semantic,
    Timestamp(TimestampConfig),
    Custom(CustomConfig),
    Branch(BranchConfig),
}

/// Closed set of built-in strategies, selected by configuration.
#[derive(Debug, Clone)]
pub enum VersioningStrategy {
    Semantic(SemanticStrategy),
    Timestamp(TimestampStrategy),
    Custom(CustomStrategy),
    Branch(BranchStrategy),
}

impl Default for VersioningStrategy {
    fn default() -> Self {
        Self::Semantic(SemanticStrategy)
    }
}

impl VersioningStrategy {
    /// # Errors
    ///
    /// Returns [`VersionError::InvalidMetadata`] if the configuration cannot
    /// produce a working strategy.
    pub fn from_config(config: &StrategyConfig) -> Result<Self> {
        let strategy = match config {
            StrategyConfig::Semantic => Self::Semantic(SemanticStrategy),
            StrategyConfig::Timestamp(config) => Self::Timestamp(TimestampStrategy::new(config)?),
            StrategyConfig::Custom(config) => Self::Custom(CustomStrategy::from_config(config)),
            StrategyConfig::Branch(config) => Self::Branch(BranchStrategy::new(config)),
        };
        tracing::debug!(strategy = strategy.strategy_name(), "selected versioning strategy");
        Ok(strategy)
    }

    fn inner(&self) -> &dyn Strategy {
        match self {
            Self::Semantic(s) => s,
            Self::Timestamp(s) => s,
            Self::Custom(s) => s,
            Self::Branch(s) => s,
        }
    }

    /// Advances `version` to its successor. Semantic versions honour `kind`
    /// and `prerelease_id`; branch identifiers advance the build counter.
    ///
    /// # Errors
    ///
    /// Returns [`VersionError::UnsupportedOperation`] for strategies without
    /// a successor notion, otherwise the errors of the underlying strategy.
    pub fn bump(
        &self,
        version: &str,
        kind: BumpKind,
        prerelease_id: Option<&str>,
    ) -> Result<String> {
        match self {
            Self::Semantic(s) => s.bump(version, kind, prerelease_id),
            Self::Branch(s) => s.next_version(version),
            Self::Timestamp(_) | Self::Custom(_) => Err(VersionError::UnsupportedOperation {
                strategy: self.strategy_name(),
                operation: "bumping",
            }),
        }
    }
}

impl Strategy for VersioningStrategy {
    fn generate_version(&self, metadata: &VersionMetadata) -> Result<String> {
        self.inner().generate_version(metadata)
    }

    fn parse_version(&self, version: &str) -> Result<VersionMetadata> {
        self.inner().parse_version(version)
    }

    fn compare_versions(&self, a: &str, b: &str) -> Result<VersionComparison> {
        self.inner().compare_versions(a, b)
    }

    fn is_valid_version(&self, version: &str) -> bool {
        self.inner().is_valid_version(version)
    }

    fn strategy_name(&self) -> &'static str {
        self.inner().strategy_name()
    }
}
