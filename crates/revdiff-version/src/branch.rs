use serde::{Deserialize, Serialize};

use crate::metadata::signed_delta;
use crate::{Result, Strategy, StrategySpecific, VersionComparison, VersionError, VersionMetadata};

const NAME: &str = "branch";
const DEFAULT_SEPARATOR: &str = ".";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct BranchConfig {
    pub separator: String,
}

impl Default for BranchConfig {
    fn default() -> Self {
        Self {
            separator: DEFAULT_SEPARATOR.to_string(),
        }
    }
}

/// `{branch}{separator}{build}` identifiers, ordered only within one branch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BranchStrategy {
    separator: String,
}

impl Default for BranchStrategy {
    fn default() -> Self {
        Self::new(&BranchConfig::default())
    }
}

impl BranchStrategy {
    #[must_use]
    pub fn new(config: &BranchConfig) -> Self {
        let separator = if config.separator.is_empty() {
            DEFAULT_SEPARATOR.to_string()
        } else {
            config.separator.clone()
        };
        Self { separator }
    }

    #[must_use]
    pub fn version_for(&self, branch: &str, build: u64) -> String {
        format!("{branch}{}{build}", self.separator)
    }

    /// The identifier following `current` on the same branch.
    ///
    /// # Errors
    ///
    /// Returns [`VersionError::InvalidVersionFormat`] if `current` does not
    /// parse and [`VersionError::InvalidComponents`] if the counter overflows.
    pub fn next_version(&self, current: &str) -> Result<String> {
        let (branch, build) = self.split(current)?;
        let next = build
            .checked_add(1)
            .ok_or_else(|| VersionError::component("build", "overflows u64"))?;
        Ok(self.version_for(branch, next))
    }

    fn split<'a>(&self, version: &'a str) -> Result<(&'a str, u64)> {
        let (branch, build) = version
            .rsplit_once(self.separator.as_str())
            .ok_or_else(|| {
                VersionError::format(
                    version,
                    NAME,
                    format!("missing '{}' before the build counter", self.separator),
                )
            })?;

        if branch.is_empty() || branch.chars().any(char::is_whitespace) {
            return Err(VersionError::format(
                version,
                NAME,
                "branch name must be non-empty without whitespace",
            ));
        }
        if build.is_empty()
            || !build.bytes().all(|b| b.is_ascii_digit())
            || (build.len() > 1 && build.starts_with('0'))
        {
            return Err(VersionError::format(
                version,
                NAME,
                "build counter must be a number without leading zeros",
            ));
        }

        let build = build
            .parse()
            .map_err(|_| VersionError::format(version, NAME, "build counter out of range"))?;
        Ok((branch, build))
    }
}

impl Strategy for BranchStrategy {
    fn generate_version(&self, metadata: &VersionMetadata) -> Result<String> {
        let version = match &metadata.strategy_specific {
            Some(StrategySpecific::Branch { branch, build }) => self.version_for(branch, *build),
            Some(other) => {
                return Err(VersionError::InvalidMetadata {
                    reason: format!(
                        "expected branch details, found {} details",
                        other.variant_name()
                    ),
                });
            }
            None => return Err(VersionError::MissingStrategyInfo { strategy: NAME }),
        };

        if self.is_valid_version(&version) {
            Ok(version)
        } else {
            Err(VersionError::InvalidGeneratedVersion {
                version,
                strategy: NAME,
            })
        }
    }

    fn parse_version(&self, version: &str) -> Result<VersionMetadata> {
        let (branch, build) = self.split(version)?;
        Ok(VersionMetadata::new(
            version,
            StrategySpecific::Branch {
                branch: branch.to_string(),
                build,
            },
        )
        .with_tag(branch))
    }

    fn compare_versions(&self, a: &str, b: &str) -> Result<VersionComparison> {
        let (left_branch, left_build) = self.split(a)?;
        let (right_branch, right_build) = self.split(b)?;

        if left_branch != right_branch {
            return Ok(VersionComparison::incompatible(format!(
                "builds of different branches ('{left_branch}' and '{right_branch}') cannot be ordered"
            )));
        }

        let ordering = left_build.cmp(&right_build);
        Ok(VersionComparison::ordered(
            ordering,
            signed_delta(left_build, right_build),
            format!("build {left_build} vs build {right_build} on '{left_branch}'"),
        ))
    }

    fn is_valid_version(&self, version: &str) -> bool {
        self.split(version).is_ok()
    }

    fn strategy_name(&self) -> &'static str {
        NAME
    }
}
