use std::cmp::Ordering;

use semver::{BuildMetadata, Prerelease, Version};

use crate::metadata::signed_delta;
use crate::{
    BumpKind, Result, Strategy, StrategySpecific, VersionComparison, VersionError,
    VersionMetadata,
};

const NAME: &str = "semantic";
const DEFAULT_PRERELEASE: &str = "alpha";

/// `MAJOR.MINOR.PATCH[-PRERELEASE][+BUILD]` versions with SemVer 2.0 precedence.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SemanticStrategy;

impl SemanticStrategy {
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    fn parse(version: &str) -> Result<Version> {
        Version::parse(version).map_err(|e| VersionError::format(version, NAME, e.to_string()))
    }

    /// Produces the next version for `kind`. Build metadata never survives a bump.
    ///
    /// # Errors
    ///
    /// Returns [`VersionError::MissingStrategyInfo`] or
    /// [`VersionError::InvalidMetadata`] if `metadata` has no semantic
    /// components, [`VersionError::InvalidComponents`] on numeric overflow and
    /// [`VersionError::InvalidGeneratedVersion`] if the bumped version does not
    /// validate (for example an illegal prerelease identifier).
    pub fn bump_version(
        &self,
        metadata: &VersionMetadata,
        kind: BumpKind,
        prerelease_id: Option<&str>,
    ) -> Result<VersionMetadata> {
        let (major, minor, patch, prerelease) = match &metadata.strategy_specific {
            Some(StrategySpecific::Semantic {
                major,
                minor,
                patch,
                prerelease,
                ..
            }) => (*major, *minor, *patch, prerelease.as_deref()),
            Some(other) => {
                return Err(VersionError::InvalidMetadata {
                    reason: format!("cannot bump {} metadata semantically", other.variant_name()),
                });
            }
            None => return Err(VersionError::MissingStrategyInfo { strategy: NAME }),
        };

        let (major, minor, patch, prerelease) = match kind {
            BumpKind::Major => (increment(major, "major")?, 0, 0, None),
            BumpKind::Minor => (major, increment(minor, "minor")?, 0, None),
            BumpKind::Patch => (major, minor, increment(patch, "patch")?, None),
            BumpKind::Prerelease => {
                let next = match prerelease_id {
                    Some(id) => id.to_string(),
                    None => next_prerelease(prerelease)?,
                };
                (major, minor, increment(patch, "patch")?, Some(next))
            }
        };

        let candidate = match prerelease {
            Some(pre) => format!("{major}.{minor}.{patch}-{pre}"),
            None => format!("{major}.{minor}.{patch}"),
        };

        let mut bumped =
            self.parse_version(&candidate)
                .map_err(|_| VersionError::InvalidGeneratedVersion {
                    version: candidate.clone(),
                    strategy: NAME,
                })?;
        bumped.created_at = metadata.created_at;
        tracing::debug!(
            from = %metadata.version_string,
            to = %bumped.version_string,
            %kind,
            "bumped version"
        );
        Ok(bumped)
    }

    /// Convenience wrapper over [`SemanticStrategy::bump_version`] for plain strings.
    ///
    /// # Errors
    ///
    /// Returns [`VersionError::InvalidVersionFormat`] if `version` does not
    /// parse, otherwise the errors of [`SemanticStrategy::bump_version`].
    pub fn bump(
        &self,
        version: &str,
        kind: BumpKind,
        prerelease_id: Option<&str>,
    ) -> Result<String> {
        let metadata = self.parse_version(version)?;
        Ok(self.bump_version(&metadata, kind, prerelease_id)?.version_string)
    }
}

fn increment(value: u64, component: &str) -> Result<u64> {
    value
        .checked_add(1)
        .ok_or_else(|| VersionError::component(component, "overflows u64"))
}

/// Increments the trailing numeric identifier, or appends `.1` after a
/// non-numeric one, or starts a fresh `alpha` series.
fn next_prerelease(current: Option<&str>) -> Result<String> {
    let Some(current) = current.filter(|p| !p.is_empty()) else {
        return Ok(DEFAULT_PRERELEASE.to_string());
    };

    let (head, last) = match current.rsplit_once('.') {
        Some((head, last)) => (Some(head), last),
        None => (None, current),
    };

    if !last.is_empty() && last.bytes().all(|b| b.is_ascii_digit()) {
        let number: u64 = last
            .parse()
            .map_err(|_| VersionError::component(current, "prerelease number is out of range"))?;
        let next = increment(number, "prerelease")?;
        Ok(match head {
            Some(head) => format!("{head}.{next}"),
            None => next.to_string(),
        })
    } else {
        Ok(format!("{current}.1"))
    }
}

fn explain(a: &Version, b: &Version, ordering: Ordering) -> String {
    if a.major != b.major {
        format!("major version changed from {} to {}", b.major, a.major)
    } else if a.minor != b.minor {
        format!("minor version changed from {} to {}", b.minor, a.minor)
    } else if a.patch != b.patch {
        format!("patch version changed from {} to {}", b.patch, a.patch)
    } else if ordering != Ordering::Equal {
        let describe = |p: &Prerelease| {
            if p.is_empty() {
                "release".to_string()
            } else {
                format!("prerelease '{p}'")
            }
        };
        format!(
            "{} is {} than {}",
            describe(&a.pre),
            if ordering == Ordering::Greater {
                "newer"
            } else {
                "older"
            },
            describe(&b.pre)
        )
    } else if a.build == b.build {
        "versions are identical".to_string()
    } else {
        "versions differ only in build metadata".to_string()
    }
}

impl Strategy for SemanticStrategy {
    fn generate_version(&self, metadata: &VersionMetadata) -> Result<String> {
        let (major, minor, patch, prerelease, build) = match &metadata.strategy_specific {
            Some(StrategySpecific::Semantic {
                major,
                minor,
                patch,
                prerelease,
                build,
            }) => (*major, *minor, *patch, prerelease, build),
            Some(other) => {
                return Err(VersionError::InvalidMetadata {
                    reason: format!(
                        "expected semantic components, found {} details",
                        other.variant_name()
                    ),
                });
            }
            None => return Err(VersionError::MissingStrategyInfo { strategy: NAME }),
        };

        let pre = match prerelease.as_deref() {
            None => Prerelease::EMPTY,
            Some("") => return Err(VersionError::component("prerelease", "must not be empty")),
            Some(p) => Prerelease::new(p).map_err(|e| VersionError::component(p, e.to_string()))?,
        };
        let build = match build.as_deref() {
            None => BuildMetadata::EMPTY,
            Some("") => return Err(VersionError::component("build", "must not be empty")),
            Some(b) => {
                BuildMetadata::new(b).map_err(|e| VersionError::component(b, e.to_string()))?
            }
        };

        let version = Version {
            major,
            minor,
            patch,
            pre,
            build,
        }
        .to_string();

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
        let parsed = Self::parse(version)?;
        let tag = if parsed.pre.is_empty() {
            "stable"
        } else {
            "prerelease"
        };

        let specific = StrategySpecific::Semantic {
            major: parsed.major,
            minor: parsed.minor,
            patch: parsed.patch,
            prerelease: (!parsed.pre.is_empty()).then(|| parsed.pre.to_string()),
            build: (!parsed.build.is_empty()).then(|| parsed.build.to_string()),
        };

        Ok(VersionMetadata::new(parsed.to_string(), specific).with_tag(tag))
    }

    fn compare_versions(&self, a: &str, b: &str) -> Result<VersionComparison> {
        let left = Self::parse(a)?;
        let right = Self::parse(b)?;

        let ordering = left.cmp_precedence(&right);

        let difference = if left.major != right.major {
            signed_delta(left.major, right.major)
        } else if left.minor != right.minor {
            signed_delta(left.minor, right.minor)
        } else {
            signed_delta(left.patch, right.patch)
        };

        let major_changed = left.major != right.major;
        let zero_minor_changed = left.major == 0 && right.major == 0 && left.minor != right.minor;
        let breaking_changes = major_changed || zero_minor_changed;

        let mut comparison =
            VersionComparison::ordered(ordering, difference, explain(&left, &right, ordering));
        comparison.breaking_changes = breaking_changes;
        comparison.compatible = !breaking_changes;
        comparison.new_features = !breaking_changes && left.minor != right.minor;
        comparison.bug_fixes =
            !major_changed && left.minor == right.minor && left.patch != right.patch;
        Ok(comparison)
    }

    fn is_valid_version(&self, version: &str) -> bool {
        Version::parse(version).is_ok()
    }

    fn strategy_name(&self) -> &'static str {
        NAME
    }
}
