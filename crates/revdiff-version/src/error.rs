use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VersionError {
    #[error("invalid version metadata: {reason}")]
    InvalidMetadata { reason: String },

    #[error("version metadata carries no {strategy} details")]
    MissingStrategyInfo { strategy: &'static str },

    #[error("invalid version component '{component}': {reason}")]
    InvalidComponents { component: String, reason: String },

    #[error("generated version '{version}' is not a valid {strategy} version")]
    InvalidGeneratedVersion {
        version: String,
        strategy: &'static str,
    },

    #[error("'{version}' is not a valid {strategy} version: {reason}")]
    InvalidVersionFormat {
        version: String,
        strategy: &'static str,
        reason: String,
    },

    #[error("unknown bump type '{0}' (expected major, minor, patch or prerelease)")]
    InvalidBumpType(String),

    #[error("the {strategy} strategy does not support {operation}")]
    UnsupportedOperation {
        strategy: &'static str,
        operation: &'static str,
    },
}

impl VersionError {
    pub(crate) fn format(
        version: &str,
        strategy: &'static str,
        reason: impl Into<String>,
    ) -> Self {
        Self::InvalidVersionFormat {
            version: version.to_string(),
            strategy,
            reason: reason.into(),
        }
    }

    pub(crate) fn component(component: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidComponents {
            component: component.into(),
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_format_error_includes_version_and_reason() {
        let err = VersionError::format("1.x", "semantic", "unexpected character");

        let msg = err.to_string();

        assert!(msg.contains("1.x"));
        assert!(msg.contains("semantic"));
        assert!(msg.contains("unexpected character"));
    }

    #[test]
    fn invalid_bump_type_lists_accepted_values() {
        let err = VersionError::InvalidBumpType("huge".to_string());

        assert!(err.to_string().contains("prerelease"));
    }
}
