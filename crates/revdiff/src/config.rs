use std::path::{Path, PathBuf};

use revdiff_compare::ReportFormat;
use revdiff_diff::DiffOptions;
use revdiff_version::StrategyConfig;
use serde::{Deserialize, Serialize};

use crate::error::{CliError, Result};

pub(crate) const CONFIG_FILE: &str = "revdiff.toml";

/// Contents of `revdiff.toml`. Every section is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", default, deny_unknown_fields)]
pub(crate) struct Config {
    pub strategy: StrategyConfig,
    pub diff: DiffOptions,
    pub report: ReportConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub(crate) struct ReportConfig {
    pub format: ReportFormat,
}

impl Config {
    /// Reads `explicit` if given, otherwise `revdiff.toml` in `dir` when it
    /// exists, otherwise the defaults.
    pub(crate) fn load(explicit: Option<&Path>, dir: &Path) -> Result<Self> {
        let path = match explicit {
            Some(path) => path.to_path_buf(),
            None => {
                let candidate = dir.join(CONFIG_FILE);
                if !candidate.is_file() {
                    tracing::debug!(dir = %dir.display(), "no config file, using defaults");
                    return Ok(Self::default());
                }
                candidate
            }
        };
        Self::read(path)
    }

    fn read(path: PathBuf) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(|source| CliError::Read {
            path: path.clone(),
            source,
        })?;
        let config = Self::parse(&content).map_err(|source| CliError::ConfigParse {
            path: path.clone(),
            source,
        })?;
        tracing::debug!(path = %path.display(), "loaded config");
        Ok(config)
    }

    fn parse(content: &str) -> std::result::Result<Self, toml::de::Error> {
        toml::from_str(content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use revdiff_diff::{DiffFormat, HunkAlgorithm};
    use revdiff_version::{BranchConfig, Precision, TimestampFormat};

    #[test]
    fn empty_file_gives_defaults() {
        let config = Config::parse("").expect("parses");

        assert_eq!(config, Config::default());
        assert_eq!(config.strategy, StrategyConfig::Semantic);
        assert_eq!(config.report.format, ReportFormat::Markdown);
        assert_eq!(config.diff.context_lines, 3);
    }

    #[test]
    fn all_sections() {
        let config = Config::parse(
            r#"
[strategy]
kind = "branch"
separator = "-"

[diff]
context-lines = 5
algorithm = "lcs"
format = "side-by-side"
side-by-side-width = 120

[report]
format = "html"
"#,
        )
        .expect("parses");

        assert_eq!(
            config.strategy,
            StrategyConfig::Branch(BranchConfig {
                separator: "-".to_string()
            })
        );
        assert_eq!(config.diff.context_lines, 5);
        assert_eq!(config.diff.algorithm, HunkAlgorithm::Lcs);
        assert_eq!(config.diff.format, DiffFormat::SideBySide);
        assert_eq!(config.diff.side_by_side_width, 120);
        assert_eq!(config.report.format, ReportFormat::Html);
    }

    #[test]
    fn timestamp_strategy_section() {
        let config = Config::parse(
            r#"
[strategy]
kind = "timestamp"
format = "epoch"
precision = "minute"
"#,
        )
        .expect("parses");

        let StrategyConfig::Timestamp(timestamp) = config.strategy else {
            panic!("expected timestamp strategy");
        };
        assert_eq!(timestamp.format, TimestampFormat::Epoch);
        assert_eq!(timestamp.precision, Precision::Minute);
    }

    #[test]
    fn unknown_section_is_rejected() {
        assert!(Config::parse("[output]\nformat = \"json\"\n").is_err());
    }

    #[test]
    fn missing_default_file_is_not_an_error() {
        let dir = std::env::temp_dir().join("revdiff-config-test-missing");

        let config = Config::load(None, &dir).expect("defaults");

        assert_eq!(config, Config::default());
    }
}
