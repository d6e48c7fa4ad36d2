use std::fmt;
use std::str::FromStr;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::CompareError;

/// Encoding of a rendered comparison report.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    Json,
    #[default]
    Markdown,
    Html,
}

impl ReportFormat {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Markdown => "markdown",
            Self::Html => "html",
        }
    }

    #[must_use]
    pub fn file_extension(self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Markdown => "md",
            Self::Html => "html",
        }
    }
}

impl FromStr for ReportFormat {
    type Err = CompareError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "markdown" | "md" => Ok(Self::Markdown),
            "html" => Ok(Self::Html),
            _ => Err(CompareError::InvalidFormat(s.to_string())),
        }
    }
}

impl fmt::Display for ReportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_names_case_insensitively() {
        assert_eq!("JSON".parse::<ReportFormat>().expect("json"), ReportFormat::Json);
        assert_eq!(" Html ".parse::<ReportFormat>().expect("html"), ReportFormat::Html);
        assert_eq!("md".parse::<ReportFormat>().expect("md"), ReportFormat::Markdown);
    }

    #[test]
    fn unknown_format_is_rejected() {
        let err = "pdf".parse::<ReportFormat>().expect_err("unsupported");

        assert!(matches!(err, CompareError::InvalidFormat(ref name) if name == "pdf"));
    }

    #[test]
    fn display_round_trips_through_parse() {
        for format in [ReportFormat::Json, ReportFormat::Markdown, ReportFormat::Html] {
            assert_eq!(format.to_string().parse::<ReportFormat>().expect("valid"), format);
        }
    }
}
