use std::fmt::Write as _;

use chrono::{
    DateTime, Datelike, FixedOffset, NaiveDate, NaiveDateTime, Offset, SecondsFormat, TimeZone,
    Timelike, Utc,
};
use serde::{Deserialize, Serialize};

use crate::{Result, Strategy, StrategySpecific, VersionComparison, VersionError, VersionMetadata};

const NAME: &str = "timestamp";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TimestampFormat {
    /// Fixed-width digit run, e.g. `20240315103000`.
    #[default]
    Sortable,
    /// Unix time, in seconds or in milli/microseconds for sub-second precision.
    Epoch,
    /// `2024-03-15 10:30:00`.
    Readable,
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "kebab-case")]
pub enum Precision {
    Day,
    Hour,
    Minute,
    #[default]
    Second,
    Millisecond,
    Microsecond,
}

impl Precision {
    fn digit_count(self) -> usize {
        match self {
            Self::Day => 8,
            Self::Hour => 10,
            Self::Minute => 12,
            Self::Second => 14,
            Self::Millisecond => 17,
            Self::Microsecond => 20,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct TimestampConfig {
    pub format: TimestampFormat,
    pub precision: Precision,
    pub prefix: String,
    pub suffix: String,
    pub utc_offset_seconds: i32,
}

/// Versions derived from a moment in time, truncated to a configured precision.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimestampStrategy {
    format: TimestampFormat,
    precision: Precision,
    prefix: String,
    suffix: String,
    offset: FixedOffset,
}

impl Default for TimestampStrategy {
    fn default() -> Self {
        Self {
            format: TimestampFormat::default(),
            precision: Precision::default(),
            prefix: String::new(),
            suffix: String::new(),
            offset: Utc.fix(),
        }
    }
}

impl TimestampStrategy {
    /// # Errors
    ///
    /// Returns [`VersionError::InvalidMetadata`] if the UTC offset is outside
    /// of +/- 24 hours.
    pub fn new(config: &TimestampConfig) -> Result<Self> {
        let offset = FixedOffset::east_opt(config.utc_offset_seconds).ok_or_else(|| {
            VersionError::InvalidMetadata {
                reason: format!(
                    "utc offset of {} seconds is out of range",
                    config.utc_offset_seconds
                ),
            }
        })?;

        Ok(Self {
            format: config.format,
            precision: config.precision,
            prefix: config.prefix.clone(),
            suffix: config.suffix.clone(),
            offset,
        })
    }

    #[must_use]
    pub fn with_format(mut self, format: TimestampFormat, precision: Precision) -> Self {
        self.format = format;
        self.precision = precision;
        self
    }

    #[must_use]
    pub fn with_affixes(mut self, prefix: impl Into<String>, suffix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self.suffix = suffix.into();
        self
    }

    /// # Errors
    ///
    /// Returns [`VersionError::InvalidComponents`] if the moment cannot be
    /// encoded, for example a year outside `0..=9999`.
    pub fn version_at(&self, moment: DateTime<Utc>) -> Result<String> {
        let local = self.truncate(moment.with_timezone(&self.offset).naive_local())?;
        if !(0..=9999).contains(&local.year()) {
            return Err(VersionError::component(
                "year",
                format!("{} is outside 0..=9999", local.year()),
            ));
        }

        let body = match self.format {
            TimestampFormat::Sortable => self.render_fields(&local, "", "", "", ""),
            TimestampFormat::Readable => self.render_fields(&local, "-", " ", ":", "."),
            TimestampFormat::Epoch => {
                let utc = self.to_utc(local)?;
                match self.precision {
                    Precision::Millisecond => utc.timestamp_millis().to_string(),
                    Precision::Microsecond => utc.timestamp_micros().to_string(),
                    _ => utc.timestamp().to_string(),
                }
            }
        };

        Ok(format!("{}{body}{}", self.prefix, self.suffix))
    }

    /// # Errors
    ///
    /// See [`TimestampStrategy::version_at`].
    pub fn current_version(&self) -> Result<String> {
        self.version_at(Utc::now())
    }

    fn truncate(&self, naive: NaiveDateTime) -> Result<NaiveDateTime> {
        let micros = naive.nanosecond() / 1_000;
        let (hour, minute, second, micro) = match self.precision {
            Precision::Day => (0, 0, 0, 0),
            Precision::Hour => (naive.hour(), 0, 0, 0),
            Precision::Minute => (naive.hour(), naive.minute(), 0, 0),
            Precision::Second => (naive.hour(), naive.minute(), naive.second(), 0),
            Precision::Millisecond => (
                naive.hour(),
                naive.minute(),
                naive.second(),
                micros / 1_000 * 1_000,
            ),
            Precision::Microsecond => (naive.hour(), naive.minute(), naive.second(), micros),
        };

        naive
            .date()
            .and_hms_micro_opt(hour, minute, second, micro)
            .ok_or_else(|| VersionError::component("time", "cannot truncate leap second"))
    }

    fn to_utc(&self, local: NaiveDateTime) -> Result<DateTime<Utc>> {
        self.offset
            .from_local_datetime(&local)
            .single()
            .map(|dt| dt.with_timezone(&Utc))
            .ok_or_else(|| VersionError::component("time", "ambiguous local time"))
    }

    fn render_fields(
        &self,
        local: &NaiveDateTime,
        date_sep: &str,
        date_time_sep: &str,
        time_sep: &str,
        fraction_sep: &str,
    ) -> String {
        let mut out = format!(
            "{:04}{date_sep}{:02}{date_sep}{:02}",
            local.year(),
            local.month(),
            local.day()
        );
        if self.precision >= Precision::Hour {
            let _ = write!(out, "{date_time_sep}{:02}", local.hour());
        }
        if self.precision >= Precision::Minute {
            let _ = write!(out, "{time_sep}{:02}", local.minute());
        }
        if self.precision >= Precision::Second {
            let _ = write!(out, "{time_sep}{:02}", local.second());
        }
        let micros = local.nanosecond() / 1_000;
        match self.precision {
            Precision::Millisecond => {
                let _ = write!(out, "{fraction_sep}{:03}", micros / 1_000);
            }
            Precision::Microsecond => {
                let _ = write!(out, "{fraction_sep}{micros:06}");
            }
            _ => {}
        }
        out
    }

    /// Decodes `version` back to the moment it encodes. Only the canonical
    /// encoding is accepted, so decoding and re-encoding is lossless.
    fn decode(&self, version: &str) -> Result<DateTime<Utc>> {
        let body = version
            .strip_prefix(self.prefix.as_str())
            .and_then(|rest| rest.strip_suffix(self.suffix.as_str()))
            .ok_or_else(|| {
                VersionError::format(version, NAME, "missing configured prefix or suffix")
            })?;

        let moment = match self.format {
            TimestampFormat::Epoch => self.decode_epoch(version, body)?,
            TimestampFormat::Sortable | TimestampFormat::Readable => {
                self.decode_fields(version, body)?
            }
        };

        let canonical = self
            .version_at(moment)
            .map_err(|e| VersionError::format(version, NAME, e.to_string()))?;
        if canonical != version {
            return Err(VersionError::format(
                version,
                NAME,
                "not in canonical form for the configured format and precision",
            ));
        }
        Ok(moment)
    }

    fn decode_epoch(&self, version: &str, body: &str) -> Result<DateTime<Utc>> {
        let value: i64 = body
            .parse()
            .map_err(|_| VersionError::format(version, NAME, "expected an integer epoch"))?;

        let moment = match self.precision {
            Precision::Millisecond => DateTime::from_timestamp_millis(value),
            Precision::Microsecond => DateTime::from_timestamp_micros(value),
            _ => DateTime::from_timestamp(value, 0),
        };
        moment.ok_or_else(|| VersionError::format(version, NAME, "epoch out of range"))
    }

    fn decode_fields(&self, version: &str, body: &str) -> Result<DateTime<Utc>> {
        let digits: String = body.chars().filter(char::is_ascii_digit).collect();
        if digits.len() != self.precision.digit_count() {
            return Err(VersionError::format(
                version,
                NAME,
                format!(
                    "expected {} digits, found {}",
                    self.precision.digit_count(),
                    digits.len()
                ),
            ));
        }

        let field = |start: usize, end: usize| -> Result<u32> {
            digits
                .get(start..end)
                .map_or(Ok(0), |s| s.parse::<u32>())
                .map_err(|_| VersionError::format(version, NAME, "non-numeric field"))
        };

        let year = i32::try_from(field(0, 4)?)
            .map_err(|_| VersionError::format(version, NAME, "year out of range"))?;
        let date = NaiveDate::from_ymd_opt(year, field(4, 6)?, field(6, 8)?)
            .ok_or_else(|| VersionError::format(version, NAME, "invalid calendar date"))?;

        let fraction = match self.precision {
            Precision::Millisecond => field(14, 17)? * 1_000,
            Precision::Microsecond => field(14, 20)?,
            _ => 0,
        };
        let local = date
            .and_hms_micro_opt(field(8, 10)?, field(10, 12)?, field(12, 14)?, fraction)
            .ok_or_else(|| VersionError::format(version, NAME, "invalid time of day"))?;

        self.to_utc(local)
            .map_err(|_| VersionError::format(version, NAME, "unrepresentable local time"))
    }

    fn metadata_for(&self, version: &str, moment: DateTime<Utc>) -> VersionMetadata {
        let local = moment.with_timezone(&self.offset).naive_local();
        let readable = self.render_fields(&local, "-", " ", ":", ".");
        let specific = StrategySpecific::Timestamp {
            iso: moment.to_rfc3339_opts(SecondsFormat::Micros, true),
            unix_seconds: moment.timestamp(),
            readable,
            timezone: self.offset.to_string(),
        };

        let mut metadata = VersionMetadata::new(version, specific);
        metadata.created_at = Some(moment);
        metadata
    }
}

impl Strategy for TimestampStrategy {
    fn generate_version(&self, metadata: &VersionMetadata) -> Result<String> {
        let moment = match &metadata.strategy_specific {
            Some(StrategySpecific::Timestamp {
                iso, unix_seconds, ..
            }) => {
                if iso.is_empty() {
                    DateTime::from_timestamp(*unix_seconds, 0).ok_or_else(|| {
                        VersionError::component("unixSeconds", "out of range")
                    })?
                } else {
                    DateTime::parse_from_rfc3339(iso)
                        .map_err(|e| VersionError::component(iso.as_str(), e.to_string()))?
                        .with_timezone(&Utc)
                }
            }
            Some(other) => {
                return Err(VersionError::InvalidMetadata {
                    reason: format!(
                        "expected timestamp details, found {} details",
                        other.variant_name()
                    ),
                });
            }
            None => return Err(VersionError::MissingStrategyInfo { strategy: NAME }),
        };

        let version = self.version_at(moment)?;
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
        let moment = self.decode(version)?;
        Ok(self.metadata_for(version, moment))
    }

    fn compare_versions(&self, a: &str, b: &str) -> Result<VersionComparison> {
        let left = self.decode(a)?;
        let right = self.decode(b)?;

        let ordering = left.timestamp_micros().cmp(&right.timestamp_micros());
        let seconds = left.timestamp() - right.timestamp();
        let explanation = match ordering {
            std::cmp::Ordering::Equal => "timestamps are identical".to_string(),
            std::cmp::Ordering::Greater => format!("{a} is {seconds} second(s) newer than {b}"),
            std::cmp::Ordering::Less => format!("{a} is {} second(s) older than {b}", -seconds),
        };

        Ok(VersionComparison::ordered(ordering, seconds, explanation))
    }

    fn is_valid_version(&self, version: &str) -> bool {
        self.decode(version).is_ok()
    }

    fn strategy_name(&self) -> &'static str {
        NAME
    }
}
