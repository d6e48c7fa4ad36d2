use std::cmp::Ordering;
use std::fmt;
use std::sync::Arc;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::{Result, Strategy, StrategySpecific, VersionComparison, VersionError, VersionMetadata};

const NAME: &str = "custom";

pub type GenerateHook = Arc<dyn Fn(&VersionMetadata) -> Result<String> + Send + Sync>;
pub type ParseHook = Arc<dyn Fn(&str) -> Result<VersionMetadata> + Send + Sync>;
/// Returns `None` when the two versions cannot be ordered.
pub type CompareHook = Arc<dyn Fn(&str, &str) -> Option<Ordering> + Send + Sync>;
pub type ValidateHook = Arc<dyn Fn(&str) -> bool + Send + Sync>;

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct CustomConfig {
    pub pattern: String,
    pub properties: IndexMap<String, String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Placeholder(String),
}

/// Splits `{key}` placeholders from literal text. An unterminated `{` is literal.
fn segments(pattern: &str) -> Vec<Segment> {
    let mut out = Vec::new();
    let mut literal = String::new();
    let mut rest = pattern;

    while let Some(open) = rest.find('{') {
        let Some(close) = rest[open..].find('}') else {
            break;
        };
        literal.push_str(&rest[..open]);
        let key = &rest[open + 1..open + close];
        if key.is_empty() {
            literal.push_str("{}");
        } else {
            if !literal.is_empty() {
                out.push(Segment::Literal(std::mem::take(&mut literal)));
            }
            out.push(Segment::Placeholder(key.to_string()));
        }
        rest = &rest[open + close + 1..];
    }

    literal.push_str(rest);
    if !literal.is_empty() {
        out.push(Segment::Literal(literal));
    }
    out
}

/// Versions described by a caller-supplied pattern or caller-supplied hooks.
///
/// Each hook overrides one operation; operations without a hook fall back to
/// `{key}` substitution against the pattern, and comparison falls back to
/// lexicographic string order.
#[derive(Clone, Default)]
pub struct CustomStrategy {
    pattern: String,
    properties: IndexMap<String, String>,
    generate: Option<GenerateHook>,
    parse: Option<ParseHook>,
    compare: Option<CompareHook>,
    validate: Option<ValidateHook>,
}

impl fmt::Debug for CustomStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CustomStrategy")
            .field("pattern", &self.pattern)
            .field("properties", &self.properties)
            .field("generate_hook", &self.generate.is_some())
            .field("parse_hook", &self.parse.is_some())
            .field("compare_hook", &self.compare.is_some())
            .field("validate_hook", &self.validate.is_some())
            .finish()
    }
}

impl CustomStrategy {
    #[must_use]
    pub fn new(pattern: impl Into<String>) -> Self {
        Self {
            pattern: pattern.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn from_config(config: &CustomConfig) -> Self {
        Self {
            pattern: config.pattern.clone(),
            properties: config.properties.clone(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_property(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.properties.insert(key.into(), value.into());
        self
    }

    #[must_use]
    pub fn with_generate(
        mut self,
        hook: impl Fn(&VersionMetadata) -> Result<String> + Send + Sync + 'static,
    ) -> Self {
        self.generate = Some(Arc::new(hook));
        self
    }

    #[must_use]
    pub fn with_parse(
        mut self,
        hook: impl Fn(&str) -> Result<VersionMetadata> + Send + Sync + 'static,
    ) -> Self {
        self.parse = Some(Arc::new(hook));
        self
    }

    #[must_use]
    pub fn with_compare(
        mut self,
        hook: impl Fn(&str, &str) -> Option<Ordering> + Send + Sync + 'static,
    ) -> Self {
        self.compare = Some(Arc::new(hook));
        self
    }

    #[must_use]
    pub fn with_validate(mut self, hook: impl Fn(&str) -> bool + Send + Sync + 'static) -> Self {
        self.validate = Some(Arc::new(hook));
        self
    }

    #[must_use]
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    fn substitute(&self, metadata: &VersionMetadata) -> Result<String> {
        if self.pattern.is_empty() {
            return Err(VersionError::InvalidMetadata {
                reason: "custom strategy has neither a pattern nor a generate hook".to_string(),
            });
        }

        let empty = IndexMap::new();
        let values = match &metadata.strategy_specific {
            Some(StrategySpecific::Custom { values }) => values,
            None => &empty,
            Some(other) => {
                return Err(VersionError::InvalidMetadata {
                    reason: format!(
                        "expected custom values, found {} details",
                        other.variant_name()
                    ),
                });
            }
        };

        let mut out = String::new();
        for segment in segments(&self.pattern) {
            match segment {
                Segment::Literal(text) => out.push_str(&text),
                Segment::Placeholder(key) => {
                    let value = values
                        .get(&key)
                        .or_else(|| self.properties.get(&key))
                        .ok_or_else(|| VersionError::component(key.as_str(), "no value supplied"))?;
                    out.push_str(value);
                }
            }
        }
        Ok(out)
    }

    /// Matches `version` against the pattern and captures placeholder values.
    fn capture(&self, version: &str) -> Option<IndexMap<String, String>> {
        if self.pattern.is_empty() {
            return None;
        }

        let mut values = IndexMap::new();
        match_segments(&segments(&self.pattern), version, &mut values).then_some(values)
    }
}

/// Backtracking match of `rest` against `segments`. Placeholders try their
/// longest value first, so a literal that also occurs inside a value (`-` in
/// `my-app` for `{name}-{n}`) is taken from its last usable position.
fn match_segments(
    segments: &[Segment],
    rest: &str,
    values: &mut IndexMap<String, String>,
) -> bool {
    let Some((segment, tail)) = segments.split_first() else {
        return rest.is_empty();
    };

    match segment {
        Segment::Literal(text) => rest
            .strip_prefix(text.as_str())
            .is_some_and(|rest| match_segments(tail, rest, values)),
        Segment::Placeholder(key) => {
            if let Some(previous) = values.get(key).cloned() {
                return rest
                    .strip_prefix(previous.as_str())
                    .is_some_and(|rest| match_segments(tail, rest, values));
            }
            for end in (1..=rest.len()).rev().filter(|&end| rest.is_char_boundary(end)) {
                values.insert(key.clone(), rest[..end].to_string());
                if match_segments(tail, &rest[end..], values) {
                    return true;
                }
                values.shift_remove(key);
            }
            false
        }
    }
}

impl Strategy for CustomStrategy {
    fn generate_version(&self, metadata: &VersionMetadata) -> Result<String> {
        let version = match &self.generate {
            Some(hook) => hook(metadata)?,
            None => self.substitute(metadata)?,
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
        if let Some(hook) = &self.parse {
            return hook(version);
        }

        let values = self
            .capture(version)
            .ok_or_else(|| VersionError::format(version, NAME, "does not match the pattern"))?;
        Ok(VersionMetadata::new(
            version,
            StrategySpecific::Custom { values },
        ))
    }

    fn compare_versions(&self, a: &str, b: &str) -> Result<VersionComparison> {
        for version in [a, b] {
            if !self.is_valid_version(version) {
                return Err(VersionError::format(version, NAME, "rejected by the strategy"));
            }
        }

        match &self.compare {
            Some(hook) => Ok(match hook(a, b) {
                Some(ordering) => VersionComparison::ordered(
                    ordering,
                    ordering as i64,
                    format!("custom comparison ordered {a} {ordering:?} {b}"),
                ),
                None => VersionComparison::incompatible(format!(
                    "custom comparison cannot order {a} and {b}"
                )),
            }),
            None => {
                let ordering = a.cmp(b);
                Ok(VersionComparison::ordered(
                    ordering,
                    ordering as i64,
                    format!("lexicographic comparison ordered {a} {ordering:?} {b}"),
                ))
            }
        }
    }

    fn is_valid_version(&self, version: &str) -> bool {
        if let Some(hook) = &self.validate {
            return hook(version);
        }
        if let Some(hook) = &self.parse {
            return hook(version).is_ok();
        }
        self.capture(version).is_some()
    }

    fn strategy_name(&self) -> &'static str {
        NAME
    }
}
