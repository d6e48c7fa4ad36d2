use revdiff_core::ProjectSnapshot;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MetricDelta {
    pub old: f64,
    pub new: f64,
    pub difference: f64,
}

impl MetricDelta {
    #[must_use]
    pub fn new(old: f64, new: f64) -> Self {
        Self {
            old,
            new,
            difference: new - old,
        }
    }

    #[must_use]
    pub fn increased(&self) -> bool {
        self.difference > 0.0
    }

    #[must_use]
    pub fn decreased(&self) -> bool {
        self.difference < 0.0
    }
}

/// Complexity and quality movement from the old snapshot to the new one.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricDeltas {
    pub cyclomatic: MetricDelta,
    pub cognitive: MetricDelta,
    pub maintainability: MetricDelta,
    pub quality_score: MetricDelta,
    pub issue_count: MetricDelta,
}

impl MetricDeltas {
    pub(crate) fn between(old: &ProjectSnapshot, new: &ProjectSnapshot) -> Self {
        Self {
            cyclomatic: MetricDelta::new(old.complexity.cyclomatic, new.complexity.cyclomatic),
            cognitive: MetricDelta::new(old.complexity.cognitive, new.complexity.cognitive),
            maintainability: MetricDelta::new(
                old.complexity.maintainability,
                new.complexity.maintainability,
            ),
            quality_score: MetricDelta::new(old.quality.score, new.quality.score),
            issue_count: MetricDelta::new(
                old.quality.issues.len() as f64,
                new.quality.issues.len() as f64,
            ),
        }
    }
}
