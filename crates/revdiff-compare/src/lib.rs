//! Snapshot comparison and report rendering.
//!
//! [`ComparisonAggregator`] combines change detection, line diffs, API symbol
//! changes, metric deltas and a version-label comparison into one
//! [`ComparisonResult`]. The serializers in this crate only read that value.

mod aggregator;
mod api;
mod error;
mod format;
mod metrics;
mod result;
mod serialize;

pub use aggregator::ComparisonAggregator;
pub use api::ApiChange;
pub use error::CompareError;
pub use format::ReportFormat;
pub use metrics::{MetricDelta, MetricDeltas};
pub use result::{ComparisonResult, RenderedReport, ReportMetadata};
pub use serialize::{
    HtmlSerializer, JsonSerializer, MarkdownSerializer, ReportSerializer, serialize,
};

pub type Result<T> = std::result::Result<T, CompareError>;
