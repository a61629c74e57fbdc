//! Observability: optimizer and index-derivation telemetry.
//!
//! Engine code records `MetricsEvent`s through the sink boundary and never
//! touches the counter state directly.

pub(crate) mod metrics;
pub(crate) mod sink;

// re-exports
pub use metrics::{EventOps, EventReport, EventState, OperatorSummary};
pub use sink::{
    FusionKind, IndexOutcome, MetricsEvent, MetricsSink, metrics_report, metrics_reset_all,
    with_metrics_sink,
};
