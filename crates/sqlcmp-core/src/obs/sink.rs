//! Metrics sink boundary.
//!
//! Predicate and index code MUST NOT depend on obs::metrics directly.
//! All instrumentation flows through MetricsEvent and MetricsSink.
use crate::{obs::metrics, predicate::Operator};
use std::{cell::RefCell, rc::Rc};

thread_local! {
    static SINK_OVERRIDE: RefCell<Option<Rc<dyn MetricsSink>>> = RefCell::new(None);
}

///
/// IndexOutcome
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum IndexOutcome {
    Derived,
    Rejected,
}

///
/// FusionKind
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum FusionKind {
    TransitiveEqual,
    Membership,
}

///
/// MetricsEvent
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum MetricsEvent {
    ComparisonOptimized { op: Operator },
    OperandsSwapped,
    ConstantCoerced,
    ConstantFolded,
    NullPropagated,
    NullTestRewritten,
    IndexCondition { outcome: IndexOutcome },
    Fusion { kind: FusionKind },
}

///
/// MetricsSink
///

pub trait MetricsSink {
    fn record(&self, event: MetricsEvent);
}

/// GlobalMetricsSink
/// Default sink writing into the thread-local counter state.
/// Used whenever no scoped override is installed.

pub(crate) struct GlobalMetricsSink;

impl MetricsSink for GlobalMetricsSink {
    fn record(&self, event: MetricsEvent) {
        metrics::with_state_mut(|m| match event {
            MetricsEvent::ComparisonOptimized { op } => {
                m.ops.comparisons_optimized = m.ops.comparisons_optimized.saturating_add(1);
                let entry = m.operators.entry(format!("{op:?}")).or_default();
                *entry = entry.saturating_add(1);
            }
            MetricsEvent::OperandsSwapped => {
                m.ops.operand_swaps = m.ops.operand_swaps.saturating_add(1);
            }
            MetricsEvent::ConstantCoerced => {
                m.ops.constant_coercions = m.ops.constant_coercions.saturating_add(1);
            }
            MetricsEvent::ConstantFolded => {
                m.ops.constant_folds = m.ops.constant_folds.saturating_add(1);
            }
            MetricsEvent::NullPropagated => {
                m.ops.null_propagations = m.ops.null_propagations.saturating_add(1);
            }
            MetricsEvent::NullTestRewritten => {
                m.ops.null_test_rewrites = m.ops.null_test_rewrites.saturating_add(1);
            }
            MetricsEvent::IndexCondition { outcome } => match outcome {
                IndexOutcome::Derived => {
                    m.ops.index_conditions_derived =
                        m.ops.index_conditions_derived.saturating_add(1);
                }
                IndexOutcome::Rejected => {
                    m.ops.index_conditions_rejected =
                        m.ops.index_conditions_rejected.saturating_add(1);
                }
            },
            MetricsEvent::Fusion { kind } => match kind {
                FusionKind::TransitiveEqual => {
                    m.ops.transitive_equal_fusions =
                        m.ops.transitive_equal_fusions.saturating_add(1);
                }
                FusionKind::Membership => {
                    m.ops.membership_fusions = m.ops.membership_fusions.saturating_add(1);
                }
            },
        });
    }
}

pub(crate) const GLOBAL_METRICS_SINK: GlobalMetricsSink = GlobalMetricsSink;

pub(crate) fn record(event: MetricsEvent) {
    let sink = SINK_OVERRIDE.with(|cell| cell.borrow().clone());
    match sink {
        Some(sink) => sink.record(event),
        None => GLOBAL_METRICS_SINK.record(event),
    }
}

/// Snapshot the current metrics state.
#[must_use]
pub fn metrics_report() -> metrics::EventReport {
    metrics::report()
}

/// Reset all metrics state.
pub fn metrics_reset_all() {
    metrics::reset_all();
}

/// Run a closure with a temporary metrics sink override.
///
/// The previous override is restored on every exit, including unwinding.
pub fn with_metrics_sink<T>(sink: Rc<dyn MetricsSink>, f: impl FnOnce() -> T) -> T {
    struct Guard(Option<Rc<dyn MetricsSink>>);

    impl Drop for Guard {
        fn drop(&mut self) {
            let prev = self.0.take();
            SINK_OVERRIDE.with(|cell| {
                *cell.borrow_mut() = prev;
            });
        }
    }

    let prev = SINK_OVERRIDE.with(|cell| cell.borrow_mut().replace(sink));
    let _guard = Guard(prev);

    f()
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;
    use std::{
        cell::Cell,
        panic::{AssertUnwindSafe, catch_unwind},
    };

    #[derive(Default)]
    struct CountingSink {
        calls: Cell<usize>,
    }

    impl MetricsSink for CountingSink {
        fn record(&self, _: MetricsEvent) {
            self.calls.set(self.calls.get() + 1);
        }
    }

    fn clear_override() {
        SINK_OVERRIDE.with(|cell| {
            *cell.borrow_mut() = None;
        });
    }

    #[test]
    fn with_metrics_sink_routes_and_restores_nested_overrides() {
        clear_override();
        metrics_reset_all();

        let outer = Rc::new(CountingSink::default());
        let inner = Rc::new(CountingSink::default());

        record(MetricsEvent::OperandsSwapped);
        assert_eq!(outer.calls.get(), 0);

        with_metrics_sink(outer.clone(), || {
            record(MetricsEvent::ConstantFolded);
            assert_eq!(outer.calls.get(), 1);

            with_metrics_sink(inner.clone(), || {
                record(MetricsEvent::NullPropagated);
            });

            // Inner override was restored to outer override.
            record(MetricsEvent::NullTestRewritten);
        });

        assert_eq!(outer.calls.get(), 2);
        assert_eq!(inner.calls.get(), 1);
        SINK_OVERRIDE.with(|cell| assert!(cell.borrow().is_none()));

        // Only the event recorded before any override reached the global state.
        let ops = metrics_report().counters.ops;
        assert_eq!(ops.operand_swaps, 1);
        assert_eq!(ops.constant_folds, 0);
    }

    #[test]
    fn with_metrics_sink_restores_override_on_panic() {
        clear_override();

        let sink = Rc::new(CountingSink::default());
        let panicked = catch_unwind(AssertUnwindSafe(|| {
            with_metrics_sink(sink.clone(), || {
                record(MetricsEvent::ConstantCoerced);
                panic!("intentional panic for guard test");
            });
        }))
        .is_err();

        assert!(panicked);
        assert_eq!(sink.calls.get(), 1);
        SINK_OVERRIDE.with(|cell| assert!(cell.borrow().is_none()));

        record(MetricsEvent::ConstantCoerced);
        assert_eq!(sink.calls.get(), 1);
    }

    #[test]
    fn global_sink_counts_operators_and_outcomes() {
        clear_override();
        metrics_reset_all();

        record(MetricsEvent::ComparisonOptimized {
            op: Operator::Equal,
        });
        record(MetricsEvent::ComparisonOptimized { op: Operator::Less });
        record(MetricsEvent::ComparisonOptimized {
            op: Operator::Equal,
        });
        record(MetricsEvent::IndexCondition {
            outcome: IndexOutcome::Rejected,
        });
        record(MetricsEvent::Fusion {
            kind: FusionKind::Membership,
        });

        let report = metrics_report();
        assert_eq!(report.counters.ops.comparisons_optimized, 3);
        assert_eq!(report.counters.ops.index_conditions_rejected, 1);
        assert_eq!(report.counters.ops.membership_fusions, 1);
        assert_eq!(report.operator_counters[0].operator, "Equal");
        assert_eq!(report.operator_counters[0].optimized, 2);
    }
}
