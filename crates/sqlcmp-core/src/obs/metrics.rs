use serde::{Deserialize, Serialize};
use std::{cell::RefCell, cmp::Ordering, collections::BTreeMap};

///
/// EventState
/// Ephemeral, in-memory counters for optimizer and index-derivation work.
///

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct EventState {
    pub ops: EventOps,
    /// Optimized comparisons keyed by operator name.
    pub operators: BTreeMap<String, u64>,
}

///
/// EventOps
///

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct EventOps {
    // Optimizer
    pub comparisons_optimized: u64,
    pub operand_swaps: u64,
    pub constant_coercions: u64,
    pub constant_folds: u64,
    pub null_propagations: u64,
    pub null_test_rewrites: u64,

    // Index derivation
    pub index_conditions_derived: u64,
    pub index_conditions_rejected: u64,

    // Fusion
    pub transitive_equal_fusions: u64,
    pub membership_fusions: u64,
}

thread_local! {
    static EVENT_STATE: RefCell<EventState> = RefCell::new(EventState::default());
}

/// Borrow metrics immutably.
pub(crate) fn with_state<R>(f: impl FnOnce(&EventState) -> R) -> R {
    EVENT_STATE.with(|m| f(&m.borrow()))
}

/// Borrow metrics mutably.
pub(crate) fn with_state_mut<R>(f: impl FnOnce(&mut EventState) -> R) -> R {
    EVENT_STATE.with(|m| f(&mut m.borrow_mut()))
}

/// Reset all counters.
pub(crate) fn reset_all() {
    with_state_mut(|m| *m = EventState::default());
}

///
/// EventReport
///

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct EventReport {
    pub counters: EventState,
    /// Per-operator share of optimized comparisons, busiest first.
    pub operator_counters: Vec<OperatorSummary>,
}

///
/// OperatorSummary
///

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct OperatorSummary {
    pub operator: String,
    pub optimized: u64,
    pub share: f64,
}

/// Build a report from the in-memory counters.
#[must_use]
#[expect(clippy::cast_precision_loss)]
pub(crate) fn report() -> EventReport {
    let snap = with_state(Clone::clone);
    let total = snap.ops.comparisons_optimized;

    let mut operator_counters: Vec<OperatorSummary> = snap
        .operators
        .iter()
        .map(|(operator, &optimized)| OperatorSummary {
            operator: operator.clone(),
            optimized,
            share: if total > 0 {
                optimized as f64 / total as f64
            } else {
                0.0
            },
        })
        .collect();

    operator_counters.sort_by(|a, b| match b.optimized.cmp(&a.optimized) {
        Ordering::Equal => a.operator.cmp(&b.operator),
        other => other,
    });

    EventReport {
        counters: snap,
        operator_counters,
    }
}

///
/// TESTS
///

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::*;

    #[test]
    fn reset_all_clears_state() {
        with_state_mut(|m| {
            m.ops.constant_folds = 3;
            m.ops.index_conditions_derived = 2;
            m.operators.insert("Equal".to_string(), 1);
        });

        reset_all();

        with_state(|m| {
            assert_eq!(m.ops, EventOps::default());
            assert!(m.operators.is_empty());
        });
    }

    #[test]
    fn report_sorts_operators_by_volume_then_name() {
        reset_all();
        with_state_mut(|m| {
            m.ops.comparisons_optimized = 8;
            m.operators.insert("Less".to_string(), 2);
            m.operators.insert("Equal".to_string(), 4);
            m.operators.insert("Greater".to_string(), 2);
        });

        let report = report();
        let names: Vec<_> = report
            .operator_counters
            .iter()
            .map(|s| s.operator.as_str())
            .collect();

        assert_eq!(names, ["Equal", "Greater", "Less"]);
        assert_eq!(report.operator_counters[0].share, 0.5);
        assert_eq!(report.operator_counters[2].share, 0.25);
    }

    #[test]
    fn report_serializes_to_json() {
        reset_all();
        with_state_mut(|m| {
            m.ops.comparisons_optimized = 1;
            m.operators.insert("Equal".to_string(), 1);
        });

        let json = serde_json::to_value(report()).expect("report should serialize");

        assert_eq!(json["counters"]["ops"]["comparisons_optimized"], 1);
        assert_eq!(json["operator_counters"][0]["operator"], "Equal");
        assert_eq!(json["operator_counters"][0]["share"], 1.0);
    }
}
