mod fusion;
mod op;
mod optimize;

use crate::{
    context::Session,
    expr::{Expr, TableAccessId},
    index::TableAccess,
    obs::{MetricsEvent, MetricsSink},
    value::ValueType,
};
use std::cell::RefCell;

// ---- fixtures ----------------------------------------------------------

fn users() -> TableAccess {
    TableAccess::new(TableAccessId::new(1), "USERS")
}

fn orders() -> TableAccess {
    TableAccess::new(TableAccessId::new(2), "ORDERS")
}

fn col(access: &TableAccess, name: &str, value_type: ValueType) -> Expr {
    Expr::column(access.column(name, value_type))
}

fn age() -> Expr {
    col(&users(), "AGE", ValueType::Int)
}

fn int(value: i32) -> Expr {
    Expr::constant(value)
}

fn session() -> Session {
    Session::default()
}

// Sink that keeps every event in arrival order.
#[derive(Default)]
struct RecordingSink {
    events: RefCell<Vec<MetricsEvent>>,
}

impl MetricsSink for RecordingSink {
    fn record(&self, event: MetricsEvent) {
        self.events.borrow_mut().push(event);
    }
}
