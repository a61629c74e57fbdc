use super::{RecordingSink, age, col, int, session, users};
use crate::{
    context::Session,
    error::CompileError,
    expr::{Constant, Expr},
    obs::{MetricsEvent, MetricsSink, with_metrics_sink},
    predicate::{Comparison, InList, NullTest, Operator},
    value::{Value, ValueType},
};
use sqlcmp_config::{EngineConfig, PredicateConfig};
use std::rc::Rc;

fn optimized(op: Operator, left: Expr, right: Expr) -> Expr {
    Comparison::new(op, left, right)
        .optimize(&session())
        .expect("comparison should optimize")
}

fn optimized_sql(op: Operator, left: Expr, right: Expr) -> String {
    optimized(op, left, right).sql()
}

// ---- folding -----------------------------------------------------------

#[test]
fn constant_comparisons_fold() {
    assert_eq!(optimized(Operator::Equal, int(5), int(3)), Expr::constant(false));
    assert_eq!(optimized(Operator::Greater, int(5), int(3)), Expr::constant(true));
    assert_eq!(optimized_sql(Operator::Equal, Expr::null(), int(5)), "UNKNOWN");
}

#[test]
fn nested_comparisons_fold_bottom_up() {
    let inner = Expr::compare(Operator::Greater, int(5), int(3));

    assert_eq!(
        optimized(Operator::Equal, inner, Expr::constant(true)),
        Expr::constant(true)
    );
}

#[test]
fn null_safe_constant_comparison_folds_to_a_definite_value() {
    assert_eq!(
        optimized(Operator::EqualNullSafe, Expr::null(), Expr::null()),
        Expr::constant(true)
    );
    assert_eq!(
        optimized(Operator::NotEqualNullSafe, Expr::null(), int(1)),
        Expr::constant(true)
    );
}

// ---- NULL constants ----------------------------------------------------

#[test]
fn null_constant_against_column_is_unknown() {
    for op in [Operator::Equal, Operator::Less, Operator::NotEqual] {
        assert_eq!(optimized(op, age(), Expr::null()), Expr::unknown(), "{op:?}");
        assert_eq!(optimized(op, Expr::null(), age()), Expr::unknown(), "{op:?}");
    }
}

#[test]
fn null_safe_null_comparison_becomes_a_null_test() {
    assert_eq!(
        optimized_sql(Operator::EqualNullSafe, age(), Expr::null()),
        "(USERS.AGE IS NULL)"
    );
    assert_eq!(
        optimized_sql(Operator::NotEqualNullSafe, Expr::null(), age()),
        "(USERS.AGE IS NOT NULL)"
    );
}

#[test]
fn null_safe_null_comparison_keeps_untyped_operands() {
    let expr = optimized(Operator::EqualNullSafe, Expr::parameter(1), Expr::null());

    assert_eq!(expr.sql(), "(?1 IS NOT DISTINCT FROM NULL)");
}

#[test]
fn null_constant_warning_does_not_change_the_result() {
    let config = EngineConfig {
        predicate: PredicateConfig {
            warn_on_null_constant: true,
        },
        ..EngineConfig::default()
    };
    let session = Session::new(config);

    let expr = Comparison::new(Operator::Equal, age(), Expr::null())
        .optimize(&session)
        .expect("comparison should optimize");

    assert_eq!(expr, Expr::unknown());
}

// ---- normalization -----------------------------------------------------

#[test]
fn column_moves_to_the_left_with_reversed_operator() {
    assert_eq!(optimized_sql(Operator::Greater, int(10), age()), "(USERS.AGE < 10)");
    assert_eq!(optimized_sql(Operator::LessOrEqual, int(10), age()), "(USERS.AGE >= 10)");
    assert_eq!(optimized_sql(Operator::Equal, int(10), age()), "(USERS.AGE = 10)");
}

#[test]
fn parameter_compared_with_column_takes_the_column_type() {
    let expr = optimized(Operator::Equal, Expr::parameter(1), age());

    assert_eq!(expr.sql(), "(USERS.AGE = ?1)");
    let Expr::Comparison(cmp) = &expr else {
        panic!("expected a comparison, got {expr:?}");
    };
    let Expr::Parameter(parameter) = cmp.right() else {
        panic!("expected a parameter operand");
    };
    assert_eq!(parameter.bound_type(), Some(ValueType::Int));
    assert_eq!(cmp.right().value_type(), ValueType::Int);
}

#[test]
fn two_columns_keep_their_order() {
    let min_age = col(&users(), "MIN_AGE", ValueType::Int);

    assert_eq!(
        optimized_sql(Operator::Greater, age(), min_age),
        "(USERS.AGE > USERS.MIN_AGE)"
    );
}

// ---- coercion ----------------------------------------------------------

#[test]
fn constant_is_coerced_to_the_column_type() {
    let expr = optimized(Operator::Equal, age(), Expr::constant("10"));

    assert_eq!(expr.sql(), "(USERS.AGE = 10)");
    let Expr::Comparison(cmp) = &expr else {
        panic!("expected a comparison, got {expr:?}");
    };
    assert_eq!(cmp.right().value_type(), ValueType::Int);
}

#[test]
fn constant_is_widened_to_a_wider_column_type() {
    let price = col(&users(), "BALANCE", ValueType::Double);
    let id = col(&users(), "ID", ValueType::BigInt);

    assert_eq!(
        optimized_sql(Operator::Less, price, int(5)),
        "(USERS.BALANCE < 5.0)"
    );
    let expr = optimized(Operator::Equal, id, int(7));
    assert_eq!(
        expr.subexpression(1).and_then(Expr::as_constant).map(Constant::value),
        Some(&Value::BigInt(7))
    );
}

#[test]
fn wider_constant_is_left_alone() {
    let expr = optimized(Operator::Less, age(), Expr::constant(2.5));

    assert_eq!(expr.sql(), "(USERS.AGE < 2.5)");
}

#[test]
fn inconvertible_constant_is_a_compile_error() {
    let err = Comparison::new(Operator::Equal, age(), Expr::constant("abc"))
        .optimize(&session())
        .expect_err("'abc' is not an integer");

    assert!(matches!(err, CompileError::Conversion(_)), "{err:?}");
}

#[test]
fn array_against_scalar_is_a_compile_error() {
    let array = Expr::constant(Value::Array(vec![Value::Int(1), Value::Int(2)]));
    let err = Comparison::new(Operator::Equal, age(), array)
        .optimize(&session())
        .expect_err("array and scalar do not compare");

    assert!(
        matches!(
            err,
            CompileError::ArrayScalarComparison {
                left: ValueType::Int,
                right: ValueType::Array,
            }
        ),
        "{err:?}"
    );
    assert_eq!(err.to_string(), "comparing array to scalar: INTEGER vs ARRAY");
}

// ---- when operand ------------------------------------------------------

#[test]
fn when_operand_is_never_rewritten() {
    let when = Comparison::when_operand(Operator::Greater, int(10), age());
    let expr = when
        .clone()
        .optimize(&session())
        .expect("when operand should optimize");

    assert_eq!(expr, when.into_expr());
}

// ---- idempotence -------------------------------------------------------

#[test]
fn optimizing_twice_changes_nothing() {
    let inputs = [
        Expr::compare(Operator::Greater, int(10), age()),
        Expr::compare(Operator::Equal, age(), Expr::constant("10")),
        Expr::compare(Operator::EqualNullSafe, Expr::null(), age()),
        Expr::compare(Operator::Equal, Expr::parameter(2), age()),
        Expr::compare(Operator::Less, int(1), int(2)),
    ];

    for input in inputs {
        let once = input.clone().optimize(&session()).expect("first pass");
        let twice = once.clone().optimize(&session()).expect("second pass");
        assert_eq!(once, twice, "{input}");
    }
}

// ---- metrics -----------------------------------------------------------

#[test]
fn optimizer_reports_swaps_to_the_active_sink() {
    let sink = Rc::new(RecordingSink::default());
    let shared: Rc<dyn MetricsSink> = sink.clone();

    with_metrics_sink(shared, || optimized(Operator::Greater, int(10), age()));

    assert_eq!(
        *sink.events.borrow(),
        [
            MetricsEvent::ComparisonOptimized {
                op: Operator::Greater
            },
            MetricsEvent::OperandsSwapped,
        ]
    );
}

#[test]
fn optimizer_reports_null_test_rewrites() {
    let sink = Rc::new(RecordingSink::default());
    let shared: Rc<dyn MetricsSink> = sink.clone();

    with_metrics_sink(shared, || {
        optimized(Operator::EqualNullSafe, age(), Expr::null())
    });

    assert!(sink.events.borrow().contains(&MetricsEvent::NullTestRewritten));
}

// ---- other nodes -------------------------------------------------------

#[test]
fn null_test_on_constant_folds() {
    let folded = NullTest::new(int(1), false)
        .optimize(&session())
        .expect("null test should optimize");
    assert_eq!(folded, Expr::constant(false));

    let folded = NullTest::new(Expr::null(), false)
        .optimize(&session())
        .expect("null test should optimize");
    assert_eq!(folded, Expr::constant(true));

    let kept = NullTest::new(age(), true)
        .optimize(&session())
        .expect("null test should optimize");
    assert_eq!(kept.sql(), "(USERS.AGE IS NOT NULL)");
}

#[test]
fn single_value_in_list_becomes_equality() {
    let expr = InList::new(age(), vec![Expr::constant("3")])
        .optimize(&session())
        .expect("in list should optimize");

    assert_eq!(expr.sql(), "(USERS.AGE = 3)");
}

#[test]
fn constant_in_lists_fold() {
    let hit = InList::new(int(2), vec![int(1), int(2)])
        .optimize(&session())
        .expect("in list should optimize");
    assert_eq!(hit, Expr::constant(true));

    let null_operand = InList::new(Expr::null(), vec![int(1), int(2)])
        .optimize(&session())
        .expect("in list should optimize");
    assert_eq!(null_operand, Expr::unknown());

    let kept = InList::new(age(), vec![int(1), int(2)])
        .optimize(&session())
        .expect("in list should optimize");
    assert_eq!(kept.sql(), "(USERS.AGE IN(1, 2))");
}

// ---- negation ----------------------------------------------------------

#[test]
fn negation_swaps_in_the_complementary_operator() {
    let cmp = Comparison::new(Operator::Greater, age(), int(10));
    let negated = cmp.negate().expect("ordering comparisons negate");

    assert_eq!(negated.op(), Operator::LessOrEqual);
    assert_eq!(negated.to_string(), "(USERS.AGE <= 10)");
    assert_eq!(negated.negate(), Some(cmp));
}

#[test]
fn spatial_and_when_operand_comparisons_do_not_negate() {
    let shape = col(&users(), "SHAPE", ValueType::Geometry);

    assert!(
        Comparison::new(Operator::SpatialIntersects, shape, Expr::constant("POINT (1 1)"))
            .negate()
            .is_none()
    );
    assert!(
        Comparison::when_operand(Operator::Equal, age(), int(1))
            .negate()
            .is_none()
    );
}
