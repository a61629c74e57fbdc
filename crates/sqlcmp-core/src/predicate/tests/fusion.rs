use super::{age, col, int, orders, session, users};
use crate::{
    expr::Expr,
    obs::{metrics_report, metrics_reset_all},
    predicate::{Comparison, InList, Operator},
    value::{TriBool, ValueType},
};

fn eq(left: Expr, right: Expr) -> Comparison {
    Comparison::new(Operator::Equal, left, right)
}

fn user_id() -> Expr {
    col(&users(), "ID", ValueType::Int)
}

fn order_user() -> Expr {
    col(&orders(), "USER_ID", ValueType::Int)
}

fn sql(cmp: Option<Comparison>) -> Option<String> {
    cmp.map(|cmp| cmp.to_string())
}

// ---- transitive equality -----------------------------------------------

#[test]
fn shared_operand_yields_a_transitive_equality() {
    let a = eq(user_id(), order_user());
    let b = eq(user_id(), int(5));

    assert_eq!(
        sql(a.derive_transitive_equal(&b)),
        Some("(ORDERS.USER_ID = 5)".to_string())
    );
}

#[test]
fn shared_operand_may_sit_on_either_side() {
    let a = eq(order_user(), user_id());
    let b = eq(int(5), user_id());

    assert_eq!(
        sql(a.derive_transitive_equal(&b)),
        Some("(ORDERS.USER_ID = 5)".to_string())
    );

    let c = eq(int(1), age());
    let d = eq(age(), int(2));
    assert_eq!(c.derive_transitive_equal(&d), None);
}

#[test]
fn two_constants_are_never_paired() {
    let a = eq(age(), int(2));
    let b = eq(age(), int(3));

    assert_eq!(a.derive_transitive_equal(&b), None);
}

#[test]
fn transitive_equality_needs_plain_equalities() {
    let a = Comparison::new(Operator::Greater, user_id(), order_user());
    let b = eq(user_id(), int(5));
    assert_eq!(a.derive_transitive_equal(&b), None);
    assert_eq!(b.derive_transitive_equal(&a), None);

    let null_safe = Comparison::new(Operator::EqualNullSafe, user_id(), order_user());
    assert_eq!(null_safe.derive_transitive_equal(&b), None);

    let when = Comparison::when_operand(Operator::Equal, user_id(), order_user());
    assert_eq!(when.derive_transitive_equal(&b), None);
}

#[test]
fn shared_constant_links_two_columns() {
    let a = eq(user_id(), int(1));
    let b = eq(order_user(), int(1));

    assert_eq!(
        sql(a.derive_transitive_equal(&b)),
        Some("(USERS.ID = ORDERS.USER_ID)".to_string())
    );
    assert!(a.derive_membership(&b).is_none());
}

#[test]
fn unrelated_equalities_do_not_fuse() {
    let a = eq(user_id(), int(1));
    let b = eq(order_user(), int(2));

    assert_eq!(a.derive_transitive_equal(&b), None);
    assert!(a.derive_membership(&b).is_none());
}

// ---- membership --------------------------------------------------------

#[test]
fn disjoint_constants_become_an_in_list() {
    let a = eq(age(), int(1));
    let b = eq(age(), int(2));

    let list = a.derive_membership(&b).expect("same column, two constants");
    assert_eq!(list.to_string(), "(USERS.AGE IN(1, 2))");
}

#[test]
fn membership_matches_the_column_on_either_side() {
    let a = eq(int(1), age());
    let b = eq(age(), int(2));

    let list = a.derive_membership(&b).expect("column appears on both sides");
    assert_eq!(list.to_string(), "(USERS.AGE IN(1, 2))");
}

#[test]
fn membership_needs_constants() {
    let a = eq(age(), user_id());
    let b = eq(age(), int(2));

    assert!(a.derive_membership(&b).is_none());
}

#[test]
fn fused_lists_grow_and_evaluate() {
    let mut list = eq(age(), int(1))
        .derive_membership(&eq(age(), int(2)))
        .expect("membership");
    list.push_value(int(3));

    assert_eq!(list.values().len(), 3);
    assert_eq!(list.to_string(), "(USERS.AGE IN(1, 2, 3))");

    let lookup = InList::new(int(3), list.values().to_vec());
    assert_eq!(lookup.eval(&session()), Ok(TriBool::True));
}

#[test]
fn fusions_are_counted() {
    metrics_reset_all();

    let a = eq(user_id(), order_user());
    let b = eq(user_id(), int(5));
    let _ = a.derive_transitive_equal(&b);
    let _ = eq(age(), int(1)).derive_membership(&eq(age(), int(2)));

    let counters = metrics_report().counters;
    assert_eq!(counters.ops.transitive_equal_fusions, 1);
    assert_eq!(counters.ops.membership_fusions, 1);
}

// ---- equal partner -----------------------------------------------------

#[test]
fn equal_partner_returns_the_opposite_operand() {
    let cmp = eq(user_id(), order_user());

    assert_eq!(cmp.equal_partner(&user_id()), Some(&order_user()));
    assert_eq!(cmp.equal_partner(&order_user()), Some(&user_id()));
    assert_eq!(cmp.equal_partner(&age()), None);

    let ordered = Comparison::new(Operator::Less, user_id(), order_user());
    assert_eq!(ordered.equal_partner(&user_id()), None);
}
