use crate::predicate::Operator;

#[test]
fn reverse_table() {
    let cases = [
        (Operator::Equal, Operator::Equal),
        (Operator::EqualNullSafe, Operator::EqualNullSafe),
        (Operator::NotEqual, Operator::NotEqual),
        (Operator::NotEqualNullSafe, Operator::NotEqualNullSafe),
        (Operator::SpatialIntersects, Operator::SpatialIntersects),
        (Operator::GreaterOrEqual, Operator::LessOrEqual),
        (Operator::Greater, Operator::Less),
        (Operator::LessOrEqual, Operator::GreaterOrEqual),
        (Operator::Less, Operator::Greater),
    ];

    for (op, expected) in cases {
        assert_eq!(op.reverse(), expected, "reverse of {op:?}");
    }
}

#[test]
fn negate_table_differs_from_reverse() {
    let cases = [
        (Operator::Equal, Operator::NotEqual),
        (Operator::EqualNullSafe, Operator::NotEqualNullSafe),
        (Operator::NotEqual, Operator::Equal),
        (Operator::NotEqualNullSafe, Operator::EqualNullSafe),
        (Operator::GreaterOrEqual, Operator::Less),
        (Operator::Greater, Operator::LessOrEqual),
        (Operator::LessOrEqual, Operator::Greater),
        (Operator::Less, Operator::GreaterOrEqual),
    ];

    for (op, expected) in cases {
        assert_eq!(op.negate(), expected, "negation of {op:?}");
        assert_ne!(op.negate(), op.reverse(), "{op:?}");
    }
}

#[test]
fn only_equality_admits_null_safety() {
    assert_eq!(Operator::Equal.null_safe(), Some(Operator::EqualNullSafe));
    assert_eq!(Operator::NotEqual.null_safe(), Some(Operator::NotEqualNullSafe));
    assert_eq!(Operator::Greater.null_safe(), None);
    assert_eq!(Operator::SpatialIntersects.null_safe(), None);

    let null_safe: Vec<_> = Operator::COMPARISONS
        .into_iter()
        .filter(|op| op.is_null_safe())
        .collect();
    assert_eq!(null_safe, [Operator::EqualNullSafe, Operator::NotEqualNullSafe]);
}

#[test]
fn inequalities_are_not_index_eligible() {
    for op in Operator::COMPARISONS {
        let expected = !matches!(op, Operator::NotEqual | Operator::NotEqualNullSafe);
        assert_eq!(op.is_index_eligible(), expected, "{op:?}");
    }
}

#[test]
fn sql_operator_text() {
    assert_eq!(Operator::EqualNullSafe.sql_operator(), "IS NOT DISTINCT FROM");
    assert_eq!(Operator::NotEqual.sql_operator(), "<>");
    assert_eq!(Operator::SpatialIntersects.sql_operator(), "&&");
}

#[test]
fn pseudo_operators_are_flagged() {
    assert!(Operator::AlwaysFalse.is_pseudo());
    assert!(Operator::InList.is_pseudo());
    assert!(Operator::InQuery.is_pseudo());
    assert!(Operator::COMPARISONS.iter().all(|op| !op.is_pseudo()));
}

#[test]
#[should_panic(expected = "has no reverse")]
fn reversing_a_pseudo_operator_panics() {
    let _ = Operator::InList.reverse();
}

#[test]
#[should_panic(expected = "has no complement")]
fn negating_spatial_intersects_panics() {
    let _ = Operator::SpatialIntersects.negate();
}

#[test]
#[should_panic(expected = "not a comparison operator")]
fn eligibility_of_a_pseudo_operator_panics() {
    let _ = Operator::AlwaysFalse.is_index_eligible();
}
