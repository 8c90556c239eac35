use floorplan_geom::core::{
    tolerance::*,
    traits::{FuzzyEq, FuzzyOrd},
};

#[test]
fn band_edges() {
    assert!(nearly_equal(1.0, 1.0 + 0.5e-6, EQUAL_TOLERANCE));
    assert!(!nearly_equal(1.0, 1.0 + 2e-6, EQUAL_TOLERANCE));
    assert!(is_zero(-0.5e-6, EQUAL_TOLERANCE));
    assert!(!is_zero(1e-3, EQUAL_TOLERANCE));
}

#[test]
fn strict_and_inclusive_orderings() {
    let tol = 0.1;
    assert!(larger(1.2, 1.0, tol));
    assert!(!larger(1.05, 1.0, tol));
    assert!(smaller(0.8, 1.0, tol));
    assert!(!smaller(0.95, 1.0, tol));
    assert!(larger_or_equal(0.95, 1.0, tol));
    assert!(!larger_or_equal(0.8, 1.0, tol));
    assert!(smaller_or_equal(1.05, 1.0, tol));
    assert!(!smaller_or_equal(1.2, 1.0, tol));
}

#[test]
fn range_bounds() {
    let tol = 1e-3;
    assert!(is_in_range(0.0, 0.0, 1.0, false, false, tol));
    assert!(is_in_range(-0.0005, 0.0, 1.0, false, false, tol));
    assert!(!is_in_range(0.0, 0.0, 1.0, true, false, tol));
    assert!(!is_in_range(1.0, 0.0, 1.0, false, true, tol));
    assert!(is_in_range(0.5, 0.0, 1.0, true, true, tol));
    assert!(!is_in_range(1.5, 0.0, 1.0, false, false, tol));
}

#[test]
fn nan_is_never_equal_or_ordered() {
    let nan = f64::NAN;
    assert!(!nearly_equal(nan, nan, EQUAL_TOLERANCE));
    assert!(!is_zero(nan, EQUAL_TOLERANCE));
    assert!(!larger(nan, 0.0, EQUAL_TOLERANCE));
    assert!(!smaller_or_equal(nan, 0.0, EQUAL_TOLERANCE));
    assert!(!is_in_range(nan, 0.0, 1.0, false, false, EQUAL_TOLERANCE));
}

#[test]
fn trait_defaults_use_equal_tolerance() {
    assert_eq!(f64::fuzzy_epsilon(), EQUAL_TOLERANCE);
    assert!(1.0f64.fuzzy_eq(1.0 + 1e-7));
    assert!(1.0f64.fuzzy_ge(1.0 + 1e-7));
    assert!(!1.0f64.fuzzy_gt(1.0 + 1e-7));
    assert!(1.0f32.fuzzy_eq(1.0 + 1e-7));
}
