//! Tolerance based numeric predicates.
//!
//! Every predicate takes the tolerance explicitly, [EQUAL_TOLERANCE] is the value used by the
//! default epsilon variants of [FuzzyEq] and [FuzzyOrd]. Tolerances are absolute and expressed
//! in the coordinate unit of the caller. Any NaN argument makes the predicate return `false`.

use super::traits::{FuzzyEq, FuzzyOrd};

/// Default absolute tolerance for comparing scalar and coordinate values.
pub const EQUAL_TOLERANCE: f64 = 1e-6;

/// `|a - b| <= tol`.
///
/// # Examples
///
/// ```
/// # use floorplan_geom::core::tolerance::*;
/// assert!(nearly_equal(1.0, 1.0 + 1e-7, EQUAL_TOLERANCE));
/// assert!(!nearly_equal(1.0, 1.1, EQUAL_TOLERANCE));
/// ```
#[inline]
pub fn nearly_equal<T>(a: T, b: T, tol: T) -> bool
where
    T: FuzzyEq,
{
    a.fuzzy_eq_eps(b, tol)
}

/// `nearly_equal(v, 0, tol)`.
#[inline]
pub fn is_zero<T>(v: T, tol: T) -> bool
where
    T: FuzzyEq,
{
    v.fuzzy_eq_zero_eps(tol)
}

/// `a` is greater than `b` by more than `tol`.
#[inline]
pub fn larger<T>(a: T, b: T, tol: T) -> bool
where
    T: FuzzyOrd,
{
    a.fuzzy_gt_eps(b, tol)
}

/// `a` is less than `b` by more than `tol`.
#[inline]
pub fn smaller<T>(a: T, b: T, tol: T) -> bool
where
    T: FuzzyOrd,
{
    a.fuzzy_lt_eps(b, tol)
}

/// `a > b` or `a` nearly equal to `b`.
#[inline]
pub fn larger_or_equal<T>(a: T, b: T, tol: T) -> bool
where
    T: FuzzyOrd,
{
    a.fuzzy_ge_eps(b, tol)
}

/// `a < b` or `a` nearly equal to `b`.
#[inline]
pub fn smaller_or_equal<T>(a: T, b: T, tol: T) -> bool
where
    T: FuzzyOrd,
{
    a.fuzzy_le_eps(b, tol)
}

/// Tests `min <= v <= max` with each bound independently exclusive or inclusive.
///
/// An exclusive bound rejects values within `tol` of it, an inclusive bound accepts them.
///
/// # Examples
///
/// ```
/// # use floorplan_geom::core::tolerance::*;
/// assert!(is_in_range(0.0, 0.0, 1.0, false, false, EQUAL_TOLERANCE));
/// assert!(!is_in_range(0.0, 0.0, 1.0, true, false, EQUAL_TOLERANCE));
/// assert!(is_in_range(1.0 + 1e-9, 0.0, 1.0, false, false, EQUAL_TOLERANCE));
/// ```
#[inline]
pub fn is_in_range<T>(v: T, min: T, max: T, min_exclusive: bool, max_exclusive: bool, tol: T) -> bool
where
    T: FuzzyOrd,
{
    v.fuzzy_in_range_eps(min, max, min_exclusive, max_exclusive, tol)
}
