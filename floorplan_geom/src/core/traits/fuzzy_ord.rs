use super::FuzzyEq;

/// Ordering comparisons with a tolerance band.
///
/// The strict forms ([FuzzyOrd::fuzzy_gt_eps], [FuzzyOrd::fuzzy_lt_eps]) only hold when the
/// values differ by more than the epsilon, the inclusive forms ([FuzzyOrd::fuzzy_ge_eps],
/// [FuzzyOrd::fuzzy_le_eps]) also hold when the values are fuzzy equal.
///
/// # Examples
///
/// ```
/// # use floorplan_geom::core::traits::*;
/// assert!(!1.0000001f64.fuzzy_gt(1.0));
/// assert!(1.0000001f64.fuzzy_ge(1.0));
/// assert!(0.999999999f64.fuzzy_ge(1.0));
/// assert!(2.0f64.fuzzy_gt(1.0));
/// ```
pub trait FuzzyOrd: FuzzyEq {
    /// Strictly greater than, outside the tolerance band (`self - other > fuzzy_epsilon`).
    fn fuzzy_gt_eps(&self, other: Self, fuzzy_epsilon: Self) -> bool;

    /// Fuzzy greater than.
    #[inline]
    fn fuzzy_gt(&self, other: Self) -> bool {
        self.fuzzy_gt_eps(other, Self::fuzzy_epsilon())
    }

    /// Strictly less than, outside the tolerance band (`other - self > fuzzy_epsilon`).
    fn fuzzy_lt_eps(&self, other: Self, fuzzy_epsilon: Self) -> bool;

    /// Fuzzy less than.
    #[inline]
    fn fuzzy_lt(&self, other: Self) -> bool {
        self.fuzzy_lt_eps(other, Self::fuzzy_epsilon())
    }

    /// Greater than or fuzzy equal.
    fn fuzzy_ge_eps(&self, other: Self, fuzzy_epsilon: Self) -> bool;

    /// Fuzzy greater than or equal.
    #[inline]
    fn fuzzy_ge(&self, other: Self) -> bool {
        self.fuzzy_ge_eps(other, Self::fuzzy_epsilon())
    }

    /// Less than or fuzzy equal.
    fn fuzzy_le_eps(&self, other: Self, fuzzy_epsilon: Self) -> bool;

    /// Fuzzy less than or equal.
    #[inline]
    fn fuzzy_le(&self, other: Self) -> bool {
        self.fuzzy_le_eps(other, Self::fuzzy_epsilon())
    }

    /// Test if `self` is in range between `min` and `max` with some epsilon for fuzzy comparing.
    ///
    /// Each bound is tested independently: an exclusive bound uses the strict comparison, an
    /// inclusive bound accepts values fuzzy equal to it.
    ///
    /// # Examples
    ///
    /// ```
    /// # use floorplan_geom::core::traits::*;
    /// assert!(0.99f64.fuzzy_in_range_eps(1.0, 2.0, false, false, 0.05));
    /// assert!(!0.99f64.fuzzy_in_range_eps(1.0, 2.0, true, false, 0.05));
    /// assert!(1.5f64.fuzzy_in_range_eps(1.0, 2.0, true, true, 1e-5));
    /// assert!(!2.0f64.fuzzy_in_range_eps(1.0, 2.0, false, true, 1e-5));
    ///```
    #[inline]
    fn fuzzy_in_range_eps(
        &self,
        min: Self,
        max: Self,
        min_exclusive: bool,
        max_exclusive: bool,
        fuzzy_epsilon: Self,
    ) -> bool {
        let above_min = if min_exclusive {
            self.fuzzy_gt_eps(min, fuzzy_epsilon)
        } else {
            self.fuzzy_ge_eps(min, fuzzy_epsilon)
        };

        if !above_min {
            return false;
        }

        if max_exclusive {
            self.fuzzy_lt_eps(max, fuzzy_epsilon)
        } else {
            self.fuzzy_le_eps(max, fuzzy_epsilon)
        }
    }

    /// Same as [FuzzyOrd::fuzzy_in_range_eps] with both bounds inclusive, using a default
    /// epsilon.
    #[inline]
    fn fuzzy_in_range(&self, min: Self, max: Self) -> bool {
        self.fuzzy_in_range_eps(min, max, false, false, Self::fuzzy_epsilon())
    }
}

macro_rules! impl_fuzzy_ord {
    ($ty:ty) => {
        impl FuzzyOrd for $ty {
            #[inline]
            fn fuzzy_gt_eps(&self, other: $ty, fuzzy_epsilon: $ty) -> bool {
                *self - other > fuzzy_epsilon
            }
            #[inline]
            fn fuzzy_lt_eps(&self, other: $ty, fuzzy_epsilon: $ty) -> bool {
                other - *self > fuzzy_epsilon
            }
            #[inline]
            fn fuzzy_ge_eps(&self, other: $ty, fuzzy_epsilon: $ty) -> bool {
                *self > other || self.fuzzy_eq_eps(other, fuzzy_epsilon)
            }
            #[inline]
            fn fuzzy_le_eps(&self, other: $ty, fuzzy_epsilon: $ty) -> bool {
                *self < other || self.fuzzy_eq_eps(other, fuzzy_epsilon)
            }
        }
    };
}

impl_fuzzy_ord!(f32);
impl_fuzzy_ord!(f64);
