use crate::core::tolerance::EQUAL_TOLERANCE;

/// Trait for fuzzy equality comparisons with floating point numbers.
///
/// Two values are considered equal when their absolute difference is less than or equal to the
/// epsilon used, so a difference exactly at the tolerance still compares equal.
///
/// # Examples
///
/// ```
/// # use floorplan_geom::core::traits::*;
/// let a = 0.1 + 0.2;
/// let b = 0.3;
///
/// // Direct comparison fails due to floating point precision
/// assert_ne!(a, b);
///
/// // Fuzzy comparison succeeds
/// assert!(a.fuzzy_eq(b));
/// assert!(1.0f64.fuzzy_eq_eps(1.5, 0.5));
/// ```
pub trait FuzzyEq: Sized + Copy {
    /// Returns the default epsilon value for fuzzy comparisons
    /// ([EQUAL_TOLERANCE](crate::core::tolerance::EQUAL_TOLERANCE)).
    fn fuzzy_epsilon() -> Self;

    /// Returns `true` if this value is approximately equal to the other one, using a provided
    /// epsilon value.
    fn fuzzy_eq_eps(&self, other: Self, fuzzy_epsilon: Self) -> bool;

    /// Returns `true` if this value is approximately equal to the other one, using the
    /// implemented [FuzzyEq::fuzzy_epsilon] value.
    #[inline]
    fn fuzzy_eq(&self, other: Self) -> bool {
        self.fuzzy_eq_eps(other, Self::fuzzy_epsilon())
    }

    /// Returns `true` if this value is approximately equal to zero, using a provided epsilon
    /// value.
    fn fuzzy_eq_zero_eps(&self, fuzzy_epsilon: Self) -> bool;

    /// Returns `true` if this value is approximately equal to zero, using the implemented
    /// [FuzzyEq::fuzzy_epsilon] value.
    #[inline]
    fn fuzzy_eq_zero(&self) -> bool {
        self.fuzzy_eq_zero_eps(Self::fuzzy_epsilon())
    }
}

macro_rules! impl_fuzzy_eq {
    ($ty:ty) => {
        impl FuzzyEq for $ty {
            #[inline]
            fn fuzzy_epsilon() -> Self {
                EQUAL_TOLERANCE as $ty
            }
            #[inline]
            fn fuzzy_eq_eps(&self, other: Self, fuzzy_epsilon: Self) -> bool {
                (*self - other).abs() <= fuzzy_epsilon
            }
            #[inline]
            fn fuzzy_eq_zero_eps(&self, fuzzy_epsilon: Self) -> bool {
                self.abs() <= fuzzy_epsilon
            }
        }
    };
}

impl_fuzzy_eq!(f32);
impl_fuzzy_eq!(f64);
