use super::FuzzyOrd;
use static_aabb2d_index::IndexableNum;

/// Trait representing a real number (e.g. 1.1, -3.5, etc.) that can be fuzzy compared and ordered.
pub trait Real:
    num_traits::real::Real
    + num_traits::Bounded
    + FuzzyOrd
    + std::default::Default
    + std::fmt::Debug
    + IndexableNum
    + 'static
{
    /// Converts a `f64` constant into this type.
    fn cast(value: f64) -> Self;

    /// Not a number sentinel used for degenerate results.
    #[inline]
    fn nan() -> Self {
        Self::zero() / Self::zero()
    }

    /// Returns `true` if the value is neither infinite nor NaN.
    #[inline]
    fn is_finite(&self) -> bool {
        let v = *self;
        v == v && (v - v) == Self::zero()
    }

    #[inline]
    fn pi() -> Self {
        Self::cast(std::f64::consts::PI)
    }

    #[inline]
    fn tau() -> Self {
        Self::cast(std::f64::consts::TAU)
    }

    #[inline]
    fn two() -> Self {
        Self::one() + Self::one()
    }

    #[inline]
    fn four() -> Self {
        Self::two() + Self::two()
    }
}

impl Real for f32 {
    #[inline]
    fn cast(value: f64) -> Self {
        value as f32
    }

    #[inline]
    fn nan() -> Self {
        f32::NAN
    }

    #[inline]
    fn is_finite(&self) -> bool {
        f32::is_finite(*self)
    }

    #[inline]
    fn pi() -> Self {
        std::f32::consts::PI
    }

    #[inline]
    fn tau() -> Self {
        std::f32::consts::TAU
    }

    #[inline]
    fn two() -> Self {
        2.0f32
    }

    #[inline]
    fn four() -> Self {
        4.0f32
    }
}

impl Real for f64 {
    #[inline]
    fn cast(value: f64) -> Self {
        value
    }

    #[inline]
    fn nan() -> Self {
        f64::NAN
    }

    #[inline]
    fn is_finite(&self) -> bool {
        f64::is_finite(*self)
    }

    #[inline]
    fn pi() -> Self {
        std::f64::consts::PI
    }

    #[inline]
    fn tau() -> Self {
        std::f64::consts::TAU
    }

    #[inline]
    fn two() -> Self {
        2.0f64
    }

    #[inline]
    fn four() -> Self {
        4.0f64
    }
}
