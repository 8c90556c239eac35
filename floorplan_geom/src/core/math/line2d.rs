use super::{base_math::midpoint, Vector2};
use crate::core::traits::Real;

/// Directed 2D line segment from `start` to `end`.
#[derive(Debug, Copy, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Line2d<T = f64> {
    pub start: Vector2<T>,
    pub end: Vector2<T>,
}

impl<T> Line2d<T>
where
    T: Real,
{
    pub fn new(start: Vector2<T>, end: Vector2<T>) -> Self {
        Line2d { start, end }
    }

    /// Direction vector (`end - start`), not normalized.
    pub fn direction(&self) -> Vector2<T> {
        self.end - self.start
    }

    pub fn length(&self) -> T {
        self.direction().length()
    }

    pub fn midpoint(&self) -> Vector2<T> {
        midpoint(self.start, self.end)
    }

    /// Same segment traversed from `end` to `start`.
    pub fn reversed(&self) -> Self {
        Line2d::new(self.end, self.start)
    }

    /// Returns `true` if start and end are fuzzy equal using `epsilon`.
    pub fn is_degenerate_eps(&self, epsilon: T) -> bool {
        self.start.fuzzy_eq_eps(self.end, epsilon)
    }

    pub fn is_degenerate(&self) -> bool {
        self.is_degenerate_eps(T::fuzzy_epsilon())
    }
}
