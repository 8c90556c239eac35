use crate::core::traits::Real;
use std::ops::{Add, Neg, Sub};

/// Point or direction in the plane.
#[derive(Debug, Copy, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Vector2<T = f64> {
    pub x: T,
    pub y: T,
}

impl<T> Vector2<T>
where
    T: Real,
{
    pub fn new(x: T, y: T) -> Self {
        Vector2 { x, y }
    }

    pub fn zero() -> Self {
        Vector2::new(T::zero(), T::zero())
    }

    /// Both components NaN, returned by degenerate constructions.
    pub fn nan() -> Self {
        Vector2::new(T::nan(), T::nan())
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    pub fn scale(&self, factor: T) -> Self {
        Vector2::new(self.x * factor, self.y * factor)
    }

    pub fn dot(&self, other: Self) -> T {
        self.x * other.x + self.y * other.y
    }

    /// Z component of the 3D cross product, positive when `other` is counter clockwise from
    /// `self`.
    pub fn perp_dot(&self, other: Self) -> T {
        self.x * other.y - self.y * other.x
    }

    pub fn length_squared(&self) -> T {
        self.dot(*self)
    }

    pub fn length(&self) -> T {
        self.length_squared().sqrt()
    }

    /// Unit vector in the same direction, NaN components for a zero vector.
    pub fn normalize(&self) -> Self {
        self.scale(T::one() / self.length())
    }

    /// Component wise fuzzy comparison.
    pub fn fuzzy_eq_eps(&self, other: Self, eps: T) -> bool {
        self.x.fuzzy_eq_eps(other.x, eps) && self.y.fuzzy_eq_eps(other.y, eps)
    }

    pub fn fuzzy_eq(&self, other: Self) -> bool {
        self.fuzzy_eq_eps(other, T::fuzzy_epsilon())
    }

    /// Left hand normal (rotated +90°).
    pub fn perp(&self) -> Self {
        Vector2::new(-self.y, self.x)
    }

    pub fn unit_perp(&self) -> Self {
        self.perp().normalize()
    }

    /// Right hand normal (rotated -90°).
    pub fn right_perp(&self) -> Self {
        Vector2::new(self.y, -self.x)
    }

    /// Counter clockwise rotation by `angle` radians.
    pub fn rotate(&self, angle: T) -> Self {
        let (sin, cos) = angle.sin_cos();
        Vector2::new(self.x * cos - self.y * sin, self.x * sin + self.y * cos)
    }
}

impl<T: Real> Add for Vector2<T> {
    type Output = Vector2<T>;

    fn add(self, rhs: Vector2<T>) -> Vector2<T> {
        Vector2::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl<T: Real> Sub for Vector2<T> {
    type Output = Vector2<T>;

    fn sub(self, rhs: Vector2<T>) -> Vector2<T> {
        Vector2::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl<T: Real> Neg for Vector2<T> {
    type Output = Vector2<T>;

    fn neg(self) -> Vector2<T> {
        Vector2::new(-self.x, -self.y)
    }
}
