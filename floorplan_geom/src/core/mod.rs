//! Core module has common/shared math, tolerance predicates, and traits.

pub mod math;
pub mod tolerance;
pub mod traits;
