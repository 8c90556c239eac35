//! Core/common math functions for working with points, segments, boxes and intersections in 2D.
mod base_math;
mod bounding_box;
mod line2d;
mod segment_intersect;
mod vector2;

pub use base_math::*;
pub use bounding_box::BoundingBox2d;
pub use line2d::Line2d;
pub use segment_intersect::{segment_intr, SegmentIntr};
pub use vector2::Vector2;
