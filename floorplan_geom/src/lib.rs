//! 2D geometry kernel for floor plan editing.
//!
//! - [polygon]: polygons with holes and their orientation rules.
//! - [half_plane]: oriented lines used to trim polygons.
//! - [offset]: inset/outset of polygons and paths with miter, round and square joins.
//! - [spatial]: kd tree for nearest neighbor snapping.
//! - [sketch]: deterministic keys for sketch curves and faces.
//!
//! Fuzzy comparisons used throughout are in [core::traits] and [core::tolerance].
extern crate static_aabb2d_index;

#[macro_use]
mod macros;

pub mod core;
pub mod error;
pub mod half_plane;
pub mod offset;
pub mod polygon;
pub mod sketch;
pub mod spatial;

pub use static_aabb2d_index::AABB;

pub use crate::error::{KdTreeError, KernelError, OffsetError};
pub use crate::half_plane::{HalfPlane, HalfPlaneData};
pub use crate::polygon::DiscretePolygon2d;
