//! Polygons with holes made of straight segments and functions over their rings.
mod discrete_polygon;
mod ring;

pub use discrete_polygon::DiscretePolygon2d;
pub use ring::*;
