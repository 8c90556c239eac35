use std::collections::HashMap;

use crate::core::math::{point_on_circle, Line2d, Vector2};

/// Full circle.
#[derive(Debug, Copy, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Circle2d {
    pub center: Vector2,
    pub radius: f64,
}

impl Circle2d {
    pub fn new(center: Vector2, radius: f64) -> Self {
        Circle2d { center, radius }
    }
}

/// Circular arc from `start` to `end` around `center`.
#[derive(Debug, Copy, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Arc2d {
    pub center: Vector2,
    pub radius: f64,
    pub start: Vector2,
    pub end: Vector2,
    pub clockwise: bool,
}

impl Arc2d {
    pub fn new(center: Vector2, radius: f64, start: Vector2, end: Vector2, clockwise: bool) -> Self {
        Arc2d {
            center,
            radius,
            start,
            end,
            clockwise,
        }
    }

    /// Arc around `center` from `start_angle` to `end_angle` (radians).
    pub fn from_angles(center: Vector2, radius: f64, start_angle: f64, end_angle: f64, clockwise: bool) -> Self {
        Arc2d::new(
            center,
            radius,
            point_on_circle(radius, center, start_angle),
            point_on_circle(radius, center, end_angle),
            clockwise,
        )
    }
}

/// Sketch curve.
#[derive(Debug, Copy, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(tag = "type", rename_all = "camelCase")
)]
pub enum Curve2d {
    Line(Line2d),
    Circle(Circle2d),
    Arc(Arc2d),
}

impl From<Line2d> for Curve2d {
    fn from(line: Line2d) -> Self {
        Curve2d::Line(line)
    }
}

impl From<Circle2d> for Curve2d {
    fn from(circle: Circle2d) -> Self {
        Curve2d::Circle(circle)
    }
}

impl From<Arc2d> for Curve2d {
    fn from(arc: Arc2d) -> Self {
        Curve2d::Arc(arc)
    }
}

/// Sketch face made of closed wires (outer boundary first, then holes).
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SketchFace {
    pub id: String,
    pub wires: Vec<Vec<Curve2d>>,
}

impl SketchFace {
    pub fn new(id: impl Into<String>, wires: Vec<Vec<Curve2d>>) -> Self {
        SketchFace {
            id: id.into(),
            wires,
        }
    }
}

/// Faces of a sketch with their extrusion values keyed by face id.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SketchData {
    pub faces: Vec<SketchFace>,
    pub extrusions: HashMap<String, f64>,
}
