use std::fmt::Write;

use super::{Curve2d, SketchData, SketchFace};

/// Extrusion value used for faces without an entry in [SketchData::extrusions].
pub const MIN_EXTRUSION: f64 = 0.001;

/// Face with its cache key.
#[derive(Debug, Clone, PartialEq)]
pub struct EncodedSketchFace<'a> {
    pub face2d: &'a SketchFace,
    /// Extrusion value the key was built with.
    pub value: f64,
    pub id: String,
}

/// Shortest round trip formatting, negative zero written as `0`.
fn write_num(out: &mut String, value: f64) {
    if value == 0.0 {
        out.push('0');
    } else {
        let _ = write!(out, "{value}");
    }
}

fn write_curve(out: &mut String, curve: &Curve2d) {
    match curve {
        Curve2d::Line(line) => {
            out.push_str("l2d-");
            write_num(out, line.start.x);
            out.push(',');
            write_num(out, line.start.y);
            out.push('-');
            write_num(out, line.end.x);
            out.push(',');
            write_num(out, line.end.y);
        }
        Curve2d::Circle(circle) => {
            out.push_str("c2d-");
            write_num(out, circle.center.x);
            out.push(',');
            write_num(out, circle.center.y);
            out.push('-');
            write_num(out, circle.radius);
        }
        Curve2d::Arc(arc) => {
            out.push_str("ca2d-");
            write_num(out, arc.center.x);
            out.push(',');
            write_num(out, arc.center.y);
            out.push('-');
            write_num(out, arc.radius);
            out.push('-');
            write_num(out, arc.start.x);
            write_num(out, arc.start.y);
            out.push('-');
            write_num(out, arc.end.x);
            write_num(out, arc.end.y);
            out.push_str(if arc.clockwise { "-cw" } else { "-ccw" });
        }
    }
}

/// Cache key of a single curve, the curve kind is part of the key.
///
/// # Examples
///
/// ```
/// # use floorplan_geom::core::math::{Line2d, Vector2};
/// # use floorplan_geom::sketch::*;
/// let line = Curve2d::Line(Line2d::new(Vector2::new(0.0, 0.5), Vector2::new(10.0, 0.0)));
/// assert_eq!(encode_sketch_curve(&line), "l2d-0,0.5-10,0");
/// ```
pub fn encode_sketch_curve(curve: &Curve2d) -> String {
    let mut out = String::new();
    write_curve(&mut out, curve);
    out
}

/// Cache key of a face extruded by `extrusion`.
///
/// Curves are encoded in wire then curve order, the same curves in a different order give a
/// different key.
pub fn encode_sketch_face(face: &SketchFace, extrusion: f64) -> String {
    let mut out = String::from("f2d-");
    out.push_str(&face.id);
    out.push('-');
    write_num(&mut out, extrusion);
    out.push('-');
    for curve in face.wires.iter().flatten() {
        write_curve(&mut out, curve);
    }

    out
}

/// Encode every face of `data` with its extrusion value ([MIN_EXTRUSION] when missing).
pub fn generate_encoded_sketch_faces(data: &SketchData) -> Vec<EncodedSketchFace<'_>> {
    data.faces
        .iter()
        .map(|face| {
            let value = data
                .extrusions
                .get(&face.id)
                .copied()
                .unwrap_or(MIN_EXTRUSION);
            EncodedSketchFace {
                face2d: face,
                value,
                id: encode_sketch_face(face, value),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        core::math::{Line2d, Vector2},
        sketch::{Arc2d, Circle2d},
    };

    #[test]
    fn negative_zero_is_zero() {
        let circle = Curve2d::Circle(Circle2d::new(Vector2::new(-0.0, 1.25), 3.0));
        assert_eq!(encode_sketch_curve(&circle), "c2d-0,1.25-3");
    }

    #[test]
    fn arc_key() {
        let arc = Curve2d::Arc(Arc2d::new(
            Vector2::new(0.0, 0.0),
            1.0,
            Vector2::new(1.0, 0.0),
            Vector2::new(0.0, 1.0),
            false,
        ));
        assert_eq!(encode_sketch_curve(&arc), "ca2d-0,0-1-10-01-ccw");
    }

    #[test]
    fn face_key() {
        let face = SketchFace::new(
            "room",
            vec![vec![
                Line2d::new(Vector2::new(0.0, 0.0), Vector2::new(1.0, 0.0)).into(),
                Line2d::new(Vector2::new(1.0, 0.0), Vector2::new(0.0, 0.0)).into(),
            ]],
        );
        assert_eq!(
            encode_sketch_face(&face, 2.5),
            "f2d-room-2.5-l2d-0,0-1,0l2d-1,0-0,0"
        );
    }
}
