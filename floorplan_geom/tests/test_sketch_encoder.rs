use std::collections::HashMap;

use floorplan_geom::{
    core::math::{Line2d, Vector2},
    sketch::*,
};

fn room_face(id: &str) -> SketchFace {
    let corners = [
        Vector2::new(0.0, 0.0),
        Vector2::new(4.0, 0.0),
        Vector2::new(4.0, 3.0),
        Vector2::new(0.0, 3.0),
    ];
    let outer: Vec<Curve2d> = (0..4)
        .map(|i| Line2d::new(corners[i], corners[(i + 1) % 4]).into())
        .collect();
    let column: Vec<Curve2d> = vec![Circle2d::new(Vector2::new(2.0, 1.5), 0.25).into()];
    SketchFace::new(id, vec![outer, column])
}

#[test]
fn curve_keys_are_deterministic() {
    let line = Curve2d::Line(Line2d::new(Vector2::new(0.0, 0.03), Vector2::new(10.0, 0.0)));
    assert_eq!(encode_sketch_curve(&line), encode_sketch_curve(&line));
    assert_eq!(encode_sketch_curve(&line), "l2d-0,0.03-10,0");
}

#[test]
fn curve_kind_is_part_of_key() {
    let line = Curve2d::Line(Line2d::new(Vector2::new(1.0, 2.0), Vector2::new(3.0, 0.0)));
    let circle = Curve2d::Circle(Circle2d::new(Vector2::new(1.0, 2.0), 3.0));
    assert_ne!(encode_sketch_curve(&line), encode_sketch_curve(&circle));
    assert_eq!(encode_sketch_curve(&circle), "c2d-1,2-3");
}

#[test]
fn arc_direction_is_part_of_key() {
    let ccw = Arc2d::from_angles(Vector2::new(0.0, 0.0), 2.0, 0.0, std::f64::consts::PI, false);
    let cw = Arc2d { clockwise: true, ..ccw };
    let ccw_key = encode_sketch_curve(&ccw.into());
    let cw_key = encode_sketch_curve(&cw.into());
    assert!(ccw_key.starts_with("ca2d-0,0-2-20-"));
    assert!(ccw_key.ends_with("-ccw"));
    assert!(cw_key.ends_with("-cw"));
    assert_ne!(ccw_key, cw_key);
}

#[test]
fn face_key_follows_curve_order() {
    let face = room_face("r1");
    let key = encode_sketch_face(&face, 2800.0);
    assert_eq!(
        key,
        "f2d-r1-2800-l2d-0,0-4,0l2d-4,0-4,3l2d-4,3-0,3l2d-0,3-0,0c2d-2,1.5-0.25"
    );

    let mut reordered = face.clone();
    reordered.wires.reverse();
    assert_ne!(encode_sketch_face(&reordered, 2800.0), key);
    assert_ne!(encode_sketch_face(&face, 2700.0), key);
}

#[test]
fn encoded_faces_use_extrusions() {
    let data = SketchData {
        faces: vec![room_face("a"), room_face("b")],
        extrusions: HashMap::from([("a".to_string(), 120.5)]),
    };
    let encoded = generate_encoded_sketch_faces(&data);
    assert_eq!(encoded.len(), 2);
    assert_eq!(encoded[0].value, 120.5);
    assert!(encoded[0].id.starts_with("f2d-a-120.5-"));
    assert!(std::ptr::eq(encoded[0].face2d, &data.faces[0]));
    assert_eq!(encoded[1].value, MIN_EXTRUSION);
    assert_eq!(encoded[1].id, encode_sketch_face(&data.faces[1], MIN_EXTRUSION));
}
