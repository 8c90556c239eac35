//! Functions over closed rings given as point slices (last point implicitly connects to the
//! first).
use crate::core::{
    math::{is_left, BoundingBox2d, Vector2},
    traits::Real,
};

/// Orientation of a closed ring.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "camelCase")
)]
pub enum Orientation {
    /// Ring has zero area (fewer than 3 points or all points collinear).
    Collinear,
    /// Ring winds clockwise (negative signed area).
    Clockwise,
    /// Ring winds counter clockwise (positive signed area).
    CounterClockwise,
}

/// Iterate the segments of a closed ring as `(start, end)` point pairs, including the closing
/// segment.
pub fn ring_segments<T>(ring: &[Vector2<T>]) -> impl Iterator<Item = (Vector2<T>, Vector2<T>)> + '_
where
    T: Real,
{
    let n = ring.len();
    (0..if n < 2 { 0 } else { n }).map(move |i| (ring[i], ring[(i + 1) % n]))
}

/// Signed area of a closed ring using the shoelace formula, positive for counter clockwise.
///
/// # Examples
///
/// ```
/// # use floorplan_geom::core::math::Vector2;
/// # use floorplan_geom::polygon::ring_signed_area;
/// let ring = [
///     Vector2::new(0.0, 0.0),
///     Vector2::new(2.0, 0.0),
///     Vector2::new(2.0, 2.0),
///     Vector2::new(0.0, 2.0),
/// ];
/// assert_eq!(ring_signed_area(&ring), 4.0);
/// let reversed: Vec<_> = ring.iter().rev().copied().collect();
/// assert_eq!(ring_signed_area(&reversed), -4.0);
/// ```
pub fn ring_signed_area<T>(ring: &[Vector2<T>]) -> T
where
    T: Real,
{
    if ring.len() < 3 {
        return T::zero();
    }

    // https://en.wikipedia.org/wiki/Shoelace_formula
    let mut double_total_area = T::zero();
    for (v1, v2) in ring_segments(ring) {
        double_total_area = double_total_area + v1.x * v2.y - v1.y * v2.x;
    }

    double_total_area / T::two()
}

/// Orientation of a ring, rings with fuzzy zero area are [Orientation::Collinear].
pub fn ring_orientation<T>(ring: &[Vector2<T>]) -> Orientation
where
    T: Real,
{
    let area = ring_signed_area(ring);
    if area.fuzzy_eq_zero() {
        Orientation::Collinear
    } else if area > T::zero() {
        Orientation::CounterClockwise
    } else {
        Orientation::Clockwise
    }
}

/// Axis aligned bounding box of the ring points, `None` for an empty ring.
pub fn ring_extents<T>(ring: &[Vector2<T>]) -> Option<BoundingBox2d<T>>
where
    T: Real,
{
    BoundingBox2d::from_points(ring.iter().copied())
}

/// Total length of the ring boundary including the closing segment.
pub fn ring_path_length<T>(ring: &[Vector2<T>]) -> T
where
    T: Real,
{
    ring_segments(ring).fold(T::zero(), |acc, (v1, v2)| acc + (v2 - v1).length())
}

/// Winding number of the ring around `point`.
///
/// Counter clockwise rings give a positive number for points inside, clockwise rings a negative
/// number. Points on the boundary may be counted as inside or outside.
pub fn ring_winding_number<T>(ring: &[Vector2<T>], point: Vector2<T>) -> i32
where
    T: Real,
{
    ring_segments(ring)
        .map(|(v1, v2)| segment_winding(v1, v2, point))
        .sum()
}

/// Winding contribution of a single directed segment for a ray cast from `point` in the
/// positive x direction.
#[inline]
pub(crate) fn segment_winding<T>(v1: Vector2<T>, v2: Vector2<T>, point: Vector2<T>) -> i32
where
    T: Real,
{
    if v1.y <= point.y {
        if v2.y > point.y && is_left(v1, v2, point) {
            // left and upward crossing
            return 1;
        }
    } else if v2.y <= point.y && !is_left(v1, v2, point) {
        // right and downward crossing
        return -1;
    }

    0
}

/// Copy of the ring with consecutive points fuzzy equal by `pos_equal_eps` removed, including
/// a last point that repeats the first.
pub fn ring_remove_repeat_pos<T>(ring: &[Vector2<T>], pos_equal_eps: T) -> Vec<Vector2<T>>
where
    T: Real,
{
    let mut result: Vec<Vector2<T>> = Vec::with_capacity(ring.len());
    for &p in ring {
        if let Some(last) = result.last() {
            if last.fuzzy_eq_eps(p, pos_equal_eps) {
                continue;
            }
        }
        result.push(p);
    }

    while result.len() > 1 && result[result.len() - 1].fuzzy_eq_eps(result[0], pos_equal_eps) {
        result.pop();
    }

    result
}

/// Returns `true` if both rings have the same point count and every point pair is fuzzy equal.
pub fn rings_fuzzy_eq<T>(a: &[Vector2<T>], b: &[Vector2<T>], eps: T) -> bool
where
    T: Real,
{
    a.len() == b.len() && a.iter().zip(b).all(|(p, q)| p.fuzzy_eq_eps(*q, eps))
}
