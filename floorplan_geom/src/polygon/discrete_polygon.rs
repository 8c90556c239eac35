use super::ring::{
    ring_extents, ring_remove_repeat_pos, ring_signed_area, ring_winding_number, rings_fuzzy_eq,
};
use crate::core::{
    math::{BoundingBox2d, Vector2},
    traits::Real,
};

/// Polygon made of straight segments: one outer ring and zero or more hole rings.
///
/// Rings are stored as given, the last point implicitly connects back to the first. Orientation
/// is only normalized by [DiscretePolygon2d::verify] (outer counter clockwise, holes clockwise),
/// functions which depend on orientation (e.g. [DiscretePolygon2d::area]) assume it has been
/// applied.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "camelCase")
)]
pub struct DiscretePolygon2d<T = f64> {
    pub outer: Vec<Vector2<T>>,
    pub holes: Vec<Vec<Vector2<T>>>,
}

impl<T> DiscretePolygon2d<T>
where
    T: Real,
{
    /// Create a polygon from an outer ring and hole rings, no normalization is applied.
    pub fn new(outer: Vec<Vector2<T>>, holes: Vec<Vec<Vector2<T>>>) -> Self {
        DiscretePolygon2d { outer, holes }
    }

    /// Create a polygon without holes.
    pub fn from_outer(outer: Vec<Vector2<T>>) -> Self {
        DiscretePolygon2d::new(outer, Vec::new())
    }

    /// Replace the rings of this polygon.
    pub fn assign(&mut self, outer: Vec<Vector2<T>>, holes: Vec<Vec<Vector2<T>>>) {
        self.outer = outer;
        self.holes = holes;
    }

    /// Signed area of the outer ring plus the signed area of every hole.
    ///
    /// When orientation is normalized (see [DiscretePolygon2d::verify]) this is the outer area
    /// minus the hole areas.
    ///
    /// # Examples
    ///
    /// ```
    /// # use floorplan_geom::core::math::Vector2;
    /// # use floorplan_geom::polygon::DiscretePolygon2d;
    /// let outer: Vec<Vector2<f64>> = vec![
    ///     Vector2::new(0.0, 0.0),
    ///     Vector2::new(10.0, 0.0),
    ///     Vector2::new(10.0, 10.0),
    ///     Vector2::new(0.0, 10.0),
    /// ];
    /// let hole: Vec<Vector2<f64>> = vec![
    ///     Vector2::new(2.0, 2.0),
    ///     Vector2::new(2.0, 4.0),
    ///     Vector2::new(4.0, 4.0),
    ///     Vector2::new(4.0, 2.0),
    /// ];
    /// let polygon: DiscretePolygon2d<f64> = DiscretePolygon2d::new(outer, vec![hole]);
    /// assert_eq!(polygon.area(), 96.0);
    /// ```
    pub fn area(&self) -> T {
        self.holes
            .iter()
            .fold(ring_signed_area(&self.outer), |acc, h| acc + ring_signed_area(h))
    }

    /// Bounding box of the outer ring (holes lie inside it), `None` if the outer ring is empty.
    pub fn bound(&self) -> Option<BoundingBox2d<T>> {
        ring_extents(&self.outer)
    }

    /// Returns `true` if the outer ring has at least 3 distinct points and every coordinate is
    /// finite.
    pub fn is_valid(&self) -> bool {
        let all_finite = self.outer.iter().all(|p| p.is_finite())
            && self.holes.iter().flatten().all(|p| p.is_finite());

        all_finite && ring_remove_repeat_pos(&self.outer, T::fuzzy_epsilon()).len() >= 3
    }

    /// Returns `true` if the outer ring is counter clockwise and every hole is clockwise.
    pub fn is_verified(&self) -> bool {
        ring_signed_area(&self.outer) >= T::zero()
            && self.holes.iter().all(|h| ring_signed_area(h) <= T::zero())
    }

    /// Copy of this polygon with the outer ring counter clockwise and the holes clockwise.
    ///
    /// Rings are reversed by the sign of their signed area, however small. Rings already in the
    /// correct orientation (and exactly zero area rings) are left unchanged so applying this twice
    /// gives the same result as applying it once.
    pub fn verify(&self) -> Self {
        let mut result = self.clone();
        result.verify_rings();
        result
    }

    fn verify_rings(&mut self) {
        // sign only, tiny rings must be fixed too
        if ring_signed_area(&self.outer) < T::zero() {
            self.outer.reverse();
        }

        for hole in self.holes.iter_mut() {
            if ring_signed_area(hole) > T::zero() {
                hole.reverse();
            }
        }
    }

    /// Returns `true` if `other` has the same rings in the same order with every point fuzzy
    /// equal using `eps`.
    pub fn is_same_polygon(&self, other: &DiscretePolygon2d<T>, eps: T) -> bool {
        rings_fuzzy_eq(&self.outer, &other.outer, eps)
            && self.holes.len() == other.holes.len()
            && self
                .holes
                .iter()
                .zip(&other.holes)
                .all(|(a, b)| rings_fuzzy_eq(a, b, eps))
    }

    /// Returns `true` if `point` lies inside the outer ring and outside every hole.
    pub fn contains_point(&self, point: Vector2<T>) -> bool {
        ring_winding_number(&self.outer, point) != 0
            && self
                .holes
                .iter()
                .all(|h| ring_winding_number(h, point) == 0)
    }

    /// Copy of this polygon moved by `(dx, dy)`.
    pub fn translate(&self, dx: T, dy: T) -> Self {
        let offset = Vector2::new(dx, dy);
        let shift = |ring: &Vec<Vector2<T>>| -> Vec<Vector2<T>> {
            ring.iter().map(|p| *p + offset).collect()
        };
        DiscretePolygon2d {
            outer: shift(&self.outer),
            holes: self.holes.iter().map(shift).collect(),
        }
    }

    /// Sum of [DiscretePolygon2d::area] over all polygons.
    pub fn total_area(polygons: &[DiscretePolygon2d<T>]) -> T {
        polygons.iter().fold(T::zero(), |acc, p| acc + p.area())
    }

    /// Union of the bounds of all polygons, `None` if no polygon has points.
    pub fn total_bound(polygons: &[DiscretePolygon2d<T>]) -> Option<BoundingBox2d<T>> {
        polygons
            .iter()
            .filter_map(|p| p.bound())
            .reduce(|mut acc, b| {
                acc.append_bound(&b);
                acc
            })
    }

    /// Returns `true` if both lists hold the same polygons regardless of order.
    ///
    /// Each polygon in `list1` must match exactly one not yet matched polygon in `list2` using
    /// [DiscretePolygon2d::is_same_polygon].
    pub fn is_same_polygons(
        list1: &[DiscretePolygon2d<T>],
        list2: &[DiscretePolygon2d<T>],
        eps: T,
    ) -> bool {
        if list1.len() != list2.len() {
            return false;
        }

        let mut matched = vec![false; list2.len()];
        for a in list1 {
            let found = list2
                .iter()
                .enumerate()
                .position(|(j, b)| !matched[j] && a.is_same_polygon(b, eps));
            match found {
                Some(j) => matched[j] = true,
                None => return false,
            }
        }

        true
    }

    /// Orientation normalized copies of all polygons (see [DiscretePolygon2d::verify]).
    pub fn verified(polygons: &[DiscretePolygon2d<T>]) -> Vec<DiscretePolygon2d<T>> {
        polygons.iter().map(|p| p.verify()).collect()
    }

    /// Normalize the orientation of all polygons in place.
    pub fn verify_in_place(polygons: &mut [DiscretePolygon2d<T>]) {
        for p in polygons.iter_mut() {
            p.verify_rings();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rect(x0: f64, y0: f64, x1: f64, y1: f64) -> Vec<Vector2<f64>> {
        vec![
            Vector2::new(x0, y0),
            Vector2::new(x1, y0),
            Vector2::new(x1, y1),
            Vector2::new(x0, y1),
        ]
    }

    #[test]
    fn verify_fixes_orientation() {
        let mut outer = rect(0.0, 0.0, 10.0, 10.0);
        outer.reverse();
        let hole = rect(2.0, 2.0, 4.0, 4.0);
        let polygon: DiscretePolygon2d<f64> = DiscretePolygon2d::new(outer, vec![hole]);
        assert!(!polygon.is_verified());
        let verified = polygon.verify();
        assert!(verified.is_verified());
        assert_eq!(verified.area(), 96.0);
    }

    #[test]
    fn contains_point_excludes_holes() {
        let polygon: DiscretePolygon2d<f64> = DiscretePolygon2d::new(
            rect(0.0, 0.0, 10.0, 10.0),
            vec![rect(2.0, 2.0, 4.0, 4.0)],
        )
        .verify();
        assert!(polygon.contains_point(Vector2::new(1.0, 1.0)));
        assert!(!polygon.contains_point(Vector2::new(3.0, 3.0)));
        assert!(!polygon.contains_point(Vector2::new(11.0, 3.0)));
    }

    #[test]
    fn validity() {
        assert!(DiscretePolygon2d::from_outer(rect(0.0, 0.0, 1.0, 1.0)).is_valid());
        let two_points: Vec<Vector2<f64>> = vec![Vector2::new(0.0, 0.0), Vector2::new(1.0, 0.0)];
        assert!(!DiscretePolygon2d::from_outer(two_points).is_valid());
        let mut non_finite = rect(0.0, 0.0, 1.0, 1.0);
        non_finite[2].x = f64::INFINITY;
        assert!(!DiscretePolygon2d::from_outer(non_finite).is_valid());
    }
}
