//! Oriented half planes: construction, signed distance, intersection and polygon cutting.
use crate::{
    core::{
        math::{point_from_parametric, Line2d, Vector2},
        traits::Real,
    },
    polygon::{ring_remove_repeat_pos, ring_signed_area, DiscretePolygon2d},
};

/// Default tolerance used by [HalfPlane::parallel] (cross product of the unit normals).
pub const PARALLEL_TOLERANCE: f64 = 1e-6;

/// Determinant magnitude under which two boundaries are treated as parallel when intersecting.
const INTERSECT_DET_EPS: f64 = 1e-12;

/// The set of points `p` with `normal · p + offset >= 0`.
///
/// `normal` is kept at unit length by every constructor so [HalfPlane::distance] is a true signed
/// distance, positive on the inside. Degenerate input (zero length line or normal, non-finite
/// values) produces a plane holding NaN values, check with [HalfPlane::is_degenerate].
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct HalfPlane<T = f64> {
    normal: Vector2<T>,
    offset: T,
}

/// Plain record form of a [HalfPlane] used for persistence.
#[derive(Debug, Copy, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "camelCase")
)]
pub struct HalfPlaneData<T = f64> {
    pub normal: Vector2<T>,
    pub offset: T,
}

impl<T> HalfPlane<T>
where
    T: Real,
{
    /// Create from a normal and offset term, a non-unit `normal` is normalized and `offset`
    /// scaled with it so the represented set is unchanged.
    pub fn new(normal: Vector2<T>, offset: T) -> Self {
        let length = normal.length();
        if !length.is_finite() || !offset.is_finite() || length.fuzzy_eq_zero() {
            return Self::degenerate();
        }

        HalfPlane {
            normal: normal.scale(T::one() / length),
            offset: offset / length,
        }
    }

    /// Create from a normal and a point lying on the boundary.
    pub fn from_normal_and_point(normal: Vector2<T>, point: Vector2<T>) -> Self {
        let length = normal.length();
        if !length.is_finite() || !point.is_finite() || length.fuzzy_eq_zero() {
            return Self::degenerate();
        }

        let unit_normal = normal.scale(T::one() / length);
        HalfPlane {
            normal: unit_normal,
            offset: -unit_normal.dot(point),
        }
    }

    /// Create from the directed line `start -> end`, the inside is to the left of the direction.
    ///
    /// # Examples
    ///
    /// ```
    /// # use floorplan_geom::core::math::Vector2;
    /// # use floorplan_geom::half_plane::HalfPlane;
    /// let hp: HalfPlane<f64> = HalfPlane::from_points(Vector2::new(0.0, 0.0), Vector2::new(10.0, 0.0));
    /// assert_eq!(hp.distance(Vector2::new(5.0, 1.0)), 1.0);
    /// assert_eq!(hp.distance(Vector2::new(5.0, -1.0)), -1.0);
    /// ```
    pub fn from_points(start: Vector2<T>, end: Vector2<T>) -> Self {
        Self::from_normal_and_point((end - start).perp(), start)
    }

    /// Create from a line segment, see [HalfPlane::from_points].
    pub fn from_line(line: &Line2d<T>) -> Self {
        Self::from_points(line.start, line.end)
    }

    fn degenerate() -> Self {
        HalfPlane {
            normal: Vector2::nan(),
            offset: T::nan(),
        }
    }

    /// Unit normal pointing into the half plane.
    pub fn normal(&self) -> Vector2<T> {
        self.normal
    }

    /// Offset term of the boundary equation `normal · p + offset = 0`.
    pub fn offset_value(&self) -> T {
        self.offset
    }

    /// Returns `true` if the plane was built from degenerate input.
    pub fn is_degenerate(&self) -> bool {
        !self.normal.is_finite() || !self.offset.is_finite()
    }

    /// Signed distance from the boundary, positive inside.
    pub fn distance(&self, point: Vector2<T>) -> T {
        self.normal.dot(point) + self.offset
    }

    /// Returns `true` if `point` is inside or within `epsilon` of the boundary.
    pub fn contains_point_eps(&self, point: Vector2<T>, epsilon: T) -> bool {
        self.distance(point).fuzzy_ge_eps(T::zero(), epsilon)
    }

    pub fn contains_point(&self, point: Vector2<T>) -> bool {
        self.contains_point_eps(point, T::fuzzy_epsilon())
    }

    /// Plane with the boundary moved by `distance` along the normal (positive shrinks the inside).
    pub fn offset(&self, distance: T) -> Self {
        HalfPlane {
            normal: self.normal,
            offset: self.offset - distance,
        }
    }

    /// Plane covering the complement (sharing the boundary).
    pub fn flipped(&self) -> Self {
        HalfPlane {
            normal: -self.normal,
            offset: -self.offset,
        }
    }

    /// Intersection point of the two boundary lines, `None` if they are parallel or either plane
    /// is degenerate.
    pub fn intersect(&self, other: &HalfPlane<T>) -> Option<Vector2<T>> {
        if self.is_degenerate() || other.is_degenerate() {
            return None;
        }

        let n1 = self.normal;
        let n2 = other.normal;
        let det = n1.perp_dot(n2);
        if det.fuzzy_eq_zero_eps(T::cast(INTERSECT_DET_EPS)) {
            return None;
        }

        let x = (other.offset * n1.y - self.offset * n2.y) / det;
        let y = (self.offset * n2.x - other.offset * n1.x) / det;
        Some(Vector2::new(x, y))
    }

    /// Returns `true` if the boundaries are parallel, comparing the cross product of the unit
    /// normals against `tolerance`. Opposite facing planes are parallel too.
    pub fn parallel_eps(&self, other: &HalfPlane<T>, tolerance: T) -> bool {
        self.normal.perp_dot(other.normal).fuzzy_eq_zero_eps(tolerance)
    }

    /// Same as [HalfPlane::parallel_eps] using [PARALLEL_TOLERANCE].
    pub fn parallel(&self, other: &HalfPlane<T>) -> bool {
        self.parallel_eps(other, T::cast(PARALLEL_TOLERANCE))
    }

    /// Unit length line on the boundary, oriented so [HalfPlane::from_line] gives back this
    /// plane.
    pub fn to_line(&self) -> Line2d<T> {
        let start = self.normal.scale(-self.offset);
        Line2d::new(start, start + self.normal.right_perp())
    }

    /// Clip a closed ring against this plane (Sutherland-Hodgman), keeping the inside.
    ///
    /// Returns an empty vector if less than 3 points or zero area remain.
    pub fn clip_ring(&self, ring: &[Vector2<T>]) -> Vec<Vector2<T>> {
        let eps = T::fuzzy_epsilon();
        let n = ring.len();
        let mut result = Vec::with_capacity(n + 2);
        for i in 0..n {
            let current = ring[i];
            let next = ring[(i + 1) % n];
            let d_current = self.distance(current);
            let d_next = self.distance(next);
            let current_inside = d_current >= -eps;
            let next_inside = d_next >= -eps;

            if current_inside {
                result.push(current);
            }

            if current_inside != next_inside {
                let t = d_current / (d_current - d_next);
                result.push(point_from_parametric(current, next, t));
            }
        }

        let result = ring_remove_repeat_pos(&result, eps);
        if result.len() < 3 || ring_signed_area(&result).fuzzy_eq_zero() {
            return Vec::new();
        }

        result
    }

    /// Clip a polygon against this plane, `None` if nothing of the outer ring remains.
    ///
    /// Holes that collapse are dropped.
    pub fn clip_polygon(&self, polygon: &DiscretePolygon2d<T>) -> Option<DiscretePolygon2d<T>> {
        let outer = self.clip_ring(&polygon.outer);
        if outer.is_empty() {
            log::trace!("polygon fully outside half plane, dropped");
            return None;
        }

        let holes = polygon
            .holes
            .iter()
            .map(|h| self.clip_ring(h))
            .filter(|h| !h.is_empty())
            .collect();

        Some(DiscretePolygon2d::new(outer, holes))
    }

    /// Cut `polygons` by this plane and then by each of `extra_planes` in order, every plane
    /// operating on the result of the previous one.
    ///
    /// # Examples
    ///
    /// ```
    /// # use floorplan_geom::core::math::Vector2;
    /// # use floorplan_geom::half_plane::HalfPlane;
    /// # use floorplan_geom::polygon::DiscretePolygon2d;
    /// let square: DiscretePolygon2d<f64> = DiscretePolygon2d::from_outer(vec![
    ///     Vector2::new(0.0, 0.0),
    ///     Vector2::new(4.0, 0.0),
    ///     Vector2::new(4.0, 4.0),
    ///     Vector2::new(0.0, 4.0),
    /// ]);
    /// // keep x <= 3
    /// let right: HalfPlane<f64> = HalfPlane::new(Vector2::new(-1.0, 0.0), 3.0);
    /// // keep y >= 1
    /// let bottom: HalfPlane<f64> = HalfPlane::new(Vector2::new(0.0, 1.0), -1.0);
    /// let result = right.cut(&[square], &[bottom]);
    /// assert_eq!(result.len(), 1);
    /// assert!((result[0].area() - 9.0).abs() < 1e-9);
    /// ```
    pub fn cut(
        &self,
        polygons: &[DiscretePolygon2d<T>],
        extra_planes: &[HalfPlane<T>],
    ) -> Vec<DiscretePolygon2d<T>> {
        let mut current = polygons.to_vec();
        for plane in std::iter::once(self).chain(extra_planes) {
            current = current
                .iter()
                .filter_map(|p| plane.clip_polygon(p))
                .collect();
            if current.is_empty() {
                break;
            }
        }

        current
    }

    /// Plain record copy of this plane.
    pub fn dump(&self) -> HalfPlaneData<T> {
        HalfPlaneData {
            normal: self.normal,
            offset: self.offset,
        }
    }

    /// Restore a plane from its record form.
    ///
    /// A record holding a unit normal is restored exactly, otherwise it is normalized as in
    /// [HalfPlane::new].
    pub fn load(data: &HalfPlaneData<T>) -> Self {
        let length = data.normal.length();
        if (length - T::one()).fuzzy_eq_zero() && data.offset.is_finite() {
            return HalfPlane {
                normal: data.normal,
                offset: data.offset,
            };
        }

        Self::new(data.normal, data.offset)
    }
}

impl<T> From<&Line2d<T>> for HalfPlane<T>
where
    T: Real,
{
    fn from(line: &Line2d<T>) -> Self {
        HalfPlane::from_line(line)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::traits::FuzzyEq;

    #[test]
    fn non_unit_normal_is_normalized() {
        let hp: HalfPlane<f64> = HalfPlane::new(Vector2::new(0.0, 2.0), -4.0);
        assert!(hp.normal().fuzzy_eq(Vector2::new(0.0, 1.0)));
        assert!(hp.offset_value().fuzzy_eq(-2.0));
        assert!(hp.distance(Vector2::new(7.0, 2.0)).fuzzy_eq(0.0));
    }

    #[test]
    fn degenerate_line() {
        let p: Vector2<f64> = Vector2::new(1.0, 1.0);
        let hp: HalfPlane<f64> = HalfPlane::from_points(p, p);
        assert!(hp.is_degenerate());
        assert!(hp.distance(Vector2::new(0.0, 0.0)).is_nan());
        assert!(hp.intersect(&HalfPlane::new(Vector2::new(1.0, 0.0), 0.0)).is_none());
    }

    #[test]
    fn offset_moves_boundary_along_normal() {
        let hp: HalfPlane<f64> = HalfPlane::from_points(Vector2::new(0.0, 0.0), Vector2::new(10.0, 0.0));
        let moved = hp.offset(2.0);
        assert!(moved.distance(Vector2::new(3.0, 2.0)).fuzzy_eq(0.0));
        assert!(moved.distance(Vector2::new(3.0, 5.0)).fuzzy_eq(3.0));
    }

    #[test]
    fn to_line_round_trip() {
        let hp: HalfPlane<f64> = HalfPlane::from_points(Vector2::new(1.0, 2.0), Vector2::new(-3.0, 5.0));
        let back: HalfPlane<f64> = HalfPlane::from_line(&hp.to_line());
        assert!(back.normal().fuzzy_eq(hp.normal()));
        assert!(back.offset_value().fuzzy_eq(hp.offset_value()));
    }

    #[test]
    fn clip_ring_fully_inside_and_outside() {
        let ring: Vec<Vector2<f64>> = vec![
            Vector2::new(0.0, 0.0),
            Vector2::new(1.0, 0.0),
            Vector2::new(1.0, 1.0),
        ];
        let keep_all: HalfPlane<f64> = HalfPlane::new(Vector2::new(0.0, 1.0), 5.0);
        assert_eq!(keep_all.clip_ring(&ring), ring);
        let keep_none: HalfPlane<f64> = HalfPlane::new(Vector2::new(0.0, 1.0), -5.0);
        assert!(keep_none.clip_ring(&ring).is_empty());
    }
}
