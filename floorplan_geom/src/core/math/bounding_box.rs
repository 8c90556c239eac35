use super::Vector2;
use crate::core::traits::Real;
use static_aabb2d_index::AABB;

/// Axis aligned 2D bounding box.
///
/// A box built from no points is not representable, functions that may see empty input return
/// `Option<BoundingBox2d>` instead.
#[derive(Debug, Copy, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BoundingBox2d<T = f64> {
    pub min: Vector2<T>,
    pub max: Vector2<T>,
}

impl<T> BoundingBox2d<T>
where
    T: Real,
{
    /// Create a box from two corners, the corners are reordered so `min <= max` componentwise.
    pub fn new(corner1: Vector2<T>, corner2: Vector2<T>) -> Self {
        let min_x = num_traits::real::Real::min(corner1.x, corner2.x);
        let min_y = num_traits::real::Real::min(corner1.y, corner2.y);
        let max_x = num_traits::real::Real::max(corner1.x, corner2.x);
        let max_y = num_traits::real::Real::max(corner1.y, corner2.y);
        BoundingBox2d {
            min: Vector2::new(min_x, min_y),
            max: Vector2::new(max_x, max_y),
        }
    }

    /// Box of a single point.
    pub fn from_point(point: Vector2<T>) -> Self {
        BoundingBox2d {
            min: point,
            max: point,
        }
    }

    /// Box of all `points`, `None` if the iterator is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// # use floorplan_geom::core::math::*;
    /// let bb: BoundingBox2d<f64> = BoundingBox2d::from_points([
    ///     Vector2::new(1.0, 2.0),
    ///     Vector2::new(-1.0, 5.0),
    ///     Vector2::new(3.0, 0.0),
    /// ])
    /// .unwrap();
    /// assert_eq!(bb.min, Vector2::new(-1.0, 0.0));
    /// assert_eq!(bb.max, Vector2::new(3.0, 5.0));
    /// ```
    pub fn from_points<I>(points: I) -> Option<Self>
    where
        I: IntoIterator<Item = Vector2<T>>,
    {
        let mut iter = points.into_iter();
        let mut result = BoundingBox2d::from_point(iter.next()?);
        for p in iter {
            result.append_point(p);
        }

        Some(result)
    }

    /// Grow the box to include `point`.
    pub fn append_point(&mut self, point: Vector2<T>) {
        if point.x < self.min.x {
            self.min.x = point.x;
        }
        if point.x > self.max.x {
            self.max.x = point.x;
        }
        if point.y < self.min.y {
            self.min.y = point.y;
        }
        if point.y > self.max.y {
            self.max.y = point.y;
        }
    }

    /// Grow the box to include `other`.
    pub fn append_bound(&mut self, other: &BoundingBox2d<T>) {
        self.append_point(other.min);
        self.append_point(other.max);
    }

    /// Returns `true` if all coordinates are finite and `min <= max` componentwise.
    pub fn is_valid(&self) -> bool {
        self.min.is_finite()
            && self.max.is_finite()
            && self.min.x <= self.max.x
            && self.min.y <= self.max.y
    }

    pub fn width(&self) -> T {
        self.max.x - self.min.x
    }

    pub fn height(&self) -> T {
        self.max.y - self.min.y
    }

    pub fn center(&self) -> Vector2<T> {
        Vector2::new(
            (self.min.x + self.max.x) / T::two(),
            (self.min.y + self.max.y) / T::two(),
        )
    }

    /// Returns `true` if `point` is inside or within `epsilon` of the box.
    pub fn contains_point_eps(&self, point: Vector2<T>, epsilon: T) -> bool {
        point
            .x
            .fuzzy_in_range_eps(self.min.x, self.max.x, false, false, epsilon)
            && point
                .y
                .fuzzy_in_range_eps(self.min.y, self.max.y, false, false, epsilon)
    }

    pub fn contains_point(&self, point: Vector2<T>) -> bool {
        self.contains_point_eps(point, T::fuzzy_epsilon())
    }

    /// Corner ring of the box in counter clockwise order starting at `min`.
    pub fn to_polygon(&self) -> Vec<Vector2<T>> {
        vec![
            self.min,
            Vector2::new(self.max.x, self.min.y),
            self.max,
            Vector2::new(self.min.x, self.max.y),
        ]
    }

    /// Convert into the box type used by the spatial index.
    pub fn to_aabb(&self) -> AABB<T> {
        AABB::new(self.min.x, self.min.y, self.max.x, self.max.y)
    }
}

impl<T> From<AABB<T>> for BoundingBox2d<T>
where
    T: Real,
{
    fn from(aabb: AABB<T>) -> Self {
        BoundingBox2d {
            min: Vector2::new(aabb.min_x, aabb.min_y),
            max: Vector2::new(aabb.max_x, aabb.max_y),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn append_bound_grows() {
        let mut a: BoundingBox2d<f64> = BoundingBox2d::new(Vector2::new(0.0, 0.0), Vector2::new(1.0, 1.0));
        let b: BoundingBox2d<f64> = BoundingBox2d::new(Vector2::new(3.0, -2.0), Vector2::new(2.0, 0.5));
        a.append_bound(&b);
        assert_eq!(a.min, Vector2::new(0.0, -2.0));
        assert_eq!(a.max, Vector2::new(3.0, 1.0));
        assert!(a.is_valid());
    }

    #[test]
    fn nan_box_is_invalid() {
        let bb: BoundingBox2d<f64> = BoundingBox2d::from_point(Vector2::new(f64::NAN, 0.0));
        assert!(!bb.is_valid());
    }

    #[test]
    fn polygon_is_ccw_corners() {
        let bb: BoundingBox2d<f64> = BoundingBox2d::new(Vector2::new(0.0, 0.0), Vector2::new(2.0, 1.0));
        let ring = bb.to_polygon();
        assert_eq!(ring.len(), 4);
        assert_eq!(ring[1], Vector2::new(2.0, 0.0));
        assert_eq!(ring[3], Vector2::new(0.0, 1.0));
    }
}
