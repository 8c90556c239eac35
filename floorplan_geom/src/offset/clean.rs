use super::Path;
use crate::core::{
    math::{dist_squared, line_seg_dist_squared, Vector2},
    traits::Real,
};

/// Simplify a closed ring by removing vertexes within `distance` of their previous vertex or of
/// the segment joining their neighbors.
///
/// Passes repeat until nothing is removed. Returns an empty path if less than 3 points remain.
///
/// # Examples
///
/// ```
/// # use floorplan_geom::core::math::Vector2;
/// # use floorplan_geom::offset::clean_polygon;
/// let ring: Vec<Vector2<f64>> = vec![
///     Vector2::new(0.0, 0.0),
///     Vector2::new(5.0, 0.001),
///     Vector2::new(10.0, 0.0),
///     Vector2::new(10.0, 10.0),
///     Vector2::new(0.0, 10.0),
/// ];
/// assert_eq!(clean_polygon(&ring, 0.01).len(), 4);
/// ```
pub fn clean_polygon<T>(ring: &[Vector2<T>], distance: T) -> Path<T>
where
    T: Real,
{
    let dist_sq = distance * distance;
    let mut current: Path<T> = ring.to_vec();

    loop {
        if current.len() < 3 {
            return Vec::new();
        }

        let n = current.len();
        let mut removed = vec![false; n];
        let mut removed_count = 0;
        // last kept vertex
        let mut prev = n - 1;
        for i in 0..n {
            let next = if i + 1 == n {
                removed.iter().position(|&r| !r).unwrap_or(0)
            } else {
                i + 1
            };
            let p = current[i];
            if dist_squared(current[prev], p) <= dist_sq
                || line_seg_dist_squared(current[prev], current[next], p) <= dist_sq
            {
                removed[i] = true;
                removed_count += 1;
            } else {
                prev = i;
            }
        }

        if removed_count == 0 {
            return current;
        }

        current = current
            .iter()
            .zip(removed.iter())
            .filter(|(_, &r)| !r)
            .map(|(&p, _)| p)
            .collect();
    }
}

/// [clean_polygon] applied to every ring, dropping rings that collapse.
pub fn clean_polygons<T>(rings: &[Path<T>], distance: T) -> Vec<Path<T>>
where
    T: Real,
{
    rings
        .iter()
        .map(|r| clean_polygon(r, distance))
        .filter(|r| !r.is_empty())
        .collect()
}
