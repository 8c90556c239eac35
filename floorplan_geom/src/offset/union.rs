//! Merges raw offset rings with the positive fill rule.
//!
//! Rings are split at every intersection into slices. A slice is kept when the total winding
//! number just left of it is positive and just right of it is not, i.e. it separates covered from
//! uncovered space with the covered side on its left. Kept slices are stitched end to start into
//! closed loops (outer loops counter clockwise, holes clockwise).
use std::cmp::Ordering;

use static_aabb2d_index::{StaticAABB2DIndex, StaticAABB2DIndexBuilder};

use super::{OffsetOptions, Path};
use crate::{
    core::{
        math::{dist_squared, midpoint, min_max, point_from_parametric, segment_intr, SegmentIntr, Vector2},
        traits::Real,
    },
    error::OffsetError,
    polygon::{ring_remove_repeat_pos, ring_signed_area, rings_fuzzy_eq, segment_winding},
};

#[derive(Debug, Copy, Clone)]
struct RawSegment<T> {
    ring: usize,
    index: usize,
    v1: Vector2<T>,
    v2: Vector2<T>,
}

/// Ring point, `split` marks the points where slices start and end.
#[derive(Debug, Copy, Clone)]
struct SplitPoint<T> {
    pos: Vector2<T>,
    split: bool,
}

#[derive(Debug, Clone)]
struct Slice<T> {
    ring: usize,
    ring_len: usize,
    start_index: usize,
    end_index: usize,
    points: Path<T>,
}

fn index_error<E: std::fmt::Debug>(err: E) -> OffsetError {
    OffsetError::SpatialIndex(format!("{err:?}"))
}

fn build_segment_index<T>(segments: &[RawSegment<T>]) -> Result<StaticAABB2DIndex<T>, OffsetError>
where
    T: Real,
{
    let mut builder = StaticAABB2DIndexBuilder::new(segments.len());
    for s in segments {
        let (min_x, max_x) = min_max(s.v1.x, s.v2.x);
        let (min_y, max_y) = min_max(s.v1.y, s.v2.y);
        builder.add(min_x, min_y, max_x, max_y);
    }

    builder.build().map_err(index_error)
}

/// Intersect points found on each segment (indexed like `segments`).
fn find_split_points<T>(
    segments: &[RawSegment<T>],
    ring_lens: &[usize],
    index: &StaticAABB2DIndex<T>,
    eps: T,
) -> Vec<Vec<Vector2<T>>>
where
    T: Real,
{
    let mut split_points = vec![Vec::new(); segments.len()];
    let mut query_results = Vec::new();
    let mut query_stack = Vec::with_capacity(8);
    let mut intersect_count = 0usize;

    for (i, s) in segments.iter().enumerate() {
        let (min_x, max_x) = min_max(s.v1.x, s.v2.x);
        let (min_y, max_y) = min_max(s.v1.y, s.v2.y);
        query_results.clear();
        index.visit_query_with_stack(
            min_x - eps,
            min_y - eps,
            max_x + eps,
            max_y + eps,
            &mut |j: usize| {
                if j > i {
                    query_results.push(j);
                }
            },
            &mut query_stack,
        );

        for &j in query_results.iter() {
            let t = &segments[j];
            let ring_len = ring_lens[s.ring];
            let adjacent = s.ring == t.ring
                && (t.index == (s.index + 1) % ring_len || s.index == (t.index + 1) % ring_len);

            match segment_intr(s.v1, s.v2, t.v1, t.v2, eps) {
                SegmentIntr::Crossing { seg1_t, .. } if !adjacent => {
                    let p = point_from_parametric(s.v1, s.v2, seg1_t);
                    split_points[i].push(p);
                    split_points[j].push(p);
                    intersect_count += 1;
                }
                SegmentIntr::Overlap { seg2_t0, seg2_t1 } => {
                    let p0 = point_from_parametric(t.v1, t.v2, seg2_t0);
                    let p1 = point_from_parametric(t.v1, t.v2, seg2_t1);
                    split_points[i].extend([p0, p1]);
                    split_points[j].extend([p0, p1]);
                    intersect_count += 1;
                }
                _ => {}
            }
        }
    }

    log::trace!(
        "{} intersects between {} raw segments",
        intersect_count,
        segments.len()
    );
    split_points
}

fn push_split_point<T>(points: &mut Vec<SplitPoint<T>>, pos: Vector2<T>, split: bool, eps: T)
where
    T: Real,
{
    if let Some(last) = points.last_mut() {
        if last.pos.fuzzy_eq_eps(pos, eps) {
            last.split |= split;
            return;
        }
    }

    points.push(SplitPoint { pos, split });
}

/// Ring points with the intersect points inserted in order along each segment.
fn split_ring<T>(ring: &[Vector2<T>], split_points: &[Vec<Vector2<T>>], eps: T) -> Vec<SplitPoint<T>>
where
    T: Real,
{
    let n = ring.len();
    let mut vertex_split = vec![false; n];
    let mut interior: Vec<Vec<(T, Vector2<T>)>> = vec![Vec::new(); n];

    for i in 0..n {
        let v1 = ring[i];
        let v2 = ring[(i + 1) % n];
        let dir = v2 - v1;
        let length_squared = dir.length_squared();
        for &p in split_points[i].iter() {
            if p.fuzzy_eq_eps(v1, eps) {
                vertex_split[i] = true;
            } else if p.fuzzy_eq_eps(v2, eps) {
                vertex_split[(i + 1) % n] = true;
            } else {
                interior[i].push(((p - v1).dot(dir) / length_squared, p));
            }
        }
    }

    let mut result = Vec::with_capacity(n + interior.iter().map(Vec::len).sum::<usize>());
    for i in 0..n {
        push_split_point(&mut result, ring[i], vertex_split[i], eps);
        interior[i].sort_unstable_by(|a, b| a.0.partial_cmp(&b.0).unwrap_or(Ordering::Equal));
        for &(_, p) in interior[i].iter() {
            push_split_point(&mut result, p, true, eps);
        }
    }

    if result.len() > 1 && result[result.len() - 1].pos.fuzzy_eq_eps(result[0].pos, eps) {
        if let Some(last) = result.pop() {
            result[0].split |= last.split;
        }
    }

    result
}

/// Winding number queries against all raw segments.
struct WindingQuery<'a, T: Real> {
    segments: &'a [RawSegment<T>],
    index: &'a StaticAABB2DIndex<T>,
    max_x: T,
    sample_dist: T,
    pos_equal_eps: T,
}

impl<T> WindingQuery<'_, T>
where
    T: Real,
{
    fn winding_number(&self, point: Vector2<T>, query_stack: &mut Vec<usize>) -> i32 {
        let mut winding = 0;
        let max_x = num_traits::real::Real::max(self.max_x, point.x);
        self.index.visit_query_with_stack(
            point.x,
            point.y,
            max_x,
            point.y,
            &mut |i: usize| {
                let s = &self.segments[i];
                winding += segment_winding(s.v1, s.v2, point);
            },
            query_stack,
        );

        winding
    }

    /// Returns `true` if the covered side of `points` is on its left and the uncovered side on
    /// its right, probing either side of the longest segment.
    fn is_boundary(&self, points: &[Vector2<T>], closed: bool, query_stack: &mut Vec<usize>) -> bool {
        let n = points.len();
        if n < 2 {
            return false;
        }

        let segment_count = if closed { n } else { n - 1 };
        let mut longest: Option<(Vector2<T>, Vector2<T>)> = None;
        let mut longest_length_squared = T::zero();
        for i in 0..segment_count {
            let v1 = points[i];
            let v2 = points[(i + 1) % n];
            let length_squared = dist_squared(v1, v2);
            if length_squared > longest_length_squared {
                longest_length_squared = length_squared;
                longest = Some((v1, v2));
            }
        }

        let Some((v1, v2)) = longest else {
            return false;
        };

        let length = longest_length_squared.sqrt();
        if length < self.pos_equal_eps {
            return false;
        }

        let sample = num_traits::real::Real::min(self.sample_dist, length / T::four());
        let mid = midpoint(v1, v2);
        let left = (v2 - v1).unit_perp().scale(sample);
        let left_winding = self.winding_number(mid + left, query_stack);
        let right_winding = self.winding_number(mid - left, query_stack);

        left_winding > 0 && right_winding <= 0
    }
}

/// Merge `rings` with the positive fill rule into closed loops.
pub(crate) fn positive_union<T>(
    rings: &[Path<T>],
    options: &OffsetOptions<T>,
) -> Result<Vec<Path<T>>, OffsetError>
where
    T: Real,
{
    let pos_equal_eps = options.pos_equal_eps;
    let mut segments = Vec::new();
    let mut ring_starts = Vec::with_capacity(rings.len());
    let ring_lens: Vec<usize> = rings.iter().map(Vec::len).collect();
    for (ring_idx, ring) in rings.iter().enumerate() {
        ring_starts.push(segments.len());
        let n = ring.len();
        segments.extend((0..n).map(|i| RawSegment {
            ring: ring_idx,
            index: i,
            v1: ring[i],
            v2: ring[(i + 1) % n],
        }));
    }

    if segments.is_empty() {
        return Ok(Vec::new());
    }

    let index = build_segment_index(&segments)?;
    let split_points = find_split_points(&segments, &ring_lens, &index, pos_equal_eps);
    let max_x = segments.iter().fold(segments[0].v1.x, |acc, s| {
        num_traits::real::Real::max(acc, num_traits::real::Real::max(s.v1.x, s.v2.x))
    });

    let winding = WindingQuery {
        segments: &segments,
        index: &index,
        max_x,
        sample_dist: options.slice_join_eps,
        pos_equal_eps,
    };

    let mut query_stack = Vec::with_capacity(8);
    let mut loops = Vec::new();
    let mut slices = Vec::new();
    for (ring_idx, ring) in rings.iter().enumerate() {
        let start = ring_starts[ring_idx];
        let points = split_ring(ring, &split_points[start..start + ring.len()], pos_equal_eps);
        let split_indexes: Vec<usize> = points
            .iter()
            .enumerate()
            .filter(|(_, p)| p.split)
            .map(|(i, _)| i)
            .collect();

        if split_indexes.is_empty() {
            let ring_points: Path<T> = points.iter().map(|p| p.pos).collect();
            if winding.is_boundary(&ring_points, true, &mut query_stack) {
                loops.push(ring_points);
            }
            continue;
        }

        let m = points.len();
        for (j, &a) in split_indexes.iter().enumerate() {
            let b = split_indexes[(j + 1) % split_indexes.len()];
            // a == b (single split point) walks the full ring
            let count = if b > a { b - a } else { b + m - a };
            let slice_points: Path<T> = (0..=count).map(|k| points[(a + k) % m].pos).collect();
            if winding.is_boundary(&slice_points, false, &mut query_stack) {
                slices.push(Slice {
                    ring: ring_idx,
                    ring_len: m,
                    start_index: a,
                    end_index: b,
                    points: slice_points,
                });
            }
        }
    }

    let slices = dedup_slices(slices, pos_equal_eps);
    log::trace!(
        "{} boundary slices, {} unsplit loops",
        slices.len(),
        loops.len()
    );
    loops.extend(stitch_slices(&slices, options)?);

    Ok(loops
        .into_iter()
        .map(|l| ring_remove_repeat_pos(&l, pos_equal_eps))
        .filter(|l| l.len() >= 3 && ring_signed_area(l).abs() > pos_equal_eps)
        .collect())
}

/// Coincident boundaries (e.g. identical edges of two rings) produce identical slices, keep one.
fn dedup_slices<T>(slices: Vec<Slice<T>>, eps: T) -> Vec<Slice<T>>
where
    T: Real,
{
    let mut kept: Vec<Slice<T>> = Vec::with_capacity(slices.len());
    for slice in slices {
        if !kept
            .iter()
            .any(|k| rings_fuzzy_eq(&k.points, &slice.points, eps))
        {
            kept.push(slice);
        }
    }

    kept
}

fn stitch_slices<T>(slices: &[Slice<T>], options: &OffsetOptions<T>) -> Result<Vec<Path<T>>, OffsetError>
where
    T: Real,
{
    let mut result = Vec::new();
    if slices.is_empty() {
        return Ok(result);
    }

    let join_eps = options.slice_join_eps;

    let aabb_index = {
        let mut builder = StaticAABB2DIndexBuilder::new(slices.len());
        for slice in slices {
            let start_point = slice.points[0];
            builder.add(
                start_point.x - join_eps,
                start_point.y - join_eps,
                start_point.x + join_eps,
                start_point.y + join_eps,
            );
        }
        builder.build().map_err(index_error)?
    };

    let mut visited_indexes = vec![false; slices.len()];
    let mut query_results = Vec::new();
    let mut query_stack = Vec::with_capacity(8);
    let mut open_chains = 0;

    for i in 0..slices.len() {
        if visited_indexes[i] {
            continue;
        }

        visited_indexes[i] = true;

        let mut current_loop = slices[i].points.clone();
        let mut current_index = i;
        let initial_start_point = slices[i].points[0];
        let mut loop_count = 0;
        let max_loop_count = slices.len();
        let closed = loop {
            if loop_count > max_loop_count {
                return Err(OffsetError::StitchFailed {
                    open_chains: open_chains + 1,
                });
            }
            loop_count += 1;

            let Some(&current_end_point) = current_loop.last() else {
                break false;
            };

            if current_loop.len() > 2 && current_end_point.fuzzy_eq_eps(initial_start_point, join_eps)
            {
                break true;
            }

            query_results.clear();
            aabb_index.visit_query_with_stack(
                current_end_point.x - join_eps,
                current_end_point.y - join_eps,
                current_end_point.x + join_eps,
                current_end_point.y + join_eps,
                &mut |j: usize| {
                    if !visited_indexes[j] {
                        query_results.push(j);
                    }
                },
                &mut query_stack,
            );

            if query_results.is_empty() {
                break false;
            }

            // prefer continuing along the same ring, closest forward start first
            let current_slice = &slices[current_index];
            query_results.sort_unstable_by_key(|&j| {
                let s = &slices[j];
                if s.ring == current_slice.ring {
                    (0, (s.start_index + s.ring_len - current_slice.end_index) % s.ring_len)
                } else {
                    (1, s.ring)
                }
            });

            let next_index = query_results[0];
            visited_indexes[next_index] = true;
            current_loop.extend(slices[next_index].points.iter().skip(1));
            current_index = next_index;
        };

        if closed {
            current_loop.pop();
            result.push(current_loop);
        } else {
            open_chains += 1;
            log::trace!(
                "slice chain starting at {:?} did not close",
                initial_start_point
            );
        }
    }

    if open_chains > 0 {
        return Err(OffsetError::StitchFailed { open_chains });
    }

    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rect(x0: f64, y0: f64, x1: f64, y1: f64) -> Path<f64> {
        vec![
            Vector2::new(x0, y0),
            Vector2::new(x1, y0),
            Vector2::new(x1, y1),
            Vector2::new(x0, y1),
        ]
    }

    #[test]
    fn overlapping_squares_merge() {
        let rings = vec![rect(-1.0, -1.0, 11.0, 11.0), rect(4.0, 4.0, 16.0, 16.0)];
        let loops = positive_union(&rings, &OffsetOptions::default()).unwrap();
        assert_eq!(loops.len(), 1);
        assert!((ring_signed_area(&loops[0]) - 239.0).abs() < 1e-9);
    }

    #[test]
    fn inverted_ring_is_removed() {
        let mut ring = rect(0.0, 0.0, 4.0, 4.0);
        ring.reverse();
        let loops = positive_union(&[ring], &OffsetOptions::default()).unwrap();
        assert!(loops.is_empty());
    }

    #[test]
    fn rooms_sharing_a_wall_merge() {
        let rings = vec![rect(0.0, 0.0, 10.0, 10.0), rect(10.0, 0.0, 20.0, 10.0)];
        let loops = positive_union(&rings, &OffsetOptions::default()).unwrap();
        assert_eq!(loops.len(), 1);
        assert!((ring_signed_area(&loops[0]) - 200.0).abs() < 1e-9);
    }

    #[test]
    fn nested_rings_keep_outer_only() {
        let rings = vec![rect(0.0, 0.0, 10.0, 10.0), rect(2.0, 2.0, 4.0, 4.0)];
        let loops = positive_union(&rings, &OffsetOptions::default()).unwrap();
        assert_eq!(loops.len(), 1);
        assert!((ring_signed_area(&loops[0]) - 100.0).abs() < 1e-9);
    }
}
