use super::{
    raw_offset::{offset_closed, offset_open, offset_point, RawOffsetContext},
    EndType, JoinType, Path,
};
use crate::{
    core::{math::Vector2, traits::Real},
    error::OffsetError,
    polygon::{ring_orientation, ring_remove_repeat_pos, Orientation},
};

#[derive(Debug, Clone)]
struct PathGroup<T> {
    paths: Vec<Path<T>>,
    join_type: JoinType,
    end_type: EndType,
}

/// Collects paths with their join/end types and turns them into raw offset rings.
///
/// Raw rings may overlap and self intersect, they must be merged with the positive fill rule to
/// get the final offset. An accumulator is created for one offset call and dropped with it.
#[derive(Debug, Clone)]
pub struct OffsetAccumulator<T = f64> {
    groups: Vec<PathGroup<T>>,
    miter_limit: T,
    arc_tolerance: T,
    pos_equal_eps: T,
    path_count: usize,
}

impl<T> OffsetAccumulator<T>
where
    T: Real,
{
    pub fn new(miter_limit: T, arc_tolerance: T, pos_equal_eps: T) -> Self {
        OffsetAccumulator {
            groups: Vec::new(),
            miter_limit,
            arc_tolerance,
            pos_equal_eps,
            path_count: 0,
        }
    }

    /// Number of paths added (including paths skipped as degenerate).
    pub fn path_count(&self) -> usize {
        self.path_count
    }

    /// Remove all added paths.
    pub fn clear(&mut self) {
        self.groups.clear();
        self.path_count = 0;
    }

    /// Add a single path, see [OffsetAccumulator::add_paths].
    pub fn add_path(
        &mut self,
        path: &[Vector2<T>],
        join_type: JoinType,
        end_type: EndType,
    ) -> Result<(), OffsetError> {
        self.add_paths(&[path.to_vec()], join_type, end_type)
    }

    /// Add a group of paths sharing `join_type` and `end_type`.
    ///
    /// Repeated positions are removed. Paths that cannot produce an offset (empty paths, closed
    /// polygons with less than 3 distinct points) are skipped. Fails if any coordinate is not
    /// finite, in which case nothing from `paths` is added.
    pub fn add_paths(
        &mut self,
        paths: &[Path<T>],
        join_type: JoinType,
        end_type: EndType,
    ) -> Result<(), OffsetError> {
        for (i, path) in paths.iter().enumerate() {
            if let Some(vertex) = path.iter().position(|p| !p.is_finite()) {
                return Err(OffsetError::NonFiniteCoordinate {
                    path: self.path_count + i,
                    vertex,
                });
            }
        }

        let mut group = PathGroup {
            paths: Vec::with_capacity(paths.len()),
            join_type,
            end_type,
        };

        for path in paths {
            self.path_count += 1;
            let cleaned = if end_type.is_open() {
                remove_consecutive_repeats(path, self.pos_equal_eps)
            } else {
                ring_remove_repeat_pos(path, self.pos_equal_eps)
            };

            let min_len = if end_type == EndType::ClosedPolygon { 3 } else { 1 };
            if cleaned.len() < min_len {
                log::trace!("skipping degenerate path with {} points", cleaned.len());
                continue;
            }

            group.paths.push(cleaned);
        }

        if !group.paths.is_empty() {
            self.groups.push(group);
        }

        Ok(())
    }

    /// Returns `true` if closed polygon paths must be reversed so that the outer most ring is
    /// counter clockwise.
    fn closed_polygons_reversed(&self) -> bool {
        let mut lowest: Option<(Vector2<T>, &Path<T>)> = None;
        for group in self
            .groups
            .iter()
            .filter(|g| g.end_type == EndType::ClosedPolygon)
        {
            for path in group.paths.iter() {
                for &p in path.iter() {
                    let is_lower = match lowest {
                        None => true,
                        Some((l, _)) => p.y < l.y || (p.y == l.y && p.x < l.x),
                    };
                    if is_lower {
                        lowest = Some((p, path));
                    }
                }
            }
        }

        matches!(lowest, Some((_, path)) if ring_orientation(path) == Orientation::Clockwise)
    }

    /// Build the raw offset rings of every added path for `delta`.
    ///
    /// When `|delta|` is within the position epsilon the closed polygons are returned as given
    /// (orientation normalized) and other paths are dropped.
    pub fn execute(&self, delta: T) -> Vec<Path<T>> {
        let reverse_closed = self.closed_polygons_reversed();
        let oriented = |path: &Path<T>| -> Path<T> {
            if reverse_closed {
                path.iter().rev().copied().collect()
            } else {
                path.clone()
            }
        };

        let mut result = Vec::new();
        if delta.abs() < self.pos_equal_eps {
            for group in self
                .groups
                .iter()
                .filter(|g| g.end_type == EndType::ClosedPolygon)
            {
                result.extend(group.paths.iter().map(oriented));
            }
            return result;
        }

        let delta_abs = delta.abs();
        let ctx = RawOffsetContext::new(
            delta_abs,
            self.miter_limit,
            self.arc_tolerance,
            self.pos_equal_eps,
        );

        for group in self.groups.iter() {
            for path in group.paths.iter() {
                match group.end_type {
                    EndType::ClosedPolygon => {
                        result.push(offset_closed(&ctx, &oriented(path), delta, group.join_type));
                    }
                    EndType::ClosedLine if delta > T::zero() => {
                        if path.len() < 3 {
                            // a closed line without area is a doubled back segment
                            result.extend(offset_open(
                                &ctx,
                                path,
                                delta_abs,
                                group.join_type,
                                EndType::OpenButt,
                            ));
                            continue;
                        }
                        let reversed: Path<T> = path.iter().rev().copied().collect();
                        result.push(offset_closed(&ctx, path, delta_abs, group.join_type));
                        result.push(offset_closed(&ctx, &reversed, delta_abs, group.join_type));
                    }
                    end_type if end_type.is_open() && delta > T::zero() => {
                        if path.len() == 1 {
                            result.extend(offset_point(&ctx, path[0], delta_abs, end_type));
                        } else {
                            result.extend(offset_open(
                                &ctx,
                                path,
                                delta_abs,
                                group.join_type,
                                end_type,
                            ));
                        }
                    }
                    _ => {}
                }
            }
        }

        result.retain(|r| r.len() >= 3);
        result
    }
}

fn remove_consecutive_repeats<T>(path: &[Vector2<T>], pos_equal_eps: T) -> Path<T>
where
    T: Real,
{
    let mut result: Path<T> = Vec::with_capacity(path.len());
    for &p in path {
        match result.last() {
            Some(last) if last.fuzzy_eq_eps(p, pos_equal_eps) => {}
            _ => result.push(p),
        }
    }

    result
}
