//! Raw offset ring construction for single paths.
//!
//! Convex corners get the requested join, concave corners detour through the original vertex
//! (the detour loop is removed when the raw rings are merged). Open paths are walked forward and
//! back as one closed ring with the end points treated as caps.
use super::{EndType, JoinType, Path};
use crate::core::{math::Vector2, traits::Real};

/// Precomputed values shared by all rings of one offset call.
#[derive(Debug, Copy, Clone)]
pub(crate) struct RawOffsetContext<T> {
    /// Minimum `1 + cos(angle)` between adjacent normals for which a miter is kept.
    miter_threshold: T,
    /// Number of round join segments per radian.
    steps_per_rad: T,
    pos_equal_eps: T,
}

impl<T> RawOffsetContext<T>
where
    T: Real,
{
    pub fn new(delta_abs: T, miter_limit: T, arc_tolerance: T, pos_equal_eps: T) -> Self {
        let max_tolerance = delta_abs / T::four();
        let tolerance = if arc_tolerance <= T::zero() {
            num_traits::real::Real::min(T::cast(0.25), max_tolerance)
        } else {
            num_traits::real::Real::min(arc_tolerance, max_tolerance)
        };

        // segment angle for which the chord deviates from the arc by `tolerance`
        let step_angle = T::two() * (T::one() - tolerance / delta_abs).acos();
        let steps_per_rad = if step_angle > T::zero() {
            T::one() / step_angle
        } else {
            T::one()
        };

        let miter_threshold = if miter_limit > T::one() {
            T::two() / (miter_limit * miter_limit)
        } else {
            T::two()
        };

        RawOffsetContext {
            miter_threshold,
            steps_per_rad,
            pos_equal_eps,
        }
    }

    fn round_steps(&self, angle: T) -> usize {
        let steps = (self.steps_per_rad * angle.abs()).round();
        num_traits::ToPrimitive::to_usize(&steps)
            .unwrap_or(1)
            .max(1)
    }
}

/// Ring under construction, consecutive fuzzy equal points are skipped.
struct RingBuilder<T> {
    points: Path<T>,
    pos_equal_eps: T,
}

impl<T> RingBuilder<T>
where
    T: Real,
{
    fn new(capacity: usize, pos_equal_eps: T) -> Self {
        RingBuilder {
            points: Vec::with_capacity(capacity),
            pos_equal_eps,
        }
    }

    fn add(&mut self, point: Vector2<T>) {
        if let Some(last) = self.points.last() {
            if last.fuzzy_eq_eps(point, self.pos_equal_eps) {
                return;
            }
        }
        self.points.push(point);
    }

    fn finish(mut self) -> Path<T> {
        while self.points.len() > 1
            && self.points[self.points.len() - 1].fuzzy_eq_eps(self.points[0], self.pos_equal_eps)
        {
            self.points.pop();
        }
        self.points
    }
}

/// Unit right hand normal of every segment `pts[i] -> pts[i + 1]` (wrapping).
fn segment_normals<T>(pts: &[Vector2<T>]) -> Vec<Vector2<T>>
where
    T: Real,
{
    let n = pts.len();
    (0..n)
        .map(|i| (pts[(i + 1) % n] - pts[i]).right_perp().normalize())
        .collect()
}

/// Raw offset ring of a closed ring, `delta` is applied along the right hand normals (outward for
/// a counter clockwise ring).
pub(crate) fn offset_closed<T>(
    ctx: &RawOffsetContext<T>,
    ring: &[Vector2<T>],
    delta: T,
    join_type: JoinType,
) -> Path<T>
where
    T: Real,
{
    walk_ring(ctx, ring, delta, join_type, None)
}

/// Raw offset ring around an open path with at least 2 points, `delta_abs` must be positive.
pub(crate) fn offset_open<T>(
    ctx: &RawOffsetContext<T>,
    path: &[Vector2<T>],
    delta_abs: T,
    join_type: JoinType,
    end_type: EndType,
) -> Option<Path<T>>
where
    T: Real,
{
    match path.len() {
        0 => return None,
        1 => return offset_point(ctx, path[0], delta_abs, end_type),
        _ => {}
    }

    // forward then back, both end points become 180 degree turns
    let n = path.len();
    let mut doubled: Path<T> = Vec::with_capacity(2 * n - 2);
    doubled.extend_from_slice(path);
    doubled.extend(path[1..n - 1].iter().rev());

    Some(walk_ring(
        ctx,
        &doubled,
        delta_abs,
        join_type,
        Some(Caps {
            first: 0,
            second: n - 1,
            end_type,
        }),
    ))
}

/// Shape covering a single point offset as an open path: circle for round ends, square for
/// square ends and nothing for butt ends.
pub(crate) fn offset_point<T>(
    ctx: &RawOffsetContext<T>,
    point: Vector2<T>,
    delta_abs: T,
    end_type: EndType,
) -> Option<Path<T>>
where
    T: Real,
{
    match end_type {
        EndType::OpenRound => {
            let steps = ctx.round_steps(T::tau()).max(4);
            let step = T::tau() / T::cast(steps as f64);
            let radius = Vector2::new(delta_abs, T::zero());
            Some(
                (0..steps)
                    .map(|i| point + radius.rotate(step * T::cast(i as f64)))
                    .collect(),
            )
        }
        EndType::OpenSquare => Some(vec![
            Vector2::new(point.x - delta_abs, point.y - delta_abs),
            Vector2::new(point.x + delta_abs, point.y - delta_abs),
            Vector2::new(point.x + delta_abs, point.y + delta_abs),
            Vector2::new(point.x - delta_abs, point.y + delta_abs),
        ]),
        _ => None,
    }
}

struct Caps {
    first: usize,
    second: usize,
    end_type: EndType,
}

fn walk_ring<T>(
    ctx: &RawOffsetContext<T>,
    pts: &[Vector2<T>],
    delta: T,
    join_type: JoinType,
    caps: Option<Caps>,
) -> Path<T>
where
    T: Real,
{
    let n = pts.len();
    let normals = segment_normals(pts);
    let mut builder = RingBuilder::new(2 * n, ctx.pos_equal_eps);

    for k in 0..n {
        let prev = (k + n - 1) % n;
        let a = normals[prev];
        let b = normals[k];

        if let Some(caps) = &caps {
            if k == caps.first || k == caps.second {
                add_cap(ctx, &mut builder, pts[prev], pts[k], a, delta, caps.end_type);
                continue;
            }
        }

        add_join(ctx, &mut builder, pts, k, a, b, delta, join_type);
    }

    builder.finish()
}

#[allow(clippy::too_many_arguments)]
fn add_join<T>(
    ctx: &RawOffsetContext<T>,
    builder: &mut RingBuilder<T>,
    pts: &[Vector2<T>],
    k: usize,
    a: Vector2<T>,
    b: Vector2<T>,
    delta: T,
    join_type: JoinType,
) where
    T: Real,
{
    let p = pts[k];
    let sin_a = a.perp_dot(b);
    let cos_a = a.dot(b);
    let offset_a = a.scale(delta);
    let offset_b = b.scale(delta);

    let nearly_collinear = (sin_a * delta).abs() < ctx.pos_equal_eps;
    if nearly_collinear && cos_a > T::zero() {
        builder.add(p + offset_a);
        return;
    }

    let convex = nearly_collinear || sin_a * delta > T::zero();
    if !convex {
        // concave, detour through the vertex
        builder.add(p + offset_a);
        builder.add(p);
        builder.add(p + offset_b);
        return;
    }

    let n = pts.len();
    let incoming = (p - pts[(k + n - 1) % n]).normalize();
    let outgoing = (pts[(k + 1) % n] - p).normalize();
    match join_type {
        JoinType::Miter => {
            let r = T::one() + cos_a;
            if r >= ctx.miter_threshold {
                builder.add(p + (a + b).scale(delta / r));
            } else {
                add_square(builder, p, offset_a, offset_b, incoming, outgoing);
            }
        }
        JoinType::Square => add_square(builder, p, offset_a, offset_b, incoming, outgoing),
        JoinType::Round => {
            let sweep = if nearly_collinear {
                // reversal, go around the tip on the offset side
                T::pi() * delta.signum()
            } else {
                T::atan2(offset_a.perp_dot(offset_b), offset_a.dot(offset_b))
            };
            add_round(ctx, builder, p, offset_a, sweep);
        }
    }
}

fn add_cap<T>(
    ctx: &RawOffsetContext<T>,
    builder: &mut RingBuilder<T>,
    prev: Vector2<T>,
    p: Vector2<T>,
    a: Vector2<T>,
    delta_abs: T,
    end_type: EndType,
) where
    T: Real,
{
    let offset_a = a.scale(delta_abs);
    let offset_b = -offset_a;
    let forward = (p - prev).normalize();
    match end_type {
        EndType::OpenSquare => add_square(builder, p, offset_a, offset_b, forward, -forward),
        EndType::OpenRound => add_round(ctx, builder, p, offset_a, T::pi()),
        _ => {
            builder.add(p + offset_a);
            builder.add(p + offset_b);
        }
    }
}

/// Corner cut perpendicular to the corner bisector at the offset distance from `p`.
fn add_square<T>(
    builder: &mut RingBuilder<T>,
    p: Vector2<T>,
    offset_a: Vector2<T>,
    offset_b: Vector2<T>,
    incoming: Vector2<T>,
    outgoing: Vector2<T>,
) where
    T: Real,
{
    let dist = offset_a.length();
    let sum = offset_a + offset_b;
    let bisector = if sum.length() <= dist * T::cast(1e-9) {
        // reversal, cut across the tip
        incoming.scale(dist)
    } else {
        sum.normalize().scale(dist)
    };

    let m_dot_m = bisector.dot(bisector);
    let denom1 = incoming.dot(bisector);
    let denom2 = outgoing.dot(bisector);
    if denom1.fuzzy_eq_zero() || denom2.fuzzy_eq_zero() {
        builder.add(p + offset_a);
        builder.add(p + offset_b);
        return;
    }

    let t1 = (m_dot_m - offset_a.dot(bisector)) / denom1;
    let t2 = (m_dot_m - offset_b.dot(bisector)) / denom2;
    builder.add(p + offset_a + incoming.scale(t1));
    builder.add(p + offset_b + outgoing.scale(t2));
}

/// Arc around `p` starting at `p + offset_a` sweeping `sweep` radians (positive counter
/// clockwise).
fn add_round<T>(
    ctx: &RawOffsetContext<T>,
    builder: &mut RingBuilder<T>,
    p: Vector2<T>,
    offset_a: Vector2<T>,
    sweep: T,
) where
    T: Real,
{
    let steps = ctx.round_steps(sweep);
    let step = sweep / T::cast(steps as f64);
    for i in 0..=steps {
        builder.add(p + offset_a.rotate(step * T::cast(i as f64)));
    }
}
