use super::Vector2;
use crate::core::traits::Real;

/// How two line segments `v1->v2` and `u1->u2` meet.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum SegmentIntr<T> {
    /// Segments do not touch, or only their infinite lines cross.
    Disjoint,
    /// Segments cross at a single point, `seg1_t`/`seg2_t` are its parametric values on each.
    Crossing { seg1_t: T, seg2_t: T },
    /// Segments are collinear and share the part of `u1->u2` from `seg2_t0` to `seg2_t1`.
    Overlap { seg2_t0: T, seg2_t1: T },
}

/// Intersects the segments `v1->v2` and `u1->u2`.
///
/// Both segments must have non zero length. Parametric values are scaled by segment length before
/// fuzzy comparing so `eps` acts as a distance. Segments that touch end to end along one line
/// report a [SegmentIntr::Crossing] at the shared end point.
///
/// # Examples
///
/// ```
/// # use floorplan_geom::core::math::*;
/// let r: SegmentIntr<f64> = segment_intr(
///     Vector2::new(0.0, 0.0),
///     Vector2::new(2.0, 0.0),
///     Vector2::new(0.5, -1.0),
///     Vector2::new(0.5, 1.0),
///     1e-5,
/// );
/// assert_eq!(r, SegmentIntr::Crossing { seg1_t: 0.25, seg2_t: 0.5 });
/// ```
pub fn segment_intr<T>(
    v1: Vector2<T>,
    v2: Vector2<T>,
    u1: Vector2<T>,
    u2: Vector2<T>,
    eps: T,
) -> SegmentIntr<T>
where
    T: Real,
{
    let v = v2 - v1;
    let u = u2 - u1;
    let w = v1 - u1;
    let v_len = v.length();
    let u_len = u.length();
    let on_segment = |t: T, len: T| (t * len).fuzzy_in_range_eps(T::zero(), len, false, false, eps);

    let denom = v.perp_dot(u);
    if !denom.fuzzy_eq_zero_eps(eps) {
        let seg1_t = u.perp_dot(w) / denom;
        let seg2_t = v.perp_dot(w) / denom;
        if on_segment(seg1_t, v_len) && on_segment(seg2_t, u_len) {
            return SegmentIntr::Crossing { seg1_t, seg2_t };
        }
        return SegmentIntr::Disjoint;
    }

    // parallel, overlap requires both lines to coincide
    if !v.perp_dot(w).fuzzy_eq_zero_eps(eps) || !u.perp_dot(w).fuzzy_eq_zero_eps(eps) {
        return SegmentIntr::Disjoint;
    }

    // project v1 and v2 onto u1->u2
    let u_len_sq = u.length_squared();
    let mut t0 = (v1 - u1).dot(u) / u_len_sq;
    let mut t1 = (v2 - u1).dot(u) / u_len_sq;
    if t0 > t1 {
        std::mem::swap(&mut t0, &mut t1);
    }

    if !(t0 * u_len).fuzzy_le_eps(u_len, eps) || !(t1 * u_len).fuzzy_ge_eps(T::zero(), eps) {
        return SegmentIntr::Disjoint;
    }

    let seg2_t0 = num_traits::real::Real::max(t0, T::zero());
    let seg2_t1 = num_traits::real::Real::min(t1, T::one());

    if ((seg2_t1 - seg2_t0) * u_len).fuzzy_eq_zero_eps(eps) {
        let seg1_t = if v1.fuzzy_eq_eps(u1, eps) || v1.fuzzy_eq_eps(u2, eps) {
            T::zero()
        } else {
            T::one()
        };
        return SegmentIntr::Crossing {
            seg1_t,
            seg2_t: seg2_t0,
        };
    }

    SegmentIntr::Overlap { seg2_t0, seg2_t1 }
}
