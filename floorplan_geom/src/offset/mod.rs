//! Polygon and path offsetting (inset/outset) with miter, round and square joins.
//!
//! Every input path is offset into one or more raw rings which are then merged with the
//! positive fill rule (a point is covered when the sum of ring winding numbers around it is
//! greater than zero). The result is either a flat list of closed paths or a [PolyTree] holding
//! the outer/hole nesting.
//!
//! # Examples
//!
//! ```
//! # use floorplan_geom::core::math::Vector2;
//! # use floorplan_geom::offset::*;
//! # use floorplan_geom::polygon::ring_signed_area;
//! let square: Vec<Vector2<f64>> = vec![
//!     Vector2::new(0.0, 0.0),
//!     Vector2::new(10.0, 0.0),
//!     Vector2::new(10.0, 10.0),
//!     Vector2::new(0.0, 10.0),
//! ];
//! let inputs = [OffsetInput::path(square, JoinType::Miter, EndType::ClosedPolygon)];
//! let result = offset_to_paths(&inputs, &OffsetOptions::new(1.0)).unwrap();
//! assert_eq!(result.len(), 1);
//! assert!((ring_signed_area(&result[0]) - 144.0).abs() < 1e-9);
//! ```
mod accumulator;
mod clean;
mod poly_tree;
mod raw_offset;
mod union;

pub use accumulator::OffsetAccumulator;
pub use clean::{clean_polygon, clean_polygons};
pub use poly_tree::{PolyNode, PolyTree};

use crate::{
    core::{math::Vector2, traits::Real},
    error::OffsetError,
};

/// Open or closed sequence of points.
pub type Path<T = f64> = Vec<Vector2<T>>;

/// How convex corners are filled when offsetting.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "camelCase")
)]
pub enum JoinType {
    /// Extend the adjacent edges until they meet, squared off beyond the miter limit.
    #[default]
    Miter,
    /// Arc around the corner approximated within the arc tolerance.
    Round,
    /// Corner cut perpendicular to its bisector at the offset distance.
    Square,
}

/// How a path is closed or capped when offsetting.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "camelCase")
)]
pub enum EndType {
    /// Closed polygon, positive delta grows the enclosed area.
    #[default]
    ClosedPolygon,
    /// Closed path offset on both sides into a band.
    ClosedLine,
    /// Open path with ends cut flush at the end points.
    OpenButt,
    /// Open path with ends extended by the offset distance.
    OpenSquare,
    /// Open path with semicircular ends.
    OpenRound,
}

impl EndType {
    /// Returns `true` for the open path end types.
    pub fn is_open(&self) -> bool {
        matches!(
            self,
            EndType::OpenButt | EndType::OpenSquare | EndType::OpenRound
        )
    }
}

/// One path or a group of paths sharing a join and end type.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "camelCase")
)]
pub struct OffsetInput<T = f64> {
    pub paths: Vec<Path<T>>,
    pub join_type: JoinType,
    pub end_type: EndType,
}

impl<T> OffsetInput<T> {
    /// Input holding a single path.
    pub fn path(path: Path<T>, join_type: JoinType, end_type: EndType) -> Self {
        OffsetInput {
            paths: vec![path],
            join_type,
            end_type,
        }
    }

    /// Input holding a group of paths (e.g. an outer ring and its holes).
    pub fn paths(paths: Vec<Path<T>>, join_type: JoinType, end_type: EndType) -> Self {
        OffsetInput {
            paths,
            join_type,
            end_type,
        }
    }
}

/// Options for offsetting.
#[derive(Debug, Clone)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "camelCase")
)]
pub struct OffsetOptions<T = f64> {
    /// Offset distance, positive grows closed polygons and negative shrinks them. Open paths and
    /// closed lines are offset by the absolute value and produce nothing for a delta <= 0.
    pub delta: T,
    /// Maximum miter length as a multiple of `|delta|` before a miter join is squared off.
    pub miter_limit: T,
    /// Maximum distance between a round join arc and its approximating segments. Values <= 0 use
    /// the default, values larger than `|delta| / 4` are clamped to it.
    pub arc_tolerance: T,
    /// When set, flat path results are simplified by removing vertexes closer than this
    /// distance to their neighbors or to the segment joining their neighbors. Not supported for
    /// poly tree results.
    pub clean_distance: Option<T>,
    /// Fuzzy comparison epsilon used for determining if two positions are equal.
    pub pos_equal_eps: T,
    /// Fuzzy comparison epsilon used when joining slices together.
    pub slice_join_eps: T,
}

impl<T> OffsetOptions<T>
where
    T: Real,
{
    /// Default options with the given `delta`.
    pub fn new(delta: T) -> Self {
        OffsetOptions {
            delta,
            ..Default::default()
        }
    }
}

impl<T> Default for OffsetOptions<T>
where
    T: Real,
{
    fn default() -> Self {
        OffsetOptions {
            delta: T::zero(),
            miter_limit: T::two(),
            arc_tolerance: T::cast(0.25),
            clean_distance: None,
            pos_equal_eps: T::cast(1e-5),
            slice_join_eps: T::cast(1e-4),
        }
    }
}

/// Selects the shape of an offset result.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum OffsetResultMode {
    Paths,
    PolyTree,
}

/// Result of an offset, flat paths or a poly tree depending on the requested mode.
#[derive(Debug, Clone)]
pub enum OffsetResult<T = f64> {
    Paths(Vec<Path<T>>),
    PolyTree(PolyTree<T>),
}

impl<T> OffsetResult<T>
where
    T: Real,
{
    /// Closed result paths, outer rings counter clockwise and holes clockwise.
    pub fn into_paths(self) -> Vec<Path<T>> {
        match self {
            OffsetResult::Paths(paths) => paths,
            OffsetResult::PolyTree(tree) => tree.to_paths(),
        }
    }
}

fn validate_options<T>(options: &OffsetOptions<T>) -> Result<(), OffsetError>
where
    T: Real,
{
    let invalid = |parameter: &'static str, reason: &str| OffsetError::InvalidParameter {
        parameter,
        reason: reason.to_string(),
    };

    if !options.delta.is_finite() {
        return Err(invalid("delta", "must be finite"));
    }
    if !options.miter_limit.is_finite() || options.miter_limit <= T::zero() {
        return Err(invalid("miter_limit", "must be finite and greater than zero"));
    }
    if !options.arc_tolerance.is_finite() {
        return Err(invalid("arc_tolerance", "must be finite"));
    }
    if let Some(d) = options.clean_distance {
        if !d.is_finite() || d < T::zero() {
            return Err(invalid("clean_distance", "must be finite and not negative"));
        }
    }
    if !(options.pos_equal_eps > T::zero()) || !(options.slice_join_eps > T::zero()) {
        return Err(invalid("pos_equal_eps", "epsilons must be greater than zero"));
    }

    Ok(())
}

/// Offset `inputs` by `options.delta` returning a typed error on failure.
///
/// # Panics
///
/// Panics if `mode` is [OffsetResultMode::PolyTree] and `options.clean_distance` is set, that
/// combination is not supported.
pub fn try_offset<T>(
    inputs: &[OffsetInput<T>],
    options: &OffsetOptions<T>,
    mode: OffsetResultMode,
) -> Result<OffsetResult<T>, OffsetError>
where
    T: Real,
{
    assert!(
        !(mode == OffsetResultMode::PolyTree && options.clean_distance.is_some()),
        "clean_distance is not supported when offsetting into a poly tree"
    );
    validate_options(options)?;

    let mut accumulator = OffsetAccumulator::new(
        options.miter_limit,
        options.arc_tolerance,
        options.pos_equal_eps,
    );
    for input in inputs {
        accumulator.add_paths(&input.paths, input.join_type, input.end_type)?;
    }

    let raw_rings = accumulator.execute(options.delta);
    log::trace!(
        "offset by {:?}: {} input paths, {} raw rings",
        options.delta,
        accumulator.path_count(),
        raw_rings.len()
    );

    let loops = union::positive_union(&raw_rings, options)?;

    let result = match mode {
        OffsetResultMode::Paths => match options.clean_distance {
            Some(distance) => OffsetResult::Paths(clean_polygons(&loops, distance)),
            None => OffsetResult::Paths(loops),
        },
        OffsetResultMode::PolyTree => OffsetResult::PolyTree(PolyTree::from_loops(loops)),
    };

    Ok(result)
}

/// Offset `inputs` by `options.delta`.
///
/// Returns `None` if the offset could not be computed (invalid input or numerical failure), an
/// empty result (e.g. an inset that collapses everything) is `Some`.
///
/// # Panics
///
/// Panics if `mode` is [OffsetResultMode::PolyTree] and `options.clean_distance` is set.
pub fn offset<T>(
    inputs: &[OffsetInput<T>],
    options: &OffsetOptions<T>,
    mode: OffsetResultMode,
) -> Option<OffsetResult<T>>
where
    T: Real,
{
    match try_offset(inputs, options, mode) {
        Ok(result) => Some(result),
        Err(err) => {
            log::debug!("offset failed: {err}");
            None
        }
    }
}

/// Offset `inputs` into flat closed paths, see [offset].
pub fn offset_to_paths<T>(inputs: &[OffsetInput<T>], options: &OffsetOptions<T>) -> Option<Vec<Path<T>>>
where
    T: Real,
{
    offset(inputs, options, OffsetResultMode::Paths).map(OffsetResult::into_paths)
}

/// Offset `inputs` into a [PolyTree], see [offset].
///
/// # Panics
///
/// Panics if `options.clean_distance` is set.
pub fn offset_to_poly_tree<T>(
    inputs: &[OffsetInput<T>],
    options: &OffsetOptions<T>,
) -> Option<PolyTree<T>>
where
    T: Real,
{
    match offset(inputs, options, OffsetResultMode::PolyTree)? {
        OffsetResult::PolyTree(tree) => Some(tree),
        OffsetResult::Paths(paths) => Some(PolyTree::from_loops(paths)),
    }
}
