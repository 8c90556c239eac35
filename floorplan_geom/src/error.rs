use thiserror::Error;

/// Top-level error type for the geometry kernel.
#[derive(Debug, Error)]
pub enum KernelError {
    #[error(transparent)]
    Offset(#[from] OffsetError),

    #[error(transparent)]
    KdTree(#[from] KdTreeError),
}

/// Errors raised while offsetting paths.
#[derive(Debug, Error)]
pub enum OffsetError {
    #[error("path {path} contains a non-finite coordinate at vertex {vertex}")]
    NonFiniteCoordinate { path: usize, vertex: usize },

    #[error("invalid parameter {parameter}: {reason}")]
    InvalidParameter {
        parameter: &'static str,
        reason: String,
    },

    #[error("failed to build spatial index: {0}")]
    SpatialIndex(String),

    #[error("offset slices could not be stitched into closed loops ({open_chains} open chains)")]
    StitchFailed { open_chains: usize },
}

/// Errors raised while loading a kd tree from its dumped form.
#[derive(Debug, Error)]
pub enum KdTreeError {
    #[error("no split dimensions given")]
    EmptyDimensions,

    #[error("node dimension index {index} is out of range for {dimension_count} dimensions")]
    InvalidDimension {
        index: usize,
        dimension_count: usize,
    },
}

pub type Result<T> = std::result::Result<T, KernelError>;
