//! Point indexes for nearest neighbor queries (snapping, closest vertex lookups).
mod kd_tree;

pub use kd_tree::*;
