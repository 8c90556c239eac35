//! Sketch curves and faces with deterministic string keys for memoizing geometry derived work.
//!
//! Keys are opaque, callers compare them but never parse them.
mod curve;
mod encoder;

pub use curve::*;
pub use encoder::*;
