//! Built-in node descriptors.
//!
//! Each function returns the entry-point descriptor for one node kind; the
//! registry maps kind names onto these constructors. Bodies are plain
//! templates over the parameter names, with `{precision}` and
//! `{slot<id>dimension}` placeholders resolved at emission time.

pub mod geometry;
pub mod math;
pub mod surface;
pub mod texture;
pub mod uv;
pub mod vector;
