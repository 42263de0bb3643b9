//! Boundary geometry helpers used before meshing.

pub mod edge_loop;
pub mod line;
pub mod rotation;

pub use edge_loop::{is_closed_loop, orient_lines, validate_loop_degrees};
pub use line::{LineSegment, Segment};
pub use rotation::{rotate, rotation_matrix};
