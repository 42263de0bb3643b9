//! Topology primitives: point identifiers, orientations and cell types.

pub mod cell_type;
pub mod orientation;
pub mod point;

pub use cell_type::CellType;
pub use orientation::{Orientation, Sign};
pub use point::PointId;
