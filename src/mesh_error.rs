//! MeshTidyError: Unified error type for gmsh-tidy public APIs
//!
//! Every fallible operation in the crate (loop orientation, mesh validation,
//! the post-processing stages and the Gmsh reader) reports through this type,
//! so callers can match on the failure instead of inspecting a partially
//! processed mesh.

use crate::topology::cell_type::CellType;
use crate::topology::point::PointId;
use thiserror::Error;

/// Why a set of segments does not describe exactly one simple closed polygon.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LoopDefect {
    /// No segments were supplied.
    #[error("edge loop has no segments")]
    Empty,
    /// A point is an endpoint of a number of segments other than two.
    #[error("point {point} is an endpoint of {degree} segment(s), expected 2")]
    Degree { point: PointId, degree: usize },
    /// No unplaced segment continues the chain from `point`.
    #[error("no segment continues the loop from point {point} at position {position}")]
    Unchained { position: usize, point: PointId },
}

/// Unified error type for gmsh-tidy operations.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum MeshTidyError {
    /// The segments handed to the loop orienter are not a single simple cycle.
    #[error("malformed edge loop: {0}")]
    MalformedLoop(#[from] LoopDefect),
    /// A pipeline stage would leave the mesh without cell blocks or points.
    #[error("{stage} produced an empty mesh")]
    EmptyResult { stage: &'static str },
    /// A per-point or per-cell-block data array does not match its owner.
    #[error("data field `{field}` has length {found}, expected {expected}")]
    DataAlignment {
        field: String,
        expected: usize,
        found: usize,
    },
    /// A cell references a point id outside the point array.
    #[error("cell block {block} references point {index}, but the mesh has {len} points")]
    PointIndexOutOfRange {
        block: usize,
        index: usize,
        len: usize,
    },
    /// Flat connectivity does not form whole cells of the block's arity.
    #[error("{cell_type} block with {nodes_per_cell} nodes per cell has {len} connectivity entries")]
    ConnectivityShape {
        cell_type: CellType,
        nodes_per_cell: usize,
        len: usize,
    },
    /// Flat values (coordinates or data) do not form whole rows of `width`.
    #[error("{len} values cannot form rows of width {width}")]
    RaggedArray { width: usize, len: usize },
    /// The rotation axis is not a unit vector.
    #[error("rotation axis must be unitary (|u|^2 = {norm_sq})")]
    NonUnitAxis { norm_sq: f64 },
    /// Malformed mesh file contents.
    #[error("mesh parse error: {0}")]
    MeshIoParse(String),
    /// Underlying reader failure.
    #[error("I/O error: {0}")]
    Io(String),
}

impl From<std::io::Error> for MeshTidyError {
    fn from(err: std::io::Error) -> Self {
        MeshTidyError::Io(err.to_string())
    }
}

impl MeshTidyError {
    /// Returns `true` for errors raised by the edge-loop orienter.
    pub fn is_malformed_loop(&self) -> bool {
        matches!(self, MeshTidyError::MalformedLoop(_))
    }
}
