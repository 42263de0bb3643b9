#![cfg_attr(docsrs, feature(doc_cfg))]
//! # gmsh-tidy
//!
//! gmsh-tidy prepares geometry for, and cleans up meshes from, an external
//! mesh generator such as Gmsh. It has two independent halves:
//!
//! - **Edge-loop orientation** ([`geometry::edge_loop`]): turn an unordered,
//!   arbitrarily directed set of boundary segments into one consistently
//!   chained closed polygon.
//! - **Mesh post-processing** ([`algs`]): a fixed-order pipeline that keeps
//!   only the highest-dimensional cells, prunes and densely renumbers unused
//!   vertices, and collapses a flat z axis.
//!
//! Both halves are pure, synchronous transformations of in-memory values.
//! Running the generator and writing mesh files are left to the caller; an
//! ASCII Gmsh reader is provided in [`io::gmsh`] for convenience.
//!
//! ## Determinism
//!
//! Loop orientation always prefers the lowest-indexed candidate, and vertex
//! pruning numbers the kept points in ascending order of their old ids, so
//! outputs are reproducible with or without the `rayon` feature.
//!
//! ## Usage
//! ```rust
//! use gmsh_tidy::prelude::*;
//!
//! let square: Vec<LineSegment> = [(2, 3), (0, 1), (3, 0), (1, 2)]
//!     .into_iter()
//!     .map(LineSegment::from)
//!     .collect();
//! let oriented = orient_lines(&square).unwrap();
//! assert!(is_closed_loop(&oriented));
//! ```

pub mod algs;
pub mod debug_invariants;
pub mod geometry;
pub mod io;
pub mod mesh;
pub mod mesh_error;
pub mod topology;

pub use debug_invariants::DebugInvariants;

/// A convenient prelude to import the most-used traits & types:
pub mod prelude {
    pub use crate::algs::pipeline::{MeshTransform, Pipeline, PostProcessOptions, post_process};
    pub use crate::algs::{prune_vertices, prune_z_0, remove_lower_dim_cells};
    pub use crate::debug_invariants::DebugInvariants;
    pub use crate::geometry::edge_loop::{is_closed_loop, orient_lines};
    pub use crate::geometry::line::{LineSegment, Segment};
    pub use crate::geometry::rotation::rotation_matrix;
    pub use crate::io::MeshReader;
    pub use crate::io::gmsh::{GmshReadOptions, GmshReader};
    pub use crate::mesh::{CellBlock, DataArray, DataValues, Mesh, Points};
    pub use crate::mesh_error::{LoopDefect, MeshTidyError};
    pub use crate::topology::cell_type::CellType;
    pub use crate::topology::orientation::Sign;
    pub use crate::topology::point::PointId;
}
