//! Mesh readers.
//!
//! The post-processing core works on in-memory [`Mesh`] values only; readers
//! are the bridge from the files a mesh generator writes.

pub mod gmsh;

use std::io::Read;

use crate::mesh::Mesh;
use crate::mesh_error::MeshTidyError;

/// Trait for mesh readers that produce a [`Mesh`].
pub trait MeshReader {
    /// Parse a mesh from a reader.
    fn read<R: Read>(&self, reader: R) -> Result<Mesh, MeshTidyError>;
}
