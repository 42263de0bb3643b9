//! Collapse a degenerate z axis.
//!
//! Planar geometry is meshed in 3D space; when every point lies in the
//! `z = 0` plane the third coordinate carries no information and is dropped.

#[cfg(feature = "rayon")]
use rayon::prelude::*;

use crate::debug_invariants::DebugInvariants;
use crate::mesh::{Mesh, Points};
use crate::mesh_error::MeshTidyError;

pub(crate) const STAGE: &str = "prune_z_0";

/// Points with `|z|` strictly below this are considered to lie in the plane.
pub const Z_TOLERANCE: f64 = 1.0e-13;

/// `true` if `points` are 3D and every `|z| < Z_TOLERANCE`.
///
/// A NaN coordinate never compares below the tolerance, so it keeps the axis.
pub fn is_flat_in_z(points: &Points) -> bool {
    if points.dimension() != 3 {
        return false;
    }
    let flat = points.as_flat();
    #[cfg(feature = "rayon")]
    let in_plane = flat.par_chunks_exact(3).all(|p| p[2].abs() < Z_TOLERANCE);
    #[cfg(not(feature = "rayon"))]
    let in_plane = flat.chunks_exact(3).all(|p| p[2].abs() < Z_TOLERANCE);
    in_plane
}

/// Drop the third coordinate when all points are 3D and lie in `z = 0`.
/// Meshes that are not 3D, or not flat, are returned unchanged.
///
/// # Errors
/// - [`MeshTidyError::DataAlignment`] if point or cell data is misaligned.
/// - [`MeshTidyError::PointIndexOutOfRange`] if a cell references a missing
///   point.
pub fn prune_z_0(mut mesh: Mesh) -> Result<Mesh, MeshTidyError> {
    mesh.validate_invariants()?;
    if is_flat_in_z(&mesh.points) {
        mesh.points = mesh.points.truncate_dimension(2);
    }
    Ok(mesh)
}
