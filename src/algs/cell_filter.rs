//! Keep only the cells of highest topological dimension.
//!
//! Mesh generators emit the boundary faces, edges and corner vertices of a
//! volume mesh alongside its solid cells. The filter ranks blocks into a solid
//! tier (tetra, hexahedron, wedge, pyramid, pentagonal and hexagonal prisms)
//! and a surface tier (triangle, quad) and keeps the highest tier present.

use crate::debug_invariants::DebugInvariants;
use crate::mesh::Mesh;
use crate::mesh_error::MeshTidyError;
use crate::topology::cell_type::CellType;

pub(crate) const STAGE: &str = "remove_lower_dim_cells";

/// Filtering tier of a cell type: 3 for solids, 2 for triangles and quads,
/// `None` for everything else.
pub fn dimension_tier(cell_type: CellType) -> Option<u8> {
    match cell_type {
        CellType::Tetra
        | CellType::Hexahedron
        | CellType::Wedge
        | CellType::Pyramid
        | CellType::PentaPrism
        | CellType::HexaPrism => Some(3),
        CellType::Triangle | CellType::Quad => Some(2),
        CellType::Vertex | CellType::Line => None,
    }
}

/// The tier that survives filtering, or `None` when no block belongs to a tier
/// (every block is kept then).
pub fn retained_tier(types: impl IntoIterator<Item = CellType>) -> Option<u8> {
    types.into_iter().filter_map(dimension_tier).max()
}

/// Drop every cell block below the highest tier present, together with its
/// per-cell data.
///
/// # Errors
/// - [`MeshTidyError::DataAlignment`] if the input's point or cell data is
///   misaligned.
/// - [`MeshTidyError::PointIndexOutOfRange`] if a cell references a missing
///   point.
/// - [`MeshTidyError::EmptyResult`] if no cell block survives.
pub fn remove_lower_dim_cells(mut mesh: Mesh) -> Result<Mesh, MeshTidyError> {
    mesh.validate_invariants()?;

    let keep: Vec<bool> = match retained_tier(mesh.cell_types()) {
        Some(tier) => mesh
            .cell_types()
            .map(|ct| dimension_tier(ct) == Some(tier))
            .collect(),
        None => {
            if !mesh.cells.is_empty() {
                log::warn!("{STAGE}: no surface or solid cells present, keeping all blocks");
            }
            vec![true; mesh.cells.len()]
        }
    };

    for arrays in mesh.cell_data.values_mut() {
        let mut mask = keep.iter();
        arrays.retain(|_| mask.next().copied().unwrap_or(false));
    }
    let mut mask = keep.iter();
    mesh.cells.retain(|_| mask.next().copied().unwrap_or(false));

    if mesh.cells.is_empty() {
        return Err(MeshTidyError::EmptyResult { stage: STAGE });
    }
    Ok(mesh)
}
