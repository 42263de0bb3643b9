//! Vertex pruning: drop points no cell references and compact the index
//! space.
//!
//! Referenced point ids are sorted ascending and the `i`-th smallest becomes
//! the new id `i`. Cells, points and every per-point array are rewritten
//! consistently with that map.

use itertools::Itertools;
#[cfg(feature = "rayon")]
use rayon::prelude::*;

use crate::debug_invariants::DebugInvariants;
use crate::mesh::{CellBlock, Mesh};
use crate::mesh_error::MeshTidyError;

pub(crate) const STAGE: &str = "prune_vertices";

/// Dense renumbering of the points referenced by a set of cell blocks.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Compaction {
    /// Old ids of the kept points, ascending; position = new id.
    pub kept: Vec<usize>,
    old_to_new: Vec<Option<usize>>,
}

impl Compaction {
    /// Build the map for `cells` over a point array of length `n_points`.
    ///
    /// # Errors
    /// [`MeshTidyError::PointIndexOutOfRange`] if a cell index is not below
    /// `n_points`.
    pub fn from_cells(cells: &[CellBlock], n_points: usize) -> Result<Self, MeshTidyError> {
        for (block, cell_block) in cells.iter().enumerate() {
            if let Some(&index) = cell_block.connectivity().iter().find(|&&i| i >= n_points) {
                return Err(MeshTidyError::PointIndexOutOfRange {
                    block,
                    index,
                    len: n_points,
                });
            }
        }
        let kept: Vec<usize> = cells
            .iter()
            .flat_map(|block| block.connectivity().iter().copied())
            .sorted_unstable()
            .dedup()
            .collect();
        let mut old_to_new = vec![None; n_points];
        for (new, &old) in kept.iter().enumerate() {
            old_to_new[old] = Some(new);
        }
        Ok(Self { kept, old_to_new })
    }

    /// New id of the old point `old`, if it is kept.
    #[inline]
    pub fn new_id(&self, old: usize) -> Option<usize> {
        self.old_to_new.get(old).copied().flatten()
    }

    /// Number of kept points.
    #[inline]
    pub fn len(&self) -> usize {
        self.kept.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.kept.is_empty()
    }

    fn remap_block(&self, block: &mut CellBlock) {
        for idx in block.connectivity_mut() {
            // Every referenced id is in `kept` by construction.
            if let Some(new) = self.new_id(*idx) {
                *idx = new;
            }
        }
    }
}

#[cfg(feature = "rayon")]
fn remap_blocks(cells: &mut [CellBlock], map: &Compaction) {
    cells.par_iter_mut().for_each(|block| map.remap_block(block));
}

#[cfg(not(feature = "rayon"))]
fn remap_blocks(cells: &mut [CellBlock], map: &Compaction) {
    cells.iter_mut().for_each(|block| map.remap_block(block));
}

/// Remove unreferenced points and renumber the rest densely, in ascending
/// order of their old ids.
///
/// # Errors
/// - [`MeshTidyError::DataAlignment`] if point or cell data is misaligned.
/// - [`MeshTidyError::PointIndexOutOfRange`] if a cell references a missing
///   point.
/// - [`MeshTidyError::EmptyResult`] if no point is referenced.
pub fn prune_vertices(mut mesh: Mesh) -> Result<Mesh, MeshTidyError> {
    mesh.validate_invariants()?;

    let map = Compaction::from_cells(&mesh.cells, mesh.n_points())?;
    if map.is_empty() {
        return Err(MeshTidyError::EmptyResult { stage: STAGE });
    }

    remap_blocks(&mut mesh.cells, &map);

    mesh.points = mesh.points.select(&map.kept);
    for array in mesh.point_data.values_mut() {
        *array = array.select_rows(&map.kept);
    }
    Ok(mesh)
}
