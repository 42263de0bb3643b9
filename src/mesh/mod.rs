//! In-memory unstructured mesh as handed over by a mesh generator.
//!
//! A [`Mesh`] owns its points (index = canonical point id), an ordered list of
//! [`CellBlock`]s, named per-point data arrays and named per-cell-block data
//! (one array per block, aligned by position with [`Mesh::cells`]).

pub mod data;

pub use data::{DataArray, DataValues};

use std::collections::BTreeMap;

use crate::debug_invariants::DebugInvariants;
use crate::mesh_error::MeshTidyError;
use crate::topology::cell_type::CellType;

/// Point coordinates with a fixed number of components per point.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "RawPoints")]
pub struct Points {
    dimension: usize,
    coords: Vec<f64>,
}

#[derive(serde::Deserialize)]
struct RawPoints {
    dimension: usize,
    coords: Vec<f64>,
}

impl TryFrom<RawPoints> for Points {
    type Error = MeshTidyError;

    fn try_from(raw: RawPoints) -> Result<Self, Self::Error> {
        Points::try_new(raw.dimension, raw.coords)
    }
}

impl Points {
    /// Wrap flat, row-major coordinates.
    pub fn try_new(dimension: usize, coords: Vec<f64>) -> Result<Self, MeshTidyError> {
        if dimension == 0 || coords.len() % dimension != 0 {
            return Err(MeshTidyError::RaggedArray {
                width: dimension,
                len: coords.len(),
            });
        }
        Ok(Self { dimension, coords })
    }

    /// Build from fixed-size rows.
    pub fn from_rows<const D: usize>(rows: impl IntoIterator<Item = [f64; D]>) -> Self {
        const { assert!(D > 0) };
        Self {
            dimension: D,
            coords: rows.into_iter().flatten().collect(),
        }
    }

    /// Number of coordinate components per point.
    #[inline]
    pub fn dimension(&self) -> usize {
        self.dimension
    }

    /// Number of points.
    #[inline]
    pub fn len(&self) -> usize {
        self.coords.len().checked_div(self.dimension).unwrap_or(0)
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.coords.is_empty()
    }

    /// Coordinates of point `i`, if it exists.
    pub fn get(&self, i: usize) -> Option<&[f64]> {
        let d = self.dimension;
        self.coords.get(i * d..(i + 1) * d)
    }

    /// Iterate over the coordinate rows.
    pub fn iter(&self) -> std::slice::ChunksExact<'_, f64> {
        self.coords.chunks_exact(self.dimension)
    }

    /// Flat, row-major coordinates.
    #[inline]
    pub fn as_flat(&self) -> &[f64] {
        &self.coords
    }

    /// New point set holding the given points, in the given order.
    ///
    /// Every entry of `ids` must be `< self.len()`.
    pub(crate) fn select(&self, ids: &[usize]) -> Points {
        let d = self.dimension;
        Points {
            dimension: d,
            coords: ids
                .iter()
                .flat_map(|&i| self.coords[i * d..(i + 1) * d].iter().copied())
                .collect(),
        }
    }

    /// Keep only the first `dimension` components of every point.
    pub(crate) fn truncate_dimension(&self, dimension: usize) -> Points {
        debug_assert!(dimension > 0 && dimension <= self.dimension);
        Points {
            dimension,
            coords: self
                .iter()
                .flat_map(|row| row[..dimension].iter().copied())
                .collect(),
        }
    }
}

/// Cells of a single type with fixed arity, stored as flat point indices.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "RawCellBlock")]
pub struct CellBlock {
    cell_type: CellType,
    connectivity: Vec<usize>,
}

#[derive(serde::Deserialize)]
struct RawCellBlock {
    cell_type: CellType,
    connectivity: Vec<usize>,
}

impl TryFrom<RawCellBlock> for CellBlock {
    type Error = MeshTidyError;

    fn try_from(raw: RawCellBlock) -> Result<Self, Self::Error> {
        CellBlock::try_new(raw.cell_type, raw.connectivity)
    }
}

impl CellBlock {
    /// Wrap flat connectivity; its length must be a multiple of the type's
    /// node count.
    pub fn try_new(cell_type: CellType, connectivity: Vec<usize>) -> Result<Self, MeshTidyError> {
        let nodes_per_cell = cell_type.node_count();
        if connectivity.len() % nodes_per_cell != 0 {
            return Err(MeshTidyError::ConnectivityShape {
                cell_type,
                nodes_per_cell,
                len: connectivity.len(),
            });
        }
        Ok(Self {
            cell_type,
            connectivity,
        })
    }

    /// Build from per-cell tuples.
    pub fn from_cells<const N: usize>(
        cell_type: CellType,
        cells: impl IntoIterator<Item = [usize; N]>,
    ) -> Result<Self, MeshTidyError> {
        Self::try_new(cell_type, cells.into_iter().flatten().collect())
    }

    #[inline]
    pub fn cell_type(&self) -> CellType {
        self.cell_type
    }

    #[inline]
    pub fn nodes_per_cell(&self) -> usize {
        self.cell_type.node_count()
    }

    /// Number of cells in the block.
    #[inline]
    pub fn len(&self) -> usize {
        self.connectivity.len() / self.nodes_per_cell()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.connectivity.is_empty()
    }

    /// Iterate over the vertex tuples.
    pub fn cells(&self) -> std::slice::ChunksExact<'_, usize> {
        self.connectivity.chunks_exact(self.nodes_per_cell())
    }

    /// Flat point indices of all cells.
    #[inline]
    pub fn connectivity(&self) -> &[usize] {
        &self.connectivity
    }

    #[inline]
    pub(crate) fn connectivity_mut(&mut self) -> &mut [usize] {
        &mut self.connectivity
    }
}

/// Points, cell blocks and the data attached to them.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Mesh {
    /// Point coordinates; a point's position is its id.
    pub points: Points,
    /// Cell blocks in generator order.
    pub cells: Vec<CellBlock>,
    /// Named arrays with one row per point.
    pub point_data: BTreeMap<String, DataArray>,
    /// Named lists of arrays, one per cell block, one row per cell.
    pub cell_data: BTreeMap<String, Vec<DataArray>>,
}

impl Mesh {
    /// Create a mesh without attached data.
    pub fn new(points: Points, cells: Vec<CellBlock>) -> Self {
        Self {
            points,
            cells,
            point_data: BTreeMap::new(),
            cell_data: BTreeMap::new(),
        }
    }

    /// Create a mesh and check every cell index and data length against its
    /// owner.
    pub fn try_new(
        points: Points,
        cells: Vec<CellBlock>,
        point_data: BTreeMap<String, DataArray>,
        cell_data: BTreeMap<String, Vec<DataArray>>,
    ) -> Result<Self, MeshTidyError> {
        let mesh = Self {
            points,
            cells,
            point_data,
            cell_data,
        };
        mesh.validate_invariants()?;
        Ok(mesh)
    }

    /// Attach a per-point array.
    pub fn with_point_data(mut self, name: impl Into<String>, data: DataArray) -> Self {
        self.point_data.insert(name.into(), data);
        self
    }

    /// Attach per-cell-block arrays.
    pub fn with_cell_data(mut self, name: impl Into<String>, data: Vec<DataArray>) -> Self {
        self.cell_data.insert(name.into(), data);
        self
    }

    /// Number of points.
    #[inline]
    pub fn n_points(&self) -> usize {
        self.points.len()
    }

    /// Total number of cells over all blocks.
    pub fn n_cells(&self) -> usize {
        self.cells.iter().map(CellBlock::len).sum()
    }

    /// Cell types of the blocks, in block order.
    pub fn cell_types(&self) -> impl Iterator<Item = CellType> + '_ {
        self.cells.iter().map(CellBlock::cell_type)
    }

    /// Check that every data array matches its owner's length.
    pub fn check_alignment(&self) -> Result<(), MeshTidyError> {
        let n_points = self.n_points();
        for (name, array) in &self.point_data {
            if array.len() != n_points {
                return Err(MeshTidyError::DataAlignment {
                    field: name.clone(),
                    expected: n_points,
                    found: array.len(),
                });
            }
        }
        for (name, arrays) in &self.cell_data {
            if arrays.len() != self.cells.len() {
                return Err(MeshTidyError::DataAlignment {
                    field: name.clone(),
                    expected: self.cells.len(),
                    found: arrays.len(),
                });
            }
            for (block, array) in self.cells.iter().zip(arrays) {
                if array.len() != block.len() {
                    return Err(MeshTidyError::DataAlignment {
                        field: name.clone(),
                        expected: block.len(),
                        found: array.len(),
                    });
                }
            }
        }
        Ok(())
    }

    /// Check that every cell references an existing point.
    pub fn check_cell_indices(&self) -> Result<(), MeshTidyError> {
        let len = self.n_points();
        for (block, cells) in self.cells.iter().enumerate() {
            if let Some(&index) = cells.connectivity().iter().find(|&&i| i >= len) {
                return Err(MeshTidyError::PointIndexOutOfRange { block, index, len });
            }
        }
        Ok(())
    }
}

impl DebugInvariants for Mesh {
    fn debug_assert_invariants(&self) {
        crate::debug_invariants!(self.validate_invariants(), "Mesh");
    }

    /// Point and block shapes hold by construction; this checks what ties
    /// the public fields together.
    fn validate_invariants(&self) -> Result<(), MeshTidyError> {
        self.check_cell_indices()?;
        self.check_alignment()
    }
}
