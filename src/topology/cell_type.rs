//! Cell type metadata for mesh cell blocks.
//!
//! Names follow the meshio vocabulary (`"triangle"`, `"tetra"`, ...), which is
//! what mesh generators and downstream tools exchange.

use std::fmt;
use std::str::FromStr;

use crate::mesh_error::MeshTidyError;

/// Common cell types for mesh elements.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CellType {
    /// 0D vertex.
    Vertex,
    /// 1D segment/edge.
    Line,
    /// 2D simplex.
    Triangle,
    /// 2D tensor-product cell.
    Quad,
    /// 3D simplex.
    Tetra,
    /// 3D tensor-product cell.
    Hexahedron,
    /// 3D triangular prism.
    Wedge,
    /// 3D pyramid.
    Pyramid,
    /// 3D pentagonal prism.
    PentaPrism,
    /// 3D hexagonal prism.
    HexaPrism,
}

impl CellType {
    /// All supported cell types.
    pub const ALL: [CellType; 10] = [
        CellType::Vertex,
        CellType::Line,
        CellType::Triangle,
        CellType::Quad,
        CellType::Tetra,
        CellType::Hexahedron,
        CellType::Wedge,
        CellType::Pyramid,
        CellType::PentaPrism,
        CellType::HexaPrism,
    ];

    /// Returns the topological dimension of the cell.
    pub fn dimension(self) -> u8 {
        match self {
            CellType::Vertex => 0,
            CellType::Line => 1,
            CellType::Triangle | CellType::Quad => 2,
            CellType::Tetra
            | CellType::Hexahedron
            | CellType::Wedge
            | CellType::Pyramid
            | CellType::PentaPrism
            | CellType::HexaPrism => 3,
        }
    }

    /// Number of vertices of a first-order cell of this type.
    pub fn node_count(self) -> usize {
        match self {
            CellType::Vertex => 1,
            CellType::Line => 2,
            CellType::Triangle => 3,
            CellType::Quad | CellType::Tetra => 4,
            CellType::Pyramid => 5,
            CellType::Wedge => 6,
            CellType::Hexahedron => 8,
            CellType::PentaPrism => 10,
            CellType::HexaPrism => 12,
        }
    }

    /// meshio name of the type.
    pub fn name(self) -> &'static str {
        match self {
            CellType::Vertex => "vertex",
            CellType::Line => "line",
            CellType::Triangle => "triangle",
            CellType::Quad => "quad",
            CellType::Tetra => "tetra",
            CellType::Hexahedron => "hexahedron",
            CellType::Wedge => "wedge",
            CellType::Pyramid => "pyramid",
            CellType::PentaPrism => "penta_prism",
            CellType::HexaPrism => "hexa_prism",
        }
    }
}

impl fmt::Display for CellType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for CellType {
    type Err = MeshTidyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CellType::ALL
            .into_iter()
            .find(|ct| ct.name() == s)
            .ok_or_else(|| MeshTidyError::MeshIoParse(format!("unknown cell type: {s}")))
    }
}
