//! Gmsh `.msh` reader.
//!
//! # Supported format
//! - ASCII `.msh` version **2.2**.
//! - Element types: 1 (line), 2 (triangle), 3 (quad), 4 (tet), 5 (hex),
//!   6 (prism), 7 (pyramid), 15 (point).
//!
//! # Mapping
//! - Nodes become points `0..n` in file order; coordinates are always 3D.
//! - Consecutive elements of the same type form one [`CellBlock`].
//! - The first two element tags are stored as per-cell integer data
//!   `gmsh:physical` and `gmsh:geometrical` (missing tags read as 0).
//!
//! # Limitations
//! - Binary files are not supported.
//! - `.msh` v4.x (block-based) is not supported.
//! - Higher-order elements are not supported.

use std::collections::BTreeMap;
use std::io::Read;

use hashbrown::HashMap;
use itertools::Itertools;

use crate::io::MeshReader;
use crate::mesh::{CellBlock, DataArray, Mesh, Points};
use crate::mesh_error::MeshTidyError;
use crate::topology::cell_type::CellType;

/// Cell data name of the physical group tag.
pub const PHYSICAL_TAG: &str = "gmsh:physical";
/// Cell data name of the elementary (geometrical) entity tag.
pub const GEOMETRICAL_TAG: &str = "gmsh:geometrical";

/// Options controlling Gmsh ingestion.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct GmshReadOptions {
    /// Store element tags as cell data.
    pub keep_tags: bool,
}

impl Default for GmshReadOptions {
    fn default() -> Self {
        Self { keep_tags: true }
    }
}

/// Gmsh `.msh` reader for ASCII v2.2 meshes.
#[derive(Debug, Default, Clone)]
pub struct GmshReader;

struct Element {
    cell_type: CellType,
    tags: [i64; 2],
    nodes: Vec<usize>,
}

fn parse_err(msg: impl Into<String>) -> MeshTidyError {
    MeshTidyError::MeshIoParse(msg.into())
}

impl GmshReader {
    fn parse_version(line: &str) -> Result<&str, MeshTidyError> {
        let mut parts = line.split_whitespace();
        let version = parts
            .next()
            .ok_or_else(|| parse_err("missing mesh format version"))?;
        let file_type = parts
            .next()
            .ok_or_else(|| parse_err("missing mesh format type"))?;
        if file_type != "0" {
            return Err(parse_err("binary .msh files are not supported"));
        }
        Ok(version)
    }

    fn element_cell_type(elem_type: u32) -> Option<CellType> {
        match elem_type {
            1 => Some(CellType::Line),
            2 => Some(CellType::Triangle),
            3 => Some(CellType::Quad),
            4 => Some(CellType::Tetra),
            5 => Some(CellType::Hexahedron),
            6 => Some(CellType::Wedge),
            7 => Some(CellType::Pyramid),
            15 => Some(CellType::Vertex),
            _ => None,
        }
    }

    fn parse_count(line: Option<&str>, what: &str) -> Result<usize, MeshTidyError> {
        let line = line.ok_or_else(|| parse_err(format!("missing {what} count")))?;
        line.trim()
            .parse::<usize>()
            .map_err(|_| parse_err(format!("invalid {what} count: {line}")))
    }

    fn next_field<'a>(
        parts: &mut impl Iterator<Item = &'a str>,
        what: &str,
    ) -> Result<&'a str, MeshTidyError> {
        parts.next().ok_or_else(|| parse_err(format!("missing {what}")))
    }

    fn parse_coord(raw: &str) -> Result<f64, MeshTidyError> {
        raw.parse::<f64>()
            .map_err(|_| parse_err(format!("invalid coordinate: {raw}")))
    }

    fn expect_end<'a>(
        lines: &mut impl Iterator<Item = &'a str>,
        marker: &str,
    ) -> Result<(), MeshTidyError> {
        match lines.next() {
            Some(line) if line.trim() == marker => Ok(()),
            _ => Err(parse_err(format!("missing {marker}"))),
        }
    }

    /// Parse with explicit options.
    pub fn read_with_options<R: Read>(
        &self,
        mut reader: R,
        options: GmshReadOptions,
    ) -> Result<Mesh, MeshTidyError> {
        let mut contents = String::new();
        reader.read_to_string(&mut contents)?;
        let mut lines = contents.lines();

        let mut version: Option<String> = None;
        let mut coords: Vec<f64> = Vec::new();
        let mut node_index: HashMap<u64, usize> = HashMap::new();
        let mut elements: Vec<Element> = Vec::new();

        while let Some(line) = lines.next() {
            match line.trim() {
                "$MeshFormat" => {
                    let format_line = lines
                        .next()
                        .ok_or_else(|| parse_err("missing MeshFormat"))?;
                    version = Some(Self::parse_version(format_line)?.to_string());
                    Self::expect_end(&mut lines, "$EndMeshFormat")?;
                }
                "$Nodes" => {
                    let node_count = Self::parse_count(lines.next(), "node")?;
                    coords.reserve(3 * node_count);
                    node_index.reserve(node_count);
                    for _ in 0..node_count {
                        let node_line = lines
                            .next()
                            .ok_or_else(|| parse_err("unexpected end of node list"))?;
                        let mut parts = node_line.split_whitespace();
                        let raw_id = Self::next_field(&mut parts, "node id")?;
                        let tag = raw_id
                            .parse::<u64>()
                            .map_err(|_| parse_err(format!("invalid node id: {raw_id}")))?;
                        if node_index.insert(tag, node_index.len()).is_some() {
                            return Err(parse_err(format!("duplicate node id: {tag}")));
                        }
                        for axis in ["x", "y", "z"] {
                            let raw = Self::next_field(&mut parts, &format!("{axis} coordinate"))?;
                            coords.push(Self::parse_coord(raw)?);
                        }
                    }
                    Self::expect_end(&mut lines, "$EndNodes")?;
                }
                "$Elements" => {
                    let elem_count = Self::parse_count(lines.next(), "element")?;
                    elements.reserve(elem_count);
                    for _ in 0..elem_count {
                        let elem_line = lines
                            .next()
                            .ok_or_else(|| parse_err("unexpected end of element list"))?;
                        elements.push(Self::parse_element(elem_line, &node_index)?);
                    }
                    Self::expect_end(&mut lines, "$EndElements")?;
                }
                // Names are not carried into cell data; the numeric tags are.
                "$PhysicalNames" => {}
                other => {
                    if other.starts_with("$") && !other.starts_with("$End") {
                        log::warn!("gmsh: skipping unsupported section {other}");
                    }
                }
            }
        }

        let version = version.unwrap_or_else(|| "2.2".to_string());
        if version != "2.2" {
            return Err(parse_err(format!("unsupported gmsh version: {version}")));
        }

        let mut cells = Vec::new();
        let mut physical = Vec::new();
        let mut geometrical = Vec::new();
        for (cell_type, run) in &elements.iter().chunk_by(|e| e.cell_type) {
            let mut connectivity = Vec::new();
            let (mut phys, mut geom) = (Vec::new(), Vec::new());
            for element in run {
                connectivity.extend_from_slice(&element.nodes);
                phys.push(element.tags[0]);
                geom.push(element.tags[1]);
            }
            cells.push(CellBlock::try_new(cell_type, connectivity)?);
            physical.push(DataArray::int(phys));
            geometrical.push(DataArray::int(geom));
        }

        let mut cell_data = BTreeMap::new();
        if options.keep_tags {
            cell_data.insert(PHYSICAL_TAG.to_string(), physical);
            cell_data.insert(GEOMETRICAL_TAG.to_string(), geometrical);
        }

        Mesh::try_new(Points::try_new(3, coords)?, cells, BTreeMap::new(), cell_data)
    }

    fn parse_element(
        line: &str,
        node_index: &HashMap<u64, usize>,
    ) -> Result<Element, MeshTidyError> {
        let mut parts = line.split_whitespace();
        Self::next_field(&mut parts, "element id")?;
        let raw_type = Self::next_field(&mut parts, "element type")?;
        let elem_type = raw_type
            .parse::<u32>()
            .map_err(|_| parse_err(format!("invalid element type: {raw_type}")))?;
        let cell_type = Self::element_cell_type(elem_type)
            .ok_or_else(|| parse_err(format!("unsupported element type: {elem_type}")))?;
        let num_tags = Self::next_field(&mut parts, "element tag count")?
            .parse::<usize>()
            .map_err(|_| parse_err("invalid element tag count"))?;
        let mut tags = [0i64; 2];
        for i in 0..num_tags {
            let raw = Self::next_field(&mut parts, "element tag")?;
            let tag = raw
                .parse::<i64>()
                .map_err(|_| parse_err(format!("invalid element tag: {raw}")))?;
            if let Some(slot) = tags.get_mut(i) {
                *slot = tag;
            }
        }
        let nodes = (0..cell_type.node_count())
            .map(|_| {
                let raw = Self::next_field(&mut parts, "element node id")?;
                raw.parse::<u64>()
                    .ok()
                    .and_then(|tag| node_index.get(&tag).copied())
                    .ok_or_else(|| parse_err(format!("unknown element node id: {raw}")))
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Element {
            cell_type,
            tags,
            nodes,
        })
    }
}

impl MeshReader for GmshReader {
    fn read<R: Read>(&self, reader: R) -> Result<Mesh, MeshTidyError> {
        self.read_with_options(reader, GmshReadOptions::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SQUARE: &str = "$MeshFormat
2.2 0 8
$EndMeshFormat
$Nodes
4
10 0 0 0
20 1 0 0
30 1 1 0
40 0 1 0
$EndNodes
$Elements
3
1 1 2 5 1 10 20
2 2 2 7 3 10 20 30
3 2 2 7 3 10 30 40
$EndElements
";

    #[test]
    fn nodes_are_renumbered_in_file_order() {
        let mesh = GmshReader.read(SQUARE.as_bytes()).unwrap();
        assert_eq!(mesh.n_points(), 4);
        assert_eq!(mesh.points.dimension(), 3);
        assert_eq!(mesh.cells.len(), 2);
        assert_eq!(mesh.cells[0].cell_type(), CellType::Line);
        assert_eq!(mesh.cells[1].connectivity(), &[0, 1, 2, 0, 2, 3]);
        assert_eq!(
            mesh.cell_data[PHYSICAL_TAG],
            vec![DataArray::int(vec![5]), DataArray::int(vec![7, 7])]
        );
        assert_eq!(
            mesh.cell_data[GEOMETRICAL_TAG],
            vec![DataArray::int(vec![1]), DataArray::int(vec![3, 3])]
        );
    }

    #[test]
    fn tags_can_be_dropped() {
        let mesh = GmshReader
            .read_with_options(SQUARE.as_bytes(), GmshReadOptions { keep_tags: false })
            .unwrap();
        assert!(mesh.cell_data.is_empty());
    }

    #[test]
    fn binary_is_rejected() {
        let err = GmshReader
            .read("$MeshFormat\n2.2 1 8\n$EndMeshFormat\n".as_bytes())
            .unwrap_err();
        assert_eq!(
            err,
            MeshTidyError::MeshIoParse("binary .msh files are not supported".into())
        );
    }

    #[test]
    fn unsupported_sections_are_skipped() {
        let text = SQUARE.replace(
            "$Nodes",
            "$NodeData\n1\n\"T\"\n$EndNodeData\n$Nodes",
        );
        let mesh = GmshReader.read(text.as_bytes()).unwrap();
        assert_eq!(mesh, GmshReader.read(SQUARE.as_bytes()).unwrap());
    }

    #[test]
    fn unknown_node_is_rejected() {
        let text = SQUARE.replace("3 2 2 7 3 10 30 40", "3 2 2 7 3 10 30 99");
        assert!(matches!(
            GmshReader.read(text.as_bytes()),
            Err(MeshTidyError::MeshIoParse(msg)) if msg.contains("99")
        ));
    }
}
