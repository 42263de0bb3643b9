//! Post-processing pipeline for freshly generated meshes.
//!
//! [`PostProcessOptions`] selects which stages run; [`Pipeline`] holds the
//! selected stages as an ordered list of [`MeshTransform`]s and threads an
//! owned [`Mesh`] through them. Stage order is fixed:
//!
//! 1. [`CellTypeFilter`] (`remove_lower_dim_cells`)
//! 2. [`VertexPruner`] (`prune_vertices`)
//! 3. [`DimensionReducer`] (`prune_z_0`)

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::algs::{cell_filter, prune, reduce};
use crate::debug_invariants::DebugInvariants;
use crate::mesh::Mesh;
use crate::mesh_error::MeshTidyError;

/// Flags selecting the post-processing stages.
///
/// Missing fields deserialize to their defaults, so a partial config such as
/// `{"prune_z_0": true}` is valid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PostProcessOptions {
    /// Keep only cells of the highest topological dimension. Default `false`.
    pub remove_lower_dim_cells: bool,
    /// Drop points no cell references and compact ids. Default `true`.
    pub prune_vertices: bool,
    /// Drop the z coordinate of flat 3D meshes. Default `false`.
    pub prune_z_0: bool,
}

impl Default for PostProcessOptions {
    fn default() -> Self {
        Self {
            remove_lower_dim_cells: false,
            prune_vertices: true,
            prune_z_0: false,
        }
    }
}

impl PostProcessOptions {
    /// The enabled stages, in execution order.
    pub fn pipeline(&self) -> Pipeline {
        let mut pipeline = Pipeline::new();
        if self.remove_lower_dim_cells {
            pipeline = pipeline.then(CellTypeFilter);
        }
        if self.prune_vertices {
            pipeline = pipeline.then(VertexPruner);
        }
        if self.prune_z_0 {
            pipeline = pipeline.then(DimensionReducer);
        }
        pipeline
    }
}

/// A pure mesh-to-mesh transformation.
pub trait MeshTransform: Send + Sync {
    /// Stable name used in logs and errors.
    fn name(&self) -> &'static str;
    /// Transform `mesh`, consuming it.
    fn apply(&self, mesh: Mesh) -> Result<Mesh, MeshTidyError>;
}

/// Keeps only the highest-tier cell blocks; see [`cell_filter`].
#[derive(Clone, Copy, Debug, Default)]
pub struct CellTypeFilter;

impl MeshTransform for CellTypeFilter {
    fn name(&self) -> &'static str {
        cell_filter::STAGE
    }
    fn apply(&self, mesh: Mesh) -> Result<Mesh, MeshTidyError> {
        cell_filter::remove_lower_dim_cells(mesh)
    }
}

/// Drops unreferenced points; see [`prune`].
#[derive(Clone, Copy, Debug, Default)]
pub struct VertexPruner;

impl MeshTransform for VertexPruner {
    fn name(&self) -> &'static str {
        prune::STAGE
    }
    fn apply(&self, mesh: Mesh) -> Result<Mesh, MeshTidyError> {
        prune::prune_vertices(mesh)
    }
}

/// Collapses a flat z axis; see [`reduce`].
#[derive(Clone, Copy, Debug, Default)]
pub struct DimensionReducer;

impl MeshTransform for DimensionReducer {
    fn name(&self) -> &'static str {
        reduce::STAGE
    }
    fn apply(&self, mesh: Mesh) -> Result<Mesh, MeshTidyError> {
        reduce::prune_z_0(mesh)
    }
}

/// Ordered list of mesh transformations.
#[derive(Default)]
pub struct Pipeline {
    stages: Vec<Box<dyn MeshTransform>>,
}

impl Pipeline {
    /// An empty pipeline; running it returns the mesh unchanged.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a stage.
    pub fn then(mut self, stage: impl MeshTransform + 'static) -> Self {
        self.stages.push(Box::new(stage));
        self
    }

    /// Names of the stages, in execution order.
    pub fn stage_names(&self) -> Vec<&'static str> {
        self.stages.iter().map(|s| s.name()).collect()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.stages.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }

    /// Run every stage in order, stopping at the first error.
    pub fn run(&self, mut mesh: Mesh) -> Result<Mesh, MeshTidyError> {
        for stage in &self.stages {
            let (blocks, points) = (mesh.cells.len(), mesh.n_points());
            mesh = stage.apply(mesh)?;
            log::debug!(
                "{}: {blocks} -> {} cell blocks, {points} -> {} points, dimension {}",
                stage.name(),
                mesh.cells.len(),
                mesh.n_points(),
                mesh.points.dimension()
            );
            mesh.debug_assert_invariants();
        }
        Ok(mesh)
    }
}

impl fmt::Debug for Pipeline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.stage_names()).finish()
    }
}

/// Apply the stages enabled in `options` to `mesh`.
pub fn post_process(mesh: Mesh, options: &PostProcessOptions) -> Result<Mesh, MeshTidyError> {
    options.pipeline().run(mesh)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_only_prune_vertices() {
        let opts = PostProcessOptions::default();
        assert_eq!(opts.pipeline().stage_names(), vec!["prune_vertices"]);
    }

    #[test]
    fn stages_run_in_fixed_order() {
        let opts = PostProcessOptions {
            remove_lower_dim_cells: true,
            prune_vertices: true,
            prune_z_0: true,
        };
        assert_eq!(
            opts.pipeline().stage_names(),
            vec!["remove_lower_dim_cells", "prune_vertices", "prune_z_0"]
        );
    }

    #[test]
    fn partial_json_fills_defaults() {
        let opts: PostProcessOptions = serde_json::from_str(r#"{"prune_z_0": true}"#).unwrap();
        assert_eq!(
            opts,
            PostProcessOptions {
                remove_lower_dim_cells: false,
                prune_vertices: true,
                prune_z_0: true
            }
        );
    }

    #[test]
    fn all_disabled_is_identity() {
        let opts = PostProcessOptions {
            prune_vertices: false,
            ..Default::default()
        };
        assert!(opts.pipeline().is_empty());
        assert_eq!(format!("{:?}", opts.pipeline()), "[]");
    }
}
