//! Re-export public algorithms.

pub mod cell_filter;
pub mod pipeline;
pub mod prune;
pub mod reduce;

pub use cell_filter::remove_lower_dim_cells;
pub use pipeline::{Pipeline, PostProcessOptions, post_process};
pub use prune::prune_vertices;
pub use reduce::prune_z_0;
