use gmsh_tidy::algs::pipeline::{Pipeline, PostProcessOptions, VertexPruner, post_process};
use gmsh_tidy::algs::{prune_vertices, prune_z_0, remove_lower_dim_cells};
use gmsh_tidy::mesh::{CellBlock, DataArray, Mesh, Points};
use gmsh_tidy::mesh_error::MeshTidyError;
use gmsh_tidy::topology::cell_type::CellType;
use gmsh_tidy::DebugInvariants;
use proptest::prelude::*;

/// Unit cube split into tetrahedra, with boundary triangles, an edge and a
/// stray point that no cell uses.
fn cube_with_boundary() -> Mesh {
    let points = Points::from_rows([
        [0.0, 0.0, 0.0],
        [1.0, 0.0, 0.0],
        [1.0, 1.0, 0.0],
        [0.0, 1.0, 0.0],
        [0.0, 0.0, 1.0],
        [1.0, 0.0, 1.0],
        [1.0, 1.0, 1.0],
        [0.0, 1.0, 1.0],
        [5.0, 5.0, 5.0],
    ]);
    let lines = CellBlock::from_cells(CellType::Line, [[0, 1]]).unwrap();
    let tris = CellBlock::from_cells(CellType::Triangle, [[0, 1, 2], [0, 2, 3]]).unwrap();
    let tets = CellBlock::from_cells(
        CellType::Tetra,
        [
            [0, 1, 3, 4],
            [1, 2, 3, 6],
            [1, 4, 5, 6],
            [3, 4, 6, 7],
            [1, 3, 4, 6],
        ],
    )
    .unwrap();
    Mesh::new(points, vec![lines, tris, tets])
        .with_point_data("node", DataArray::int((0..9).collect()))
        .with_cell_data(
            "gmsh:physical",
            vec![
                DataArray::int(vec![1]),
                DataArray::int(vec![2, 2]),
                DataArray::int(vec![3; 5]),
            ],
        )
}

/// Planar mesh living in z = 0 with an unused point at the front.
fn flat_quads() -> Mesh {
    let points = Points::from_rows([
        [9.0, 9.0, 0.0],
        [0.0, 0.0, 0.0],
        [1.0, 0.0, 0.0],
        [1.0, 1.0, 0.0],
        [0.0, 1.0, 0.0],
        [2.0, 0.0, 0.0],
        [2.0, 1.0, 0.0],
    ]);
    let quads = CellBlock::from_cells(CellType::Quad, [[1, 2, 3, 4], [2, 5, 6, 3]]).unwrap();
    let tris = CellBlock::from_cells(CellType::Triangle, [[1, 3, 4]]).unwrap();
    Mesh::new(points, vec![quads, tris])
}

#[test]
fn solid_cells_survive_filtering_with_their_data() {
    let out = remove_lower_dim_cells(cube_with_boundary()).unwrap();
    assert_eq!(out.cell_types().collect::<Vec<_>>(), vec![CellType::Tetra]);
    assert_eq!(out.cell_data["gmsh:physical"], vec![DataArray::int(vec![3; 5])]);
    assert_eq!(out.n_points(), 9);
}

#[test]
fn surface_only_mesh_keeps_triangles_and_quads() {
    let out = remove_lower_dim_cells(flat_quads()).unwrap();
    assert_eq!(
        out.cell_types().collect::<Vec<_>>(),
        vec![CellType::Quad, CellType::Triangle]
    );
}

#[test]
fn full_pipeline_on_volume_mesh() {
    let opts = PostProcessOptions {
        remove_lower_dim_cells: true,
        prune_vertices: true,
        prune_z_0: true,
    };
    let out = post_process(cube_with_boundary(), &opts).unwrap();
    assert_eq!(out.n_points(), 8);
    assert_eq!(out.points.dimension(), 3);
    assert_eq!(out.point_data["node"], DataArray::int((0..8).collect()));
    assert!(out.validate_invariants().is_ok());
}

#[test]
fn full_pipeline_on_flat_mesh() {
    let opts = PostProcessOptions {
        remove_lower_dim_cells: true,
        prune_vertices: true,
        prune_z_0: true,
    };
    let out = post_process(flat_quads(), &opts).unwrap();
    assert_eq!(out.points.dimension(), 2);
    assert_eq!(out.n_points(), 6);
    assert_eq!(out.points.get(0), Some(&[0.0, 0.0][..]));
    assert_eq!(out.cells[0].connectivity(), &[0, 1, 2, 3, 1, 4, 5, 2]);
    assert_eq!(out.cells[1].connectivity(), &[0, 2, 3]);
}

#[test]
fn default_options_only_prune() {
    let out = post_process(cube_with_boundary(), &PostProcessOptions::default()).unwrap();
    assert_eq!(out.cells.len(), 3);
    assert_eq!(out.n_points(), 8);
    assert_eq!(out.points.dimension(), 3);
}

#[test]
fn raised_point_keeps_z() {
    let mut mesh = flat_quads();
    let mut coords = mesh.points.as_flat().to_vec();
    coords[3 * 6 + 2] = 1e-12;
    mesh.points = Points::try_new(3, coords).unwrap();
    let out = prune_z_0(mesh).unwrap();
    assert_eq!(out.points.dimension(), 3);
}

#[test]
fn misaligned_point_data_stops_the_pipeline() {
    let mesh = flat_quads().with_point_data("T", DataArray::float(vec![0.0; 3]));
    let err = post_process(mesh, &PostProcessOptions::default()).unwrap_err();
    assert_eq!(
        err,
        MeshTidyError::DataAlignment {
            field: "T".into(),
            expected: 7,
            found: 3
        }
    );
}

#[test]
fn dangling_cell_index_is_an_error_in_every_stage() {
    let dangling = || {
        Mesh::new(
            Points::from_rows([[0.0, 0.0, 0.0], [1.0, 0.0, 0.0]]),
            vec![CellBlock::from_cells(CellType::Line, [[0, 5]]).unwrap()],
        )
    };
    let expected = MeshTidyError::PointIndexOutOfRange {
        block: 0,
        index: 5,
        len: 2,
    };
    let only_reduce = PostProcessOptions {
        prune_vertices: false,
        prune_z_0: true,
        ..Default::default()
    };
    assert_eq!(post_process(dangling(), &only_reduce).unwrap_err(), expected);
    let only_filter = PostProcessOptions {
        remove_lower_dim_cells: true,
        prune_vertices: false,
        prune_z_0: false,
    };
    assert_eq!(post_process(dangling(), &only_filter).unwrap_err(), expected);
    assert_eq!(prune_vertices(dangling()).unwrap_err(), expected);
}

#[test]
fn filtering_everything_away_is_an_error() {
    let mesh = Mesh::new(Points::from_rows([[0.0, 0.0, 0.0]]), vec![]);
    let opts = PostProcessOptions {
        remove_lower_dim_cells: true,
        ..Default::default()
    };
    assert_eq!(
        post_process(mesh, &opts).unwrap_err(),
        MeshTidyError::EmptyResult {
            stage: "remove_lower_dim_cells"
        }
    );
}

#[test]
fn hand_built_pipeline_matches_free_function() {
    let pipeline = Pipeline::new().then(VertexPruner);
    assert_eq!(
        pipeline.run(cube_with_boundary()).unwrap(),
        prune_vertices(cube_with_boundary()).unwrap()
    );
}

fn random_mesh() -> impl Strategy<Value = Mesh> {
    (1usize..30).prop_flat_map(|n_points| {
        (
            prop::collection::vec(prop::array::uniform3(0..n_points), 0..12),
            prop::collection::vec(prop::array::uniform2(0..n_points), 0..6),
        )
            .prop_map(move |(tris, lines)| {
                let points =
                    Points::try_new(2, (0..2 * n_points).map(|v| v as f64).collect()).unwrap();
                let mut cells = vec![CellBlock::from_cells(CellType::Triangle, tris).unwrap()];
                if !lines.is_empty() {
                    cells.push(CellBlock::from_cells(CellType::Line, lines).unwrap());
                }
                Mesh::new(points, cells)
                    .with_point_data("id", DataArray::int((0..n_points as i64).collect()))
            })
    })
}

proptest! {
    #[test]
    fn pruning_is_idempotent_and_in_range(mesh in random_mesh()) {
        match prune_vertices(mesh.clone()) {
            Ok(once) => {
                let n = once.n_points();
                prop_assert!(once.cells.iter().all(|b| b.connectivity().iter().all(|&i| i < n)));
                // Kept point ids are the old ids, ascending.
                let ids = &once.point_data["id"];
                let expected: Vec<i64> = {
                    let mut v: Vec<i64> = mesh
                        .cells
                        .iter()
                        .flat_map(|b| b.connectivity().iter().map(|&i| i as i64))
                        .collect();
                    v.sort_unstable();
                    v.dedup();
                    v
                };
                prop_assert_eq!(ids, &DataArray::int(expected));
                let twice = prune_vertices(once.clone()).unwrap();
                prop_assert_eq!(once, twice);
            }
            Err(err) => {
                prop_assert_eq!(mesh.n_cells(), 0);
                prop_assert_eq!(err, MeshTidyError::EmptyResult { stage: "prune_vertices" });
            }
        }
    }
}
