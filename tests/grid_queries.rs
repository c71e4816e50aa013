//! Geometric queries and activation bookkeeping on built grids.

use approx::assert_relative_eq;
use cpgrid::{CornerPointGrid, GridDims, GridError, ZcornMapper};

#[test]
fn depth_equals_center_z() {
    let dims = GridDims::cube(5);
    let grid = CornerPointGrid::regular(dims, 100.0, 100.0, 10.0);
    for k in 0..5 {
        for j in 0..5 {
            for i in 0..5 {
                let center = grid.cell_center(i, j, k).unwrap();
                let depth = grid.cell_depth(i, j, k).unwrap();
                assert_relative_eq!(center[2], depth, epsilon = 1e-12);
            }
        }
    }
}

#[test]
fn dims_on_anisotropic_grid() {
    let grid = CornerPointGrid::regular(GridDims::new(4, 3, 2), 25.0, 50.0, 2.5);
    let d = grid.cell_dims(2, 1, 1).unwrap();
    assert_relative_eq!(d[0], 25.0);
    assert_relative_eq!(d[1], 50.0);
    assert_relative_eq!(d[2], 2.5);
    assert_relative_eq!(grid.cell_thickness(2, 1, 1).unwrap(), 2.5);
}

#[test]
fn active_global_roundtrip_after_flag_reset() {
    let dims = GridDims::new(3, 4, 5);
    let mut grid = CornerPointGrid::regular(dims, 1.0, 1.0, 1.0);
    let flags: Vec<i32> = (0..dims.cell_count()).map(|g| (g % 3 != 0) as i32).collect();
    grid.reset_actnum(&flags).unwrap();

    for active in 0..grid.num_active() {
        let global = grid.global_index_from_active(active).unwrap();
        assert_eq!(grid.active_index_global(global).unwrap(), active);
        assert!(flags[global] > 0);
    }
    for (global, &flag) in flags.iter().enumerate() {
        assert_eq!(grid.cell_active_global(global).unwrap(), flag > 0);
    }
}

#[test]
fn misuse_raises_distinct_errors() {
    let dims = GridDims::new(2, 2, 2);
    let mut grid = CornerPointGrid::regular(dims, 1.0, 1.0, 1.0);
    grid.reset_actnum(&[1, 0, 1, 0, 1, 0, 1, 0]).unwrap();

    assert_eq!(
        grid.active_index_global(1),
        Err(GridError::InactiveCell(1))
    );
    assert_eq!(
        grid.active_index_global(99),
        Err(GridError::GlobalIndexOutOfBounds {
            index: 99,
            volume: 8,
        })
    );
    assert_eq!(
        grid.global_index_from_active(4),
        Err(GridError::ActiveIndexOutOfBounds {
            index: 4,
            active: 4,
        })
    );
    assert!(matches!(
        grid.cell_volume(2, 0, 0),
        Err(GridError::CellIndexOutOfBounds { .. })
    ));
}

#[test]
fn volume_cache_respects_actnum_resets() {
    let dims = GridDims::new(2, 2, 2);
    let mut grid = CornerPointGrid::regular(dims, 10.0, 10.0, 10.0);

    assert_eq!(grid.active_volume().len(), 8);
    grid.reset_actnum(&[1, 1, 1, 1, 0, 0, 0, 0]).unwrap();
    let volumes = grid.active_volume();
    assert_eq!(volumes.len(), 4);
    for &v in volumes {
        assert_relative_eq!(v, 1000.0, epsilon = 1e-9);
    }
    // Inactive cells still answer direct volume queries.
    assert_relative_eq!(grid.cell_volume(0, 0, 1).unwrap(), 1000.0, epsilon = 1e-9);
}

#[test]
fn fixup_is_idempotent() {
    let dims = GridDims::new(3, 4, 5);
    let grid = CornerPointGrid::regular(dims, 1.0, 1.0, 1.0);
    let mapper = ZcornMapper::new(dims);
    let mut zcorn = grid.zcorn().to_vec();

    // Push two top corners below the bottoms of their own cells; each
    // repair cascades exactly once into the layer below.
    zcorn[mapper.index(1, 1, 1, 0).unwrap()] += 2.0;
    zcorn[mapper.index(2, 3, 2, 3).unwrap()] += 2.0;

    assert!(!mapper.valid_zcorn(&zcorn));
    let repaired = mapper.fixup_zcorn(&mut zcorn);
    assert_eq!(repaired, 4);
    assert!(mapper.valid_zcorn(&zcorn));
    assert_eq!(mapper.fixup_zcorn(&mut zcorn), 0);
}

#[test]
fn geometry_validity_flags_collapsed_columns() {
    let dims = GridDims::new(2, 1, 1);
    let mut coord = Vec::new();
    for j in 0..=1 {
        for i in 0..=2 {
            let (x, y) = (i as f64 * 10.0, j as f64 * 10.0);
            coord.extend_from_slice(&[x, y, 0.0, x, y, 10.0]);
        }
    }
    let mut zcorn = vec![0.0; dims.zcorn_len()];
    let mapper = ZcornMapper::new(dims);
    // Cell 0 gets full height, cell 1 collapses to zero thickness.
    for c in 4..8 {
        zcorn[mapper.index(0, 0, 0, c).unwrap()] = 10.0;
    }
    let grid = CornerPointGrid::from_corner_point(dims, coord, zcorn, None).unwrap();

    assert!(grid.cell_geometry_valid(0, 0, 0).unwrap());
    assert!(!grid.cell_geometry_valid(1, 0, 0).unwrap());
    assert_relative_eq!(grid.cell_volume(1, 0, 0).unwrap(), 0.0, epsilon = 1e-12);
}
