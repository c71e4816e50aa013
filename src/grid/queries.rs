//! Geometric query engine.
//!
//! All queries derive from the same 8-corner reconstruction: the four
//! bounding pillars give X/Y by linear interpolation along each pillar
//! at the target ZCORN depths. Corner positions are returned by value;
//! no query mutates the grid, and the only shared state is the lazily
//! filled active-volume cache.

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::error::GridError;
use crate::grid::volume::{cylindrical_cell_volume, hexahedron_volume};
use crate::grid::CornerPointGrid;
use crate::mapper::{CoordMapper, ZcornMapper};

/// Coordinates beyond this magnitude mark a cell as ill-conditioned
/// (placeholder values in exported files).
const COORDINATE_CEILING: f64 = 1.0e20;

/// Minimum top/bottom pillar separation for a cell to count as
/// geometrically valid, in SI metres.
const PILLAR_SEPARATION_FLOOR: f64 = 1.0e-4;

impl CornerPointGrid {
    /// The 8 corner positions of cell (i, j, k) as (X, Y, Z) arrays in
    /// the ZCORN corner numbering.
    ///
    /// Degenerate pillars whose top and bottom depths coincide
    /// short-circuit to the pillar's top point, avoiding the division
    /// by zero in the interpolation.
    pub fn cell_corners(
        &self,
        i: usize,
        j: usize,
        k: usize,
    ) -> Result<([f64; 8], [f64; 8], [f64; 8]), GridError> {
        self.dims().global_index(i, j, k)?;
        Ok(self.cell_corners_unchecked(i, j, k))
    }

    /// [`cell_corners`](Self::cell_corners) addressed by linear global
    /// index.
    pub fn cell_corners_global(
        &self,
        global_index: usize,
    ) -> Result<([f64; 8], [f64; 8], [f64; 8]), GridError> {
        let (i, j, k) = self.dims().ijk(global_index)?;
        Ok(self.cell_corners_unchecked(i, j, k))
    }

    fn cell_corners_unchecked(&self, i: usize, j: usize, k: usize) -> ([f64; 8], [f64; 8], [f64; 8]) {
        let dims = self.dims();
        let zm = ZcornMapper::new(dims);
        let cm = CoordMapper::new(dims);

        let mut x = [0.0; 8];
        let mut y = [0.0; 8];
        let mut z = [0.0; 8];
        for (c, zc) in z.iter_mut().enumerate() {
            *zc = self.zcorn()[zm.index_unchecked(i, j, k, c)];
        }

        let pillars = [
            cm.pillar_unchecked(i, j),
            cm.pillar_unchecked(i + 1, j),
            cm.pillar_unchecked(i, j + 1),
            cm.pillar_unchecked(i + 1, j + 1),
        ];
        let coord = self.coord();
        for (n, &p) in pillars.iter().enumerate() {
            let (xt, yt, zt) = (coord[p], coord[p + 1], coord[p + 2]);
            let (xb, yb, zb) = (coord[p + 3], coord[p + 4], coord[p + 5]);

            if zt == zb {
                x[n] = xt;
                x[n + 4] = xt;
                y[n] = yt;
                y[n + 4] = yt;
            } else {
                x[n] = xt + (xb - xt) / (zt - zb) * (zt - z[n]);
                x[n + 4] = xt + (xb - xt) / (zt - zb) * (zt - z[n + 4]);
                y[n] = yt + (yb - yt) / (zt - zb) * (zt - z[n]);
                y[n + 4] = yt + (yb - yt) / (zt - zb) * (zt - z[n + 4]);
            }
        }

        (x, y, z)
    }

    /// One corner position of cell (i, j, k) as `[x, y, z]`.
    pub fn corner_pos(
        &self,
        i: usize,
        j: usize,
        k: usize,
        corner: usize,
    ) -> Result<[f64; 3], GridError> {
        if corner >= 8 {
            return Err(GridError::CornerIndexOutOfBounds(corner));
        }
        let (x, y, z) = self.cell_corners(i, j, k)?;
        Ok([x[corner], y[corner], z[corner]])
    }

    /// Cell volume; cylindrical grids use the analytic sector formula,
    /// all others the hexahedral decomposition. Consults the
    /// active-volume cache when the cell is active and the cache has
    /// been materialized.
    pub fn cell_volume(&self, i: usize, j: usize, k: usize) -> Result<f64, GridError> {
        let global = self.dims().global_index(i, j, k)?;
        self.cell_volume_global(global)
    }

    /// [`cell_volume`](Self::cell_volume) addressed by linear global
    /// index.
    pub fn cell_volume_global(&self, global_index: usize) -> Result<f64, GridError> {
        let (i, j, k) = self.dims().ijk(global_index)?;
        if self.cell_active_global(global_index)? {
            if let Some(cache) = self.active_volume.get() {
                let active = self.active_index_global(global_index)?;
                return Ok(cache[active]);
            }
        }
        Ok(self.compute_cell_volume(i, j, k))
    }

    fn compute_cell_volume(&self, i: usize, j: usize, k: usize) -> f64 {
        let (x, y, z) = self.cell_corners_unchecked(i, j, k);
        if let Some(radial) = self.radial() {
            cylindrical_cell_volume(radial.rv[i], radial.rv[i + 1], radial.thetav[j], z[4] - z[0])
        } else {
            hexahedron_volume(&x, &y, &z)
        }
    }

    #[inline]
    fn ijk_unchecked(&self, global_index: usize) -> (usize, usize, usize) {
        let (nx, ny, _) = self.dims().as_tuple();
        let rest = global_index % (nx * ny);
        (rest % nx, rest / nx, global_index / (nx * ny))
    }

    /// Per-active-cell volumes, in active-index order.
    ///
    /// The cache is filled on first access after construction or an
    /// ACTNUM reset; the fill is a data-parallel loop over independent
    /// active cells when the `parallel` feature is enabled.
    pub fn active_volume(&self) -> &[f64] {
        self.active_volume.get_or_init(|| {
            #[cfg(feature = "parallel")]
            {
                self.active_to_global
                    .par_iter()
                    .map(|&global| {
                        let (i, j, k) = self.ijk_unchecked(global);
                        self.compute_cell_volume(i, j, k)
                    })
                    .collect()
            }
            #[cfg(not(feature = "parallel"))]
            {
                self.active_to_global
                    .iter()
                    .map(|&global| {
                        let (i, j, k) = self.ijk_unchecked(global);
                        self.compute_cell_volume(i, j, k)
                    })
                    .collect()
            }
        })
    }

    /// Mean vertical distance between the bottom and top faces.
    pub fn cell_thickness(&self, i: usize, j: usize, k: usize) -> Result<f64, GridError> {
        let (_, _, z) = self.cell_corners(i, j, k)?;
        Ok(face_mean(&z, 4) - face_mean(&z, 0))
    }

    /// Characteristic (dx, dy, dz) edge lengths from averaged opposing
    /// corner pairs.
    pub fn cell_dims(&self, i: usize, j: usize, k: usize) -> Result<[f64; 3], GridError> {
        let (x, y, z) = self.cell_corners(i, j, k)?;

        // dx: midpoints of the i-faces (corners 0,2,4,6 vs 1,3,5,7).
        let x1 = (x[0] + x[2] + x[4] + x[6]) / 4.0;
        let y1 = (y[0] + y[2] + y[4] + y[6]) / 4.0;
        let x2 = (x[1] + x[3] + x[5] + x[7]) / 4.0;
        let y2 = (y[1] + y[3] + y[5] + y[7]) / 4.0;
        let dx = f64::hypot(x2 - x1, y2 - y1);

        // dy: midpoints of the j-faces (corners 0,1,4,5 vs 2,3,6,7).
        let x1 = (x[0] + x[1] + x[4] + x[5]) / 4.0;
        let y1 = (y[0] + y[1] + y[4] + y[5]) / 4.0;
        let x2 = (x[2] + x[3] + x[6] + x[7]) / 4.0;
        let y2 = (y[2] + y[3] + y[6] + y[7]) / 4.0;
        let dy = f64::hypot(x2 - x1, y2 - y1);

        let dz = face_mean(&z, 4) - face_mean(&z, 0);
        Ok([dx, dy, dz])
    }

    /// Arithmetic mean of the 8 corners, per component.
    pub fn cell_center(&self, i: usize, j: usize, k: usize) -> Result<[f64; 3], GridError> {
        let (x, y, z) = self.cell_corners(i, j, k)?;
        Ok([
            x.iter().sum::<f64>() / 8.0,
            y.iter().sum::<f64>() / 8.0,
            z.iter().sum::<f64>() / 8.0,
        ])
    }

    /// Midpoint depth between the mean top-face and mean bottom-face
    /// depths; coincides with the z-component of
    /// [`cell_center`](Self::cell_center).
    pub fn cell_depth(&self, i: usize, j: usize, k: usize) -> Result<f64, GridError> {
        let (_, _, z) = self.cell_corners(i, j, k)?;
        Ok((face_mean(&z, 0) + face_mean(&z, 4)) / 2.0)
    }

    /// [`cell_depth`](Self::cell_depth) addressed by linear global
    /// index.
    pub fn cell_depth_global(&self, global_index: usize) -> Result<f64, GridError> {
        let (i, j, k) = self.dims().ijk(global_index)?;
        let (_, _, z) = self.cell_corners_unchecked(i, j, k);
        Ok((face_mean(&z, 0) + face_mean(&z, 4)) / 2.0)
    }

    /// Whether the cell geometry is usable: all corner coordinates
    /// finite and below the placeholder ceiling, and at least one of
    /// the four pillar spans wider than the degeneracy floor.
    ///
    /// Never an error for an in-bounds cell; callers use this to skip
    /// ill-conditioned cells rather than crash on them.
    pub fn cell_geometry_valid(&self, i: usize, j: usize, k: usize) -> Result<bool, GridError> {
        let (x, y, z) = self.cell_corners(i, j, k)?;

        let finite = |v: &f64| v.is_finite() && v.abs() < COORDINATE_CEILING;
        if !(x.iter().all(finite) && y.iter().all(finite) && z.iter().all(finite)) {
            return Ok(false);
        }

        let max_span = (0..4)
            .map(|c| z[c + 4] - z[c])
            .fold(f64::NEG_INFINITY, f64::max);
        Ok(max_span > PILLAR_SEPARATION_FLOOR)
    }
}

#[inline]
fn face_mean(z: &[f64; 8], offset: usize) -> f64 {
    (z[offset] + z[offset + 1] + z[offset + 2] + z[offset + 3]) / 4.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::GridDims;
    use approx::assert_relative_eq;

    fn grid() -> CornerPointGrid {
        CornerPointGrid::regular(GridDims::new(3, 2, 4), 10.0, 15.0, 2.0)
    }

    #[test]
    fn test_corners_of_regular_grid() {
        let g = grid();
        let (x, y, z) = g.cell_corners(1, 1, 2).unwrap();
        assert_relative_eq!(x[0], 10.0);
        assert_relative_eq!(x[1], 20.0);
        assert_relative_eq!(y[0], 15.0);
        assert_relative_eq!(y[2], 30.0);
        assert_relative_eq!(z[0], 4.0);
        assert_relative_eq!(z[4], 6.0);
    }

    #[test]
    fn test_corner_bounds_errors() {
        let g = grid();
        assert!(matches!(
            g.cell_corners(3, 0, 0),
            Err(GridError::CellIndexOutOfBounds { i: 3, .. })
        ));
        assert!(matches!(
            g.corner_pos(0, 0, 0, 8),
            Err(GridError::CornerIndexOutOfBounds(8))
        ));
    }

    #[test]
    fn test_volume_thickness_dims() {
        let g = grid();
        for k in 0..4 {
            assert_relative_eq!(g.cell_volume(2, 1, k).unwrap(), 300.0, epsilon = 1e-9);
        }
        assert_relative_eq!(g.cell_thickness(0, 0, 0).unwrap(), 2.0);
        let dims = g.cell_dims(1, 0, 1).unwrap();
        assert_relative_eq!(dims[0], 10.0);
        assert_relative_eq!(dims[1], 15.0);
        assert_relative_eq!(dims[2], 2.0);
    }

    #[test]
    fn test_center_and_depth_agree() {
        let g = grid();
        for k in 0..4 {
            for j in 0..2 {
                for i in 0..3 {
                    let center = g.cell_center(i, j, k).unwrap();
                    let depth = g.cell_depth(i, j, k).unwrap();
                    assert_relative_eq!(center[2], depth, epsilon = 1e-12);
                }
            }
        }
    }

    #[test]
    fn test_global_forms_agree_with_ijk() {
        let g = grid();
        let dims = g.dims();
        for global in 0..dims.cell_count() {
            let (i, j, k) = dims.ijk(global).unwrap();
            assert_eq!(
                g.cell_corners_global(global).unwrap(),
                g.cell_corners(i, j, k).unwrap()
            );
            assert_relative_eq!(
                g.cell_depth_global(global).unwrap(),
                g.cell_depth(i, j, k).unwrap()
            );
        }
        assert!(matches!(
            g.cell_corners_global(dims.cell_count()),
            Err(GridError::GlobalIndexOutOfBounds { .. })
        ));
        assert!(matches!(
            g.cell_depth_global(dims.cell_count()),
            Err(GridError::GlobalIndexOutOfBounds { .. })
        ));
    }

    #[test]
    fn test_active_volume_cache() {
        let g = grid();
        let volumes = g.active_volume();
        assert_eq!(volumes.len(), 24);
        for &v in volumes {
            assert_relative_eq!(v, 300.0, epsilon = 1e-9);
        }
        // Single-cell query now hits the cache.
        assert_relative_eq!(g.cell_volume(0, 0, 0).unwrap(), 300.0, epsilon = 1e-9);
    }

    #[test]
    fn test_degenerate_pillar_short_circuits() {
        // Zero-height grid: every pillar has zt == zb.
        let g = CornerPointGrid::regular(GridDims::new(1, 1, 1), 5.0, 5.0, 0.0);
        let (x, y, _) = g.cell_corners(0, 0, 0).unwrap();
        assert_relative_eq!(x[1], 5.0);
        assert_relative_eq!(y[2], 5.0);
        assert!(!g.cell_geometry_valid(0, 0, 0).unwrap());
    }

    #[test]
    fn test_geometry_validity() {
        let g = grid();
        assert!(g.cell_geometry_valid(0, 0, 0).unwrap());

        let dims = GridDims::new(1, 1, 1);
        let mut coord = Vec::new();
        for j in 0..=1 {
            for i in 0..=1 {
                let (x, y) = (i as f64, j as f64);
                coord.extend_from_slice(&[x, y, 0.0, x, y, 1.0]);
            }
        }
        // Placeholder corner coordinates mark the cell invalid.
        let zcorn = vec![1.0e20; 8];
        let g = CornerPointGrid::from_corner_point(dims, coord, zcorn, None).unwrap();
        assert!(!g.cell_geometry_valid(0, 0, 0).unwrap());
    }
}
