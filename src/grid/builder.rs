//! Builder strategies: the five input grammars.
//!
//! Every grammar converges on the same normalized (COORD, ZCORN) pair,
//! followed by exactly one monotonicity repair and one ACTNUM reset.
//! The synthesis helpers are pure functions over (dims, payloads) so
//! each accumulation formula can be tested on its own.

use log::{info, warn};

use crate::error::GridError;
use crate::grid::{CornerPointGrid, GridKeywords, GridSource, MapAxes, MinpvMode, RadialDetails};
use crate::mapper::{CoordMapper, ZcornMapper};
use crate::types::{GridDims, UnitSystem};

/// Snapping tolerance for vertically adjacent depths synthesized from
/// per-cell increments. Downstream consumers detect cell contact by
/// exact depth comparison, so accumulated values within this tolerance
/// are forced bitwise equal.
const Z_TOLERANCE: f64 = 1e-6;

/// Tolerance on the cumulative DTHETAV angle when deciding whether a
/// radial grid closes the full circle.
const CIRCLE_TOLERANCE: f64 = 0.01;

impl CornerPointGrid {
    /// Build a grid from a keyword payload bundle.
    ///
    /// Grammar selection follows [`GridSource::select`]. For a GDFILE
    /// import the file's GRIDHEAD dimensions take precedence over
    /// `dims`, matching the behaviour of the deck indirection; an
    /// explicit ACTNUM payload always wins over the file's record.
    ///
    /// # Errors
    ///
    /// Structural size mismatches, grammar-selection failure, excessive
    /// radial rotation, unknown GRIDUNIT tags and invalid MAPAXES
    /// definitions are all fatal.
    pub fn from_keywords(dims: GridDims, keywords: &GridKeywords) -> Result<Self, GridError> {
        let source = GridSource::select(keywords)?;
        let dims = match &keywords.gdfile {
            Some(import) if source == GridSource::GdFile => import.dims,
            _ => dims,
        };

        let mut grid = Self::empty(dims, keywords.units);
        grid.register_aquifer_cells(&keywords.aqunum)?;

        info!("creating {} grid from keywords {}", dims, source.describe());

        match source {
            GridSource::CornerPoint => {
                let coord = keywords.coord.as_ref().cloned().unwrap_or_default();
                let zcorn = keywords.zcorn.as_ref().cloned().unwrap_or_default();
                grid.set_corner_point_arrays(coord, zcorn)?;
            }
            GridSource::DTops => grid.build_dtops(keywords)?,
            GridSource::DvDepthz => grid.build_dvdepthz(keywords)?,
            GridSource::Cylindrical => grid.build_radial(keywords, true)?,
            GridSource::Spiderweb => grid.build_radial(keywords, false)?,
            GridSource::GdFile => {
                let import = keywords.gdfile.as_ref().ok_or(GridError::NoGridSpecification)?;
                grid.set_corner_point_arrays(import.coord.clone(), import.zcorn.clone())?;
            }
        }

        grid.finish_geometry();

        let explicit_actnum = keywords.actnum.as_deref().filter(|a| !a.is_empty());
        let file_actnum = match &keywords.gdfile {
            Some(import) if source == GridSource::GdFile => import.actnum.as_deref(),
            _ => None,
        };
        match explicit_actnum.or(file_actnum) {
            Some(flags) => grid.reset_actnum(flags)?,
            None => grid.reset_actnum_all(),
        }

        if let Some(values) = keywords.mapaxes {
            grid.mapaxes = Some(MapAxes::new(values, keywords.mapunits.clone())?);
        } else if let Some(import) = &keywords.gdfile {
            if source == GridSource::GdFile {
                grid.mapaxes = import.mapaxes.clone();
            }
        }

        if let Some(pinch) = &keywords.pinch {
            grid.pinch = pinch.clone();
        }
        if let Some(threshold) = keywords.minpv {
            grid.minpv.fill(threshold);
            grid.minpv_mode = MinpvMode::EclStd;
        } else if let Some(minpvv) = &keywords.minpvv {
            if minpvv.len() != dims.cell_count() {
                return Err(GridError::KeywordSize {
                    keyword: "MINPVV".to_string(),
                    expected: dims.cell_count(),
                    actual: minpvv.len(),
                });
            }
            grid.minpv = minpvv.clone();
            grid.minpv_mode = MinpvMode::EclStd;
        }

        if let Some(tag) = &keywords.gridunit {
            let grid_units = UnitSystem::from_length_tag(tag)?;
            if grid_units != keywords.units {
                grid.apply_gridunit(grid_units, keywords.units);
            }
        }

        Ok(grid)
    }

    /// Build directly from explicit corner-point arrays in SI metres.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::KeywordSize`] when an array length
    /// disagrees with the extents.
    pub fn from_corner_point(
        dims: GridDims,
        coord: Vec<f64>,
        zcorn: Vec<f64>,
        actnum: Option<&[i32]>,
    ) -> Result<Self, GridError> {
        let mut grid = Self::empty(dims, UnitSystem::default());
        grid.set_corner_point_arrays(coord, zcorn)?;
        grid.finish_geometry();
        match actnum {
            Some(flags) => grid.reset_actnum(flags)?,
            None => grid.reset_actnum_all(),
        }
        Ok(grid)
    }

    /// A regular Cartesian grid with uniform cell sizes, anchored at
    /// the origin. Convenience constructor for tests and synthetic
    /// grids.
    pub fn regular(dims: GridDims, dx: f64, dy: f64, dz: f64) -> Self {
        let (nx, ny, nz) = dims.as_tuple();
        let mut grid = Self::empty(dims, UnitSystem::default());

        let mut coord = Vec::with_capacity(dims.coord_len());
        for j in 0..=ny {
            for i in 0..=nx {
                let x = i as f64 * dx;
                let y = j as f64 * dy;
                coord.extend_from_slice(&[x, y, 0.0, x, y, nz as f64 * dz]);
            }
        }

        let mapper = ZcornMapper::new(dims);
        let mut zcorn = vec![0.0; dims.zcorn_len()];
        for k in 0..nz {
            let zt = k as f64 * dz;
            let zb = (k + 1) as f64 * dz;
            for j in 0..ny {
                for i in 0..nx {
                    for c in 0..4 {
                        zcorn[mapper.index_unchecked(i, j, k, c)] = zt;
                        zcorn[mapper.index_unchecked(i, j, k, c + 4)] = zb;
                    }
                }
            }
        }

        grid.coord = coord;
        grid.zcorn = zcorn;
        grid.finish_geometry();
        grid.reset_actnum_all();
        grid
    }

    /// Register AQUNUM cells before the first ACTNUM reset.
    fn register_aquifer_cells(
        &mut self,
        cells: &[(usize, usize, usize)],
    ) -> Result<(), GridError> {
        for &(i, j, k) in cells {
            let global = self.dims().global_index(i, j, k)?;
            self.aquifer_cells.push(global);
        }
        self.aquifer_cells.sort_unstable();
        self.aquifer_cells.dedup();
        Ok(())
    }

    /// Validate and install explicit COORD/ZCORN arrays.
    fn set_corner_point_arrays(
        &mut self,
        coord: Vec<f64>,
        zcorn: Vec<f64>,
    ) -> Result<(), GridError> {
        let dims = self.dims();
        if zcorn.len() != dims.zcorn_len() {
            return Err(GridError::KeywordSize {
                keyword: "ZCORN".to_string(),
                expected: dims.zcorn_len(),
                actual: zcorn.len(),
            });
        }
        if coord.len() != dims.coord_len() {
            return Err(GridError::KeywordSize {
                keyword: "COORD".to_string(),
                expected: dims.coord_len(),
                actual: coord.len(),
            });
        }
        self.coord = coord;
        self.zcorn = zcorn;
        Ok(())
    }

    /// DX/DY/DZ + TOPS grammar.
    fn build_dtops(&mut self, keywords: &GridKeywords) -> Result<(), GridError> {
        let dims = self.dims();
        let dx = create_d_vector(dims, 0, "DX", keywords.dx.as_deref(), keywords.dxv.as_deref())?;
        let dy = create_d_vector(dims, 1, "DY", keywords.dy.as_deref(), keywords.dyv.as_deref())?;
        let dz = create_d_vector(dims, 2, "DZ", keywords.dz.as_deref(), keywords.dzv.as_deref())?;
        let tops = keywords.tops.as_deref().ok_or(GridError::NoGridSpecification)?;
        let tops = create_tops_vector(dims, &dz, tops)?;

        self.coord = make_coord_dx_dy_dz_tops(dims, &dx, &dy, &dz, &tops);
        self.zcorn = make_zcorn_dz_tops(dims, &dz, &tops);
        Ok(())
    }

    /// DXV/DYV/DZV + DEPTHZ grammar.
    fn build_dvdepthz(&mut self, keywords: &GridKeywords) -> Result<(), GridError> {
        let dims = self.dims();
        let (nx, ny, nz) = dims.as_tuple();
        let dxv = keywords.dxv.as_deref().ok_or(GridError::NoGridSpecification)?;
        let dyv = keywords.dyv.as_deref().ok_or(GridError::NoGridSpecification)?;
        let dzv = keywords.dzv.as_deref().ok_or(GridError::NoGridSpecification)?;
        let depthz = keywords.depthz.as_deref().ok_or(GridError::NoGridSpecification)?;

        assert_len(dxv, nx, "DXV")?;
        assert_len(dyv, ny, "DYV")?;
        assert_len(dzv, nz, "DZV")?;
        assert_len(depthz, (nx + 1) * (ny + 1), "DEPTHZ")?;

        self.coord = make_coord_dxv_dyv_dzv_depthz(dims, dxv, dyv, dzv, depthz);
        self.zcorn = make_zcorn_dzv_depthz(dims, dzv, depthz);
        Ok(())
    }

    /// DRV/DTHETAV + INRAD + DZ(V)/TOPS grammar, shared by the
    /// cylindrical and spiderweb variants.
    fn build_radial(&mut self, keywords: &GridKeywords, cylindrical: bool) -> Result<(), GridError> {
        let dims = self.dims();
        let (nx, ny, nz) = dims.as_tuple();
        let area = dims.layer_cell_count();
        let volume = dims.cell_count();

        let drv = keywords.drv.as_deref().ok_or(GridError::NoGridSpecification)?;
        let dthetav = keywords.dthetav.as_deref().ok_or(GridError::NoGridSpecification)?;
        let tops = keywords.tops.as_deref().ok_or(GridError::NoGridSpecification)?;
        let inrad = keywords.inrad.ok_or(GridError::NoGridSpecification)?;

        assert_len(drv, nx, "DRV")?;
        assert_len(dthetav, ny, "DTHETAV")?;
        assert_len(tops, area, "TOPS")?;

        let mut dz = vec![0.0; volume];
        if let Some(dz_cells) = &keywords.dz {
            assert_len(dz_cells, volume, "DZ")?;
            dz.copy_from_slice(dz_cells);
        } else {
            let dzv = keywords.dzv.as_deref().ok_or(GridError::NoGridSpecification)?;
            assert_len(dzv, nz, "DZV")?;
            for (k, &value) in dzv.iter().enumerate() {
                dz[k * area..(k + 1) * area].fill(value);
            }
        }

        let total_angle: f64 = dthetav.iter().sum();
        if (total_angle - 360.0).abs() < CIRCLE_TOLERANCE {
            self.circle = keywords.circle;
        } else if total_angle > 360.0 {
            return Err(GridError::ExcessiveRotation(total_angle));
        }

        let zm = ZcornMapper::new(dims);
        let cm = CoordMapper::new(dims);
        let mut zcorn = vec![0.0; zm.size()];
        let mut coord = vec![0.0; cm.size()];

        // Depth columns accumulate DZ from TOPS, layer by layer; top
        // and bottom faces are flat within a cell.
        let mut depth = tops.to_vec();
        for k in 0..nz {
            for j in 0..ny {
                for i in 0..nx {
                    let current_depth = depth[j * nx + i];
                    let next_depth = current_depth + dz[k * area + j * nx + i];
                    for c in 0..4 {
                        zcorn[zm.index_unchecked(i, j, k, c)] = current_depth;
                        zcorn[zm.index_unchecked(i, j, k, c + 4)] = next_depth;
                    }
                    depth[j * nx + i] = next_depth;
                }
            }
        }

        let mut ri = vec![0.0; nx + 1];
        ri[0] = inrad;
        for i in 1..=nx {
            ri[i] = ri[i - 1] + drv[i - 1];
        }
        let mut tj = vec![0.0; ny + 1];
        for j in 1..=ny {
            tj[j] = tj[j - 1] + dthetav[j - 1];
        }

        let z1 = zcorn.iter().cloned().fold(f64::INFINITY, f64::min);
        let z2 = zcorn.iter().cloned().fold(f64::NEG_INFINITY, f64::max);

        for j in 0..=ny {
            // Angles go counterclockwise, starting at twelve o'clock.
            let t = std::f64::consts::PI * (90.0 - tj[j]) / 180.0;
            let (sin_t, cos_t) = t.sin_cos();
            for i in 0..=nx {
                let x = ri[i] * cos_t;
                let y = ri[i] * sin_t;

                coord[cm.index_unchecked(i, j, 0, 0)] = x;
                coord[cm.index_unchecked(i, j, 1, 0)] = y;
                coord[cm.index_unchecked(i, j, 2, 0)] = z1;

                coord[cm.index_unchecked(i, j, 0, 1)] = x;
                coord[cm.index_unchecked(i, j, 1, 1)] = y;
                coord[cm.index_unchecked(i, j, 2, 1)] = z2;
            }
        }

        if cylindrical {
            self.radial = Some(RadialDetails {
                rv: ri,
                thetav: dthetav.to_vec(),
            });
        }

        self.coord = coord;
        self.zcorn = zcorn;
        Ok(())
    }

    /// Repair the freshly built ZCORN array; every builder calls this
    /// exactly once.
    fn finish_geometry(&mut self) {
        let mapper = ZcornMapper::new(self.dims());
        self.zcorn_repairs = mapper.fixup_zcorn(&mut self.zcorn);
        if self.zcorn_repairs > 0 {
            warn!(
                "repaired {} non-monotonic ZCORN values during construction",
                self.zcorn_repairs
            );
        }
    }

    /// Rescale lengths when GRIDUNIT declares the grid data in a
    /// different unit system than the rest of the deck. Values were
    /// converted to SI assuming deck units, so the correction is the
    /// ratio of SI factors.
    fn apply_gridunit(&mut self, grid_units: UnitSystem, deck_units: UnitSystem) {
        let factor = grid_units.length_to_si() / deck_units.length_to_si();
        for v in self.coord.iter_mut() {
            *v *= factor;
        }
        for v in self.zcorn.iter_mut() {
            *v *= factor;
        }
        if let Some(radial) = &mut self.radial {
            for v in radial.rv.iter_mut() {
                *v *= factor;
            }
        }
    }
}

fn assert_len(values: &[f64], expected: usize, keyword: &str) -> Result<(), GridError> {
    if values.len() != expected {
        return Err(GridError::KeywordSize {
            keyword: keyword.to_string(),
            expected,
            actual: values.len(),
        });
    }
    Ok(())
}

/// Expand a per-cell increment payload for one axis.
///
/// Accepts the full per-cell array, the layer-broadcast shorthand
/// (at least one layer but fewer than all cells: values repeat from
/// the layer above), or the per-axis vector scattered across the grid.
fn create_d_vector(
    dims: GridDims,
    axis: usize,
    keyword: &str,
    per_cell: Option<&[f64]>,
    per_axis: Option<&[f64]>,
) -> Result<Vec<f64>, GridError> {
    let (nx, ny, _) = dims.as_tuple();
    let area = dims.layer_cell_count();
    let volume = dims.cell_count();

    if let Some(values) = per_cell {
        let mut d = values.to_vec();
        if d.len() >= area && d.len() < volume {
            let initial = d.len();
            d.resize(volume, 0.0);
            for target in initial..volume {
                d[target] = d[target - area];
            }
        }
        if d.len() != volume {
            return Err(GridError::KeywordSize {
                keyword: keyword.to_string(),
                expected: volume,
                actual: values.len(),
            });
        }
        Ok(d)
    } else {
        let dv = per_axis.ok_or(GridError::NoGridSpecification)?;
        let extent = [dims.nx(), dims.ny(), dims.nz()][axis];
        if dv.len() != extent {
            return Err(GridError::KeywordSize {
                keyword: format!("{keyword}V"),
                expected: extent,
                actual: dv.len(),
            });
        }
        let mut d = vec![0.0; volume];
        for k in 0..dims.nz() {
            for j in 0..ny {
                for i in 0..nx {
                    let index = [i, j, k][axis];
                    d[i + j * nx + k * area] = dv[index];
                }
            }
        }
        Ok(d)
    }
}

/// Expand TOPS to one value per cell, accumulating DZ downward.
///
/// Where the payload already provides deeper layers, values within
/// [`Z_TOLERANCE`] of the accumulated depth are snapped to it so that
/// vertically adjacent cells share bitwise-equal depths.
fn create_tops_vector(
    dims: GridDims,
    dz: &[f64],
    tops_in: &[f64],
) -> Result<Vec<f64>, GridError> {
    let area = dims.layer_cell_count();
    let volume = dims.cell_count();

    let mut tops = tops_in.to_vec();
    if tops.len() >= area {
        let initial = tops.len();
        tops.resize(volume, 0.0);

        for target in area..volume {
            let source = target - area;
            let next_value = tops[source] + dz[source];
            if target >= initial {
                tops[target] = next_value;
            } else if (next_value - tops[target]).abs() < Z_TOLERANCE {
                tops[target] = next_value;
            }
        }
    }

    if tops.len() != volume {
        return Err(GridError::KeywordSize {
            keyword: "TOPS".to_string(),
            expected: volume,
            actual: tops_in.len(),
        });
    }
    Ok(tops)
}

fn sum_idir_at_k(nx: usize, ny: usize, k: usize, dx: &[f64]) -> Vec<f64> {
    let mut s = vec![0.0; nx * ny];
    for j in 0..ny {
        let mut sum = 0.0;
        for i in 0..nx {
            sum += dx[i + j * nx + k * nx * ny];
            s[i + j * nx] = sum;
        }
    }
    s
}

fn sum_jdir_at_k(nx: usize, ny: usize, k: usize, dy: &[f64]) -> Vec<f64> {
    let mut s = vec![0.0; nx * ny];
    for i in 0..nx {
        let mut sum = 0.0;
        for j in 0..ny {
            sum += dy[i + j * nx + k * nx * ny];
            s[i + j * nx] = sum;
        }
    }
    s
}

fn sum_kdir(nx: usize, ny: usize, nz: usize, dz: &[f64]) -> Vec<f64> {
    let mut s = vec![0.0; nx * ny];
    for j in 0..ny {
        for i in 0..nx {
            let mut sum = 0.0;
            for k in 0..nz {
                sum += dz[i + j * nx + k * nx * ny];
            }
            s[i + j * nx] = sum;
        }
    }
    s
}

/// Synthesize COORD from per-cell DX/DY/DZ and TOPS.
///
/// Pillars accumulate row/column sums of the increments; interior
/// pillars borrow the increment of the cell up-and-right of them, edge
/// pillars reuse the last cell's values.
fn make_coord_dx_dy_dz_tops(
    dims: GridDims,
    dx: &[f64],
    dy: &[f64],
    dz: &[f64],
    tops: &[f64],
) -> Vec<f64> {
    let (nx, ny, nz) = dims.as_tuple();
    let mut coord = Vec::with_capacity(dims.coord_len());

    let sum_idir_top = sum_idir_at_k(nx, ny, 0, dx);
    let sum_idir_bot = sum_idir_at_k(nx, ny, nz - 1, dx);
    let sum_jdir_top = sum_jdir_at_k(nx, ny, 0, dy);
    let sum_jdir_bot = sum_jdir_at_k(nx, ny, nz - 1, dy);
    let sum_k = sum_kdir(nx, ny, nz, dz);

    for j in 0..ny {
        let y0 = 0.0;
        let mut zt = tops[0];
        let mut zb = zt + sum_k[0];

        if j == 0 {
            let mut x0 = 0.0;
            coord.extend_from_slice(&[x0, y0, zt, x0, y0, zb]);

            for i in 0..nx {
                let mut ind = i + j * nx + 1;
                if i == nx - 1 {
                    ind -= 1;
                }
                zt = tops[ind];
                zb = zt + sum_k[i + j * nx];

                let xt = x0 + dx[i + j * nx];
                let xb = sum_idir_bot[i + j * nx];
                coord.extend_from_slice(&[xt, y0, zt, xb, y0, zb]);
                x0 = xt;
            }
        }

        let mut ind = (j + 1) * nx;
        if j == ny - 1 {
            ind = j * nx;
        }

        let x0 = 0.0;
        let mut yt = sum_jdir_top[j * nx];
        let mut yb = sum_jdir_bot[j * nx];
        zt = tops[ind];
        zb = zt + sum_k[j * nx];
        coord.extend_from_slice(&[x0, yt, zt, x0, yb, zb]);

        for i in 0..nx {
            let mut ind = if j == ny - 1 {
                i + j * nx + 1
            } else {
                i + (j + 1) * nx + 1
            };
            if i == nx - 1 {
                ind -= 1;
            }
            zt = tops[ind];
            zb = zt + sum_k[i + j * nx];

            let (xt, xb) = if j == ny - 1 {
                (sum_idir_top[i + j * nx], sum_idir_bot[i + j * nx])
            } else {
                (sum_idir_top[i + (j + 1) * nx], sum_idir_bot[i + (j + 1) * nx])
            };
            if i == nx - 1 {
                yt = sum_jdir_top[i + j * nx];
                yb = sum_jdir_bot[i + j * nx];
            } else {
                yt = sum_jdir_top[i + 1 + j * nx];
                yb = sum_jdir_bot[i + 1 + j * nx];
            }
            coord.extend_from_slice(&[xt, yt, zt, xb, yb, zb]);
        }
    }

    coord
}

/// Synthesize ZCORN from per-cell DZ and expanded TOPS: each column
/// accumulates depth from its top value, faces flat within a cell.
fn make_zcorn_dz_tops(dims: GridDims, dz: &[f64], tops: &[f64]) -> Vec<f64> {
    let (nx, ny, nz) = dims.as_tuple();
    let mapper = ZcornMapper::new(dims);
    let mut zcorn = vec![0.0; dims.zcorn_len()];

    for j in 0..ny {
        for i in 0..nx {
            let mut z = tops[i + j * nx];
            for k in 0..nz {
                for c in 0..4 {
                    zcorn[mapper.index_unchecked(i, j, k, c)] = z;
                }
                z += dz[i + j * nx + k * nx * ny];
                for c in 4..8 {
                    zcorn[mapper.index_unchecked(i, j, k, c)] = z;
                }
            }
        }
    }

    zcorn
}

/// Synthesize COORD from per-axis increments and per-pillar DEPTHZ.
fn make_coord_dxv_dyv_dzv_depthz(
    dims: GridDims,
    dxv: &[f64],
    dyv: &[f64],
    dzv: &[f64],
    depthz: &[f64],
) -> Vec<f64> {
    let (nx, ny, _) = dims.as_tuple();
    let mut coord = Vec::with_capacity(dims.coord_len());

    let x = partial_sums(dxv);
    let y = partial_sums(dyv);
    let total_dz: f64 = dzv.iter().sum();

    for j in 0..=ny {
        for i in 0..=nx {
            let ind = i + j * (nx + 1);
            let zt = depthz[ind];
            let zb = zt + total_dz;
            coord.extend_from_slice(&[x[i], y[j], zt, x[i], y[j], zb]);
        }
    }

    coord
}

/// Synthesize ZCORN from per-axis DZV and per-pillar DEPTHZ; no
/// snapping needed since depths are defined directly per pillar.
fn make_zcorn_dzv_depthz(dims: GridDims, dzv: &[f64], depthz: &[f64]) -> Vec<f64> {
    let (nx, ny, nz) = dims.as_tuple();
    let mapper = ZcornMapper::new(dims);
    let mut zcorn = vec![0.0; dims.zcorn_len()];

    let z = partial_sums(dzv);

    for k in 0..nz {
        for j in 0..ny {
            for i in 0..nx {
                let z0 = z[k];
                let pillar = |pi: usize, pj: usize| depthz[pi + pj * (nx + 1)];

                zcorn[mapper.index_unchecked(i, j, k, 0)] = pillar(i, j) + z0;
                zcorn[mapper.index_unchecked(i, j, k, 1)] = pillar(i + 1, j) + z0;
                zcorn[mapper.index_unchecked(i, j, k, 2)] = pillar(i, j + 1) + z0;
                zcorn[mapper.index_unchecked(i, j, k, 3)] = pillar(i + 1, j + 1) + z0;

                let z1 = z0 + dzv[k];
                zcorn[mapper.index_unchecked(i, j, k, 4)] = pillar(i, j) + z1;
                zcorn[mapper.index_unchecked(i, j, k, 5)] = pillar(i + 1, j) + z1;
                zcorn[mapper.index_unchecked(i, j, k, 6)] = pillar(i, j + 1) + z1;
                zcorn[mapper.index_unchecked(i, j, k, 7)] = pillar(i + 1, j + 1) + z1;
            }
        }
    }

    zcorn
}

fn partial_sums(increments: &[f64]) -> Vec<f64> {
    let mut sums = Vec::with_capacity(increments.len() + 1);
    sums.push(0.0);
    let mut acc = 0.0;
    for &v in increments {
        acc += v;
        sums.push(acc);
    }
    sums
}
