//! The corner-point grid object and its sub-engines.
//!
//! [`CornerPointGrid`] exclusively owns the COORD/ZCORN coordinate
//! store, the ACTNUM flags with their derived global↔active index
//! tables, and the lazily filled active-volume cache. Construction goes
//! through one of the builder strategies in [`builder`]; once built and
//! published, the grid is read-only and safe for unsynchronized
//! concurrent queries.
//!
//! # Example
//!
//! ```
//! use cpgrid::{CornerPointGrid, GridDims};
//!
//! let grid = CornerPointGrid::regular(GridDims::new(4, 3, 2), 100.0, 100.0, 10.0);
//! assert!(grid.all_active());
//! assert_eq!(grid.num_active(), 24);
//! let volume = grid.cell_volume(0, 0, 0).unwrap();
//! assert!((volume - 100_000.0).abs() < 1e-6);
//! ```

mod active;
mod builder;
mod keywords;
mod mapaxes;
mod pinch;
mod queries;
pub mod volume;

pub use active::ActivationStatistics;
pub use keywords::{GridKeywords, GridSource};
pub use mapaxes::MapAxes;
pub use pinch::{MinpvMode, Pinch, PinchMode};

use std::sync::OnceLock;

use crate::types::{GridDims, UnitSystem};

/// Radii and angular extents retained by cylindrical grids.
///
/// Cylindrical cell volumes use the analytic sector formula instead of
/// the generic hexahedral decomposition, which needs the radius of each
/// pillar ring and the angular extent of each cell row.
#[derive(Clone, Debug, PartialEq)]
pub struct RadialDetails {
    /// Pillar-ring radii, `nx + 1` values in SI metres.
    pub rv: Vec<f64>,
    /// Angular extent of each cell row, `ny` values in degrees.
    pub thetav: Vec<f64>,
}

/// A 3D reservoir grid in corner-point representation.
///
/// Internally all lengths are SI metres; [`UnitSystem`] records the
/// external convention the grid is written back out in.
#[derive(Debug)]
pub struct CornerPointGrid {
    dims: GridDims,
    coord: Vec<f64>,
    zcorn: Vec<f64>,
    actnum: Vec<i32>,
    global_to_active: Vec<i32>,
    active_to_global: Vec<usize>,
    /// Global ids of numerical-aquifer cells, sorted; forced active on
    /// every ACTNUM reset.
    aquifer_cells: Vec<usize>,
    mapaxes: Option<MapAxes>,
    units: UnitSystem,
    pinch: Pinch,
    minpv_mode: MinpvMode,
    minpv: Vec<f64>,
    circle: bool,
    radial: Option<RadialDetails>,
    zcorn_repairs: usize,
    active_volume: OnceLock<Vec<f64>>,
}

impl Clone for CornerPointGrid {
    fn clone(&self) -> Self {
        let active_volume = OnceLock::new();
        if let Some(cache) = self.active_volume.get() {
            let _ = active_volume.set(cache.clone());
        }
        Self {
            dims: self.dims,
            coord: self.coord.clone(),
            zcorn: self.zcorn.clone(),
            actnum: self.actnum.clone(),
            global_to_active: self.global_to_active.clone(),
            active_to_global: self.active_to_global.clone(),
            aquifer_cells: self.aquifer_cells.clone(),
            mapaxes: self.mapaxes.clone(),
            units: self.units,
            pinch: self.pinch.clone(),
            minpv_mode: self.minpv_mode,
            minpv: self.minpv.clone(),
            circle: self.circle,
            radial: self.radial.clone(),
            zcorn_repairs: self.zcorn_repairs,
            active_volume,
        }
    }
}

impl CornerPointGrid {
    /// A grid with empty stores; builders populate it before returning.
    pub(crate) fn empty(dims: GridDims, units: UnitSystem) -> Self {
        Self {
            dims,
            coord: Vec::new(),
            zcorn: Vec::new(),
            actnum: Vec::new(),
            global_to_active: Vec::new(),
            active_to_global: Vec::new(),
            aquifer_cells: Vec::new(),
            mapaxes: None,
            units,
            pinch: Pinch::default(),
            minpv_mode: MinpvMode::Inactive,
            minpv: vec![0.0; dims.cell_count()],
            circle: false,
            radial: None,
            zcorn_repairs: 0,
            active_volume: OnceLock::new(),
        }
    }

    /// Logical Cartesian extents.
    #[inline]
    pub fn dims(&self) -> GridDims {
        self.dims
    }

    /// Read-only view of the COORD array (SI metres).
    #[inline]
    pub fn coord(&self) -> &[f64] {
        &self.coord
    }

    /// Read-only view of the ZCORN array (SI metres).
    #[inline]
    pub fn zcorn(&self) -> &[f64] {
        &self.zcorn
    }

    /// Read-only view of the ACTNUM flags, one per logical cell.
    #[inline]
    pub fn actnum(&self) -> &[i32] {
        &self.actnum
    }

    /// Optional axis-remap metadata.
    #[inline]
    pub fn mapaxes(&self) -> Option<&MapAxes> {
        self.mapaxes.as_ref()
    }

    /// Unit system the grid is written back out in.
    #[inline]
    pub fn units(&self) -> UnitSystem {
        self.units
    }

    /// Pinch-out policy record.
    #[inline]
    pub fn pinch(&self) -> &Pinch {
        &self.pinch
    }

    /// Minimum-pore-volume mode.
    #[inline]
    pub fn minpv_mode(&self) -> MinpvMode {
        self.minpv_mode
    }

    /// Per-cell minimum pore volumes; all zero unless MINPV/MINPVV was
    /// supplied.
    #[inline]
    pub fn minpv(&self) -> &[f64] {
        &self.minpv
    }

    /// Whether a radial grid closes the full circle.
    #[inline]
    pub fn circle(&self) -> bool {
        self.circle
    }

    /// Radius/angle bookkeeping of a cylindrical grid, if any.
    #[inline]
    pub fn radial(&self) -> Option<&RadialDetails> {
        self.radial.as_ref()
    }

    /// Number of ZCORN values clamped by the monotonicity repair during
    /// construction. Diagnostic only.
    #[inline]
    pub fn zcorn_repairs(&self) -> usize {
        self.zcorn_repairs
    }

    /// Whether `global_index` is registered as a numerical-aquifer cell.
    #[inline]
    pub(crate) fn is_aquifer_cell(&self, global_index: usize) -> bool {
        self.aquifer_cells.binary_search(&global_index).is_ok()
    }

    /// Structural equality with another grid: extents, transform
    /// metadata, raw arrays and the pinch/minpv policy records. The
    /// minpv vector only participates when a minpv mode is active.
    pub fn equal(&self, other: &CornerPointGrid) -> bool {
        if self.coord.len() != other.coord.len() || self.zcorn.len() != other.zcorn.len() {
            return false;
        }
        if self.mapaxes != other.mapaxes {
            return false;
        }
        if self.actnum != other.actnum || self.coord != other.coord || self.zcorn != other.zcorn {
            return false;
        }
        let mut status = self.pinch == other.pinch && self.minpv_mode == other.minpv_mode;
        if self.minpv_mode != MinpvMode::Inactive {
            status = status && self.minpv == other.minpv;
        }
        status
    }
}
