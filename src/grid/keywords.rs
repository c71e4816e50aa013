//! Keyword payload bundle and grammar selection.
//!
//! The deck-parsing front end is an external collaborator: it hands
//! this engine already-parsed, type-checked arrays. [`GridKeywords`]
//! collects the payloads relevant to grid construction, and
//! [`GridSource`] is the closed set of input grammars, selected by
//! inspecting which payloads are present.

use crate::error::GridError;
use crate::grid::pinch::Pinch;
use crate::io::egrid::EgridImport;
use crate::types::UnitSystem;

/// Pre-parsed keyword payloads feeding grid construction.
///
/// Every field is optional; [`GridSource::select`] decides which
/// combination drives construction. Length payloads arrive already
/// converted to SI metres by the deck layer, except `dthetav` which is
/// dimensionless degrees end to end.
#[derive(Clone, Debug, Default)]
pub struct GridKeywords {
    /// COORD pillar array, 6 values per pillar.
    pub coord: Option<Vec<f64>>,
    /// ZCORN corner-depth array, 8 values per cell.
    pub zcorn: Option<Vec<f64>>,
    /// ACTNUM flags; an empty vector is shorthand for all-active.
    pub actnum: Option<Vec<i32>>,
    /// Per-cell x-increments (layer-broadcast shorthand accepted).
    pub dx: Option<Vec<f64>>,
    /// Per-cell y-increments.
    pub dy: Option<Vec<f64>>,
    /// Per-cell z-increments.
    pub dz: Option<Vec<f64>>,
    /// Top depths, one per column (or per cell).
    pub tops: Option<Vec<f64>>,
    /// Per-axis x-increments, `nx` values.
    pub dxv: Option<Vec<f64>>,
    /// Per-axis y-increments, `ny` values.
    pub dyv: Option<Vec<f64>>,
    /// Per-axis z-increments, `nz` values.
    pub dzv: Option<Vec<f64>>,
    /// Per-pillar top depths, `(nx + 1) * (ny + 1)` values.
    pub depthz: Option<Vec<f64>>,
    /// Radial increments, `nx` values.
    pub drv: Option<Vec<f64>>,
    /// Angular increments in degrees, `ny` values.
    pub dthetav: Option<Vec<f64>>,
    /// Inner radius of a radial grid.
    pub inrad: Option<f64>,
    /// Pre-loaded external grid file (GDFILE indirection).
    pub gdfile: Option<EgridImport>,
    /// GRIDUNIT length tag when the grid data uses a different unit
    /// system than the rest of the deck.
    pub gridunit: Option<String>,
    /// MAPAXES values: point on y-axis, origin, point on x-axis.
    pub mapaxes: Option<[f64; 6]>,
    /// MAPUNITS tag accompanying MAPAXES.
    pub mapunits: Option<String>,
    /// PINCH policy record.
    pub pinch: Option<Pinch>,
    /// MINPV scalar threshold.
    pub minpv: Option<f64>,
    /// MINPVV per-cell thresholds.
    pub minpvv: Option<Vec<f64>>,
    /// Numerical-aquifer cells (AQUNUM), zero-based (i, j, k).
    pub aqunum: Vec<(usize, usize, usize)>,
    /// RADIAL keyword: cylindrical grid requested.
    pub radial: bool,
    /// SPIDER keyword: spiderweb grid requested.
    pub spider: bool,
    /// CIRCLE keyword: allow the angular increments to close the circle.
    pub circle: bool,
    /// Unit system of the surrounding deck.
    pub units: UnitSystem,
}

impl GridKeywords {
    fn has_radial_keywords(&self) -> bool {
        self.inrad.is_some()
            && self.drv.is_some()
            && self.dthetav.is_some()
            && self.tops.is_some()
            && (self.dz.is_some() || self.dzv.is_some())
    }

    fn has_corner_point_keywords(&self) -> bool {
        self.coord.is_some() && self.zcorn.is_some()
    }

    fn has_dvdepthz_keywords(&self) -> bool {
        self.dxv.is_some() && self.dyv.is_some() && self.dzv.is_some() && self.depthz.is_some()
    }

    fn has_dtops_keywords(&self) -> bool {
        (self.dx.is_some() || self.dxv.is_some())
            && (self.dy.is_some() || self.dyv.is_some())
            && (self.dz.is_some() || self.dzv.is_some())
            && self.tops.is_some()
    }
}

/// The closed set of grid input grammars.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum GridSource {
    /// RADIAL: DRV/DTHETAV/INRAD with DZ or DZV plus TOPS; retains
    /// radii and angles for sector-volume integration.
    Cylindrical,
    /// SPIDER: same grammar, straight-edged cells, generic volumes.
    Spiderweb,
    /// Explicit COORD + ZCORN arrays.
    CornerPoint,
    /// Per-axis DXV/DYV/DZV increments plus per-pillar DEPTHZ.
    DvDepthz,
    /// Per-cell DX/DY/DZ increments plus TOPS.
    DTops,
    /// External binary grid file referenced by GDFILE.
    GdFile,
}

impl GridSource {
    /// Pick the grammar driving construction.
    ///
    /// Priority: radial/spiderweb request, explicit corner-point,
    /// DXV/DYV/DZV + DEPTHZ, DX/DY/DZ + TOPS, grid-file import.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::NoGridSpecification`] when no recognized
    /// combination is present, including a RADIAL/SPIDER request with
    /// an incomplete radial keyword set.
    pub fn select(keywords: &GridKeywords) -> Result<GridSource, GridError> {
        if keywords.radial || keywords.spider {
            if !keywords.has_radial_keywords() {
                return Err(GridError::NoGridSpecification);
            }
            return Ok(if keywords.radial {
                GridSource::Cylindrical
            } else {
                GridSource::Spiderweb
            });
        }
        if keywords.has_corner_point_keywords() {
            Ok(GridSource::CornerPoint)
        } else if keywords.has_dvdepthz_keywords() {
            Ok(GridSource::DvDepthz)
        } else if keywords.has_dtops_keywords() {
            Ok(GridSource::DTops)
        } else if keywords.gdfile.is_some() {
            Ok(GridSource::GdFile)
        } else {
            Err(GridError::NoGridSpecification)
        }
    }

    /// Human-readable name of the keyword set behind this grammar,
    /// used in construction log lines.
    pub fn describe(&self) -> &'static str {
        match self {
            GridSource::Cylindrical => "DRV, DTHETAV, DZ/DZV and TOPS (cylindrical)",
            GridSource::Spiderweb => "DRV, DTHETAV, DZ/DZV and TOPS (spiderweb)",
            GridSource::CornerPoint => "COORD and ZCORN",
            GridSource::DvDepthz => "DXV, DYV, DZV and DEPTHZ",
            GridSource::DTops => "DX, DY, DZ and TOPS",
            GridSource::GdFile => "GDFILE",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_bundle_has_no_source() {
        let keywords = GridKeywords::default();
        assert_eq!(
            GridSource::select(&keywords),
            Err(GridError::NoGridSpecification)
        );
    }

    #[test]
    fn test_corner_point_selected_before_cartesian() {
        let keywords = GridKeywords {
            coord: Some(vec![]),
            zcorn: Some(vec![]),
            dxv: Some(vec![1.0]),
            dyv: Some(vec![1.0]),
            dzv: Some(vec![1.0]),
            depthz: Some(vec![0.0; 4]),
            ..Default::default()
        };
        assert_eq!(
            GridSource::select(&keywords).unwrap(),
            GridSource::CornerPoint
        );
    }

    #[test]
    fn test_dvdepthz_selected_before_dtops() {
        let keywords = GridKeywords {
            dxv: Some(vec![1.0]),
            dyv: Some(vec![1.0]),
            dzv: Some(vec![1.0]),
            depthz: Some(vec![0.0; 4]),
            tops: Some(vec![0.0]),
            ..Default::default()
        };
        assert_eq!(GridSource::select(&keywords).unwrap(), GridSource::DvDepthz);
    }

    #[test]
    fn test_radial_request_requires_full_set() {
        let keywords = GridKeywords {
            radial: true,
            inrad: Some(1.0),
            drv: Some(vec![1.0]),
            ..Default::default()
        };
        assert_eq!(
            GridSource::select(&keywords),
            Err(GridError::NoGridSpecification)
        );
    }

    #[test]
    fn test_spider_vs_cylindrical() {
        let base = GridKeywords {
            inrad: Some(1.0),
            drv: Some(vec![1.0]),
            dthetav: Some(vec![90.0]),
            dzv: Some(vec![1.0]),
            tops: Some(vec![1.0]),
            ..Default::default()
        };
        let radial = GridKeywords {
            radial: true,
            ..base.clone()
        };
        let spider = GridKeywords {
            spider: true,
            ..base
        };
        assert_eq!(
            GridSource::select(&radial).unwrap(),
            GridSource::Cylindrical
        );
        assert_eq!(GridSource::select(&spider).unwrap(), GridSource::Spiderweb);
    }
}
