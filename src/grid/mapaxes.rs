//! MAPAXES coordinate-transform metadata.
//!
//! MAPAXES defines the map coordinate system by three points: one on
//! the map y-axis, the origin, and one on the map x-axis. The grid
//! stores the normalized axis vectors and can transform grid (x, y)
//! positions to map coordinates and back. Attached once at
//! construction, immutable thereafter.

use crate::error::GridError;

/// Axis-remap record: origin and normalized map axis unit vectors.
#[derive(Clone, Debug)]
pub struct MapAxes {
    input: [f64; 6],
    origin: [f64; 2],
    unit_x: [f64; 2],
    unit_y: [f64; 2],
    mapunits: Option<String>,
}

impl PartialEq for MapAxes {
    fn eq(&self, other: &Self) -> bool {
        self.input == other.input && self.mapunits == other.mapunits
    }
}

impl MapAxes {
    /// Build from the six MAPAXES values
    /// `(x1, y1, x2, y2, x3, y3)`: point on the y-axis, origin, point
    /// on the x-axis.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::InvalidMapAxes`] for a zero-length axis or
    /// parallel axes (singular transform).
    pub fn new(input: [f64; 6], mapunits: Option<String>) -> Result<Self, GridError> {
        let [x1, y1, x2, y2, x3, y3] = input;
        let norm_x = f64::hypot(x3 - x2, y3 - y2);
        let norm_y = f64::hypot(x1 - x2, y1 - y2);
        if norm_x == 0.0 || norm_y == 0.0 {
            return Err(GridError::InvalidMapAxes(
                "axis point coincides with origin".to_string(),
            ));
        }
        let unit_x = [(x3 - x2) / norm_x, (y3 - y2) / norm_x];
        let unit_y = [(x1 - x2) / norm_y, (y1 - y2) / norm_y];

        let det = unit_x[0] * unit_y[1] - unit_x[1] * unit_y[0];
        if det.abs() < 1e-12 {
            return Err(GridError::InvalidMapAxes("axes are parallel".to_string()));
        }

        Ok(Self {
            input,
            origin: [x2, y2],
            unit_x,
            unit_y,
            mapunits,
        })
    }

    /// Build from the reduced-precision values of a grid-file MAPAXES
    /// record.
    pub fn from_f32(input: [f32; 6], mapunits: Option<String>) -> Result<Self, GridError> {
        Self::new(input.map(f64::from), mapunits)
    }

    /// The six defining values, as written to the MAPAXES record.
    #[inline]
    pub fn input(&self) -> [f64; 6] {
        self.input
    }

    /// MAPUNITS tag, if present.
    #[inline]
    pub fn mapunits(&self) -> Option<&str> {
        self.mapunits.as_deref()
    }

    /// Transform a grid position to map coordinates, in place.
    pub fn transform(&self, x: &mut f64, y: &mut f64) {
        let gx = *x;
        let gy = *y;
        *x = self.origin[0] + gx * self.unit_x[0] + gy * self.unit_y[0];
        *y = self.origin[1] + gx * self.unit_x[1] + gy * self.unit_y[1];
    }

    /// Inverse of [`transform`](Self::transform), in place.
    pub fn inv_transform(&self, x: &mut f64, y: &mut f64) {
        let px = *x - self.origin[0];
        let py = *y - self.origin[1];
        let det = self.unit_x[0] * self.unit_y[1] - self.unit_x[1] * self.unit_y[0];
        *x = (px * self.unit_y[1] - py * self.unit_y[0]) / det;
        *y = (py * self.unit_x[0] - px * self.unit_x[1]) / det;
    }
}
