//! Length-unit systems for deck payloads and grid files.

use std::fmt;

use crate::error::GridError;

/// Unit system governing the length values of a deck or grid file.
///
/// Internally the grid always stores SI metres; a `UnitSystem` records
/// which external convention the data arrived in (and is written back
/// out in), together with the conversion factors.
///
/// # Example
///
/// ```
/// use cpgrid::types::UnitSystem;
///
/// let field = UnitSystem::Field;
/// assert_eq!(field.length_tag(), "FEET");
/// assert!((field.to_si(1.0) - 0.3048).abs() < 1e-12);
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum UnitSystem {
    /// Lengths in metres.
    #[default]
    Metric,
    /// Lengths in feet.
    Field,
    /// Lengths in centimetres.
    Lab,
}

impl UnitSystem {
    /// SI scaling factor for lengths in this system.
    #[inline]
    pub fn length_to_si(&self) -> f64 {
        match self {
            UnitSystem::Metric => 1.0,
            UnitSystem::Field => 0.3048,
            UnitSystem::Lab => 0.01,
        }
    }

    /// Convert a length value from this system to SI metres.
    #[inline]
    pub fn to_si(&self, value: f64) -> f64 {
        value * self.length_to_si()
    }

    /// Convert a length value from SI metres to this system.
    #[inline]
    pub fn from_si(&self, value: f64) -> f64 {
        value / self.length_to_si()
    }

    /// Convert a length array in place from this system to SI metres.
    pub fn convert_to_si(&self, values: &mut [f64]) {
        let factor = self.length_to_si();
        if factor != 1.0 {
            for v in values.iter_mut() {
                *v *= factor;
            }
        }
    }

    /// The unit tag written to the GRIDUNIT record of a grid file.
    pub fn length_tag(&self) -> &'static str {
        match self {
            UnitSystem::Metric => "METRES",
            UnitSystem::Field => "FEET",
            UnitSystem::Lab => "CM",
        }
    }

    /// Resolve a GRIDUNIT length tag.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::UnknownLengthUnit`] for any tag other than
    /// `METRES`, `FEET` or `CM`.
    pub fn from_length_tag(tag: &str) -> Result<Self, GridError> {
        match tag.trim() {
            "METRES" => Ok(UnitSystem::Metric),
            "FEET" => Ok(UnitSystem::Field),
            "CM" => Ok(UnitSystem::Lab),
            other => Err(GridError::UnknownLengthUnit(other.to_string())),
        }
    }
}

impl fmt::Display for UnitSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UnitSystem::Metric => write!(f, "METRIC"),
            UnitSystem::Field => write!(f, "FIELD"),
            UnitSystem::Lab => write!(f, "LAB"),
        }
    }
}
