//! Pinch-out and minimum-pore-volume policy records.
//!
//! These records do not alter the geometry; they are carried by the
//! grid so downstream consumers (transmissibility, property mapping)
//! apply a consistent policy for degenerate cells.

/// Per-option behaviour of the PINCH keyword.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum PinchMode {
    /// Apply to all cells.
    #[default]
    All,
    /// Use the top value.
    Top,
    /// Use top and bottom values.
    TopBot,
    /// Generate connections across gaps.
    Gap,
    /// No connections across gaps.
    NoGap,
}

/// The PINCH policy record.
///
/// `threshold` is the pinch-out thickness in SI metres; the record is
/// inactive until a threshold has been supplied.
#[derive(Clone, Debug, PartialEq)]
pub struct Pinch {
    threshold: Option<f64>,
    pinchout_mode: PinchMode,
    multz_mode: PinchMode,
    control_mode: PinchMode,
}

impl Default for Pinch {
    fn default() -> Self {
        Self {
            threshold: None,
            pinchout_mode: PinchMode::TopBot,
            multz_mode: PinchMode::Top,
            control_mode: PinchMode::Gap,
        }
    }
}

impl Pinch {
    /// Record a supplied PINCH keyword.
    pub fn new(
        threshold: f64,
        pinchout_mode: PinchMode,
        multz_mode: PinchMode,
        control_mode: PinchMode,
    ) -> Self {
        Self {
            threshold: Some(threshold),
            pinchout_mode,
            multz_mode,
            control_mode,
        }
    }

    /// Whether a PINCH keyword was supplied.
    #[inline]
    pub fn active(&self) -> bool {
        self.threshold.is_some()
    }

    /// Pinch-out thickness threshold, if supplied.
    #[inline]
    pub fn threshold(&self) -> Option<f64> {
        self.threshold
    }

    /// PINCHOUT_OPTION field.
    #[inline]
    pub fn pinchout_mode(&self) -> PinchMode {
        self.pinchout_mode
    }

    /// MULTZ_OPTION field.
    #[inline]
    pub fn multz_mode(&self) -> PinchMode {
        self.multz_mode
    }

    /// CONTROL_OPTION field.
    #[inline]
    pub fn control_mode(&self) -> PinchMode {
        self.control_mode
    }
}

/// Minimum-pore-volume handling mode.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum MinpvMode {
    /// No minimum-pore-volume filtering.
    #[default]
    Inactive,
    /// Standard Eclipse MINPV/MINPVV behaviour.
    EclStd,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_record_is_inactive() {
        let pinch = Pinch::default();
        assert!(!pinch.active());
        assert_eq!(pinch.pinchout_mode(), PinchMode::TopBot);
        assert_eq!(pinch.multz_mode(), PinchMode::Top);
        assert_eq!(pinch.control_mode(), PinchMode::Gap);
    }

    #[test]
    fn test_supplied_record() {
        let pinch = Pinch::new(0.001, PinchMode::All, PinchMode::Top, PinchMode::NoGap);
        assert!(pinch.active());
        assert_eq!(pinch.threshold(), Some(0.001));
        assert_ne!(pinch, Pinch::default());
    }
}
