//! Strongly-typed domain types for safer APIs.
//!
//! This module provides the validated dimension triple and the
//! length-unit systems shared across the crate.
//!
//! # Design Philosophy
//!
//! - **Validated construction**: `GridDims::new` rejects zero extents
//! - **Derived sizes in one place**: COORD/ZCORN lengths come from
//!   `GridDims`, never from ad-hoc arithmetic at call sites
//! - **SI internally**: all stored lengths are metres; `UnitSystem`
//!   handles the boundary conversions
//!
//! # Example
//!
//! ```
//! use cpgrid::types::{GridDims, UnitSystem};
//!
//! let dims = GridDims::new(20, 20, 10);
//! assert_eq!(dims.zcorn_len(), 8 * 4000);
//!
//! let units = UnitSystem::Field;
//! assert_eq!(units.length_tag(), "FEET");
//! ```

mod dims;
mod units;

pub use dims::GridDims;
pub use units::UnitSystem;
