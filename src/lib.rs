//! # cpgrid
//!
//! Corner-point reservoir grid geometry: construction from simulator
//! deck keywords, activation bookkeeping, geometric queries and EGRID
//! file I/O.
//!
//! The central type is [`CornerPointGrid`], which owns the COORD pillar
//! store, the ZCORN depth store and the ACTNUM activation state of a
//! structured nx×ny×nz grid. Grids are built from one of five keyword
//! grammars (explicit corner-point, two Cartesian shorthands, two
//! radial forms, or a grid-file import), normalized to the same
//! internal representation, and queried for per-cell geometry. Active
//! cell volumes are cached lazily and filled in parallel when the
//! `parallel` feature (default) is enabled.
//!
//! # Example
//!
//! ```
//! use cpgrid::{CornerPointGrid, GridDims, GridKeywords};
//!
//! let mut keywords = GridKeywords::default();
//! keywords.dx = Some(vec![50.0; 8]);
//! keywords.dy = Some(vec![50.0; 8]);
//! keywords.dz = Some(vec![5.0; 8]);
//! keywords.tops = Some(vec![1000.0; 4]);
//!
//! let grid = CornerPointGrid::from_keywords(GridDims::new(2, 2, 2), &keywords).unwrap();
//! assert_eq!(grid.num_active(), 8);
//! let volume = grid.cell_volume(0, 0, 0).unwrap();
//! assert!((volume - 12_500.0).abs() < 1e-6);
//! ```

pub mod error;
pub mod grid;
pub mod io;
pub mod mapper;
pub mod types;

pub use error::GridError;
pub use grid::{
    ActivationStatistics, CornerPointGrid, GridKeywords, GridSource, MapAxes, MinpvMode, Pinch,
    PinchMode, RadialDetails,
};
pub use io::{EgridError, EgridImport, NncPair};
pub use mapper::{CoordMapper, ZcornMapper};
pub use types::{GridDims, UnitSystem};
