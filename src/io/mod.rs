//! Grid-file I/O.
//!
//! [`eclbin`] implements the Fortran-blocked big-endian record codec
//! shared by the binary reservoir file formats; [`egrid`] layers the
//! EGRID record sequence on top of it. All I/O is synchronous and
//! buffered.

pub mod eclbin;
pub mod egrid;

pub use eclbin::EclData;
pub use egrid::{EgridImport, NncPair};

use std::path::PathBuf;

use thiserror::Error;

use crate::error::GridError;

/// Error type for grid-file reading and writing.
#[derive(Debug, Error)]
pub enum EgridError {
    /// Underlying I/O failure.
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    /// Structurally malformed record stream.
    #[error("malformed grid file: {0}")]
    Format(String),

    /// A mandatory record is absent.
    #[error("grid file {path} has no {keyword} record")]
    MissingKeyword { path: PathBuf, keyword: String },

    /// Grid construction from the file content failed.
    #[error(transparent)]
    Grid(#[from] GridError),
}
