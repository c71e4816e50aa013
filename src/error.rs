//! Error types for grid construction and queries.

use thiserror::Error;

/// Error type for grid construction, indexing and geometric queries.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GridError {
    /// A keyword payload has the wrong number of elements.
    #[error("wrong size for keyword {keyword}: expected {expected} elements, got {actual}")]
    KeywordSize {
        keyword: String,
        expected: usize,
        actual: usize,
    },

    /// None of the recognized keyword combinations is present.
    #[error("no supported grid specification found: need corner-point, cartesian, radial or grid-file keywords")]
    NoGridSpecification,

    /// An (i, j, k) cell index outside the logical grid extents.
    #[error("cell index ({i}, {j}, {k}) outside grid extents {nx}x{ny}x{nz}")]
    CellIndexOutOfBounds {
        i: usize,
        j: usize,
        k: usize,
        nx: usize,
        ny: usize,
        nz: usize,
    },

    /// A linear global cell index outside [0, nx*ny*nz).
    #[error("global index {index} outside grid of {volume} cells")]
    GlobalIndexOutOfBounds { index: usize, volume: usize },

    /// An active cell index outside [0, number of active cells).
    #[error("active index {index} outside active set of {active} cells")]
    ActiveIndexOutOfBounds { index: usize, active: usize },

    /// A cell corner id outside 0..8.
    #[error("corner index {0} outside valid range 0..8")]
    CornerIndexOutOfBounds(usize),

    /// A pillar coordinate index outside the pillar lattice.
    #[error("pillar index (i={i}, j={j}, dim={dim}, layer={layer}) out of range")]
    PillarIndexOutOfBounds {
        i: usize,
        j: usize,
        dim: usize,
        layer: usize,
    },

    /// The referenced cell is inactive; distinct from a bounds violation.
    #[error("global index {0} does not correspond to an active cell")]
    InactiveCell(usize),

    /// A length-unit tag not in the recognized set.
    #[error("length unit '{0}' does not correspond to a valid unit system")]
    UnknownLengthUnit(String),

    /// Angular increments accumulate past a full circle.
    #[error("more than 360 degrees rotation ({0} degrees) - cells will be double covered")]
    ExcessiveRotation(f64),

    /// Degenerate axis-remap definition (zero-length or parallel axes).
    #[error("invalid MAPAXES definition: {0}")]
    InvalidMapAxes(String),
}
