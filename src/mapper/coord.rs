//! COORD offset arithmetic.
//!
//! The COORD array holds one pillar per lattice point of the
//! (nx + 1) × (ny + 1) pillar grid, each pillar being 6 consecutive
//! values: the top point (x, y, z) followed by the bottom point.

use crate::error::GridError;
use crate::types::GridDims;

/// Offset calculator for the COORD array of a grid.
#[derive(Clone, Copy, Debug)]
pub struct CoordMapper {
    nx: usize,
    ny: usize,
}

impl CoordMapper {
    /// Create a mapper for the given logical extents. Only the lateral
    /// extents matter; pillars span the full vertical range.
    pub fn new(dims: GridDims) -> Self {
        Self {
            nx: dims.nx(),
            ny: dims.ny(),
        }
    }

    /// Total number of COORD entries for these extents.
    #[inline]
    pub fn size(&self) -> usize {
        6 * (self.nx + 1) * (self.ny + 1)
    }

    /// Offset of component `dim` (0 = x, 1 = y, 2 = z) of the top
    /// (`layer` 0) or bottom (`layer` 1) point of pillar (i, j).
    ///
    /// Pillar indices run to `nx` / `ny` inclusive.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::PillarIndexOutOfBounds`] if any index is
    /// out of range.
    pub fn index(&self, i: usize, j: usize, dim: usize, layer: usize) -> Result<usize, GridError> {
        if i > self.nx || j > self.ny || dim > 2 || layer > 1 {
            return Err(GridError::PillarIndexOutOfBounds { i, j, dim, layer });
        }
        Ok(self.index_unchecked(i, j, dim, layer))
    }

    /// Unchecked variant of [`index`](Self::index) for loops whose
    /// indices are in range by construction.
    #[inline]
    pub(crate) fn index_unchecked(&self, i: usize, j: usize, dim: usize, layer: usize) -> usize {
        debug_assert!(i <= self.nx && j <= self.ny && dim <= 2 && layer <= 1);
        6 * (i + j * (self.nx + 1)) + layer * 3 + dim
    }

    /// Offset of the first value (top x) of pillar (i, j).
    #[inline]
    pub(crate) fn pillar_unchecked(&self, i: usize, j: usize) -> usize {
        self.index_unchecked(i, j, 0, 0)
    }
}
