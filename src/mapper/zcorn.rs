//! ZCORN offset arithmetic and depth-monotonicity repair.
//!
//! The ZCORN array stores 8 depth values per cell: 4 for the top face,
//! then 4 for the bottom face, each quad ordered row-wise in the i-j
//! plane. Within a face the corners are numbered
//!
//! ```text
//!   top            bottom          j
//!     2---3          6---7        /|\
//!     |   |          |   |         |
//!     0---1          4---5         o----> i
//! ```
//!
//! so corner `c` and corner `c + 4` lie on the same pillar. The mapper
//! turns (i, j, k, corner) into a flat offset with pure stride
//! arithmetic and never touches the array itself, except in
//! [`fixup_zcorn`](ZcornMapper::fixup_zcorn) which repairs
//! non-monotonic depth sequences in place.

use crate::error::GridError;
use crate::types::GridDims;

/// Offset calculator for the ZCORN array of a grid.
#[derive(Clone, Copy, Debug)]
pub struct ZcornMapper {
    dims: GridDims,
    stride: [usize; 3],
    cell_shift: [usize; 8],
}

impl ZcornMapper {
    /// Create a mapper for the given logical extents.
    pub fn new(dims: GridDims) -> Self {
        let nx = dims.nx();
        let ny = dims.ny();
        Self {
            dims,
            stride: [2, 4 * nx, 8 * nx * ny],
            cell_shift: [
                0,
                1,
                2 * nx,
                2 * nx + 1,
                4 * nx * ny,
                4 * nx * ny + 1,
                4 * nx * ny + 2 * nx,
                4 * nx * ny + 2 * nx + 1,
            ],
        }
    }

    /// Total number of ZCORN entries for these extents.
    #[inline]
    pub fn size(&self) -> usize {
        self.dims.zcorn_len()
    }

    /// Offset of corner `corner` of cell (i, j, k).
    ///
    /// # Errors
    ///
    /// Returns [`GridError::CellIndexOutOfBounds`] if the cell lies
    /// outside the extents and [`GridError::CornerIndexOutOfBounds`]
    /// for a corner id outside 0..8.
    pub fn index(&self, i: usize, j: usize, k: usize, corner: usize) -> Result<usize, GridError> {
        if !self.dims.contains(i, j, k) {
            let (nx, ny, nz) = self.dims.as_tuple();
            return Err(GridError::CellIndexOutOfBounds {
                i,
                j,
                k,
                nx,
                ny,
                nz,
            });
        }
        if corner >= 8 {
            return Err(GridError::CornerIndexOutOfBounds(corner));
        }
        Ok(self.index_unchecked(i, j, k, corner))
    }

    /// Offset of corner `corner` of the cell with linear global index
    /// `global_index`.
    pub fn global_index(&self, global_index: usize, corner: usize) -> Result<usize, GridError> {
        let (i, j, k) = self.dims.ijk(global_index)?;
        self.index(i, j, k, corner)
    }

    /// Unchecked variant of [`index`](Self::index) for hot loops whose
    /// indices are in range by construction.
    #[inline]
    pub(crate) fn index_unchecked(&self, i: usize, j: usize, k: usize, corner: usize) -> usize {
        debug_assert!(self.dims.contains(i, j, k));
        debug_assert!(corner < 8);
        i * self.stride[0] + j * self.stride[1] + k * self.stride[2] + self.cell_shift[corner]
    }

    /// Repair non-monotonic depth sequences in place.
    ///
    /// The global depth direction is taken from comparing the first
    /// cell's top corner with the last layer's bottom corner. Every
    /// cell is then visited layer by layer and, for each of its 4
    /// corner columns, two orderings are enforced: the cell's top may
    /// not lie beyond the bottom of the cell above it, and the cell's
    /// bottom may not lie before its own top. Violating values are
    /// clamped to the neighboring value they crossed.
    ///
    /// Returns the number of corrected values. The count is diagnostic
    /// only; repairing keeps ill-formed input usable instead of
    /// rejecting it. Running the repair twice returns 0 the second
    /// time.
    ///
    /// Debug builds assert that the slice length matches
    /// [`size`](Self::size).
    pub fn fixup_zcorn(&self, zcorn: &mut [f64]) -> usize {
        debug_assert_eq!(zcorn.len(), self.size());
        let (nx, ny, nz) = self.dims.as_tuple();
        let sign = if zcorn[self.index_unchecked(0, 0, 0, 0)]
            <= zcorn[self.index_unchecked(0, 0, nz - 1, 4)]
        {
            1.0
        } else {
            -1.0
        };
        let mut adjusted = 0;

        for k in 0..nz {
            for j in 0..ny {
                for i in 0..nx {
                    for c in 0..4 {
                        // Between this cell's top and the bottom of the cell above.
                        if k > 0 {
                            let above_bottom = self.index_unchecked(i, j, k - 1, c + 4);
                            let this_top = self.index_unchecked(i, j, k, c);
                            if (zcorn[this_top] - zcorn[above_bottom]) * sign < 0.0 {
                                zcorn[this_top] = zcorn[above_bottom];
                                adjusted += 1;
                            }
                        }

                        // Within the cell.
                        let this_top = self.index_unchecked(i, j, k, c);
                        let this_bottom = self.index_unchecked(i, j, k, c + 4);
                        if (zcorn[this_bottom] - zcorn[this_top]) * sign < 0.0 {
                            zcorn[this_bottom] = zcorn[this_top];
                            adjusted += 1;
                        }
                    }
                }
            }
        }
        adjusted
    }

    /// Whether the depth sequences already satisfy the orderings that
    /// [`fixup_zcorn`](Self::fixup_zcorn) enforces.
    pub fn valid_zcorn(&self, zcorn: &[f64]) -> bool {
        debug_assert_eq!(zcorn.len(), self.size());
        let (nx, ny, nz) = self.dims.as_tuple();
        let sign = if zcorn[self.index_unchecked(0, 0, 0, 0)]
            <= zcorn[self.index_unchecked(0, 0, nz - 1, 4)]
        {
            1.0
        } else {
            -1.0
        };

        for j in 0..ny {
            for i in 0..nx {
                for c in 0..4 {
                    for k in 0..nz {
                        if k > 0 {
                            let above_bottom = self.index_unchecked(i, j, k - 1, c + 4);
                            let this_top = self.index_unchecked(i, j, k, c);
                            if (zcorn[this_top] - zcorn[above_bottom]) * sign < 0.0 {
                                return false;
                            }
                        }

                        let this_top = self.index_unchecked(i, j, k, c);
                        let this_bottom = self.index_unchecked(i, j, k, c + 4);
                        if (zcorn[this_bottom] - zcorn[this_top]) * sign < 0.0 {
                            return false;
                        }
                    }
                }
            }
        }
        true
    }
}
