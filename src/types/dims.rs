//! Logical grid dimension types.

use std::fmt;

use crate::error::GridError;

/// Logical Cartesian extents of a corner-point grid.
///
/// Provides a strongly-typed way to specify grid dimensions,
/// preventing mix-ups between nx/ny/nz and other integer parameters,
/// and centralizes the derived array-length arithmetic.
///
/// # Example
///
/// ```
/// use cpgrid::types::GridDims;
///
/// let dims = GridDims::new(10, 7, 3);
/// assert_eq!(dims.nx(), 10);
/// assert_eq!(dims.cell_count(), 210);
/// assert_eq!(dims.coord_len(), 6 * 11 * 8);
/// assert_eq!(dims.zcorn_len(), 8 * 210);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct GridDims {
    /// Number of cells in x-direction
    nx: usize,
    /// Number of cells in y-direction
    ny: usize,
    /// Number of layers in z-direction
    nz: usize,
}

impl GridDims {
    /// Create a new dimension specification.
    ///
    /// # Panics
    ///
    /// Panics if any extent is zero.
    pub fn new(nx: usize, ny: usize, nz: usize) -> Self {
        assert!(nx > 0, "nx must be positive, got {}", nx);
        assert!(ny > 0, "ny must be positive, got {}", ny);
        assert!(nz > 0, "nz must be positive, got {}", nz);
        Self { nx, ny, nz }
    }

    /// Create cubic dimensions (same extent in all directions).
    pub fn cube(n: usize) -> Self {
        Self::new(n, n, n)
    }

    /// Number of cells in x-direction.
    #[inline]
    pub fn nx(&self) -> usize {
        self.nx
    }

    /// Number of cells in y-direction.
    #[inline]
    pub fn ny(&self) -> usize {
        self.ny
    }

    /// Number of layers in z-direction.
    #[inline]
    pub fn nz(&self) -> usize {
        self.nz
    }

    /// Total number of logical cells.
    #[inline]
    pub fn cell_count(&self) -> usize {
        self.nx * self.ny * self.nz
    }

    /// Number of cells in one horizontal layer.
    #[inline]
    pub fn layer_cell_count(&self) -> usize {
        self.nx * self.ny
    }

    /// Number of pillars in the vertical skeleton.
    #[inline]
    pub fn pillar_count(&self) -> usize {
        (self.nx + 1) * (self.ny + 1)
    }

    /// Required length of the COORD array (6 values per pillar).
    #[inline]
    pub fn coord_len(&self) -> usize {
        6 * self.pillar_count()
    }

    /// Required length of the ZCORN array (8 values per cell).
    #[inline]
    pub fn zcorn_len(&self) -> usize {
        8 * self.cell_count()
    }

    /// Whether (i, j, k) lies inside the logical extents.
    #[inline]
    pub fn contains(&self, i: usize, j: usize, k: usize) -> bool {
        i < self.nx && j < self.ny && k < self.nz
    }

    /// Linear global index of cell (i, j, k), i fastest.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::CellIndexOutOfBounds`] if the cell lies
    /// outside the logical extents.
    #[inline]
    pub fn global_index(&self, i: usize, j: usize, k: usize) -> Result<usize, GridError> {
        if !self.contains(i, j, k) {
            return Err(GridError::CellIndexOutOfBounds {
                i,
                j,
                k,
                nx: self.nx,
                ny: self.ny,
                nz: self.nz,
            });
        }
        Ok(i + j * self.nx + k * self.nx * self.ny)
    }

    /// Inverse of [`global_index`](Self::global_index): (i, j, k) of a
    /// linear global index.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::GlobalIndexOutOfBounds`] if the index is
    /// not below [`cell_count`](Self::cell_count).
    #[inline]
    pub fn ijk(&self, global_index: usize) -> Result<(usize, usize, usize), GridError> {
        if global_index >= self.cell_count() {
            return Err(GridError::GlobalIndexOutOfBounds {
                index: global_index,
                volume: self.cell_count(),
            });
        }
        let area = self.nx * self.ny;
        let k = global_index / area;
        let rest = global_index % area;
        Ok((rest % self.nx, rest / self.nx, k))
    }

    /// Return as tuple (nx, ny, nz).
    #[inline]
    pub fn as_tuple(&self) -> (usize, usize, usize) {
        (self.nx, self.ny, self.nz)
    }
}

impl fmt::Display for GridDims {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}×{}×{}", self.nx, self.ny, self.nz)
    }
}

impl From<(usize, usize, usize)> for GridDims {
    fn from((nx, ny, nz): (usize, usize, usize)) -> Self {
        Self::new(nx, ny, nz)
    }
}

impl From<GridDims> for (usize, usize, usize) {
    fn from(dims: GridDims) -> Self {
        (dims.nx, dims.ny, dims.nz)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dims_creation() {
        let d = GridDims::new(10, 7, 3);
        assert_eq!(d.nx(), 10);
        assert_eq!(d.ny(), 7);
        assert_eq!(d.nz(), 3);
    }

    #[test]
    fn test_cube_dims() {
        let d = GridDims::cube(5);
        assert_eq!(d.as_tuple(), (5, 5, 5));
    }

    #[test]
    fn test_derived_sizes() {
        let d = GridDims::new(3, 4, 5);
        assert_eq!(d.cell_count(), 60);
        assert_eq!(d.layer_cell_count(), 12);
        assert_eq!(d.pillar_count(), 20); // 4 × 5
        assert_eq!(d.coord_len(), 120);
        assert_eq!(d.zcorn_len(), 480);
    }

    #[test]
    fn test_global_index_roundtrip() {
        let d = GridDims::new(3, 4, 5);
        for k in 0..5 {
            for j in 0..4 {
                for i in 0..3 {
                    let g = d.global_index(i, j, k).unwrap();
                    assert_eq!(d.ijk(g).unwrap(), (i, j, k));
                }
            }
        }
    }

    #[test]
    fn test_global_index_out_of_bounds() {
        let d = GridDims::new(3, 4, 5);
        assert!(matches!(
            d.global_index(3, 0, 0),
            Err(GridError::CellIndexOutOfBounds { i: 3, .. })
        ));
        assert!(matches!(
            d.ijk(60),
            Err(GridError::GlobalIndexOutOfBounds { index: 60, .. })
        ));
    }

    #[test]
    fn test_from_tuple() {
        let d: GridDims = (2, 3, 4).into();
        assert_eq!(d.cell_count(), 24);
    }

    #[test]
    #[should_panic(expected = "nx must be positive")]
    fn test_zero_nx() {
        GridDims::new(0, 1, 1);
    }

    #[test]
    #[should_panic(expected = "nz must be positive")]
    fn test_zero_nz() {
        GridDims::new(1, 1, 0);
    }
}
