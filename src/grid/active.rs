//! Activation engine: ACTNUM flags and the global↔active index tables.
//!
//! Both permutation tables are re-derived in full on every reset;
//! nothing is persisted. A reset also invalidates the active-volume
//! cache, which is rebuilt lazily on the next bulk query.

use std::fmt;
use std::sync::OnceLock;

use crate::error::GridError;
use crate::grid::CornerPointGrid;

/// Sentinel in the global→active table for inactive cells.
const INACTIVE: i32 = -1;

/// Summary of the activation state, for diagnostics.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ActivationStatistics {
    /// Total number of logical cells.
    pub total_cells: usize,
    /// Number of active cells.
    pub active_cells: usize,
    /// Number of cells forced active by numerical-aquifer registration.
    pub aquifer_cells: usize,
}

impl fmt::Display for ActivationStatistics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} of {} cells active ({:.1}%), {} aquifer-forced",
            self.active_cells,
            self.total_cells,
            100.0 * self.active_cells as f64 / self.total_cells as f64,
            self.aquifer_cells,
        )
    }
}

impl CornerPointGrid {
    /// Set every cell active; both index tables become the identity.
    pub fn reset_actnum_all(&mut self) {
        let global_size = self.dims().cell_count();
        self.actnum.clear();
        self.actnum.resize(global_size, 1);
        self.global_to_active = (0..global_size as i32).collect();
        self.active_to_global = (0..global_size).collect();
        self.active_volume = OnceLock::new();
    }

    /// Reset activation from explicit flags.
    ///
    /// An empty slice is shorthand for all-active. Registered
    /// numerical-aquifer cells are forced active regardless of their
    /// supplied flag. One linear scan rebuilds both permutation tables
    /// and invalidates the active-volume cache.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::KeywordSize`] if the flag count differs
    /// from the logical cell count.
    pub fn reset_actnum(&mut self, actnum: &[i32]) -> Result<(), GridError> {
        if actnum.is_empty() {
            self.reset_actnum_all();
            return Ok(());
        }
        let global_size = self.dims().cell_count();
        if actnum.len() != global_size {
            return Err(GridError::KeywordSize {
                keyword: "ACTNUM".to_string(),
                expected: global_size,
                actual: actnum.len(),
            });
        }

        self.actnum.clear();
        self.actnum.extend_from_slice(actnum);
        self.global_to_active.clear();
        self.active_to_global.clear();

        let mut nactive = 0;
        for global in 0..global_size {
            // Numerical aquifer cells need to be active.
            if self.is_aquifer_cell(global) {
                self.actnum[global] = 1;
            }
            if self.actnum[global] > 0 {
                self.global_to_active.push(nactive);
                self.active_to_global.push(global);
                nactive += 1;
            } else {
                self.global_to_active.push(INACTIVE);
            }
        }
        self.active_volume = OnceLock::new();
        Ok(())
    }

    /// Number of active cells.
    #[inline]
    pub fn num_active(&self) -> usize {
        self.active_to_global.len()
    }

    /// Whether every logical cell is active.
    #[inline]
    pub fn all_active(&self) -> bool {
        self.num_active() == self.dims().cell_count()
    }

    /// The dense active→global map, ascending.
    #[inline]
    pub fn active_map(&self) -> &[usize] {
        &self.active_to_global
    }

    /// Whether cell (i, j, k) is active.
    pub fn cell_active(&self, i: usize, j: usize, k: usize) -> Result<bool, GridError> {
        let global = self.dims().global_index(i, j, k)?;
        self.cell_active_global(global)
    }

    /// Whether the cell with linear global index is active.
    pub fn cell_active_global(&self, global_index: usize) -> Result<bool, GridError> {
        if global_index >= self.dims().cell_count() {
            return Err(GridError::GlobalIndexOutOfBounds {
                index: global_index,
                volume: self.dims().cell_count(),
            });
        }
        Ok(self.actnum[global_index] > 0)
    }

    /// Active index of cell (i, j, k).
    pub fn active_index(&self, i: usize, j: usize, k: usize) -> Result<usize, GridError> {
        let global = self.dims().global_index(i, j, k)?;
        self.active_index_global(global)
    }

    /// Active index of a global cell.
    ///
    /// # Errors
    ///
    /// [`GridError::InactiveCell`] when the cell is inactive; distinct
    /// from the bounds violation for an index outside the grid.
    pub fn active_index_global(&self, global_index: usize) -> Result<usize, GridError> {
        if global_index >= self.dims().cell_count() {
            return Err(GridError::GlobalIndexOutOfBounds {
                index: global_index,
                volume: self.dims().cell_count(),
            });
        }
        match self.global_to_active[global_index] {
            INACTIVE => Err(GridError::InactiveCell(global_index)),
            active => Ok(active as usize),
        }
    }

    /// Global index of the cell with the given active index.
    pub fn global_index_from_active(&self, active_index: usize) -> Result<usize, GridError> {
        self.active_to_global
            .get(active_index)
            .copied()
            .ok_or(GridError::ActiveIndexOutOfBounds {
                index: active_index,
                active: self.num_active(),
            })
    }

    /// Activation summary for logging and diagnostics.
    pub fn activation_statistics(&self) -> ActivationStatistics {
        ActivationStatistics {
            total_cells: self.dims().cell_count(),
            active_cells: self.num_active(),
            aquifer_cells: self.aquifer_cells.len(),
        }
    }
}
