//! Flat-array offset arithmetic for the COORD and ZCORN stores.
//!
//! Both mappers are pure, allocation-free index calculators: they take
//! explicit (dims, indices) and return an offset into the corresponding
//! flat array. Keeping the arithmetic out of the grid object makes bulk
//! iteration cache-friendly and the formulas testable in isolation.

mod coord;
mod zcorn;

pub use coord::CoordMapper;
pub use zcorn::ZcornMapper;
