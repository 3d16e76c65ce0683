//! The memory tape.
//!
//! A fixed number of cells, all starting at zero, and a data pointer that
//! saturates at both ends instead of wrapping. Cell values live in a
//! half-open range `[min, max)` and wrap on overflow in either direction.

use crate::config::Settings;
use std::fmt;

/// Wrap-around value range for one cell.
///
/// Arithmetic is done in `i128` so that stepping past either end of a range
/// touching `i64::MIN` or `i64::MAX` cannot overflow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellRange {
    min: i64,
    max: i64,
}

impl CellRange {
    /// Build a range from `[min, max)`. `max` must be greater than `min`.
    pub fn new(min: i64, max: i64) -> Self {
        debug_assert!(max > min, "empty cell range [{}, {})", min, max);
        Self { min, max }
    }

    /// Map any integer into the range.
    #[inline]
    pub fn wrap(&self, value: i64) -> i64 {
        self.wrap_wide(i128::from(value))
    }

    fn wrap_wide(&self, value: i128) -> i64 {
        let min = i128::from(self.min);
        let modulus = (i128::from(self.max) - min).max(1);
        // Lands in [min, max), which always fits an i64
        (min + (value - min).rem_euclid(modulus)) as i64
    }

    pub fn min(&self) -> i64 {
        self.min
    }

    /// Largest storable value.
    pub fn max(&self) -> i64 {
        self.max - 1
    }
}

/// Fixed-length tape of wrapping cells with a clamped data pointer.
#[derive(Clone)]
pub struct Tape {
    cells: Vec<i64>,
    pointer: usize,
    range: CellRange,
}

impl Tape {
    /// Create a zeroed tape. Zero is wrapped into the range, so a range that
    /// excludes zero starts every cell at the equivalent residue.
    pub fn new(length: usize, range: CellRange) -> Self {
        debug_assert!(length > 0, "tape must have at least one cell");
        Self {
            cells: vec![range.wrap(0); length],
            pointer: 0,
            range,
        }
    }

    /// Create a tape sized and ranged from settings.
    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(
            settings.tape_length,
            CellRange::new(settings.cell_min, settings.cell_max),
        )
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    #[inline]
    pub fn pointer(&self) -> usize {
        self.pointer
    }

    pub fn range(&self) -> CellRange {
        self.range
    }

    /// Move right, stopping at the last cell.
    #[inline]
    pub fn move_right(&mut self) {
        if self.pointer + 1 < self.cells.len() {
            self.pointer += 1;
        }
    }

    /// Move left, stopping at cell 0.
    #[inline]
    pub fn move_left(&mut self) {
        self.pointer = self.pointer.saturating_sub(1);
    }

    /// Value under the data pointer.
    #[inline]
    pub fn get(&self) -> i64 {
        self.cells[self.pointer]
    }

    /// Store `value` under the data pointer, wrapped into the cell range.
    #[inline]
    pub fn set(&mut self, value: i64) {
        self.cells[self.pointer] = self.range.wrap(value);
    }

    #[inline]
    pub fn increment(&mut self) {
        let v = i128::from(self.get());
        self.cells[self.pointer] = self.range.wrap_wide(v + 1);
    }

    #[inline]
    pub fn decrement(&mut self) {
        let v = i128::from(self.get());
        self.cells[self.pointer] = self.range.wrap_wide(v - 1);
    }

    /// Is the current cell zero? Settings that pass validation always
    /// include zero in the cell range.
    #[inline]
    pub fn is_zero(&self) -> bool {
        self.get() == 0
    }

    /// Read a cell by absolute index.
    pub fn cell(&self, index: usize) -> Option<i64> {
        self.cells.get(index).copied()
    }

    /// Cells within `radius` of the pointer, as `(index, value)` pairs.
    pub fn window(&self, radius: usize) -> Vec<(usize, i64)> {
        let start = self.pointer.saturating_sub(radius);
        let end = (self.pointer + radius + 1).min(self.cells.len());
        (start..end).map(|i| (i, self.cells[i])).collect()
    }
}

impl fmt::Debug for Tape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Only count non-zero cells
        let non_zero = self.cells.iter().filter(|&&c| c != 0).count();

        f.debug_struct("Tape")
            .field("pointer", &self.pointer)
            .field("non_zero_cells", &non_zero)
            .field("total_cells", &self.cells.len())
            .finish()
    }
}
