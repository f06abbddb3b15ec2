//! Occupancy grid with reversible placement
//!
//! Cells are stored row-major in a bitset. The number of free cells is
//! maintained incrementally by `place` and `remove` so that capacity checks
//! during search never rescan the grid.

use bitvec::prelude::*;
use std::fmt;

use crate::io::configuration::{EMPTY_MARKER, OCCUPIED_MARKER};
use crate::spatial::shape::Variant;

/// Mutable rectangular cell map tracking covered cells
///
/// Coordinates are `(x, y)` with `x` the column and `y` the row. `place` and
/// `remove` are the only mutations and must be paired in stack order.
#[derive(Clone, Debug)]
pub struct OccupancyGrid {
    cells: BitVec,
    width: usize,
    height: usize,
    free_cells: usize,
}

impl OccupancyGrid {
    /// Create an empty grid
    pub fn new(width: usize, height: usize) -> Self {
        let area = width.saturating_mul(height);
        Self {
            cells: bitvec![0; area],
            width,
            height,
            free_cells: area,
        }
    }

    /// Width in cells
    pub const fn width(&self) -> usize {
        self.width
    }

    /// Height in cells
    pub const fn height(&self) -> usize {
        self.height
    }

    /// Total number of cells
    pub const fn area(&self) -> usize {
        self.width.saturating_mul(self.height)
    }

    /// Number of uncovered cells, read in O(1)
    pub const fn free_cells(&self) -> usize {
        self.free_cells
    }

    /// Number of covered cells counted from the bitset
    pub fn occupied_cells(&self) -> usize {
        self.cells.count_ones()
    }

    /// Whether the cell at column `x`, row `y` is covered
    ///
    /// Cells outside the grid report as uncovered.
    pub fn is_occupied(&self, x: usize, y: usize) -> bool {
        self.index(x, y)
            .and_then(|index| self.cells.get(index).as_deref().copied())
            .unwrap_or(false)
    }

    /// Whether the variant's bounding box fits at origin `(x, y)`
    pub const fn fits_within(
        &self,
        variant_width: usize,
        variant_height: usize,
        x: usize,
        y: usize,
    ) -> bool {
        x.saturating_add(variant_width) <= self.width
            && y.saturating_add(variant_height) <= self.height
    }

    /// Test whether the variant can be placed with its top-left corner at `(x, y)`
    ///
    /// Fails when the bounding box leaves the grid or when an occupied cell of
    /// the variant overlaps a covered grid cell. Never mutates the grid.
    pub fn can_place_at(&self, variant: &Variant, x: usize, y: usize) -> bool {
        if !self.fits_within(variant.width(), variant.height(), x, y) {
            return false;
        }

        variant
            .cells()
            .iter()
            .all(|&[row, col]| !self.is_occupied(x + col, y + row))
    }

    /// Cover every occupied cell of the variant at origin `(x, y)`
    ///
    /// The caller must have confirmed the position with `can_place_at`.
    pub fn place(&mut self, variant: &Variant, x: usize, y: usize) {
        debug_assert!(
            self.can_place_at(variant, x, y),
            "place called on an infeasible position ({x}, {y})"
        );

        for &[row, col] in variant.cells() {
            self.set_cell(x + col, y + row, true);
        }
        self.free_cells = self.free_cells.saturating_sub(variant.block_count());
    }

    /// Exact inverse of `place` for the same variant and origin
    pub fn remove(&mut self, variant: &Variant, x: usize, y: usize) {
        debug_assert!(
            variant
                .cells()
                .iter()
                .all(|&[row, col]| self.is_occupied(x + col, y + row)),
            "remove called on a position that was not placed ({x}, {y})"
        );

        for &[row, col] in variant.cells() {
            self.set_cell(x + col, y + row, false);
        }
        self.free_cells = self
            .free_cells
            .saturating_add(variant.block_count())
            .min(self.area());
    }

    const fn index(&self, x: usize, y: usize) -> Option<usize> {
        if x < self.width && y < self.height {
            Some(y * self.width + x)
        } else {
            None
        }
    }

    fn set_cell(&mut self, x: usize, y: usize, occupied: bool) {
        if let Some(mut cell) = self.index(x, y).and_then(|index| self.cells.get_mut(index)) {
            *cell = occupied;
        }
    }
}

impl fmt::Display for OccupancyGrid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for y in 0..self.height {
            for x in 0..self.width {
                let marker = if self.is_occupied(x, y) {
                    OCCUPIED_MARKER
                } else {
                    EMPTY_MARKER
                };
                write!(f, "{marker}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
