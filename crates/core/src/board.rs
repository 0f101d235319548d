//! Board module - manages the game grid
//!
//! The board is a `rows x cols` grid where each cell is empty or filled with a
//! color id. Cells live in one flat row-major buffer; a per-row fill counter is
//! kept in step with it so full-row checks are O(1).
//! Coordinates: (row, col) where row grows downward from 0 and col grows to the
//! right from 0. Hidden spawn rows are the first rows of the grid.

use crate::error::{EngineError, Result};
use crate::piece::Piece;
use crate::types::ColorId;

/// The game board, flat array storage
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    rows: usize,
    cols: usize,
    /// Flat array of cells, row-major order (row * cols + col)
    cells: Vec<Option<ColorId>>,
    /// Filled cell count per row
    row_fill: Vec<usize>,
}

impl Board {
    /// Create a new empty board
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            cells: vec![None; rows * cols],
            row_fill: vec![0; rows],
        }
    }

    /// Calculate flat index from (row, col) coordinates
    #[inline(always)]
    fn index(&self, row: isize, col: isize) -> Option<usize> {
        if row < 0 || col < 0 || row as usize >= self.rows || col as usize >= self.cols {
            return None;
        }
        Some(row as usize * self.cols + col as usize)
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Get cell at (row, col).
    /// Returns None if out of bounds
    pub fn get(&self, row: isize, col: isize) -> Option<Option<ColorId>> {
        self.index(row, col).map(|idx| self.cells[idx])
    }

    /// Set cell at (row, col), keeping the row counter in step.
    /// Returns false if out of bounds
    pub fn set(&mut self, row: isize, col: isize, cell: Option<ColorId>) -> bool {
        let Some(idx) = self.index(row, col) else {
            return false;
        };
        let r = row as usize;
        match (self.cells[idx].is_some(), cell.is_some()) {
            (false, true) => self.row_fill[r] += 1,
            (true, false) => self.row_fill[r] -= 1,
            _ => {}
        }
        self.cells[idx] = cell;
        true
    }

    /// Check if position is within bounds and filled
    pub fn is_filled(&self, row: isize, col: isize) -> bool {
        matches!(self.get(row, col), Some(Some(_)))
    }

    /// Color of a filled cell
    pub fn color(&self, row: isize, col: isize) -> Option<ColorId> {
        self.get(row, col).flatten()
    }

    /// Check if position is within bounds and empty
    pub fn is_vacant(&self, row: isize, col: isize) -> bool {
        matches!(self.get(row, col), Some(None))
    }

    /// Filled cell count of a row (0 for rows out of range)
    pub fn row_fill(&self, row: usize) -> usize {
        self.row_fill.get(row).copied().unwrap_or(0)
    }

    /// Whether every occupied cell of the piece lands on a vacant in-bounds cell
    pub fn fits(&self, piece: &Piece) -> bool {
        piece
            .cells()
            .iter()
            .all(|&(row, col)| self.is_vacant(row, col))
    }

    /// Commit a piece into the grid.
    ///
    /// The board is left untouched when the piece does not fit.
    pub fn add(&mut self, piece: &Piece) -> Result<()> {
        if !self.fits(piece) {
            return Err(EngineError::PieceDoesNotFit {
                kind: piece.kind(),
                row: piece.row(),
                col: piece.col(),
            });
        }

        let color = piece.color();
        for (row, col) in piece.cells() {
            self.set(row, col, Some(color));
        }
        Ok(())
    }

    /// Check if a row is completely filled
    pub fn line_full(&self, row: usize) -> bool {
        row < self.rows && self.row_fill[row] == self.cols
    }

    /// Whether any row is full
    pub fn can_clear_lines(&self) -> bool {
        (0..self.rows).any(|row| self.line_full(row))
    }

    /// Number of full rows
    pub fn full_row_count(&self) -> usize {
        (0..self.rows).filter(|&row| self.line_full(row)).count()
    }

    /// Drop all full rows and compact the rest downward.
    ///
    /// Two-pointer pass from the bottom: surviving rows are copied to the
    /// write cursor in order, then the vacated rows at the top are reset.
    /// Returns the number of rows removed.
    pub fn clear(&mut self) -> usize {
        let width = self.cols;
        let mut cleared = 0;
        let mut write = self.rows;

        for read in (0..self.rows).rev() {
            if self.line_full(read) {
                cleared += 1;
                continue;
            }

            write -= 1;
            if write != read {
                let src = read * width;
                self.cells.copy_within(src..src + width, write * width);
                self.row_fill[write] = self.row_fill[read];
            }
        }

        for row in 0..write {
            let start = row * width;
            self.cells[start..start + width].fill(None);
            self.row_fill[row] = 0;
        }

        cleared
    }

    /// Get a reference to the internal cells array
    pub fn cells(&self) -> &[Option<ColorId>] {
        &self.cells
    }

    /// Reset every cell
    pub fn reset(&mut self) {
        self.cells.fill(None);
        self.row_fill.fill(0);
    }
}
