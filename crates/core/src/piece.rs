//! Piece module - tetromino shapes, orientation and SRS wall kicks
//!
//! Every kind owns one immutable base matrix. Rotated views are produced by a
//! coordinate transform over that matrix instead of storing four matrices per
//! kind: each rotation picks a unit vector for the rotated row axis and one for
//! the rotated column axis, plus the matrix corner they start from.
//!
//! Positions are grid coordinates of the piece center, `row` growing downward.
//! Reference: https://tetris.wiki/SRS

use arrayvec::ArrayVec;

use crate::error::Result;
use crate::types::{ColorId, PieceKind, Rotation};

/// Square boolean matrix, row-major
pub type Shape = &'static [&'static [bool]];

/// Per-rotation offset lists, `(x, y)` with x to the right and y up
pub type OffsetTable = [&'static [(i8, i8)]; 4];

/// Number of occupied cells in every tetromino
pub const MINOS: usize = 4;

const X: bool = true;
const E: bool = false;

const I_SHAPE: Shape = &[
    &[E, E, E, E, E],
    &[E, E, E, E, E],
    &[E, X, X, X, X],
    &[E, E, E, E, E],
    &[E, E, E, E, E],
];

const O_SHAPE: Shape = &[
    &[E, X, X],
    &[E, X, X],
    &[E, E, E],
];

const T_SHAPE: Shape = &[
    &[E, X, E],
    &[X, X, X],
    &[E, E, E],
];

const S_SHAPE: Shape = &[
    &[E, X, X],
    &[X, X, E],
    &[E, E, E],
];

const Z_SHAPE: Shape = &[
    &[X, X, E],
    &[E, X, X],
    &[E, E, E],
];

const J_SHAPE: Shape = &[
    &[X, E, E],
    &[X, X, X],
    &[E, E, E],
];

const L_SHAPE: Shape = &[
    &[E, E, X],
    &[X, X, X],
    &[E, E, E],
];

/// JLSTZ offsets (shared by J, L, S, T, Z)
const JLSTZ_OFFSETS: OffsetTable = [
    &[(0, 0), (0, 0), (0, 0), (0, 0), (0, 0)],
    &[(0, 0), (1, 0), (1, -1), (0, 2), (1, 2)],
    &[(0, 0), (0, 0), (0, 0), (0, 0), (0, 0)],
    &[(0, 0), (-1, 0), (-1, -1), (0, 2), (-1, 2)],
];

/// I piece offsets (wider than JLSTZ)
const I_OFFSETS: OffsetTable = [
    &[(0, 0), (-1, 0), (2, 0), (-1, 0), (2, 0)],
    &[(-1, 0), (0, 0), (0, 0), (0, 1), (0, -2)],
    &[(-1, 1), (1, 1), (-2, 1), (1, 0), (-2, 0)],
    &[(0, 1), (0, 1), (0, 1), (0, -1), (0, 2)],
];

/// O piece has a single offset per rotation, which keeps it in place
const O_OFFSETS: OffsetTable = [&[(0, 0)], &[(0, -1)], &[(-1, -1)], &[(-1, 0)]];

/// Matrix step taken when the rotated row index grows, per rotation
const ROW_UNIT: [(isize, isize); 4] = [(1, 0), (0, 1), (-1, 0), (0, -1)];

/// Matrix step taken when the rotated column index grows, per rotation
const COL_UNIT: [(isize, isize); 4] = [(0, 1), (-1, 0), (0, -1), (1, 0)];

/// Get the base shape for a piece kind
pub fn shape(kind: PieceKind) -> Shape {
    match kind {
        PieceKind::I => I_SHAPE,
        PieceKind::O => O_SHAPE,
        PieceKind::T => T_SHAPE,
        PieceKind::S => S_SHAPE,
        PieceKind::Z => Z_SHAPE,
        PieceKind::J => J_SHAPE,
        PieceKind::L => L_SHAPE,
    }
}

/// Get the offset table for a piece kind
pub fn offset_table(kind: PieceKind) -> &'static OffsetTable {
    match kind {
        PieceKind::I => &I_OFFSETS,
        PieceKind::O => &O_OFFSETS,
        _ => &JLSTZ_OFFSETS,
    }
}

/// A tetromino: static shape and offset table, mutable rotation and position.
///
/// `Piece` is `Copy`. A copy shares the static shape and offset table and owns
/// its rotation and position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    kind: PieceKind,
    rotation: Rotation,
    row: isize,
    col: isize,
}

impl Piece {
    /// Create a piece in spawn orientation at the grid origin
    pub fn new(kind: PieceKind) -> Self {
        Self {
            kind,
            rotation: Rotation::North,
            row: 0,
            col: 0,
        }
    }

    pub fn kind(&self) -> PieceKind {
        self.kind
    }

    pub fn color(&self) -> ColorId {
        self.kind.color_id()
    }

    pub fn shape(&self) -> Shape {
        shape(self.kind)
    }

    pub fn rotation(&self) -> Rotation {
        self.rotation
    }

    /// Set the rotation from its numeric index.
    ///
    /// Values outside `0..=3` are rejected and leave the piece unchanged.
    pub fn set_rotation(&mut self, value: u8) -> Result<()> {
        self.rotation = Rotation::try_from(value)?;
        Ok(())
    }

    pub fn set_rotation_to(&mut self, rotation: Rotation) {
        self.rotation = rotation;
    }

    /// Center row
    pub fn row(&self) -> isize {
        self.row
    }

    /// Center column
    pub fn col(&self) -> isize {
        self.col
    }

    pub fn set_position(&mut self, row: isize, col: isize) {
        self.row = row;
        self.col = col;
    }

    pub fn shift(&mut self, d_row: isize, d_col: isize) {
        self.row += d_row;
        self.col += d_col;
    }

    /// Copy of this piece moved by `(d_row, d_col)`
    pub fn shifted(&self, d_row: isize, d_col: isize) -> Self {
        let mut piece = *self;
        piece.shift(d_row, d_col);
        piece
    }

    /// Matrix dimensions as seen in the current rotation: `(height, width)`.
    pub fn size(&self) -> (usize, usize) {
        let matrix = self.shape();
        let rows = matrix.len();
        let cols = matrix.first().map_or(0, |row| row.len());
        if ROW_UNIT[self.rotation.index() as usize].0 != 0 {
            (rows, cols)
        } else {
            (cols, rows)
        }
    }

    /// Whether rotated cell `(i, j)` is occupied.
    ///
    /// `(i, j)` is relative to the rotated matrix; out-of-range queries are
    /// empty.
    pub fn block(&self, i: usize, j: usize) -> bool {
        let (n, m) = self.size();
        if i >= n || j >= m {
            return false;
        }

        let matrix = self.shape();
        let rows = matrix.len() as isize;
        let cols = matrix.first().map_or(0, |row| row.len()) as isize;
        let r = self.rotation.index() as usize;
        let (ri, rj) = (ROW_UNIT[r], COL_UNIT[r]);

        let origin_row = if ri.0 == -1 || rj.0 == -1 { rows - 1 } else { 0 };
        let origin_col = if ri.1 == -1 || rj.1 == -1 { cols - 1 } else { 0 };

        let (i, j) = (i as isize, j as isize);
        let mr = origin_row + i * ri.0 + j * rj.0;
        let mc = origin_col + i * ri.1 + j * rj.1;
        matrix[mr as usize][mc as usize]
    }

    /// Whether rotated row `i` has no occupied cell
    pub fn is_line_empty(&self, i: usize) -> bool {
        let (_, m) = self.size();
        (0..m).all(|j| !self.block(i, j))
    }

    /// Absolute `(row, col)` grid coordinates of every occupied cell
    pub fn cells(&self) -> ArrayVec<(isize, isize), MINOS> {
        let (n, m) = self.size();
        let top = self.row - (n / 2) as isize;
        let left = self.col - (m / 2) as isize;

        let mut cells = ArrayVec::new();
        for i in 0..n {
            for j in 0..m {
                if self.block(i, j) {
                    let _ = cells.try_push((top + i as isize, left + j as isize));
                }
            }
        }
        cells
    }

    /// Offset list for the given rotation of this kind
    pub fn kick_offsets(&self, rotation: Rotation) -> &'static [(i8, i8)] {
        offset_table(self.kind)[rotation.index() as usize]
    }
}

/// Try to rotate a piece with SRS offsets.
///
/// Candidates are tried in table order; the translation for candidate `k` is
/// the difference between the old and new rotation's `k`-th offsets. Returns
/// the first candidate accepted by `fits`, or `None` when every candidate is
/// rejected.
pub fn try_rotate(piece: &Piece, clockwise: bool, fits: impl Fn(&Piece) -> bool) -> Option<Piece> {
    let from = piece.rotation;
    let to = if clockwise {
        from.rotate_cw()
    } else {
        from.rotate_ccw()
    };

    let old_offsets = piece.kick_offsets(from);
    let new_offsets = piece.kick_offsets(to);

    for (&(ox, oy), &(nx, ny)) in old_offsets.iter().zip(new_offsets) {
        let dx = (ox - nx) as isize;
        let dy = (oy - ny) as isize;

        let mut candidate = *piece;
        candidate.rotation = to;
        // y points up on the table, rows grow downward on the grid
        candidate.shift(-dy, dx);

        if fits(&candidate) {
            return Some(candidate);
        }
    }

    None
}
