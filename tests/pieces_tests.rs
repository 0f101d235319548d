//! Piece tests - shapes, rotation transform and SRS kicks against a board

use tick_tetris::core::{try_rotate, Board, EngineError, Piece};
use tick_tetris::types::{PieceKind, Rotation};

fn picture(piece: &Piece) -> Vec<String> {
    let (n, m) = piece.size();
    (0..n)
        .map(|i| {
            (0..m)
                .map(|j| if piece.block(i, j) { '#' } else { '.' })
                .collect()
        })
        .collect()
}

fn rotate_on(board: &Board, piece: &Piece, clockwise: bool) -> Option<Piece> {
    try_rotate(piece, clockwise, |p| board.fits(p))
}

#[test]
fn test_every_kind_has_four_cells_in_every_rotation() {
    for kind in PieceKind::ALL {
        let mut piece = Piece::new(kind);
        for r in 0..4 {
            piece.set_rotation(r).unwrap();
            assert_eq!(piece.cells().len(), 4, "{kind:?} rotation {r}");
        }
    }
}

#[test]
fn test_s_piece_orientations() {
    let mut piece = Piece::new(PieceKind::S);
    assert_eq!(picture(&piece), [".##", "##.", "..."]);

    piece.set_rotation_to(Rotation::East);
    assert_eq!(picture(&piece), [".#.", ".##", "..#"]);

    piece.set_rotation_to(Rotation::South);
    assert_eq!(picture(&piece), ["...", ".##", "##."]);

    piece.set_rotation_to(Rotation::West);
    assert_eq!(picture(&piece), ["#..", "##.", ".#."]);
}

#[test]
fn test_empty_lines_bound_the_drawn_shape() {
    let piece = Piece::new(PieceKind::I);
    let drawn: Vec<usize> = (0..piece.size().0)
        .filter(|&i| !piece.is_line_empty(i))
        .collect();
    assert_eq!(drawn, [2]);
}

#[test]
fn test_set_rotation_out_of_range_is_an_error() {
    let mut piece = Piece::new(PieceKind::L);
    piece.set_rotation(3).unwrap();

    let err = piece.set_rotation(7).unwrap_err();
    assert!(matches!(err, EngineError::InvalidRotation(_)));
    assert_eq!(err.to_string(), "rotation must be in 0..=3, got 7");
    assert_eq!(piece.rotation(), Rotation::West);
}

#[test]
fn test_four_ccw_rotations_in_open_space_return_home() {
    let board = Board::new(22, 10);
    for kind in PieceKind::ALL {
        let mut piece = Piece::new(kind);
        piece.set_position(10, 4);
        let start = piece;
        for _ in 0..4 {
            piece = rotate_on(&board, &piece, false).unwrap();
        }
        assert_eq!(piece, start, "{kind:?}");
    }
}

#[test]
fn test_cw_then_ccw_is_identity_in_open_space() {
    let board = Board::new(22, 10);
    for kind in PieceKind::ALL {
        let mut piece = Piece::new(kind);
        piece.set_position(10, 4);
        let turned = rotate_on(&board, &piece, true).unwrap();
        let back = rotate_on(&board, &turned, false).unwrap();
        assert_eq!(back, piece, "{kind:?}");
    }
}

#[test]
fn test_bar_kicks_off_left_wall() {
    let board = Board::new(22, 10);
    let mut bar = Piece::new(PieceKind::I);
    bar.set_rotation_to(Rotation::East);
    bar.set_position(10, 0);
    assert!(board.fits(&bar));

    // Lying flat in place would stick out to the left.
    let rotated = rotate_on(&board, &bar, true).unwrap();
    assert_eq!(rotated.rotation(), Rotation::South);
    assert_eq!((rotated.row(), rotated.col()), (11, 2));
    assert!(board.fits(&rotated));
}

#[test]
fn test_t_kicks_up_off_the_floor() {
    let board = Board::new(20, 10);
    let mut t = Piece::new(PieceKind::T);
    t.set_position(19, 4);
    assert!(board.fits(&t));

    let rotated = rotate_on(&board, &t, true).unwrap();
    assert_eq!(rotated.rotation(), Rotation::East);
    assert_eq!((rotated.row(), rotated.col()), (18, 3));
}

#[test]
fn test_rotation_blocked_everywhere_is_rejected() {
    let mut board = Board::new(20, 10);
    for row in 0..20 {
        for col in 0..10 {
            board.set(row, col, Some(0));
        }
    }
    let mut t = Piece::new(PieceKind::T);
    t.set_position(10, 4);
    for (row, col) in t.cells() {
        board.set(row, col, None);
    }

    assert!(board.fits(&t));
    assert_eq!(rotate_on(&board, &t, true), None);
    assert_eq!(rotate_on(&board, &t, false), None);
}

#[test]
fn test_o_piece_rotation_never_moves_cells() {
    let board = Board::new(20, 10);
    let mut o = Piece::new(PieceKind::O);
    o.set_position(10, 4);
    let mut cells = o.cells().to_vec();
    cells.sort();

    let mut piece = o;
    for _ in 0..4 {
        piece = rotate_on(&board, &piece, true).unwrap();
        let mut now = piece.cells().to_vec();
        now.sort();
        assert_eq!(now, cells);
    }
}
