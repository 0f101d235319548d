//! Integration tests for the game loop: engine plus input handler

use std::time::Duration;

use crossterm::event::KeyCode;

use tick_tetris::core::Game;
use tick_tetris::input::InputHandler;
use tick_tetris::types::{Event, GameState, PieceKind};

fn ms(millis: u64) -> Duration {
    Duration::from_millis(millis)
}

/// Fresh game whose first piece is `kind`.
fn game_starting_with(kind: PieceKind, rows: usize, hidden: usize) -> Game {
    (0u64..)
        .map(|seed| Game::with_seed(rows, 10, hidden, seed))
        .find(|game| game.current().map(|p| p.kind()) == Some(kind))
        .unwrap()
}

fn filled(game: &Game) -> usize {
    game.board().cells().iter().filter(|c| c.is_some()).count()
}

#[test]
fn test_game_lifecycle() {
    let game = Game::with_seed(22, 10, 2, 12345);
    assert_eq!(game.state(), GameState::Running);
    assert!(game.current().is_some());
    assert!(game.held().is_none());
    assert!(game.can_hold());
    assert_eq!((game.score(), game.level(), game.lines()), (0, 0, 0));
    assert_eq!(game.next_pieces(3).count(), 3);
    assert_eq!(game.gravity(), ms(800));
}

#[test]
fn test_bar_hard_drop_lands_on_bottom_row() {
    let mut game = game_starting_with(PieceKind::I, 20, 0);
    let bar = *game.current().unwrap();
    assert_eq!(bar.row(), 2);

    game.update(Event::HardDrop, ms(0));
    assert_eq!(game.state(), GameState::Locking);
    game.update(Event::None, ms(16));

    assert_eq!(game.state(), GameState::Running);
    assert!(!game.board().can_clear_lines());
    assert_eq!(game.board().row_fill(19), 4);
    for col in 3..7 {
        assert!(game.board().is_filled(19, col), "col {col}");
    }
    assert_eq!(filled(&game), 4);
}

#[test]
fn test_hard_drop_while_locking_commits_immediately() {
    let mut game = Game::with_seed(22, 10, 2, 3);
    let mut t = 0;
    while game.state() != GameState::Locking {
        game.update(Event::SoftDrop, ms(t));
        t += 16;
    }
    assert_eq!(filled(&game), 0);

    // Well inside the lock delay.
    game.update(Event::HardDrop, ms(t));
    assert_eq!(game.state(), GameState::Running);
    assert_eq!(filled(&game), 4);
}

#[test]
fn test_second_hold_before_lock_is_ignored() {
    let mut game = Game::with_seed(22, 10, 2, 8);
    let first = game.current().unwrap().kind();

    game.update(Event::Hold, ms(0));
    assert_eq!(game.held().map(|p| p.kind()), Some(first));
    assert!(!game.can_hold());
    let current = *game.current().unwrap();

    game.update(Event::Hold, ms(16));
    assert_eq!(game.held().map(|p| p.kind()), Some(first));
    assert_eq!(game.current(), Some(&current));
}

#[test]
fn test_pause_freezes_piece_and_timers() {
    let mut game = Game::with_seed(22, 10, 2, 4);
    game.update(Event::TogglePause, ms(0));
    assert_eq!(game.state(), GameState::Paused);
    let piece = *game.current().unwrap();

    game.update(Event::Left, ms(16));
    game.update(Event::HardDrop, ms(32));
    game.update(Event::None, ms(10_000));
    assert_eq!(game.state(), GameState::Paused);
    assert_eq!(game.current(), Some(&piece));

    game.update(Event::TogglePause, ms(10_016));
    assert_eq!(game.state(), GameState::Running);
}

#[test]
fn test_quit_is_terminal() {
    let mut game = Game::with_seed(22, 10, 2, 4);
    game.update(Event::Quit, ms(0));
    assert_eq!(game.state(), GameState::Quitting);

    let piece = game.current().copied();
    game.update(Event::TogglePause, ms(16));
    game.update(Event::HardDrop, ms(5_000));
    assert_eq!(game.state(), GameState::Quitting);
    assert_eq!(game.current().copied(), piece);
}

#[test]
fn test_stacking_in_the_middle_ends_in_game_over() {
    let mut game = Game::with_seed(22, 10, 2, 99);
    let mut t = 0;
    for _ in 0..500 {
        if game.state() == GameState::GameOver {
            break;
        }
        game.update(Event::HardDrop, ms(t));
        game.update(Event::None, ms(t + 16));
        t += 32;
    }

    assert_eq!(game.state(), GameState::GameOver);
    assert!(game.current().is_none());
    assert_eq!(game.lines(), 0);

    let board = game.board().clone();
    game.update(Event::HardDrop, ms(t + 1_000));
    game.update(Event::TogglePause, ms(t + 2_000));
    assert_eq!(game.state(), GameState::GameOver);
    assert_eq!(game.board(), &board);
}

#[test]
fn test_same_seed_and_script_replay_identically() {
    let script = [
        Event::Left,
        Event::RotateRight,
        Event::None,
        Event::HardDrop,
        Event::None,
        Event::Right,
        Event::Right,
        Event::Hold,
        Event::SoftDrop,
        Event::HardDrop,
        Event::None,
        Event::RotateLeft,
    ];

    let play = || {
        let mut game = Game::with_seed(22, 10, 2, 2024);
        for (i, &event) in script.iter().cycle().take(300).enumerate() {
            game.update(event, ms(i as u64 * 16));
        }
        game
    };

    let (a, b) = (play(), play());
    assert_eq!(a.board(), b.board());
    assert_eq!(a.current(), b.current());
    assert_eq!(a.held(), b.held());
    assert_eq!((a.score(), a.lines(), a.state()), (b.score(), b.lines(), b.state()));
}

#[test]
fn test_gravity_moves_piece_down_without_input() {
    let mut game = Game::with_seed(22, 10, 2, 6);
    let row = game.current().unwrap().row();

    game.update(Event::None, ms(799));
    assert_eq!(game.current().unwrap().row(), row);
    game.update(Event::None, ms(800));
    assert_eq!(game.current().unwrap().row(), row + 1);
}

#[test]
fn test_input_handler_drives_game() {
    let mut game = game_starting_with(PieceKind::T, 22, 2);
    let mut input = InputHandler::new();
    let col = game.current().unwrap().col();

    // Held key, re-reported by the terminal every 100ms.
    input.handle_key_press(KeyCode::Left, ms(0));
    for t in (0..=224).step_by(16) {
        if t % 100 < 16 {
            input.handle_key_press(KeyCode::Left, ms(t));
        }
        let event = input.poll(ms(t));
        game.update(event, ms(t));
    }

    // Fired at 0 and again at 208, the first tick past the repeat delay.
    assert_eq!(game.current().unwrap().col(), col - 2);

    input.handle_key_release(KeyCode::Left);
    game.update(input.poll(ms(240)), ms(240));
    game.update(input.poll(ms(400)), ms(400));
    assert_eq!(game.current().unwrap().col(), col - 2);
}

#[test]
fn test_input_handler_hard_drop_fires_once() {
    let mut game = Game::with_seed(22, 10, 2, 11);
    let mut input = InputHandler::new();

    input.handle_key_press(KeyCode::Char(' '), ms(0));
    game.update(input.poll(ms(0)), ms(0));
    game.update(input.poll(ms(16)), ms(16));
    assert_eq!(filled(&game), 4);

    // Still held: no second drop.
    input.handle_key_press(KeyCode::Char(' '), ms(32));
    game.update(input.poll(ms(32)), ms(32));
    game.update(input.poll(ms(48)), ms(48));
    assert_eq!(filled(&game), 4);
}
