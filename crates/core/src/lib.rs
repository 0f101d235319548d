//! Core game logic - pure, deterministic, and testable
//!
//! This crate contains the rules of the game and nothing else: no clock, no
//! terminal, no global randomness. Everything is driven by
//! [`Game::update`], which takes one logical [`Event`](types::Event) and a
//! monotonic timestamp supplied by the caller.
//!
//! - **Deterministic**: the piece bag takes an injected generator, so the same
//!   seed and the same `(event, timestamp)` stream replay the same game
//! - **Testable**: every rule is reachable through the public API
//! - **Portable**: runs in a terminal, a GUI or headless
//!
//! # Module Structure
//!
//! - [`board`]: flat grid with per-row fill counters, fit checks and line compaction
//! - [`piece`]: tetromino shapes, orientation transform and SRS offset tables
//! - [`bag`]: 7-bag piece sequencer
//! - [`scoring`]: classic line-clear scoring, leveling and NES gravity
//! - [`game`]: the timed state machine
//!
//! # Game Rules
//!
//! - **7-Bag Randomizer**: every bag of seven contains each kind once
//! - **SRS Rotation**: five-candidate offset tables, with separate tables for I and O
//! - **Lock Delay**: 500ms before a grounded piece is committed; a hard drop skips it
//! - **Line Clears**: full rows stay on screen for 500ms before compaction
//! - **Hold**: store one piece for later use (once per lock)
//! - **Scoring**: `[0, 40, 100, 300, 1200][lines] * (level + 1)`, one level per 10 lines
//!
//! # Example
//!
//! ```
//! use std::time::Duration;
//! use tick_tetris_core::Game;
//! use tick_tetris_core::types::{Event, GameState};
//!
//! let mut game = Game::with_seed(22, 10, 2, 12345);
//! assert_eq!(game.state(), GameState::Running);
//!
//! game.update(Event::Left, Duration::from_millis(0));
//! game.update(Event::HardDrop, Duration::from_millis(16));
//! assert_eq!(game.state(), GameState::Locking);
//!
//! // The hard drop skips the lock delay on the next tick
//! game.update(Event::None, Duration::from_millis(32));
//! assert_eq!(game.state(), GameState::Running);
//! assert_eq!(game.board().cells().iter().filter(|c| c.is_some()).count(), 4);
//! ```

pub mod bag;
pub mod board;
pub mod error;
pub mod game;
pub mod piece;
pub mod scoring;

pub use tick_tetris_types as types;

// Re-export commonly used types for convenience
pub use bag::PieceBag;
pub use board::Board;
pub use error::{EngineError, Result};
pub use game::Game;
pub use piece::{try_rotate, Piece};
