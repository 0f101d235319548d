//! Terminal input module (engine-facing).
//!
//! Maps `crossterm` key codes to logical [`Event`](types::Event)s and turns
//! raw key state into at most one event per tick. Keys that stop being
//! reported are released after a timeout, for terminals that never emit
//! key-release events.

pub mod handler;
pub mod map;

pub use tick_tetris_types as types;

pub use handler::InputHandler;
pub use map::{handle_key_event, key_to_event, should_quit};
