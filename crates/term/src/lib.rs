//! Terminal "game renderer" module.
//!
//! A small, game-oriented rendering layer for terminal gameplay. It renders
//! into a plain framebuffer that is then flushed to the terminal, instead of
//! going through a widget/layout toolkit.
//!
//! - [`GameView`] is pure: it reads a [`Game`](core::Game) and fills a
//!   [`FrameBuffer`]
//! - [`TerminalRenderer`] owns the terminal and writes only what changed
//! - Board cells are drawn 2 chars wide to keep them roughly square

pub mod fb;
pub mod game_view;
pub mod renderer;

pub use tick_tetris_core as core;
pub use tick_tetris_types as types;

pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use game_view::{color_of, AnchorY, GameView, Viewport};
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};
