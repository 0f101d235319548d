//! Shared types and constants
//!
//! Plain data used by the engine, the input layer and the terminal view.
//! Nothing here depends on the board or on any I/O, so every crate in the
//! workspace can use these types freely.
//!
//! # Board Dimensions
//!
//! The default playfield is 10 columns by 22 rows, of which the top 2 rows are
//! hidden spawn buffer:
//!
//! - **Columns**: `DEFAULT_COLS` (10)
//! - **Rows**: `DEFAULT_ROWS` (22, hidden rows included)
//! - **Hidden rows**: `DEFAULT_HIDDEN_ROWS` (2)
//!
//! # Timing Constants
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `TICK_MS` | 16 | Fixed timestep of the terminal loop (~60 FPS) |
//! | `FRAMES_PER_SECOND` | 60 | Frame rate the gravity table is expressed in |
//! | `LOCK_DELAY` | 500ms | Grace period before a grounded piece is committed |
//! | `CLEAR_DELAY` | 500ms | Duration of the line-clear animation |
//! | `KEY_REPEAT_MS` | 200 | Auto-repeat interval for held keys |
//! | `KEY_RELEASE_TIMEOUT_MS` | 150 | Implicit key release on terminals without release events |
//!
//! # Gravity by Level
//!
//! Frames per row, converted to time at 60 frames per second:
//!
//! | Level | Frames |
//! |-------|--------|
//! | 0-7 | 48 - 5 x level |
//! | 8 | 8 |
//! | 9 | 6 |
//! | 10-12 | 5 |
//! | 13-15 | 4 |
//! | 16-18 | 3 |
//! | 19-28 | 2 |
//! | 29+ | 1 |
//!
//! # Examples
//!
//! ```
//! use tick_tetris_types::{PieceKind, Rotation, Event, DEFAULT_COLS};
//!
//! let kind = PieceKind::T;
//! assert_eq!(kind.color_id(), 2);
//!
//! let rotation = Rotation::North.rotate_cw();
//! assert_eq!(rotation, Rotation::East);
//! assert_eq!(Rotation::try_from(3), Ok(Rotation::West));
//! assert!(Rotation::try_from(4).is_err());
//!
//! assert_eq!(Event::HardDrop.as_str(), "hardDrop");
//! assert_eq!(DEFAULT_COLS, 10);
//! ```

use std::time::Duration;

use thiserror::Error;

/// Default column count
pub const DEFAULT_COLS: usize = 10;

/// Default row count, hidden rows included
pub const DEFAULT_ROWS: usize = 22;

/// Default number of hidden spawn rows above the visible playfield
pub const DEFAULT_HIDDEN_ROWS: usize = 2;

/// Number of upcoming pieces a front end is expected to preview
pub const NEXT_PREVIEW: usize = 3;

/// Fixed timestep interval in milliseconds (16ms ≈ 60 FPS)
pub const TICK_MS: u64 = 16;

/// Frame rate the gravity table is expressed in
pub const FRAMES_PER_SECOND: u32 = 60;

/// Grace period after a piece first becomes unable to descend
pub const LOCK_DELAY: Duration = Duration::from_millis(500);

/// Duration of the line-clear animation before rows are compacted
pub const CLEAR_DELAY: Duration = Duration::from_millis(500);

/// Auto-repeat interval for held keys
pub const KEY_REPEAT_MS: u64 = 200;

/// Held keys are released after this long without a refresh.
///
/// Most terminals never report key releases, so a key that stops being
/// re-reported is treated as released.
pub const KEY_RELEASE_TIMEOUT_MS: u64 = 150;

/// Number of pieces in one bag (one of each kind)
pub const BAG_SIZE: usize = 7;

/// Lines needed to advance one level
pub const LINES_PER_LEVEL: u32 = 10;

/// Line clear scoring table (Classic Nintendo scoring)
///
/// Base points for clearing N lines at level 0:
/// - 0 lines: 0 points
/// - 1 line: 40 points
/// - 2 lines: 100 points
/// - 3 lines: 300 points
/// - 4 lines: 1200 points
///
/// Points are multiplied by (level + 1).
pub const LINE_SCORES: [u32; 5] = [0, 40, 100, 300, 1200];

/// Color identifier stored in filled board cells
pub type ColorId = u8;

/// The seven tetromino piece kinds
///
/// Declaration order is the canonical bag order, and the color id of a kind
/// is its index in that order:
/// - **I**: Cyan, horizontal bar
/// - **O**: Yellow, 2x2 square
/// - **T**: Purple, T-shaped
/// - **S**: Green, S-shaped
/// - **Z**: Red, Z-shaped (mirror of S)
/// - **J**: Blue, J-shaped
/// - **L**: Orange, L-shaped (mirror of J)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    I,
    O,
    T,
    S,
    Z,
    J,
    L,
}

impl PieceKind {
    /// All kinds in canonical order
    pub const ALL: [PieceKind; BAG_SIZE] = [
        PieceKind::I,
        PieceKind::O,
        PieceKind::T,
        PieceKind::S,
        PieceKind::Z,
        PieceKind::J,
        PieceKind::L,
    ];

    /// Color id used when a piece of this kind is committed to the board
    ///
    /// # Examples
    ///
    /// ```
    /// use tick_tetris_types::PieceKind;
    ///
    /// assert_eq!(PieceKind::I.color_id(), 0);
    /// assert_eq!(PieceKind::L.color_id(), 6);
    /// ```
    pub fn color_id(&self) -> ColorId {
        match self {
            PieceKind::I => 0,
            PieceKind::O => 1,
            PieceKind::T => 2,
            PieceKind::S => 3,
            PieceKind::Z => 4,
            PieceKind::J => 5,
            PieceKind::L => 6,
        }
    }

    /// Inverse of [`PieceKind::color_id`]
    pub fn from_color_id(id: ColorId) -> Option<Self> {
        Self::ALL.get(id as usize).copied()
    }

    /// Convert to lowercase string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            PieceKind::I => "i",
            PieceKind::O => "o",
            PieceKind::T => "t",
            PieceKind::S => "s",
            PieceKind::Z => "z",
            PieceKind::J => "j",
            PieceKind::L => "l",
        }
    }
}

/// Rejected rotation value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("rotation must be in 0..=3, got {0}")]
pub struct InvalidRotation(pub u8);

/// Rotation states following the Super Rotation System (SRS)
///
/// - **North**: Spawn orientation (0° rotation)
/// - **East**: Rotated 90° clockwise
/// - **South**: Rotated 180°
/// - **West**: Rotated 90° counter-clockwise (270° clockwise)
///
/// The rotation cycle goes: North → East → South → West → North
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Rotation {
    #[default]
    North,
    East,
    South,
    West,
}

impl Rotation {
    /// Numeric rotation index (0..=3)
    pub fn index(&self) -> u8 {
        match self {
            Rotation::North => 0,
            Rotation::East => 1,
            Rotation::South => 2,
            Rotation::West => 3,
        }
    }

    /// Rotate clockwise (90°)
    ///
    /// # Examples
    ///
    /// ```
    /// use tick_tetris_types::Rotation;
    ///
    /// assert_eq!(Rotation::North.rotate_cw(), Rotation::East);
    /// assert_eq!(Rotation::West.rotate_cw(), Rotation::North);
    /// ```
    pub fn rotate_cw(&self) -> Self {
        match self {
            Rotation::North => Rotation::East,
            Rotation::East => Rotation::South,
            Rotation::South => Rotation::West,
            Rotation::West => Rotation::North,
        }
    }

    /// Rotate counter-clockwise (-90° or 270°)
    ///
    /// # Examples
    ///
    /// ```
    /// use tick_tetris_types::Rotation;
    ///
    /// assert_eq!(Rotation::North.rotate_ccw(), Rotation::West);
    /// assert_eq!(Rotation::East.rotate_ccw(), Rotation::North);
    /// ```
    pub fn rotate_ccw(&self) -> Self {
        match self {
            Rotation::North => Rotation::West,
            Rotation::West => Rotation::South,
            Rotation::South => Rotation::East,
            Rotation::East => Rotation::North,
        }
    }
}

impl TryFrom<u8> for Rotation {
    type Error = InvalidRotation;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Rotation::North),
            1 => Ok(Rotation::East),
            2 => Ok(Rotation::South),
            3 => Ok(Rotation::West),
            _ => Err(InvalidRotation(value)),
        }
    }
}

/// Logical input events consumed by the engine, at most one per tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Event {
    /// Nothing happened this tick
    #[default]
    None,
    /// Move piece one column left
    Left,
    /// Move piece one column right
    Right,
    /// Move piece one row down
    SoftDrop,
    /// Drop piece to its lowest legal row and skip the lock delay
    HardDrop,
    /// Rotate piece 90° clockwise
    RotateRight,
    /// Rotate piece 90° counter-clockwise
    RotateLeft,
    /// Swap current piece into the hold slot
    Hold,
    /// Pause, or resume when paused
    TogglePause,
    /// Leave the game
    Quit,
}

impl Event {
    /// Convert to camelCase string (used in logs)
    pub fn as_str(&self) -> &'static str {
        match self {
            Event::None => "none",
            Event::Left => "left",
            Event::Right => "right",
            Event::SoftDrop => "softDrop",
            Event::HardDrop => "hardDrop",
            Event::RotateRight => "rotateRight",
            Event::RotateLeft => "rotateLeft",
            Event::Hold => "hold",
            Event::TogglePause => "togglePause",
            Event::Quit => "quit",
        }
    }
}

/// Lifecycle of a game
///
/// `NotStarted` is never entered by the engine, which begins in `Running`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum GameState {
    #[default]
    NotStarted,
    Running,
    Locking,
    Clearing,
    Paused,
    GameOver,
    Quitting,
}

impl GameState {
    /// No further piece mutation is accepted in terminal states.
    pub fn is_terminal(&self) -> bool {
        matches!(self, GameState::GameOver | GameState::Quitting)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            GameState::NotStarted => "notStarted",
            GameState::Running => "running",
            GameState::Locking => "locking",
            GameState::Clearing => "clearing",
            GameState::Paused => "paused",
            GameState::GameOver => "gameOver",
            GameState::Quitting => "quitting",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timing_defaults() {
        assert_eq!(LOCK_DELAY, Duration::from_millis(500));
        assert_eq!(CLEAR_DELAY, Duration::from_millis(500));
        assert_eq!(FRAMES_PER_SECOND, 60);
        assert_eq!(KEY_REPEAT_MS, 200);
        assert_eq!(KEY_RELEASE_TIMEOUT_MS, 150);
    }

    #[test]
    fn color_ids_follow_canonical_order() {
        for (i, kind) in PieceKind::ALL.iter().enumerate() {
            assert_eq!(kind.color_id() as usize, i);
            assert_eq!(PieceKind::from_color_id(i as u8), Some(*kind));
        }
        assert_eq!(PieceKind::from_color_id(7), None);
    }

    #[test]
    fn rotation_index_roundtrip() {
        for value in 0..4u8 {
            let rotation = Rotation::try_from(value).unwrap();
            assert_eq!(rotation.index(), value);
        }
        assert_eq!(Rotation::try_from(4), Err(InvalidRotation(4)));
        assert_eq!(Rotation::try_from(255), Err(InvalidRotation(255)));
    }

    #[test]
    fn cw_and_ccw_are_inverse() {
        for value in 0..4u8 {
            let rotation = Rotation::try_from(value).unwrap();
            assert_eq!(rotation.rotate_cw().rotate_ccw(), rotation);
        }
    }

    #[test]
    fn terminal_states() {
        assert!(GameState::GameOver.is_terminal());
        assert!(GameState::Quitting.is_terminal());
        assert!(!GameState::Paused.is_terminal());
        assert!(!GameState::Running.is_terminal());
    }
}
