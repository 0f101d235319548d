//! Game module - the tick-driven state machine
//!
//! [`Game`] ties the board, the active and held pieces and the piece bag
//! together. [`Game::update`] is the only mutator: each call consumes one
//! logical event plus the caller's monotonic timestamp, then advances the
//! gravity, lock and clear timers by comparing against that timestamp.

use std::time::Duration;

use rand::rngs::StdRng;
use rand::Rng;
use tracing::{debug, info, trace};

use crate::bag::PieceBag;
use crate::board::Board;
use crate::piece::{try_rotate, Piece};
use crate::scoring::{gravity, level_for_lines, line_clear_score};
use crate::types::{Event, GameState, Rotation, CLEAR_DELAY, LOCK_DELAY};

/// Complete game state
#[derive(Debug, Clone)]
pub struct Game<R = StdRng> {
    board: Board,
    hidden_rows: usize,
    current: Option<Piece>,
    held: Option<Piece>,
    bag: PieceBag<R>,
    level: u32,
    score: u32,
    lines: u32,
    state: GameState,
    drop_time: Duration,
    clear_time: Duration,
    lock_time: Duration,
    cancel_lock_delay: bool,
    can_hold: bool,
}

impl Game<StdRng> {
    /// Create a game whose piece sequence is fixed by `seed`
    pub fn with_seed(rows: usize, cols: usize, hidden_rows: usize, seed: u64) -> Self {
        Self::with_bag(rows, cols, hidden_rows, PieceBag::seeded(seed))
    }

    /// Create a game with an OS-seeded piece sequence
    pub fn from_entropy(rows: usize, cols: usize, hidden_rows: usize) -> Self {
        Self::with_bag(rows, cols, hidden_rows, PieceBag::from_entropy())
    }
}

impl<R: Rng> Game<R> {
    /// Create a running game drawing pieces from `rng` and spawn its first
    /// piece.
    ///
    /// `rows` includes the `hidden_rows` spawn buffer. Timers start at zero, so
    /// timestamps passed to [`Game::update`] are durations since game start.
    pub fn new(rows: usize, cols: usize, hidden_rows: usize, rng: R) -> Self {
        Self::with_bag(rows, cols, hidden_rows, PieceBag::new(rng))
    }

    /// Create a running game over an existing bag
    pub fn with_bag(rows: usize, cols: usize, hidden_rows: usize, bag: PieceBag<R>) -> Self {
        let mut game = Self {
            board: Board::new(rows, cols),
            hidden_rows,
            current: None,
            held: None,
            bag,
            level: 0,
            score: 0,
            lines: 0,
            state: GameState::Running,
            drop_time: Duration::ZERO,
            clear_time: Duration::ZERO,
            lock_time: Duration::ZERO,
            cancel_lock_delay: false,
            can_hold: true,
        };
        game.spawn();
        game
    }
}

/// Read-only view, available for any generator
impl<R> Game<R> {
    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn hidden_rows(&self) -> usize {
        self.hidden_rows
    }

    /// Active piece; `None` while clearing, after game over
    pub fn current(&self) -> Option<&Piece> {
        self.current.as_ref()
    }

    pub fn held(&self) -> Option<&Piece> {
        self.held.as_ref()
    }

    /// First `n` pieces of the next-queue
    pub fn next_pieces(&self, n: usize) -> impl Iterator<Item = &Piece> + '_ {
        self.bag.peek(n)
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    /// Total lines cleared
    pub fn lines(&self) -> u32 {
        self.lines
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn can_hold(&self) -> bool {
        self.can_hold
    }

    /// Current time per row
    pub fn gravity(&self) -> Duration {
        gravity(self.level)
    }

    /// When the running clear animation started
    pub fn clear_started_at(&self) -> Option<Duration> {
        (self.state == GameState::Clearing).then_some(self.clear_time)
    }

    /// The active piece dropped to its lowest legal row
    pub fn ghost(&self) -> Option<Piece> {
        self.current.map(|piece| self.dropped(piece))
    }

    fn dropped(&self, mut piece: Piece) -> Piece {
        while self.board.fits(&piece.shifted(1, 0)) {
            piece.shift(1, 0);
        }
        piece
    }
}

impl<R: Rng> Game<R> {
    /// Advance the game by one tick.
    ///
    /// `now` must not go backwards; an earlier timestamp only fails to
    /// advance the timers.
    pub fn update(&mut self, event: Event, now: Duration) {
        if self.state == GameState::Quitting {
            return;
        }

        self.handle_event(event, now);

        if now.saturating_sub(self.drop_time) >= self.gravity() {
            self.handle_event(Event::SoftDrop, now);
        }

        if event == Event::Quit {
            info!(score = self.score, lines = self.lines, "quitting");
            self.state = GameState::Quitting;
            return;
        }

        if self.state == GameState::Clearing
            && now.saturating_sub(self.clear_time) >= CLEAR_DELAY
        {
            let cleared = self.board.clear();
            self.award(cleared);
            self.state = GameState::Running;
            self.drop_time = now;
            self.spawn();
        }

        if self.state == GameState::Locking
            && (now.saturating_sub(self.lock_time) >= LOCK_DELAY || self.cancel_lock_delay)
        {
            self.can_hold = true;
            self.cancel_lock_delay = false;
            self.lock(now);
        }

        if self.state == GameState::Running && !self.can_move_down() {
            self.state = GameState::Locking;
            self.lock_time = now;
            self.can_hold = false;
        }
    }

    fn handle_event(&mut self, event: Event, now: Duration) {
        match self.state {
            GameState::Clearing | GameState::GameOver | GameState::Quitting => return,
            GameState::Paused => {
                if event == Event::TogglePause {
                    debug!("resumed");
                    self.state = GameState::Running;
                }
                return;
            }
            GameState::NotStarted | GameState::Running | GameState::Locking => {}
        }

        match event {
            Event::None | Event::Quit => {}
            Event::Left => {
                self.try_shift(0, -1);
            }
            Event::Right => {
                self.try_shift(0, 1);
            }
            Event::SoftDrop => {
                self.try_shift(1, 0);
                self.drop_time = now;
            }
            Event::HardDrop => {
                if let Some(piece) = self.current {
                    self.current = Some(self.dropped(piece));
                }
                self.cancel_lock_delay = true;
                self.drop_time = now;
            }
            Event::RotateRight => self.rotate(true),
            Event::RotateLeft => self.rotate(false),
            Event::Hold => {
                if self.can_hold {
                    self.hold();
                    self.can_hold = false;
                }
            }
            Event::TogglePause => {
                debug!("paused");
                self.state = GameState::Paused;
            }
        }
    }

    /// Move the active piece, reverting when it would not fit
    fn try_shift(&mut self, d_row: isize, d_col: isize) -> bool {
        let Some(piece) = self.current else {
            return false;
        };
        let moved = piece.shifted(d_row, d_col);
        if self.board.fits(&moved) {
            self.current = Some(moved);
            true
        } else {
            false
        }
    }

    fn rotate(&mut self, clockwise: bool) {
        let Some(piece) = self.current else {
            return;
        };
        match try_rotate(&piece, clockwise, |p| self.board.fits(p)) {
            Some(rotated) => self.current = Some(rotated),
            None => trace!(kind = piece.kind().as_str(), clockwise, "rotation blocked"),
        }
    }

    fn hold(&mut self) {
        let Some(mut piece) = self.current.take() else {
            return;
        };
        if let Some(previous) = self.held.take() {
            self.bag.push_front(previous);
        }
        piece.set_rotation_to(Rotation::North);
        debug!(kind = piece.kind().as_str(), "held piece");
        self.held = Some(piece);
        self.spawn();
    }

    /// Take the next piece from the bag and place it below the hidden rows
    fn spawn(&mut self) {
        let mut piece = self.bag.pop_next();
        let (n, _) = piece.size();
        let row = (self.hidden_rows + n / 2) as isize;
        let col = (self.board.cols() / 2) as isize - 1;
        piece.set_position(row, col);

        if self.board.fits(&piece) {
            debug!(kind = piece.kind().as_str(), row, col, "spawned piece");
            self.current = Some(piece);
        } else {
            info!(
                kind = piece.kind().as_str(),
                score = self.score,
                lines = self.lines,
                "game over"
            );
            self.current = None;
            self.state = GameState::GameOver;
        }
    }

    /// Commit the active piece at its lowest legal row
    fn lock(&mut self, now: Duration) {
        let Some(piece) = self.current else {
            unreachable!("locking without an active piece");
        };

        let piece = self.dropped(piece);
        if let Err(err) = self.board.add(&piece) {
            unreachable!("active piece always fits the board: {err}");
        }
        debug!(
            kind = piece.kind().as_str(),
            row = piece.row(),
            col = piece.col(),
            "locked piece"
        );

        if self.board.can_clear_lines() {
            debug!(rows = self.board.full_row_count(), "clearing lines");
            self.current = None;
            self.state = GameState::Clearing;
            self.clear_time = now;
        } else {
            self.state = GameState::Running;
            self.spawn();
        }
    }

    fn award(&mut self, cleared: usize) {
        self.score = self.score.saturating_add(line_clear_score(cleared, self.level));
        self.lines = self.lines.saturating_add(cleared as u32);
        self.level = level_for_lines(self.lines);
        debug!(
            cleared,
            score = self.score,
            lines = self.lines,
            level = self.level,
            "cleared lines"
        );
    }

    fn can_move_down(&self) -> bool {
        self.current
            .is_some_and(|piece| self.board.fits(&piece.shifted(1, 0)))
    }
}
