//! 7-bag piece sequencer
//!
//! Upcoming pieces sit in a queue that is topped up one shuffled bag at a
//! time, so each run of seven pieces from a bag holds every kind exactly once.
//! The random generator is injected; seeding it makes the sequence
//! reproducible.

use std::collections::VecDeque;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::piece::Piece;
use crate::types::{PieceKind, BAG_SIZE};

/// Queue of upcoming pieces fed by a randomized 7-bag
#[derive(Debug, Clone)]
pub struct PieceBag<R = StdRng> {
    queue: VecDeque<Piece>,
    rng: R,
}

impl PieceBag<StdRng> {
    /// Deterministic bag for a given seed
    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }

    /// Bag seeded from the operating system
    pub fn from_entropy() -> Self {
        Self::new(StdRng::from_os_rng())
    }
}

impl<R: Rng> PieceBag<R> {
    pub fn new(rng: R) -> Self {
        let mut bag = Self {
            queue: VecDeque::with_capacity(BAG_SIZE * 2 + 1),
            rng,
        };
        bag.refill();
        bag
    }

    /// Append one shuffled bag.
    ///
    /// Kind `i` is inserted at a uniform position among the last `i + 1`
    /// slots of the growing tail, which yields a uniform permutation.
    fn push_bag(&mut self) {
        for (i, kind) in PieceKind::ALL.into_iter().enumerate() {
            let at = self.queue.len() - i + self.rng.random_range(0..=i);
            self.queue.insert(at, Piece::new(kind));
        }
    }

    fn refill(&mut self) {
        while self.queue.len() < BAG_SIZE {
            self.push_bag();
        }
    }

    /// Remove and return the next piece, topping up the queue afterwards
    pub fn pop_next(&mut self) -> Piece {
        let piece = match self.queue.pop_front() {
            Some(piece) => piece,
            None => {
                self.push_bag();
                return self.pop_next();
            }
        };
        self.refill();
        piece
    }
}

impl<R> PieceBag<R> {
    /// Put a piece back at the head of the queue
    pub fn push_front(&mut self, piece: Piece) {
        self.queue.push_front(piece);
    }

    pub fn front(&self) -> Option<&Piece> {
        self.queue.front()
    }

    /// First `n` upcoming pieces
    pub fn peek(&self, n: usize) -> impl Iterator<Item = &Piece> + '_ {
        self.queue.iter().take(n)
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}
