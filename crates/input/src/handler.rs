//! Key-repeat input handler for terminal environments.
//!
//! Produces at most one [`Event`] per tick. A held key fires on the first
//! tick after it is pressed and then every repeat interval; one-shot keys
//! (hard drop, hold, pause) fire once per press. When several keys are due in
//! the same tick the highest-priority one wins and the others wait.
//!
//! Supports terminals that do not emit key release events by using a timeout.

use std::time::Duration;

use arrayvec::ArrayVec;
use crossterm::event::KeyCode;

use crate::map::key_to_event;
use crate::types::{Event, KEY_RELEASE_TIMEOUT_MS, KEY_REPEAT_MS};

const MAX_HELD: usize = 8;

/// Polling order when several keys are due in the same tick
const PRIORITY: [Event; MAX_HELD] = [
    Event::Left,
    Event::Right,
    Event::SoftDrop,
    Event::RotateRight,
    Event::RotateLeft,
    Event::HardDrop,
    Event::Hold,
    Event::TogglePause,
];

/// Whether holding the key for `event` keeps producing it
pub fn repeats(event: Event) -> bool {
    !matches!(
        event,
        Event::None | Event::HardDrop | Event::Hold | Event::TogglePause | Event::Quit
    )
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct HeldKey {
    event: Event,
    /// Last time the terminal reported the key
    last_seen: Duration,
    /// When the key fires next; `None` once a one-shot key has fired
    next_fire: Option<Duration>,
}

/// Tracks held keys and their repeat timers.
#[derive(Debug, Clone)]
pub struct InputHandler {
    held: ArrayVec<HeldKey, MAX_HELD>,
    repeat: Duration,
    key_release_timeout: Duration,
}

impl InputHandler {
    pub fn new() -> Self {
        Self::with_config(KEY_REPEAT_MS)
    }

    pub fn with_config(repeat_ms: u64) -> Self {
        Self {
            held: ArrayVec::new(),
            repeat: Duration::from_millis(repeat_ms),
            key_release_timeout: Duration::from_millis(KEY_RELEASE_TIMEOUT_MS),
        }
    }

    pub fn with_key_release_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.key_release_timeout = Duration::from_millis(timeout_ms);
        self
    }

    pub fn key_release_timeout_ms(&self) -> u64 {
        self.key_release_timeout.as_millis() as u64
    }

    pub fn repeat_ms(&self) -> u64 {
        self.repeat.as_millis() as u64
    }

    /// Record a key press (or a terminal re-report of a held key).
    ///
    /// Returns the mapped event, if any. The event itself is produced by
    /// [`InputHandler::poll`].
    pub fn handle_key_press(&mut self, code: KeyCode, now: Duration) -> Option<Event> {
        let event = key_to_event(code)?;
        match self.held.iter_mut().find(|key| key.event == event) {
            Some(key) => key.last_seen = now,
            None => {
                let _ = self.held.try_push(HeldKey {
                    event,
                    last_seen: now,
                    next_fire: Some(now),
                });
            }
        }
        Some(event)
    }

    pub fn handle_key_release(&mut self, code: KeyCode) {
        if let Some(event) = key_to_event(code) {
            self.held.retain(|key| key.event != event);
        }
    }

    /// Produce this tick's event.
    pub fn poll(&mut self, now: Duration) -> Event {
        // Auto-release when terminal does not emit release events.
        let timeout = self.key_release_timeout;
        self.held
            .retain(|key| now.saturating_sub(key.last_seen) <= timeout);

        let repeat = self.repeat;
        for event in PRIORITY {
            let Some(key) = self.held.iter_mut().find(|key| key.event == event) else {
                continue;
            };
            if let Some(at) = key.next_fire {
                if at <= now {
                    key.next_fire = repeats(event).then(|| now + repeat);
                    return event;
                }
            }
        }

        Event::None
    }

    /// Whether any key is currently considered held
    pub fn is_idle(&self) -> bool {
        self.held.is_empty()
    }

    pub fn reset(&mut self) {
        self.held.clear();
    }
}

impl Default for InputHandler {
    fn default() -> Self {
        Self::new()
    }
}
