//! Scoring module - classic line-clear scoring, leveling and gravity

use std::time::Duration;

use crate::types::{FRAMES_PER_SECOND, LINES_PER_LEVEL, LINE_SCORES};

/// Calculate line clear score (Classic rules)
/// lines: number of lines cleared (0-4)
/// level: level before the clear (0-based)
pub fn line_clear_score(lines: usize, level: u32) -> u32 {
    LINE_SCORES.get(lines).copied().unwrap_or(0) * (level + 1)
}

/// Level management
/// Level increases every 10 lines cleared
pub fn level_for_lines(total_lines: u32) -> u32 {
    total_lines / LINES_PER_LEVEL
}

/// Frames per row for a level (NES table)
pub fn gravity_frames(level: u32) -> u32 {
    match level {
        0..=7 => 48 - 5 * level,
        8 => 8,
        9 => 6,
        10..=12 => 5,
        13..=15 => 4,
        16..=18 => 3,
        19..=28 => 2,
        _ => 1,
    }
}

/// Time per row for a level
pub fn gravity(level: u32) -> Duration {
    Duration::from_secs(gravity_frames(level) as u64) / FRAMES_PER_SECOND
}
