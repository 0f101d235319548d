//! GameView: maps a [`Game`] into a terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.

use std::time::Duration;

use crate::core::{Game, Piece};
use crate::fb::{CellStyle, FrameBuffer, Rgb};
use crate::types::{ColorId, GameState, PieceKind, CLEAR_DELAY, NEXT_PREVIEW};

const BOARD_BG: Rgb = Rgb::new(30, 30, 40);
const PANEL_BG: Rgb = Rgb::new(0, 0, 0);
const BLOCK: char = '█';
const GHOST: char = '░';
const EMPTY: char = '·';

/// Terminal viewport dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnchorY {
    Center,
    Top,
}

/// A lightweight terminal renderer for the game.
#[derive(Debug, Clone, Copy)]
pub struct GameView {
    /// Board cell width in terminal columns.
    cell_w: u16,
    /// Board cell height in terminal rows.
    cell_h: u16,
    anchor_y: AnchorY,
}

impl Default for GameView {
    fn default() -> Self {
        // 2x1 helps compensate for typical terminal glyph aspect ratio.
        Self::new(2, 1)
    }
}

/// Screen origin of the board frame plus its size in cells
#[derive(Debug, Clone, Copy)]
struct Frame {
    x: u16,
    y: u16,
    w: u16,
    h: u16,
}

/// Foreground color of a piece kind
pub fn color_of(id: ColorId) -> Rgb {
    match PieceKind::from_color_id(id) {
        Some(PieceKind::I) => Rgb::new(80, 220, 220),
        Some(PieceKind::O) => Rgb::new(240, 220, 80),
        Some(PieceKind::T) => Rgb::new(200, 120, 220),
        Some(PieceKind::S) => Rgb::new(100, 220, 120),
        Some(PieceKind::Z) => Rgb::new(220, 80, 80),
        Some(PieceKind::J) => Rgb::new(80, 120, 220),
        Some(PieceKind::L) => Rgb::new(255, 165, 0),
        None => Rgb::new(160, 160, 160),
    }
}

impl GameView {
    pub fn new(cell_w: u16, cell_h: u16) -> Self {
        Self {
            cell_w: cell_w.max(1),
            cell_h: cell_h.max(1),
            anchor_y: AnchorY::Center,
        }
    }

    pub fn with_anchor_y(mut self, anchor_y: AnchorY) -> Self {
        self.anchor_y = anchor_y;
        self
    }

    /// Render the game as of `now` into an existing framebuffer.
    ///
    /// Callers can reuse a framebuffer across frames; it is only resized
    /// when the viewport changes. Hidden spawn rows are not drawn.
    pub fn render_into<R>(
        &self,
        game: &Game<R>,
        now: Duration,
        viewport: Viewport,
        fb: &mut FrameBuffer,
    ) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(CellStyle::new(Rgb::new(220, 220, 220), PANEL_BG).cell(' '));

        let board = game.board();
        let hidden = game.hidden_rows();
        let visible_rows = board.rows().saturating_sub(hidden) as u16;
        let cols = board.cols() as u16;

        let w = cols * self.cell_w + 2;
        let h = visible_rows * self.cell_h + 2;
        let frame = Frame {
            x: viewport.width.saturating_sub(w) / 2,
            y: match self.anchor_y {
                AnchorY::Center => viewport.height.saturating_sub(h) / 2,
                AnchorY::Top => 0,
            },
            w,
            h,
        };

        let border = CellStyle::new(Rgb::new(200, 200, 200), PANEL_BG);
        self.draw_border(fb, frame, border);

        let dimmed = matches!(game.state(), GameState::Paused | GameState::GameOver);

        // Full rows fade towards the background while clearing.
        let fade = game.clear_started_at().map(|start| {
            now.saturating_sub(start).as_secs_f32() / CLEAR_DELAY.as_secs_f32()
        });

        for y in 0..visible_rows {
            let row = hidden + y as usize;
            let fading = fade.filter(|_| board.line_full(row));
            for x in 0..cols {
                match board.color(row as isize, x as isize) {
                    Some(color) => {
                        let mut fg = color_of(color);
                        if let Some(progress) = fading {
                            fg = fg.lerp(BOARD_BG, progress);
                        }
                        let mut style = CellStyle::new(fg, BOARD_BG);
                        style.dim = dimmed;
                        self.fill_cell(fb, frame, x, y, BLOCK, style);
                    }
                    None => {
                        let style = CellStyle::new(Rgb::new(90, 90, 100), BOARD_BG).dim();
                        self.fill_cell(fb, frame, x, y, EMPTY, style);
                    }
                }
            }
        }

        if let Some(ghost) = game.ghost() {
            let style = CellStyle::new(Rgb::new(140, 140, 140), BOARD_BG).dim();
            self.draw_piece(fb, frame, hidden, &ghost, GHOST, style);
        }

        if let Some(current) = game.current() {
            let mut style = CellStyle::new(color_of(current.color()), BOARD_BG).bold();
            style.dim = dimmed;
            self.draw_piece(fb, frame, hidden, current, BLOCK, style);
        }

        self.draw_side_panel(fb, game, viewport, frame, dimmed);

        match game.state() {
            GameState::Paused => self.draw_overlay_text(fb, frame, "PAUSED"),
            GameState::GameOver => self.draw_overlay_text(fb, frame, "GAME OVER"),
            _ => {}
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render<R>(&self, game: &Game<R>, now: Duration, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(game, now, viewport, &mut fb);
        fb
    }

    fn draw_border(&self, fb: &mut FrameBuffer, frame: Frame, style: CellStyle) {
        let Frame { x, y, w, h } = frame;
        if w < 2 || h < 2 {
            return;
        }

        fb.put_char(x, y, '┌', style);
        fb.put_char(x + w - 1, y, '┐', style);
        fb.put_char(x, y + h - 1, '└', style);
        fb.put_char(x + w - 1, y + h - 1, '┘', style);

        for dx in 1..w - 1 {
            fb.put_char(x + dx, y, '─', style);
            fb.put_char(x + dx, y + h - 1, '─', style);
        }
        for dy in 1..h - 1 {
            fb.put_char(x, y + dy, '│', style);
            fb.put_char(x + w - 1, y + dy, '│', style);
        }
    }

    /// Draw the visible cells of a piece on the board
    fn draw_piece(
        &self,
        fb: &mut FrameBuffer,
        frame: Frame,
        hidden: usize,
        piece: &Piece,
        ch: char,
        style: CellStyle,
    ) {
        let hidden = hidden as isize;
        for (row, col) in piece.cells() {
            if row < hidden || col < 0 {
                continue;
            }
            self.fill_cell(fb, frame, col as u16, (row - hidden) as u16, ch, style);
        }
    }

    fn fill_cell(
        &self,
        fb: &mut FrameBuffer,
        frame: Frame,
        cell_x: u16,
        cell_y: u16,
        ch: char,
        style: CellStyle,
    ) {
        let px = frame.x + 1 + cell_x * self.cell_w;
        let py = frame.y + 1 + cell_y * self.cell_h;
        fb.fill_rect(px, py, self.cell_w, self.cell_h, ch, style);
    }

    fn draw_side_panel<R>(
        &self,
        fb: &mut FrameBuffer,
        game: &Game<R>,
        viewport: Viewport,
        frame: Frame,
        dimmed: bool,
    ) {
        let panel_x = frame.x.saturating_add(frame.w).saturating_add(2);
        if panel_x >= viewport.width || viewport.width - panel_x < 10 {
            return;
        }

        let label = CellStyle::new(Rgb::new(220, 220, 220), PANEL_BG).bold();
        let value = CellStyle::new(Rgb::new(200, 200, 200), PANEL_BG);

        let mut y = frame.y;
        for (name, number) in [
            ("LEVEL", game.level()),
            ("SCORE", game.score()),
            ("LINES", game.lines()),
        ] {
            fb.put_str(panel_x, y, name, label);
            fb.put_u32(panel_x, y.saturating_add(1), number, value);
            y = y.saturating_add(3);
        }

        fb.put_str(panel_x, y, "NEXT", label);
        y = y.saturating_add(1);
        for piece in game.next_pieces(NEXT_PREVIEW) {
            if y >= viewport.height {
                break;
            }
            let used = self.draw_mini_piece(fb, panel_x, y, piece, dimmed);
            y = y.saturating_add(used + 1);
        }

        fb.put_str(panel_x, y, "HOLD", label);
        y = y.saturating_add(1);
        match game.held() {
            Some(piece) => {
                self.draw_mini_piece(fb, panel_x, y, piece, dimmed || !game.can_hold());
            }
            None => {
                fb.put_char(panel_x, y, '-', value.dim());
            }
        }
    }

    /// Draw a piece shape without its empty rows; returns the rows used
    fn draw_mini_piece(
        &self,
        fb: &mut FrameBuffer,
        x: u16,
        y: u16,
        piece: &Piece,
        dimmed: bool,
    ) -> u16 {
        let mut style = CellStyle::new(color_of(piece.color()), PANEL_BG);
        style.dim = dimmed;

        let (rows, cols) = piece.size();
        let mut used = 0u16;
        for i in 0..rows {
            if piece.is_line_empty(i) {
                continue;
            }
            let py = y.saturating_add(used);
            for j in 0..cols {
                if piece.block(i, j) {
                    let px = x.saturating_add(j as u16 * self.cell_w);
                    fb.fill_rect(px, py, self.cell_w, 1, BLOCK, style);
                }
            }
            used += 1;
        }
        used
    }

    fn draw_overlay_text(&self, fb: &mut FrameBuffer, frame: Frame, text: &str) {
        let mid_y = frame.y.saturating_add(frame.h / 2);
        let text_w = text.chars().count() as u16;
        let x = frame.x.saturating_add(frame.w.saturating_sub(text_w) / 2);
        let style = CellStyle::new(Rgb::new(255, 255, 255), PANEL_BG).bold();
        fb.put_str(x, mid_y, text, style);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row_text(fb: &FrameBuffer, y: u16) -> String {
        fb.row(y).iter().map(|c| c.ch).collect()
    }

    #[test]
    fn every_kind_has_its_own_color() {
        let mut colors: Vec<Rgb> = PieceKind::ALL.iter().map(|k| color_of(k.color_id())).collect();
        colors.dedup();
        assert_eq!(colors.len(), 7);
    }

    #[test]
    fn mini_piece_skips_empty_rows() {
        let view = GameView::default();
        let mut fb = FrameBuffer::new(10, 4);

        // The bar is a 5x5 matrix with a single filled row.
        let used = view.draw_mini_piece(&mut fb, 0, 0, &Piece::new(PieceKind::I), false);
        assert_eq!(used, 1);
        assert_eq!(row_text(&fb, 0), "  ████████");
        assert_eq!(row_text(&fb, 1).trim(), "");

        let used = view.draw_mini_piece(&mut fb, 0, 2, &Piece::new(PieceKind::T), false);
        assert_eq!(used, 2);
    }

    #[test]
    fn hidden_rows_are_not_drawn() {
        let game = Game::with_seed(22, 10, 2, 1);
        let fb = GameView::default()
            .with_anchor_y(AnchorY::Top)
            .render(&game, Duration::ZERO, Viewport::new(22, 24));

        // 20 visible rows plus the border.
        assert_eq!(fb.get(0, 21).map(|c| c.ch), Some('└'));
        assert_eq!(fb.get(0, 22).map(|c| c.ch), Some(' '));
    }
}
