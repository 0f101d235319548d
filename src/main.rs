//! Terminal Tetris runner (default binary).
//!
//! Owns the clock: every tick it asks the input handler for one event and
//! feeds it to the engine together with the time since start, then renders
//! the result through the framebuffer renderer.

use std::fs::File;
use std::path::PathBuf;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use anyhow::{bail, Context, Result};
use clap::Parser;
use crossterm::event::{self, Event as TermEvent, KeyEventKind};
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use tick_tetris::core::Game;
use tick_tetris::input::{handle_key_event, should_quit, InputHandler};
use tick_tetris::term::{FrameBuffer, GameView, TerminalRenderer, Viewport};
use tick_tetris::types::{
    Event, GameState, DEFAULT_COLS, DEFAULT_HIDDEN_ROWS, DEFAULT_ROWS, TICK_MS,
};

/// Largest board the terminal view can lay out in `u16` screen cells.
const MAX_COLS: usize = 100;
const MAX_ROWS: usize = 200;

/// Falling-block puzzle in the terminal
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Board rows, including the hidden spawn rows
    #[arg(long, default_value_t = DEFAULT_ROWS)]
    rows: usize,

    /// Board columns
    #[arg(long, default_value_t = DEFAULT_COLS)]
    cols: usize,

    /// Rows above the visible area used as spawn buffer
    #[arg(long, default_value_t = DEFAULT_HIDDEN_ROWS)]
    hidden_rows: usize,

    /// Seed for the piece sequence (random when omitted)
    #[arg(long)]
    seed: Option<u64>,

    /// Milliseconds per game tick
    #[arg(long, default_value_t = TICK_MS)]
    tick_ms: u64,

    /// Write logs to this file
    #[arg(long)]
    log: Option<PathBuf>,

    /// Log filter used with --log
    #[arg(long, default_value = "debug")]
    log_level: String,
}

impl Args {
    fn validate(&self) -> Result<()> {
        if !(4..=MAX_COLS).contains(&self.cols) {
            bail!("--cols must be between 4 and {MAX_COLS}, got {}", self.cols);
        }
        if self.rows > MAX_ROWS {
            bail!("--rows must be at most {MAX_ROWS}, got {}", self.rows);
        }
        let min_rows = self.hidden_rows.saturating_add(4);
        if self.rows < min_rows {
            bail!(
                "--rows must be at least --hidden-rows + 4 ({min_rows}), got {}",
                self.rows
            );
        }
        if self.tick_ms == 0 {
            bail!("--tick-ms must be at least 1");
        }
        Ok(())
    }
}

/// Log to a file only: stdout belongs to the game screen.
fn init_tracing(args: &Args) -> Result<()> {
    let Some(path) = &args.log else {
        return Ok(());
    };

    let env_filter = EnvFilter::try_new(&args.log_level)
        .with_context(|| format!("invalid --log-level {:?}", args.log_level))?;
    let file = File::create(path)
        .with_context(|| format!("cannot create log file {}", path.display()))?;

    tracing_subscriber::registry()
        .with(fmt::layer().with_ansi(false).with_writer(Mutex::new(file)))
        .with(env_filter)
        .init();
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();
    args.validate()?;
    init_tracing(&args)?;

    let game = match args.seed {
        Some(seed) => Game::with_seed(args.rows, args.cols, args.hidden_rows, seed),
        None => Game::from_entropy(args.rows, args.cols, args.hidden_rows),
    };
    info!(
        rows = args.rows,
        cols = args.cols,
        hidden_rows = args.hidden_rows,
        seed = ?args.seed,
        "starting game"
    );

    let mut term = TerminalRenderer::new();
    let result = term
        .enter()
        .and_then(|()| run(&mut term, game, Duration::from_millis(args.tick_ms)));

    // Always try to restore terminal state.
    let _ = term.exit();
    result
}

fn run(term: &mut TerminalRenderer, mut game: Game, tick: Duration) -> Result<()> {
    let view = GameView::default();
    let mut input = InputHandler::new();
    let mut fb = FrameBuffer::new(0, 0);

    let start = Instant::now();
    let mut next_tick = start;

    loop {
        // Input until the next tick deadline.
        let mut quit = false;
        loop {
            let timeout = next_tick.saturating_duration_since(Instant::now());
            if !event::poll(timeout)? {
                break;
            }
            match event::read()? {
                TermEvent::Key(key) => match key.kind {
                    KeyEventKind::Press | KeyEventKind::Repeat => {
                        if should_quit(key) {
                            quit = true;
                        } else if handle_key_event(key).is_some() {
                            input.handle_key_press(key.code, start.elapsed());
                        }
                    }
                    KeyEventKind::Release => input.handle_key_release(key.code),
                },
                TermEvent::Resize(_, _) => term.invalidate(),
                _ => {}
            }
        }

        // Tick.
        let now = start.elapsed();
        let event = if quit { Event::Quit } else { input.poll(now) };
        game.update(event, now);
        if game.state() == GameState::Quitting {
            return Ok(());
        }

        // Render.
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        view.render_into(&game, now, Viewport::new(w, h), &mut fb);
        term.draw_swap(&mut fb)?;

        next_tick += tick;
        if next_tick < Instant::now() {
            // Fell behind; skip the missed ticks instead of bursting.
            next_tick = Instant::now();
        }
    }
}
