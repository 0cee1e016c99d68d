//! Terminal lane dodging game (default binary).
//!
//! crossterm for input, a framebuffer renderer for output, and a
//! persistence worker for the leaderboard. Logs go to `LANE_DODGE_LOG_PATH`
//! when set; the terminal itself belongs to the renderer.

use std::fs::OpenOptions;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyEventKind};
use tracing::Level;
use tracing_subscriber::EnvFilter;

use lane_dodge::app::{App, AppEffect};
use lane_dodge::leaderboard::{NewScoreRecord, Persistence};
use lane_dodge::term::{FrameBuffer, TerminalRenderer, Viewport};
use lane_dodge::types::FRAME_MS;

/// How long queued scores may take to reach the store after quitting.
const SHUTDOWN_GRACE: Duration = Duration::from_secs(3);

fn main() -> Result<()> {
    init_logging()?;

    let seed = std::env::var("LANE_DODGE_SEED")
        .ok()
        .and_then(|s| s.trim().parse::<u32>().ok())
        .unwrap_or_else(rand::random);
    tracing::info!(seed, "starting lane-dodge");

    let mut persistence = Persistence::start_from_env().context("starting persistence worker")?;

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, &mut persistence, seed);

    // Always try to restore terminal state.
    let _ = term.exit();
    persistence.shutdown(SHUTDOWN_GRACE);
    result
}

fn init_logging() -> Result<()> {
    let filter = EnvFilter::from_default_env().add_directive(Level::INFO.into());
    let path = std::env::var("LANE_DODGE_LOG_PATH")
        .ok()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty());

    match path {
        Some(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(&path)
                .with_context(|| format!("opening log file {path}"))?;
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .init();
        }
        None => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(std::io::sink)
                .init();
        }
    }
    Ok(())
}

fn run(term: &mut TerminalRenderer, persistence: &mut Persistence, seed: u32) -> Result<()> {
    let mut app = App::new(seed);
    let mut fb = FrameBuffer::new(0, 0);

    let frame = Duration::from_millis(FRAME_MS as u64);
    let mut last_advance = Instant::now();
    // Sub-millisecond remainder carried between frames.
    let mut carry = Duration::ZERO;

    loop {
        while let Some(event) = persistence.try_recv() {
            app.apply_persist_event(&event);
        }

        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        app.render_into(Viewport::new(w, h), &mut fb);
        term.draw_swap(&mut fb)?;

        if event::poll(frame)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    match app.handle_key(key) {
                        Some(AppEffect::Quit) => return Ok(()),
                        Some(AppEffect::Submit(finished)) => {
                            persistence.submit(NewScoreRecord::now(&finished.player_name, finished.score));
                        }
                        Some(AppEffect::FetchLeaderboard { request }) => {
                            persistence.fetch_leaderboard(request);
                        }
                        None => {}
                    }
                }
                Event::Resize(_, _) => term.invalidate(),
                _ => {}
            }
        }

        let now = Instant::now();
        carry += now - last_advance;
        last_advance = now;
        let elapsed_ms = carry.as_millis().min(u32::MAX as u128) as u32;
        carry -= Duration::from_millis(elapsed_ms as u64);
        if elapsed_ms > 0 {
            app.advance(elapsed_ms);
        }
    }
}
