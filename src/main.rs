//! Terminal memory game (default binary).
//!
//! The session runs on a tokio task; this thread polls the keyboard, drains
//! game events into the board model and redraws.

use std::time::Duration;

use anyhow::Result;
use crossterm::event::{self, Event, KeyEventKind};

use memory_match::config::AppConfig;
use memory_match::core::{GameState, RoundSettings, SeededShuffler, Session};
use memory_match::input::{handle_key_event, should_quit, BoardCursor, UiAction};
use memory_match::logging;
use memory_match::runtime::{RuntimeConfig, SessionRuntime};
use memory_match::term::{BoardModel, BoardView, FrameBuffer, TerminalRenderer, Viewport};
use memory_match::types::{standard_symbols, RoundStatus};

const FRAME_MS: u64 = 50;

fn main() -> Result<()> {
    let config = AppConfig::load()?;
    if let Some(path) = config.log_path.as_deref() {
        logging::init_file_logger(path)?;
    }
    log::info!(
        "seed {} round {}s sound {}",
        config.seed,
        config.round_seconds,
        if config.sound { "on" } else { "off" }
    );

    let game = GameState::with_shuffler(
        &standard_symbols(),
        SeededShuffler::new(config.seed),
        RoundSettings::default().with_round_seconds(config.round_seconds),
    );
    let mut session = SessionRuntime::start(
        Session::from_game(game),
        RuntimeConfig {
            journal_path: config.journal_path.clone(),
            ..RuntimeConfig::default()
        },
    )?;

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, &mut session, config.sound);

    // Always try to restore terminal state.
    let _ = term.exit();
    session.shutdown();
    result
}

fn run(term: &mut TerminalRenderer, session: &mut SessionRuntime, sound: bool) -> Result<()> {
    let view = BoardView::default();
    let mut model = BoardModel::new(sound);
    model.sync(&session.snapshot()?);

    let mut cursor = BoardCursor::default();
    let mut round = model.round;
    let mut fb = FrameBuffer::new(0, 0);

    loop {
        session.drain_into(&mut model);
        if model.round != round {
            round = model.round;
            cursor.reset();
        }
        if !model.tiles.is_empty() {
            cursor.resize(model.tiles.len());
        }
        term.play(&model.take_cues())?;

        // Render.
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        let highlight = (model.status == RoundStatus::Playing).then(|| cursor.position());
        view.render_into(&model, highlight, Viewport::new(w, h), &mut fb);
        term.draw_swap(&mut fb)?;

        if !event::poll(Duration::from_millis(FRAME_MS))? {
            continue;
        }
        match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => {
                if should_quit(key) {
                    return Ok(());
                }
                let Some(action) = handle_key_event(key) else {
                    continue;
                };
                if action == UiAction::ToggleSound {
                    let on = model.toggle_sound();
                    log::info!("sound {}", if on { "on" } else { "off" });
                }
                if let Some(game_action) = cursor.apply(action, model.status, model.shows_actions()) {
                    if let Err(e) = session.send(game_action) {
                        log::warn!("dropped {}: {}", game_action, e);
                    }
                }
            }
            Event::Resize(_, _) => term.invalidate(),
            _ => {}
        }
    }
}
