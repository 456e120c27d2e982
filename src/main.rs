//! Space 2048 terminal runner (default binary).
//!
//! crossterm for input, a framebuffer renderer for output. Everything is
//! event driven: the screen is redrawn after each input event.

use anyhow::Result;
use crossterm::event::{self, Event, KeyEventKind};
use tracing::{info, warn};

use space_2048::config::AppConfig;
use space_2048::core::{GameSession, SeededRng, SessionSnapshot};
use space_2048::input::{handle_key_event, should_quit, SwipeTracker};
use space_2048::logging;
use space_2048::store::FileStore;
use space_2048::term::{FrameBuffer, GameView, TerminalRenderer, Viewport};
use space_2048::types::GameAction;

fn main() -> Result<()> {
    let config = AppConfig::from_env();
    logging::init(&config)?;
    info!(?config, "starting");

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, &config);

    // Always try to restore terminal state.
    if let Err(err) = term.exit() {
        warn!("failed to restore terminal: {err:#}");
    }
    result
}

fn run(term: &mut TerminalRenderer, config: &AppConfig) -> Result<()> {
    let rng = match config.seed {
        Some(seed) => SeededRng::new(seed),
        None => SeededRng::from_entropy(),
    };
    let store = FileStore::new(&config.best_path);
    let mut session = GameSession::with_target(rng, store, config.target);

    let view = GameView::default();
    let mut swipes = SwipeTracker::new(config.swipe_min_distance);
    let mut snap = SessionSnapshot::default();
    let mut fb = FrameBuffer::new(0, 0);

    loop {
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        session.snapshot_into(&mut snap);
        view.render_into(&snap, Viewport::new(w, h), &mut fb);
        term.present(&fb)?;

        let action = match event::read()? {
            Event::Key(key) if key.kind != KeyEventKind::Release => {
                if should_quit(key) {
                    break;
                }
                handle_key_event(key)
            }
            Event::Mouse(mouse) => swipes.handle_mouse_event(mouse).map(GameAction::Move),
            Event::Resize(..) => {
                term.invalidate();
                None
            }
            _ => None,
        };

        if let Some(action) = action {
            session.apply_action(action);
        }
    }

    info!(
        score = session.score(),
        best = session.best_score(),
        moves = session.moves(),
        "quit"
    );
    Ok(())
}
