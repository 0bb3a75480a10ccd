//! The main loop: draw, wait for a message, update, dispatch.

use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::{debug, info};

use crate::gateway::Gateway;
use crate::session::{Session, SessionStore};
use crate::{GemshopError, Result};

use super::app::App;
use super::dispatch::Dispatcher;
use super::event::{Message, spawn_event_reader, spawn_tick_timer, update};
use super::terminal::{Tui, restore_terminal, setup_terminal};
use super::ui;

/// Tick interval for notice expiry.
const TICK_MS: u64 = 250;

/// Runs the storefront until the user quits.
///
/// The terminal is restored even when the loop fails.
///
/// # Errors
///
/// Returns an error if the terminal cannot be set up, drawn or restored.
pub async fn run(
    gateway: Arc<Gateway>,
    store: Arc<dyn SessionStore>,
    session: Option<Session>,
) -> Result<()> {
    let mut terminal = setup_terminal()?;
    let outcome = event_loop(&mut terminal, gateway, store, session).await;
    let restored = restore_terminal(&mut terminal);
    outcome.and(restored)
}

async fn event_loop(
    terminal: &mut Tui,
    gateway: Arc<Gateway>,
    store: Arc<dyn SessionStore>,
    session: Option<Session>,
) -> Result<()> {
    let (tx, mut rx) = mpsc::unbounded_channel::<Message>();
    spawn_event_reader(tx.clone());
    spawn_tick_timer(tx.clone(), TICK_MS);

    let dispatcher = Dispatcher::new(Arc::clone(&gateway), store, tx);
    let mut app = App::new(session);
    if let Some(action) = app.refresh() {
        dispatcher.dispatch(action);
    }
    info!(signed_in = app.is_signed_in(), "storefront started");

    while !app.should_quit {
        terminal
            .draw(|frame| ui::render(frame, &app, &gateway))
            .map_err(|e| GemshopError::Io(format!("failed to draw: {e}")))?;

        let Some(message) = rx.recv().await else {
            break;
        };
        if let Some(action) = update(&mut app, message) {
            debug!(?action, "dispatching");
            dispatcher.dispatch(action);
        }
    }

    info!("storefront closed");
    Ok(())
}
