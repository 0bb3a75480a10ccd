use std::fs::OpenOptions;
use std::sync::{Arc, Mutex};

use gemshop::GemshopError;
use gemshop::config::fetch_config;
use gemshop::gateway::Gateway;
use gemshop::session::{SessionStore, store_for};
use tracing::{info, warn};

#[tokio::main]
async fn main() -> Result<(), GemshopError> {
    let app_config = fetch_config()?;

    // The terminal belongs to the UI, so logs go to a file.
    let log_file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&app_config.log_file)
        .map_err(|e| {
            GemshopError::Io(format!(
                "failed to open log file {}: {e}",
                app_config.log_file.display()
            ))
        })?;
    tracing_subscriber::fmt()
        .with_writer(Mutex::new(log_file))
        .with_ansi(false)
        .init();

    let gateway = Arc::new(Gateway::new(&app_config.gateway)?);
    info!(base_url = %gateway.base_url(), "using gateway");

    let store: Arc<dyn SessionStore> = Arc::from(store_for(app_config.session_file.as_deref()));
    let session = store.load().unwrap_or_else(|e| {
        warn!(error = %e, "could not restore session, starting signed out");
        None
    });

    gemshop::tui::run(gateway, store, session).await
}
