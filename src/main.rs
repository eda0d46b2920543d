use std::sync::Arc;

use tokio::sync::mpsc;
use tracing_subscriber::EnvFilter;

use ticket_notes::config::Config;
use ticket_notes::notes::FsNoteStore;
use ticket_notes::router::{Dispatcher, LocalCapabilities};
use ticket_notes::server;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .with_level(true)
        .init();

    let cfg = Config::load()?;

    let store = Arc::new(FsNoteStore::new(cfg.notes.dir.clone()));
    if store.dir().is_none() {
        tracing::warn!("No notes folder configured; saves fail until one is chosen");
    }

    let (picker_tx, mut picker_rx) = mpsc::unbounded_channel();
    let caps = LocalCapabilities::new(Arc::clone(&store), picker_tx);
    let handle = server::start(cfg.server_options(), Dispatcher::new(Arc::new(caps)))?;

    // No dialog to show here: "choosing" re-reads the folder from configuration.
    let picker_store = Arc::clone(&store);
    tokio::spawn(async move {
        while picker_rx.recv().await.is_some() {
            tracing::info!("Folder picker requested");
            match Config::load() {
                Ok(cfg) => picker_store.set_dir(cfg.notes.dir),
                Err(e) => tracing::error!("Could not reload notes folder: {:#}", e),
            }
        }
    });

    tokio::signal::ctrl_c().await?;
    tracing::info!("Shutdown signal received");
    handle.stop().await;

    Ok(())
}
