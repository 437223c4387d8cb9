mod app;
mod config;
mod error;
mod events;
mod generator;
mod job;
mod state;
mod ui;

use anyhow::Result;
use tokio::sync::mpsc;

use crate::app::App;
use crate::config::Config;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    init_logging();

    let config = Config::load();
    let (events_tx, events_rx) = mpsc::unbounded_channel();
    let state = AppState::new(config, events_tx);

    let mut terminal = ratatui::init();
    let result = App::new(state, events_rx).run(&mut terminal).await;
    ratatui::restore();

    result
}

/// Log to a file under the config dir; stderr output would tear the
/// alternate screen. Enable with RUST_LOG.
fn init_logging() {
    let Some(dir) = Config::config_dir() else {
        return;
    };
    if std::fs::create_dir_all(&dir).is_err() {
        return;
    }
    let Ok(file) = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(dir.join("soragen.log"))
    else {
        return;
    };

    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::sync::Mutex::new(file))
        .with_ansi(false)
        .init();
}
