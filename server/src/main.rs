use clap::Parser;
use cryptolab_server::{app, AppState, DisabledStore, ResultSink, Settings, SqliteStore};
use std::sync::Arc;

fn open_store(settings: &Settings) -> Arc<dyn ResultSink> {
    let Some(path) = settings.database.as_deref() else {
        log::info!("No database configured, result history disabled");
        return Arc::new(DisabledStore);
    };
    match SqliteStore::open(path) {
        Ok(store) => {
            log::info!("Storing results in {path}");
            Arc::new(store)
        }
        Err(e) => {
            log::warn!("Cannot open database {path}: {e}; result history disabled");
            Arc::new(DisabledStore)
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let settings = Settings::parse();
    log::info!("Starting CryptoLab API...");

    let state = Arc::new(AppState::new(open_store(&settings), settings.tools()));
    let router = app(state, &settings.origins());

    let listener = tokio::net::TcpListener::bind(&settings.bind).await.map_err(|e| {
        log::error!("Failed to bind to {}: {e}", settings.bind);
        e
    })?;
    log::info!("Server listening on {}", settings.bind);

    axum::serve(listener, router).await?;
    Ok(())
}
