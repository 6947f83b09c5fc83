// src/main.rs

use std::{path::Path, sync::Arc};

use dotenvy::dotenv;
use sat_prep_backend::{
    config::Config,
    routes,
    state::AppState,
    store::{DynStore, MemoryStore, seed_assessments},
};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load .env file (if present)
    dotenv().ok();

    // Load configuration from environment
    let config = Config::from_env();

    let file_appender = tracing_appender::rolling::daily(&config.log_dir, "app.log");
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);
    let env_filter = EnvFilter::new(&config.rust_log);
    let stdout_layer = fmt::layer().with_writer(std::io::stdout).with_target(false);
    let file_layer = fmt::layer().with_writer(non_blocking).with_ansi(false);

    // Initialize Tracing (Logging)
    tracing_subscriber::registry()
        .with(env_filter)
        .with(stdout_layer)
        .with(file_layer)
        .init();

    for warning in &config.warnings {
        tracing::warn!("{}", warning);
    }

    let store: DynStore = Arc::new(MemoryStore::new());

    if let Some(seed_file) = &config.seed_file {
        match seed_assessments(store.as_ref(), Path::new(seed_file)).await {
            Ok(count) => tracing::info!("Seeded {} assessments from {}", count, seed_file),
            Err(e) => tracing::error!("Failed to seed assessments from {}: {}", seed_file, e),
        }
    }

    let addr = format!("{}:{}", config.host, config.port);

    let state = AppState {
        store,
        config,
    };

    // Create the Axum application router
    let app = routes::create_router(state);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Listening on {}", addr);

    // Start the server
    axum::serve(listener, app).await?;

    Ok(())
}
