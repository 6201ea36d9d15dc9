use std::net::SocketAddr;
use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use logdeck::domain::{LogStore, OrderAuthority};
use logdeck::infrastructure::{AppState, Config, HttpLogStore, MemoryLogStore};
use logdeck::{seed, server};

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "logdeck=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    // Load configuration
    dotenvy::dotenv().ok();
    let config = Config::from_env();

    // Wire up the log store: remote when STORE_URL is set, in-memory
    // otherwise. Both double as the order-mutation authority.
    let (store, authority): (Arc<dyn LogStore>, Arc<dyn OrderAuthority>) = match &config.store_url {
        Some(url) => {
            tracing::info!("Using remote log store at {}", url);
            let http = Arc::new(
                HttpLogStore::new(url.clone(), config.store_api_key.clone())
                    .expect("Failed to build log store client"),
            );
            (http.clone(), http)
        }
        None => {
            tracing::info!("No STORE_URL configured, using in-memory log store");
            let memory = Arc::new(MemoryLogStore::new());
            if config.seed_demo {
                seed::seed_demo_logs(&memory).await;
            }
            (memory.clone(), memory)
        }
    };

    let state = AppState::new(store, authority);

    // Populate both views before accepting traffic.
    state.logs.refresh().await;
    state.statistics.refresh().await;

    let app = server::build_router(state, &config.cors_allowed_origins);

    // Find available port
    let port = server::find_available_port(config.port).expect("Failed to find available port");
    if port != config.port {
        tracing::warn!(
            "Preferred port {} was not available, using port {} instead",
            config.port,
            port
        );
    }

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!("logdeck server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");

    axum::serve(listener, app)
        .await
        .expect("Failed to start server");
}
