use server::{router, AppState, Store, DEFAULT_BIND};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "server=info".into()),
        )
        .init();

    let store = match std::env::var("GMARKER_SEED") {
        Ok(path) => match Store::load(&path) {
            Ok(store) => {
                tracing::info!("Loaded seed from {path}");
                store
            }
            Err(e) => {
                tracing::error!("Failed to load seed {path}: {e}");
                return;
            }
        },
        Err(_) => Store::demo(),
    };

    let bind = std::env::var("GMARKER_BIND").unwrap_or_else(|_| DEFAULT_BIND.to_string());
    let listener = match tokio::net::TcpListener::bind(&bind).await {
        Ok(listener) => listener,
        Err(e) => {
            tracing::error!("Failed to bind {bind}: {e}");
            return;
        }
    };

    tracing::info!("Server running on http://{bind}");
    if let Err(e) = axum::serve(listener, router(AppState::new(store))).await {
        tracing::error!("Server error: {e}");
    }
}
