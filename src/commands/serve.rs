//! Serve command - Starts the HTTP server.

use std::sync::Arc;

use crate::api::{create_router, AppState};
use crate::cli::args::ServeArgs;
use crate::config::Config;
use crate::errors::{AppError, AppResult};
use crate::infra::{self, Database, InMemoryStore, Persistence};

/// Execute the serve command
pub async fn execute(args: ServeArgs, mut config: Config) -> AppResult<()> {
    tracing::info!("Starting server...");
    let seed = args.seed || config.seed_on_startup;

    let app_state = if args.in_memory {
        let store = Arc::new(InMemoryStore::new());
        tracing::info!("Using in-memory storage");
        if seed {
            infra::seed(store.as_ref()).await?;
        }
        AppState::from_config(store, &config)
    } else {
        let db = Database::connect(&config.database_url)
            .await
            .map_err(|e| AppError::internal(format!("Database connection failed: {}", e)))?;
        let uow = Arc::new(Persistence::new(db.get_connection()));
        if seed {
            infra::seed(uow.as_ref()).await?;
        }
        AppState::from_config(uow, &config)
    };

    // Build router
    let app = create_router(app_state);

    // Start server
    if let Some(host) = args.host {
        config.server_host = host;
    }
    if let Some(port) = args.port {
        config.server_port = port;
    }
    let addr = config.server_addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind to {}: {}", addr, e)))?;

    tracing::info!("Server running on http://{}", addr);

    axum::serve(listener, app)
        .await
        .map_err(|e| AppError::internal(format!("Server error: {}", e)))?;

    Ok(())
}
