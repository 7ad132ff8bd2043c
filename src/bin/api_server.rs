// src/bin/api_server.rs

use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;
use ventas_api::infra::{config, logging};
use ventas_api::transport;
use ventas_api::PgStore;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    logging::init(config::log_format()?)?;

    let database_url = config::database_url()?;
    let max_connections = config::max_connections()?;
    let bind_addr = config::bind_addr();

    // --- Store Initialization ---
    tracing::info!(max_connections, "connecting to database");
    let store = PgStore::connect(&database_url, max_connections).await?;
    store.ensure_schema().await?;
    tracing::info!("tables `clientes` and `ventas` ready");

    let app_state = transport::http::AppState::new(Arc::new(store));

    // --- API Server Initialization ---
    let cors = CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any);
    let app = transport::http::create_router(app_state)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", transport::http::ApiDoc::openapi()))
        .layer(TraceLayer::new_for_http())
        .layer(cors);

    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    tracing::info!(addr = %listener.local_addr()?, "API server listening (Swagger UI at /swagger-ui)");

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::error!(error = %e, "failed to listen for shutdown signal");
            }
            tracing::info!("shutdown signal received");
        })
        .await?;

    tracing::info!("graceful shutdown complete");
    Ok(())
}
