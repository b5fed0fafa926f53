use axum::{
    extract::Request,
    http::StatusCode,
    middleware,
    routing::get,
    Router,
};
use log::{info, warn};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

use crate::handlers::{
    pharmacy_handlers::{get_pharmacies, health},
    AppState,
};
use pharmacy_shared::{Config, PharmacyApiClient, PharmacySource};

/// Creates a router backed by the real upstream API
pub fn create_router() -> Router {
    info!("Creating router with upstream pharmacy API client");

    let config = Config::from_env();
    let client = Arc::new(PharmacyApiClient::new(&config.upstream));

    // Check if we should remove the base path prefix
    let remove_base_path = std::env::var("REMOVE_BASE_PATH")
        .map(|v| v.to_lowercase() == "true")
        .unwrap_or(false);

    // If REMOVE_BASE_PATH is set to true, don't add the /Prod prefix
    let prefix = if remove_base_path { "" } else { "/Prod" };
    info!("Using API route prefix: '{}'", prefix);

    create_router_with_source(client, &config, prefix)
}

/// Creates a router with a given upstream source implementation
pub fn create_router_with_source<S>(source: Arc<S>, config: &Config, prefix: &str) -> Router
where
    S: PharmacySource,
{
    info!("Setting up API routes with prefix: '{}'", prefix);

    // Every response, errors and 404s included, carries the CORS headers
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Logging middleware to trace all requests
    async fn logging_middleware(
        req: Request,
        next: axum::middleware::Next,
    ) -> impl axum::response::IntoResponse {
        info!(
            "Router received request: method={}, uri={}",
            req.method(),
            req.uri()
        );
        next.run(req).await
    }

    let state = Arc::new(AppState::new(source, config));

    let api_routes = Router::new()
        .route("/pharmacies", get(get_pharmacies::<S>))
        .route("/health", get(health))
        .with_state(state);

    let router = if prefix.is_empty() {
        api_routes
    } else {
        Router::new().nest(prefix, api_routes)
    };

    router
        .fallback(|req: Request| async move {
            warn!("No route matched for: {} {}", req.method(), req.uri());
            (
                StatusCode::NOT_FOUND,
                "The requested resource was not found".to_string(),
            )
        })
        .layer(cors)
        .layer(middleware::from_fn(logging_middleware))
}
