use axum::{
    Router,
    http::{HeaderName, HeaderValue, Method},
};
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    services::ServeDir,
    trace::TraceLayer,
};
use tracing::info;

use crate::bootstrap::state::AppState;
use retouch_adapters::incoming::http_axum::routes::build_application_router;
use retouch_application::{error::AppError, infrastructure_config::ServerConfig};

pub fn create_router(state: &AppState) -> Result<Router, AppError> {
    let adapters_state = state.to_adapters_state();
    let cors_layer = create_cors_layer(&adapters_state.config.server)?;

    let application_router = build_application_router(&adapters_state);

    let router_with_static = match &adapters_state.config.server.static_dir {
        Some(dir) => {
            info!(static_dir = %dir, "Serving static UI");
            application_router.fallback_service(ServeDir::new(dir))
        }
        None => application_router,
    };

    Ok(router_with_static
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors_layer),
        )
        .with_state(adapters_state))
}

fn create_cors_layer(server: &ServerConfig) -> Result<CorsLayer, AppError> {
    let base_cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([
            HeaderName::from_static("content-type"),
            HeaderName::from_static("accept"),
            HeaderName::from_static("origin"),
            HeaderName::from_static("x-requested-with"),
            HeaderName::from_static("x-request-id"),
        ])
        .expose_headers([HeaderName::from_static("x-request-id")]);

    match &server.cors_origin {
        Some(origin) => {
            let origin = origin
                .parse::<HeaderValue>()
                .map_err(|e| AppError::ConfigError {
                    message: format!("server.cors_origin '{origin}' is not a valid origin: {e}"),
                })?;
            Ok(base_cors.allow_origin(origin))
        }
        None => Ok(base_cors.allow_origin(Any)),
    }
}
