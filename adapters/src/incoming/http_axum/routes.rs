use axum::{
    Router,
    routing::{get, post},
};
#[cfg(feature = "docs")]
use utoipa::OpenApi;
#[cfg(feature = "docs")]
use utoipa_swagger_ui::SwaggerUi;

use crate::incoming::http_axum::{
    handlers::{
        download::{create_download, serve_download},
        health::health_check,
        process::process_image,
        upload::upload_image,
    },
    router_ext::RouterExt,
};
use crate::shared::app_state::AppState;

#[cfg(feature = "docs")]
use crate::incoming::http_axum::docs::ApiDoc;

pub fn build_application_router(state: &AppState) -> Router<AppState> {
    let editor_routes = build_editor_routes(state.config.editor.max_upload_bytes);
    let core_routes = build_core_routes();

    core_routes.merge(editor_routes).with_request_id()
}

fn build_editor_routes(max_upload_bytes: usize) -> Router<AppState> {
    Router::new()
        .route("/upload", post(upload_image))
        .route("/process", post(process_image))
        .route("/download", post(create_download))
        .route("/download/{file_name}", get(serve_download))
        .with_upload_limit(max_upload_bytes)
}

fn build_core_routes() -> Router<AppState> {
    let router = Router::new().route("/health", get(health_check));

    #[cfg(feature = "docs")]
    {
        router.merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()))
    }

    #[cfg(not(feature = "docs"))]
    {
        router
    }
}
