use axum::{
    Json,
    extract::{Path, State},
};

use retouch_application::ports::incoming::editor::DownloadImageUseCase;

#[cfg(feature = "docs")]
use crate::incoming::http_axum::dto::common_responses::{
    BadRequestResponse, InternalServerErrorResponse, NotFoundResponse, PayloadTooLargeResponse,
};
use crate::incoming::http_axum::{
    core::extractors::JsonBody,
    dto::{
        requests::DownloadRequest,
        responses::{DownloadLinkResponse, PngDownloadResponse},
    },
    error_mapper::HttpError,
};
use crate::shared::app_state::AppState;

#[cfg_attr(feature = "docs", utoipa::path(
    post,
    path = "/download",
    request_body = DownloadRequest,
    responses(
        (status = 200, description = "Image stored", body = DownloadLinkResponse),
        (status = 400, response = BadRequestResponse),
        (status = 413, response = PayloadTooLargeResponse),
        (status = 500, response = InternalServerErrorResponse)
    ),
    tag = "editor",
    summary = "Prepare a download",
    description = "Store the image as PNG under a content-derived name and return its download URL.",
    operation_id = "create_download"
))]
pub async fn create_download(
    State(state): State<AppState>,
    JsonBody(request): JsonBody<DownloadRequest>,
) -> Result<Json<DownloadLinkResponse>, HttpError> {
    let download_uc: &dyn DownloadImageUseCase = &*state.download_use_case;
    let link = download_uc
        .prepare_download(request.image)
        .await
        .map_err(HttpError)?;

    Ok(Json(link.into()))
}

#[cfg_attr(feature = "docs", utoipa::path(
    get,
    path = "/download/{file_name}",
    params(
        ("file_name" = String, Path, description = "Name returned by POST /download")
    ),
    responses(
        (status = 200, response = PngDownloadResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    ),
    tag = "editor",
    summary = "Fetch a stored image",
    operation_id = "serve_download"
))]
pub async fn serve_download(
    Path(file_name): Path<String>,
    State(state): State<AppState>,
) -> Result<PngDownloadResponse, HttpError> {
    let download_uc: &dyn DownloadImageUseCase = &*state.download_use_case;
    let png_data = download_uc
        .fetch_download(&file_name)
        .await
        .map_err(HttpError)?;

    Ok(PngDownloadResponse {
        file_name,
        png_data,
    })
}
