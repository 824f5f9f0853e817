use axum::{Json, extract::State};

use retouch_application::ports::incoming::editor::ProcessImageUseCase;

#[cfg(feature = "docs")]
use crate::incoming::http_axum::dto::common_responses::{
    BadRequestResponse, InternalServerErrorResponse, PayloadTooLargeResponse,
};
use crate::incoming::http_axum::{
    core::extractors::JsonBody,
    dto::{requests::ProcessRequest, responses::EditedImageResponse},
    error_mapper::HttpError,
};
use crate::shared::app_state::AppState;

#[cfg_attr(feature = "docs", utoipa::path(
    post,
    path = "/process",
    request_body = ProcessRequest,
    responses(
        (status = 200, description = "Operation applied", body = EditedImageResponse),
        (status = 400, response = BadRequestResponse),
        (status = 413, response = PayloadTooLargeResponse),
        (status = 500, response = InternalServerErrorResponse)
    ),
    tag = "editor",
    summary = "Apply an operation",
    description = "Operations: resize (scale), blur (radius), sharpen (strength), brightness, contrast and saturation (factor), grayscale, sepia, vintage, enhance.",
    operation_id = "process_image"
))]
pub async fn process_image(
    State(state): State<AppState>,
    JsonBody(request): JsonBody<ProcessRequest>,
) -> Result<Json<EditedImageResponse>, HttpError> {
    let process_uc: &dyn ProcessImageUseCase = &*state.process_use_case;
    let edited = process_uc
        .process(request.into())
        .await
        .map_err(HttpError)?;

    Ok(Json(edited.into()))
}
