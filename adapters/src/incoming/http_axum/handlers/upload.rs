use axum::{
    Json,
    extract::{
        Multipart, State,
        multipart::{MultipartError, MultipartRejection},
    },
    http::StatusCode,
};
use tracing::debug;

use retouch_application::{
    editor::commands::UploadedFile, error::AppError,
    ports::incoming::editor::UploadImageUseCase,
};

#[cfg(feature = "docs")]
use crate::incoming::http_axum::dto::common_responses::{
    BadRequestResponse, InternalServerErrorResponse, PayloadTooLargeResponse,
};
use crate::incoming::http_axum::{dto::responses::EditedImageResponse, error_mapper::HttpError};
use crate::shared::app_state::AppState;

pub const FILE_FIELD: &str = "file";

fn multipart_error(error: &MultipartError, limit: usize) -> HttpError {
    if error.status() == StatusCode::PAYLOAD_TOO_LARGE {
        return HttpError(AppError::PayloadTooLarge { limit });
    }
    HttpError(AppError::validation(format!(
        "Invalid multipart body: {}",
        error.body_text()
    )))
}

async fn read_file_field(
    mut multipart: Multipart,
    limit: usize,
) -> Result<Option<UploadedFile>, HttpError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| multipart_error(&e, limit))?
    {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }

        let file_name = field.file_name().unwrap_or_default().to_string();
        let bytes = field
            .bytes()
            .await
            .map_err(|e| multipart_error(&e, limit))?;

        return Ok(Some(UploadedFile {
            file_name,
            bytes: bytes.to_vec(),
        }));
    }

    Ok(None)
}

#[cfg_attr(feature = "docs", utoipa::path(
    post,
    path = "/upload",
    request_body(content_type = "multipart/form-data", description = "Form with a single `file` field"),
    responses(
        (status = 200, description = "Image decoded and normalized to PNG", body = EditedImageResponse),
        (status = 400, response = BadRequestResponse),
        (status = 413, response = PayloadTooLargeResponse),
        (status = 500, response = InternalServerErrorResponse)
    ),
    tag = "editor",
    summary = "Upload an image",
    description = "Accept png, jpg, jpeg, gif, bmp or webp (configurable) and return it re-encoded as a PNG data URL.",
    operation_id = "upload_image"
))]
pub async fn upload_image(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<EditedImageResponse>, HttpError> {
    let file = match multipart {
        Ok(multipart) => read_file_field(multipart, state.config.editor.max_upload_bytes).await?,
        Err(rejection) => {
            debug!(%rejection, "Upload request without a multipart body");
            None
        }
    };

    let upload_uc: &dyn UploadImageUseCase = &*state.upload_use_case;
    let edited = upload_uc.upload(file).await.map_err(HttpError)?;

    Ok(Json(edited.into()))
}
