use axum::{
    Json,
    extract::{FromRequest, Request, rejection::JsonRejection},
    http::StatusCode,
};
use serde::de::DeserializeOwned;

use retouch_application::error::AppError;

use crate::incoming::http_axum::error_mapper::HttpError;
use crate::shared::app_state::AppState;

pub struct JsonBody<T>(pub T);

impl<T> FromRequest<AppState> for JsonBody<T>
where
    T: DeserializeOwned,
{
    type Rejection = HttpError;

    async fn from_request(req: Request, state: &AppState) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(Self(value)),
            Err(rejection) => Err(HttpError(json_rejection_error(
                &rejection,
                state.config.editor.max_upload_bytes,
            ))),
        }
    }
}

fn json_rejection_error(rejection: &JsonRejection, limit: usize) -> AppError {
    if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
        return AppError::PayloadTooLarge { limit };
    }
    AppError::validation(format!("Invalid JSON body: {}", rejection.body_text()))
}

// Base64 expansion of a full-size image plus JSON or multipart framing.
#[must_use]
pub fn request_body_limit(max_upload_bytes: usize) -> usize {
    const FRAMING_ALLOWANCE: usize = 64 * 1024;
    max_upload_bytes
        .div_ceil(3)
        .saturating_mul(4)
        .saturating_add(FRAMING_ALLOWANCE)
}
