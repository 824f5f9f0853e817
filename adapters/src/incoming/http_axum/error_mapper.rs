use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use tracing::{debug, error};

use domain::error::DomainError;
use retouch_application::error::AppError;

pub struct HttpError(pub AppError);

fn status_for(app_error: &AppError) -> StatusCode {
    match app_error {
        AppError::Domain(DomainError::InvalidDimensions(_))
        | AppError::ProcessingError { .. }
        | AppError::IoError(_)
        | AppError::ConfigError { .. }
        | AppError::InternalServerError => StatusCode::INTERNAL_SERVER_ERROR,
        AppError::Domain(_)
        | AppError::ValidationError { .. }
        | AppError::DecodeError { .. }
        | AppError::UnknownOperation { .. }
        | AppError::JsonError(_) => StatusCode::BAD_REQUEST,
        AppError::PayloadTooLarge { .. } => StatusCode::PAYLOAD_TOO_LARGE,
        AppError::NotFound { .. } => StatusCode::NOT_FOUND,
    }
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let app_error = &self.0;
        let status_code = status_for(app_error);

        if status_code.is_client_error() {
            debug!("Client error response generated: {}", app_error);
        } else {
            error!("Server error response generated: {}", app_error);
        }

        let message = match app_error {
            AppError::ConfigError { .. } => "Configuration error".to_string(),
            AppError::IoError(_) | AppError::InternalServerError => {
                "Internal server error".to_string()
            }
            AppError::JsonError(_) => "Invalid JSON format".to_string(),
            AppError::NotFound { message } => message.clone(),
            other => other.to_string(),
        };

        (status_code, Json(json!({ "error": message }))).into_response()
    }
}

impl From<AppError> for HttpError {
    fn from(app_error: AppError) -> Self {
        HttpError(app_error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;
    use std::io;

    async fn render(app_error: AppError) -> (StatusCode, serde_json::Value) {
        let response = HttpError(app_error).into_response();
        let status = response.status();
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&body).unwrap())
    }

    #[tokio::test]
    async fn client_errors_keep_their_message() {
        let (status, body) = render(AppError::validation("Missing image")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({ "error": "Missing image" }));

        let (status, body) = render(AppError::UnknownOperation {
            name: "swirl".into(),
        })
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Unknown operation: swirl");

        let (status, _) = render(AppError::decode("bad bytes")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn size_and_lookup_errors_have_their_own_status() {
        let (status, _) = render(AppError::PayloadTooLarge { limit: 10 }).await;
        assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);

        let (status, body) = render(AppError::NotFound {
            message: "File 'x.png' not found".into(),
        })
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "File 'x.png' not found");
    }

    #[tokio::test]
    async fn processing_errors_are_server_errors_with_message() {
        let (status, body) = render(AppError::processing("timed out")).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], "Error processing image: timed out");
    }

    #[tokio::test]
    async fn internal_details_are_redacted() {
        let io = io::Error::other("disk /var/secret full");
        let (status, body) = render(AppError::IoError(io)).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], "Internal server error");
    }

    #[tokio::test]
    async fn domain_errors_map_by_kind() {
        let (status, _) = render(AppError::Domain(DomainError::UnknownOperation("x".into()))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, _) =
            render(AppError::Domain(DomainError::InvalidDimensions("0x0".into()))).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    }
}
