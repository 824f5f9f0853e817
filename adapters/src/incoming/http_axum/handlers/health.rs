use axum::{Json, extract::State};

use domain::operation::OperationKind;

#[cfg(feature = "docs")]
use crate::incoming::http_axum::dto::responses::ApiResponseHealth;
use crate::incoming::http_axum::dto::responses::{ApiResponse, HealthData};
use crate::shared::app_state::AppState;

#[cfg_attr(feature = "docs", utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service is up", body = ApiResponseHealth,
         example = json!({
             "ok": true,
             "data": {
                 "status": "ok",
                 "operations": ["resize", "blur", "sharpen", "brightness", "contrast", "saturation", "grayscale", "sepia", "vintage", "enhance"],
                 "max_upload_bytes": 16_777_216
             }
         })
        )
    ),
    tag = "system",
    summary = "Health check",
    description = "Report liveness, the accepted operation names and the upload size cap.",
    operation_id = "health_check"
))]
#[allow(clippy::unused_async)]
pub async fn health_check(State(state): State<AppState>) -> Json<ApiResponse<HealthData>> {
    Json(ApiResponse::success_with_data(Some(HealthData {
        status: "ok",
        operations: OperationKind::ALL.iter().map(|kind| kind.name()).collect(),
        max_upload_bytes: state.config.editor.max_upload_bytes,
    })))
}
