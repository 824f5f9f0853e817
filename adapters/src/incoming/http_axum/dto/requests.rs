use serde::Deserialize;
#[cfg(feature = "docs")]
use utoipa::ToSchema;

use retouch_application::editor::commands::ProcessCommand;

#[cfg_attr(feature = "docs", derive(ToSchema))]
#[cfg_attr(feature = "docs", schema(
    description = "Apply one named operation to a transport-encoded image. Unknown parameter keys are ignored; missing ones take their defaults.",
    example = json!({
        "image": "data:image/png;base64,iVBORw0KGgo...",
        "operation": "resize",
        "params": { "scale": 2.0 }
    })
))]
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProcessRequest {
    #[cfg_attr(feature = "docs", schema(example = "data:image/png;base64,iVBORw0KGgo..."))]
    pub image: Option<String>,
    #[cfg_attr(feature = "docs", schema(example = "blur"))]
    pub operation: Option<String>,
    pub params: Option<serde_json::Value>,
}

impl From<ProcessRequest> for ProcessCommand {
    fn from(request: ProcessRequest) -> Self {
        Self {
            image: request.image,
            operation: request.operation,
            params: request.params,
        }
    }
}

#[cfg_attr(feature = "docs", derive(ToSchema))]
#[cfg_attr(feature = "docs", schema(
    description = "Persist a transport-encoded image for download",
    example = json!({ "image": "data:image/png;base64,iVBORw0KGgo..." })
))]
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DownloadRequest {
    pub image: Option<String>,
}
