use axum::{
    http::{
        HeaderMap, HeaderValue,
        header::{CONTENT_DISPOSITION, CONTENT_TYPE},
    },
    response::{IntoResponse, Response},
};
use serde::Serialize;
#[cfg(feature = "docs")]
use utoipa::{ToResponse, ToSchema};

use retouch_application::editor::commands::{DownloadLink, EditedImage};

#[derive(Debug, Clone, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T: Serialize> ApiResponse<T> {
    #[must_use]
    pub fn success_with_data(data: Option<T>) -> Self {
        Self {
            ok: true,
            error: None,
            data,
        }
    }
}

#[cfg_attr(feature = "docs", derive(ToSchema))]
#[cfg_attr(feature = "docs", schema(
    description = "Service status and the operations it accepts",
    example = json!({
        "status": "ok",
        "operations": ["resize", "blur", "sharpen", "brightness", "contrast", "saturation", "grayscale", "sepia", "vintage", "enhance"],
        "max_upload_bytes": 16_777_216
    })
))]
#[derive(Debug, Clone, Serialize)]
pub struct HealthData {
    pub status: &'static str,
    pub operations: Vec<&'static str>,
    pub max_upload_bytes: usize,
}

#[cfg(feature = "docs")]
#[derive(serde::Serialize, utoipa::ToSchema)]
#[schema(title = "ApiResponseHealth")]
pub struct ApiResponseHealth {
    pub ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<HealthData>,
}

#[cfg_attr(feature = "docs", derive(ToSchema))]
#[cfg_attr(feature = "docs", schema(
    description = "A normalized or processed image as a PNG data URL, with its dimensions",
    example = json!({
        "success": true,
        "image": "data:image/png;base64,iVBORw0KGgo...",
        "width": 640,
        "height": 480
    })
))]
#[derive(Debug, Clone, Serialize)]
pub struct EditedImageResponse {
    pub success: bool,
    pub image: String,
    pub width: u32,
    pub height: u32,
}

impl From<EditedImage> for EditedImageResponse {
    fn from(edited: EditedImage) -> Self {
        Self {
            success: true,
            image: edited.image,
            width: edited.width,
            height: edited.height,
        }
    }
}

#[cfg_attr(feature = "docs", derive(ToSchema))]
#[cfg_attr(feature = "docs", schema(
    description = "Where the stored PNG can be fetched from",
    example = json!({
        "success": true,
        "download_url": "/download/processed_9f86d081884c7d659a2feaa0c55ad015a3bf4f1b2b0b822cd15d6c15b0f00a08.png"
    })
))]
#[derive(Debug, Clone, Serialize)]
pub struct DownloadLinkResponse {
    pub success: bool,
    pub download_url: String,
}

impl From<DownloadLink> for DownloadLinkResponse {
    fn from(link: DownloadLink) -> Self {
        Self {
            success: true,
            download_url: link.url,
        }
    }
}

#[cfg_attr(feature = "docs", derive(ToResponse))]
#[cfg_attr(feature = "docs", response(
    description = "Stored PNG as an attachment",
    content_type = "image/png",
    headers(
        ("Content-Disposition" = String)
    )
))]
pub struct PngDownloadResponse {
    pub file_name: String,
    pub png_data: Vec<u8>,
}

impl IntoResponse for PngDownloadResponse {
    fn into_response(self) -> Response {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("image/png"));
        let disposition = format!("attachment; filename=\"{}\"", self.file_name);
        if let Ok(disposition_value) = HeaderValue::from_str(&disposition) {
            headers.insert(CONTENT_DISPOSITION, disposition_value);
        }
        (headers, self.png_data).into_response()
    }
}
