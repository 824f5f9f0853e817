use crate::incoming::http_axum::{dto, handlers};
use domain::operation::OperationKind;
use dto::common_responses::{
    BadRequestResponse, InternalServerErrorResponse, NotFoundResponse, PayloadTooLargeResponse,
};
use dto::requests::{DownloadRequest, ProcessRequest};
use dto::responses::{
    ApiResponseHealth, DownloadLinkResponse, EditedImageResponse, HealthData, PngDownloadResponse,
};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::health::health_check,
        handlers::upload::upload_image,
        handlers::process::process_image,
        handlers::download::create_download,
        handlers::download::serve_download,
    ),
    components(
        schemas(
            ProcessRequest,
            DownloadRequest,
            EditedImageResponse,
            DownloadLinkResponse,
            HealthData,
            ApiResponseHealth,
            OperationKind
        ),
        responses(
            PngDownloadResponse,
            BadRequestResponse,
            NotFoundResponse,
            PayloadTooLargeResponse,
            InternalServerErrorResponse
        )
    ),
    tags(
        (name = "editor", description = "Upload, transform and download images. Images travel as PNG data URLs; every response image is lossless PNG."),
        (name = "system", description = "System health and status monitoring")
    ),
    info(
        title = "Retouch API",
        description = "A small image editing service: upload an image, apply one of ten transforms (resize, blur, sharpen, brightness, contrast, saturation, grayscale, sepia, vintage, enhance) and download the result.",
        contact(
            name = "Retouch",
        ),
    ),
    servers(
        (url = "http://localhost:5000", description = "Development server"),
    )
)]
pub struct ApiDoc;
