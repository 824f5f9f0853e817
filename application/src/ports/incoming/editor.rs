use crate::{
    editor::commands::{DownloadLink, EditedImage, ProcessCommand, UploadedFile},
    error::AppResult,
};

#[async_trait::async_trait]
pub trait UploadImageUseCase: Send + Sync {
    async fn upload(&self, file: Option<UploadedFile>) -> AppResult<EditedImage>;
}

#[async_trait::async_trait]
pub trait ProcessImageUseCase: Send + Sync {
    async fn process(&self, command: ProcessCommand) -> AppResult<EditedImage>;
}

#[async_trait::async_trait]
pub trait DownloadImageUseCase: Send + Sync {
    async fn prepare_download(&self, image: Option<String>) -> AppResult<DownloadLink>;

    async fn fetch_download(&self, file_name: &str) -> AppResult<Vec<u8>>;
}
