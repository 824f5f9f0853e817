use std::sync::Arc;

use retouch_application::{
    infrastructure_config::Config,
    ports::incoming::editor::{DownloadImageUseCase, ProcessImageUseCase, UploadImageUseCase},
};

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub upload_use_case: Arc<dyn UploadImageUseCase + Send + Sync>,
    pub process_use_case: Arc<dyn ProcessImageUseCase + Send + Sync>,
    pub download_use_case: Arc<dyn DownloadImageUseCase + Send + Sync>,
}

impl AppState {
    pub fn new(
        config: Arc<Config>,
        upload_use_case: Arc<dyn UploadImageUseCase + Send + Sync>,
        process_use_case: Arc<dyn ProcessImageUseCase + Send + Sync>,
        download_use_case: Arc<dyn DownloadImageUseCase + Send + Sync>,
    ) -> Self {
        Self {
            config,
            upload_use_case,
            process_use_case,
            download_use_case,
        }
    }
}
