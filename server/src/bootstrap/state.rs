use std::sync::Arc;
use tracing::info;

use retouch_adapters::outgoing::{
    filesystem::output_store_fs::FsOutputStoreAdapter,
    image_rs::{
        codec_image::{ImageRsCodecAdapter, ImageRsCodecConfig},
        processor_image::ImageRsProcessorAdapter,
    },
    tokio_spawn::processing_timeout_tokio::TokioProcessingTimeoutAdapter,
};
use retouch_adapters::shared::app_state::AppState as AdaptersAppState;
use retouch_application::{
    config::EditorSettings,
    editor::service::{EditorService, EditorServiceDeps},
    error::AppError,
    infrastructure_config::Config,
    ports::outgoing::{
        image_codec::ImageCodecPort, image_processor::ImageProcessorPort,
        output_store::OutputStorePort, timeout::ProcessingTimeoutPort,
    },
};

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub editor_service: Arc<EditorService>,
}

impl AppState {
    pub async fn new(config: Config) -> Result<Self, AppError> {
        let config = Arc::new(config);
        let editor_service = Self::create_editor_service(&config).await?;

        info!("Editor service ready");

        Ok(Self {
            config,
            editor_service,
        })
    }

    async fn create_editor_service(config: &Config) -> Result<Arc<EditorService>, AppError> {
        let codec_port: Arc<dyn ImageCodecPort> =
            Arc::new(ImageRsCodecAdapter::new(ImageRsCodecConfig {
                max_decoded_pixels: config.editor.max_output_pixels,
            }));
        let processor_port: Arc<dyn ImageProcessorPort> = Arc::new(ImageRsProcessorAdapter::new());
        let output_store: Arc<dyn OutputStorePort> =
            Arc::new(FsOutputStoreAdapter::create(&config.storage.output_dir).await?);
        let timeout_port: Arc<dyn ProcessingTimeoutPort> =
            Arc::new(TokioProcessingTimeoutAdapter::new(config.editor.max_concurrent_jobs));

        Ok(EditorService::new(
            EditorSettings::from(&config.editor),
            EditorServiceDeps {
                codec_port,
                processor_port,
                output_store,
                timeout_port,
            },
        ))
    }

    pub fn to_adapters_state(&self) -> AdaptersAppState {
        AdaptersAppState::new(
            Arc::clone(&self.config),
            Arc::clone(&self.editor_service) as _,
            Arc::clone(&self.editor_service) as _,
            Arc::clone(&self.editor_service) as _,
        )
    }
}
