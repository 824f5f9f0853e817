use std::time::Duration;

use crate::infrastructure_config::EditorConfig;

#[derive(Debug, Clone)]
pub struct EditorSettings {
    pub max_upload_bytes: usize,
    pub allowed_extensions: Vec<String>,
    pub max_output_pixels: u64,
    pub processing_timeout: Duration,
}

impl From<&EditorConfig> for EditorSettings {
    fn from(config: &EditorConfig) -> Self {
        Self {
            max_upload_bytes: config.max_upload_bytes,
            allowed_extensions: config.allowed_extensions.clone(),
            max_output_pixels: config.max_output_pixels,
            processing_timeout: Duration::from_secs(config.processing_timeout_secs),
        }
    }
}

impl Default for EditorSettings {
    fn default() -> Self {
        Self::from(&EditorConfig::default())
    }
}
