use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use domain::upload::DEFAULT_ALLOWED_EXTENSIONS;

pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 16 * 1024 * 1024;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub editor: EditorConfig,
    pub storage: StorageConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub cors_origin: Option<String>,
    pub static_dir: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EditorConfig {
    pub max_upload_bytes: usize,
    pub allowed_extensions: Vec<String>,
    pub max_output_pixels: u64,
    pub processing_timeout_secs: u64,
    pub max_concurrent_jobs: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    pub output_dir: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
    pub format: LogFormat,
    pub include_location: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum LogFormat {
    #[serde(rename = "json")]
    Json,
    #[serde(rename = "pretty")]
    Pretty,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 5000,
            cors_origin: None,
            static_dir: None,
        }
    }
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
            allowed_extensions: DEFAULT_ALLOWED_EXTENSIONS
                .iter()
                .map(ToString::to_string)
                .collect(),
            max_output_pixels: 64_000_000,
            processing_timeout_secs: 30,
            max_concurrent_jobs: 4,
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            output_dir: "processed".to_string(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::Pretty,
            include_location: false,
        }
    }
}

impl Config {
    #[must_use]
    pub fn server_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    pub fn validate(&self) -> AppResult<()> {
        self.editor.validate()?;

        if self.storage.output_dir.trim().is_empty() {
            return Err(AppError::ConfigError {
                message: "storage.output_dir cannot be empty".to_string(),
            });
        }

        Ok(())
    }
}

impl EditorConfig {
    pub fn validate(&self) -> AppResult<()> {
        if self.max_upload_bytes == 0 {
            return Err(AppError::ConfigError {
                message: "editor.max_upload_bytes must be greater than 0".to_string(),
            });
        }

        if self.max_output_pixels == 0 {
            return Err(AppError::ConfigError {
                message: "editor.max_output_pixels must be greater than 0".to_string(),
            });
        }

        if self.processing_timeout_secs == 0 {
            return Err(AppError::ConfigError {
                message: "editor.processing_timeout_secs must be greater than 0".to_string(),
            });
        }

        if self.max_concurrent_jobs == 0 {
            return Err(AppError::ConfigError {
                message: "editor.max_concurrent_jobs must be greater than 0".to_string(),
            });
        }

        if self.allowed_extensions.is_empty() {
            return Err(AppError::ConfigError {
                message: "editor.allowed_extensions cannot be empty".to_string(),
            });
        }

        if let Some(bad) = self
            .allowed_extensions
            .iter()
            .find(|ext| ext.is_empty() || ext.starts_with('.'))
        {
            return Err(AppError::ConfigError {
                message: format!("Invalid upload extension '{bad}', list bare names like \"png\""),
            });
        }

        Ok(())
    }
}
