use async_trait::async_trait;
use sha2::{Digest, Sha256};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

use domain::encoded_image::EncodedImage;
use retouch_application::{
    error::{AppError, AppResult},
    ports::outgoing::output_store::OutputStorePort,
};

const FILE_PREFIX: &str = "processed_";

pub struct FsOutputStoreAdapter {
    root: PathBuf,
}

impl FsOutputStoreAdapter {
    /// Opens the output directory, creating it when missing.
    pub async fn create(root: impl Into<PathBuf>) -> AppResult<Self> {
        let root = root.into();
        fs::create_dir_all(&root).await?;
        info!(path = %root.display(), "Output directory ready");
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn resolve(&self, file_name: &str) -> Option<PathBuf> {
        is_safe_file_name(file_name).then(|| self.root.join(file_name))
    }
}

/// Lowercase hex SHA-256 of `data`.
pub fn content_digest(data: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(data);
    hex::encode(hasher.finalize())
}

pub fn file_name_for(image: &EncodedImage) -> String {
    format!(
        "{FILE_PREFIX}{}.{}",
        content_digest(&image.bytes),
        image.format.extension()
    )
}

fn is_safe_file_name(name: &str) -> bool {
    !name.is_empty()
        && !name.starts_with('.')
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-'))
}

#[async_trait]
impl OutputStorePort for FsOutputStoreAdapter {
    #[instrument(skip(self, image), fields(bytes = image.bytes.len()))]
    async fn persist(&self, image: &EncodedImage) -> AppResult<String> {
        let file_name = file_name_for(image);
        let target = self.root.join(&file_name);

        if fs::try_exists(&target).await? {
            debug!(%file_name, "Reusing stored output with identical content");
            return Ok(file_name);
        }

        let staging = self.root.join(format!(".{}.tmp", Uuid::new_v4()));
        fs::write(&staging, &image.bytes).await?;

        if let Err(e) = fs::rename(&staging, &target).await {
            if let Err(cleanup) = fs::remove_file(&staging).await {
                warn!(error = %cleanup, path = %staging.display(), "Failed to remove staging file");
            }
            return Err(AppError::IoError(e));
        }

        info!(%file_name, "Stored processed image");
        Ok(file_name)
    }

    #[instrument(skip(self))]
    async fn open(&self, file_name: &str) -> AppResult<Vec<u8>> {
        let not_found = || AppError::NotFound {
            message: format!("File '{file_name}' not found"),
        };

        let path = self.resolve(file_name).ok_or_else(not_found)?;

        match fs::read(&path).await {
            Ok(bytes) => Ok(bytes),
            Err(e) if e.kind() == ErrorKind::NotFound => Err(not_found()),
            Err(e) => Err(AppError::IoError(e)),
        }
    }
}
