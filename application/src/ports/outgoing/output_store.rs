use crate::error::AppResult;
use domain::encoded_image::EncodedImage;
use std::sync::Arc;

#[async_trait::async_trait]
pub trait OutputStorePort: Send + Sync {
    /// Stores the encoded image and returns the file name it can be fetched by.
    async fn persist(&self, image: &EncodedImage) -> AppResult<String>;

    async fn open(&self, file_name: &str) -> AppResult<Vec<u8>>;
}

pub type DynOutputStorePort = Arc<dyn OutputStorePort>;
