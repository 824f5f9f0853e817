use crate::error::AppResult;
use domain::{operation::Operation, pixel_buffer::PixelBuffer};
use std::sync::Arc;

pub trait ImageProcessorPort: Send + Sync {
    fn apply(&self, operation: &Operation, image: &PixelBuffer) -> AppResult<PixelBuffer>;
}

pub type DynImageProcessorPort = Arc<dyn ImageProcessorPort>;
