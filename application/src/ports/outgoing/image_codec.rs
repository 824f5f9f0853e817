use crate::error::AppResult;
use domain::{encoded_image::EncodedImage, pixel_buffer::PixelBuffer};
use std::sync::Arc;

pub trait ImageCodecPort: Send + Sync {
    /// Decodes any supported container into a 3-channel RGB buffer.
    fn decode(&self, data: &[u8]) -> AppResult<PixelBuffer>;
    fn encode_lossless(&self, image: &PixelBuffer) -> AppResult<EncodedImage>;
}

pub type DynImageCodecPort = Arc<dyn ImageCodecPort>;
