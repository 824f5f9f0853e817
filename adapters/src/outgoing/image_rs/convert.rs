use domain::pixel_buffer::PixelBuffer;
use image::RgbImage;
use retouch_application::error::{AppError, AppResult};

pub fn to_rgb_image(buffer: &PixelBuffer) -> AppResult<RgbImage> {
    RgbImage::from_raw(buffer.width(), buffer.height(), buffer.as_raw().to_vec()).ok_or_else(
        || {
            AppError::processing(format!(
                "Failed to create {}x{} RGB image from pixel buffer",
                buffer.width(),
                buffer.height()
            ))
        },
    )
}

pub fn from_rgb_image(image: RgbImage) -> AppResult<PixelBuffer> {
    let (width, height) = image.dimensions();
    Ok(PixelBuffer::new(width, height, image.into_raw())?)
}
