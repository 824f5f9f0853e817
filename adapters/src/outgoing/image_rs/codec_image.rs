use domain::{encoded_image::EncodedImage, pixel_buffer::PixelBuffer};
use image::{ImageFormat, ImageReader, Limits};
use retouch_application::{
    error::{AppError, AppResult},
    ports::outgoing::image_codec::ImageCodecPort,
};
use std::io::Cursor;
use tracing::{debug, instrument};

use super::convert::{from_rgb_image, to_rgb_image};

#[derive(Copy, Clone)]
pub struct ImageRsCodecConfig {
    /// Upper bound on decoded pixels; guards against small files that
    /// declare huge dimensions.
    pub max_decoded_pixels: u64,
}

#[derive(Clone)]
pub struct ImageRsCodecAdapter {
    max_decoded_pixels: u64,
}

impl ImageRsCodecAdapter {
    pub fn new(config: ImageRsCodecConfig) -> Self {
        Self {
            max_decoded_pixels: config.max_decoded_pixels,
        }
    }

    fn limits(&self) -> Limits {
        let mut limits = Limits::default();
        // RGBA at 16 bits per channel is the widest intermediate a decoder may hold.
        limits.max_alloc = Some(self.max_decoded_pixels.saturating_mul(8));
        limits
    }

    #[instrument(skip(self, data), fields(data_len = data.len()))]
    fn decode_impl(&self, data: &[u8]) -> AppResult<PixelBuffer> {
        let mut reader = ImageReader::new(Cursor::new(data))
            .with_guessed_format()
            .map_err(|e| AppError::decode(format!("Failed to read image: {e}")))?;

        let format = reader
            .format()
            .ok_or_else(|| AppError::decode("Unrecognized image format"))?;
        reader.limits(self.limits());

        let img = reader
            .decode()
            .map_err(|e| AppError::decode(format!("Failed to decode {format:?}: {e}")))?;

        let pixels = u64::from(img.width()) * u64::from(img.height());
        if pixels > self.max_decoded_pixels {
            return Err(AppError::decode(format!(
                "Image is {}x{}, above the {} pixel limit",
                img.width(),
                img.height(),
                self.max_decoded_pixels
            )));
        }

        let rgb = img.to_rgb8();
        debug!(
            ?format,
            width = rgb.width(),
            height = rgb.height(),
            "Decoded image to RGB"
        );

        from_rgb_image(rgb)
    }

    #[instrument(skip(self, image), fields(width = image.width(), height = image.height()))]
    fn encode_impl(&self, image: &PixelBuffer) -> AppResult<EncodedImage> {
        let rgb = to_rgb_image(image)?;

        let mut png_bytes = Vec::new();
        rgb.write_to(&mut Cursor::new(&mut png_bytes), ImageFormat::Png)
            .map_err(|e| AppError::processing(format!("Failed to encode PNG: {e}")))?;

        if png_bytes.is_empty() {
            return Err(AppError::processing("PNG encoding produced empty output"));
        }

        debug!("Encoded PNG: {} bytes", png_bytes.len());
        Ok(EncodedImage::png(png_bytes, image.width(), image.height()))
    }
}

impl ImageCodecPort for ImageRsCodecAdapter {
    fn decode(&self, data: &[u8]) -> AppResult<PixelBuffer> {
        self.decode_impl(data)
    }

    fn encode_lossless(&self, image: &PixelBuffer) -> AppResult<EncodedImage> {
        self.encode_impl(image)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{DynamicImage, GrayImage, Luma, Rgb, RgbImage, Rgba, RgbaImage};
    use retouch_application::editor::transport::{from_data_url, to_data_url};

    fn codec() -> ImageRsCodecAdapter {
        ImageRsCodecAdapter::new(ImageRsCodecConfig {
            max_decoded_pixels: 1_000_000,
        })
    }

    fn gradient(width: u32, height: u32) -> PixelBuffer {
        let img = RgbImage::from_fn(width, height, |x, y| {
            Rgb([(x * 17 % 256) as u8, (y * 29 % 256) as u8, ((x + y) * 7 % 256) as u8])
        });
        from_rgb_image(img).unwrap()
    }

    fn encode_as(img: &DynamicImage, format: ImageFormat) -> Vec<u8> {
        let mut bytes = Vec::new();
        img.write_to(&mut Cursor::new(&mut bytes), format).unwrap();
        bytes
    }

    #[test]
    fn encode_then_decode_is_lossless() {
        let buffer = gradient(13, 7);
        let encoded = codec().encode_lossless(&buffer).unwrap();

        assert_eq!(encoded.media_type(), "image/png");
        assert_eq!((encoded.width, encoded.height), (13, 7));
        assert_eq!(codec().decode(&encoded.bytes).unwrap(), buffer);
    }

    #[test]
    fn decoded_inputs_are_stable_through_png() {
        let source = DynamicImage::ImageRgb8(to_rgb_image(&gradient(9, 5)).unwrap());

        for format in [
            ImageFormat::Png,
            ImageFormat::Bmp,
            ImageFormat::Gif,
            ImageFormat::WebP,
        ] {
            let first = codec().decode(&encode_as(&source, format)).unwrap();
            assert_eq!(first.dimensions(), (9, 5), "{format:?}");
            let reencoded = codec().encode_lossless(&first).unwrap();
            let second = codec().decode(&reencoded.bytes).unwrap();
            assert_eq!(first, second, "{format:?}");
        }
    }

    #[test]
    fn lossy_input_is_stable_after_first_decode() {
        let source = DynamicImage::ImageRgb8(to_rgb_image(&gradient(16, 16)).unwrap());
        let first = codec().decode(&encode_as(&source, ImageFormat::Jpeg)).unwrap();
        let second = codec()
            .decode(&codec().encode_lossless(&first).unwrap().bytes)
            .unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn transport_round_trip_is_exact() {
        let buffer = gradient(6, 4);
        let text = to_data_url(&codec().encode_lossless(&buffer).unwrap());
        let decoded = codec().decode(&from_data_url(&text).unwrap()).unwrap();
        assert_eq!(decoded, buffer);
    }

    #[test]
    fn grayscale_sources_expand_to_rgb() {
        let gray = DynamicImage::ImageLuma8(GrayImage::from_pixel(2, 2, Luma([90])));
        let decoded = codec().decode(&encode_as(&gray, ImageFormat::Png)).unwrap();
        assert!(decoded.pixels().all(|p| p == [90, 90, 90]));
    }

    #[test]
    fn alpha_channel_is_dropped() {
        let rgba = DynamicImage::ImageRgba8(RgbaImage::from_pixel(3, 1, Rgba([10, 20, 30, 0])));
        let decoded = codec().decode(&encode_as(&rgba, ImageFormat::Png)).unwrap();
        assert_eq!(decoded.as_raw().len(), 9);
        assert_eq!(decoded.pixel(0, 0), Some([10, 20, 30]));
    }

    #[test]
    fn garbage_is_a_decode_error() {
        let err = codec().decode(b"definitely not an image").unwrap_err();
        assert!(matches!(err, AppError::DecodeError { .. }));

        let err = codec().decode(&[0x89, b'P', b'N', b'G', 0x0D, 0x0A]).unwrap_err();
        assert!(matches!(err, AppError::DecodeError { .. }));
    }

    #[test]
    fn oversized_images_are_refused() {
        let small = ImageRsCodecAdapter::new(ImageRsCodecConfig {
            max_decoded_pixels: 10,
        });
        let bytes = codec().encode_lossless(&gradient(4, 4)).unwrap().bytes;
        assert!(matches!(
            small.decode(&bytes),
            Err(AppError::DecodeError { .. })
        ));
    }
}
