use domain::{
    operation::{Operation, scaled_dimensions},
    pixel_buffer::PixelBuffer,
};
use image::{RgbImage, imageops, imageops::FilterType};
use retouch_application::{error::AppResult, ports::outgoing::image_processor::ImageProcessorPort};
use tracing::{debug, instrument};

use super::convert::{from_rgb_image, to_rgb_image};

const MID_GRAY: f32 = 128.0;

const UNSHARP_RADIUS: f32 = 2.0;
const UNSHARP_THRESHOLD: i16 = 3;

const SEPIA_MATRIX: [[f32; 3]; 3] = [
    [0.393, 0.769, 0.189],
    [0.349, 0.686, 0.168],
    [0.272, 0.534, 0.131],
];

const VINTAGE_BRIGHTNESS: f32 = 0.9;
const VINTAGE_CONTRAST: f32 = 1.1;
const VINTAGE_OFFSET: [f32; 3] = [10.0, 5.0, 0.0];

const ENHANCE_CONTRAST: f32 = 1.1;
const ENHANCE_SHARPNESS: f32 = 1.2;

// Normalized by its sum inside filter3x3.
const SMOOTH_KERNEL: [f32; 9] = [1.0, 1.0, 1.0, 1.0, 5.0, 1.0, 1.0, 1.0, 1.0];

#[derive(Clone, Copy, Default)]
pub struct ImageRsProcessorAdapter;

impl ImageRsProcessorAdapter {
    pub fn new() -> Self {
        Self
    }
}

impl ImageProcessorPort for ImageRsProcessorAdapter {
    #[instrument(skip(self, image), fields(kind = %operation.kind(), width = image.width(), height = image.height()))]
    fn apply(&self, operation: &Operation, image: &PixelBuffer) -> AppResult<PixelBuffer> {
        let source = to_rgb_image(image)?;

        let output = match *operation {
            Operation::Resize { scale } => resize(&source, scale),
            Operation::Blur { radius } => blur(&source, radius as f32),
            Operation::Sharpen { strength } => {
                unsharp_mask(&source, UNSHARP_RADIUS, strength as f32 * 100.0, UNSHARP_THRESHOLD)
            }
            Operation::Brightness { factor } => brightness(&source, factor as f32),
            Operation::Contrast { factor } => contrast(&source, factor as f32),
            Operation::Saturation { factor } => saturation(&source, factor as f32),
            Operation::Grayscale => grayscale(&source),
            Operation::Sepia => sepia(&source),
            Operation::Vintage => vintage(&source),
            Operation::Enhance => enhance(&source),
        };

        debug!(
            out_width = output.width(),
            out_height = output.height(),
            "Transform complete"
        );
        from_rgb_image(output)
    }
}

// Truncates like an 8-bit cast.
#[inline]
fn clamp_channel(value: f32) -> u8 {
    value.clamp(0.0, 255.0) as u8
}

/// ITU-R BT.601 luma in 16-bit fixed point, rounded.
#[inline]
pub fn luma(r: u8, g: u8, b: u8) -> u8 {
    let weighted = 19_595 * u32::from(r) + 38_470 * u32::from(g) + 7_471 * u32::from(b);
    ((weighted + 0x8000) >> 16) as u8
}

fn map_pixels(source: &RgbImage, f: impl Fn([f32; 3]) -> [f32; 3]) -> RgbImage {
    let mut output = source.clone();
    for pixel in output.pixels_mut() {
        let mapped = f(pixel.0.map(f32::from));
        pixel.0 = mapped.map(clamp_channel);
    }
    output
}

fn resize(source: &RgbImage, scale: f64) -> RgbImage {
    let (width, height) = scaled_dimensions(source.width(), source.height(), scale);
    imageops::resize(source, width, height, FilterType::CatmullRom)
}

fn blur(source: &RgbImage, radius: f32) -> RgbImage {
    if radius <= 0.0 {
        return source.clone();
    }
    imageops::blur(source, radius)
}

/// Adds `percent`% of the difference from a blurred copy, skipping channels
/// whose difference is below `threshold`.
fn unsharp_mask(source: &RgbImage, radius: f32, percent: f32, threshold: i16) -> RgbImage {
    let blurred = imageops::blur(source, radius);
    let mut output = source.clone();

    for (pixel, soft) in output.pixels_mut().zip(blurred.pixels()) {
        for (channel, soft_channel) in pixel.0.iter_mut().zip(soft.0) {
            let diff = i16::from(*channel) - i16::from(soft_channel);
            if diff.abs() >= threshold {
                *channel = clamp_channel(f32::from(*channel) + f32::from(diff) * percent / 100.0);
            }
        }
    }

    output
}

fn brightness(source: &RgbImage, factor: f32) -> RgbImage {
    map_pixels(source, |rgb| rgb.map(|v| v * factor))
}

fn contrast(source: &RgbImage, factor: f32) -> RgbImage {
    map_pixels(source, |rgb| rgb.map(|v| MID_GRAY + (v - MID_GRAY) * factor))
}

fn saturation(source: &RgbImage, factor: f32) -> RgbImage {
    map_pixels(source, |rgb| {
        let gray = f32::from(luma(
            clamp_channel(rgb[0]),
            clamp_channel(rgb[1]),
            clamp_channel(rgb[2]),
        ));
        rgb.map(|v| gray + (v - gray) * factor)
    })
}

fn grayscale(source: &RgbImage) -> RgbImage {
    let mut output = source.clone();
    for pixel in output.pixels_mut() {
        let [r, g, b] = pixel.0;
        pixel.0 = [luma(r, g, b); 3];
    }
    output
}

fn sepia(source: &RgbImage) -> RgbImage {
    map_pixels(source, |[r, g, b]| {
        SEPIA_MATRIX.map(|[kr, kg, kb]| r * kr + g * kg + b * kb)
    })
}

fn vintage(source: &RgbImage) -> RgbImage {
    let toned = contrast(&brightness(source, VINTAGE_BRIGHTNESS), VINTAGE_CONTRAST);
    map_pixels(&toned, |[r, g, b]| {
        let [dr, dg, db] = VINTAGE_OFFSET;
        [r + dr, g + dg, b + db]
    })
}

fn enhance(source: &RgbImage) -> RgbImage {
    sharpness(&contrast(source, ENHANCE_CONTRAST), ENHANCE_SHARPNESS)
}

/// Extrapolates away from a smoothed copy. `filter3x3` leaves the outer ring
/// unfiltered, so border pixels keep their source values.
fn sharpness(source: &RgbImage, factor: f32) -> RgbImage {
    let smoothed: RgbImage = imageops::filter3x3(source, &SMOOTH_KERNEL);
    let (width, height) = source.dimensions();
    let mut output = source.clone();

    for (x, y, pixel) in output.enumerate_pixels_mut() {
        if x == 0 || y == 0 || x + 1 >= width || y + 1 >= height {
            continue;
        }
        let soft = smoothed.get_pixel(x, y);
        for (channel, soft_channel) in pixel.0.iter_mut().zip(soft.0) {
            let soft_value = f32::from(soft_channel);
            *channel = clamp_channel(soft_value + factor * (f32::from(*channel) - soft_value));
        }
    }

    output
}
