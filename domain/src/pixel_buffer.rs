use crate::error::{DomainError, DomainResult};

pub const CHANNELS: usize = 3;

/// Decoded image held as tightly packed 8-bit RGB triples, row-major.
///
/// A buffer is never mutated once built: transforms produce a new one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl PixelBuffer {
    pub fn new(width: u32, height: u32, data: Vec<u8>) -> DomainResult<Self> {
        if width == 0 || height == 0 {
            return Err(DomainError::InvalidDimensions(format!(
                "{width}x{height} has a zero-length side"
            )));
        }

        let expected = Self::byte_len(width, height).ok_or_else(|| {
            DomainError::InvalidDimensions(format!("{width}x{height} overflows addressable memory"))
        })?;

        if data.len() != expected {
            return Err(DomainError::InvalidDimensions(format!(
                "{width}x{height} RGB needs {expected} bytes, got {}",
                data.len()
            )));
        }

        Ok(Self {
            width,
            height,
            data,
        })
    }

    pub fn filled(width: u32, height: u32, rgb: [u8; 3]) -> DomainResult<Self> {
        let pixel_count = (width as usize).saturating_mul(height as usize);
        let data = rgb.repeat(pixel_count);
        Self::new(width, height, data)
    }

    fn byte_len(width: u32, height: u32) -> Option<usize> {
        (width as usize)
            .checked_mul(height as usize)?
            .checked_mul(CHANNELS)
    }

    #[must_use]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[must_use]
    pub fn height(&self) -> u32 {
        self.height
    }

    #[must_use]
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    #[must_use]
    pub fn pixel_count(&self) -> u64 {
        u64::from(self.width) * u64::from(self.height)
    }

    #[must_use]
    pub fn as_raw(&self) -> &[u8] {
        &self.data
    }

    #[must_use]
    pub fn into_raw(self) -> Vec<u8> {
        self.data
    }

    #[must_use]
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 3]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let offset = (y as usize * self.width as usize + x as usize) * CHANNELS;
        let slice = self.data.get(offset..offset + CHANNELS)?;
        <[u8; 3]>::try_from(slice).ok()
    }

    pub fn pixels(&self) -> impl Iterator<Item = [u8; 3]> + '_ {
        self.data
            .chunks_exact(CHANNELS)
            .map(|chunk| <[u8; 3]>::try_from(chunk).unwrap_or([0, 0, 0]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_zero_sides() {
        assert!(matches!(
            PixelBuffer::new(0, 4, Vec::new()),
            Err(DomainError::InvalidDimensions(_))
        ));
        assert!(PixelBuffer::new(4, 0, Vec::new()).is_err());
    }

    #[test]
    fn rejects_mismatched_length() {
        let err = PixelBuffer::new(2, 2, vec![0; 11]).unwrap_err();
        assert!(err.to_string().contains("needs 12 bytes"));
    }

    #[test]
    fn filled_buffer_reports_pixels() {
        let buffer = PixelBuffer::filled(3, 2, [10, 20, 30]).unwrap();
        assert_eq!(buffer.dimensions(), (3, 2));
        assert_eq!(buffer.pixel_count(), 6);
        assert_eq!(buffer.pixel(2, 1), Some([10, 20, 30]));
        assert_eq!(buffer.pixel(3, 0), None);
        assert!(buffer.pixels().all(|p| p == [10, 20, 30]));
    }
}
