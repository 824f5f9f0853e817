use serde::{Deserialize, Serialize};
use std::fmt;
#[cfg(feature = "docs")]
use utoipa::ToSchema;

#[cfg_attr(feature = "docs", derive(ToSchema))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EncodedFormat {
    Png,
}

impl EncodedFormat {
    #[must_use]
    pub fn media_type(self) -> &'static str {
        match self {
            Self::Png => "image/png",
        }
    }

    #[must_use]
    pub fn extension(self) -> &'static str {
        match self {
            Self::Png => "png",
        }
    }
}

impl fmt::Display for EncodedFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

/// Losslessly encoded image together with the dimensions of the buffer it
/// was produced from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedImage {
    pub bytes: Vec<u8>,
    pub format: EncodedFormat,
    pub width: u32,
    pub height: u32,
}

impl EncodedImage {
    #[must_use]
    pub fn png(bytes: Vec<u8>, width: u32, height: u32) -> Self {
        Self {
            bytes,
            format: EncodedFormat::Png,
            width,
            height,
        }
    }

    #[must_use]
    pub fn media_type(&self) -> &'static str {
        self.format.media_type()
    }
}
