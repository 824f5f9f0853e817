//! Data-URL transport encoding for images embedded in JSON payloads.

use base64::{Engine, engine::general_purpose::STANDARD as BASE64_STANDARD};

use crate::error::{AppError, AppResult};
use domain::encoded_image::EncodedImage;

const DATA_SCHEME: &str = "data:";
const BASE64_MARKER: &str = ";base64";

#[must_use]
pub fn to_data_url(image: &EncodedImage) -> String {
    format!(
        "{DATA_SCHEME}{}{BASE64_MARKER},{}",
        image.media_type(),
        BASE64_STANDARD.encode(&image.bytes)
    )
}

/// Decodes transport text back into encoded image bytes.
///
/// Accepts either a full `data:image/<type>;base64,<payload>` URL or the bare
/// base64 payload. ASCII whitespace inside the payload is skipped. A `data:`
/// prefix that does not declare a base64 image is rejected.
pub fn from_data_url(text: &str) -> AppResult<Vec<u8>> {
    let text = text.trim();
    let payload = match text.strip_prefix(DATA_SCHEME) {
        Some(rest) => split_data_url(rest)?,
        None => text,
    };

    let payload: String = payload
        .chars()
        .filter(|c| !c.is_ascii_whitespace())
        .collect();
    if payload.is_empty() {
        return Err(AppError::decode("image payload is empty"));
    }

    BASE64_STANDARD
        .decode(&payload)
        .map_err(|e| AppError::decode(format!("image payload is not valid base64: {e}")))
}

fn split_data_url(rest: &str) -> AppResult<&str> {
    let (header, payload) = rest
        .split_once(',')
        .ok_or_else(|| AppError::decode("data URL has no payload separator"))?;

    let media_type = header
        .strip_suffix(BASE64_MARKER)
        .ok_or_else(|| AppError::decode("data URL is not base64 encoded"))?;

    if !media_type.starts_with("image/") {
        return Err(AppError::decode(format!(
            "data URL declares '{media_type}', expected an image type"
        )));
    }

    Ok(payload)
}
