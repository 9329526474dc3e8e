//! Image encoding: `RgbImage` → PNG bytes, base64 inline parts and data URLs.
//!
//! PNG is lossless, which keeps rendered text crisp for the vision model and
//! avoids re-compression artefacts in cropped profile photos.

use std::io::Cursor;

use base64::{engine::general_purpose::STANDARD, Engine as _};
use image::{ImageFormat, RgbImage};
use tracing::debug;

use super::DocumentError;
use crate::llm_client::InlineImage;

const PNG_MIME: &str = "image/png";

pub fn encode_png(img: &RgbImage) -> Result<Vec<u8>, DocumentError> {
    let mut buf = Vec::new();
    img.write_to(&mut Cursor::new(&mut buf), ImageFormat::Png)
        .map_err(DocumentError::Encode)?;
    Ok(buf)
}

/// Encodes the image as a base64 PNG part for a model request.
pub fn inline_png(img: &RgbImage) -> Result<InlineImage, DocumentError> {
    let data = STANDARD.encode(encode_png(img)?);
    debug!("Encoded image → {} bytes base64", data.len());
    Ok(InlineImage {
        mime_type: PNG_MIME,
        data,
    })
}

/// Encodes the image as a self-contained `data:image/png;base64,...` URL.
pub fn png_data_url(img: &RgbImage) -> Result<String, DocumentError> {
    let data = STANDARD.encode(encode_png(img)?);
    Ok(format!("data:{PNG_MIME};base64,{data}"))
}
