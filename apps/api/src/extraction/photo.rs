//! Profile-photo locator: asks the model for the bounding box of a formal ID
//! photo, then crops that region out of the normalized image.
//!
//! Every failure on this path is non-fatal. The caller gets `None` and the
//! extraction continues without a photo.

use image::{imageops, RgbImage};
use serde::Deserialize;
use tracing::{info, warn};

use crate::document::encode::png_data_url;
use crate::document::NormalizedImage;
use crate::extraction::prompts::PROFILE_PHOTO_PROMPT;
use crate::llm_client::{InlineImage, VisionModel};

/// Side length of the model's normalized coordinate grid.
const GRID_SIZE: f64 = 1000.0;

/// A region must be larger than this many pixels on both axes.
const MIN_REGION_PX: i64 = 10;

/// Box on the 0–1000 grid as returned by the model. All four fields must be
/// JSON numbers; quoted numbers are rejected.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct GridBox {
    pub x_min: f64,
    pub y_min: f64,
    pub x_max: f64,
    pub y_max: f64,
}

/// Pixel-space crop rectangle, inclusive of `x`/`y`, `width`×`height` in size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PixelRegion {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

/// Reads the model's answer. Anything that does not start with `{` means the
/// model found no photo.
pub fn parse_grid_box(response: &str) -> Option<GridBox> {
    let text = response.trim();
    if !text.starts_with('{') {
        let preview: String = text.chars().take(50).collect();
        info!("No profile photo: model answered with text instead of coordinates - {preview:?}");
        return None;
    }
    match serde_json::from_str::<GridBox>(text) {
        Ok(grid_box) => Some(grid_box),
        Err(e) => {
            warn!("No profile photo: invalid coordinate JSON: {e}");
            None
        }
    }
}

/// Scales a grid box to pixel space (truncating toward zero) and clamps it to
/// the image. Regions whose scaled width or height is 10 px or less are
/// rejected.
pub fn scale_to_pixels(grid_box: &GridBox, width: u32, height: u32) -> Option<PixelRegion> {
    let scale = |coord: f64, extent: u32| (coord * f64::from(extent) / GRID_SIZE).trunc() as i64;

    let x_min = scale(grid_box.x_min, width);
    let y_min = scale(grid_box.y_min, height);
    let x_max = scale(grid_box.x_max, width);
    let y_max = scale(grid_box.y_max, height);

    // Coordinates far off the grid saturate at the i64 bounds.
    if x_max <= x_min.saturating_add(MIN_REGION_PX)
        || y_max <= y_min.saturating_add(MIN_REGION_PX)
    {
        info!("No profile photo: region too small");
        return None;
    }

    let clamp = |v: i64, extent: u32| v.clamp(0, i64::from(extent)) as u32;
    let (left, right) = (clamp(x_min, width), clamp(x_max, width));
    let (top, bottom) = (clamp(y_min, height), clamp(y_max, height));
    if right <= left || bottom <= top {
        info!("No profile photo: region lies outside the image");
        return None;
    }

    Some(PixelRegion {
        x: left,
        y: top,
        width: right - left,
        height: bottom - top,
    })
}

pub fn crop_region(image: &RgbImage, region: PixelRegion) -> RgbImage {
    imageops::crop_imm(image, region.x, region.y, region.width, region.height).to_image()
}

/// Asks the model for the profile photo and returns it as a PNG data URL.
pub async fn locate_profile_photo(
    model: &dyn VisionModel,
    image: &NormalizedImage,
    inline: &InlineImage,
) -> Option<String> {
    let response = match model.generate(PROFILE_PHOTO_PROMPT, inline).await {
        Ok(text) => text,
        Err(e) => {
            warn!("No profile photo: model call failed: {e}");
            return None;
        }
    };

    let grid_box = parse_grid_box(&response)?;
    let region = scale_to_pixels(&grid_box, image.width(), image.height())?;
    let cropped = crop_region(image.as_rgb(), region);

    match png_data_url(&cropped) {
        Ok(url) => {
            info!(
                "Profile photo extracted: {}x{} at ({}, {})",
                region.width, region.height, region.x, region.y
            );
            Some(url)
        }
        Err(e) => {
            warn!("No profile photo: {e}");
            None
        }
    }
}
