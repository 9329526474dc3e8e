use image::imageops::FilterType;
use image::{DynamicImage, Rgb, RgbImage};

use super::DocumentError;

/// Decodes any supported raster format, sniffing the format from content.
pub fn decode(bytes: &[u8]) -> Result<DynamicImage, DocumentError> {
    image::load_from_memory(bytes).map_err(DocumentError::Decode)
}

/// Downscales so neither edge exceeds `max_edge`, preserving aspect ratio.
/// Images already inside the box are returned untouched.
pub fn fit_within(img: DynamicImage, max_edge: u32) -> DynamicImage {
    if img.width() > max_edge || img.height() > max_edge {
        img.resize(max_edge, max_edge, FilterType::Lanczos3)
    } else {
        img
    }
}

/// Converts to RGB8, compositing any alpha channel over white.
pub fn flatten_to_rgb(img: DynamicImage) -> RgbImage {
    if !img.color().has_alpha() {
        return img.into_rgb8();
    }

    let rgba = img.into_rgba8();
    let mut out = RgbImage::new(rgba.width(), rgba.height());
    for (x, y, pixel) in rgba.enumerate_pixels() {
        let [r, g, b, a] = pixel.0;
        out.put_pixel(x, y, Rgb([over_white(r, a), over_white(g, a), over_white(b, a)]));
    }
    out
}

fn over_white(channel: u8, alpha: u8) -> u8 {
    let c = u32::from(channel);
    let a = u32::from(alpha);
    ((c * a + 255 * (255 - a) + 127) / 255) as u8
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{GrayAlphaImage, LumaA, Rgba, RgbaImage};

    #[test]
    fn test_opaque_pixels_are_unchanged() {
        let img = DynamicImage::ImageRgba8(RgbaImage::from_pixel(1, 1, Rgba([12, 34, 56, 255])));
        assert_eq!(flatten_to_rgb(img).get_pixel(0, 0), &Rgb([12, 34, 56]));
    }

    #[test]
    fn test_half_transparent_black_becomes_mid_grey() {
        let img = DynamicImage::ImageRgba8(RgbaImage::from_pixel(1, 1, Rgba([0, 0, 0, 128])));
        let px = flatten_to_rgb(img).get_pixel(0, 0).0;
        assert!(px.iter().all(|&c| (126..=128).contains(&c)), "got {px:?}");
    }

    #[test]
    fn test_grey_alpha_is_flattened_too() {
        let img = DynamicImage::ImageLumaA8(GrayAlphaImage::from_pixel(2, 2, LumaA([0, 0])));
        assert_eq!(flatten_to_rgb(img).get_pixel(1, 1), &Rgb([255, 255, 255]));
    }

    #[test]
    fn test_fit_within_scales_portrait() {
        let img = DynamicImage::ImageRgb8(RgbImage::new(1000, 3000));
        let fitted = fit_within(img, 2048);
        assert_eq!(fitted.height(), 2048);
        assert!((682..=683).contains(&fitted.width()));
    }

    #[test]
    fn test_fit_within_leaves_exact_limit_alone() {
        let img = DynamicImage::ImageRgb8(RgbImage::new(2048, 2048));
        let fitted = fit_within(img, 2048);
        assert_eq!((fitted.width(), fitted.height()), (2048, 2048));
    }
}
