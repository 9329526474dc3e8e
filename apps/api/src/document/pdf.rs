//! PDF rasterisation: render the leading pages via PDFium and stack them
//! into one composite image.
//!
//! `PdfiumRenderer` is stateless. Each call binds a fresh `Pdfium` instance;
//! the OS caches the library load, so repeat binds are cheap.

use image::{imageops, DynamicImage, RgbImage};
use pdfium_render::prelude::*;
use tracing::{debug, warn};

use super::DocumentError;

/// PDF points per inch (standard PDF unit).
const POINTS_PER_INCH: f32 = 72.0;

/// Renders PDF pages to images. Implemented by PDFium in production and by
/// an in-memory renderer in tests.
pub trait PdfPageRenderer: Send + Sync {
    /// Renders at most `max_pages` pages from the start of the document.
    fn render_pages(
        &self,
        pdf_bytes: &[u8],
        max_pages: usize,
        dpi: u32,
    ) -> Result<Vec<DynamicImage>, DocumentError>;
}

/// Renders PDF pages with Google PDFium.
///
/// Library discovery order:
/// 1. the configured path (`PDFIUM_DYNAMIC_LIB_PATH`)
/// 2. system library search paths
#[derive(Debug, Clone, Default)]
pub struct PdfiumRenderer {
    library_path: Option<String>,
}

impl PdfiumRenderer {
    pub fn new(library_path: Option<String>) -> Self {
        Self { library_path }
    }

    /// Verifies the PDFium library can be bound.
    pub fn check_available(&self) -> Result<(), DocumentError> {
        load_pdfium(self.library_path.as_deref()).map(|_| ())
    }
}

fn load_pdfium(library_path: Option<&str>) -> Result<Pdfium, DocumentError> {
    if let Some(path) = library_path {
        debug!(path = %path, "Loading PDFium from configured path");
        let bindings = Pdfium::bind_to_library(path).map_err(|e| {
            DocumentError::PdfiumUnavailable(format!("failed to load PDFium from {path}: {e}"))
        })?;
        return Ok(Pdfium::new(bindings));
    }

    let bindings = Pdfium::bind_to_system_library().map_err(|e| {
        DocumentError::PdfiumUnavailable(format!(
            "PDFium library not found. Set PDFIUM_DYNAMIC_LIB_PATH or install PDFium: {e}"
        ))
    })?;
    Ok(Pdfium::new(bindings))
}

/// Pixel size of a page rendered at `dpi`, never smaller than 1×1.
fn compute_render_dimensions(width_points: f32, height_points: f32, dpi: u32) -> (u32, u32) {
    let scale = dpi as f32 / POINTS_PER_INCH;
    let w = (width_points * scale).max(1.0) as u32;
    let h = (height_points * scale).max(1.0) as u32;
    (w, h)
}

impl PdfPageRenderer for PdfiumRenderer {
    fn render_pages(
        &self,
        pdf_bytes: &[u8],
        max_pages: usize,
        dpi: u32,
    ) -> Result<Vec<DynamicImage>, DocumentError> {
        let pdfium = load_pdfium(self.library_path.as_deref())?;
        let document = pdfium
            .load_pdf_from_byte_slice(pdf_bytes, None)
            .map_err(|e| DocumentError::PdfLoad(format!("{e}")))?;

        let mut images = Vec::with_capacity(max_pages);
        for (index, page) in document.pages().iter().take(max_pages).enumerate() {
            let (target_w, target_h) =
                compute_render_dimensions(page.width().value, page.height().value, dpi);

            let config = PdfRenderConfig::new()
                .set_target_width(target_w as i32)
                .set_maximum_height(target_h as i32);

            let bitmap =
                page.render_with_config(&config)
                    .map_err(|e| DocumentError::PdfRendering {
                        page: index + 1,
                        reason: format!("{e}"),
                    })?;

            let image = bitmap.as_image();
            debug!(
                "Rendered page {} → {}x{} px",
                index + 1,
                image.width(),
                image.height()
            );
            images.push(image);
        }

        if images.is_empty() {
            warn!("PDF loaded but produced no pages");
        }
        Ok(images)
    }
}

/// Stacks pages top to bottom, each flush left. The canvas is as wide as the
/// widest page and as tall as all pages together; uncovered area stays black.
/// Returns `None` when there are no pages.
pub fn stack_vertically(pages: &[DynamicImage]) -> Option<RgbImage> {
    if pages.is_empty() {
        return None;
    }

    let max_width = pages.iter().map(|p| p.width()).max().unwrap_or(0);
    let total_height = pages.iter().map(|p| p.height()).sum();

    let mut canvas = RgbImage::new(max_width, total_height);
    let mut y_offset: i64 = 0;
    for page in pages {
        imageops::replace(&mut canvas, &page.to_rgb8(), 0, y_offset);
        y_offset += i64::from(page.height());
    }
    Some(canvas)
}

/// In-memory renderer returning pre-built pages.
#[cfg(test)]
#[derive(Default)]
pub struct StaticPageRenderer {
    pages: Vec<DynamicImage>,
}

#[cfg(test)]
impl StaticPageRenderer {
    pub fn new(pages: Vec<DynamicImage>) -> Self {
        Self { pages }
    }
}

#[cfg(test)]
impl PdfPageRenderer for StaticPageRenderer {
    fn render_pages(
        &self,
        _pdf_bytes: &[u8],
        max_pages: usize,
        _dpi: u32,
    ) -> Result<Vec<DynamicImage>, DocumentError> {
        Ok(self.pages.iter().take(max_pages).cloned().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;

    #[test]
    fn test_letter_page_at_72_dpi_is_one_pixel_per_point() {
        assert_eq!(compute_render_dimensions(612.0, 792.0, 72), (612, 792));
    }

    #[test]
    fn test_render_dimensions_scale_with_dpi() {
        assert_eq!(compute_render_dimensions(612.0, 792.0, 144), (1224, 1584));
    }

    #[test]
    fn test_degenerate_page_is_at_least_one_pixel() {
        assert_eq!(compute_render_dimensions(0.0, 0.0, 72), (1, 1));
    }

    #[test]
    fn test_stack_uses_max_width_and_sum_of_heights() {
        let pages = vec![
            DynamicImage::ImageRgb8(RgbImage::from_pixel(100, 50, Rgb([200, 200, 200]))),
            DynamicImage::ImageRgb8(RgbImage::from_pixel(80, 30, Rgb([50, 50, 50]))),
        ];
        let stacked = stack_vertically(&pages).unwrap();
        assert_eq!(stacked.dimensions(), (100, 80));
        assert_eq!(stacked.get_pixel(0, 49), &Rgb([200, 200, 200]));
        assert_eq!(stacked.get_pixel(0, 50), &Rgb([50, 50, 50]));
        // Right of the narrower second page is unpainted canvas.
        assert_eq!(stacked.get_pixel(95, 60), &Rgb([0, 0, 0]));
    }

    #[test]
    fn test_stack_of_nothing_is_none() {
        assert!(stack_vertically(&[]).is_none());
    }

    #[test]
    fn test_static_renderer_honours_page_cap() {
        let pages = (0..5)
            .map(|_| DynamicImage::ImageRgb8(RgbImage::new(2, 2)))
            .collect();
        let renderer = StaticPageRenderer::new(pages);
        assert_eq!(renderer.render_pages(b"", 3, 72).unwrap().len(), 3);
    }
}
