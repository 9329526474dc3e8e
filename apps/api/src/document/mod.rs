//! Document normalizer: turns an uploaded resume (raster image or PDF) into a
//! single RGB raster no larger than 2048×2048.
//!
//! Decoding, PDF rendering and resizing are CPU-bound and run inside
//! `tokio::task::spawn_blocking`; the request still awaits the result before
//! moving on to the AI calls.

pub mod encode;
pub mod pdf;
pub mod raster;

use std::path::Path;
use std::sync::Arc;

use bytes::Bytes;
use image::RgbImage;
use thiserror::Error;
use tracing::info;

use crate::document::pdf::PdfPageRenderer;

/// Upload extensions accepted by the extraction endpoints, in display order.
pub const SUPPORTED_EXTENSIONS: &[&str] =
    &[".jpg", ".jpeg", ".png", ".gif", ".webp", ".bmp", ".pdf"];

/// Longest allowed edge of the normalized image.
pub const MAX_DIMENSION_PX: u32 = 2048;

/// Only the leading pages of a PDF are rendered.
pub const PDF_MAX_PAGES: usize = 3;

/// Low render resolution keeps the stacked composite small.
pub const PDF_RENDER_DPI: u32 = 72;

#[derive(Debug, Error)]
pub enum DocumentError {
    #[error(
        "unsupported file type '{extension}'. Supported types: {}",
        SUPPORTED_EXTENSIONS.join(", ")
    )]
    UnsupportedExtension { extension: String },

    #[error("no pages could be rendered from the PDF; check that the file is valid")]
    NoPagesRendered,

    #[error("PDF library unavailable: {0}")]
    PdfiumUnavailable(String),

    #[error("PDF could not be loaded: {0}")]
    PdfLoad(String),

    #[error("PDF rendering failed on page {page}: {reason}")]
    PdfRendering { page: usize, reason: String },

    #[error("image could not be decoded: {0}")]
    Decode(image::ImageError),

    #[error("image could not be encoded: {0}")]
    Encode(image::ImageError),

    #[error("document processing task failed: {0}")]
    Task(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    Image,
    Pdf,
}

/// An uploaded resume file, alive for one request.
#[derive(Debug, Clone)]
pub struct ResumeDocument {
    pub bytes: Bytes,
    pub kind: DocumentKind,
    /// Lowercase extension including the leading dot, e.g. `.pdf`.
    pub extension: String,
}

impl ResumeDocument {
    /// Classifies an upload by its file name. Fails for any extension outside
    /// `SUPPORTED_EXTENSIONS`.
    pub fn from_upload(filename: &str, bytes: Bytes) -> Result<Self, DocumentError> {
        let extension = file_extension(filename);
        if !SUPPORTED_EXTENSIONS.contains(&extension.as_str()) {
            return Err(DocumentError::UnsupportedExtension { extension });
        }
        let kind = if extension == ".pdf" {
            DocumentKind::Pdf
        } else {
            DocumentKind::Image
        };
        Ok(Self {
            bytes,
            kind,
            extension,
        })
    }
}

/// Returns the lowercase dotted extension of `filename`, or an empty string.
pub fn file_extension(filename: &str) -> String {
    Path::new(filename)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| format!(".{}", ext.to_lowercase()))
        .unwrap_or_default()
}

/// The single RGB raster sent to the model.
#[derive(Debug, Clone)]
pub struct NormalizedImage(pub RgbImage);

impl NormalizedImage {
    pub fn width(&self) -> u32 {
        self.0.width()
    }

    pub fn height(&self) -> u32 {
        self.0.height()
    }

    pub fn as_rgb(&self) -> &RgbImage {
        &self.0
    }

    /// `"WxH"`, as reported in `extraction_info.image_size`.
    pub fn size_label(&self) -> String {
        format!("{}x{}", self.width(), self.height())
    }
}

/// Normalizes an uploaded document on the blocking pool.
pub async fn normalize_document(
    document: &ResumeDocument,
    renderer: Arc<dyn PdfPageRenderer>,
) -> Result<NormalizedImage, DocumentError> {
    let bytes = document.bytes.clone();
    let kind = document.kind;

    tokio::task::spawn_blocking(move || normalize_blocking(&bytes, kind, renderer.as_ref()))
        .await
        .map_err(|e| DocumentError::Task(format!("normalize task panicked: {e}")))?
}

/// Blocking implementation of document normalization.
pub fn normalize_blocking(
    bytes: &[u8],
    kind: DocumentKind,
    renderer: &dyn PdfPageRenderer,
) -> Result<NormalizedImage, DocumentError> {
    let decoded = match kind {
        DocumentKind::Pdf => {
            info!("Rendering PDF pages...");
            let pages = renderer.render_pages(bytes, PDF_MAX_PAGES, PDF_RENDER_DPI)?;
            let stacked = pdf::stack_vertically(&pages).ok_or(DocumentError::NoPagesRendered)?;
            info!(
                "Stacked {} PDF page(s) into {}x{}",
                pages.len(),
                stacked.width(),
                stacked.height()
            );
            image::DynamicImage::ImageRgb8(stacked)
        }
        DocumentKind::Image => raster::decode(bytes)?,
    };

    let resized = raster::fit_within(decoded, MAX_DIMENSION_PX);
    let normalized = NormalizedImage(raster::flatten_to_rgb(resized));
    info!("Document normalized: {}", normalized.size_label());
    Ok(normalized)
}
