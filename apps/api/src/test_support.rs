//! Shared fixtures for unit and router tests: a scripted model, generated
//! resume images and a multipart body builder.

use std::collections::VecDeque;
use std::io::Cursor;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use image::{DynamicImage, ImageFormat, Rgb, RgbImage};

use crate::config::Config;
use crate::document::encode::inline_png;
use crate::document::pdf::{PdfPageRenderer, StaticPageRenderer};
use crate::document::NormalizedImage;
use crate::llm_client::{InlineImage, LlmError, VisionModel};
use crate::state::AppState;

/// Grid box covering the 200×200 photo drawn by `sample_resume_image`.
pub const PHOTO_BOX_RESPONSE: &str = r#"{"x_min": 50, "y_min": 40, "x_max": 300, "y_max": 240}"#;

pub const BOUNDARY: &str = "resume-ocr-test-boundary";

/// Replays canned replies in order and records every prompt it receives.
/// Once the script runs out, every call answers `EmptyContent`.
#[derive(Default)]
pub struct ScriptedModel {
    replies: Mutex<VecDeque<Result<String, LlmError>>>,
    prompts: Mutex<Vec<String>>,
}

impl ScriptedModel {
    pub fn new(replies: Vec<Result<String, LlmError>>) -> Self {
        Self {
            replies: Mutex::new(replies.into()),
            prompts: Mutex::default(),
        }
    }

    pub fn replying(texts: &[&str]) -> Self {
        Self::new(texts.iter().map(|t| Ok(t.to_string())).collect())
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait]
impl VisionModel for ScriptedModel {
    async fn generate(&self, prompt: &str, _image: &InlineImage) -> Result<String, LlmError> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(Err(LlmError::EmptyContent))
    }
}

/// 800×1000 white page with a dark 200×200 "photo" whose top-left corner is
/// at (40, 40).
pub fn sample_resume_image() -> NormalizedImage {
    let mut page = RgbImage::from_pixel(800, 1000, Rgb([255, 255, 255]));
    for y in 40..240 {
        for x in 40..240 {
            page.put_pixel(x, y, Rgb([40, 40, 60]));
        }
    }
    NormalizedImage(page)
}

pub fn sample_resume_png() -> Vec<u8> {
    let mut buf = Vec::new();
    DynamicImage::ImageRgb8(sample_resume_image().0)
        .write_to(&mut Cursor::new(&mut buf), ImageFormat::Png)
        .unwrap();
    buf
}

pub fn sample_inline_image() -> InlineImage {
    inline_png(sample_resume_image().as_rgb()).unwrap()
}

pub fn test_state(model: Option<ScriptedModel>) -> AppState {
    test_state_with(model, StaticPageRenderer::default(), Config::default())
}

pub fn test_state_with(
    model: Option<ScriptedModel>,
    renderer: impl PdfPageRenderer + 'static,
    config: Config,
) -> AppState {
    AppState {
        config,
        model: model.map(|m| Arc::new(m) as Arc<dyn VisionModel>),
        renderer: Arc::new(renderer),
    }
}

/// One part of a multipart/form-data body.
pub enum FormPart<'a> {
    File {
        field: &'a str,
        filename: &'a str,
        content_type: &'a str,
        bytes: &'a [u8],
    },
    Text {
        field: &'a str,
        value: &'a str,
    },
    /// Plain field whose body is sent byte-for-byte.
    RawText {
        field: &'a str,
        bytes: &'a [u8],
    },
}

pub fn multipart_content_type() -> String {
    format!("multipart/form-data; boundary={BOUNDARY}")
}

pub fn multipart_body(parts: &[FormPart<'_>]) -> Vec<u8> {
    let mut body = Vec::new();
    for part in parts {
        body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
        match part {
            FormPart::File {
                field,
                filename,
                content_type,
                bytes,
            } => {
                body.extend_from_slice(
                    format!(
                        "Content-Disposition: form-data; name=\"{field}\"; filename=\"{filename}\"\r\nContent-Type: {content_type}\r\n\r\n"
                    )
                    .as_bytes(),
                );
                body.extend_from_slice(bytes);
            }
            FormPart::Text { field, value } => {
                body.extend_from_slice(
                    format!("Content-Disposition: form-data; name=\"{field}\"\r\n\r\n{value}")
                        .as_bytes(),
                );
            }
            FormPart::RawText { field, bytes } => {
                body.extend_from_slice(
                    format!("Content-Disposition: form-data; name=\"{field}\"\r\n\r\n").as_bytes(),
                );
                body.extend_from_slice(bytes);
            }
        }
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
    body
}
