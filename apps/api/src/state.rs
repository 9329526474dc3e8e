use std::sync::Arc;

use crate::config::Config;
use crate::document::pdf::PdfPageRenderer;
use crate::llm_client::VisionModel;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// `None` when no Gemini key is configured; extraction then answers 500.
    pub model: Option<Arc<dyn VisionModel>>,
    pub renderer: Arc<dyn PdfPageRenderer>,
}

impl AppState {
    pub fn ai_connected(&self) -> bool {
        self.model.is_some()
    }
}
