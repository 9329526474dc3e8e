mod config;
mod document;
mod errors;
mod extraction;
mod llm_client;
mod models;
mod routes;
mod state;
#[cfg(test)]
mod test_support;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::document::pdf::PdfiumRenderer;
use crate::llm_client::{GeminiClient, VisionModel};
use crate::routes::{build_router, ROUTES};
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Resume OCR API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize the Gemini client; without a key the service still starts
    let model: Option<Arc<dyn VisionModel>> = match &config.gemini_api_key {
        Some(api_key) => {
            let timeout = config.gemini_timeout_secs.map(Duration::from_secs);
            let client = GeminiClient::new(api_key.clone(), timeout)?;
            info!("Gemini client initialized (model: {})", llm_client::MODEL);
            Some(Arc::new(client) as Arc<dyn VisionModel>)
        }
        None => {
            warn!("GEMINI_API_KEY is not set; extraction endpoints will return 500");
            None
        }
    };

    // PDFium is only needed for PDF uploads, so a missing library is not fatal
    let renderer = PdfiumRenderer::new(config.pdfium_library_path.clone());
    match renderer.check_available() {
        Ok(()) => info!("PDFium library available"),
        Err(e) => warn!("PDF uploads will fail: {e}"),
    }

    let state = AppState {
        config: config.clone(),
        model,
        renderer: Arc::new(renderer),
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    for (method, path) in ROUTES {
        info!("Route registered: {method} {path}");
    }

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
