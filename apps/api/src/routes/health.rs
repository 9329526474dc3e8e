use axum::{extract::State, Json};
use serde_json::{json, Value};

use crate::routes::local_timestamp;
use crate::state::AppState;

/// GET /health (also POST)
/// Liveness plus AI connectivity. `firebase` mirrors `gemini` for older clients.
pub async fn health_handler(State(state): State<AppState>) -> Json<Value> {
    let ai = if state.ai_connected() {
        "connected"
    } else {
        "disconnected"
    };
    Json(json!({
        "status": "healthy",
        "firebase": ai,
        "gemini": ai,
        "timestamp": local_timestamp(),
    }))
}
