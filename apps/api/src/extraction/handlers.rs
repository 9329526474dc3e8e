use axum::{
    extract::{multipart::MultipartRejection, Multipart, State},
    Json,
};
use serde::Serialize;
use serde_json::{json, Value};
use tracing::info;

use crate::document::ResumeDocument;
use crate::errors::AppError;
use crate::extraction::completeness::{analyze_completeness, CompletenessAnalysis};
use crate::extraction::normalize::coerce_record;
use crate::extraction::pipeline::{run_extraction, ExtractionInfo};
use crate::extraction::upload::read_upload;
use crate::models::ResumeRecord;
use crate::routes::local_timestamp;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct ExtractResumeResponse {
    pub success: bool,
    #[serde(rename = "profileImageUrl")]
    pub profile_image_url: Option<String>,
    pub data: ResumeRecord,
    pub analysis: CompletenessAnalysis,
    pub extraction_info: ExtractionInfo,
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct AnalyzeCompletenessResponse {
    pub success: bool,
    pub analysis: CompletenessAnalysis,
}

/// POST /extract-resume (also mounted at POST /)
pub async fn handle_extract_resume(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<ExtractResumeResponse>, AppError> {
    let model = state.model.clone().ok_or(AppError::AiUnavailable)?;

    let file = read_upload(multipart).await?.into_resume_file()?;
    info!(
        "Resume upload received: {:?} via '{}' ({} bytes)",
        file.filename,
        file.field,
        file.bytes.len()
    );

    let document = ResumeDocument::from_upload(&file.filename, file.bytes)?;
    let outcome = run_extraction(model.as_ref(), state.renderer.clone(), &document).await?;

    let message = format!(
        "Resume extraction complete. Completeness: {}%",
        outcome.analysis.completeness_score
    );
    Ok(Json(ExtractResumeResponse {
        success: true,
        profile_image_url: outcome.profile_image_url,
        data: outcome.record,
        analysis: outcome.analysis,
        extraction_info: outcome.info,
        message,
    }))
}

/// POST /analyze-completeness
pub async fn handle_analyze_completeness(
    Json(body): Json<Value>,
) -> Result<Json<AnalyzeCompletenessResponse>, AppError> {
    let is_empty = match &body {
        Value::Null => true,
        Value::Object(fields) => fields.is_empty(),
        _ => false,
    };
    if is_empty {
        return Err(AppError::Validation("Resume data is required".to_string()));
    }

    let record = coerce_record(body)
        .map_err(|e| AppError::Validation(format!("Invalid resume data: {e}")))?;
    Ok(Json(AnalyzeCompletenessResponse {
        success: true,
        analysis: analyze_completeness(&record),
    }))
}

/// POST /test-post
/// Echoes what arrived; a non-multipart body is reported as empty.
pub async fn handle_test_post(
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<Value>, AppError> {
    let upload = match multipart {
        Ok(multipart) => read_upload(multipart).await?,
        Err(_) => Default::default(),
    };

    Ok(Json(json!({
        "message": "POST request received",
        "received_form_data": &upload.form,
        "received_files": upload.received_fields(),
        "method": "POST",
        "timestamp": local_timestamp(),
    })))
}

/// POST /extract-resume-debug
/// Reports the metadata of the uploaded resume part without processing it.
pub async fn handle_extract_resume_debug(
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<Value>, AppError> {
    let upload = match multipart {
        Ok(multipart) => read_upload(multipart).await?,
        Err(_) => Default::default(),
    };

    let Some(file) = upload.resume_file() else {
        return Ok(Json(json!({
            "error": "No file found",
            "files": upload.received_fields(),
            "form": &upload.form,
        })));
    };

    Ok(Json(json!({
        "message": "File received",
        "filename": file.filename,
        "content_type": file.content_type,
        "size": file.bytes.len(),
        "timestamp": local_timestamp(),
    })))
}
