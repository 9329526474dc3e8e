//! End-to-end extraction for one uploaded document: normalize, locate the
//! photo, extract structured fields, score completeness.

use std::sync::Arc;

use serde::Serialize;
use tracing::info;

use crate::document::encode::inline_png;
use crate::document::pdf::PdfPageRenderer;
use crate::document::{normalize_document, ResumeDocument};
use crate::errors::AppError;
use crate::extraction::completeness::{analyze_completeness, CompletenessAnalysis};
use crate::extraction::photo::locate_profile_photo;
use crate::extraction::structured::extract_structured;
use crate::llm_client::VisionModel;
use crate::models::ResumeRecord;

#[derive(Debug, Clone, Serialize)]
pub struct ExtractionInfo {
    pub has_profile_photo: bool,
    /// Image enhancement is not performed; always `false`.
    pub enhanced: bool,
    pub extracted_sections: usize,
    pub file_type: String,
    pub image_size: String,
}

#[derive(Debug, Clone)]
pub struct ExtractionOutcome {
    pub profile_image_url: Option<String>,
    pub record: ResumeRecord,
    pub analysis: CompletenessAnalysis,
    pub info: ExtractionInfo,
}

pub async fn run_extraction(
    model: &dyn VisionModel,
    renderer: Arc<dyn PdfPageRenderer>,
    document: &ResumeDocument,
) -> Result<ExtractionOutcome, AppError> {
    info!(
        "Extracting resume: type={}, {} bytes",
        document.extension,
        document.bytes.len()
    );

    let image = normalize_document(document, renderer).await?;
    let inline = inline_png(image.as_rgb())?;

    // Never fails the request; `None` means no photo.
    let profile_image_url = locate_profile_photo(model, &image, &inline).await;

    let mut record = extract_structured(model, &inline).await?;
    record.has_profile_photo = profile_image_url.is_some();

    let analysis = analyze_completeness(&record);
    info!(
        "Extraction complete: completeness {}%, photo {}",
        analysis.completeness_score,
        if record.has_profile_photo { "found" } else { "none" }
    );

    let info = ExtractionInfo {
        has_profile_photo: record.has_profile_photo,
        enhanced: false,
        extracted_sections: record.populated_section_count(),
        file_type: document.extension.clone(),
        image_size: image.size_label(),
    };

    Ok(ExtractionOutcome {
        profile_image_url,
        record,
        analysis,
        info,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::pdf::StaticPageRenderer;
    use crate::extraction::prompts::{
        BASIC_INFO_PROMPT, PROFILE_PHOTO_PROMPT, RESUME_EXTRACTION_PROMPT,
    };
    use crate::test_support::{sample_resume_png, ScriptedModel, PHOTO_BOX_RESPONSE};
    use bytes::Bytes;

    fn png_document() -> ResumeDocument {
        ResumeDocument::from_upload("resume.png", Bytes::from(sample_resume_png())).unwrap()
    }

    #[tokio::test]
    async fn test_photo_and_fields_are_combined() {
        let model = ScriptedModel::replying(&[
            PHOTO_BOX_RESPONSE,
            r#"{"name": "최수진", "phone": "01055556666", "email": "sj@example.com"}"#,
        ]);
        let outcome = run_extraction(&model, Arc::new(StaticPageRenderer::default()), &png_document())
            .await
            .unwrap();

        assert!(outcome.profile_image_url.is_some());
        assert!(outcome.record.has_profile_photo);
        assert!(outcome.info.has_profile_photo);
        assert!(!outcome.info.enhanced);
        assert_eq!(outcome.info.file_type, ".png");
        assert_eq!(outcome.info.image_size, "800x1000");
        assert_eq!(outcome.record.phone, "010-5555-6666");
        assert_eq!(outcome.analysis.completeness_score, 10);
        assert_eq!(
            model.prompts(),
            vec![
                PROFILE_PHOTO_PROMPT.to_string(),
                RESUME_EXTRACTION_PROMPT.to_string()
            ]
        );
    }

    #[tokio::test]
    async fn test_no_photo_keeps_flag_false() {
        let model = ScriptedModel::replying(&["\"\"", "{broken", r#"{"name": "Jo"}"#]);
        let outcome = run_extraction(&model, Arc::new(StaticPageRenderer::default()), &png_document())
            .await
            .unwrap();

        assert!(outcome.profile_image_url.is_none());
        assert!(!outcome.record.has_profile_photo);
        assert_eq!(outcome.record.name, "Jo");
        assert_eq!(model.prompts().last().map(String::as_str), Some(BASIC_INFO_PROMPT));
    }

    #[tokio::test]
    async fn test_undecodable_upload_fails_before_any_model_call() {
        let document =
            ResumeDocument::from_upload("resume.jpg", Bytes::from_static(b"not a jpeg")).unwrap();
        let model = ScriptedModel::replying(&[]);
        let err = run_extraction(&model, Arc::new(StaticPageRenderer::default()), &document)
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::Document(_)));
        assert!(model.prompts().is_empty());
    }
}
