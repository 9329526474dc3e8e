//! Structured extractor: asks the model for the full resume JSON and falls
//! back to a reduced basic-info prompt when the answer cannot be parsed.

use serde_json::Value;
use thiserror::Error;
use tracing::{error, info, warn};

use crate::extraction::normalize::normalize_record;
use crate::extraction::prompts::{BASIC_INFO_PROMPT, RESUME_EXTRACTION_PROMPT};
use crate::llm_client::{strip_json_fences, InlineImage, LlmError, VisionModel};
use crate::models::ResumeRecord;

#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("the model returned an empty response")]
    EmptyResponse,

    #[error("model call failed: {0}")]
    Model(#[source] LlmError),

    #[error("no extraction attempt produced valid resume JSON")]
    Unparseable,
}

/// One prompt/parser pair in the fallback chain.
struct ExtractionAttempt {
    label: &'static str,
    prompt: &'static str,
    parse: fn(&str) -> Result<ResumeRecord, serde_json::Error>,
}

/// Tried in order. Only the first attempt's model failures are fatal; later
/// attempts run solely because an earlier answer could not be parsed.
const ATTEMPTS: &[ExtractionAttempt] = &[
    ExtractionAttempt {
        label: "full",
        prompt: RESUME_EXTRACTION_PROMPT,
        parse: parse_resume_json,
    },
    ExtractionAttempt {
        label: "basic-info",
        prompt: BASIC_INFO_PROMPT,
        parse: parse_resume_json,
    },
];

fn parse_resume_json(text: &str) -> Result<ResumeRecord, serde_json::Error> {
    let value: Value = serde_json::from_str(strip_json_fences(text))?;
    normalize_record(value)
}

/// Runs the fallback chain and returns the first record that parses.
pub async fn extract_structured(
    model: &dyn VisionModel,
    image: &InlineImage,
) -> Result<ResumeRecord, ExtractionError> {
    for (index, attempt) in ATTEMPTS.iter().enumerate() {
        let is_primary = index == 0;

        let text = match model.generate(attempt.prompt, image).await {
            Ok(text) if is_primary && text.trim().is_empty() => {
                error!("Model returned an empty response for the {} extraction", attempt.label);
                return Err(ExtractionError::EmptyResponse);
            }
            Ok(text) => text,
            Err(LlmError::EmptyContent) if is_primary => {
                error!("Model returned an empty response for the {} extraction", attempt.label);
                return Err(ExtractionError::EmptyResponse);
            }
            Err(e) if is_primary => return Err(ExtractionError::Model(e)),
            Err(e) => {
                error!("{} extraction call failed: {e}", attempt.label);
                continue;
            }
        };

        match (attempt.parse)(&text) {
            Ok(record) => {
                info!("Resume parsed by the {} extraction", attempt.label);
                return Ok(record);
            }
            Err(e) => {
                let preview: String = text.chars().take(200).collect();
                warn!(
                    "{} extraction returned invalid JSON: {e}; response starts with {preview:?}",
                    attempt.label
                );
            }
        }
    }

    Err(ExtractionError::Unparseable)
}
