use anyhow::{Context, Result};

const DEFAULT_MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// Application configuration loaded from environment variables.
/// The Gemini key is optional: without it the service starts, reports the
/// AI as disconnected and refuses extraction requests.
#[derive(Debug, Clone)]
pub struct Config {
    pub gemini_api_key: Option<String>,
    pub gemini_timeout_secs: Option<u64>,
    pub pdfium_library_path: Option<String>,
    pub max_upload_bytes: usize,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            gemini_api_key: optional_env("GEMINI_API_KEY"),
            gemini_timeout_secs: optional_env("GEMINI_TIMEOUT_SECS")
                .map(|v| v.parse::<u64>())
                .transpose()
                .context("GEMINI_TIMEOUT_SECS must be a whole number of seconds")?,
            pdfium_library_path: optional_env("PDFIUM_DYNAMIC_LIB_PATH"),
            max_upload_bytes: optional_env("MAX_UPLOAD_BYTES")
                .map(|v| v.parse::<usize>())
                .transpose()
                .context("MAX_UPLOAD_BYTES must be a byte count")?
                .unwrap_or(DEFAULT_MAX_UPLOAD_BYTES),
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            gemini_api_key: None,
            gemini_timeout_secs: None,
            pdfium_library_path: None,
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
            port: 8080,
            rust_log: "info".to_string(),
        }
    }
}

/// Blank values count as unset.
fn optional_env(key: &str) -> Option<String> {
    non_blank(std::env::var(key).ok())
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_values_are_unset() {
        assert_eq!(non_blank(Some("   ".to_string())), None);
        assert_eq!(non_blank(None), None);
    }

    #[test]
    fn test_values_are_trimmed() {
        assert_eq!(non_blank(Some(" key-123 \n".to_string())), Some("key-123".to_string()));
    }

    #[test]
    fn test_default_upload_limit_is_ten_megabytes() {
        let config = Config::default();
        assert_eq!(config.max_upload_bytes, 10_485_760);
        assert!(config.gemini_api_key.is_none());
    }
}
