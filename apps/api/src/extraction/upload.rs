//! Multipart upload reader shared by the extraction and diagnostic endpoints.

use std::collections::BTreeMap;

use axum::extract::Multipart;
use bytes::Bytes;
use tracing::debug;

use crate::errors::AppError;

/// Form fields that may carry the resume, in priority order.
pub const RESUME_FILE_FIELDS: [&str; 2] = ["image", "file"];

#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub field: String,
    pub filename: String,
    pub content_type: Option<String>,
    pub bytes: Bytes,
}

/// Every part of one multipart request: file parts plus plain text fields.
#[derive(Debug, Default)]
pub struct ResumeUpload {
    pub files: Vec<UploadedFile>,
    pub form: BTreeMap<String, String>,
}

impl ResumeUpload {
    /// Names of the file fields that were sent.
    pub fn received_fields(&self) -> Vec<String> {
        self.files.iter().map(|f| f.field.clone()).collect()
    }

    /// The resume part: `image` wins over `file`.
    pub fn resume_file(&self) -> Option<&UploadedFile> {
        RESUME_FILE_FIELDS
            .iter()
            .find_map(|name| self.files.iter().find(|f| f.field == *name))
    }

    /// Takes the resume part, rejecting a missing part, an empty file name
    /// and an empty body.
    pub fn into_resume_file(mut self) -> Result<UploadedFile, AppError> {
        let position = RESUME_FILE_FIELDS
            .iter()
            .find_map(|name| self.files.iter().position(|f| f.field == *name));
        let Some(position) = position else {
            return Err(AppError::MissingFile {
                received_fields: self.received_fields(),
            });
        };

        let file = self.files.swap_remove(position);
        if file.filename.trim().is_empty() {
            return Err(AppError::NoFileSelected);
        }
        if file.bytes.is_empty() {
            return Err(AppError::EmptyUpload);
        }
        Ok(file)
    }
}

/// Reads every part of the request body. Parts with a file name become
/// `files`; the rest are decoded as lossy UTF-8 into `form`.
pub async fn read_upload(mut multipart: Multipart) -> Result<ResumeUpload, AppError> {
    let mut upload = ResumeUpload::default();

    while let Some(field) = multipart.next_field().await? {
        let name = field.name().unwrap_or_default().to_string();
        match field.file_name().map(str::to_string) {
            Some(filename) => {
                let content_type = field.content_type().map(str::to_string);
                let bytes = field.bytes().await?;
                debug!(
                    "Received file part '{name}': {filename:?}, {} bytes",
                    bytes.len()
                );
                upload.files.push(UploadedFile {
                    field: name,
                    filename,
                    content_type,
                    bytes,
                });
            }
            None => {
                let bytes = field.bytes().await?;
                upload
                    .form
                    .insert(name, String::from_utf8_lossy(&bytes).into_owned());
            }
        }
    }

    Ok(upload)
}
