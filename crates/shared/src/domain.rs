use serde::{Deserialize, Serialize};

use crate::error::{ApiError, ErrorCode};

/// Per-file cap on the uploaded CV, mirrored by the server's request
/// body limit.
pub const MAX_CV_BYTES: usize = 5 * 1024 * 1024;

pub const ALLOWED_CV_MEDIA_TYPES: &[&str] = &[
    "application/pdf",
    "application/msword",
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
];

pub fn is_valid_email(address: &str) -> bool {
    address.trim().parse::<email_address::EmailAddress>().is_ok()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmissionFields {
    pub fullname: String,
    pub email: String,
    pub message: String,
}

impl SubmissionFields {
    pub fn validate(&self) -> Result<(), ApiError> {
        for (name, value) in [
            ("fullname", &self.fullname),
            ("email", &self.email),
            ("message", &self.message),
        ] {
            if value.trim().is_empty() {
                return Err(ApiError::new(
                    ErrorCode::Validation,
                    format!("field '{name}' must not be empty"),
                ));
            }
        }
        if !is_valid_email(&self.email) {
            return Err(ApiError::new(
                ErrorCode::Validation,
                format!("'{}' is not a valid email address", self.email.trim()),
            ));
        }
        Ok(())
    }
}

/// Uploaded document kept in memory for the lifetime of one request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CvAttachment {
    pub filename: String,
    pub media_type: String,
    pub bytes: Vec<u8>,
}

impl CvAttachment {
    pub fn validate(&self) -> Result<(), ApiError> {
        if !ALLOWED_CV_MEDIA_TYPES.contains(&self.media_type.as_str()) {
            return Err(ApiError::new(
                ErrorCode::UnsupportedMediaType,
                "unsupported file type; only PDF, DOC, and DOCX are allowed",
            ));
        }
        if self.bytes.len() > MAX_CV_BYTES {
            return Err(ApiError::new(
                ErrorCode::PayloadTooLarge,
                format!("cv exceeds {MAX_CV_BYTES} bytes"),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmissionRequest {
    pub fields: SubmissionFields,
    #[serde(default)]
    pub cv: Option<CvAttachment>,
}

impl SubmissionRequest {
    pub fn validate(&self) -> Result<(), ApiError> {
        self.fields.validate()?;
        if let Some(cv) = &self.cv {
            cv.validate()?;
        }
        Ok(())
    }
}
