//! Rows of the backend tables and the form payloads that write them.

pub mod case;
pub mod contact_info;
pub mod content_block;
pub mod service;
pub mod submission;

use serde::{Deserialize, Deserializer};
use std::collections::HashMap;
use thiserror::Error;

pub use case::{Case, CaseDraft};
pub use contact_info::ContactInfo;
pub use content_block::{BlockEdit, BlockText, ContentBlock};
pub use service::{Service, ServiceDraft};
pub use submission::{ContactForm, Submission, SubmissionEdit, SubmissionStatus};

/// Form input rejected before any remote call
#[derive(Error, Debug, Clone, PartialEq)]
#[error("{message}")]
pub struct ValidationError {
    pub message: String,
    pub field_errors: HashMap<String, String>,
}

impl ValidationError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            field_errors: HashMap::new(),
        }
    }

    pub fn field(mut self, field: &str, error: &str) -> Self {
        self.field_errors.insert(field.to_string(), error.to_string());
        self
    }
}

/// Collect required-field errors for blank values.
pub(crate) fn require(fields: &[(&str, &str)], message: &str) -> Result<(), ValidationError> {
    let mut err = ValidationError::new(message);
    for (name, value) in fields {
        if value.trim().is_empty() {
            err = err.field(name, "This field is required");
        }
    }
    if err.field_errors.is_empty() {
        Ok(())
    } else {
        Err(err)
    }
}

/// Backend columns are nullable; a null text column reads as empty.
pub(crate) fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}
