use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::{null_as_empty, ValidationError};
use crate::types::RowId;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubmissionStatus {
    #[default]
    New,
    Processed,
}

impl SubmissionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            SubmissionStatus::New => "new",
            SubmissionStatus::Processed => "processed",
        }
    }

    pub fn toggled(&self) -> Self {
        match self {
            SubmissionStatus::New => SubmissionStatus::Processed,
            SubmissionStatus::Processed => SubmissionStatus::New,
        }
    }
}

impl fmt::Display for SubmissionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SubmissionStatus {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "new" => Ok(SubmissionStatus::New),
            "processed" => Ok(SubmissionStatus::Processed),
            other => Err(ValidationError::new(format!("Unknown status '{}'", other)).field("status", "Expected new or processed")),
        }
    }
}

/// Inbound contact-form row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Submission {
    pub id: RowId,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub email: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub phone: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub message: String,
    #[serde(default)]
    pub status: SubmissionStatus,
}

/// What a visitor types into the public contact form
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContactForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub message: String,
}

impl ContactForm {
    /// A way to reach the visitor back is the only hard requirement.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.phone.trim().is_empty() && self.email.trim().is_empty() {
            return Err(ValidationError::new("Please provide either a phone number or an email.")
                .field("phone", "Phone or email is required")
                .field("email", "Phone or email is required"));
        }
        Ok(())
    }

    pub fn to_row(&self) -> serde_json::Value {
        serde_json::json!({
            "name": self.name,
            "phone": self.phone,
            "email": self.email,
            "message": self.message,
        })
    }

    /// Plain-text body for the chat notification.
    pub fn notification_text(&self) -> String {
        format!(
            "New message from the contact form:\nName: {}\nPhone: {}\nEmail: {}\nMessage: {}",
            self.name, self.phone, self.email, self.message
        )
    }
}

/// Admin correction of a submission's fields
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SubmissionEdit {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub message: String,
}

impl SubmissionEdit {
    pub fn to_row(&self) -> serde_json::Value {
        serde_json::json!({
            "name": self.name,
            "email": self.email,
            "phone": self.phone,
            "message": self.message,
        })
    }

    pub fn applied_to(&self, submission: &Submission) -> Submission {
        Submission {
            name: self.name.clone(),
            email: self.email.clone(),
            phone: self.phone.clone(),
            message: self.message.clone(),
            ..submission.clone()
        }
    }
}
