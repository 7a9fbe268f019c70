use serde::Serialize;

use crate::models::{ContactForm, ContactInfo};

const DEFAULT_SUBMIT: &str = "Send";
const DEFAULT_CLOSE: &str = "Close";
const DEFAULT_SUCCESS_MESSAGE: &str = "Message sent!";
const DEFAULT_SUCCESS_INFO: &str = "We have received your message and will get back to you shortly.";

fn or_default(value: &str, default: &str) -> String {
    if value.is_empty() {
        default.to_string()
    } else {
        value.to_string()
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ContactSection {
    pub heading: String,
    pub description: String,
    pub form_title: String,
    pub phone: String,
    pub email: String,
    pub name_placeholder: String,
    pub phone_placeholder: String,
    pub email_placeholder: String,
    pub message_placeholder: String,
    pub submit_label: String,
    pub success_message: String,
    pub success_info: String,
    pub close_label: String,
}

impl From<&ContactInfo> for ContactSection {
    fn from(info: &ContactInfo) -> Self {
        Self {
            heading: info.heading.clone(),
            description: info.description.clone(),
            form_title: info.form_title.clone(),
            phone: info.phone.clone(),
            email: info.email.clone(),
            name_placeholder: info.name_placeholder.clone(),
            phone_placeholder: info.phone_placeholder.clone(),
            email_placeholder: info.email_placeholder.clone(),
            message_placeholder: info.message_placeholder.clone(),
            submit_label: or_default(&info.submit_button_text, DEFAULT_SUBMIT),
            success_message: or_default(&info.success_message, DEFAULT_SUCCESS_MESSAGE),
            success_info: or_default(&info.success_info, DEFAULT_SUCCESS_INFO),
            close_label: or_default(&info.close_button, DEFAULT_CLOSE),
        }
    }
}

/// Result of one press of the submit button
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum SubmitOutcome {
    /// Validation failed; nothing was sent
    Blocked { message: String },
    /// Row stored
    Sent,
    /// Remote insert failed
    Failed { message: String },
}

/// Contact form as the visitor sees it after a submit
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FormState {
    pub fields: ContactForm,
    pub error: Option<String>,
    /// Success overlay visible
    pub success: bool,
}

impl FormState {
    pub fn new(fields: ContactForm) -> Self {
        Self {
            fields,
            error: None,
            success: false,
        }
    }

    pub fn apply(mut self, outcome: &SubmitOutcome) -> Self {
        match outcome {
            SubmitOutcome::Blocked { message } | SubmitOutcome::Failed { message } => {
                self.error = Some(message.clone());
                self.success = false;
            }
            SubmitOutcome::Sent => {
                self.fields = ContactForm::default();
                self.error = None;
                self.success = true;
            }
        }
        self
    }

    /// Closing the success overlay
    pub fn dismiss(mut self) -> Self {
        self.success = false;
        self
    }
}
