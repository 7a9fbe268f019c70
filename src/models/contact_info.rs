use serde::{Deserialize, Serialize};

use super::null_as_empty;
use crate::types::RowId;

/// Singleton row with the studio's phone/email and every label of the contact section.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactInfo {
    #[serde(default)]
    pub id: RowId,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub phone: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub email: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub heading: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub description: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub form_title: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub name_placeholder: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub phone_placeholder: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub email_placeholder: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub message_placeholder: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub success_message: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub success_info: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub submit_button_text: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub close_button: String,
    #[serde(default, rename = "updated_at", skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

impl ContactInfo {
    /// Row for an upsert over the existing singleton, stamped with the save time.
    pub fn to_upsert_row(&self, id: &RowId, now: chrono::DateTime<chrono::Utc>) -> serde_json::Value {
        let mut row = self.clone();
        row.id = id.clone();
        row.updated_at = Some(now.to_rfc3339());
        serde_json::to_value(row).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn reads_camel_case_columns() {
        let info: ContactInfo = serde_json::from_value(json!({
            "id": 1,
            "phone": "+7 900 000 00 00",
            "formTitle": "Write to us",
            "submitButtonText": null,
            "updated_at": "2024-05-01T10:00:00Z"
        }))
        .unwrap();
        assert_eq!(info.form_title, "Write to us");
        assert_eq!(info.submit_button_text, "");
        assert_eq!(info.updated_at.as_deref(), Some("2024-05-01T10:00:00Z"));
    }

    #[test]
    fn upsert_row_keeps_singleton_id() {
        let info = ContactInfo {
            phone: "123".into(),
            ..Default::default()
        };
        let row = info.to_upsert_row(&RowId::Int(1), chrono::Utc::now());
        assert_eq!(row["id"], 1);
        assert_eq!(row["phone"], "123");
        assert!(row["updated_at"].is_string());
    }
}
