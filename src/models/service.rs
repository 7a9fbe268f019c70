use serde::{Deserialize, Serialize};

use super::{null_as_empty, require, ValidationError};
use crate::icons::Icon;
use crate::types::RowId;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Service {
    pub id: RowId,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub title: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub description: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub icon: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceDraft {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default = "default_icon")]
    pub icon: String,
}

fn default_icon() -> String {
    Icon::default().name().to_string()
}

impl Default for ServiceDraft {
    fn default() -> Self {
        Self {
            title: String::new(),
            description: String::new(),
            icon: default_icon(),
        }
    }
}

impl ServiceDraft {
    pub fn validate(&self) -> Result<(), ValidationError> {
        require(
            &[
                ("title", self.title.as_str()),
                ("description", self.description.as_str()),
                ("icon", self.icon.as_str()),
            ],
            "Fill in all fields",
        )?;
        if Icon::parse(&self.icon).is_none() {
            return Err(ValidationError::new("Unknown icon").field("icon", "Not a supported icon name"));
        }
        Ok(())
    }

    pub fn to_row(&self) -> serde_json::Value {
        serde_json::json!({
            "title": self.title,
            "description": self.description,
            "icon": self.icon,
        })
    }

    pub fn applied_to(&self, id: RowId) -> Service {
        Service {
            id,
            title: self.title.clone(),
            description: self.description.clone(),
            icon: self.icon.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_drafts_default_to_circle() {
        assert_eq!(ServiceDraft::default().icon, "circle");
        let parsed: ServiceDraft = serde_json::from_str(r#"{"title":"a","description":"b"}"#).unwrap();
        assert_eq!(parsed.icon, "circle");
    }

    #[test]
    fn rejects_unknown_icons() {
        let draft = ServiceDraft {
            title: "Carving".into(),
            description: "Hand carving".into(),
            icon: "no-such-glyph".into(),
        };
        let err = draft.validate().unwrap_err();
        assert!(err.field_errors.contains_key("icon"));
    }
}
