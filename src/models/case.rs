use serde::{Deserialize, Deserializer, Serialize};

use super::{null_as_empty, require, ValidationError};
use crate::types::RowId;

/// Before/after portfolio entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Case {
    pub id: RowId,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub title: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub description: String,
    #[serde(default)]
    pub before_image: Option<String>,
    #[serde(default)]
    pub after_image: Option<String>,
    #[serde(default, deserialize_with = "null_as_steps")]
    pub process: Vec<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub duration: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub category: String,
    #[serde(default)]
    pub created_at: Option<String>,
}

fn null_as_steps<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<String>>::deserialize(deserializer)?.unwrap_or_default())
}

/// Case form payload. Image fields carry the URLs already on the row;
/// newly selected files travel separately and replace them at save time.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CaseDraft {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub before_image: Option<String>,
    #[serde(default)]
    pub after_image: Option<String>,
    #[serde(default)]
    pub process: Vec<String>,
    #[serde(default)]
    pub duration: String,
    #[serde(default)]
    pub category: String,
}

impl CaseDraft {
    pub fn validate(&self) -> Result<(), ValidationError> {
        require(
            &[("title", self.title.as_str()), ("description", self.description.as_str())],
            "Not all fields are filled in",
        )
    }

    /// Split the comma separated "process" input into steps.
    pub fn parse_process(input: &str) -> Vec<String> {
        input
            .split(',')
            .map(|s| s.trim())
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect()
    }

    /// Row written to the backend, without id or created_at.
    pub fn to_row(&self) -> serde_json::Value {
        serde_json::json!({
            "title": self.title,
            "description": self.description,
            "before_image": self.before_image,
            "after_image": self.after_image,
            "process": self.process,
            "duration": self.duration,
            "category": self.category,
        })
    }

    /// The case as it looks after this draft is written over `id`.
    pub fn applied_to(&self, id: RowId, created_at: Option<String>) -> Case {
        Case {
            id,
            title: self.title.clone(),
            description: self.description.clone(),
            before_image: self.before_image.clone(),
            after_image: self.after_image.clone(),
            process: self.process.clone(),
            duration: self.duration.clone(),
            category: self.category.clone(),
            created_at,
        }
    }
}

impl From<&Case> for CaseDraft {
    fn from(case: &Case) -> Self {
        Self {
            title: case.title.clone(),
            description: case.description.clone(),
            before_image: case.before_image.clone(),
            after_image: case.after_image.clone(),
            process: case.process.clone(),
            duration: case.duration.clone(),
            category: case.category.clone(),
        }
    }
}
