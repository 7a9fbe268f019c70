use serde::{Deserialize, Serialize};

use super::null_as_empty;
use crate::types::RowId;

/// Named, admin-editable unit of page text
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentBlock {
    pub id: RowId,
    pub name: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub title: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub description: String,
    #[serde(default)]
    pub background_image: Option<String>,
}

/// The part of a block the public pages render
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BlockText {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
}

impl From<&ContentBlock> for BlockText {
    fn from(block: &ContentBlock) -> Self {
        Self {
            title: block.title.clone(),
            description: block.description.clone(),
        }
    }
}

/// Admin edit of a block: only the text is writable
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BlockEdit {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
}

impl BlockEdit {
    pub fn to_row(&self) -> serde_json::Value {
        serde_json::json!({
            "title": self.title,
            "description": self.description,
        })
    }

    pub fn applied_to(&self, block: &ContentBlock) -> ContentBlock {
        ContentBlock {
            title: self.title.clone(),
            description: self.description.clone(),
            ..block.clone()
        }
    }
}
