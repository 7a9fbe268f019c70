use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::models::{BlockText, ContentBlock};

/// Page text keyed by block name. Lookups never fail: a missing block reads as empty text.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContentMap {
    blocks: BTreeMap<String, BlockText>,
    #[serde(skip)]
    hero_background: Option<String>,
}

impl ContentMap {
    pub fn from_blocks(blocks: &[ContentBlock]) -> Self {
        let mut map = BTreeMap::new();
        for block in blocks {
            map.insert(block.name.clone(), BlockText::from(block));
        }
        let hero_background = blocks
            .iter()
            .find(|b| b.name == "hero")
            .and_then(|b| b.background_image.clone())
            .filter(|url| !url.is_empty());
        Self {
            blocks: map,
            hero_background,
        }
    }

    pub fn block(&self, name: &str) -> BlockText {
        self.blocks.get(name).cloned().unwrap_or_default()
    }

    pub fn title(&self, name: &str) -> String {
        self.blocks.get(name).map(|b| b.title.clone()).unwrap_or_default()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.blocks.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    pub fn hero_background(&self) -> Option<&str> {
        self.hero_background.as_deref()
    }
}
