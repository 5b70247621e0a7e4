//! Payload types exchanged between data providers and the coordinator.

use serde::{Deserialize, Serialize};

/// A single entry of the remote collection.
///
/// The coordinator never looks inside an item; it only carries it from the
/// provider to the view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub title: String,
    pub description: String,
    /// Thumbnail location (URL or path), served as `imagePath`.
    #[serde(rename = "imagePath", alias = "imageRef", alias = "image_ref")]
    pub image_ref: String,
}

impl Item {
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        image_ref: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            image_ref: image_ref.into(),
        }
    }
}

/// One page of results plus the size of the whole filtered collection.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PageResult {
    pub items: Vec<Item>,
    /// Number of items matching the query across all pages.
    #[serde(rename = "totalItems", alias = "totalCount", alias = "total_count")]
    pub total_count: u64,
}

impl PageResult {
    pub fn new(items: Vec<Item>, total_count: u64) -> Self {
        Self { items, total_count }
    }

    pub fn is_empty(&self) -> bool {
        self.total_count == 0
    }
}
