//! # Pet Model
//!
//! Wire representation of the single managed resource.
//!
//! Only `id` and `name` are persisted by the store. Category, status, tags
//! and photo URLs round-trip through request/response bodies but are not
//! durable: a pet read back from the store carries `id` and `name` only.

use serde::{Deserialize, Serialize};

/// Pet category
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    #[serde(default)]
    pub id: i64,
    #[serde(default)]
    pub name: String,
}

/// Pet tag
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    #[serde(default)]
    pub id: i64,
    #[serde(default)]
    pub name: String,
}

/// A pet
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pet {
    /// Store-assigned identifier (0 until inserted)
    #[serde(default)]
    pub id: i64,

    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<Category>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<Tag>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub photo_urls: Option<Vec<String>>,
}

impl Pet {
    /// Create a pet with only the persisted fields set
    pub fn new(id: i64, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            ..Default::default()
        }
    }
}
