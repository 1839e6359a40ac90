use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Broad growth form of a plant, derived from its genus
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub enum Category {
    Fern,
    Graminoid,
    Shrub,
    Tree,
    Vine,
    #[default]
    Forb,
}

impl Category {
    pub const ALL: [Category; 6] = [
        Category::Fern,
        Category::Graminoid,
        Category::Shrub,
        Category::Tree,
        Category::Vine,
        Category::Forb,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Fern => "Fern",
            Category::Graminoid => "Graminoid",
            Category::Shrub => "Shrub",
            Category::Tree => "Tree",
            Category::Vine => "Vine",
            Category::Forb => "Forb",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One native plant entry from the guide.
///
/// The image fields are tri-state: `None` means the key is absent (never
/// enriched), `Some(None)` serializes as `null` (enrichment found nothing),
/// `Some(Some(_))` holds the result.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlantRecord {
    pub scientific_name: String,
    pub common_name: String,
    #[serde(default)]
    pub category: Category,
    #[serde(default)]
    pub habitat: String,
    #[serde(default)]
    pub exposure: String,
    #[serde(default)]
    pub form_color: String,
    #[serde(default)]
    pub ecosystem_services: String,
    #[serde(default)]
    pub horticultural_value: String,
    #[serde(default)]
    pub other_info: String,
    #[serde(
        default,
        deserialize_with = "present",
        skip_serializing_if = "Option::is_none"
    )]
    pub image_file: Option<Option<String>>,
    #[serde(
        default,
        deserialize_with = "present",
        skip_serializing_if = "Option::is_none"
    )]
    pub image_license: Option<Option<String>>,
    #[serde(
        default,
        deserialize_with = "present",
        skip_serializing_if = "Option::is_none"
    )]
    pub image_author: Option<Option<String>>,
}

impl PlantRecord {
    pub fn new(scientific_name: impl Into<String>, common_name: impl Into<String>) -> Self {
        Self {
            scientific_name: scientific_name.into(),
            common_name: common_name.into(),
            ..Default::default()
        }
    }

    /// The image file name, if enrichment found one
    pub fn image(&self) -> Option<&str> {
        self.image_file.as_ref().and_then(|f| f.as_deref())
    }

    /// True when a previous enrichment run looked and found nothing
    pub fn marked_without_image(&self) -> bool {
        matches!(self.image_file, Some(None))
    }
}

// A key that is present (even as `null`) deserializes to `Some(_)`; a missing
// key falls back to `default`, i.e. `None`.
fn present<'de, D>(deserializer: D) -> Result<Option<Option<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer).map(Some)
}
