use crate::error::GuideError;
use log::debug;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

/// Image URLs already looked up, keyed by scientific name.
///
/// A `None` value records a search that found nothing, so it is not repeated.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UrlCache {
    entries: BTreeMap<String, Option<String>>,
}

impl UrlCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load the cache, or start empty when the file does not exist yet
    pub fn load(path: &Path) -> Result<Self, GuideError> {
        if !path.exists() {
            debug!("No URL cache at {}, starting empty", path.display());
            return Ok(Self::new());
        }

        let content = fs::read_to_string(path)?;
        let entries = serde_json::from_str(&content)?;
        Ok(Self { entries })
    }

    pub fn save(&self, path: &Path) -> Result<(), GuideError> {
        let json = serde_json::to_string_pretty(&self.entries)?;
        fs::write(path, json)?;
        Ok(())
    }

    pub fn contains(&self, scientific_name: &str) -> bool {
        self.entries.contains_key(scientific_name)
    }

    /// The cached URL, if one was found
    pub fn url(&self, scientific_name: &str) -> Option<&str> {
        self.entries.get(scientific_name).and_then(|url| url.as_deref())
    }

    pub fn insert(&mut self, scientific_name: impl Into<String>, url: Option<String>) {
        self.entries.insert(scientific_name.into(), url);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of entries holding a URL
    pub fn resolved_count(&self) -> usize {
        self.entries.values().filter(|url| url.is_some()).count()
    }
}
