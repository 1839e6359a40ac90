mod wikipedia;

pub use wikipedia::WikipediaSearch;

use crate::error::GuideError;
use async_trait::async_trait;

/// An image found for a search term
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageHit {
    /// Direct URL of the original image file
    pub url: String,
    /// Title of the page the image belongs to
    pub title: String,
}

/// Source of representative plant images
#[async_trait]
pub trait ImageSearch: Send + Sync {
    /// Get the source name (e.g., "wikipedia")
    fn source_name(&self) -> &str;

    /// Look up the lead image for a search term. `Ok(None)` when there is none.
    async fn find_image(&self, term: &str) -> Result<Option<ImageHit>, GuideError>;

    /// Download an image found by [`ImageSearch::find_image`]
    async fn download(&self, url: &str) -> Result<Vec<u8>, GuideError>;
}
