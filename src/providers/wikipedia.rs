use crate::config::EnrichmentConfig;
use crate::error::GuideError;
use crate::fetchers::RequestFetcher;
use crate::providers::{ImageHit, ImageSearch};
use async_trait::async_trait;
use log::debug;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, REFERER};
use serde::Deserialize;
use std::collections::BTreeMap;

#[derive(Debug, Default, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    query: Option<SearchQuery>,
}

#[derive(Debug, Default, Deserialize)]
struct SearchQuery {
    #[serde(default)]
    search: Vec<SearchResult>,
}

#[derive(Debug, Deserialize)]
struct SearchResult {
    title: String,
}

#[derive(Debug, Default, Deserialize)]
struct PageImagesResponse {
    #[serde(default)]
    query: Option<PagesQuery>,
}

#[derive(Debug, Default, Deserialize)]
struct PagesQuery {
    #[serde(default)]
    pages: BTreeMap<String, Page>,
}

#[derive(Debug, Deserialize)]
struct Page {
    original: Option<OriginalImage>,
}

#[derive(Debug, Deserialize)]
struct OriginalImage {
    source: String,
}

/// Finds the lead image of the best matching Wikipedia article
pub struct WikipediaSearch {
    fetcher: RequestFetcher,
    api_url: String,
    min_image_bytes: usize,
}

impl WikipediaSearch {
    pub fn new(config: &EnrichmentConfig) -> Result<Self, GuideError> {
        Ok(WikipediaSearch {
            fetcher: RequestFetcher::new(config)?,
            api_url: format!("{}/w/api.php", config.api_base_url.trim_end_matches('/')),
            min_image_bytes: config.min_image_bytes,
        })
    }

    async fn top_title(&self, term: &str) -> Result<Option<String>, GuideError> {
        let response: SearchResponse = self
            .fetcher
            .get_json(
                &self.api_url,
                &[
                    ("action", "query"),
                    ("list", "search"),
                    ("srsearch", term),
                    ("srnamespace", "0"),
                    ("srlimit", "1"),
                    ("format", "json"),
                ],
            )
            .await?;

        Ok(response
            .query
            .and_then(|query| query.search.into_iter().next())
            .map(|result| result.title))
    }

    async fn original_image(&self, title: &str) -> Result<Option<String>, GuideError> {
        let response: PageImagesResponse = self
            .fetcher
            .get_json(
                &self.api_url,
                &[
                    ("action", "query"),
                    ("titles", title),
                    ("prop", "pageimages"),
                    ("piprop", "original"),
                    ("format", "json"),
                ],
            )
            .await?;

        Ok(response.query.and_then(|query| {
            query
                .pages
                .into_values()
                .find_map(|page| page.original.map(|image| image.source))
        }))
    }
}

#[async_trait]
impl ImageSearch for WikipediaSearch {
    fn source_name(&self) -> &str {
        "wikipedia"
    }

    async fn find_image(&self, term: &str) -> Result<Option<ImageHit>, GuideError> {
        let Some(title) = self.top_title(term).await? else {
            debug!("No article found for '{}'", term);
            return Ok(None);
        };

        let url = self.original_image(&title).await?;
        debug!("Article '{}' for '{}' has image {:?}", title, term, url);
        Ok(url.map(|url| ImageHit { url, title }))
    }

    async fn download(&self, url: &str) -> Result<Vec<u8>, GuideError> {
        let mut headers = HeaderMap::new();
        headers.insert(REFERER, HeaderValue::from_static("https://en.wikipedia.org/"));
        headers.insert(
            ACCEPT,
            HeaderValue::from_static("image/webp,image/apng,image/*,*/*;q=0.8"),
        );

        let bytes = self.fetcher.get_bytes(url, &headers).await?;
        if bytes.len() <= self.min_image_bytes {
            return Err(GuideError::ImageTooSmall(bytes.len()));
        }
        Ok(bytes)
    }
}
