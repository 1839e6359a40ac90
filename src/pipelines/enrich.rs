use super::link;
use crate::cache::UrlCache;
use crate::config::EnrichmentConfig;
use crate::error::GuideError;
use crate::model::PlantRecord;
use crate::providers::ImageSearch;
use crate::store::{find_existing_image, image_extension, sanitize_filename};
use log::{debug, info, warn};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::time::sleep;

/// Counts reported after an enrichment run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnrichmentSummary {
    /// Plants looked up during this run
    pub searched: usize,
    /// Lookups that produced an image URL
    pub found: usize,
    /// Lookups that failed with an error and were not cached
    pub search_errors: usize,
    /// Images written to disk
    pub downloaded: usize,
    /// Downloads that failed
    pub failed: usize,
    /// Plants that already had an image on disk
    pub skipped: usize,
    /// Plants linked to an image file at the end
    pub linked: usize,
}

/// Finds, downloads and links an image for each plant.
///
/// Work runs one plant at a time with a fixed delay between requests.
/// Per-plant failures are logged and counted; only cache I/O is fatal.
pub struct Enricher<'a> {
    search: &'a dyn ImageSearch,
    images_dir: PathBuf,
    cache_path: PathBuf,
    delay: Duration,
    save_every: usize,
}

impl<'a> Enricher<'a> {
    pub fn new(
        search: &'a dyn ImageSearch,
        images_dir: impl Into<PathBuf>,
        cache_path: impl Into<PathBuf>,
        config: &EnrichmentConfig,
    ) -> Self {
        Self {
            search,
            images_dir: images_dir.into(),
            cache_path: cache_path.into(),
            delay: Duration::from_millis(config.request_delay_ms),
            save_every: config.save_every.max(1),
        }
    }

    pub async fn run(&self, plants: &mut [PlantRecord]) -> Result<EnrichmentSummary, GuideError> {
        tokio::fs::create_dir_all(&self.images_dir).await?;

        let mut cache = UrlCache::load(&self.cache_path)?;
        info!(
            "Loaded {} cached URLs from {}",
            cache.len(),
            self.cache_path.display()
        );

        let mut summary = EnrichmentSummary::default();
        self.resolve_urls(plants, &mut cache, &mut summary).await?;
        self.download_images(plants, &cache, &mut summary).await;
        // Only plants with a cache entry are marked null
        summary.linked = link::process_marking(plants, &self.images_dir, |plant| {
            cache.contains(&plant.scientific_name)
        });

        info!(
            "Enrichment finished: {} downloaded, {} failed, {} skipped, {} linked",
            summary.downloaded, summary.failed, summary.skipped, summary.linked
        );
        Ok(summary)
    }

    fn has_image_on_disk(&self, plant: &PlantRecord) -> bool {
        find_existing_image(&self.images_dir, &sanitize_filename(&plant.scientific_name))
            .is_some()
    }

    async fn resolve_urls(
        &self,
        plants: &[PlantRecord],
        cache: &mut UrlCache,
        summary: &mut EnrichmentSummary,
    ) -> Result<(), GuideError> {
        let pending: Vec<&PlantRecord> = plants
            .iter()
            .filter(|plant| !plant.marked_without_image())
            .filter(|plant| !cache.contains(&plant.scientific_name))
            .filter(|plant| !self.has_image_on_disk(plant))
            .collect();

        info!("Need to fetch URLs for {} plants", pending.len());

        for (index, plant) in pending.iter().enumerate() {
            info!(
                "[{}/{}] Searching {}: {} ({})",
                index + 1,
                pending.len(),
                self.search.source_name(),
                plant.scientific_name,
                plant.common_name
            );
            summary.searched += 1;

            match self.lookup(plant).await {
                Ok(url) => {
                    if url.is_some() {
                        summary.found += 1;
                    } else {
                        debug!("No image for {}", plant.scientific_name);
                    }
                    cache.insert(plant.scientific_name.clone(), url);
                }
                Err(e) => {
                    warn!("Search failed for {}: {}", plant.scientific_name, e);
                    summary.search_errors += 1;
                }
            }

            if (index + 1) % self.save_every == 0 {
                cache.save(&self.cache_path)?;
                info!("Cache saved - {} URLs", cache.resolved_count());
            }

            sleep(self.delay).await;
        }

        cache.save(&self.cache_path)?;
        info!("Total cached URLs: {}", cache.resolved_count());
        Ok(())
    }

    /// Scientific name first, then common name. An error on either lookup
    /// without a hit is returned so the miss is not cached.
    async fn lookup(&self, plant: &PlantRecord) -> Result<Option<String>, GuideError> {
        let mut last_error = None;

        for term in [&plant.scientific_name, &plant.common_name] {
            if term.is_empty() {
                continue;
            }
            match self.search.find_image(term).await {
                Ok(Some(hit)) => return Ok(Some(hit.url)),
                Ok(None) => {}
                Err(e) => last_error = Some(e),
            }
        }

        match last_error {
            Some(e) => Err(e),
            None => Ok(None),
        }
    }

    async fn download_images(
        &self,
        plants: &[PlantRecord],
        cache: &UrlCache,
        summary: &mut EnrichmentSummary,
    ) {
        info!("Downloading images into {}", self.images_dir.display());

        for plant in plants {
            if self.has_image_on_disk(plant) {
                summary.skipped += 1;
                continue;
            }

            let Some(url) = cache.url(&plant.scientific_name) else {
                continue;
            };

            let path = self.image_path(&plant.scientific_name, url);
            match self.fetch_to(url, &path).await {
                Ok(()) => {
                    info!("Downloaded {}", path.display());
                    summary.downloaded += 1;
                }
                Err(e) => {
                    warn!("Failed to download {}: {}", plant.scientific_name, e);
                    summary.failed += 1;
                }
            }

            sleep(self.delay).await;
        }
    }

    fn image_path(&self, scientific_name: &str, url: &str) -> PathBuf {
        let stem = sanitize_filename(scientific_name);
        self.images_dir.join(format!("{}{}", stem, image_extension(url)))
    }

    async fn fetch_to(&self, url: &str, path: &Path) -> Result<(), GuideError> {
        let bytes = self.search.download(url).await?;
        tokio::fs::write(path, bytes).await?;
        Ok(())
    }
}
