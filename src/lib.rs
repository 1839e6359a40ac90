pub mod builder;
pub mod cache;
pub mod categorize;
pub mod config;
pub mod error;
pub mod extractors;
pub mod fetchers;
pub mod merge;
pub mod model;
pub mod pipelines;
pub mod providers;
pub mod store;

use log::debug;
use std::fs;
use std::path::Path;

pub use builder::{PlantGuideImporter, PlantGuideImporterBuilder};
pub use config::{EnrichmentConfig, GuideConfig, ParserConfig};
pub use error::GuideError;
pub use model::{Category, PlantRecord};
pub use pipelines::enrich::{Enricher, EnrichmentSummary};
pub use providers::{ImageHit, ImageSearch, WikipediaSearch};

/// Parse guide text with the default configuration
pub fn parse_guide(content: &str) -> Vec<PlantRecord> {
    pipelines::parse::process(content, &ParserConfig::default())
}

/// Read a guide file and parse it
pub fn parse_guide_file(path: &Path, config: &ParserConfig) -> Result<Vec<PlantRecord>, GuideError> {
    let content = fs::read_to_string(path)?;
    debug!("Read {} bytes from {}", content.len(), path.display());
    Ok(pipelines::parse::process(&content, config))
}

/// Attach image files already in `images_dir`. Returns the number matched.
pub fn link_images(plants: &mut [PlantRecord], images_dir: &Path) -> usize {
    pipelines::link::process(plants, images_dir)
}

/// Find, download and link Wikipedia images for the given plants
pub async fn enrich_plants(
    plants: &mut [PlantRecord],
    images_dir: &Path,
    cache_path: &Path,
    config: &EnrichmentConfig,
) -> Result<EnrichmentSummary, GuideError> {
    let search = WikipediaSearch::new(config)?;
    Enricher::new(&search, images_dir, cache_path, config)
        .run(plants)
        .await
}
