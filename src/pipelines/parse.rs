use crate::config::ParserConfig;
use crate::extractors::GuideExtractor;
use crate::model::{Category, PlantRecord};
use std::collections::BTreeMap;

/// Process guide text into merged, sorted plant records
///
/// This pipeline:
/// 1. Locates the plant description section
/// 2. Segments entry lines and harvests their labeled fields
/// 3. Categorizes each record by genus
/// 4. Deduplicates by scientific name and sorts
pub fn process(content: &str, config: &ParserConfig) -> Vec<PlantRecord> {
    GuideExtractor::new(config.clone()).extract(content)
}

/// Number of plants in each category, every category included
pub fn category_counts(plants: &[PlantRecord]) -> BTreeMap<Category, usize> {
    let mut counts: BTreeMap<Category, usize> =
        Category::ALL.iter().map(|category| (*category, 0)).collect();
    for plant in plants {
        *counts.entry(plant.category).or_default() += 1;
    }
    counts
}
