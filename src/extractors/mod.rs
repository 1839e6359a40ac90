use crate::categorize::categorize;
use crate::config::ParserConfig;
use crate::merge::deduplicate_and_sort;
use crate::model::PlantRecord;
use log::{debug, info};
use std::collections::HashSet;

mod entry;
mod fields;
mod section;

pub use self::entry::{
    clean_common_name, looks_like_entry_start, match_entry, validate, EntryCandidate, Rejection,
};
pub use self::fields::{harvest_fields, HarvestWindow, HarvestedFields};
pub use self::section::locate_section;

/// Pulls plant records out of the plain-text planting guide.
///
/// Extraction never fails: lines that do not fit are skipped and the result
/// may be empty.
#[derive(Debug, Clone, Default)]
pub struct GuideExtractor {
    config: ParserConfig,
}

impl GuideExtractor {
    pub fn new(config: ParserConfig) -> Self {
        Self { config }
    }

    fn window(&self) -> HarvestWindow {
        HarvestWindow {
            lookahead: self.config.lookahead,
            early_stop_after: self.config.early_stop_after,
            form_color_continuation: self.config.form_color_continuation,
        }
    }

    /// Every accepted entry in document order, before merging.
    pub fn extract_entries(&self, content: &str) -> Vec<PlantRecord> {
        let section = locate_section(content, &self.config);
        let lines: Vec<&str> = section.split('\n').collect();
        let window = self.window();

        let mut records = Vec::new();
        let mut seen = HashSet::new();
        let mut rejected = 0usize;

        for (index, raw) in lines.iter().enumerate() {
            let line = raw.trim();
            if line.is_empty() || line.starts_with("---") || line.starts_with("Page |") {
                continue;
            }

            let Some(candidate) = match_entry(line) else {
                continue;
            };

            if let Err(reason) = validate(&candidate) {
                debug!("Rejected '{}': {:?}", line, reason);
                rejected += 1;
                continue;
            }

            let scientific_name = candidate.scientific_name();
            if !seen.insert(scientific_name.to_lowercase()) && !self.config.keep_duplicate_candidates
            {
                debug!("Skipping repeated entry '{}'", scientific_name);
                continue;
            }

            let fields = harvest_fields(&lines, index, window);
            records.push(build_record(&scientific_name, &candidate.common_name, fields));
        }

        debug!(
            "Accepted {} entries, rejected {} candidates",
            records.len(),
            rejected
        );
        records
    }

    /// Extract, categorize, deduplicate and sort.
    pub fn extract(&self, content: &str) -> Vec<PlantRecord> {
        let plants = deduplicate_and_sort(self.extract_entries(content));
        info!("Found {} unique native plants", plants.len());
        plants
    }
}

fn build_record(scientific_name: &str, common_name: &str, fields: HarvestedFields) -> PlantRecord {
    let scientific_name = clean_name(scientific_name);
    let category = categorize(&scientific_name);

    PlantRecord {
        common_name: clean_name(common_name),
        category,
        habitat: fields.habitat,
        exposure: fields.exposure,
        form_color: fields.form_color,
        ecosystem_services: fields.ecosystem_services,
        horticultural_value: fields.horticultural_value,
        other_info: fields.other_info,
        scientific_name,
        ..Default::default()
    }
}

/// Collapse whitespace and trim stray punctuation from a name
pub fn clean_name(name: &str) -> String {
    entry::collapse_whitespace(name)
        .trim_matches(|c: char| matches!(c, ' ' | '.' | ',' | ';' | ':'))
        .to_string()
}
