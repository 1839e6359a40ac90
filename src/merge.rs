use crate::model::PlantRecord;
use log::debug;
use std::collections::HashMap;

/// Collapse records sharing a scientific name (case-insensitive) and sort.
///
/// Within a group the record with the longest habitat text survives; on a
/// tie the first one seen is kept. Survivors are sorted by scientific name.
pub fn deduplicate_and_sort(records: Vec<PlantRecord>) -> Vec<PlantRecord> {
    let mut slots: HashMap<String, usize> = HashMap::new();
    let mut unique: Vec<PlantRecord> = Vec::new();

    for record in records {
        let key = record.scientific_name.to_lowercase();
        match slots.get(&key) {
            Some(&slot) => {
                if habitat_len(&record) > habitat_len(&unique[slot]) {
                    debug!(
                        "Replacing duplicate '{}' with longer habitat",
                        record.scientific_name
                    );
                    unique[slot] = record;
                }
            }
            None => {
                slots.insert(key, unique.len());
                unique.push(record);
            }
        }
    }

    unique.sort_by(|a, b| a.scientific_name.cmp(&b.scientific_name));
    unique
}

fn habitat_len(record: &PlantRecord) -> usize {
    record.habitat.chars().count()
}
