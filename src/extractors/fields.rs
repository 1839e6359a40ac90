use super::entry::{looks_like_entry_start, match_entry, validate};
use regex::Regex;
use std::sync::LazyLock;

static COEFFICIENT_CLAUSE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\s*Coefficient\s+of\s+\d+.*$").expect("coefficient pattern is valid")
});

/// Lines that end a Form/Color continuation
const CONTINUATION_STOPS: &[&str] = &["Other:", "---", "Habitat:", "Page |"];

/// Labeled fields collected for one entry. Missing fields stay empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HarvestedFields {
    pub habitat: String,
    pub exposure: String,
    pub form_color: String,
    pub ecosystem_services: String,
    pub horticultural_value: String,
    pub other_info: String,
}

/// Window limits for [`harvest_fields`]
#[derive(Debug, Clone, Copy)]
pub struct HarvestWindow {
    pub lookahead: usize,
    pub early_stop_after: usize,
    pub form_color_continuation: usize,
}

impl Default for HarvestWindow {
    fn default() -> Self {
        Self {
            lookahead: 60,
            early_stop_after: 3,
            form_color_continuation: 3,
        }
    }
}

/// Scan the lines after the entry at `index` and pick up labeled fields.
///
/// The window closes at `lookahead` lines or at a line that is itself a valid
/// entry. Past `early_stop_after` lines, any line loosely shaped like an entry
/// closes it too.
pub fn harvest_fields(lines: &[&str], index: usize, window: HarvestWindow) -> HarvestedFields {
    let mut fields = HarvestedFields::default();
    let limit = index.saturating_add(window.lookahead).min(lines.len());
    let early_stop = index.saturating_add(window.early_stop_after);

    for j in index + 1..limit {
        let line = lines[j].trim();

        if j <= early_stop && is_valid_entry(line) {
            break;
        }

        if let Some(rest) = line.strip_prefix("Habitat:") {
            let text = rest.replace("Habitat:", "");
            fields.habitat = COEFFICIENT_CLAUSE.replace(text.trim(), "").into_owned();
        } else if let Some((_, after)) = line.split_once("Exposure:") {
            let after = after.split("Exposure:").next().unwrap_or("");
            let exposure = after.split("Ecosystem").next().unwrap_or("");
            fields.exposure = exposure.trim().to_string();
        } else if line.contains("Form/Color:") {
            fields.form_color = form_color(lines, j, window.form_color_continuation);
        } else if line.contains("Ecosystem Services:") {
            fields.ecosystem_services = after_last(line, "Services:");
        } else if line.contains("Horticultural") && line.contains("Value:") {
            fields.horticultural_value = after_last(line, "Value:");
        } else if let Some(rest) = line.strip_prefix("Other:") {
            fields.other_info = rest.replace("Other:", "").trim().to_string();
        }

        if j > early_stop && (looks_like_entry_start(line) || is_valid_entry(line)) {
            break;
        }
    }

    fields
}

fn form_color(lines: &[&str], j: usize, continuation: usize) -> String {
    let mut text = after_last(lines[j].trim(), "Form/Color:");
    let limit = (j + 1).saturating_add(continuation).min(lines.len());

    for next in &lines[j + 1..limit] {
        let next = next.trim();
        if next.is_empty() || CONTINUATION_STOPS.iter().any(|stop| next.starts_with(stop)) {
            break;
        }
        if looks_like_entry_start(next) || is_valid_entry(next) {
            break;
        }
        text.push(' ');
        text.push_str(next);
    }

    text
}

fn is_valid_entry(line: &str) -> bool {
    match_entry(line).is_some_and(|candidate| validate(&candidate).is_ok())
}

fn after_last(line: &str, label: &str) -> String {
    line.rsplit(label).next().unwrap_or("").trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(text: &str) -> Vec<&str> {
        text.lines().collect()
    }

    #[test]
    fn test_all_labels() {
        let doc = lines(
            "Acer rubrum Red maple\n\
             Habitat: Swamps and uplands Coefficient of 2 wetness\n\
             Exposure: Full sun Ecosystem Services: Pollinators\n\
             Form/Color: Rounded crown\n\
             red flowers in spring\n\
             Other: Fast growing\n\
             Ecosystem Services: Early nectar\n\
             Horticultural and Aesthetic Value: Fall color",
        );

        let fields = harvest_fields(&doc, 0, HarvestWindow::default());

        assert_eq!(fields.habitat, "Swamps and uplands");
        assert_eq!(fields.exposure, "Full sun");
        assert_eq!(fields.form_color, "Rounded crown red flowers in spring");
        assert_eq!(fields.other_info, "Fast growing");
        assert_eq!(fields.ecosystem_services, "Early nectar");
        assert_eq!(fields.horticultural_value, "Fall color");
    }

    #[test]
    fn test_exposure_line_wins_over_services_on_same_line() {
        let doc = lines("Acer rubrum Red maple\nExposure: Shade Ecosystem Services: Birds");
        let fields = harvest_fields(&doc, 0, HarvestWindow::default());
        assert_eq!(fields.exposure, "Shade");
        assert_eq!(fields.ecosystem_services, "");
    }

    #[test]
    fn test_form_color_continuation_limits() {
        let doc = lines(
            "Acer rubrum Red maple\n\
             Form/Color: one\n\
             two\n\
             three\n\
             four\n\
             five",
        );
        let fields = harvest_fields(&doc, 0, HarvestWindow::default());
        assert_eq!(fields.form_color, "one two three four");

        let doc = lines("Acer rubrum Red maple\nForm/Color: Upright\nOther: Tolerates salt");
        let fields = harvest_fields(&doc, 0, HarvestWindow::default());
        assert_eq!(fields.form_color, "Upright");
        assert_eq!(fields.other_info, "Tolerates salt");

        let doc = lines("Acer rubrum Red maple\nForm/Color: Upright\nQuercus alba White oak");
        let fields = harvest_fields(&doc, 0, HarvestWindow::default());
        assert_eq!(fields.form_color, "Upright");
    }

    #[test]
    fn test_window_stops_at_next_entry() {
        let doc = lines(
            "Acer rubrum Red maple\n\
             Habitat: Swamps\n\
             Exposure: Sun\n\
             Other: Tall\n\
             Quercus alba White oak\n\
             Habitat: Dry upland forest\n\
             Other: Long lived",
        );
        let fields = harvest_fields(&doc, 0, HarvestWindow::default());
        assert_eq!(fields.habitat, "Swamps");
        assert_eq!(fields.other_info, "Tall");
    }

    #[test]
    fn test_marked_and_variety_entries_close_window() {
        let doc = lines(
            "Acer rubrum Red maple\n\
             Habitat: Swamps\n\
             Exposure: Sun\n\
             Other: Tall tree\n\
             Parthenocissus quinquefolia \u{2020} Virginia creeper\n\
             Habitat: Woods edges\n\
             Form/Color: Climbing vine",
        );
        let fields = harvest_fields(&doc, 0, HarvestWindow::default());
        assert_eq!(fields.habitat, "Swamps");
        assert_eq!(fields.form_color, "");

        let doc = lines(
            "Acer rubrum Red maple\n\
             Habitat: Swamps\n\
             Exposure: Sun\n\
             Other: Tall tree\n\
             Cornus sericea var. occidentalis Western dogwood\n\
             Habitat: Wet thickets",
        );
        let fields = harvest_fields(&doc, 0, HarvestWindow::default());
        assert_eq!(fields.habitat, "Swamps");
        assert_eq!(fields.other_info, "Tall tree");
    }

    #[test]
    fn test_form_color_stops_at_marked_entry() {
        let doc = lines(
            "Acer rubrum Red maple\n\
             Form/Color: Upright\n\
             Vitis riparia \u{2020} Riverbank grape",
        );
        let fields = harvest_fields(&doc, 0, HarvestWindow::default());
        assert_eq!(fields.form_color, "Upright");
    }

    #[test]
    fn test_huge_window_settings_do_not_overflow() {
        let doc = lines("Acer rubrum Red maple\nHabitat: Swamps\nForm/Color: Upright\nred bark");
        let window = HarvestWindow {
            lookahead: usize::MAX,
            early_stop_after: usize::MAX,
            form_color_continuation: usize::MAX,
        };
        let fields = harvest_fields(&doc, 1, window);
        assert_eq!(fields.form_color, "Upright red bark");

        let fields = harvest_fields(&doc, 0, window);
        assert_eq!(fields.habitat, "Swamps");
        assert_eq!(fields.form_color, "Upright red bark");
    }

    #[test]
    fn test_adjacent_entry_closes_window_early() {
        let doc = lines(
            "Acer rubrum Red maple\n\
             Quercus alba White oak\n\
             Habitat: Dry upland forest\n\
             Exposure: Full sun",
        );
        let fields = harvest_fields(&doc, 0, HarvestWindow::default());
        assert_eq!(fields, HarvestedFields::default());

        // Shaped like an entry but rejected, so the window stays open
        let doc = lines("Acer rubrum Red maple\nTrees are Tall\nHabitat: Swamps");
        assert_eq!(harvest_fields(&doc, 0, HarvestWindow::default()).habitat, "Swamps");
    }

    #[test]
    fn test_lookahead_caps_window() {
        let doc = lines("Acer rubrum Red maple\n\n\nHabitat: Swamps");
        let window = HarvestWindow {
            lookahead: 3,
            ..HarvestWindow::default()
        };
        assert_eq!(harvest_fields(&doc, 0, window).habitat, "");
        assert_eq!(harvest_fields(&doc, 0, HarvestWindow::default()).habitat, "Swamps");
    }
}
