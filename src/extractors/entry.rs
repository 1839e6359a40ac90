use regex::Regex;
use std::sync::LazyLock;

static ENTRY_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([A-Z][a-z]+)\s+([a-z]+(?:\s+(?:var\.|ssp\.)\s+[a-z]+)?)\s*†?\s+([A-Z].*)$")
        .expect("entry pattern is valid")
});

// Looser shape used to notice that the next plant has begun
static ENTRY_START: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Z][a-z]+\s+[a-z]+\s+[A-Z]").expect("start pattern is valid"));

static REGULATORY_SUFFIX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\s+(Prohibited|Regulated|Invasive).*$").expect("suffix pattern is valid")
});

/// Category banner words that look like a genus
const SECTION_HEADERS: &[&str] = &["ferns", "forbs", "graminoids", "shrubs", "trees", "vines"];

/// Common names that come from table headers
const TABLE_HEADERS: &[&str] = &["common name", "common names", "valued characteristics"];

/// A line that looks like the start of a plant description
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryCandidate {
    pub genus: String,
    pub species: String,
    pub common_name: String,
}

impl EntryCandidate {
    pub fn scientific_name(&self) -> String {
        format!("{} {}", self.genus, self.species)
    }
}

/// Why a matched line was not accepted as an entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    ShortCommonName,
    SectionHeader,
    NotBinomial,
    TableHeader,
}

/// Match a trimmed line against the entry shape.
pub fn match_entry(line: &str) -> Option<EntryCandidate> {
    let captures = ENTRY_LINE.captures(line)?;

    let genus = captures[1].trim().to_string();
    let species = captures[2].replace('†', "").trim().to_string();
    let common_name = clean_common_name(&captures[3].replace('†', ""));

    Some(EntryCandidate {
        genus,
        species,
        common_name,
    })
}

/// Accept or reject a matched candidate.
pub fn validate(candidate: &EntryCandidate) -> Result<(), Rejection> {
    if candidate.common_name.chars().count() < 3 {
        return Err(Rejection::ShortCommonName);
    }

    if SECTION_HEADERS.contains(&candidate.genus.to_lowercase().as_str()) {
        return Err(Rejection::SectionHeader);
    }

    if !is_binomial(&candidate.genus, &candidate.species) {
        return Err(Rejection::NotBinomial);
    }

    if TABLE_HEADERS.contains(&candidate.common_name.to_lowercase().as_str()) {
        return Err(Rejection::TableHeader);
    }

    Ok(())
}

/// True when the line looks like the next plant entry has begun.
pub fn looks_like_entry_start(line: &str) -> bool {
    ENTRY_START.is_match(line)
}

/// Drop a trailing regulatory status and collapse whitespace.
pub fn clean_common_name(raw: &str) -> String {
    let trimmed = raw.trim();
    let stripped = REGULATORY_SUFFIX.replace(trimmed, "");
    collapse_whitespace(&stripped)
}

pub(crate) fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn is_binomial(genus: &str, species: &str) -> bool {
    let genus_ok = genus.chars().next().is_some_and(char::is_uppercase);
    let species_ok = species.chars().next().is_some_and(char::is_lowercase);
    genus_ok && species_ok
}
