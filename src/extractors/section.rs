use crate::config::ParserConfig;
use log::debug;

/// Slice of the document holding the plant descriptions.
///
/// Starts at the page marker, else the fallback header, else the document
/// start. Ends at the first end marker after the start, else the document end.
pub fn locate_section<'a>(content: &'a str, config: &ParserConfig) -> &'a str {
    let start = find_marker(content, &config.start_marker)
        .or_else(|| {
            debug!("Start marker not found, trying fallback header");
            find_marker(content, &config.fallback_marker)
        })
        .unwrap_or(0);

    let end = find_marker(&content[start..], &config.end_marker)
        .map(|offset| start + offset)
        .unwrap_or(content.len());

    debug!("Description section spans bytes {}..{}", start, end);
    &content[start..end]
}

fn find_marker(haystack: &str, marker: &str) -> Option<usize> {
    if marker.is_empty() {
        return None;
    }
    haystack.find(marker)
}
