use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::Path;

/// Main configuration structure
#[derive(Debug, Deserialize, Clone, Default)]
pub struct GuideConfig {
    /// Guide parsing configuration
    #[serde(default)]
    pub parser: ParserConfig,
    /// Image enrichment configuration
    #[serde(default)]
    pub enrichment: EnrichmentConfig,
}

/// Anchors and window sizes used when extracting plant entries
#[derive(Debug, Deserialize, Clone)]
pub struct ParserConfig {
    /// Page marker where the plant descriptions begin
    #[serde(default = "default_start_marker")]
    pub start_marker: String,
    /// Section header tried when the page marker is missing
    #[serde(default = "default_fallback_marker")]
    pub fallback_marker: String,
    /// Token that ends the plant descriptions
    #[serde(default = "default_end_marker")]
    pub end_marker: String,
    /// Maximum number of lines scanned after an entry line
    #[serde(default = "default_lookahead")]
    pub lookahead: usize,
    /// Lines after which a new entry line closes the window
    #[serde(default = "default_early_stop_after")]
    pub early_stop_after: usize,
    /// Continuation lines appended to Form/Color
    #[serde(default = "default_form_color_continuation")]
    pub form_color_continuation: usize,
    /// Harvest every duplicate entry and let the merge pick one
    #[serde(default)]
    pub keep_duplicate_candidates: bool,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            start_marker: default_start_marker(),
            fallback_marker: default_fallback_marker(),
            end_marker: default_end_marker(),
            lookahead: default_lookahead(),
            early_stop_after: default_early_stop_after(),
            form_color_continuation: default_form_color_continuation(),
            keep_duplicate_candidates: false,
        }
    }
}

/// Configuration for image search and download
#[derive(Debug, Deserialize, Clone)]
pub struct EnrichmentConfig {
    /// Base URL of the Wikipedia API host
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,
    /// User-Agent sent with every request
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    /// Delay between requests in milliseconds
    #[serde(default = "default_request_delay_ms")]
    pub request_delay_ms: u64,
    /// Wait before retrying a rate limited request, in seconds
    #[serde(default = "default_rate_limit_wait_secs")]
    pub rate_limit_wait_secs: u64,
    /// Downloads this size or smaller are rejected
    #[serde(default = "default_min_image_bytes")]
    pub min_image_bytes: usize,
    /// Save progress every N plants
    #[serde(default = "default_save_every")]
    pub save_every: usize,
    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout: u64,
}

impl Default for EnrichmentConfig {
    fn default() -> Self {
        Self {
            api_base_url: default_api_base_url(),
            user_agent: default_user_agent(),
            request_delay_ms: default_request_delay_ms(),
            rate_limit_wait_secs: default_rate_limit_wait_secs(),
            min_image_bytes: default_min_image_bytes(),
            save_every: default_save_every(),
            timeout: default_timeout(),
        }
    }
}

// Default value functions
fn default_start_marker() -> String {
    "Page | 98".to_string()
}

fn default_fallback_marker() -> String {
    "Ferns\nFerns add texture".to_string()
}

fn default_end_marker() -> String {
    "Glossary".to_string()
}

fn default_lookahead() -> usize {
    60
}

fn default_early_stop_after() -> usize {
    3
}

fn default_form_color_continuation() -> usize {
    3
}

fn default_api_base_url() -> String {
    "https://en.wikipedia.org".to_string()
}

fn default_user_agent() -> String {
    "PlantGuideImport/0.3 (Educational plant flashcards project)".to_string()
}

fn default_request_delay_ms() -> u64 {
    2000
}

fn default_rate_limit_wait_secs() -> u64 {
    60
}

fn default_min_image_bytes() -> usize {
    1000
}

fn default_save_every() -> usize {
    20
}

fn default_timeout() -> u64 {
    30
}

impl GuideConfig {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded with the following priority (highest to lowest):
    /// 1. Environment variables with PLANTGUIDE__ prefix
    /// 2. The given TOML file, or plantguide.toml in the current directory
    /// 3. Default values
    ///
    /// Environment variable format: PLANTGUIDE__ENRICHMENT__REQUEST_DELAY_MS
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let file = match path {
            Some(path) => File::from(path).required(true),
            None => File::with_name("plantguide").required(false),
        };

        let settings = Config::builder()
            .add_source(file)
            // Use double underscore for nested: PLANTGUIDE__PARSER__LOOKAHEAD
            .add_source(
                Environment::with_prefix("PLANTGUIDE")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        settings.try_deserialize()
    }
}
