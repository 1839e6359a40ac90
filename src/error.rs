use thiserror::Error;

/// Errors that can occur while importing or enriching plant records
///
/// Parsing the guide text itself never fails; these cover the I/O and
/// network work around it.
#[derive(Error, Debug)]
pub enum GuideError {
    /// Failed to read or write a file
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Failed to read or write JSON
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Failed to complete an HTTP request
    #[error("Failed to fetch URL: {0}")]
    FetchError(#[from] reqwest::Error),

    /// The server answered with a non-success status
    #[error("HTTP {status} from {url}")]
    HttpStatus { status: u16, url: String },

    /// Still rate limited after waiting and retrying
    #[error("Rate limited by {0}")]
    RateLimited(String),

    /// Downloaded payload is too small to be an image
    #[error("Image too small ({0} bytes)")]
    ImageTooSmall(usize),

    /// Builder configuration error
    #[error("Builder error: {0}")]
    BuilderError(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(#[from] config::ConfigError),
}
