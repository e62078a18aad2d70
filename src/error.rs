use thiserror::Error;

/// Errors that can occur during bookmark ingestion
#[derive(Error, Debug)]
pub enum IngestError {
    /// No JSON strategy could read the model response
    #[error(transparent)]
    JsonExtraction(#[from] JsonExtractionError),

    /// Strict batch input broke the one-URL-per-line contract
    #[error(transparent)]
    StrictFormat(#[from] StrictFormatError),

    /// Failed to reach the categorization endpoint
    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The categorization provider answered with something unusable
    #[error("Provider error: {0}")]
    Provider(String),

    /// Builder configuration error
    #[error("Builder error: {0}")]
    BuilderError(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(#[from] config::ConfigError),

    /// Reading input failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Every extraction strategy failed on a model response.
///
/// The raw response is kept so callers can log it in full.
#[derive(Error, Debug, Clone)]
#[error("No JSON object could be extracted after {} strategies", .attempts.len())]
pub struct JsonExtractionError {
    pub raw: String,
    /// One message per attempted strategy, in the order they ran
    pub attempts: Vec<String>,
}

/// A strict-mode violation, always tied to a 1-based input line.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StrictFormatError {
    #[error("line {line}: a URL must be on its own line, found trailing content \"{content}\"")]
    TrailingContent { line: usize, content: String },

    #[error("line {line}: \"{url}\" is not a valid URL")]
    InvalidUrl { line: usize, url: String },

    #[error("line {line}: note has no URL after it")]
    DanglingNotes { line: usize },

    #[error("input contains no URLs")]
    Empty,
}

impl StrictFormatError {
    /// Line the error points at, if any
    pub fn line(&self) -> Option<usize> {
        match self {
            StrictFormatError::TrailingContent { line, .. }
            | StrictFormatError::InvalidUrl { line, .. }
            | StrictFormatError::DanglingNotes { line } => Some(*line),
            StrictFormatError::Empty => None,
        }
    }
}
