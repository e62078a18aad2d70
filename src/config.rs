use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

/// Main ingestion configuration structure
#[derive(Debug, Deserialize, Clone, Default)]
pub struct IngestConfig {
    /// Limits applied when deriving names and notes
    #[serde(default)]
    pub naming: NamingLimits,
    /// Remote categorization settings
    #[serde(default)]
    pub ai: AiConfig,
}

/// Length limits used by the name/notes heuristics, counted in characters
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
pub struct NamingLimits {
    #[serde(default = "default_name_max_chars")]
    pub name_max_chars: usize,
    /// Cleaned user names shorter than this are rejected
    #[serde(default = "default_name_min_chars")]
    pub name_min_chars: usize,
    /// Notes shorter than this are dropped
    #[serde(default = "default_notes_min_chars")]
    pub notes_min_chars: usize,
    /// Longer notes are cut and get an ellipsis
    #[serde(default = "default_notes_max_chars")]
    pub notes_max_chars: usize,
}

impl Default for NamingLimits {
    fn default() -> Self {
        Self {
            name_max_chars: default_name_max_chars(),
            name_min_chars: default_name_min_chars(),
            notes_min_chars: default_notes_min_chars(),
            notes_max_chars: default_notes_max_chars(),
        }
    }
}

/// Configuration for the OpenRouter-compatible categorization endpoint
#[derive(Debug, Deserialize, Clone)]
pub struct AiConfig {
    /// API key for authentication (can also be set via OPENROUTER_API_KEY)
    pub api_key: Option<String>,
    /// Base URL for the API endpoint
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Models to try, first to last
    #[serde(default = "default_models")]
    pub models: Vec<String>,
    /// Temperature for generation (0.0-1.0)
    #[serde(default = "default_temperature")]
    pub temperature: f32,
    /// Maximum tokens to generate
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout: u64,
    /// Sent as HTTP-Referer
    #[serde(default = "default_referer")]
    pub referer: String,
    /// Sent as X-Title
    #[serde(default = "default_title")]
    pub title: String,
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_base_url(),
            models: default_models(),
            temperature: default_temperature(),
            max_tokens: default_max_tokens(),
            timeout: default_timeout(),
            referer: default_referer(),
            title: default_title(),
        }
    }
}

// Default value functions
fn default_name_max_chars() -> usize {
    20
}

fn default_name_min_chars() -> usize {
    2
}

fn default_notes_min_chars() -> usize {
    3
}

fn default_notes_max_chars() -> usize {
    100
}

fn default_base_url() -> String {
    "https://openrouter.ai/api".to_string()
}

fn default_models() -> Vec<String> {
    vec![
        "meta-llama/llama-3.2-3b-instruct:free".to_string(),
        "microsoft/phi-3-mini-128k-instruct:free".to_string(),
        "google/gemma-2-9b-it:free".to_string(),
        "qwen/qwen-2-7b-instruct:free".to_string(),
    ]
}

fn default_temperature() -> f32 {
    0.7
}

fn default_max_tokens() -> u32 {
    2000
}

fn default_timeout() -> u64 {
    30
}

fn default_referer() -> String {
    "https://naviai.vercel.app".to_string()
}

fn default_title() -> String {
    "NaviAI".to_string()
}

impl IngestConfig {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded with the following priority (highest to lowest):
    /// 1. Environment variables with BOOKMARK_INGEST__ prefix
    /// 2. bookmark-ingest.toml file in current directory
    /// 3. Default values
    ///
    /// Environment variable format: BOOKMARK_INGEST__NAMING__NAME_MAX_CHARS
    pub fn load() -> Result<Self, ConfigError> {
        load_config()
    }
}

/// Load configuration from file and environment variables
///
/// See [`IngestConfig::load`] for the precedence rules.
pub fn load_config() -> Result<IngestConfig, ConfigError> {
    let settings = Config::builder()
        // Optional config file (can be missing)
        .add_source(File::with_name("bookmark-ingest").required(false))
        // Use double underscore for nested: BOOKMARK_INGEST__AI__API_KEY
        .add_source(
            Environment::with_prefix("BOOKMARK_INGEST")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    settings.try_deserialize()
}
