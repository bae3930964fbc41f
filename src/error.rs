//! Error types for the skillstack client
//!
//! The activity widget itself never fails; these types cover the layers
//! around it: configuration, the REST backend and user input.

use thiserror::Error;

/// Main error type for the skillstack client
#[derive(Error, Debug)]
pub enum SkillStackError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Backend API errors
    #[error("API error: {0}")]
    Api(#[from] ApiError),

    /// Input validation errors
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Configuration-related errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Could not determine the configuration directory")]
    NoConfigDir,

    #[error("Invalid API URL: {0}. Expected an http:// or https:// URL")]
    InvalidApiUrl(String),

    #[error("Invalid chart dimensions: {0}")]
    InvalidChart(String),

    #[error("Failed to load configuration file: {0}")]
    LoadFailed(String),

    #[error("Failed to save configuration file: {0}")]
    SaveFailed(String),
}

/// Backend API errors
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Failed to connect to backend at {url}: {reason}")]
    ConnectionFailed { url: String, reason: String },

    #[error("Request failed with status {status}: {body}")]
    RequestFailed { status: u16, body: String },

    #[error("Invalid API response: {0}")]
    InvalidResponse(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Network error: {0}")]
    NetworkError(#[from] reqwest::Error),
}

/// Input validation errors
#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("Invalid date format: {0}. Expected YYYY-MM-DD, YYYY.MM.DD, or YYYY/MM/DD")]
    InvalidDateFormat(String),

    #[error("Please enter an activity title")]
    EmptyTitle,

    #[error("Please enter a skill name")]
    EmptySkillName,

    #[error("Invalid difficulty: {0}. Must be between 1 and 5")]
    InvalidDifficulty(i64),

    #[error("Invalid hours value: {0}. Must not be negative")]
    InvalidHours(f64),

    #[error("Invalid progress: {0}. Expected started, in-progress or completed")]
    InvalidProgress(String),

    #[error("Invalid sort order: {0}. Expected recent, difficulty or hours")]
    InvalidSort(String),

    #[error("Invalid date range: start {start} is after end {end}")]
    InvalidRange { start: String, end: String },
}

/// Result type alias for the skillstack client
pub type Result<T> = std::result::Result<T, SkillStackError>;
