use std::fmt;

/// Custom error type for repo-traffic operations
#[derive(Debug)]
pub enum TrafficError {
    /// Missing, empty or rejected access token
    Credential(String),
    /// GitHub API related errors
    GitHub(String),
    /// File I/O errors
    Io(std::io::Error),
    /// JSON parsing errors
    Json(serde_json::Error),
    /// HTTP request errors
    Http(reqwest::Error),
    /// CSV writing errors
    Csv(csv::Error),
    /// Generic errors with message
    Generic(String),
}

impl fmt::Display for TrafficError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TrafficError::Credential(msg) => write!(f, "Credential error: {}", msg),
            TrafficError::GitHub(msg) => write!(f, "GitHub API error: {}", msg),
            TrafficError::Io(err) => write!(f, "I/O error: {}", err),
            TrafficError::Json(err) => write!(f, "JSON error: {}", err),
            TrafficError::Http(err) => write!(f, "HTTP error: {}", err),
            TrafficError::Csv(err) => write!(f, "CSV error: {}", err),
            TrafficError::Generic(msg) => write!(f, "{}", msg),
        }
    }
}

impl std::error::Error for TrafficError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TrafficError::Io(err) => Some(err),
            TrafficError::Json(err) => Some(err),
            TrafficError::Http(err) => Some(err),
            TrafficError::Csv(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for TrafficError {
    fn from(err: std::io::Error) -> Self {
        TrafficError::Io(err)
    }
}

impl From<serde_json::Error> for TrafficError {
    fn from(err: serde_json::Error) -> Self {
        TrafficError::Json(err)
    }
}

impl From<reqwest::Error> for TrafficError {
    fn from(err: reqwest::Error) -> Self {
        TrafficError::Http(err)
    }
}

impl From<csv::Error> for TrafficError {
    fn from(err: csv::Error) -> Self {
        TrafficError::Csv(err)
    }
}

impl From<reqwest::header::InvalidHeaderValue> for TrafficError {
    fn from(err: reqwest::header::InvalidHeaderValue) -> Self {
        TrafficError::Credential(err.to_string())
    }
}

impl From<anyhow::Error> for TrafficError {
    fn from(err: anyhow::Error) -> Self {
        TrafficError::Generic(err.to_string())
    }
}

/// Result type alias for repo-traffic operations
pub type Result<T> = std::result::Result<T, TrafficError>;
