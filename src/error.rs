//! Error types for the Vélo Pronos CLI

use thiserror::Error;

pub type Result<T> = std::result::Result<T, PronosError>;

#[derive(Error, Debug)]
pub enum PronosError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON parsing failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid header value: {0}")]
    InvalidHeader(#[from] reqwest::header::InvalidHeaderValue),

    #[error("League ID not provided and {env_var} environment variable not set")]
    MissingLeagueId { env_var: String },

    #[error("Failed to parse numeric ID: {0}")]
    InvalidId(#[from] std::num::ParseIntError),

    #[error("Not authenticated: {message}")]
    Auth { message: String },

    #[error("{what} not found")]
    NotFound { what: String },

    #[error("API rejected the request ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("Race has already started, bets are locked")]
    RaceStarted,

    #[error("Invalid invite code: expected `leagueId:code`, got `{raw}`")]
    InvalidInviteCode { raw: String },

    #[error("Invalid race type: {race_type}")]
    InvalidRaceType { race_type: String },

    #[error("Cache error: {message}")]
    Cache { message: String },
}

impl From<anyhow::Error> for PronosError {
    fn from(err: anyhow::Error) -> Self {
        PronosError::Cache {
            message: err.to_string(),
        }
    }
}

impl From<Box<dyn std::error::Error + Send + Sync>> for PronosError {
    fn from(err: Box<dyn std::error::Error + Send + Sync>) -> Self {
        PronosError::Cache {
            message: err.to_string(),
        }
    }
}
