//! Error types for the StudiBot calendar core.
//!
//! None of these are fatal to the process: callers surface them and carry on
//! with whatever locally-consistent state remains.

use chrono::NaiveDate;
use thiserror::Error;

/// Errors from the persisted key/value layer.
///
/// `Store` logs and swallows these; they only surface from `KeyValueStore`
/// implementations.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Errors talking to the chat backend.
#[derive(Error, Debug)]
pub enum BackendError {
    #[error("Request to {path} failed: {source}")]
    Transport {
        path: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Backend returned status {status} for {path}: {body}")]
    Status {
        path: String,
        status: u16,
        body: String,
    },

    #[error("Backend rejected {path}: {message}")]
    Rejected { path: String, message: String },

    #[error("Failed to encode request for {path}: {source}")]
    Encode {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to decode response from {path}: {message}")]
    Decode { path: String, message: String },
}

pub type BackendResult<T> = Result<T, BackendError>;

/// Errors in the OAuth session lifecycle.
#[derive(Error, Debug)]
pub enum SessionError {
    #[error("No refresh token stored")]
    NoRefreshToken,

    #[error("Token refresh failed: {0}")]
    RefreshFailed(#[source] BackendError),

    #[error("Authorization code exchange failed: {0}")]
    AuthExchangeFailed(#[source] BackendError),

    #[error("Invalid authorization URL: {0}")]
    InvalidAuthUrl(#[from] url::ParseError),

    #[error("OAuth state mismatch")]
    StateMismatch,
}

pub type SessionResult<T> = Result<T, SessionError>;

/// Errors from event store operations.
#[derive(Error, Debug)]
pub enum EventError {
    #[error("An event with this title already exists on {0}")]
    Duplicate(NaiveDate),

    #[error("Sign in to change events from your Google calendar")]
    RequiresAuth,

    #[error("Could not save the event to your Google calendar: {0}")]
    RemoteWriteFailed(#[source] BackendError),

    #[error("Could not load Google calendar events: {0}")]
    FetchFailed(#[source] BackendError),

    #[error("Event not found: {0}")]
    NotFound(String),

    #[error("Google session expired, please sign in again: {0}")]
    SessionExpired(#[source] SessionError),
}

pub type EventResult<T> = Result<T, EventError>;

/// Errors loading the application configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Could not determine {0} directory")]
    NoDirectory(&'static str),

    #[error("Configuration error: {0}")]
    Load(#[from] config::ConfigError),

    #[error("Could not write config file: {0}")]
    Io(#[from] std::io::Error),
}

pub type ConfigResult<T> = Result<T, ConfigError>;
