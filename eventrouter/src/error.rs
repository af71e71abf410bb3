use thiserror::Error;

use crate::envelope::EventType;

/// Enumeration of errors raised while parsing the router configuration.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("the event {0} is not authorized")]
    UnauthorizedEvent(String),
    #[error("error parsing extra fields near {0:?}, expected key:value, key:value")]
    MalformedExtraFields(String),
}

/// Enumeration of errors raised while turning an envelope into an event.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum BuildError {
    #[error("no builder registered for event type {0}")]
    UnsupportedEventType(EventType),
}

/// Enumeration of errors a sink can report for a write.
#[derive(Error, Debug)]
pub enum SinkError {
    #[error("timeout")]
    Timeout,
    #[error("{0}")]
    Rejected(String),
    #[error("failed to serialize event: {0}")]
    SerializationError(#[from] serde_json::Error),
    #[error("io error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Enumeration of errors a metadata cache can report for a lookup.
#[derive(Error, Debug)]
pub enum CacheError {
    #[error("failed to fetch application metadata: {0}")]
    FetchError(String),
    #[error("failed to load application metadata: {0}")]
    LoadError(#[from] std::io::Error),
    #[error("failed to parse application metadata: {0}")]
    ParseError(#[from] serde_json::Error),
}
