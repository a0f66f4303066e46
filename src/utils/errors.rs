//! Error handling for RankBuddy
//!
//! This module defines the main error types used throughout the crate
//! and provides a unified error handling strategy.

use thiserror::Error;

/// Main error type for the RankBuddy core
#[derive(Error, Debug)]
pub enum RankBuddyError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Translation catalog error: {0}")]
    Catalog(String),

    #[error("Unsupported locale: {0}")]
    UnsupportedLocale(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Session not found")]
    SessionNotFound,

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Service unavailable: {0}")]
    ServiceUnavailable(String),
}

/// Result type alias for RankBuddy operations
pub type Result<T> = std::result::Result<T, RankBuddyError>;

impl RankBuddyError {
    /// Check if the error is recoverable
    pub fn is_recoverable(&self) -> bool {
        match self {
            RankBuddyError::Config(_) => false,
            RankBuddyError::Catalog(_) => false,
            RankBuddyError::UnsupportedLocale(_) => false,
            RankBuddyError::Storage(_) => true,
            RankBuddyError::Serialization(_) => false,
            RankBuddyError::Io(_) => true,
            RankBuddyError::SessionNotFound => false,
            RankBuddyError::InvalidInput(_) => false,
            RankBuddyError::ServiceUnavailable(_) => true,
        }
    }

    /// Get error severity level
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            RankBuddyError::Config(_) => ErrorSeverity::Critical,
            RankBuddyError::Catalog(_) => ErrorSeverity::Critical,
            RankBuddyError::UnsupportedLocale(_) => ErrorSeverity::Info,
            RankBuddyError::InvalidInput(_) => ErrorSeverity::Info,
            RankBuddyError::Storage(_) => ErrorSeverity::Warning,
            RankBuddyError::SessionNotFound => ErrorSeverity::Warning,
            _ => ErrorSeverity::Error,
        }
    }
}

/// Error severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    Info,
    Warning,
    Error,
    Critical,
}

impl std::fmt::Display for ErrorSeverity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorSeverity::Info => write!(f, "INFO"),
            ErrorSeverity::Warning => write!(f, "WARN"),
            ErrorSeverity::Error => write!(f, "ERROR"),
            ErrorSeverity::Critical => write!(f, "CRITICAL"),
        }
    }
}
