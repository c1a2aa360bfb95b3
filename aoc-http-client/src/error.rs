//! Error types for the AOC HTTP client

use std::fmt;
use thiserror::Error;

/// The kind of request that produced an unexpected status
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestKind {
    Input,
    Description,
    Answer,
}

impl fmt::Display for RequestKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let action = match self {
            RequestKind::Input => "fetch input",
            RequestKind::Description => "fetch description",
            RequestKind::Answer => "submit answer",
        };
        f.write_str(action)
    }
}

/// Errors that can occur when using the AOC HTTP client
#[derive(Error, Debug)]
pub enum AocError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The puzzle page answered 404
    #[error("Puzzle for {year}/day/{day} not found or not available yet")]
    NotAvailable {
        /// Requested year
        year: u16,
        /// Requested day
        day: u8,
    },

    /// The site answered 400, which it does for a missing or stale session
    #[error("Bad request. Check your session cookie.")]
    BadSession,

    /// Any other non-200 status
    #[error("Failed to {request} (status {})", .status.as_u16())]
    InvalidStatus {
        /// Which request failed
        request: RequestKind,
        /// The status code that was received
        status: reqwest::StatusCode,
    },

    /// Failed to decode response as UTF-8
    #[error("Failed to decode response as UTF-8")]
    Encoding,

    /// Client initialization failed
    #[error("Client initialization failed: {0}")]
    ClientInit(String),
}
