//! Error types for the CLI

use thiserror::Error;

/// Main CLI error type
///
/// Every variant is terminal: `main` prints it and exits with status 1.
#[derive(Error, Debug)]
pub enum CliError {
    /// No session cookie in any of the known locations
    #[error(
        "No session cookie found!\n\n\
         To get your session cookie:\n\
         1. Log in to https://adventofcode.com in your browser\n\
         2. Open browser developer tools (F12)\n\
         3. Go to Application/Storage > Cookies\n\
         4. Copy the value of the 'session' cookie\n\
         5. Set it as an environment variable: export AOC_SESSION='your-cookie-value'\n   \
         Or save it to: {home_file}"
    )]
    MissingSession { home_file: String },

    /// Day outside 1..=25
    #[error("Day must be between 1 and 25")]
    InvalidDay,

    /// `--format` is neither html nor text
    #[error("Unknown format '{0}'. Use 'html' or 'text'")]
    UnknownFormat(String),

    /// `--submit` without `--answer`
    #[error("--answer required when submitting")]
    MissingAnswer,

    /// `--save-session` given a blank value
    #[error("Session cookie is empty, nothing saved")]
    EmptySession,

    /// No home directory to store the session cookie in
    #[error("Could not determine home directory")]
    HomeDirUnavailable,

    /// HTTP client error
    #[error("{0}")]
    Http(#[from] aoc_http_client::AocError),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
