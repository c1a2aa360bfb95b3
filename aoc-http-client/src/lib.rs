//! AOC HTTP Client Library
//!
//! This library provides utilities for interacting with the Advent of Code website:
//! fetching puzzle input and puzzle pages, submitting answers, and turning the
//! site's HTML responses into typed results.
//!
//! # Features
//!
//! - Session cookie attached to every request, marked sensitive
//! - Puzzle input and puzzle page fetching for any year and day
//! - Answer submission classified by an ordered rule table
//! - Description extraction through [`DescriptionExtractor`], backed by
//!   `scraper` when the `html-parser` feature is enabled and by regex otherwise
//! - Secure TLS using rustls (no OpenSSL dependencies)
//! - Blocking synchronous API
//!
//! # Example
//!
//! ```no_run
//! use aoc_http_client::{AocClient, default_extractor, extract_text};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let client = AocClient::new("your_session_cookie_here")?;
//!
//! let input = client.get_input(2024, 1)?;
//!
//! let page = client.get_description_page(2024, 1)?;
//! let description = extract_text(default_extractor().as_ref(), &page);
//! println!("{}", description.content);
//!
//! let outcome = client.submit_answer(2024, 1, 1, "42")?;
//! println!("{}", outcome);
//! # Ok(())
//! # }
//! ```

mod client;
mod error;
mod extract;
mod parser;

pub use client::{AocClient, AocClientBuilder};
pub use error::{AocError, RequestKind};
#[cfg(feature = "html-parser")]
pub use extract::StructuralExtractor;
pub use extract::{
    DescriptionExtractor, Extracted, FRAGMENT_SEPARATOR, PatternExtractor, default_extractor,
    extract_markup, extract_text,
};
pub use parser::{Direction, SubmissionOutcome, WaitTime, WaitUnit, classify_submission};
