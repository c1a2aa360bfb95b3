//! Submission response classification
//!
//! The site has no structured API for answers, so the verdict is read off the
//! response body with an ordered table of substring rules. The first rule whose
//! predicate matches decides the outcome.

use regex::Regex;
use std::cell::OnceCell;
use std::fmt;
use std::time::Duration;

/// Which side of the correct answer a wrong guess landed on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    TooHigh,
    TooLow,
    /// The site did not say
    Unknown,
}

/// Unit of a rate-limit wait as written by the site
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WaitUnit {
    Second,
    Minute,
}

impl WaitUnit {
    fn from_word(word: &str) -> Option<Self> {
        match word {
            "second" => Some(WaitUnit::Second),
            "minute" => Some(WaitUnit::Minute),
            _ => None,
        }
    }

    /// Singular word for the unit
    pub fn as_str(&self) -> &'static str {
        match self {
            WaitUnit::Second => "second",
            WaitUnit::Minute => "minute",
        }
    }
}

/// Wait time extracted from a rate-limit response
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WaitTime {
    pub amount: u64,
    pub unit: WaitUnit,
}

impl WaitTime {
    /// Convert to a [`Duration`]
    pub fn as_duration(&self) -> Duration {
        match self.unit {
            WaitUnit::Second => Duration::from_secs(self.amount),
            WaitUnit::Minute => Duration::from_secs(self.amount.saturating_mul(60)),
        }
    }
}

/// Result of an answer submission
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionOutcome {
    /// Answer was correct
    Correct,
    /// Answer was wrong, with the hint the site gave
    Incorrect(Direction),
    /// The part being answered is already solved
    AlreadySolved,
    /// An answer was submitted too recently
    RateLimited {
        /// Wait time, when the body states one
        wait: Option<WaitTime>,
    },
    /// None of the known phrases were present
    Unrecognized,
}

impl SubmissionOutcome {
    /// Operator-facing lines describing the outcome, in print order
    pub fn messages(&self) -> Vec<String> {
        match self {
            SubmissionOutcome::Correct => vec!["✓ Correct answer!".to_string()],
            SubmissionOutcome::Incorrect(direction) => {
                let mut lines = vec!["✗ Wrong answer".to_string()];
                match direction {
                    Direction::TooHigh => {
                        lines.push("  (Hint: Your answer is too high)".to_string())
                    }
                    Direction::TooLow => lines.push("  (Hint: Your answer is too low)".to_string()),
                    Direction::Unknown => {}
                }
                lines
            }
            SubmissionOutcome::AlreadySolved => {
                vec!["Error: You've already completed this part".to_string()]
            }
            SubmissionOutcome::RateLimited { wait } => {
                let mut lines = vec!["Error: You need to wait before submitting again".to_string()];
                if let Some(wait) = wait {
                    lines.push(format!("  Wait {} {}s", wait.amount, wait.unit.as_str()));
                }
                lines
            }
            SubmissionOutcome::Unrecognized => {
                vec!["Unknown response. Check the website manually.".to_string()]
            }
        }
    }
}

impl fmt::Display for SubmissionOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.messages().join("\n"))
    }
}

/// One entry of the classification table
pub(crate) struct Rule {
    pub name: &'static str,
    pub matches: fn(&str) -> bool,
    pub classify: fn(&ResponseParser, &str) -> SubmissionOutcome,
}

/// Classification rules in evaluation order
///
/// Already-solved is checked before rate-limiting; a body carrying both phrases
/// is reported as already solved.
pub(crate) const RULES: &[Rule] = &[
    Rule {
        name: "correct",
        matches: is_correct,
        classify: classify_correct,
    },
    Rule {
        name: "incorrect",
        matches: is_incorrect,
        classify: classify_incorrect,
    },
    Rule {
        name: "already-solved",
        matches: is_already_solved,
        classify: classify_already_solved,
    },
    Rule {
        name: "rate-limited",
        matches: is_rate_limited,
        classify: classify_rate_limited,
    },
];

fn is_correct(body: &str) -> bool {
    body.contains("That's the right answer") || body.contains("That's correct")
}

fn is_incorrect(body: &str) -> bool {
    body.contains("That's not the right answer")
}

fn is_already_solved(body: &str) -> bool {
    body.contains("You don't seem to be solving the right level")
}

fn is_rate_limited(body: &str) -> bool {
    body.contains("You gave an answer too recently")
}

fn classify_correct(_: &ResponseParser, _: &str) -> SubmissionOutcome {
    SubmissionOutcome::Correct
}

fn classify_already_solved(_: &ResponseParser, _: &str) -> SubmissionOutcome {
    SubmissionOutcome::AlreadySolved
}

fn classify_incorrect(_: &ResponseParser, body: &str) -> SubmissionOutcome {
    let lower = body.to_lowercase();
    let direction = if lower.contains("too high") {
        Direction::TooHigh
    } else if lower.contains("too low") {
        Direction::TooLow
    } else {
        Direction::Unknown
    };
    SubmissionOutcome::Incorrect(direction)
}

fn classify_rate_limited(parser: &ResponseParser, body: &str) -> SubmissionOutcome {
    SubmissionOutcome::RateLimited {
        wait: parser.extract_wait_time(body),
    }
}

/// Parser for AOC submission responses with a cached wait-time pattern
#[derive(Clone, Debug)]
pub(crate) struct ResponseParser {
    wait_regex: OnceCell<Regex>,
}

impl ResponseParser {
    /// Create a new parser with uninitialized caches
    pub fn new() -> Self {
        Self {
            wait_regex: OnceCell::new(),
        }
    }

    /// Get or compile the wait time regex
    fn wait_regex(&self) -> &Regex {
        self.wait_regex
            .get_or_init(|| Regex::new(r"wait (\d+) (second|minute)").unwrap())
    }

    /// Extract the first "wait N second|minute" phrase from the body
    pub fn extract_wait_time(&self, body: &str) -> Option<WaitTime> {
        let captures = self.wait_regex().captures(body)?;
        let amount = captures.get(1)?.as_str().parse::<u64>().ok()?;
        let unit = WaitUnit::from_word(captures.get(2)?.as_str())?;
        Some(WaitTime { amount, unit })
    }

    /// Classify a submission response body
    pub fn parse_submission_response(&self, body: &str) -> SubmissionOutcome {
        RULES
            .iter()
            .find(|rule| (rule.matches)(body))
            .map(|rule| {
                tracing::debug!(rule = rule.name, "submission response matched");
                (rule.classify)(self, body)
            })
            .unwrap_or(SubmissionOutcome::Unrecognized)
    }
}

impl Default for ResponseParser {
    fn default() -> Self {
        Self::new()
    }
}

/// Classify a submission response body
///
/// ```
/// use aoc_http_client::{classify_submission, Direction, SubmissionOutcome};
///
/// let outcome = classify_submission("That's not the right answer; your answer is too low.");
/// assert_eq!(outcome, SubmissionOutcome::Incorrect(Direction::TooLow));
/// ```
pub fn classify_submission(body: &str) -> SubmissionOutcome {
    ResponseParser::new().parse_submission_response(body)
}
