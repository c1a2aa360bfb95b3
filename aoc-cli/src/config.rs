//! Configuration resolution from CLI args

use crate::cli::Args;
use crate::error::CliError;
use std::path::PathBuf;
use std::str::FromStr;
use zeroize::Zeroizing;

/// A single day's puzzle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PuzzleRef {
    pub year: u16,
    pub day: u8,
}

impl PuzzleRef {
    /// Validate `day` against 1..=25
    pub fn new(year: u16, day: i64) -> Result<Self, CliError> {
        match u8::try_from(day) {
            Ok(day @ 1..=25) => Ok(Self { year, day }),
            _ => Err(CliError::InvalidDay),
        }
    }
}

/// Output format for puzzle descriptions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DescriptionFormat {
    /// The `article` markup as served
    Html,
    /// Flattened text
    Text,
}

impl DescriptionFormat {
    /// Extension of the default output file
    pub fn extension(&self) -> &'static str {
        match self {
            DescriptionFormat::Html => "html",
            DescriptionFormat::Text => "md",
        }
    }
}

impl FromStr for DescriptionFormat {
    type Err = CliError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "html" => Ok(DescriptionFormat::Html),
            "text" => Ok(DescriptionFormat::Text),
            other => Err(CliError::UnknownFormat(other.to_string())),
        }
    }
}

/// What a single invocation does
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mode {
    /// Store the session cookie in the home directory
    SaveSession { session: Zeroizing<String> },
    /// Fetch puzzle input into a file
    DownloadInput { puzzle: PuzzleRef, output: PathBuf },
    /// Fetch the puzzle description into a file
    DownloadDescription {
        puzzle: PuzzleRef,
        format: DescriptionFormat,
        output: PathBuf,
    },
    /// Submit an answer for one part
    Submit {
        puzzle: PuzzleRef,
        part: u8,
        answer: String,
    },
    /// Report the year and whether a session is present
    Check { puzzle: PuzzleRef },
}

impl Mode {
    /// Short name for diagnostics, never includes the cookie
    pub fn name(&self) -> &'static str {
        match self {
            Mode::SaveSession { .. } => "save-session",
            Mode::DownloadInput { .. } => "download",
            Mode::DownloadDescription { .. } => "description",
            Mode::Submit { .. } => "submit",
            Mode::Check { .. } => "check",
        }
    }
}

/// Resolved runtime configuration
#[derive(Debug)]
pub struct Config {
    pub mode: Mode,
    pub base_url: String,
}

impl Config {
    /// Build config from CLI args
    ///
    /// Save-session wins over download, which wins over description, which
    /// wins over submit. Nothing touches the network or the session here.
    pub fn from_args(args: Args) -> Result<Self, CliError> {
        let base_url = args.base_url;

        if let Some(session) = args.save_session {
            return Ok(Config {
                mode: Mode::SaveSession {
                    session: Zeroizing::new(session),
                },
                base_url,
            });
        }

        let day = args.day.ok_or(CliError::InvalidDay)?;
        let puzzle = PuzzleRef::new(args.year, day)?;

        let mode = if args.download {
            Mode::DownloadInput {
                puzzle,
                output: args.output.unwrap_or_else(|| input_path(puzzle.day)),
            }
        } else if args.description {
            let format = args.format.parse::<DescriptionFormat>()?;
            Mode::DownloadDescription {
                puzzle,
                format,
                output: args
                    .output
                    .unwrap_or_else(|| description_path(puzzle.day, format)),
            }
        } else if let Some(part) = args.submit {
            let answer = args
                .answer
                .filter(|answer| !answer.is_empty())
                .ok_or(CliError::MissingAnswer)?;
            Mode::Submit {
                puzzle,
                part,
                answer,
            }
        } else {
            Mode::Check { puzzle }
        };

        Ok(Config { mode, base_url })
    }
}

/// Default input file: `{day}.txt`
pub fn input_path(day: u8) -> PathBuf {
    PathBuf::from(format!("{}.txt", day))
}

/// Default description file: `{day}_description.{html|md}`
pub fn description_path(day: u8, format: DescriptionFormat) -> PathBuf {
    PathBuf::from(format!("{}_description.{}", day, format.extension()))
}
