//! CLI argument parsing using clap

use clap::{ArgAction, Parser};
use std::path::PathBuf;

/// Advent of Code client
#[derive(Parser, Debug)]
#[command(
    name = "aoc",
    about = "Download Advent of Code puzzles and submit answers",
    version,
    allow_negative_numbers = true
)]
pub struct Args {
    /// Year (default: 2025)
    #[arg(long, default_value_t = 2025)]
    pub year: u16,

    /// Day number (1-25)
    #[arg(long, required_unless_present = "save_session")]
    pub day: Option<i64>,

    /// Download puzzle input
    #[arg(long)]
    pub download: bool,

    /// Download puzzle description
    #[arg(long)]
    pub description: bool,

    /// Format for description: html or text
    #[arg(long, default_value = "html")]
    pub format: String,

    /// Output file for the download
    #[arg(long)]
    pub output: Option<PathBuf>,

    /// Submit an answer for part 1 or 2
    #[arg(long, value_parser = clap::value_parser!(u8).range(1..=2))]
    pub submit: Option<u8>,

    /// Answer to submit
    #[arg(long)]
    pub answer: Option<String>,

    /// Save the session cookie to the home directory and exit
    #[arg(long, value_name = "COOKIE")]
    pub save_session: Option<String>,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,

    /// Site to talk to
    #[arg(long, hide = true, default_value = "https://adventofcode.com")]
    pub base_url: String,
}
