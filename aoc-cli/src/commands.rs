//! Handlers for the individual CLI modes

use crate::config::{DescriptionFormat, PuzzleRef};
use crate::error::CliError;
use crate::session::SessionStore;
use aoc_http_client::{AocClient, DescriptionExtractor, SubmissionOutcome, extract_markup, extract_text};
use std::fs;
use std::path::Path;

/// Persist the session cookie and report where it went
pub fn save_session(store: &SessionStore, session: &str) -> Result<(), CliError> {
    let path = store.persist(session)?;
    println!("Session cookie saved to {}", path.display());
    println!("Session cookie saved!");
    Ok(())
}

/// Download the puzzle input into `output`
pub fn download_input(client: &AocClient, puzzle: PuzzleRef, output: &Path) -> Result<(), CliError> {
    let input = client.get_input(puzzle.year, puzzle.day)?;
    fs::write(output, input)?;
    println!("Input saved to {}", output.display());
    Ok(())
}

/// Download the puzzle description into `output`
pub fn download_description(
    client: &AocClient,
    extractor: &dyn DescriptionExtractor,
    puzzle: PuzzleRef,
    format: DescriptionFormat,
    output: &Path,
) -> Result<(), CliError> {
    if format == DescriptionFormat::Html && !extractor.is_structural() {
        eprintln!("Warning: No HTML parser available. HTML extraction may be less accurate.");
    }

    let page = client.get_description_page(puzzle.year, puzzle.day)?;
    let extracted = match format {
        DescriptionFormat::Html => extract_markup(extractor, &page),
        DescriptionFormat::Text => extract_text(extractor, &page),
    };

    if extracted.fell_back {
        match format {
            DescriptionFormat::Html => eprintln!("Warning: Could not extract description from HTML"),
            DescriptionFormat::Text => eprintln!("Warning: Could not extract description text"),
        }
    }

    fs::write(output, &extracted.content)?;
    println!("Description saved to {}", output.display());
    Ok(())
}

/// Submit an answer and print the verdict
pub fn submit(
    client: &AocClient,
    puzzle: PuzzleRef,
    part: u8,
    answer: &str,
) -> Result<SubmissionOutcome, CliError> {
    let outcome = client.submit_answer(puzzle.year, puzzle.day, part, answer)?;
    tracing::debug!(?outcome, "submission classified");
    if let SubmissionOutcome::RateLimited { wait: Some(wait) } = &outcome {
        tracing::info!(wait = ?wait.as_duration(), "submission rate limited");
    }
    for line in outcome.messages() {
        println!("{}", line);
    }
    Ok(outcome)
}

/// Report the configured year and whether a session cookie is attached
pub fn check(client: &AocClient, puzzle: PuzzleRef) {
    println!("Connected to Advent of Code {}", puzzle.year);
    println!("Session cookie is valid: {}", client.has_session());
}

#[cfg(test)]
mod tests {
    use super::*;
    use aoc_http_client::{Direction, PatternExtractor};
    use tempfile::TempDir;

    const PAGE: &str = r#"<html><body><main>
<article class="day-desc"><h2>--- Day 9: Mirage ---</h2><p>Oasis.</p></article>
</main></body></html>"#;

    fn client_for(server: &mockito::Server) -> AocClient {
        AocClient::builder()
            .base_url(server.url())
            .unwrap()
            .session("abc")
            .build()
            .unwrap()
    }

    #[test]
    fn test_download_input_writes_trimmed_file() {
        let mut server = mockito::Server::new();
        let _mock = server
            .mock("GET", "/2023/day/5/input")
            .with_status(200)
            .with_body("42\n")
            .create();
        let temp = TempDir::new().unwrap();
        let output = temp.path().join("5.txt");

        download_input(&client_for(&server), PuzzleRef { year: 2023, day: 5 }, &output).unwrap();
        assert_eq!(fs::read_to_string(&output).unwrap(), "42");
    }

    #[test]
    fn test_download_input_leaves_no_file_on_error() {
        let mut server = mockito::Server::new();
        let _mock = server
            .mock("GET", "/2023/day/5/input")
            .with_status(404)
            .create();
        let temp = TempDir::new().unwrap();
        let output = temp.path().join("5.txt");

        let err = download_input(&client_for(&server), PuzzleRef { year: 2023, day: 5 }, &output)
            .unwrap_err();
        assert!(matches!(
            err,
            CliError::Http(aoc_http_client::AocError::NotAvailable { .. })
        ));
        assert!(!output.exists());
    }

    #[test]
    fn test_download_description_both_formats() {
        let mut server = mockito::Server::new();
        let _mock = server
            .mock("GET", "/2023/day/9")
            .with_status(200)
            .with_body(PAGE)
            .expect(2)
            .create();
        let client = client_for(&server);
        let extractor = PatternExtractor::new();
        let temp = TempDir::new().unwrap();
        let puzzle = PuzzleRef { year: 2023, day: 9 };

        let html = temp.path().join("9_description.html");
        download_description(&client, &extractor, puzzle, DescriptionFormat::Html, &html).unwrap();
        assert_eq!(
            fs::read_to_string(&html).unwrap(),
            r#"<article class="day-desc"><h2>--- Day 9: Mirage ---</h2><p>Oasis.</p></article>"#
        );

        let text = temp.path().join("9_description.md");
        download_description(&client, &extractor, puzzle, DescriptionFormat::Text, &text).unwrap();
        assert_eq!(
            fs::read_to_string(&text).unwrap(),
            "--- Day 9: Mirage ---\n\nOasis."
        );
    }

    #[test]
    fn test_submit_returns_outcome() {
        let mut server = mockito::Server::new();
        let _mock = server
            .mock("POST", "/2023/day/1/answer")
            .with_status(200)
            .with_body("That's not the right answer; your answer is too low.")
            .create();

        let outcome = submit(&client_for(&server), PuzzleRef { year: 2023, day: 1 }, 1, "7").unwrap();
        assert_eq!(outcome, SubmissionOutcome::Incorrect(Direction::TooLow));
    }

    #[test]
    fn test_save_session_writes_home_file() {
        let temp = TempDir::new().unwrap();
        let home_file = temp.path().join(".aoc_session");
        let store = SessionStore::new(temp.path().join(".session_cookie"), Some(home_file.clone()));

        save_session(&store, "cookie").unwrap();
        assert_eq!(fs::read_to_string(home_file).unwrap(), "cookie");
    }

    #[test]
    fn test_save_session_blank_keeps_stored_cookie() {
        let temp = TempDir::new().unwrap();
        let home_file = temp.path().join(".aoc_session");
        fs::write(&home_file, "valid-cookie").unwrap();
        let store = SessionStore::new(temp.path().join(".session_cookie"), Some(home_file.clone()));

        let err = save_session(&store, "").unwrap_err();
        assert!(matches!(err, CliError::EmptySession));
        assert_eq!(fs::read_to_string(&home_file).unwrap(), "valid-cookie");
        assert_eq!(
            store.resolve_with(None).unwrap().map(|value| value.to_string()),
            Some("valid-cookie".to_string())
        );
    }

    #[test]
    fn test_submit_rate_limited_keeps_wait() {
        let mut server = mockito::Server::new();
        let _mock = server
            .mock("POST", "/2023/day/1/answer")
            .with_status(200)
            .with_body("You gave an answer too recently. Please wait 30 seconds before trying again.")
            .create();

        let outcome = submit(&client_for(&server), PuzzleRef { year: 2023, day: 1 }, 1, "7").unwrap();
        let SubmissionOutcome::RateLimited { wait: Some(wait) } = outcome else {
            panic!("expected a rate limit with a wait, got {outcome:?}");
        };
        assert_eq!(wait.as_duration(), std::time::Duration::from_secs(30));
    }
}
