//! AOC HTTP client implementation

use crate::error::{AocError, RequestKind};
use crate::parser::{ResponseParser, SubmissionOutcome};
use reqwest::StatusCode;
use reqwest::blocking::Response;
use reqwest::header::{COOKIE, HeaderMap, HeaderValue};
use zeroize::Zeroize;

/// The main AOC HTTP client
///
/// The session cookie is attached to every request the client sends.
///
/// # Example
///
/// ```no_run
/// use aoc_http_client::AocClient;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let client = AocClient::new("your_session_cookie")?;
///
/// let input = client.get_input(2024, 1)?;
/// println!("Input: {}", input);
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug)]
pub struct AocClient {
    client: reqwest::blocking::Client,
    base_url: reqwest::Url,
    has_session: bool,
    parser: ResponseParser,
}

impl AocClient {
    /// Create a client for adventofcode.com carrying the given session cookie
    ///
    /// # Errors
    ///
    /// Returns `AocError::ClientInit` if the HTTP client cannot be initialized
    /// or the session contains bytes not allowed in a header.
    pub fn new(session: &str) -> Result<Self, AocError> {
        Self::builder().session(session).build()
    }

    /// Create a builder for configuring the AOC client
    ///
    /// # Example
    ///
    /// ```no_run
    /// use aoc_http_client::AocClient;
    ///
    /// # fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// let client = AocClient::builder()
    ///     .base_url("http://localhost:1234")?
    ///     .session("abc")
    ///     .build()?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn builder() -> AocClientBuilder {
        AocClientBuilder::new()
    }

    /// Whether a session cookie is attached to requests
    pub fn has_session(&self) -> bool {
        self.has_session
    }

    /// Base URL requests are sent to
    pub fn base_url(&self) -> &reqwest::Url {
        &self.base_url
    }

    /// Create a secure cookie header value from a session string
    ///
    /// This function creates a HeaderValue with the sensitive flag set to true
    /// and zeroizes the temporary string after use.
    fn create_cookie_header(session: &str) -> Result<HeaderValue, AocError> {
        let mut cookie_string = format!("session={}", session);
        let header_value = HeaderValue::from_bytes(cookie_string.as_bytes())
            .map_err(|_| AocError::ClientInit("Invalid session cookie format".to_string()));
        cookie_string.zeroize();

        let mut sensitive_header = header_value?;
        sensitive_header.set_sensitive(true);
        Ok(sensitive_header)
    }

    /// Build `{base}/{year}/day/{day}[/{tail}]`
    fn puzzle_url(&self, year: u16, day: u8, tail: Option<&str>) -> Result<reqwest::Url, AocError> {
        let year = year.to_string();
        let day = day.to_string();

        let mut url = self.base_url.clone();
        {
            let mut segments = url
                .path_segments_mut()
                .map_err(|_| AocError::ClientInit("Cannot modify base URL path".to_string()))?;
            segments.clear().extend([year.as_str(), "day", day.as_str()]);
            if let Some(tail) = tail {
                segments.push(tail);
            }
        }
        Ok(url)
    }

    /// Map a response status onto the error taxonomy
    ///
    /// 404 and 400 get dedicated errors for page fetches; submissions treat every
    /// non-200 status alike.
    fn check_status(
        response: Response,
        request: RequestKind,
        year: u16,
        day: u8,
    ) -> Result<Response, AocError> {
        let status = response.status();
        tracing::debug!(%status, %request, "response received");

        let page = request != RequestKind::Answer;
        if status == StatusCode::OK {
            Ok(response)
        } else if page && status == StatusCode::NOT_FOUND {
            Err(AocError::NotAvailable { year, day })
        } else if page && status == StatusCode::BAD_REQUEST {
            Err(AocError::BadSession)
        } else {
            Err(AocError::InvalidStatus { request, status })
        }
    }

    /// Fetch puzzle input for a specific year and day
    ///
    /// Trailing whitespace is trimmed from the returned input.
    ///
    /// # Errors
    ///
    /// * `AocError::NotAvailable` - HTTP 404, the puzzle is not unlocked yet
    /// * `AocError::BadSession` - HTTP 400
    /// * `AocError::InvalidStatus` - any other non-200 status
    /// * `AocError::Request` - Network error
    pub fn get_input(&self, year: u16, day: u8) -> Result<String, AocError> {
        let url = self.puzzle_url(year, day, Some("input"))?;
        tracing::info!(%url, "fetching puzzle input");

        let response = self.client.get(url).send()?;
        let response = Self::check_status(response, RequestKind::Input, year, day)?;
        let text = response.text().map_err(|_| AocError::Encoding)?;

        Ok(text.trim_end().to_string())
    }

    /// Fetch the puzzle page HTML for a specific year and day
    ///
    /// Status handling matches [`AocClient::get_input`].
    pub fn get_description_page(&self, year: u16, day: u8) -> Result<String, AocError> {
        let url = self.puzzle_url(year, day, None)?;
        tracing::info!(%url, "fetching puzzle page");

        let response = self.client.get(url).send()?;
        let response = Self::check_status(response, RequestKind::Description, year, day)?;
        response.text().map_err(|_| AocError::Encoding)
    }

    /// Post an answer and return the raw response body
    ///
    /// # Errors
    ///
    /// * `AocError::InvalidStatus` - any non-200 status
    /// * `AocError::Request` - Network error
    pub fn post_answer(
        &self,
        year: u16,
        day: u8,
        part: u8,
        answer: &str,
    ) -> Result<String, AocError> {
        let url = self.puzzle_url(year, day, Some("answer"))?;
        tracing::info!(%url, part, "submitting answer");

        let form = [("level", part.to_string()), ("answer", answer.to_string())];
        let response = self.client.post(url).form(&form).send()?;
        let response = Self::check_status(response, RequestKind::Answer, year, day)?;
        response.text().map_err(|_| AocError::Encoding)
    }

    /// Submit an answer and classify the site's verdict
    ///
    /// # Example
    ///
    /// ```no_run
    /// use aoc_http_client::{AocClient, SubmissionOutcome};
    ///
    /// # fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// let client = AocClient::new("your_session_cookie")?;
    ///
    /// match client.submit_answer(2024, 1, 1, "42")? {
    ///     SubmissionOutcome::Correct => println!("Correct!"),
    ///     other => println!("{}", other),
    /// }
    /// # Ok(())
    /// # }
    /// ```
    pub fn submit_answer(
        &self,
        year: u16,
        day: u8,
        part: u8,
        answer: &str,
    ) -> Result<SubmissionOutcome, AocError> {
        let body = self.post_answer(year, day, part, answer)?;
        Ok(self.parser.parse_submission_response(&body))
    }
}

/// Builder for configuring an AOC HTTP client
///
/// # Example
///
/// ```no_run
/// use aoc_http_client::AocClient;
/// use std::time::Duration;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let client = AocClient::builder()
///     .base_url("http://localhost:1234")?
///     .session("abc")
///     .client_builder(
///         reqwest::blocking::Client::builder()
///             .timeout(Duration::from_secs(10))
///     )
///     .build()?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct AocClientBuilder {
    base_url: Option<reqwest::Url>,
    client_builder: Option<reqwest::blocking::ClientBuilder>,
    cookie: Option<Result<HeaderValue, AocError>>,
}

impl AocClientBuilder {
    /// Create a new builder with default settings
    pub fn new() -> Self {
        Self {
            base_url: None,
            client_builder: None,
            cookie: None,
        }
    }

    /// Set a custom base URL for the client
    ///
    /// # Errors
    ///
    /// Returns an error if the URL cannot be parsed.
    pub fn base_url(mut self, url: impl reqwest::IntoUrl) -> Result<Self, AocError> {
        self.base_url = Some(url.into_url()?);
        Ok(self)
    }

    /// Attach the session cookie sent with every request
    ///
    /// An invalid value surfaces as `AocError::ClientInit` from [`build`](Self::build).
    pub fn session(mut self, session: &str) -> Self {
        self.cookie = Some(AocClient::create_cookie_header(session));
        self
    }

    /// Set a custom HTTP client builder
    ///
    /// The redirect policy is always overridden to `Policy::none()` so that an
    /// unexpected redirect surfaces as a status error.
    pub fn client_builder(mut self, builder: reqwest::blocking::ClientBuilder) -> Self {
        self.client_builder = Some(builder);
        self
    }

    /// Build the AOC client with the configured settings
    ///
    /// # Errors
    ///
    /// Returns `AocError::ClientInit` if the HTTP client cannot be initialized or
    /// the session value is not a valid header.
    pub fn build(self) -> Result<AocClient, AocError> {
        let base_url = match self.base_url {
            Some(url) => url,
            None => reqwest::Url::parse("https://adventofcode.com")
                .map_err(|e| AocError::ClientInit(e.to_string()))?,
        };

        let mut headers = HeaderMap::new();
        let has_session = match self.cookie {
            Some(cookie) => {
                headers.insert(COOKIE, cookie?);
                true
            }
            None => false,
        };

        let builder = self
            .client_builder
            .unwrap_or_else(|| reqwest::blocking::Client::builder().use_rustls_tls());

        let client = builder
            .redirect(reqwest::redirect::Policy::none())
            .default_headers(headers)
            .build()
            .map_err(|e| AocError::ClientInit(e.to_string()))?;

        Ok(AocClient {
            client,
            base_url,
            has_session,
            parser: ResponseParser::new(),
        })
    }
}

impl Default for AocClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::Direction;
    use proptest::prelude::*;

    fn client_for(server: &mockito::Server) -> AocClient {
        AocClient::builder()
            .base_url(server.url())
            .unwrap()
            .session("abc")
            .build()
            .unwrap()
    }

    #[test]
    fn test_default_base_url() {
        let client = AocClient::new("abc").unwrap();
        assert_eq!(client.base_url().as_str(), "https://adventofcode.com/");
        assert!(client.has_session());
    }

    #[test]
    fn test_builder_without_session() {
        let client = AocClient::builder().build().unwrap();
        assert!(!client.has_session());
    }

    #[test]
    fn test_invalid_base_url() {
        let result = AocClient::builder().base_url("not a valid url");
        assert!(result.is_err());
    }

    #[test]
    fn test_invalid_session_value() {
        let result = AocClient::builder().session("bad\nvalue").build();
        assert!(matches!(result, Err(AocError::ClientInit(_))));
    }

    #[test]
    fn test_get_input_sends_cookie_and_trims() {
        let mut server = mockito::Server::new();
        let mock = server
            .mock("GET", "/2023/day/5/input")
            .match_header("cookie", "session=abc")
            .with_status(200)
            .with_body("42\n\n  ")
            .expect(1)
            .create();

        let input = client_for(&server).get_input(2023, 5).unwrap();
        assert_eq!(input, "42");
        mock.assert();
    }

    #[test]
    fn test_get_input_keeps_leading_whitespace() {
        let mut server = mockito::Server::new();
        let _mock = server
            .mock("GET", "/2022/day/5/input")
            .with_status(200)
            .with_body("    [D]    \n[N] [C]    \n")
            .create();

        let input = client_for(&server).get_input(2022, 5).unwrap();
        assert_eq!(input, "    [D]    \n[N] [C]");
    }

    #[test]
    fn test_get_input_not_available() {
        let mut server = mockito::Server::new();
        let _mock = server
            .mock("GET", "/2030/day/1/input")
            .with_status(404)
            .create();

        let err = client_for(&server).get_input(2030, 1).unwrap_err();
        assert!(matches!(err, AocError::NotAvailable { year: 2030, day: 1 }));
    }

    #[test]
    fn test_get_input_bad_session() {
        let mut server = mockito::Server::new();
        let _mock = server
            .mock("GET", "/2023/day/1/input")
            .with_status(400)
            .create();

        let err = client_for(&server).get_input(2023, 1).unwrap_err();
        assert!(matches!(err, AocError::BadSession));
    }

    #[test]
    fn test_redirect_is_not_followed() {
        let mut server = mockito::Server::new();
        let home = server.mock("GET", "/").with_status(200).expect(0).create();
        let _page = server
            .mock("GET", "/2023/day/3")
            .with_status(302)
            .with_header("location", "/")
            .create();

        let err = client_for(&server).get_description_page(2023, 3).unwrap_err();
        match err {
            AocError::InvalidStatus { request, status } => {
                assert_eq!(request, RequestKind::Description);
                assert_eq!(status.as_u16(), 302);
            }
            other => panic!("Expected InvalidStatus, got {:?}", other),
        }
        home.assert();
    }

    #[test]
    fn test_get_description_page_returns_raw_html() {
        let mut server = mockito::Server::new();
        let body = "<html><body><article class=\"day-desc\"><p>Hi</p></article></body></html>\n";
        let mock = server
            .mock("GET", "/2023/day/12")
            .match_header("cookie", "session=abc")
            .with_status(200)
            .with_body(body)
            .expect(1)
            .create();

        let html = client_for(&server).get_description_page(2023, 12).unwrap();
        assert_eq!(html, body);
        mock.assert();
    }

    #[test]
    fn test_submit_answer_classifies_body() {
        let mut server = mockito::Server::new();
        let _mock = server
            .mock("POST", "/2023/day/2/answer")
            .with_status(200)
            .with_body("<main><article><p>That's not the right answer; your answer is too high.</p></article></main>")
            .create();

        let outcome = client_for(&server).submit_answer(2023, 2, 1, "100").unwrap();
        assert_eq!(outcome, SubmissionOutcome::Incorrect(Direction::TooHigh));
    }

    #[test]
    fn test_submit_answer_not_found_is_generic() {
        let mut server = mockito::Server::new();
        let _mock = server
            .mock("POST", "/2023/day/2/answer")
            .with_status(404)
            .create();

        let err = client_for(&server).submit_answer(2023, 2, 2, "1").unwrap_err();
        assert_eq!(err.to_string(), "Failed to submit answer (status 404)");
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(10))]

        #[test]
        fn prop_submission_request_construction(
            year in 2015u16..2030u16,
            day in 1u8..=25u8,
            part in 1u8..=2u8,
            answer in "[0-9]{1,10}",
        ) {
            let mut server = mockito::Server::new();
            let expected_path = format!("/{}/day/{}/answer", year, day);

            let mock = server.mock("POST", expected_path.as_str())
                .match_header("cookie", "session=abc")
                .match_body(
                    mockito::Matcher::AllOf(vec![
                        mockito::Matcher::UrlEncoded("level".into(), part.to_string()),
                        mockito::Matcher::UrlEncoded("answer".into(), answer.clone()),
                    ])
                )
                .with_status(200)
                .with_body(r#"<html><body><main>That's the right answer!</main></body></html>"#)
                .expect(1)
                .create();

            let result = client_for(&server).submit_answer(year, day, part, &answer);

            prop_assert_eq!(result.unwrap(), SubmissionOutcome::Correct);
            mock.assert();
        }

        #[test]
        fn prop_non_success_status_error_handling(
            year in 2015u16..2030u16,
            day in 1u8..=25u8,
            status_code in prop::sample::select(vec![401u16, 403, 429, 500, 502, 503, 504]),
        ) {
            let mut server = mockito::Server::new();
            let expected_path = format!("/{}/day/{}/input", year, day);

            let mock = server.mock("GET", expected_path.as_str())
                .with_status(status_code as usize)
                .with_body("Error response")
                .expect(1)
                .create();

            let result = client_for(&server).get_input(year, day);

            match result.unwrap_err() {
                AocError::InvalidStatus { request, status } => {
                    prop_assert_eq!(request, RequestKind::Input);
                    prop_assert_eq!(status.as_u16(), status_code);
                }
                other => {
                    prop_assert!(false, "Expected AocError::InvalidStatus, got {:?}", other);
                }
            }
            mock.assert();
        }
    }
}
