//! Puzzle description extraction
//!
//! A puzzle page carries its text in one `<article class="day-desc">` per
//! unlocked part. Extraction goes through [`DescriptionExtractor`], which has a
//! structural implementation backed by `scraper` (feature `html-parser`) and a
//! regex implementation that is always available.

mod pattern;
#[cfg(feature = "html-parser")]
mod structural;

pub use pattern::PatternExtractor;
#[cfg(feature = "html-parser")]
pub use structural::StructuralExtractor;

/// Separator placed between consecutive description fragments
pub const FRAGMENT_SEPARATOR: &str = "\n\n";

/// Locates description fragments and flattens markup into text
pub trait DescriptionExtractor {
    /// Short name used in diagnostics
    fn name(&self) -> &'static str;

    /// Whether this implementation parses the document structurally
    fn is_structural(&self) -> bool;

    /// Every `article class="day-desc"` fragment in document order, serialized
    /// with its own wrapping tag
    fn locate_fragments(&self, html: &str) -> Vec<String>;

    /// Flatten markup into text with a line break at each block boundary
    ///
    /// Surrounding whitespace is trimmed and runs of blank lines collapse to a
    /// single blank line.
    fn flatten_to_text(&self, markup: &str) -> String;
}

/// The extractor selected for this build
pub fn default_extractor() -> Box<dyn DescriptionExtractor> {
    #[cfg(feature = "html-parser")]
    let extractor: Box<dyn DescriptionExtractor> = Box::new(StructuralExtractor::new());
    #[cfg(not(feature = "html-parser"))]
    let extractor: Box<dyn DescriptionExtractor> = Box::new(PatternExtractor::new());

    tracing::debug!(extractor = extractor.name(), "description extractor selected");
    extractor
}

/// Extracted description content
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Extracted {
    /// The description, or the fallback content
    pub content: String,
    /// Whether extraction found nothing and the fallback was used
    pub fell_back: bool,
}

/// Extract the description fragments as markup
///
/// Falls back to the whole document when no fragment is found.
pub fn extract_markup(extractor: &dyn DescriptionExtractor, html: &str) -> Extracted {
    let fragments = extractor.locate_fragments(html);
    if fragments.is_empty() {
        tracing::debug!("no description fragment found, keeping full page");
        return Extracted {
            content: html.to_string(),
            fell_back: true,
        };
    }

    Extracted {
        content: fragments.join(FRAGMENT_SEPARATOR),
        fell_back: false,
    }
}

/// Extract the description fragments as flattened text
///
/// Falls back to flattening the whole document when the fragments yield no
/// text.
pub fn extract_text(extractor: &dyn DescriptionExtractor, html: &str) -> Extracted {
    let content = extractor
        .locate_fragments(html)
        .iter()
        .map(|fragment| extractor.flatten_to_text(fragment))
        .filter(|text| !text.is_empty())
        .collect::<Vec<_>>()
        .join(FRAGMENT_SEPARATOR);

    if !content.is_empty() {
        return Extracted {
            content,
            fell_back: false,
        };
    }

    tracing::debug!("description text empty, flattening full page");
    Extracted {
        content: extractor.flatten_to_text(html),
        fell_back: true,
    }
}

/// Tags that end a line when flattening
pub(crate) const BLOCK_TAGS: &[&str] = &[
    "address",
    "article",
    "blockquote",
    "body",
    "br",
    "dd",
    "div",
    "dl",
    "dt",
    "footer",
    "h1",
    "h2",
    "h3",
    "h4",
    "h5",
    "h6",
    "header",
    "hr",
    "li",
    "main",
    "nav",
    "ol",
    "p",
    "pre",
    "section",
    "table",
    "title",
    "tr",
    "ul",
];

/// Tags whose content never contributes text
pub(crate) const SKIPPED_TAGS: &[&str] = &["script", "style"];

/// Drop trailing whitespace per line, collapse runs of blank lines to one and
/// trim the result
///
/// Leading whitespace inside the text is kept so `<pre>` diagrams stay aligned.
pub(crate) fn normalize_text(raw: &str) -> String {
    let mut out = String::new();
    let mut pending_blank = false;

    for line in raw.lines().map(str::trim_end) {
        if line.is_empty() {
            pending_blank = !out.is_empty();
            continue;
        }
        if !out.is_empty() {
            out.push('\n');
            if pending_blank {
                out.push('\n');
            }
        }
        if out.is_empty() {
            out.push_str(line.trim_start());
        } else {
            out.push_str(line);
        }
        pending_blank = false;
    }

    out
}
