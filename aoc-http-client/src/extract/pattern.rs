//! Regex-based description extraction
//!
//! Approximate: nested articles or unusual attribute spelling will not match.

use super::{BLOCK_TAGS, DescriptionExtractor, SKIPPED_TAGS, normalize_text};
use regex::{Captures, Regex};

const ARTICLE_OPEN: &str = r#"<article class="day-desc">"#;
const ARTICLE_CLOSE: &str = "</article>";

/// Extractor that works on the raw text of the page
#[derive(Clone, Debug)]
pub struct PatternExtractor {
    article: Regex,
    skipped: Regex,
    block: Regex,
    tag: Regex,
    entity: Regex,
}

impl PatternExtractor {
    pub fn new() -> Self {
        let skipped = SKIPPED_TAGS
            .iter()
            .map(|tag| format!(r"<{tag}\b.*?</{tag}\s*>"))
            .collect::<Vec<_>>()
            .join("|");
        let block = format!(r"</?(?:{})\b[^>]*>", BLOCK_TAGS.join("|"));

        Self {
            article: Regex::new(&format!(
                "(?s){}(.*?){}",
                regex::escape(ARTICLE_OPEN),
                regex::escape(ARTICLE_CLOSE)
            ))
            .unwrap(),
            skipped: Regex::new(&format!("(?is){skipped}")).unwrap(),
            block: Regex::new(&format!("(?i){block}")).unwrap(),
            tag: Regex::new(r"<[^>]*>").unwrap(),
            entity: Regex::new(r"&(?:#([0-9]{1,7})|#[xX]([0-9a-fA-F]{1,6})|(lt|gt|amp|quot|apos|nbsp));")
                .unwrap(),
        }
    }
}

impl Default for PatternExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl DescriptionExtractor for PatternExtractor {
    fn name(&self) -> &'static str {
        "pattern"
    }

    fn is_structural(&self) -> bool {
        false
    }

    fn locate_fragments(&self, html: &str) -> Vec<String> {
        self.article
            .captures_iter(html)
            .filter_map(|captures| captures.get(1))
            .map(|inner| format!("{ARTICLE_OPEN}{}{ARTICLE_CLOSE}", inner.as_str()))
            .collect()
    }

    fn flatten_to_text(&self, markup: &str) -> String {
        let text = self.skipped.replace_all(markup, "");
        let text = self.block.replace_all(&text, "\n");
        let text = self.tag.replace_all(&text, "");
        let text = self.entity.replace_all(&text, decode_entity);
        normalize_text(&text)
    }
}

/// Decode one character reference; unknown code points are left as written
fn decode_entity(caps: &Captures<'_>) -> String {
    let decoded = if let Some(dec) = caps.get(1) {
        dec.as_str().parse().ok().and_then(char::from_u32)
    } else if let Some(hex) = caps.get(2) {
        u32::from_str_radix(hex.as_str(), 16).ok().and_then(char::from_u32)
    } else {
        match caps.get(3).map(|name| name.as_str()) {
            Some("lt") => Some('<'),
            Some("gt") => Some('>'),
            Some("amp") => Some('&'),
            Some("quot") => Some('"'),
            Some("apos") => Some('\''),
            Some("nbsp") => Some('\u{a0}'),
            _ => None,
        }
    };

    match decoded {
        Some(c) => c.to_string(),
        None => caps[0].to_string(),
    }
}
