//! Description extraction backed by a real HTML parser

use super::{BLOCK_TAGS, DescriptionExtractor, SKIPPED_TAGS, normalize_text};
use scraper::{ElementRef, Html, Node, Selector};

/// Extractor that parses the page with `scraper`
#[derive(Clone, Debug)]
pub struct StructuralExtractor {
    article_selector: Selector,
}

impl StructuralExtractor {
    pub fn new() -> Self {
        Self {
            article_selector: Selector::parse(r#"article[class="day-desc"]"#).unwrap(),
        }
    }
}

impl Default for StructuralExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl DescriptionExtractor for StructuralExtractor {
    fn name(&self) -> &'static str {
        "structural"
    }

    fn is_structural(&self) -> bool {
        true
    }

    fn locate_fragments(&self, html: &str) -> Vec<String> {
        let document = Html::parse_document(html);
        document
            .select(&self.article_selector)
            .map(|article| article.html())
            .collect()
    }

    fn flatten_to_text(&self, markup: &str) -> String {
        let document = Html::parse_document(markup);
        let mut raw = String::new();
        collect_text(document.root_element(), &mut raw);
        normalize_text(&raw)
    }
}

/// Append the text below `element`, breaking lines around block elements
fn collect_text(element: ElementRef<'_>, out: &mut String) {
    for child in element.children() {
        match child.value() {
            Node::Text(text) => out.push_str(&text.text),
            Node::Element(elem) => {
                let name = elem.name();
                if SKIPPED_TAGS.contains(&name) {
                    continue;
                }
                if name == "br" {
                    out.push('\n');
                    continue;
                }
                let Some(child_element) = ElementRef::wrap(child) else {
                    continue;
                };

                let block = BLOCK_TAGS.contains(&name);
                if block {
                    out.push('\n');
                }
                collect_text(child_element, out);
                if block {
                    out.push('\n');
                }
            }
            _ => {}
        }
    }
}
