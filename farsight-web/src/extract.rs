//! Pure HTML extraction: no I/O, same markup in, same text out.
//!
//! Four views over a parsed page (full text, main-content guess, heading
//! outline, link list) plus a few helpers the research pipeline reuses.
//! "Nothing matched" outcomes are literal sentinel strings rather than
//! errors; callers surface them to users as-is.

use scraper::{ElementRef, Html, Selector};

const TEXT_LIMIT: usize = 10_000;
const MAX_LINKS: usize = 100;

pub const MAIN_CONTENT_FALLBACK: &str =
    "Couldn't identify main content. Try using full_text extraction instead.";
pub const NO_HEADINGS: &str = "No headings found on the page.";
pub const NO_LINKS: &str = "No links found on the page.";

/// Which view of the page to produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtractionMode {
    FullText,
    MainContent,
    Headings,
    Links,
}

impl ExtractionMode {
    /// Parse the wire name used by the tool surface.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "full_text" => Some(Self::FullText),
            "main_content" => Some(Self::MainContent),
            "headings" => Some(Self::Headings),
            "links" => Some(Self::Links),
            _ => None,
        }
    }
}

/// Message returned when a caller names an unknown extraction mode.
pub fn invalid_mode_message(raw: &str) -> String {
    format!(
        "Invalid extraction_type: {raw}. Valid options are 'full_text', 'main_content', \
         'headings', or 'links'."
    )
}

/// Produce the requested view of `markup`.
pub fn extract(markup: &str, mode: ExtractionMode) -> String {
    let document = parse_clean(markup);
    match mode {
        ExtractionMode::FullText => full_text(&document),
        ExtractionMode::MainContent => main_content(&document),
        ExtractionMode::Headings => headings(&document),
        ExtractionMode::Links => links(&document),
    }
}

// FIXME(perf): the research path parses the same markup for each helper
// below; thread one parsed document through when this API grows a borrowed
// entry point.

/// Document-order h1/h2/h3 texts, trimmed. Used for research outlines.
pub fn outline_headings(markup: &str) -> Vec<String> {
    let document = parse_clean(markup);
    let sel = Selector::parse("h1, h2, h3").unwrap();
    document
        .select(&sel)
        .map(|el| joined_text(el, " "))
        .collect()
}

/// Space-joined text of the first main-content candidate, if any.
pub fn lead_main_content(markup: &str) -> Option<String> {
    let document = parse_clean(markup);
    let first = main_candidates(&document).into_iter().next()?;
    Some(joined_text(first, " "))
}

/// Space-joined text of the whole page.
pub fn page_text(markup: &str) -> String {
    let document = parse_clean(markup);
    joined_text(document.root_element(), " ")
}

/// Parse markup and drop script/style subtrees so no view ever sees them.
fn parse_clean(markup: &str) -> Html {
    let mut document = Html::parse_document(markup);
    let noise = Selector::parse("script, style").unwrap();
    let ids: Vec<_> = document.select(&noise).map(|el| el.id()).collect();
    for id in ids {
        if let Some(mut node) = document.tree.get_mut(id) {
            node.detach();
        }
    }
    document
}

/// Trimmed, non-empty text segments of `el` joined by `sep`.
fn joined_text(el: ElementRef, sep: &str) -> String {
    el.text()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .collect::<Vec<_>>()
        .join(sep)
}

fn clip(text: String) -> String {
    if text.chars().count() > TEXT_LIMIT {
        let mut out: String = text.chars().take(TEXT_LIMIT).collect();
        out.push_str("...");
        out
    } else {
        text
    }
}

fn full_text(document: &Html) -> String {
    clip(joined_text(document.root_element(), "\n"))
}

/// Elements that look like an article body: tag ∈ {article, main, div} with a
/// class mentioning "content" or "article" (any case). Deliberately a frozen
/// hand-tuned rule, not a classifier.
fn main_candidates<'a>(document: &'a Html) -> Vec<ElementRef<'a>> {
    let sel = Selector::parse("article, main, div").unwrap();
    document
        .select(&sel)
        .filter(|el| {
            el.value().attr("class").is_some_and(|c| {
                let c = c.to_ascii_lowercase();
                c.contains("content") || c.contains("article")
            })
        })
        .collect()
}

fn main_content(document: &Html) -> String {
    let blocks: Vec<String> = main_candidates(document)
        .into_iter()
        .map(|el| joined_text(el, "\n"))
        .collect();
    if blocks.is_empty() {
        return MAIN_CONTENT_FALLBACK.to_string();
    }
    clip(blocks.join("\n\n"))
}

fn headings(document: &Html) -> String {
    let sel = Selector::parse("h1, h2, h3").unwrap();
    let lines: Vec<String> = document
        .select(&sel)
        .map(|el| {
            format!(
                "{}: {}",
                el.value().name().to_uppercase(),
                joined_text(el, " ")
            )
        })
        .collect();
    if lines.is_empty() {
        NO_HEADINGS.to_string()
    } else {
        lines.join("\n")
    }
}

fn links(document: &Html) -> String {
    let sel = Selector::parse("a[href]").unwrap();
    let lines: Vec<String> = document
        .select(&sel)
        .take(MAX_LINKS)
        .map(|el| {
            let text = joined_text(el, " ");
            let text = if text.is_empty() {
                "[No text]".to_string()
            } else {
                text
            };
            let href = el.value().attr("href").unwrap_or_default();
            format!("{text}: {href}")
        })
        .collect();
    if lines.is_empty() {
        NO_LINKS.to_string()
    } else {
        lines.join("\n")
    }
}
