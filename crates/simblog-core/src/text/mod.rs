//! Markup stripping and tokenization

use scraper::Html;
use std::panic;
use unicode_general_category::{get_general_category, GeneralCategory};

/// Extract plain text from HTML markup.
///
/// Text nodes are concatenated in document order; element and attribute
/// structure is discarded. Accepts full documents, fragments and empty
/// input. If the parser fails, falls back to [`strip_tags`], so this never
/// fails.
pub fn normalize(markup: &str) -> String {
    if markup.is_empty() {
        return String::new();
    }

    match panic::catch_unwind(|| extract_text(markup)) {
        Ok(text) => text,
        Err(_) => {
            tracing::debug!(len = markup.len(), "html parse failed, stripping tags");
            strip_tags(markup)
        }
    }
}

fn extract_text(markup: &str) -> String {
    let document = Html::parse_document(markup);
    let mut buf = String::with_capacity(markup.len());
    for piece in document.root_element().text() {
        buf.push_str(piece);
    }
    buf
}

/// Remove every `<...>` span and keep everything else verbatim.
pub fn strip_tags(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut in_tag = false;
    for ch in input.chars() {
        match ch {
            '<' => in_tag = true,
            '>' => in_tag = false,
            _ if !in_tag => out.push(ch),
            _ => {}
        }
    }
    out
}

/// Split text into lowercase tokens.
///
/// A token is a maximal run of letters (any `L*` general category) or
/// decimal digits (`Nd`). Marks, other numerics and everything else
/// separate tokens.
pub fn tokenize(text: &str) -> Vec<String> {
    text.split(|c: char| !is_token_char(c))
        .filter(|s| !s.is_empty())
        .map(|s| s.to_lowercase())
        .collect()
}

fn is_token_char(c: char) -> bool {
    use GeneralCategory::*;
    matches!(
        get_general_category(c),
        UppercaseLetter
            | LowercaseLetter
            | TitlecaseLetter
            | ModifierLetter
            | OtherLetter
            | DecimalNumber
    )
}
