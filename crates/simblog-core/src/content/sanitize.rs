//! Sanitizers applied to submitted HTML before it is stored and embedded

use scraper::{Html, Selector};

/// Turns submitted markup into text that is safe to store and index
pub trait Sanitizer {
    fn sanitize(&self, html: &str) -> String;
}

/// Keeps only the inner HTML of `<body>`, or the trimmed input when the
/// body is empty. Performs no filtering of its own.
#[derive(Debug, Clone, Copy, Default)]
pub struct BodyExtractor;

impl Sanitizer for BodyExtractor {
    fn sanitize(&self, html: &str) -> String {
        let trimmed = html.trim();
        if trimmed.is_empty() {
            return String::new();
        }

        let document = Html::parse_document(trimmed);
        let body = Selector::parse("body")
            .ok()
            .and_then(|selector| document.select(&selector).next().map(|b| b.inner_html()))
            .unwrap_or_default();

        if body.trim().is_empty() {
            trimmed.to_string()
        } else {
            body
        }
    }
}

const EXTRA_TAGS: &[&str] = &["article", "section", "figure", "figcaption", "footer", "time"];

const CLASS_ID_TAGS: &[&str] = &[
    "div", "span", "p", "article", "section", "figure", "figcaption", "h1", "h2", "h3", "h4", "ul",
    "ol", "li",
];
const CLASS_ID_ATTRS: &[&str] = &["class", "id"];

const MICRODATA_TAGS: &[&str] = &["article", "div", "span", "time"];
const MICRODATA_ATTRS: &[&str] = &["itemprop", "itemscope", "itemtype"];

const IMG_ATTRS: &[&str] = &["src", "alt", "title", "width", "height", "loading", "decoding"];

const JSON_LD_TYPE: &str = "application/ld+json";

/// Body extraction followed by an allow-list of blog markup.
///
/// Scripts, styles, event handlers and unsafe URL schemes are removed.
/// `application/ld+json` blocks that parse as JSON are re-serialized and
/// appended after the cleaned body; every other script is dropped.
pub struct AllowListSanitizer {
    policy: ammonia::Builder<'static>,
}

impl std::fmt::Debug for AllowListSanitizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AllowListSanitizer").finish_non_exhaustive()
    }
}

impl Default for AllowListSanitizer {
    fn default() -> Self {
        Self::new()
    }
}

impl AllowListSanitizer {
    pub fn new() -> Self {
        let mut policy = ammonia::Builder::default();
        policy.add_tags(EXTRA_TAGS);
        for tag in CLASS_ID_TAGS {
            policy.add_tag_attributes(*tag, CLASS_ID_ATTRS);
        }
        for tag in MICRODATA_TAGS {
            policy.add_tag_attributes(*tag, MICRODATA_ATTRS);
        }
        policy.add_tag_attributes("img", IMG_ATTRS);
        Self { policy }
    }
}

impl Sanitizer for AllowListSanitizer {
    fn sanitize(&self, html: &str) -> String {
        let body = BodyExtractor.sanitize(html);
        if body.is_empty() {
            return body;
        }

        let mut out = self.policy.clean(&body).to_string();
        for block in json_ld_blocks(&body) {
            if !out.is_empty() {
                out.push('\n');
            }
            out.push_str(&block);
        }
        out
    }
}

/// Well-formed JSON-LD scripts in `html`, re-serialized so they cannot
/// close their `<script>` element early.
fn json_ld_blocks(html: &str) -> Vec<String> {
    let Ok(selector) = Selector::parse("script[type]") else {
        return Vec::new();
    };
    let fragment = Html::parse_fragment(html);

    fragment
        .select(&selector)
        .filter(|el| {
            el.value()
                .attr("type")
                .is_some_and(|t| t.trim().eq_ignore_ascii_case(JSON_LD_TYPE))
        })
        .filter_map(|el| {
            let raw: String = el.text().collect();
            match serde_json::from_str::<serde_json::Value>(&raw) {
                Ok(value) => Some(value),
                Err(e) => {
                    tracing::debug!(error = %e, "dropping malformed JSON-LD block");
                    None
                }
            }
        })
        .filter_map(|value| serde_json::to_string(&value).ok())
        .map(|json| {
            format!(
                "<script type=\"{JSON_LD_TYPE}\">{}</script>",
                json.replace('<', "\\u003c")
            )
        })
        .collect()
}
