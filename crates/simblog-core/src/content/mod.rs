//! Preparing submitted HTML before it is stored

mod sanitize;

use std::collections::HashMap;
use std::sync::OnceLock;

use chrono::{DateTime, Utc};
use regex::{Captures, Regex};

use crate::config::SiteConfig;

pub use sanitize::{AllowListSanitizer, BodyExtractor, Sanitizer};

/// Words per minute used for reading time estimates
pub const WORDS_PER_MINUTE: usize = 200;

static TAG_RE: OnceLock<Option<Regex>> = OnceLock::new();
static PLACEHOLDER_RE: OnceLock<Option<Regex>> = OnceLock::new();

fn compile(pattern: &str) -> Option<Regex> {
    match Regex::new(pattern) {
        Ok(re) => Some(re),
        Err(e) => {
            tracing::warn!(pattern, error = %e, "failed to compile regex");
            None
        }
    }
}

fn tag_re() -> Option<&'static Regex> {
    TAG_RE.get_or_init(|| compile(r"<[^>]+>")).as_ref()
}

fn placeholder_re() -> Option<&'static Regex> {
    PLACEHOLDER_RE
        .get_or_init(|| compile(r"\{[A-Z_]+\}"))
        .as_ref()
}

/// Whitespace-separated words once tags are blanked out
pub fn word_count(html: &str) -> usize {
    match tag_re() {
        Some(re) => re.replace_all(html, " ").split_whitespace().count(),
        None => crate::text::strip_tags(html).split_whitespace().count(),
    }
}

/// Estimated reading time in whole minutes, at least 1
pub fn reading_time_minutes(html: &str) -> usize {
    word_count(html).div_ceil(WORDS_PER_MINUTE).max(1)
}

/// Join a site base URL and a document path into a canonical URL
pub fn canonical_url(base: &str, path: &str) -> String {
    let base = base.trim_end_matches(['/', ' ']);
    let path = if path.starts_with('/') {
        path.to_string()
    } else {
        format!("/{path}")
    };
    if base.is_empty() {
        path
    } else {
        format!("{base}{path}")
    }
}

/// Values for every known `{PLACEHOLDER}` in a new document
pub fn placeholder_values(
    site: &SiteConfig,
    category: &str,
    path: &str,
    reading_minutes: usize,
    now: DateTime<Utc>,
) -> HashMap<&'static str, String> {
    let iso_now = now.to_rfc3339();
    let date = now.format("%Y-%m-%d").to_string();

    HashMap::from([
        ("{SITE_NAME}", site.name.clone()),
        ("{KEYWORDS}", String::new()),
        ("{AUTHOR}", site.author.clone()),
        ("{FEATURED_IMAGE}", site.featured_image.clone()),
        ("{CANONICAL_URL}", canonical_url(&site.base_url, path)),
        ("{SCHEMA_JSON}", String::new()),
        ("{PUBLISH_DATE}", iso_now.clone()),
        ("{MODIFIED_DATE}", iso_now),
        ("{CATEGORY}", category.to_string()),
        ("{TAGS}", String::new()),
        ("{PUBLISH_DATE_FORMATTED}", date.clone()),
        ("{MODIFIED_DATE_FORMATTED}", date),
        ("{READING_TIME}", reading_minutes.to_string()),
        ("{AUTHOR_BIO}", site.author_bio.clone()),
        ("{SITE_LOGO}", site.logo.clone()),
    ])
}

/// Replace known placeholders in a single pass; unknown ones stay as-is
pub fn replace_placeholders(input: &str, values: &HashMap<&'static str, String>) -> String {
    if values.is_empty() || input.trim().is_empty() {
        return input.to_string();
    }
    let Some(re) = placeholder_re() else {
        return input.to_string();
    };

    re.replace_all(input, |caps: &Captures| {
            let key = &caps[0];
            values
                .get(key)
                .cloned()
                .unwrap_or_else(|| key.to_string())
        })
        .into_owned()
}

/// Append the call-to-action block unless one is already present
pub fn ensure_cta(html: &str, cta: &str) -> String {
    if cta.trim().is_empty()
        || html.contains("cta-section")
        || html.contains("href=\"/contact\"")
    {
        return html.to_string();
    }
    format!("{html}\n{cta}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_word_count_and_reading_time() {
        assert_eq!(word_count("<p>one two</p><p>three</p>"), 3);
        assert_eq!(word_count("<b>a</b><i>b</i>"), 2);
        assert_eq!(reading_time_minutes(""), 1);
        assert_eq!(reading_time_minutes("<p>short</p>"), 1);

        let long = "word ".repeat(401);
        assert_eq!(reading_time_minutes(&long), 3);
        let exact = "word ".repeat(400);
        assert_eq!(reading_time_minutes(&exact), 2);
    }

    #[test]
    fn test_canonical_url() {
        assert_eq!(canonical_url("https://x.io/ ", "post"), "https://x.io/post");
        assert_eq!(canonical_url("https://x.io", "/post"), "https://x.io/post");
        assert_eq!(canonical_url("", "post"), "/post");
    }

    #[test]
    fn test_replace_placeholders() {
        let site = SiteConfig {
            name: "Example".to_string(),
            base_url: "https://example.com".to_string(),
            author: "Ada".to_string(),
            ..SiteConfig::default()
        };
        let now = Utc.with_ymd_and_hms(2025, 3, 4, 5, 6, 7).unwrap();
        let values = placeholder_values(&site, "ai", "what-is-rag", 8, now);

        let out = replace_placeholders(
            "{SITE_NAME} by {AUTHOR} on {PUBLISH_DATE_FORMATTED} ({READING_TIME} min) {CANONICAL_URL} {UNKNOWN} {KEYWORDS}|",
            &values,
        );
        assert_eq!(
            out,
            "Example by Ada on 2025-03-04 (8 min) https://example.com/what-is-rag {UNKNOWN} |"
        );
    }

    #[test]
    fn test_replacement_values_are_not_rescanned() {
        let site = SiteConfig {
            name: "{AUTHOR}".to_string(),
            author: "Ada".to_string(),
            ..SiteConfig::default()
        };
        let values = placeholder_values(&site, "c", "p", 1, Utc::now());
        assert_eq!(replace_placeholders("{SITE_NAME}", &values), "{AUTHOR}");
    }

    #[test]
    fn test_replace_placeholders_noop_cases() {
        let empty = HashMap::new();
        assert_eq!(replace_placeholders("{SITE_NAME}", &empty), "{SITE_NAME}");

        let values = placeholder_values(&SiteConfig::default(), "c", "p", 1, Utc::now());
        assert_eq!(replace_placeholders("   ", &values), "   ");
    }

    #[test]
    fn test_ensure_cta() {
        let cta = r#"<section class="cta-section"><a href="/contact">Contact</a></section>"#;
        assert_eq!(ensure_cta("<p>x</p>", cta), format!("<p>x</p>\n{cta}"));
        assert_eq!(ensure_cta("<p>x</p>", ""), "<p>x</p>");

        let with_cta = format!("<p>x</p>{cta}");
        assert_eq!(ensure_cta(&with_cta, cta), with_cta);

        let with_contact = r#"<p><a href="/contact">hi</a></p>"#;
        assert_eq!(ensure_cta(with_contact, cta), with_contact);
    }
}
