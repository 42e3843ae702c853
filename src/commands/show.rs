//! `simblog show` command - a document with its related documents

use std::time::Instant;

use crate::cli::{Cli, OutputFormat, ShowArgs};
use simblog_core::config::AppConfig;
use simblog_core::db::Database;
use simblog_core::error::Result;
use simblog_core::format;
use simblog_core::recommend::Related;
use simblog_core::service;
use simblog_core::trace_time;

const SUMMARY_CHARS: usize = 120;

/// Execute the show command
pub fn execute(cli: &Cli, db: &Database, config: &AppConfig, args: &ShowArgs) -> Result<()> {
    let start = Instant::now();

    let mut options = config.related.options();
    if let Some(limit) = args.limit {
        options.limit = usize::from(limit);
    }

    let related = service::fetch_with_related(db, &args.path, options)?;
    trace_time!(start, "fetch_with_related", path = args.path.as_str());

    match cli.format {
        OutputFormat::Json => {
            println!("{}", format::to_json(&related)?);
        }
        OutputFormat::Human => print!("{}", format_human(&related, cli.quiet)),
    }

    Ok(())
}

fn format_human(related: &Related, quiet: bool) -> String {
    let document = &related.document;
    let mut out = format!("{} [{}]\n", document.path, document.category);
    if !quiet {
        let summary = document.summary(SUMMARY_CHARS);
        if !summary.is_empty() {
            out.push_str(&format!("{}\n", summary));
        }
    }

    if related.similar.is_empty() {
        if !quiet {
            out.push_str("\nNo related documents\n");
        }
        return out;
    }

    out.push_str("\nRelated:\n");
    for (i, doc) in related.similar.iter().enumerate() {
        out.push_str(&format!("  {}. {} [{}]\n", i + 1, doc.path, doc.category));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use simblog_core::document::Document;

    fn doc(path: &str, category: &str, text: &str) -> Document {
        Document {
            id: 1,
            category: category.to_string(),
            text: text.to_string(),
            path: path.to_string(),
            embedding: None,
            created: Utc::now(),
            updated: Utc::now(),
        }
    }

    #[test]
    fn test_format_human_lists_related_in_order() {
        let related = Related {
            document: doc("a", "c", "<p>fish swim in water</p>"),
            similar: vec![doc("b", "c", "x"), doc("z", "d", "y")],
        };
        let out = format_human(&related, false);
        assert_eq!(
            out,
            "a [c]\nfish swim in water\n\nRelated:\n  1. b [c]\n  2. z [d]\n"
        );
    }

    #[test]
    fn test_format_human_without_related() {
        let related = Related {
            document: doc("blank", "misc", "<div></div>"),
            similar: Vec::new(),
        };
        assert_eq!(
            format_human(&related, false),
            "blank [misc]\n\nNo related documents\n"
        );
        assert_eq!(format_human(&related, true), "blank [misc]\n");
    }
}
