//! `simblog create` command - store a new document
//!
//! Reads HTML from `--file` or stdin, prepares it and stores it together
//! with its embedding.

use std::fs;
use std::io::{self, Read};

use tracing::debug;

use crate::cli::{Cli, CreateArgs, OutputFormat};
use simblog_core::config::AppConfig;
use simblog_core::content::AllowListSanitizer;
use simblog_core::db::Database;
use simblog_core::error::Result;
use simblog_core::format;
use simblog_core::service::{self, CreateDocumentRequest};

/// Execute the create command
pub fn execute(cli: &Cli, db: &Database, config: &AppConfig, args: &CreateArgs) -> Result<()> {
    let text = match &args.file {
        Some(path) => fs::read_to_string(path)?,
        None => {
            let mut buf = String::new();
            io::stdin().read_to_string(&mut buf)?;
            buf
        }
    };
    debug!(bytes = text.len(), "read document text");

    let request = CreateDocumentRequest {
        category: args.category.clone(),
        text,
        path: args.path.clone(),
    };
    let document = service::create_document(db, &AllowListSanitizer::new(), config, &request)?;

    match cli.format {
        OutputFormat::Json => {
            println!("{}", format::to_json(&document)?);
        }
        OutputFormat::Human => {
            if !cli.quiet {
                println!("{}", document.path);
            }
        }
    }

    Ok(())
}
