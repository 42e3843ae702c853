//! `simblog seed` command - load the sample corpus

use crate::cli::{Cli, OutputFormat};
use simblog_core::config::AppConfig;
use simblog_core::content::AllowListSanitizer;
use simblog_core::db::Database;
use simblog_core::error::Result;
use simblog_core::service;

/// Execute the seed command
pub fn execute(cli: &Cli, db: &Database, config: &AppConfig) -> Result<()> {
    let inserted = service::seed_documents(db, &AllowListSanitizer::new(), config)?;

    match cli.format {
        OutputFormat::Json => {
            println!("{}", serde_json::json!({ "inserted": inserted }));
        }
        OutputFormat::Human => {
            if !cli.quiet {
                println!("Seeded {} document(s)", inserted);
            }
        }
    }

    Ok(())
}
