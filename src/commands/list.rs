//! `simblog list` command - documents ordered by path

use crate::cli::{Cli, OutputFormat};
use simblog_core::db::Database;
use simblog_core::error::Result;
use simblog_core::format;
use simblog_core::service;

/// Execute the list command
pub fn execute(cli: &Cli, db: &Database, category: Option<&str>) -> Result<()> {
    let documents = service::list_documents(db, category)?;

    match cli.format {
        OutputFormat::Json => {
            let output: Vec<_> = documents
                .iter()
                .map(|doc| {
                    serde_json::json!({
                        "id": doc.id,
                        "path": doc.path,
                        "category": doc.category,
                        "created": doc.created.to_rfc3339(),
                        "updated": doc.updated.to_rfc3339(),
                        "has_embedding": doc.embedding.is_some(),
                    })
                })
                .collect();
            println!("{}", format::to_json(&output)?);
        }
        OutputFormat::Human => {
            if documents.is_empty() {
                if !cli.quiet {
                    println!("No documents found");
                }
            } else {
                for doc in &documents {
                    println!("{} [{}]", doc.path, doc.category);
                }
            }
        }
    }

    Ok(())
}
