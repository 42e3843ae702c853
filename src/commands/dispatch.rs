//! Command dispatch logic for simblog
//!
//! Opens the database once per invocation and hands it to the command; it
//! is checkpointed and closed when dropped at the end of `run`.

use std::path::PathBuf;
use std::time::Instant;

use tracing::debug;

use crate::cli::{Cli, Commands};
use crate::commands;
use simblog_core::config::AppConfig;
use simblog_core::db::Database;
use simblog_core::error::{Result, SimblogError};
use simblog_core::trace_time;

const APP_DIR: &str = "simblog";
const DB_FILE: &str = "simblog.db";

pub fn run(cli: &Cli, start: Instant) -> Result<()> {
    let config = load_config(cli)?;
    trace_time!(start, "load_config");

    let db_path = resolve_db_path(cli)?;
    debug!(path = %db_path.display(), "opening database");
    let db = Database::open(&db_path, config.database.busy_timeout())?;
    trace_time!(start, "open_database");

    let result = match &cli.command {
        Commands::Create(args) => commands::create::execute(cli, &db, &config, args),
        Commands::Show(args) => commands::show::execute(cli, &db, &config, args),
        Commands::List { category } => commands::list::execute(cli, &db, category.as_deref()),
        Commands::Seed => commands::seed::execute(cli, &db, &config),
    };

    trace_time!(start, "execute_command");
    result
}

fn load_config(cli: &Cli) -> Result<AppConfig> {
    match &cli.config {
        Some(path) => AppConfig::load_or_default(path),
        None => Ok(AppConfig::default()),
    }
}

/// `--db` / `SIMBLOG_DB`, else `<data dir>/simblog/simblog.db`
fn resolve_db_path(cli: &Cli) -> Result<PathBuf> {
    if let Some(path) = &cli.db {
        return Ok(path.clone());
    }
    dirs::data_local_dir()
        .map(|dir| dir.join(APP_DIR).join(DB_FILE))
        .ok_or_else(|| SimblogError::Other("unable to determine data directory".to_string()))
}
