use clap::Args;
use std::path::PathBuf;

#[derive(Args, Debug, Clone)]
pub struct CreateArgs {
    /// Document category
    #[arg(long, short)]
    pub category: String,

    /// Unique slug the document is addressed by
    #[arg(long, short)]
    pub path: String,

    /// Read the document HTML from this file instead of stdin
    #[arg(long, short)]
    pub file: Option<PathBuf>,
}

#[derive(Args, Debug, Clone)]
pub struct ShowArgs {
    /// Path (slug) of the document
    pub path: String,

    /// Maximum number of related documents (overrides config)
    #[arg(long, short, value_parser = clap::value_parser!(u16).range(1..))]
    pub limit: Option<u16>,
}
