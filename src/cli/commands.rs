//! CLI arguments

use clap::Parser;

/// Archive civic participation open data into CSV and JSON files
#[derive(Parser, Debug)]
#[command(name = "opendata-export")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Public or administrative API token.
    ///
    /// Without a token the export runs in public mode and strips
    /// identifying fields from every record. A non-anonymized archive
    /// requires an administrative token.
    #[arg(short, long)]
    pub token: Option<String>,
}
