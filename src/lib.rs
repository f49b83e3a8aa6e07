pub mod checkout;
pub mod classify;
pub mod config;
pub mod contract;
pub mod history;
pub mod load_config;
pub mod pipeline;
pub mod render;
pub mod series;
pub mod template;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::history::GitHistory;
use crate::load_config::load_config;
use crate::template::JinjaTemplates;

#[derive(Parser)]
#[clap(
    name = "notesmith",
    version,
    about = "Convert a tree of notes, essays and book-note series into content-site documents"
)]
pub struct Cli {
    #[clap(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Build the content tree from the configured source checkout
    Build {
        /// Path to the YAML config file
        #[clap(long)]
        config: PathBuf,
    },
}

/// Extracted CLI logic entrypoint for integration tests and main().
pub fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Build { config } => {
            let config = load_config(config)?;
            if let Some(repo_url) = &config.repo_url {
                checkout::clone_or_pull(repo_url, &config.checkout_dir)?;
            }
            let sources = checkout::list_sources(&config.checkout_dir, &config.include_file)?;
            let history = GitHistory::new(&config.checkout_dir);
            let templates = JinjaTemplates::new()?;
            let report = pipeline::run(&sources, &config.target_dir, &history, &templates)?;
            println!(
                "Build complete: {} documents written, {} files skipped.",
                report.written.len(),
                report.skipped.len()
            );
            Ok(())
        }
    }
}
