//! genetable - gene annotation snapshots from the Alliance of Genome Resources
//!
//! Lists an organism's genes, fetches each gene record and exports a dated
//! CSV table for offline use.

use std::sync::Arc;

use anyhow::Result;
use clap::{Parser, Subcommand};

mod cmd;
mod config;

use config::Config;

#[derive(Parser)]
#[command(name = "genetable")]
#[command(about = "Gene annotation tables from the Alliance of Genome Resources API")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Enable debug logging
    #[arg(long, global = true)]
    debug: bool,

    /// Config file path (default: ./genetable.toml or ~/.config/genetable/config.toml)
    #[arg(short, long, global = true)]
    config: Option<std::path::PathBuf>,

    /// API root URL
    #[arg(long, global = true)]
    base_url: Option<String>,

    /// Whole-request timeout in seconds (default: none)
    #[arg(long, global = true)]
    timeout: Option<u64>,
}

#[derive(Subcommand)]
enum Command {
    /// Build the organism gene table and write it as a dated CSV
    Export(cmd::export::ExportArgs),
    /// Fetch and show a single gene
    Fetch(cmd::fetch::FetchArgs),
    /// Load a previously exported CSV table
    Import(cmd::import::ImportArgs),
    /// Show current configuration
    Config,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let progress = Arc::new(genetable_core::ProgressContext::new());

    // Logging:
    //   TTY:     quiet (warn) unless --debug (the gene bar shows activity)
    //   non-TTY: info unless --debug (logs are the only progress indicator)
    let is_tty = progress.is_tty();
    let multi = if is_tty { Some(progress.multi()) } else { None };
    let quiet = if is_tty { !cli.debug } else { false };
    genetable_core::init_logging(quiet, cli.debug, multi);

    let mut config = if let Some(path) = cli.config {
        Config::from_file(&path)?
    } else {
        Config::load()?
    };

    // CLI overrides
    if let Some(base_url) = cli.base_url {
        config.api.base_url = base_url;
    }
    if let Some(timeout) = cli.timeout {
        config.http.request_timeout = Some(timeout);
    }
    genetable_core::set_http_config(config.http_config());

    match cli.command {
        Command::Export(args) => cmd::export::run(args, &config, &progress),
        Command::Fetch(args) => cmd::fetch::run(args, &config),
        Command::Import(args) => cmd::import::run(args),
        Command::Config => {
            cmd::print_summary(
                "Setting",
                &[
                    ("API base URL", config.api.base_url.clone()),
                    ("Taxon ID", config.organism.taxon_id.clone()),
                    ("File prefix", config.organism.file_prefix.clone()),
                    (
                        "Output directory",
                        config.output.default_dir.display().to_string(),
                    ),
                    ("Page size", config.export.page_size.to_string()),
                    ("On missing gene", config.export.on_missing.to_string()),
                    (
                        "Connect timeout",
                        format!("{}s", config.http.connect_timeout),
                    ),
                    (
                        "Request timeout",
                        config
                            .http
                            .request_timeout
                            .map_or("none".to_string(), |t| format!("{t}s")),
                    ),
                ],
            );
            Ok(())
        }
    }
}
