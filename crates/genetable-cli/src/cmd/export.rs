//! Export subcommand - build the gene table and write a dated CSV

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, ValueEnum};

use genetable_alliance::{AllianceClient, MissingPolicy};
use genetable_core::{SharedProgress, fmt_num};

use super::print_summary;
use crate::config::Config;

/// Failed ids listed in the summary before eliding the rest
const SHOW_FAILED: usize = 5;

#[derive(Args, Debug)]
pub struct ExportArgs {
    /// NCBI taxon ID of the organism (default from config: 559292)
    #[arg(short, long)]
    pub taxon: Option<String>,

    /// Output directory
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// File name prefix; the date and .csv are appended
    #[arg(long)]
    pub prefix: Option<String>,

    /// Gene ids requested per listing page
    #[arg(long)]
    pub page_size: Option<u32>,

    /// Stop after this many genes
    #[arg(short = 'l', long)]
    pub limit: Option<usize>,

    /// What to do with genes that cannot be fetched
    #[arg(long, value_enum)]
    pub on_missing: Option<OnMissing>,
}

#[derive(Clone, Copy, ValueEnum, Debug)]
pub enum OnMissing {
    /// Leave the gene out and report it
    Skip,
    /// Fail the export
    Abort,
    /// Keep an id-only row
    Keep,
}

impl From<OnMissing> for MissingPolicy {
    fn from(p: OnMissing) -> Self {
        match p {
            OnMissing::Skip => MissingPolicy::Skip,
            OnMissing::Abort => MissingPolicy::Abort,
            OnMissing::Keep => MissingPolicy::Keep,
        }
    }
}

pub fn run(args: ExportArgs, config: &Config, progress: &SharedProgress) -> Result<()> {
    let mut src_config = config.source_config();
    if let Some(taxon) = args.taxon {
        src_config.taxon_id = taxon;
    }
    if let Some(output) = args.output {
        src_config.output_dir = output;
    }
    if let Some(prefix) = args.prefix {
        src_config.file_prefix = prefix;
    }
    if let Some(page_size) = args.page_size {
        src_config.page_size = page_size;
    }
    if let Some(policy) = args.on_missing {
        src_config.on_missing = policy.into();
    }
    src_config.max_genes = args.limit;
    anyhow::ensure!(src_config.page_size > 0, "--page-size must be at least 1");

    log::info!("Exporting gene table for taxon {}", src_config.taxon_id);
    log::info!("  API: {}", src_config.base_url);
    log::info!("  Output: {}", src_config.output_dir.display());
    log::info!("  On missing gene: {}", src_config.on_missing);

    let client = AllianceClient::new(&src_config.base_url);
    let today = chrono::Local::now().date_naive();
    let summary = genetable_alliance::export_gene_table(&client, &src_config, today, progress)
        .with_context(|| format!("Export for taxon {} failed", src_config.taxon_id))?;

    let build = &summary.build;
    let mut rows = vec![
        ("File", summary.path.display().to_string()),
        ("Rows", fmt_num(summary.rows)),
        (
            "Genes",
            format!(
                "{}/{} fetched ({} failed)",
                fmt_num(build.fetched),
                fmt_num(build.listed),
                build.failed.len()
            ),
        ),
        ("Listing pages", build.pages.to_string()),
        ("Time", format!("{:.1}s", build.elapsed.as_secs_f64())),
    ];
    if !build.failed.is_empty() {
        let mut shown = build.failed[..build.failed.len().min(SHOW_FAILED)].join(", ");
        if build.failed.len() > SHOW_FAILED {
            shown.push_str(&format!(", ... (+{})", build.failed.len() - SHOW_FAILED));
        }
        rows.push(("Failed ids", shown));
    }
    print_summary("Export", &rows);

    Ok(())
}
