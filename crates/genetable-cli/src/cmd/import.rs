//! Import subcommand - load an exported CSV table for offline lookups

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use genetable_alliance::{GeneTable, read_table};
use genetable_core::fmt_num;

use super::{print_record, print_record_json, print_summary};

#[derive(Args, Debug)]
pub struct ImportArgs {
    /// Exported CSV file
    pub path: PathBuf,

    /// Show one gene, by id or symbol
    #[arg(short, long)]
    pub gene: Option<String>,

    /// Print the gene as JSON instead of a table
    #[arg(long, requires = "gene")]
    pub json: bool,
}

/// Column coverage counts for the summary
struct Coverage {
    located: usize,
    uniprot: usize,
    described: usize,
}

fn coverage(table: &GeneTable) -> Coverage {
    Coverage {
        located: table.iter().filter(|r| r.chromosome.is_some()).count(),
        uniprot: table.iter().filter(|r| r.uniprot_id.is_some()).count(),
        described: table
            .iter()
            .filter(|r| r.gene_description.is_some() || r.gene_description_auto.is_some())
            .count(),
    }
}

pub fn run(args: ImportArgs) -> Result<()> {
    let table = read_table(&args.path)
        .with_context(|| format!("Failed to load gene table {}", args.path.display()))?;

    if let Some(query) = args.gene {
        let record = table
            .lookup(&query)
            .with_context(|| format!("{query}: not in {}", args.path.display()))?;
        return if args.json {
            print_record_json(record)
        } else {
            print_record(record);
            Ok(())
        };
    }

    let cov = coverage(&table);
    print_summary(
        "Gene table",
        &[
            ("File", args.path.display().to_string()),
            ("Genes", fmt_num(table.len())),
            ("With location", fmt_num(cov.located)),
            ("With UniProt ID", fmt_num(cov.uniprot)),
            ("With description", fmt_num(cov.described)),
        ],
    );
    Ok(())
}
