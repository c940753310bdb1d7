//! Fetch subcommand - look up a single gene on the remote API

use anyhow::Result;
use clap::Args;

use genetable_alliance::{AllianceClient, GeneError, GeneSource};

use super::{print_record, print_record_json};
use crate::config::Config;

#[derive(Args, Debug)]
pub struct FetchArgs {
    /// Gene identifier, e.g. SGD:S000005446
    pub gene_id: String,

    /// Print the record as JSON instead of a table
    #[arg(long)]
    pub json: bool,
}

pub fn run(args: FetchArgs, config: &Config) -> Result<()> {
    let client = AllianceClient::new(&config.api.base_url);

    let record = match client.fetch_gene(&args.gene_id) {
        Ok(record) => record,
        Err(GeneError::NotFound { gene_id }) => {
            anyhow::bail!("No data found for gene ID: {gene_id}")
        }
        Err(e) => return Err(anyhow::Error::new(e).context("Failed to retrieve data")),
    };

    if args.json {
        print_record_json(&record)
    } else {
        print_record(&record);
        Ok(())
    }
}
