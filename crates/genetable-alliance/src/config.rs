//! Gene table pipeline configuration

use std::fmt;
use std::path::PathBuf;

use serde::Deserialize;

/// What the table builder does when a single gene cannot be fetched
/// (404, other HTTP error, bad payload, network failure).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MissingPolicy {
    /// Log a warning and leave the gene out of the table
    #[default]
    Skip,
    /// Stop the whole build with the gene's error
    Abort,
    /// Keep an id-only row with every other column null
    Keep,
}

impl MissingPolicy {
    /// Parse policy from string name (case-insensitive)
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "skip" => Some(Self::Skip),
            "abort" => Some(Self::Abort),
            "keep" => Some(Self::Keep),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Skip => "skip",
            Self::Abort => "abort",
            Self::Keep => "keep",
        }
    }
}

impl fmt::Display for MissingPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Runtime configuration for one export run
#[derive(Debug, Clone)]
pub struct Config {
    /// API root, without trailing slash
    pub base_url: String,
    /// NCBI taxon of the organism to list
    pub taxon_id: String,
    /// Listing rows requested per page
    pub page_size: u32,
    /// Stop after this many listed genes (for trial runs)
    pub max_genes: Option<usize>,
    pub on_missing: MissingPolicy,
    /// Directory for exported CSV files
    pub output_dir: PathBuf,
    /// Export file name prefix; the date and `.csv` are appended
    pub file_prefix: String,
}

pub const DEFAULT_BASE_URL: &str = "https://www.alliancegenome.org";

/// Saccharomyces cerevisiae S288C
pub const DEFAULT_TAXON_ID: &str = "559292";

pub const DEFAULT_PAGE_SIZE: u32 = 10_000;

pub const DEFAULT_FILE_PREFIX: &str = "SGD_S288C_gene_table";

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            taxon_id: DEFAULT_TAXON_ID.to_string(),
            page_size: DEFAULT_PAGE_SIZE,
            max_genes: None,
            on_missing: MissingPolicy::default(),
            output_dir: PathBuf::from("."),
            file_prefix: DEFAULT_FILE_PREFIX.to_string(),
        }
    }
}
