//! Alliance of Genome Resources API client

use genetable_core::get_text;
use serde::Deserialize;

use crate::error::GeneError;
use crate::transform::{GenePayload, GeneRecord};

/// One page of the organism gene listing
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenePage {
    pub ids: Vec<String>,
    /// Total number of genes, when the server reports it
    pub total: Option<u64>,
}

/// Where gene ids and gene records come from.
pub trait GeneSource {
    /// List one page (1-based) of gene ids for a taxon
    fn list_gene_ids(&self, taxon_id: &str, page: u32, rows: u32) -> Result<GenePage, GeneError>;

    /// Fetch and flatten a single gene
    fn fetch_gene(&self, gene_id: &str) -> Result<GeneRecord, GeneError>;
}

/// `/api/geneMap` response: `results` holds bare ids or objects with an `id`
#[derive(Debug, Deserialize)]
struct ListingResponse {
    results: Vec<ListingEntry>,
    #[serde(default)]
    total: Option<u64>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ListingEntry {
    Id(String),
    Gene { id: String },
}

impl ListingEntry {
    fn into_id(self) -> String {
        match self {
            Self::Id(id) | Self::Gene { id } => id,
        }
    }
}

/// Blocking client over the shared HTTP runtime
#[derive(Debug, Clone)]
pub struct AllianceClient {
    base_url: String,
}

impl AllianceClient {
    pub fn new(base_url: impl AsRef<str>) -> Self {
        Self {
            base_url: base_url.as_ref().trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn gene_url(&self, gene_id: &str) -> String {
        format!("{}/api/gene/{gene_id}", self.base_url)
    }

    fn listing_url(&self) -> String {
        format!("{}/api/geneMap", self.base_url)
    }
}

impl GeneSource for AllianceClient {
    fn list_gene_ids(&self, taxon_id: &str, page: u32, rows: u32) -> Result<GenePage, GeneError> {
        let query = [
            ("taxonID", taxon_id.to_string()),
            ("page", page.to_string()),
            ("rows", rows.to_string()),
        ];
        let resp = get_text(&self.listing_url(), &query)?;
        if resp.status != 200 {
            return Err(GeneError::Remote {
                status: resp.status,
                body: resp.body,
            });
        }

        let listing: ListingResponse = serde_json::from_str(&resp.body)
            .map_err(|e| GeneError::Parse(format!("gene listing page {page}: {e}")))?;
        Ok(GenePage {
            ids: listing.results.into_iter().map(ListingEntry::into_id).collect(),
            total: listing.total,
        })
    }

    fn fetch_gene(&self, gene_id: &str) -> Result<GeneRecord, GeneError> {
        let resp = get_text(&self.gene_url(gene_id), &[])?;
        match resp.status {
            200 => {
                let payload: GenePayload = serde_json::from_str(&resp.body)
                    .map_err(|e| GeneError::Parse(format!("gene {gene_id}: {e}")))?;
                Ok(GeneRecord::from_payload(payload, gene_id))
            }
            404 => Err(GeneError::NotFound {
                gene_id: gene_id.to_string(),
            }),
            status => Err(GeneError::Remote {
                status,
                body: resp.body,
            }),
        }
    }
}
