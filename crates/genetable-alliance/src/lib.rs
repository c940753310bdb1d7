//! Genetable Alliance - gene tables from the Alliance of Genome Resources API
//!
//! Lists every gene of an organism, fetches each gene record, flattens it
//! into a fixed set of columns and exports the result as a dated CSV
//! snapshot that can be reloaded offline.
//!
//! # Example
//!
//! ```no_run
//! use genetable_alliance::{AllianceClient, Config, export_gene_table};
//! use genetable_core::ProgressContext;
//!
//! let config = Config {
//!     max_genes: Some(25),
//!     ..Default::default()
//! };
//! let client = AllianceClient::new(&config.base_url);
//! let today = chrono::Local::now().date_naive();
//!
//! let summary = export_gene_table(&client, &config, today, &ProgressContext::new())
//!     .expect("export failed");
//! println!("Wrote {} genes to {}", summary.rows, summary.path.display());
//! ```

pub mod api;
pub mod config;
pub mod error;
pub mod export;
pub mod runner;
pub mod schema;
pub mod table;
pub mod transform;

// Re-exports for convenience
pub use api::{AllianceClient, GenePage, GeneSource};
pub use config::{Config, MissingPolicy};
pub use error::GeneError;
pub use export::{ExportSummary, export_file_name, export_gene_table, read_table, write_table};
pub use runner::{BuildSummary, build_gene_table, list_all_gene_ids};
pub use table::GeneTable;
pub use transform::{GenePayload, GeneRecord};
