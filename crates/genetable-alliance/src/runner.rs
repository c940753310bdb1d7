//! Table builder: list an organism's genes, then fetch them one by one

use std::time::{Duration, Instant};

use genetable_core::{ProgressContext, fmt_num};

use crate::api::GeneSource;
use crate::config::{Config, MissingPolicy};
use crate::error::GeneError;
use crate::table::GeneTable;
use crate::transform::GeneRecord;

/// Non-TTY progress log interval (genes)
const LOG_EVERY: usize = 500;

/// Table build summary
#[derive(Debug, Clone, Default)]
pub struct BuildSummary {
    /// Listing pages requested
    pub pages: u32,
    /// Gene ids returned by the listing (after `max_genes`)
    pub listed: usize,
    /// Genes fetched successfully
    pub fetched: usize,
    /// Ids whose fetch failed (skipped or kept as placeholders, per policy)
    pub failed: Vec<String>,
    pub elapsed: Duration,
}

/// Collect all gene ids for the configured taxon, page by page.
///
/// Stops on an empty page, once the reported total is reached, or at
/// `max_genes`. A short page ends the listing only when the server reports no
/// total, since some servers cap `rows` below the requested page size.
/// Returns the ids in listing order and the number of pages read.
pub fn list_all_gene_ids(
    source: &impl GeneSource,
    config: &Config,
) -> Result<(Vec<String>, u32), GeneError> {
    let page_size = config.page_size.max(1);
    let mut ids: Vec<String> = Vec::new();
    let mut page = 1u32;
    let mut prev_first: Option<String> = None;

    loop {
        let batch = source.list_gene_ids(&config.taxon_id, page, page_size)?;
        let n = batch.ids.len();
        log::debug!("listing page {page}: {n} ids");

        // A server ignoring `page` would hand back the same page forever
        let first = batch.ids.first().cloned();
        if page > 1 && first.is_some() && first == prev_first {
            log::warn!("listing page {page} repeats page {}, stopping", page - 1);
            break;
        }
        prev_first = first;

        ids.extend(batch.ids);

        match batch.total {
            Some(total) if ids.len() as u64 >= total => break,
            Some(_) if n == 0 => {
                log::warn!("listing page {page} is empty before the reported total, stopping");
                break;
            }
            Some(_) => {}
            None if n < page_size as usize => break,
            None => {}
        }
        if config.max_genes.is_some_and(|max| ids.len() >= max) {
            break;
        }
        page += 1;
    }

    if let Some(max) = config.max_genes {
        ids.truncate(max);
    }
    Ok((ids, page))
}

/// Build the gene table for `config.taxon_id`.
///
/// The listing must succeed as a whole; a listing error returns no table.
/// Genes are fetched serially in listing order. Rows are keyed by the
/// fetched record's `id` (the listed id when the record has none), matching
/// `read_table`. Per-gene failures follow `config.on_missing`.
pub fn build_gene_table(
    source: &impl GeneSource,
    config: &Config,
    progress: &ProgressContext,
) -> Result<(GeneTable, BuildSummary), GeneError> {
    let start = Instant::now();

    log::info!("Listing genes for taxon {}...", config.taxon_id);
    let stage = progress.stage_line("listing");
    stage.set_message(format!("taxon {}", config.taxon_id));
    let listed = list_all_gene_ids(source, config);
    stage.finish_and_clear();
    let (ids, pages) = listed?;
    log::info!("Found {} genes in {pages} page(s)", fmt_num(ids.len()));

    let mut table = GeneTable::with_capacity(ids.len());
    let mut summary = BuildSummary {
        pages,
        listed: ids.len(),
        ..Default::default()
    };

    let bar = progress.count_bar("genes", ids.len() as u64);
    for (i, gene_id) in ids.iter().enumerate() {
        bar.set_message(gene_id.clone());

        match source.fetch_gene(gene_id) {
            Ok(record) => {
                let key = record.id.clone().unwrap_or_else(|| gene_id.clone());
                table.insert(key, record);
                summary.fetched += 1;
            }
            Err(e) => match config.on_missing {
                MissingPolicy::Abort => {
                    bar.abandon();
                    log::error!("{gene_id}: {e}");
                    return Err(e);
                }
                MissingPolicy::Skip => {
                    log::warn!("{gene_id}: {e}, skipping");
                    summary.failed.push(gene_id.clone());
                }
                MissingPolicy::Keep => {
                    log::warn!("{gene_id}: {e}, keeping empty row");
                    table.insert(gene_id.as_str(), GeneRecord::placeholder(gene_id));
                    summary.failed.push(gene_id.clone());
                }
            },
        }

        bar.inc(1);
        if !progress.is_tty() && (i + 1) % LOG_EVERY == 0 {
            log::info!("{}/{} genes", fmt_num(i + 1), fmt_num(ids.len()));
        }
    }
    bar.finish_and_clear();

    summary.elapsed = start.elapsed();
    log::info!(
        "Fetched {}/{} genes ({} failed) in {:.1}s",
        fmt_num(summary.fetched),
        fmt_num(summary.listed),
        summary.failed.len(),
        summary.elapsed.as_secs_f64()
    );
    Ok((table, summary))
}
