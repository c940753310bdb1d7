//! CSV export and import of gene tables

use std::fs::{self, File};
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use genetable_core::{ProgressContext, fmt_num};

use crate::api::GeneSource;
use crate::config::Config;
use crate::error::GeneError;
use crate::runner::{BuildSummary, build_gene_table};
use crate::schema::COLUMNS;
use crate::table::GeneTable;
use crate::transform::GeneRecord;

/// Export execution summary
#[derive(Debug, Clone)]
pub struct ExportSummary {
    pub path: PathBuf,
    pub rows: usize,
    pub build: BuildSummary,
}

/// `{prefix}_{YYYY-MM-DD}.csv`
pub fn export_file_name(prefix: &str, date: NaiveDate) -> String {
    format!("{prefix}_{}.csv", date.format("%Y-%m-%d"))
}

/// Write a table as CSV: header row, one row per gene, nulls as empty fields.
///
/// Writes to `{path}.tmp` and renames, so a failed write never leaves a
/// truncated file under the final name.
pub fn write_table(table: &GeneTable, path: &Path) -> Result<(), GeneError> {
    let mut tmp_name = path.as_os_str().to_owned();
    tmp_name.push(".tmp");
    let tmp_path = PathBuf::from(tmp_name);

    let result = write_csv(table, &tmp_path).and_then(|()| Ok(fs::rename(&tmp_path, path)?));
    if result.is_err() && tmp_path.exists() {
        let _ = fs::remove_file(&tmp_path);
    }
    result
}

fn write_csv(table: &GeneTable, path: &Path) -> Result<(), GeneError> {
    let file = File::create(path)?;
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(BufWriter::new(file));

    // Header written explicitly so an empty table still gets one
    writer.write_record(COLUMNS)?;
    for record in table {
        writer.serialize(record)?;
    }
    writer.flush()?;
    Ok(())
}

/// Load a CSV gene table.
///
/// Columns are matched by header name: order is irrelevant, unknown columns
/// are ignored, missing columns read as null. Empty fields read as null;
/// `start`/`end` must be whole numbers (`159604` or `159604.0`).
/// Rows are keyed by their `id` column, the same key the builder uses.
pub fn read_table(path: &Path) -> Result<GeneTable, GeneError> {
    let file = File::open(path)?;
    let mut reader = csv::Reader::from_reader(file);
    let mut table = GeneTable::new();

    for (row, result) in reader.deserialize::<GeneRecord>().enumerate() {
        let record = result?;
        let Some(key) = record.id.clone() else {
            return Err(GeneError::Parse(format!(
                "{}: data row {} has no id",
                path.display(),
                row + 1
            )));
        };
        table.insert(key, record);
    }

    log::debug!("Loaded {} genes from {}", table.len(), path.display());
    Ok(table)
}

/// Build the gene table for `config.taxon_id` and write it to
/// `{output_dir}/{file_prefix}_{date}.csv`.
pub fn export_gene_table(
    source: &impl GeneSource,
    config: &Config,
    date: NaiveDate,
    progress: &ProgressContext,
) -> Result<ExportSummary, GeneError> {
    fs::create_dir_all(&config.output_dir)?;
    let path = config
        .output_dir
        .join(export_file_name(&config.file_prefix, date));

    let (table, build) = build_gene_table(source, config, progress)?;
    write_table(&table, &path)?;
    log::info!("Wrote {} genes to {}", fmt_num(table.len()), path.display());

    Ok(ExportSummary {
        path,
        rows: table.len(),
        build,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::GenePage;
    use tempfile::TempDir;

    fn adh1() -> GeneRecord {
        GeneRecord {
            id: Some("SGD:S000005446".to_string()),
            symbol: Some("ADH1".to_string()),
            name: Some("alcohol dehydrogenase ADH1".to_string()),
            synonym1: Some("ADC1".to_string()),
            synonym2: Some("ADH".to_string()),
            synonym3: None,
            chromosome: Some("XV".to_string()),
            start: Some(159604),
            end: Some(160650),
            strand: Some("-".to_string()),
            uniprot_id: Some("P00330".to_string()),
            gene_description: Some("Alcohol dehydrogenase, fermentative isozyme; \"ADH I\"".to_string()),
            gene_description_auto: None,
        }
    }

    fn sample_table() -> GeneTable {
        let mut table = GeneTable::new();
        table.insert("SGD:S000005446", adh1());
        table.insert("SGD:S000000001", GeneRecord::placeholder("SGD:S000000001"));
        table
    }

    #[test]
    fn file_name_embeds_date() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 7).unwrap();
        assert_eq!(
            export_file_name("SGD_S288C_gene_table", date),
            "SGD_S288C_gene_table_2024-03-07.csv"
        );
    }

    #[test]
    fn header_matches_columns() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("genes.csv");
        write_table(&sample_table(), &path).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        let header = content.lines().next().unwrap();
        assert_eq!(header, COLUMNS.join(","));
        assert_eq!(content.lines().count(), 3);
        assert!(!dir.path().join("genes.csv.tmp").exists());
    }

    #[test]
    fn empty_table_still_has_header() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("empty.csv");
        write_table(&GeneTable::new(), &path).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert_eq!(content.trim_end(), COLUMNS.join(","));
        assert!(read_table(&path).unwrap().is_empty());
    }

    #[test]
    fn nulls_written_as_empty_fields() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("genes.csv");
        write_table(&sample_table(), &path).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        let last = content.lines().nth(2).unwrap();
        assert_eq!(last, format!("SGD:S000000001{}", ",".repeat(12)));
    }

    #[test]
    fn round_trip_same_rows() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("genes.csv");
        let table = sample_table();
        write_table(&table, &path).unwrap();

        let loaded = read_table(&path).unwrap();
        assert_eq!(loaded.rows(), table.rows());
        assert_eq!(loaded.keys().collect::<Vec<_>>(), table.keys().collect::<Vec<_>>());
    }

    #[test]
    fn import_is_header_driven() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("reordered.csv");
        fs::write(
            &path,
            "symbol,extra,id,start\nADH1,ignored,SGD:S000005446,159604\nPAU8,,SGD:S000000001,\n",
        )
        .unwrap();

        let table = read_table(&path).unwrap();
        assert_eq!(table.len(), 2);
        let adh = table.get("SGD:S000005446").unwrap();
        assert_eq!(adh.symbol.as_deref(), Some("ADH1"));
        assert_eq!(adh.start, Some(159604));
        assert!(adh.end.is_none());
        assert!(adh.uniprot_id.is_none());
        assert!(table.get("SGD:S000000001").unwrap().start.is_none());
    }

    #[test]
    fn import_accepts_float_coordinates() {
        // pandas writes integer columns containing nulls as floats
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("pandas.csv");
        let mut csv = COLUMNS.join(",");
        csv.push_str("\nSGD:S000005446,ADH1,alcohol dehydrogenase ADH1,ADC1,,,XV,159604.0,160650.0,-,P00330,desc,\n");
        csv.push_str("SGD:S000000001,PAU8,,,,,I,,,,,,\n");
        fs::write(&path, csv).unwrap();

        let table = read_table(&path).unwrap();
        let adh = table.get("SGD:S000005446").unwrap();
        assert_eq!(adh.start, Some(159604));
        assert_eq!(adh.end, Some(160650));
        assert_eq!(adh.strand.as_deref(), Some("-"));
        assert!(table.get("SGD:S000000001").unwrap().start.is_none());
    }

    #[test]
    fn import_rejects_fractional_coordinate() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("frac.csv");
        fs::write(&path, "id,start\nSGD:1,12.5\n").unwrap();

        let err = read_table(&path).unwrap_err();
        assert!(matches!(err, GeneError::Csv(_)));
    }

    #[test]
    fn import_rejects_row_without_id() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("noid.csv");
        fs::write(&path, "id,symbol\n,ADH1\n").unwrap();

        let err = read_table(&path).unwrap_err();
        assert!(matches!(err, GeneError::Parse(_)));
    }

    #[test]
    fn import_rejects_non_numeric_coordinate() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("bad.csv");
        fs::write(&path, "id,start\nSGD:1,abc\n").unwrap();

        let err = read_table(&path).unwrap_err();
        assert!(matches!(err, GeneError::Csv(_)));
    }

    #[test]
    fn import_missing_file_is_io_error() {
        let dir = TempDir::new().unwrap();
        let err = read_table(&dir.path().join("nope.csv")).unwrap_err();
        assert!(matches!(err, GeneError::Io(_)));
    }

    struct OneGene;

    impl GeneSource for OneGene {
        fn list_gene_ids(&self, _: &str, _: u32, _: u32) -> Result<GenePage, GeneError> {
            Ok(GenePage {
                ids: vec!["SGD:S000005446".to_string()],
                total: Some(1),
            })
        }

        fn fetch_gene(&self, _: &str) -> Result<GeneRecord, GeneError> {
            Ok(adh1())
        }
    }

    #[test]
    fn export_writes_dated_file() {
        let dir = TempDir::new().unwrap();
        let config = Config {
            output_dir: dir.path().join("out"),
            ..Default::default()
        };
        let date = NaiveDate::from_ymd_opt(2025, 1, 15).unwrap();

        let summary =
            export_gene_table(&OneGene, &config, date, &ProgressContext::hidden()).unwrap();
        assert_eq!(
            summary.path,
            dir.path().join("out/SGD_S288C_gene_table_2025-01-15.csv")
        );
        assert_eq!(summary.rows, 1);
        assert_eq!(summary.build.fetched, 1);

        let loaded = read_table(&summary.path).unwrap();
        assert_eq!(loaded.get("SGD:S000005446"), Some(&adh1()));
    }
}
