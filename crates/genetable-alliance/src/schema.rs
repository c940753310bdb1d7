//! Column layout of the exported gene table

/// CSV header, in export order. Must match the serde names on `GeneRecord`.
pub const COLUMNS: [&str; 13] = [
    "id",
    "symbol",
    "name",
    "synonym1",
    "synonym2",
    "synonym3",
    "chromosome",
    "start",
    "end",
    "strand",
    "uniprotID",
    "geneDescription",
    "geneDescriptionAuto",
];

/// Number of synonym columns kept per gene
pub const SYNONYM_COLUMNS: usize = 3;

/// Substring marking a UniProt cross-reference name (e.g. `UniProtKB:P00330`)
pub const UNIPROT_MARKER: &str = "UniProtKB";
