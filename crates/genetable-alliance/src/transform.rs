//! Gene transformation: Alliance gene JSON → flat `GeneRecord`

use serde::{Deserialize, Deserializer, Serialize};

use crate::schema::{SYNONYM_COLUMNS, UNIPROT_MARKER};

// === Payload structs (deserialized from JSON) ===

/// Alliance `/api/gene/{id}` JSON structure (only the consumed fields).
///
/// Every field tolerates being absent or `null`.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GenePayload {
    pub id: Option<String>,
    pub symbol: Option<String>,
    pub name: Option<String>,
    pub synonyms: Option<Vec<Synonym>>,
    pub genome_locations: Option<Vec<GenomeLocation>>,
    pub cross_reference_map: Option<CrossReferenceMap>,
    pub gene_synopsis: Option<String>,
    pub automated_gene_synopsis: Option<String>,
}

/// Synonym entry: plain string, or an object carrying the display text.
/// Anything else (`null`, numbers) is kept as an empty slot.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum Synonym {
    Text(String),
    Entry(SynonymEntry),
    Other(serde::de::IgnoredAny),
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SynonymEntry {
    pub display_text: Option<String>,
    pub name: Option<String>,
}

impl Synonym {
    pub fn text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            Self::Entry(e) => e.display_text.as_deref().or(e.name.as_deref()),
            Self::Other(_) => None,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct GenomeLocation {
    pub chromosome: Option<String>,
    #[serde(deserialize_with = "lenient_u64")]
    pub start: Option<u64>,
    #[serde(deserialize_with = "lenient_u64")]
    pub end: Option<u64>,
    pub strand: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct CrossReferenceMap {
    pub other: Option<Vec<CrossReference>>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct CrossReference {
    pub name: Option<String>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum NumOrText {
    Num(u64),
    Float(f64),
    Text(String),
}

/// Whole, non-negative floats only (`159604.0`, as pandas writes int columns with gaps)
fn integral(f: f64) -> Option<u64> {
    (f.is_finite() && f >= 0.0 && f.fract() == 0.0 && f <= u64::MAX as f64).then_some(f as u64)
}

/// Coordinates as integers, integral floats or numeric strings of either.
///
/// Shared by the JSON payload and the CSV import path.
fn lenient_u64<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error;

    match Option::<NumOrText>::deserialize(deserializer)? {
        None => Ok(None),
        Some(NumOrText::Num(n)) => Ok(Some(n)),
        Some(NumOrText::Float(f)) => integral(f)
            .map(Some)
            .ok_or_else(|| D::Error::custom(format!("bad coordinate {f}"))),
        Some(NumOrText::Text(s)) => {
            let s = s.trim();
            if s.is_empty() {
                return Ok(None);
            }
            s.parse::<u64>()
                .ok()
                .or_else(|| s.parse::<f64>().ok().and_then(integral))
                .map(Some)
                .ok_or_else(|| D::Error::custom(format!("bad coordinate {s:?}")))
        }
    }
}

impl GenePayload {
    fn synonym(&self, idx: usize) -> Option<String> {
        self.synonyms
            .as_ref()
            .and_then(|list| list.get(idx))
            .and_then(Synonym::text)
            .map(str::to_string)
    }

    /// First genome location only; later ones are ignored
    pub fn primary_location(&self) -> Option<&GenomeLocation> {
        self.genome_locations.as_ref().and_then(|locs| locs.first())
    }

    /// Accession of the first `UniProtKB` cross-reference (`UniProtKB:P00330` → `P00330`)
    pub fn uniprot_id(&self) -> Option<String> {
        let refs = self.cross_reference_map.as_ref()?.other.as_ref()?;
        refs.iter()
            .filter_map(|r| r.name.as_deref())
            .find(|name| name.contains(UNIPROT_MARKER))
            .and_then(|name| name.rsplit(':').next())
            .map(str::to_string)
    }
}

// === Flat record ===

/// One row of the gene table. Field order is the CSV column order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GeneRecord {
    pub id: Option<String>,
    pub symbol: Option<String>,
    pub name: Option<String>,
    pub synonym1: Option<String>,
    pub synonym2: Option<String>,
    pub synonym3: Option<String>,
    pub chromosome: Option<String>,
    #[serde(deserialize_with = "lenient_u64")]
    pub start: Option<u64>,
    #[serde(deserialize_with = "lenient_u64")]
    pub end: Option<u64>,
    pub strand: Option<String>,
    #[serde(rename = "uniprotID")]
    pub uniprot_id: Option<String>,
    pub gene_description: Option<String>,
    pub gene_description_auto: Option<String>,
}

impl GeneRecord {
    /// Flatten a gene payload. `requested_id` fills `id` when the payload omits it.
    pub fn from_payload(payload: GenePayload, requested_id: &str) -> Self {
        let [synonym1, synonym2, synonym3]: [Option<String>; SYNONYM_COLUMNS] =
            std::array::from_fn(|i| payload.synonym(i));
        let uniprot_id = payload.uniprot_id();
        let (chromosome, start, end, strand) = match payload.primary_location() {
            Some(loc) => (loc.chromosome.clone(), loc.start, loc.end, loc.strand.clone()),
            None => (None, None, None, None),
        };

        Self {
            id: payload.id.or_else(|| Some(requested_id.to_string())),
            symbol: payload.symbol,
            name: payload.name,
            synonym1,
            synonym2,
            synonym3,
            chromosome,
            start,
            end,
            strand,
            uniprot_id,
            gene_description: payload.gene_synopsis,
            gene_description_auto: payload.automated_gene_synopsis,
        }
    }

    /// Row for a gene that could not be fetched: id only, everything else null
    pub fn placeholder(gene_id: &str) -> Self {
        Self {
            id: Some(gene_id.to_string()),
            ..Default::default()
        }
    }

    /// (column, value) pairs in column order, numbers rendered as text
    pub fn fields(&self) -> Vec<(&'static str, Option<String>)> {
        vec![
            ("id", self.id.clone()),
            ("symbol", self.symbol.clone()),
            ("name", self.name.clone()),
            ("synonym1", self.synonym1.clone()),
            ("synonym2", self.synonym2.clone()),
            ("synonym3", self.synonym3.clone()),
            ("chromosome", self.chromosome.clone()),
            ("start", self.start.map(|n| n.to_string())),
            ("end", self.end.map(|n| n.to_string())),
            ("strand", self.strand.clone()),
            ("uniprotID", self.uniprot_id.clone()),
            ("geneDescription", self.gene_description.clone()),
            ("geneDescriptionAuto", self.gene_description_auto.clone()),
        ]
    }
}
