//! Ordered gene table keyed by gene identifier

use std::collections::HashMap;

use crate::transform::GeneRecord;

/// Gene records in insertion order, keyed by gene identifier.
///
/// Re-inserting a key overwrites the earlier record in place, so the row
/// keeps the position of its first appearance.
#[derive(Debug, Clone, Default)]
pub struct GeneTable {
    rows: Vec<GeneRecord>,
    keys: Vec<String>,
    index: HashMap<String, usize>,
}

impl GeneTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            rows: Vec::with_capacity(capacity),
            keys: Vec::with_capacity(capacity),
            index: HashMap::with_capacity(capacity),
        }
    }

    /// Insert or overwrite by key. Returns the replaced record, if any.
    pub fn insert(&mut self, key: impl Into<String>, record: GeneRecord) -> Option<GeneRecord> {
        let key = key.into();
        if let Some(&pos) = self.index.get(&key) {
            log::debug!("{key}: duplicate gene id, overwriting earlier row");
            return Some(std::mem::replace(&mut self.rows[pos], record));
        }
        self.index.insert(key.clone(), self.rows.len());
        self.keys.push(key);
        self.rows.push(record);
        None
    }

    pub fn get(&self, key: &str) -> Option<&GeneRecord> {
        self.index.get(key).map(|&pos| &self.rows[pos])
    }

    /// First row whose symbol matches, ignoring ASCII case
    pub fn find_by_symbol(&self, symbol: &str) -> Option<&GeneRecord> {
        self.rows.iter().find(|r| {
            r.symbol
                .as_deref()
                .is_some_and(|s| s.eq_ignore_ascii_case(symbol))
        })
    }

    /// Look up by gene id, falling back to symbol
    pub fn lookup(&self, id_or_symbol: &str) -> Option<&GeneRecord> {
        self.get(id_or_symbol)
            .or_else(|| self.find_by_symbol(id_or_symbol))
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Keys in row order
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.keys.iter().map(String::as_str)
    }

    /// Rows in order
    pub fn iter(&self) -> std::slice::Iter<'_, GeneRecord> {
        self.rows.iter()
    }

    pub fn rows(&self) -> &[GeneRecord] {
        &self.rows
    }
}

impl<'a> IntoIterator for &'a GeneTable {
    type Item = &'a GeneRecord;
    type IntoIter = std::slice::Iter<'a, GeneRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gene(id: &str, symbol: &str) -> GeneRecord {
        GeneRecord {
            id: Some(id.to_string()),
            symbol: Some(symbol.to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn keeps_insertion_order() {
        let mut table = GeneTable::new();
        table.insert("SGD:3", gene("SGD:3", "C"));
        table.insert("SGD:1", gene("SGD:1", "A"));
        table.insert("SGD:2", gene("SGD:2", "B"));
        let keys: Vec<&str> = table.keys().collect();
        assert_eq!(keys, ["SGD:3", "SGD:1", "SGD:2"]);
        assert_eq!(table.len(), 3);
    }

    #[test]
    fn duplicate_key_overwrites_in_place() {
        let mut table = GeneTable::new();
        table.insert("SGD:1", gene("SGD:1", "OLD"));
        table.insert("SGD:2", gene("SGD:2", "B"));
        let replaced = table.insert("SGD:1", gene("SGD:1", "NEW"));

        assert_eq!(replaced.unwrap().symbol.as_deref(), Some("OLD"));
        assert_eq!(table.len(), 2);
        assert_eq!(table.rows()[0].symbol.as_deref(), Some("NEW"));
        assert_eq!(table.get("SGD:1").unwrap().symbol.as_deref(), Some("NEW"));
    }

    #[test]
    fn lookup_by_id_then_symbol() {
        let mut table = GeneTable::new();
        table.insert("SGD:S000005446", gene("SGD:S000005446", "ADH1"));
        assert!(table.lookup("SGD:S000005446").is_some());
        assert_eq!(
            table.lookup("adh1").unwrap().id.as_deref(),
            Some("SGD:S000005446")
        );
        assert!(table.lookup("ADH2").is_none());
    }

    #[test]
    fn empty_table() {
        let table = GeneTable::new();
        assert!(table.is_empty());
        assert!(table.get("x").is_none());
        assert_eq!(table.iter().count(), 0);
    }
}
