use std::collections::{HashMap, HashSet};

use crate::core::allele::AlleleCode;

/// One point-substitution call: 1-based position, reference allele, and the
/// allele called at that site.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VariantRecord {
    /// 1-based position on the scaffold
    pub position: i64,

    /// Reference allele
    pub ref_allele: AlleleCode,

    /// Called allele
    pub called_allele: AlleleCode,
}

impl VariantRecord {
    pub fn new(position: i64, ref_allele: AlleleCode, called_allele: AlleleCode) -> Self {
        Self {
            position,
            ref_allele,
            called_allele,
        }
    }
}

/// A call with its allele fields kept verbatim.
///
/// The observed log in `compare` may carry multi-character indel alleles that
/// must be recognized as such rather than collapsed to a single code at parse
/// time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawVariantRecord {
    /// 1-based position on the scaffold
    pub position: i64,

    /// Reference allele string, verbatim
    pub ref_allele: String,

    /// Called allele string, verbatim
    pub called_allele: String,
}

impl RawVariantRecord {
    pub fn new(
        position: i64,
        ref_allele: impl Into<String>,
        called_allele: impl Into<String>,
    ) -> Self {
        Self {
            position,
            ref_allele: ref_allele.into(),
            called_allele: called_allele.into(),
        }
    }

    /// True when either allele field spans more than one base.
    #[must_use]
    pub fn is_indel(&self) -> bool {
        self.ref_allele.len() > 1 || self.called_allele.len() > 1
    }

    /// The called allele decoded from its first symbol.
    #[must_use]
    pub fn called_code(&self) -> AlleleCode {
        AlleleCode::from_symbol(self.called_allele.chars().next().unwrap_or('N'))
    }
}

/// Sites excluded from every classification bucket because the expected log
/// reported sub-threshold sequencing depth there.
pub type UncallableSites = HashSet<(String, i64)>;

/// A mutation log: per-scaffold, position-sorted record sequences.
///
/// Built once by the loader and never mutated afterwards. Per-scaffold
/// sequences are assumed strictly increasing in position and duplicate-free;
/// that is the producer's invariant, not verified here.
#[derive(Debug, Default)]
pub struct VariantLog {
    order: Vec<String>,
    records: HashMap<String, Vec<VariantRecord>>,
}

impl VariantLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a record to a scaffold's sequence, registering the scaffold on
    /// first sight.
    pub fn push(&mut self, scaffold: &str, record: VariantRecord) {
        if !self.records.contains_key(scaffold) {
            self.order.push(scaffold.to_string());
        }
        self.records
            .entry(scaffold.to_string())
            .or_default()
            .push(record);
    }

    /// Records for a scaffold; empty for scaffolds the log never mentions.
    #[must_use]
    pub fn get(&self, scaffold: &str) -> &[VariantRecord] {
        self.records.get(scaffold).map_or(&[], Vec::as_slice)
    }

    #[must_use]
    pub fn contains_scaffold(&self, scaffold: &str) -> bool {
        self.records.contains_key(scaffold)
    }

    /// Scaffold names in order of first appearance in the source file.
    pub fn scaffolds(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(String::as_str)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// A mutation log with verbatim allele strings, same shape as [`VariantLog`].
#[derive(Debug, Default)]
pub struct RawVariantLog {
    order: Vec<String>,
    records: HashMap<String, Vec<RawVariantRecord>>,
}

impl RawVariantLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, scaffold: &str, record: RawVariantRecord) {
        if !self.records.contains_key(scaffold) {
            self.order.push(scaffold.to_string());
        }
        self.records
            .entry(scaffold.to_string())
            .or_default()
            .push(record);
    }

    #[must_use]
    pub fn get(&self, scaffold: &str) -> &[RawVariantRecord] {
        self.records.get(scaffold).map_or(&[], Vec::as_slice)
    }

    #[must_use]
    pub fn contains_scaffold(&self, scaffold: &str) -> bool {
        self.records.contains_key(scaffold)
    }

    pub fn scaffolds(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_preserves_appearance_order() {
        let mut log = VariantLog::new();
        log.push("chr2", VariantRecord::new(5, AlleleCode::A, AlleleCode::C));
        log.push("chr1", VariantRecord::new(1, AlleleCode::G, AlleleCode::T));
        log.push("chr2", VariantRecord::new(9, AlleleCode::T, AlleleCode::A));

        let order: Vec<&str> = log.scaffolds().collect();
        assert_eq!(order, vec!["chr2", "chr1"]);
        assert_eq!(log.get("chr2").len(), 2);
        assert_eq!(log.get("chr1").len(), 1);
        assert!(log.get("chr3").is_empty());
    }

    #[test]
    fn test_raw_record_indel_detection() {
        assert!(RawVariantRecord::new(10, "ACT", "A").is_indel());
        assert!(RawVariantRecord::new(10, "A", "AGG").is_indel());
        assert!(!RawVariantRecord::new(10, "A", "N").is_indel());
        assert_eq!(
            RawVariantRecord::new(10, "A", "M").called_code(),
            AlleleCode::M
        );
    }
}
