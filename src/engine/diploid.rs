//! Combine two haploid mutation logs into one diploid log.
//!
//! A two-cursor merge per scaffold pairs the haploid calls at each position
//! and collapses them to the degenerate diploid code. A position present in
//! only one haploid is treated as heterozygous against its own reference
//! allele.

use tracing::warn;

use crate::core::{AlleleCode, VariantLog, VariantRecord};

/// Forward single-pass combination of two haploid record sequences.
#[derive(Debug, Default)]
pub struct DiploidizeEngine;

impl DiploidizeEngine {
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Diploidize one scaffold's record sequences.
    #[must_use]
    pub fn diploidize_scaffold(
        &self,
        scaffold: &str,
        hap1: &[VariantRecord],
        hap2: &[VariantRecord],
    ) -> Vec<VariantRecord> {
        let mut merged = Vec::with_capacity(hap1.len().max(hap2.len()));
        let mut i = 0usize;
        let mut j = 0usize;

        while i < hap1.len() && j < hap2.len() {
            let a = hap1[i];
            let b = hap2[j];
            match a.position.cmp(&b.position) {
                std::cmp::Ordering::Less => {
                    merged.push(against_reference(a));
                    i += 1;
                }
                std::cmp::Ordering::Greater => {
                    merged.push(against_reference(b));
                    j += 1;
                }
                std::cmp::Ordering::Equal => {
                    if a.ref_allele != b.ref_allele {
                        warn!(
                            scaffold,
                            position = a.position,
                            hap1 = %a.ref_allele,
                            hap2 = %b.ref_allele,
                            "reference alleles disagree between haploids"
                        );
                    }
                    // Haploid 1's reference wins on disagreement
                    merged.push(VariantRecord::new(
                        a.position,
                        a.ref_allele,
                        AlleleCode::degenerate(a.called_allele, b.called_allele),
                    ));
                    i += 1;
                    j += 1;
                }
            }
        }
        for record in &hap1[i..] {
            merged.push(against_reference(*record));
        }
        for record in &hap2[j..] {
            merged.push(against_reference(*record));
        }

        merged
    }

    /// Diploidize every scaffold, visiting scaffolds in the given index order.
    #[must_use]
    pub fn diploidize_logs(
        &self,
        scaffolds: impl Iterator<Item = impl AsRef<str>>,
        hap1: &VariantLog,
        hap2: &VariantLog,
    ) -> Vec<(String, Vec<VariantRecord>)> {
        let mut output = Vec::new();
        for scaffold in scaffolds {
            let scaffold = scaffold.as_ref();
            let records =
                self.diploidize_scaffold(scaffold, hap1.get(scaffold), hap2.get(scaffold));
            if !records.is_empty() {
                output.push((scaffold.to_string(), records));
            }
        }
        output
    }
}

/// A site called in only one haploid is heterozygous against reference.
fn against_reference(record: VariantRecord) -> VariantRecord {
    VariantRecord::new(
        record.position,
        record.ref_allele,
        AlleleCode::degenerate(record.called_allele, record.ref_allele),
    )
}
