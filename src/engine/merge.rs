//! Merge a second branch's mutation log into a first branch's coordinate
//! space, transitively composing overlapping edits.
//!
//! Branch 1 records are already in source coordinates; branch 2 records live
//! in the coordinate space the same indel history produced. Each branch 2
//! position is translated back through the [`CoordinateMap`], records that
//! fall strictly inside a branch-mismatched insertion are dropped, and edits
//! landing on a shared site are reduced to one net edit (branch 1's reference
//! allele, branch 2's called allele).

use tracing::{debug, warn};

use crate::core::{VariantLog, VariantRecord};
use crate::engine::coords::{CoordinateMap, Placement};

/// Forward single-pass merge of two per-scaffold record sequences.
pub struct MergeEngine<'a> {
    map: &'a CoordinateMap,
}

impl<'a> MergeEngine<'a> {
    #[must_use]
    pub fn new(map: &'a CoordinateMap) -> Self {
        Self { map }
    }

    /// Merge one scaffold's record sequences into source coordinates.
    ///
    /// Output is position-ascending and contains every branch-1-exclusive,
    /// branch-2-exclusive, and transitively reduced shared edit exactly once.
    /// Both cursors are created here per call, so scaffold switches cannot
    /// leak state between passes.
    #[must_use]
    pub fn merge_scaffold(
        &self,
        scaffold: &str,
        branch1: &[VariantRecord],
        branch2: &[VariantRecord],
    ) -> Vec<VariantRecord> {
        let mut cursor = self.map.cursor(scaffold);
        let mut merged = Vec::with_capacity(branch1.len() + branch2.len());
        let mut b1 = 0usize;

        for record in branch2 {
            let adjusted = match cursor.locate(record.position) {
                Placement::InsideInsertion => {
                    debug!(
                        scaffold,
                        position = record.position,
                        "branch 2 mutation lies within a branch 1 insertion; dropping"
                    );
                    continue;
                }
                Placement::Mapped(position) => position,
            };

            // Branch 1-exclusive edits upstream of this site pass through verbatim
            while b1 < branch1.len() && branch1[b1].position < adjusted {
                merged.push(branch1[b1]);
                b1 += 1;
            }

            if b1 < branch1.len() && branch1[b1].position == adjusted {
                // Overlapping edit: reduce the chain to branch 1's reference
                // and branch 2's final call
                let first = branch1[b1];
                if first.called_allele != record.ref_allele {
                    warn!(
                        scaffold,
                        position = adjusted,
                        branch1 = %format!("{}->{}", first.ref_allele, first.called_allele),
                        branch2 = %format!("{}->{}", record.ref_allele, record.called_allele),
                        "allele mismatch during transitive reduction"
                    );
                }
                merged.push(VariantRecord::new(
                    adjusted,
                    first.ref_allele,
                    record.called_allele,
                ));
                b1 += 1;
            } else {
                merged.push(VariantRecord::new(
                    adjusted,
                    record.ref_allele,
                    record.called_allele,
                ));
            }
        }

        // Branch 2 exhausted: the rest of branch 1 passes through verbatim
        merged.extend_from_slice(&branch1[b1..]);
        merged
    }

    /// Merge every scaffold of both logs, visiting scaffolds in the given
    /// index order.
    #[must_use]
    pub fn merge_logs(
        &self,
        scaffolds: impl Iterator<Item = impl AsRef<str>>,
        branch1: &VariantLog,
        branch2: &VariantLog,
    ) -> Vec<(String, Vec<VariantRecord>)> {
        let mut output = Vec::new();
        for scaffold in scaffolds {
            let scaffold = scaffold.as_ref();
            let records =
                self.merge_scaffold(scaffold, branch1.get(scaffold), branch2.get(scaffold));
            if !records.is_empty() {
                output.push((scaffold.to_string(), records));
            }
        }
        output
    }
}
