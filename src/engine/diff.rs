//! Diff an expected (ground-truth) mutation log against an observed (called)
//! log.
//!
//! Every position appearing in either log is classified into exactly one
//! confusion-matrix bucket by a forward two-cursor merge per scaffold, with
//! diploid accounting: simple cases contribute 2 allele-copy units, and
//! genuinely wrong calls are decomposed into their constituent haploid bases
//! so partial credit lands in the right buckets. Classified records can be
//! appended to up to four categorized detail logs.

use std::io::{self, Write};

use serde::Serialize;
use tracing::warn;

use crate::core::{
    AlleleCode, RawVariantLog, RawVariantRecord, UncallableSites, VariantLog, VariantRecord,
};
use crate::parsing::fai::ScaffoldIndex;

/// Genome-wide classification tallies.
///
/// The TP/FP/FN/TN/wrong totals are in doubled allele-copy units; the
/// sub-bucket counters count sites. TN is signed because it is derived by
/// subtraction from scaffold lengths.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ConfusionCounters {
    pub true_positives: u64,
    pub false_positives: u64,
    pub false_negatives: u64,
    pub wrong_calls: u64,
    pub true_negatives: i64,

    /// Single-base masked (N) observed calls
    pub masked_bases: u64,
    /// Observed records with a multi-character allele field
    pub indel_sites: u64,

    /// Matching heterozygous calls
    pub het_matches: u64,
    /// Matching homozygous-alt calls
    pub alt_matches: u64,

    // Mismatch sites, named call-type then truth-type
    pub ref_call_het_truth: u64,
    pub ref_call_alt_truth: u64,
    pub het_call_ref_truth: u64,
    pub het_call_het_truth: u64,
    pub het_call_alt_truth: u64,
    pub alt_call_ref_truth: u64,
    pub alt_call_het_truth: u64,
    pub alt_call_alt_truth: u64,

    // Masked sites by truth type
    pub masked_ref_truth: u64,
    pub masked_het_truth: u64,
    pub masked_alt_truth: u64,

    // Indel-masked sites by truth type
    pub indel_ref_truth: u64,
    pub indel_het_truth: u64,
    pub indel_alt_truth: u64,
}

impl ConfusionCounters {
    /// Sites where the observed call was hom-ref (the truth was not)
    #[must_use]
    pub fn ref_call_mismatches(&self) -> u64 {
        self.ref_call_het_truth + self.ref_call_alt_truth
    }

    /// Sites where the observed call was heterozygous and wrong
    #[must_use]
    pub fn het_call_mismatches(&self) -> u64 {
        self.het_call_ref_truth + self.het_call_het_truth + self.het_call_alt_truth
    }

    /// Sites where the observed call was homozygous-alt and wrong
    #[must_use]
    pub fn alt_call_mismatches(&self) -> u64 {
        self.alt_call_ref_truth + self.alt_call_het_truth + self.alt_call_alt_truth
    }

    #[must_use]
    pub fn total_mismatches(&self) -> u64 {
        self.ref_call_mismatches() + self.het_call_mismatches() + self.alt_call_mismatches()
    }

    /// Hom-ref match count is derived, not tallied: everything in the genome
    /// not otherwise accounted for matched the reference.
    #[must_use]
    pub fn ref_matches(&self, genome_size: u64) -> i64 {
        genome_size as i64
            - self.indel_sites as i64
            - self.masked_bases as i64
            - self.total_mismatches() as i64
            - self.het_matches as i64
            - self.alt_matches as i64
    }
}

/// Per-scaffold running totals, folded into the genome-wide counters at the
/// end of each scaffold pass.
#[derive(Debug, Default)]
struct ScaffoldTally {
    tp: u64,
    fp: u64,
    fns: u64,
    wrong: u64,
}

/// Optional sinks for the four categorized detail logs.
pub struct DetailWriters {
    pub false_negatives: Option<Box<dyn Write>>,
    pub false_positives: Option<Box<dyn Write>>,
    pub true_positives: Option<Box<dyn Write>>,
    pub wrong_calls: Option<Box<dyn Write>>,
}

impl DetailWriters {
    #[must_use]
    pub fn none() -> Self {
        Self {
            false_negatives: None,
            false_positives: None,
            true_positives: None,
            wrong_calls: None,
        }
    }

    /// Flush all configured sinks.
    pub fn flush(&mut self) -> io::Result<()> {
        for sink in [
            &mut self.false_negatives,
            &mut self.false_positives,
            &mut self.true_positives,
            &mut self.wrong_calls,
        ]
        .into_iter()
        .flatten()
        {
            sink.flush()?;
        }
        Ok(())
    }
}

/// Case-insensitive agreement between a verbatim single-base ref field and
/// the decoded expected reference.
fn refs_agree(observed_ref: &str, expected_ref: AlleleCode) -> bool {
    observed_ref.chars().next().map(|c| c.to_ascii_uppercase()) == Some(expected_ref.symbol())
}

fn emit(
    sink: &mut Option<Box<dyn Write>>,
    scaffold: &str,
    position: i64,
    ref_field: &str,
    called_field: &str,
) -> io::Result<()> {
    if let Some(sink) = sink {
        writeln!(sink, "{scaffold}\t{position}\t{ref_field}\t{called_field}")?;
    }
    Ok(())
}

/// Classifies observed calls against expected truth, scaffold by scaffold in
/// index order.
pub struct DiffEngine<'a> {
    index: &'a ScaffoldIndex,
    uncallable: &'a UncallableSites,
    writers: DetailWriters,
}

impl<'a> DiffEngine<'a> {
    #[must_use]
    pub fn new(
        index: &'a ScaffoldIndex,
        uncallable: &'a UncallableSites,
        writers: DetailWriters,
    ) -> Self {
        Self {
            index,
            uncallable,
            writers,
        }
    }

    /// Run the full comparison.
    ///
    /// # Errors
    ///
    /// Returns `io::Error` if writing to a configured detail log fails.
    pub fn compare(
        &mut self,
        expected: &VariantLog,
        observed: &RawVariantLog,
    ) -> io::Result<ConfusionCounters> {
        for scaffold in expected.scaffolds().chain(observed.scaffolds()) {
            if !self.index.contains(scaffold) {
                warn!(scaffold, "mutation log scaffold missing from the index; skipping");
            }
        }

        let mut counters = ConfusionCounters::default();

        for scaffold in self.index.iter() {
            let name = scaffold.name.as_str();
            let exp = expected.get(name);
            let obs = observed.get(name);
            let mut tally = ScaffoldTally::default();

            let mut e = 0usize;
            let mut o = 0usize;
            while e < exp.len() && o < obs.len() {
                match exp[e].position.cmp(&obs[o].position) {
                    std::cmp::Ordering::Less => {
                        self.expected_only(name, &exp[e], &mut counters, &mut tally)?;
                        e += 1;
                    }
                    std::cmp::Ordering::Greater => {
                        self.observed_only(name, &obs[o], &mut counters, &mut tally)?;
                        o += 1;
                    }
                    std::cmp::Ordering::Equal => {
                        self.shared(name, &exp[e], &obs[o], &mut counters, &mut tally)?;
                        e += 1;
                        o += 1;
                    }
                }
            }
            while e < exp.len() {
                self.expected_only(name, &exp[e], &mut counters, &mut tally)?;
                e += 1;
            }
            while o < obs.len() {
                self.observed_only(name, &obs[o], &mut counters, &mut tally)?;
                o += 1;
            }

            counters.true_positives += tally.tp;
            counters.false_positives += tally.fp;
            counters.false_negatives += tally.fns;
            counters.wrong_calls += tally.wrong;
            counters.true_negatives += 2 * scaffold.length as i64
                - (tally.tp + tally.fns + tally.wrong + tally.fp) as i64;
        }

        // Uncallable sites are excluded from every bucket, TN included
        counters.true_negatives -= 2 * self.uncallable.len() as i64;

        self.writers.flush()?;
        Ok(counters)
    }

    /// Truth has a call here and the observed log does not: false negative.
    fn expected_only(
        &mut self,
        scaffold: &str,
        record: &VariantRecord,
        counters: &mut ConfusionCounters,
        tally: &mut ScaffoldTally,
    ) -> io::Result<()> {
        if record.called_allele.is_het() {
            counters.ref_call_het_truth += 1;
        } else {
            counters.ref_call_alt_truth += 1;
        }
        tally.fns += 2;
        emit(
            &mut self.writers.false_negatives,
            scaffold,
            record.position,
            &record.ref_allele.to_string(),
            &record.called_allele.to_string(),
        )
    }

    /// The observed log calls a site the truth does not mention. Indel and
    /// masked records only feed the masking tallies; anything else is a false
    /// positive unless the site is depth-uncallable.
    fn observed_only(
        &mut self,
        scaffold: &str,
        record: &RawVariantRecord,
        counters: &mut ConfusionCounters,
        tally: &mut ScaffoldTally,
    ) -> io::Result<()> {
        if record.is_indel() {
            counters.indel_sites += 1;
            counters.indel_ref_truth += 1;
            return Ok(());
        }
        let code = record.called_code();
        if code == AlleleCode::N {
            counters.masked_bases += 1;
            counters.masked_ref_truth += 1;
            return Ok(());
        }
        if code.is_het() {
            counters.het_call_ref_truth += 1;
        } else {
            counters.alt_call_ref_truth += 1;
        }
        if self
            .uncallable
            .contains(&(scaffold.to_string(), record.position))
        {
            return Ok(());
        }
        tally.fp += 2;
        emit(
            &mut self.writers.false_positives,
            scaffold,
            record.position,
            &record.ref_allele,
            &record.called_allele,
        )
    }

    /// Both logs call this site.
    fn shared(
        &mut self,
        scaffold: &str,
        expected: &VariantRecord,
        observed: &RawVariantRecord,
        counters: &mut ConfusionCounters,
        tally: &mut ScaffoldTally,
    ) -> io::Result<()> {
        if !observed.is_indel() && !refs_agree(&observed.ref_allele, expected.ref_allele) {
            warn!(
                scaffold,
                position = expected.position,
                expected = %expected.ref_allele,
                observed = %observed.ref_allele,
                "reference alleles disagree between logs"
            );
        }

        let truth = expected.called_allele;
        let called = observed.called_code();

        if truth == called {
            if truth.is_het() {
                counters.het_matches += 1;
            } else {
                counters.alt_matches += 1;
            }
            tally.tp += 2;
            return emit(
                &mut self.writers.true_positives,
                scaffold,
                expected.position,
                &truth.to_string(),
                &observed.called_allele,
            );
        }

        if called == AlleleCode::N {
            // Masked call over a real variant: false negative
            if observed.is_indel() {
                counters.indel_sites += 1;
                if truth.is_het() {
                    counters.indel_het_truth += 1;
                } else {
                    counters.indel_alt_truth += 1;
                }
            } else {
                counters.masked_bases += 1;
                if truth.is_het() {
                    counters.masked_het_truth += 1;
                } else {
                    counters.masked_alt_truth += 1;
                }
            }
            tally.fns += 2;
            return emit(
                &mut self.writers.false_negatives,
                scaffold,
                expected.position,
                &expected.ref_allele.to_string(),
                &truth.to_string(),
            );
        }

        // A present call that is genuinely wrong: attribute each of the two
        // observed allele copies separately
        match (called.is_het(), truth.is_het()) {
            (true, true) => counters.het_call_het_truth += 1,
            (false, true) => counters.alt_call_het_truth += 1,
            (true, false) => counters.het_call_alt_truth += 1,
            (false, false) => counters.alt_call_alt_truth += 1,
        }

        let (x0, x1) = truth.split();
        let (y0, y1) = called.split();
        let reference = expected.ref_allele;

        if y0 == x0 || y0 == x1 || y1 == x0 || y1 == x1 {
            // One observed copy matches truth; score the other copy
            tally.tp += 1;
            let unmatched = if y0 == x0 || y0 == x1 { y1 } else { y0 };
            if unmatched == reference {
                tally.fns += 1;
            } else {
                tally.wrong += 1;
            }
        } else if y0 == reference || y1 == reference {
            tally.fns += 1;
            tally.wrong += 1;
        } else {
            tally.wrong += 2;
        }

        emit(
            &mut self.writers.wrong_calls,
            scaffold,
            expected.position,
            &truth.to_string(),
            &observed.called_allele,
        )
    }
}

/// The fixed-format statistics report derived from the counters.
///
/// Counts are reported in per-site units (doubled tallies halved); rates may
/// be non-finite when a denominator is empty.
#[derive(Debug, Serialize)]
pub struct DiffReport {
    pub true_positives: f64,
    pub false_positives: f64,
    pub true_negatives: f64,
    pub false_negatives: f64,
    pub wrong_calls: f64,

    pub false_positive_rate: f64,
    pub false_negative_rate: f64,
    pub fnr_including_wrong: f64,
    pub wrong_call_rate: f64,
    pub sensitivity: f64,
    pub specificity: f64,
    pub false_discovery_rate: f64,

    pub masked: u64,
    pub indel_sites: u64,
    pub hom_ref_calls: i64,
    pub het_calls: u64,
    pub hom_alt_calls: u64,

    pub hom_ref_matches: i64,
    pub het_matches: u64,
    pub hom_alt_matches: u64,

    pub het_called_ref: u64,
    pub alt_called_ref: u64,
    pub ref_called_het: u64,
    pub het_called_other_het: u64,
    pub alt_called_het: u64,
    pub ref_called_alt: u64,
    pub het_called_alt: u64,
    pub alt_called_other_alt: u64,

    pub masked_ref: u64,
    pub masked_het: u64,
    pub masked_alt: u64,

    pub indel_masked_ref: u64,
    pub indel_masked_het: u64,
    pub indel_masked_alt: u64,
}

impl DiffReport {
    #[must_use]
    #[allow(clippy::cast_precision_loss)] // tallies are far below 2^52
    pub fn from_counters(counters: &ConfusionCounters, genome_size: u64) -> Self {
        let tp = counters.true_positives as f64;
        let fp = counters.false_positives as f64;
        let tn = counters.true_negatives as f64;
        let fns = counters.false_negatives as f64;
        let wrong = counters.wrong_calls as f64;
        let ref_matches = counters.ref_matches(genome_size);

        Self {
            true_positives: tp / 2.0,
            false_positives: fp / 2.0,
            true_negatives: tn / 2.0,
            false_negatives: fns / 2.0,
            wrong_calls: wrong / 2.0,

            false_positive_rate: fp / (fp + tn),
            false_negative_rate: fns / (fns + tp),
            fnr_including_wrong: (fns + wrong) / (fns + wrong + tp),
            wrong_call_rate: wrong / (wrong + tp + fp),
            sensitivity: tp / (tp + fns),
            specificity: tn / (tn + fp),
            false_discovery_rate: fp / (tp + fp),

            masked: counters.masked_bases,
            indel_sites: counters.indel_sites,
            hom_ref_calls: ref_matches + counters.ref_call_mismatches() as i64,
            het_calls: counters.het_matches + counters.het_call_mismatches(),
            hom_alt_calls: counters.alt_matches + counters.alt_call_mismatches(),

            hom_ref_matches: ref_matches,
            het_matches: counters.het_matches,
            hom_alt_matches: counters.alt_matches,

            het_called_ref: counters.ref_call_het_truth,
            alt_called_ref: counters.ref_call_alt_truth,
            ref_called_het: counters.het_call_ref_truth,
            het_called_other_het: counters.het_call_het_truth,
            alt_called_het: counters.het_call_alt_truth,
            ref_called_alt: counters.alt_call_ref_truth,
            het_called_alt: counters.alt_call_het_truth,
            alt_called_other_alt: counters.alt_call_alt_truth,

            masked_ref: counters.masked_ref_truth,
            masked_het: counters.masked_het_truth,
            masked_alt: counters.masked_alt_truth,

            indel_masked_ref: counters.indel_ref_truth,
            indel_masked_het: counters.indel_het_truth,
            indel_masked_alt: counters.indel_alt_truth,
        }
    }

    /// Render the report in its fixed text format: named metric, tab, value.
    #[must_use]
    pub fn render_text(&self) -> String {
        fn line(out: &mut String, name: &str, value: impl ToString) {
            out.push_str(name);
            out.push('\t');
            out.push_str(&value.to_string());
            out.push('\n');
        }

        let mut out = String::new();
        line(&mut out, "True positives", self.true_positives);
        line(&mut out, "False positives", self.false_positives);
        line(&mut out, "True negatives", self.true_negatives);
        line(&mut out, "False negatives", self.false_negatives);
        line(&mut out, "Wrong calls", self.wrong_calls);
        line(&mut out, "FPR", self.false_positive_rate);
        line(&mut out, "FNR", self.false_negative_rate);
        line(&mut out, "FNR+wrong", self.fnr_including_wrong);
        line(
            &mut out,
            "Wrong call rate (wrong calls out of all calls)",
            self.wrong_call_rate,
        );
        line(&mut out, "Sensitivity", self.sensitivity);
        line(&mut out, "Specificity", self.specificity);
        line(&mut out, "FDR", self.false_discovery_rate);
        out.push_str("\nCall types:\n");
        line(&mut out, "Masked", self.masked);
        line(&mut out, "Indel site", self.indel_sites);
        line(&mut out, "Homozygous ref", self.hom_ref_calls);
        line(&mut out, "Heterozygous", self.het_calls);
        line(&mut out, "Homozygous alt", self.hom_alt_calls);
        out.push_str("\nMatches:\n");
        line(&mut out, "Homozygous ref", self.hom_ref_matches);
        line(&mut out, "Heterozygous", self.het_matches);
        line(&mut out, "Homozygous alt", self.hom_alt_matches);
        out.push_str("\nMismatches:\n");
        line(&mut out, "Het->RR", self.het_called_ref);
        line(&mut out, "Alt->RR", self.alt_called_ref);
        line(&mut out, "RR->Het", self.ref_called_het);
        line(&mut out, "Het->Other Het", self.het_called_other_het);
        line(&mut out, "Alt->Het", self.alt_called_het);
        line(&mut out, "RR->Alt", self.ref_called_alt);
        line(&mut out, "Het->Alt", self.het_called_alt);
        line(&mut out, "Alt->Other Alt", self.alt_called_other_alt);
        out.push_str("\nMasking:\n");
        line(&mut out, "RR->N", self.masked_ref);
        line(&mut out, "Het->N", self.masked_het);
        line(&mut out, "Alt->N", self.masked_alt);
        out.push_str("\nIndel Sites:\n");
        line(&mut out, "RR->Indel", self.indel_masked_ref);
        line(&mut out, "Het->Indel", self.indel_masked_het);
        line(&mut out, "Alt->Indel", self.indel_masked_alt);
        out
    }
}
