//! Core data types for mutation-log reconciliation.
//!
//! - [`AlleleCode`]: closed enumeration over the eleven allele symbols with
//!   total symbol conversions, decomposition into haploid base pairs, and
//!   diploid degeneracy
//! - [`VariantRecord`] / [`VariantLog`]: decoded per-site calls keyed by
//!   scaffold
//! - [`RawVariantRecord`] / [`RawVariantLog`]: the same shape with allele
//!   strings kept verbatim, for logs that may contain indel alleles
//!
//! All tables are built once by the loaders in [`crate::parsing`] and then
//! only read by the engines.

pub mod allele;
pub mod record;

pub use allele::AlleleCode;
pub use record::{RawVariantLog, RawVariantRecord, UncallableSites, VariantLog, VariantRecord};
