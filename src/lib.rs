//! # snplog
//!
//! A library for reconciling the per-site mutation logs produced by genome
//! simulation and variant-calling pipelines.
//!
//! Simulators that thread a genome through successive mutation passes emit one
//! SNP log per branch, each expressed in its own coordinate system. Downstream
//! callers then emit an observed log against the final sequence. Scoring and
//! combining these logs requires translating positions across indels, composing
//! overlapping per-site edits, and accounting for diploid allele copies.
//!
//! `snplog` implements the three reconciliation passes as forward single-pass
//! merges over per-scaffold, position-sorted records:
//!
//! - **merge**: remap a second branch's SNP log into the first branch's
//!   coordinates across the intervening indel log, dropping sites that fall
//!   inside inserted sequence and composing edits at shared sites
//! - **compare**: score an observed log against the expected (ground-truth)
//!   log as a confusion matrix with diploid allele-copy accounting
//! - **diploidize**: collapse two haploid logs into one log of IUPAC
//!   degenerate ambiguity codes
//!
//! ## Example
//!
//! ```rust
//! use snplog::core::AlleleCode;
//! use snplog::engine::{CoordinateMap, Placement};
//! use snplog::parsing::indel::{IndelEvent, IndelKind};
//!
//! // A 3 bp insertion at position 49 shifts everything after it right by 3.
//! let events = vec![IndelEvent {
//!     scaffold: "scaf_1".to_string(),
//!     position: 49,
//!     kind: IndelKind::Insertion,
//!     size: 3,
//! }];
//! let map = CoordinateMap::from_events(&events);
//!
//! let mut cursor = map.cursor("scaf_1");
//! assert_eq!(cursor.locate(20), Placement::Mapped(20));
//! assert_eq!(cursor.locate(51), Placement::InsideInsertion);
//! assert_eq!(cursor.locate(103), Placement::Mapped(100));
//!
//! // The two alleles of an A/G het collapse to the ambiguity code R.
//! assert_eq!(AlleleCode::degenerate(AlleleCode::A, AlleleCode::G), AlleleCode::R);
//! ```
//!
//! ## Modules
//!
//! - [`core`]: Core data types for alleles, records, and logs
//! - [`engine`]: Coordinate translation, merging, diffing, and diploidization
//! - [`parsing`]: Parsers for SNP logs, indel logs, and FASTA indexes
//! - [`cli`]: Command-line interface implementation

pub mod cli;
pub mod core;
pub mod engine;
pub mod parsing;

pub use crate::core::{AlleleCode, RawVariantLog, RawVariantRecord, VariantLog, VariantRecord};
pub use crate::engine::{CoordinateMap, DiffEngine, DiffReport, DiploidizeEngine, MergeEngine};
pub use crate::parsing::fai::ScaffoldIndex;
pub use crate::parsing::ParseError;
