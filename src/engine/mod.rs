//! The three reconciliation engines and their shared coordinate machinery.
//!
//! All three are instances of one pattern: a forward, single-pass merge of
//! per-scaffold, position-sorted record sequences with a reconciliation
//! policy applied at each alignment step.
//!
//! - [`coords`]: indel-aware coordinate translation
//! - [`merge`]: remap one branch's log into another's coordinate space with
//!   transitive reduction of overlapping edits
//! - [`diff`]: confusion-matrix classification of observed calls against
//!   ground truth
//! - [`diploid`]: degenerate-code combination of two haploid logs

pub mod coords;
pub mod diff;
pub mod diploid;
pub mod merge;

pub use coords::{Breakpoint, BreakpointCursor, CoordinateMap, Placement};
pub use diff::{ConfusionCounters, DetailWriters, DiffEngine, DiffReport};
pub use diploid::DiploidizeEngine;
pub use merge::MergeEngine;
