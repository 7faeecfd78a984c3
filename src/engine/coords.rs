//! Indel-aware coordinate translation.
//!
//! A [`CoordinateMap`] is built once from a branch's indel event log. Per
//! scaffold it holds a monotonic sequence of [`Breakpoint`]s: `(source,
//! target)` pairs whose running difference is the cumulative net offset all
//! indels up to that point introduced. A [`BreakpointCursor`] walks the
//! sequence forward as a merge pass consumes downstream-sorted positions,
//! translating each back into source coordinates or flagging it as lying
//! inside an insertion that has no stable source-side coordinate.

use std::collections::HashMap;

use crate::parsing::indel::IndelEvent;

/// One coordinate-space switch point: everything at or after `target` in the
/// downstream space, up to the next breakpoint, maps back by
/// `source - target`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Breakpoint {
    /// 1-based position in the source (pre-indel) coordinate space
    pub source: i64,
    /// The same position in the downstream (post-indel) space
    pub target: i64,
}

/// Per-scaffold breakpoint sequences; scaffolds with no indels are identity.
#[derive(Debug, Default)]
pub struct CoordinateMap {
    by_scaffold: HashMap<String, Vec<Breakpoint>>,
}

impl CoordinateMap {
    /// Build the map from indel events in log order.
    ///
    /// Every scaffold's sequence starts with an implicit `(0, 0)`; size-0
    /// events are skipped; insertions add their size to the running offset
    /// and deletions subtract it.
    #[must_use]
    pub fn from_events(events: &[IndelEvent]) -> Self {
        let mut by_scaffold: HashMap<String, Vec<Breakpoint>> = HashMap::new();
        let mut offsets: HashMap<String, i64> = HashMap::new();

        for event in events {
            let breakpoints = by_scaffold
                .entry(event.scaffold.clone())
                .or_insert_with(|| vec![Breakpoint { source: 0, target: 0 }]);
            if event.size == 0 {
                continue;
            }
            let offset = offsets.entry(event.scaffold.clone()).or_insert(0);
            *offset += event.offset();
            let source = event.position + 1;
            breakpoints.push(Breakpoint {
                source,
                target: source + *offset,
            });
        }

        Self { by_scaffold }
    }

    /// Breakpoints for a scaffold; empty (identity map) when the scaffold has
    /// no indel events.
    #[must_use]
    pub fn breakpoints(&self, scaffold: &str) -> &[Breakpoint] {
        self.by_scaffold.get(scaffold).map_or(&[], Vec::as_slice)
    }

    /// A fresh forward-only cursor over one scaffold's breakpoints.
    #[must_use]
    pub fn cursor(&self, scaffold: &str) -> BreakpointCursor<'_> {
        BreakpointCursor::new(self.breakpoints(scaffold))
    }
}

/// Where a downstream position lands after translation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    /// Translated to this source-space position
    Mapped(i64),
    /// Strictly between the insertion flanks of its bracketing interval:
    /// the position exists only in the downstream coordinate space
    InsideInsertion,
}

/// Forward-only cursor locating the bracketing breakpoint interval for a
/// non-decreasing stream of downstream positions.
///
/// Never rescans from the start; the only backward motion is the single
/// bounded one-step drop back to the interval whose target is at or below
/// the query position.
#[derive(Debug)]
pub struct BreakpointCursor<'a> {
    breakpoints: &'a [Breakpoint],
    cur: usize,
    left: usize,
}

impl<'a> BreakpointCursor<'a> {
    #[must_use]
    pub fn new(breakpoints: &'a [Breakpoint]) -> Self {
        Self {
            breakpoints,
            cur: 0,
            left: 0,
        }
    }

    /// Translate downstream position `position` into source coordinates.
    ///
    /// Positions must be queried in non-decreasing order within a scaffold.
    pub fn locate(&mut self, position: i64) -> Placement {
        let bps = self.breakpoints;
        if bps.is_empty() {
            // Identity map: no indels on this scaffold
            return Placement::Mapped(position);
        }

        while self.cur < bps.len() && position > bps[self.cur].target {
            self.left = self.cur;
            self.cur += 1;
        }
        let right = if self.cur == bps.len() { bps.len() - 1 } else { self.cur };
        if self.cur == bps.len() || (position < bps[self.cur].target && self.cur != 0) {
            self.cur -= 1;
        }

        let left_bp = bps[self.left];
        let right_bp = bps[right];
        let left_flank = left_bp.target + right_bp.source - left_bp.source;
        let right_flank = right_bp.target;
        if position > left_flank && position < right_flank {
            return Placement::InsideInsertion;
        }

        let interval = bps[self.cur];
        Placement::Mapped(position + interval.source - interval.target)
    }
}
