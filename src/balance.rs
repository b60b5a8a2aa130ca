//! Rejection-sampling balance filter.
//!
//! Pulls candidate bits from an upstream source and keeps a candidate only
//! while its symbol's quota (`length / 2`) is unmet. Candidates whose quota
//! is already full are discarded; the upstream source has still advanced.
//! The filter is exhausted exactly when both quotas are full, so every
//! complete run yields `length / 2` zeros and `length / 2` ones.
//!
//! ```text
//! (zeros, ones) = (0, 0)  ──accept/discard──▶  (L/2, L/2)
//! ```

use tracing::trace;

use crate::sequence::Bit;

/// Acceptance counters and discard diagnostics for one filter run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FilterStats {
    /// Zero bits accepted so far.
    pub zeros_accepted: usize,
    /// One bits accepted so far.
    pub ones_accepted: usize,
    /// Candidates pulled but rejected because their quota was full.
    pub discarded: u64,
    /// Candidates pulled in total (accepted plus discarded).
    pub candidates: u64,
}

impl FilterStats {
    /// Total accepted bits.
    pub fn accepted(&self) -> usize {
        self.zeros_accepted + self.ones_accepted
    }
}

/// Pull iterator yielding accepted bits until both quotas are met.
///
/// Generic over the candidate source so it can drive a
/// [`CollatzEngine`](crate::random::collatz::CollatzEngine) or any scripted
/// stream. If the source runs dry before the quotas are met, the filter is
/// exhausted early; an engine never runs dry.
#[derive(Debug)]
pub struct BalanceFilter<I> {
    source: I,
    quota: usize,
    stats: FilterStats,
}

impl<I: Iterator<Item = Bit>> BalanceFilter<I> {
    /// Creates a filter producing `2 * quota` bits from `source`.
    pub fn new(source: I, quota: usize) -> Self {
        BalanceFilter {
            source,
            quota,
            stats: FilterStats::default(),
        }
    }

    /// Per-symbol quota.
    pub fn quota(&self) -> usize {
        self.quota
    }

    /// Counters for the bits accepted and discarded so far.
    pub fn stats(&self) -> FilterStats {
        self.stats
    }

    /// Returns `true` once both quotas are full.
    pub fn is_complete(&self) -> bool {
        self.stats.zeros_accepted == self.quota && self.stats.ones_accepted == self.quota
    }

    /// Accepted bits still to come.
    fn remaining(&self) -> usize {
        self.quota.saturating_mul(2).saturating_sub(self.stats.accepted())
    }

    /// Applies the quota rule to one candidate. Returns it if accepted.
    fn admit(&mut self, candidate: Bit) -> Option<Bit> {
        self.stats.candidates += 1;
        let counter = match candidate {
            Bit::Zero => &mut self.stats.zeros_accepted,
            Bit::One => &mut self.stats.ones_accepted,
        };
        if *counter < self.quota {
            *counter += 1;
            Some(candidate)
        } else {
            self.stats.discarded += 1;
            trace!(bit = %candidate, discarded = self.stats.discarded, "quota full, candidate discarded");
            None
        }
    }
}

impl<I: Iterator<Item = Bit>> Iterator for BalanceFilter<I> {
    type Item = Bit;

    fn next(&mut self) -> Option<Bit> {
        if self.is_complete() {
            return None;
        }
        while let Some(candidate) = self.source.next() {
            if let Some(bit) = self.admit(candidate) {
                return Some(bit);
            }
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, Some(self.remaining()))
    }
}
