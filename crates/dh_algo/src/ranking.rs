//! Ranker: total order over the quotient pool.
//!
//! Contract:
//! - Order is `(quotient desc, candidate_index asc, divisor asc)`.
//! - Quotients are compared exactly (cross-multiplied integers), never as floats.
//! - `rank` is the 1-based position; `wins = rank <= S`.
//!
//! Determinism:
//! - The key is total, so the result does not depend on pool order. The sort is
//!   also stable, so a pool emitted candidate-major/divisor-minor keeps its
//!   relative order among equal quotients either way.

#[cfg(feature = "serde")]
use serde::Serialize;

use dh_core::determinism::{quotients_equal, StableOrd};

use crate::quotients::{positive_seats, QuotientEntry};

#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct RankedEntry {
    #[cfg_attr(feature = "serde", serde(flatten))]
    pub entry: QuotientEntry,
    pub rank: usize,
    pub wins: bool,
}

/// The ranked pool. Computed once and shared by allocation and the matrix highlight.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct RankedPool {
    seats: u32,
    entries: Vec<RankedEntry>,
}

impl RankedPool {
    /// Seats used for the `wins` cut (0 when nothing was allocated).
    pub fn seats(&self) -> u32 {
        self.seats
    }

    /// Entries in rank order.
    pub fn entries(&self) -> &[RankedEntry] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// The winning entries (top `min(S, len)`), in rank order.
    pub fn winners(&self) -> impl Iterator<Item = &RankedEntry> {
        self.entries.iter().take_while(|e| e.wins)
    }

    /// True when the last awarded seat and the first runner-up carry equal quotients,
    /// i.e. the last seat was decided by the order rule.
    pub fn last_seat_tie(&self) -> bool {
        let s = self.seats as usize;
        if s == 0 || self.entries.len() <= s {
            return false;
        }
        let last = &self.entries[s - 1].entry;
        let next = &self.entries[s].entry;
        quotients_equal(last.votes, last.divisor, next.votes, next.divisor)
    }
}

/// Rank a quotient pool for `seats` seats.
///
/// `seats <= 0` yields an empty pool regardless of input.
pub fn rank_pool(mut pool: Vec<QuotientEntry>, seats: i64) -> RankedPool {
    let Some(s) = positive_seats(seats) else {
        return RankedPool::default();
    };
    if pool.is_empty() {
        return RankedPool { seats: s, entries: Vec::new() };
    }

    pool.sort_by(|a, b| a.key().stable_cmp(&b.key()));

    let entries: Vec<RankedEntry> = pool
        .into_iter()
        .enumerate()
        .map(|(pos, entry)| {
            let rank = pos + 1;
            RankedEntry { entry, rank, wins: rank <= s as usize }
        })
        .collect();

    let ranked = RankedPool { seats: s, entries };
    tracing::debug!(
        seats = s,
        ranked = ranked.len(),
        last_seat_tie = ranked.last_seat_tie(),
        "quotient pool ranked"
    );
    ranked
}
