//! Quotient Engine: one entry per (candidate, divisor) for divisors `1..=S`.
//!
//! Enumeration order is candidate-major, divisor-minor. The ranker's tie-break
//! is stated explicitly, but the pool is still emitted in that order so a plain
//! stable sort by quotient gives the same result.

#[cfg(feature = "serde")]
use serde::Serialize;

use dh_core::determinism::QuotientKey;
use dh_core::entities::Candidate;

/// One candidate/divisor pair and its quotient.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct QuotientEntry {
    pub candidate_index: usize,
    pub divisor: u32,
    pub votes: u64,
    /// `votes / divisor` as a real number. Informational: ordering uses the exact key.
    pub quotient: f64,
}

impl QuotientEntry {
    pub fn new(candidate_index: usize, votes: u64, divisor: u32) -> Self {
        Self {
            candidate_index,
            divisor,
            votes,
            quotient: votes as f64 / divisor as f64,
        }
    }

    #[inline]
    pub fn key(&self) -> QuotientKey {
        QuotientKey { candidate_index: self.candidate_index, divisor: self.divisor, votes: self.votes }
    }
}

/// Seat count as a positive `u32`, or `None` when there is nothing to allocate.
#[inline]
pub fn positive_seats(seats: i64) -> Option<u32> {
    if seats <= 0 {
        return None;
    }
    Some(u32::try_from(seats).unwrap_or(u32::MAX))
}

/// Build the full pool of `candidates.len() × S` entries.
///
/// `seats <= 0` or no candidates → empty pool (no error).
pub fn build_pool(candidates: &[Candidate], seats: i64) -> Vec<QuotientEntry> {
    let Some(s) = positive_seats(seats) else {
        return Vec::new();
    };
    let mut pool = Vec::with_capacity(candidates.len().saturating_mul(s as usize));
    for (i, c) in candidates.iter().enumerate() {
        for d in 1..=s {
            pool.push(QuotientEntry::new(i, c.votes, d));
        }
    }
    tracing::debug!(candidates = candidates.len(), seats = s, pool = pool.len(), "quotient pool built");
    pool
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pool_size_and_enumeration_order() {
        let cs = vec![Candidate::new("A", 1000), Candidate::new("B", 0)];
        let pool = build_pool(&cs, 3);
        assert_eq!(pool.len(), 6);
        let order: Vec<(usize, u32)> = pool.iter().map(|e| (e.candidate_index, e.divisor)).collect();
        assert_eq!(order, vec![(0, 1), (0, 2), (0, 3), (1, 1), (1, 2), (1, 3)]);
        assert_eq!(pool[1].quotient, 500.0);
        assert!((pool[2].quotient - 333.333_333).abs() < 1e-3);
        assert!(pool[3..].iter().all(|e| e.quotient == 0.0));
    }

    #[test]
    fn empty_inputs_yield_empty_pool() {
        assert!(build_pool(&[], 5).is_empty());
        let cs = vec![Candidate::new("A", 10)];
        assert!(build_pool(&cs, 0).is_empty());
        assert!(build_pool(&cs, -4).is_empty());
    }

    #[test]
    fn positive_seats_domain() {
        assert_eq!(positive_seats(0), None);
        assert_eq!(positive_seats(-1), None);
        assert_eq!(positive_seats(7), Some(7));
        assert_eq!(positive_seats(i64::MAX), Some(u32::MAX));
    }
}
