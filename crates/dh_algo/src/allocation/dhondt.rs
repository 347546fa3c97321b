//! D’Hondt (highest averages) allocation.
//!
//! Contract:
//! - Seats go to the top `S` entries of the ranked quotient pool.
//! - Ties are resolved by input order (earlier candidate first, then smaller divisor);
//!   the ranker owns that rule, this module only counts.
//! - Total allocated = `min(S, pool size)`, i.e. `S` whenever a candidate exists.
//!
//! Determinism:
//! - Output keys are candidate indices in ascending order (`BTreeMap`).

use std::collections::BTreeMap;

use dh_core::entities::Candidate;

use crate::quotients::build_pool;
use crate::ranking::{rank_pool, RankedPool};
use crate::Allocation;

/// Aggregate winning entries per candidate.
///
/// *Notes*:
/// - An empty ranked pool (no candidates or `seats <= 0`) yields an empty map.
/// - Otherwise every candidate index `0..n_candidates` is present, zero seats included.
pub fn allocate_ranked(ranked: &RankedPool, n_candidates: usize) -> Allocation {
    if ranked.is_empty() {
        return Allocation::default();
    }

    let mut seats: BTreeMap<usize, u32> = (0..n_candidates).map(|i| (i, 0)).collect();
    for w in ranked.winners() {
        *seats.entry(w.entry.candidate_index).or_insert(0) += 1;
    }

    let alloc = Allocation { seats_by_candidate: seats, last_seat_tie: ranked.last_seat_tie() };
    tracing::debug!(total = alloc.total(), last_seat_tie = alloc.last_seat_tie, "seats allocated");
    alloc
}

/// Allocate `seats` among `candidates` using D’Hondt.
pub fn allocate_dhondt(candidates: &[Candidate], seats: i64) -> Allocation {
    let ranked = rank_pool(build_pool(candidates, seats), seats);
    allocate_ranked(&ranked, candidates.len())
}
