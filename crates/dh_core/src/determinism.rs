//! Determinism utilities: exact quotient comparison & the canonical pool order.
//!
//! This module is **I/O-free**. It provides:
//! - An exact, float-free comparison of two quotients `v / d`
//! - The canonical total order of quotient-pool keys:
//!   `(quotient desc, candidate_index asc, divisor asc)`
//! - A `StableOrd` trait for types that participate in canonical sorts

use core::cmp::Ordering;

/* -------------------------------------------------------------------------- */
/*                               Stable Ordering                              */
/* -------------------------------------------------------------------------- */

/// Provide a **total**, stable order for values that must sort canonically.
pub trait StableOrd {
    fn stable_cmp(&self, other: &Self) -> Ordering;
}

/// Identity of one quotient in the pool: who, which divisor, and the numerator.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct QuotientKey {
    pub candidate_index: usize,
    pub divisor: u32,
    pub votes: u64,
}

impl StableOrd for QuotientKey {
    /// Higher quotient first; equal quotients fall back to input order, then divisor.
    #[inline]
    fn stable_cmp(&self, other: &Self) -> Ordering {
        cmp_quotients(other.votes, other.divisor, self.votes, self.divisor)
            .then_with(|| self.candidate_index.cmp(&other.candidate_index))
            .then_with(|| self.divisor.cmp(&other.divisor))
    }
}

/* -------------------------------------------------------------------------- */
/*                           Exact quotient compare                            */
/* -------------------------------------------------------------------------- */

/// Compare `v_a / d_a` against `v_b / d_b` without floats.
/// Returns `Ordering::Greater` if a's quotient is larger.
///
/// Cross-multiplied in u128: `u64 * u32` cannot overflow.
#[inline]
pub fn cmp_quotients(v_a: u64, d_a: u32, v_b: u64, d_b: u32) -> Ordering {
    let lhs = (v_a as u128) * (d_b as u128);
    let rhs = (v_b as u128) * (d_a as u128);
    lhs.cmp(&rhs)
}

/// True iff the two quotients are exactly equal.
#[inline]
pub fn quotients_equal(v_a: u64, d_a: u32, v_b: u64, d_b: u32) -> bool {
    cmp_quotients(v_a, d_a, v_b, d_b) == Ordering::Equal
}

/// Sort keys **in place** into canonical pool order.
#[inline]
pub fn sort_keys_canonical(xs: &mut [QuotientKey]) {
    xs.sort_by(|a, b| a.stable_cmp(b));
}

/* ---------------------------------- Tests --------------------------------- */
