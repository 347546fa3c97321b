// crates/dh_algo/src/lib.rs
#![forbid(unsafe_code)]

//! D’Hondt engine: quotient pool → ranked pool → (a) seats, (b) highlight matrix.
//!
//! Every operation is a pure, synchronous function of `(candidates, seats)`.
//! `apportion` ranks once and feeds both outputs from that single ranking;
//! `allocate` and `build_matrix` rank independently and agree with it.

use std::collections::BTreeMap;

#[cfg(feature = "serde")]
use serde::Serialize;

pub use dh_core::entities::Candidate;

// ----------------------------- Stages (file modules) --------------------------------

pub mod quotients;
pub mod ranking;
pub mod matrix;

pub mod allocation {
    pub mod dhondt;

    pub use dhondt::{allocate_dhondt, allocate_ranked};
}

pub use matrix::{build_matrix_ranked, DisplayCell, DisplayValue, MatrixCell, MatrixRow, QuotientMatrix};
pub use quotients::{build_pool, QuotientEntry};
pub use ranking::{rank_pool, RankedEntry, RankedPool};

// ----------------------------- Allocation bundle ------------------------------------

/// Seats per candidate index.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct Allocation {
    /// Empty when nothing was allocated; otherwise one key per candidate.
    pub seats_by_candidate: BTreeMap<usize, u32>,
    /// True iff the last seat was decided between equal quotients.
    pub last_seat_tie: bool,
}

impl Allocation {
    pub fn total(&self) -> u32 {
        self.seats_by_candidate.values().sum()
    }

    pub fn seats_for(&self, candidate_index: usize) -> u32 {
        self.seats_by_candidate.get(&candidate_index).copied().unwrap_or(0)
    }
}

/// Everything derived from one ranking pass.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct Apportionment {
    pub candidates: Vec<Candidate>,
    pub ranked: RankedPool,
    pub allocation: Allocation,
    pub matrix: QuotientMatrix,
}

// ----------------------------- Public operations ------------------------------------

/// Seat counts per candidate.
pub fn allocate(candidates: &[Candidate], seats: i64) -> Allocation {
    allocation::allocate_dhondt(candidates, seats)
}

/// Full quotient grid with highlight flags.
pub fn build_matrix(candidates: &[Candidate], seats: i64) -> QuotientMatrix {
    matrix::build_matrix(candidates, seats)
}

/// Allocation and matrix from a single shared ranking.
pub fn apportion(candidates: &[Candidate], seats: i64) -> Apportionment {
    let ranked = rank_pool(build_pool(candidates, seats), seats);
    let allocation = allocation::allocate_ranked(&ranked, candidates.len());
    let matrix = build_matrix_ranked(candidates, &ranked);
    Apportionment { candidates: candidates.to_vec(), ranked, allocation, matrix }
}
