//! Matrix Builder: candidate × divisor grid of quotients with the top-S highlight.
//!
//! The highlight is copied from the ranked pool's `wins` flags, so a cell is
//! highlighted iff it contributed one of the allocated seats. Display rounding
//! happens in [`QuotientMatrix::display_grid`], strictly after ranking.

#[cfg(feature = "serde")]
use serde::Serialize;

use dh_core::entities::Candidate;
use dh_core::rounding::quotient_display_int;
use dh_core::variables::DisplayRounding;

use crate::quotients::build_pool;
use crate::ranking::{rank_pool, RankedPool};

#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct MatrixCell {
    pub divisor: u32,
    /// Unrounded `votes / divisor`.
    pub value: f64,
    pub highlighted: bool,
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct MatrixRow {
    pub candidate_index: usize,
    pub name: String,
    pub votes: u64,
    /// Cells for divisors `1..=S`, in divisor order.
    pub cells: Vec<MatrixCell>,
}

#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct QuotientMatrix {
    pub seats: u32,
    pub rows: Vec<MatrixRow>,
}

/// A rendered cell value after display rounding.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize), serde(untagged))]
pub enum DisplayValue {
    Int(u64),
    Real(f64),
}

#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct DisplayCell {
    pub value: DisplayValue,
    pub highlighted: bool,
}

impl QuotientMatrix {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Column headers `÷1 .. ÷S`.
    pub fn headers(&self) -> Vec<String> {
        (1..=self.seats).map(|d| format!("÷{d}")).collect()
    }

    pub fn cell(&self, candidate_index: usize, divisor: u32) -> Option<&MatrixCell> {
        let col = (divisor as usize).checked_sub(1)?;
        self.rows.get(candidate_index)?.cells.get(col)
    }

    /// Number of highlighted cells in a row (equals the candidate's seats).
    pub fn highlighted_in_row(&self, candidate_index: usize) -> u32 {
        self.rows
            .get(candidate_index)
            .map(|r| r.cells.iter().filter(|c| c.highlighted).count() as u32)
            .unwrap_or(0)
    }

    /// Rounded view for presentation. Highlight flags are carried over untouched.
    pub fn display_grid(&self, rounding: DisplayRounding) -> Vec<Vec<DisplayCell>> {
        self.rows
            .iter()
            .map(|row| {
                row.cells
                    .iter()
                    .map(|c| DisplayCell {
                        value: match rounding {
                            DisplayRounding::NearestInteger => {
                                DisplayValue::Int(quotient_display_int(row.votes, c.divisor))
                            }
                            DisplayRounding::None => DisplayValue::Real(c.value),
                        },
                        highlighted: c.highlighted,
                    })
                    .collect()
            })
            .collect()
    }
}

/// Build the matrix from an already ranked pool (shared with the allocator).
///
/// `ranked` must come from `candidates`; entries pointing outside the grid are ignored.
pub fn build_matrix_ranked(candidates: &[Candidate], ranked: &RankedPool) -> QuotientMatrix {
    let s = ranked.seats();
    if candidates.is_empty() || s == 0 {
        return QuotientMatrix::default();
    }

    let mut rows: Vec<MatrixRow> = candidates
        .iter()
        .enumerate()
        .map(|(i, c)| MatrixRow {
            candidate_index: i,
            name: c.name.clone(),
            votes: c.votes,
            cells: (1..=s)
                .map(|d| MatrixCell { divisor: d, value: c.votes as f64 / d as f64, highlighted: false })
                .collect(),
        })
        .collect();

    for r in ranked.entries() {
        let e = &r.entry;
        let Some(col) = (e.divisor as usize).checked_sub(1) else { continue };
        if let Some(cell) = rows.get_mut(e.candidate_index).and_then(|row| row.cells.get_mut(col)) {
            cell.value = e.quotient;
            cell.highlighted = r.wins;
        }
    }

    QuotientMatrix { seats: s, rows }
}

/// Build the matrix for `candidates` and `seats` (ranks internally).
pub fn build_matrix(candidates: &[Candidate], seats: i64) -> QuotientMatrix {
    let ranked = rank_pool(build_pool(candidates, seats), seats);
    build_matrix_ranked(candidates, &ranked)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn highlights(m: &QuotientMatrix) -> Vec<Vec<bool>> {
        m.rows.iter().map(|r| r.cells.iter().map(|c| c.highlighted).collect()).collect()
    }

    #[test]
    fn worked_example_grid() {
        let cs = vec![Candidate::new("A", 1000), Candidate::new("B", 500), Candidate::new("C", 250)];
        let m = build_matrix(&cs, 4);
        assert_eq!(m.seats, 4);
        assert_eq!(m.headers(), vec!["÷1", "÷2", "÷3", "÷4"]);
        assert_eq!(
            highlights(&m),
            vec![
                vec![true, true, true, false],
                vec![true, false, false, false],
                vec![false, false, false, false],
            ]
        );
        assert_eq!(m.cell(2, 4).map(|c| c.value), Some(62.5));
        assert_eq!(m.cell(2, 5), None);
        assert_eq!(m.cell(0, 0), None);
    }

    #[test]
    fn display_rounding_keeps_highlight() {
        let cs = vec![Candidate::new("A", 1000), Candidate::new("B", 500), Candidate::new("C", 250)];
        let m = build_matrix(&cs, 4);
        let grid = m.display_grid(DisplayRounding::NearestInteger);
        let values: Vec<u64> = grid[2]
            .iter()
            .map(|c| match c.value {
                DisplayValue::Int(v) => v,
                DisplayValue::Real(_) => unreachable!(),
            })
            .collect();
        assert_eq!(values, vec![250, 125, 83, 62]);
        for (row, drow) in m.rows.iter().zip(&grid) {
            let a: Vec<bool> = row.cells.iter().map(|c| c.highlighted).collect();
            let b: Vec<bool> = drow.iter().map(|c| c.highlighted).collect();
            assert_eq!(a, b);
        }
        let raw = m.display_grid(DisplayRounding::None);
        assert_eq!(raw[0][2].value, DisplayValue::Real(1000.0 / 3.0));
    }

    #[test]
    fn rounding_would_merge_but_ranking_does_not() {
        // 1001/2 = 500.5 and 1000/2 = 500 both display near 500, yet only the larger wins.
        let cs = vec![Candidate::new("A", 1000), Candidate::new("B", 1001)];
        let m = build_matrix(&cs, 3);
        assert_eq!(highlights(&m), vec![vec![true, false, false], vec![true, true, false]]);
    }

    #[test]
    fn empty_matrix_for_empty_inputs() {
        assert!(build_matrix(&[], 3).is_empty());
        assert!(build_matrix(&[Candidate::new("A", 1)], 0).is_empty());
        assert_eq!(build_matrix(&[Candidate::new("A", 1)], -1), QuotientMatrix::default());
    }
}
