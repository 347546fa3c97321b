//! crates/dh_report/src/structure.rs
//! Pure report data model + mapper from an apportionment.
//! No I/O, no re-ranking. Shares use integer arithmetic; floats appear only in
//! the unrounded quotient view (`display_rounding = none`).

use serde::Serialize;

use dh_algo::{Apportionment, DisplayCell};
use dh_core::rounding::{div_round_half_even, format_hundredths};
use dh_core::variables::{DisplayRounding, Params};

use crate::ReportError;

pub const REPORT_TITLE: &str = "D'Hondt seat allocation";

// -------------------- Public model root & sections --------------------

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ReportModel {
    pub title: String,
    pub totals: Totals,
    pub display_rounding: DisplayRounding,
    /// Vote table, in presentation order.
    pub votes: Vec<VoteRow>,
    /// Candidates with at least one seat: seats desc, then name asc.
    pub winners: Vec<WinnerRow>,
    pub matrix: MatrixSection,
    pub last_seat_tie: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result_id: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Totals {
    /// Saturating sum of all votes.
    pub total_votes: u64,
    pub candidates: usize,
    pub seats_requested: i64,
    pub seats_allocated: u32,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct VoteRow {
    pub index: usize,
    pub name: String,
    pub votes: u64,
    /// `votes / max(total, 1) × 100`, two decimals, half-even.
    pub share_pct: String,
    pub seats: u32,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct WinnerRow {
    pub name: String,
    pub seats: u32,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct MatrixSection {
    /// `÷1 .. ÷S`
    pub headers: Vec<String>,
    pub rows: Vec<MatrixViewRow>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct MatrixViewRow {
    pub name: String,
    pub cells: Vec<DisplayCell>,
}

// -------------------- Mapper --------------------

/// Build the report model. `result_id` is echoed into the footer when known.
///
/// Fails with `Inconsistent` if the matrix highlight disagrees with the allocation,
/// which can only happen when the two were not derived from one ranking.
pub fn build_model(
    ap: &Apportionment,
    params: &Params,
    result_id: Option<&str>,
) -> Result<ReportModel, ReportError> {
    check_consistency(ap)?;

    let total_votes = ap.candidates.iter().fold(0u64, |acc, c| acc.saturating_add(c.votes));

    let mut votes: Vec<VoteRow> = ap
        .candidates
        .iter()
        .enumerate()
        .map(|(i, c)| VoteRow {
            index: i,
            name: c.name.clone(),
            votes: c.votes,
            share_pct: share_pct(c.votes, total_votes),
            seats: ap.allocation.seats_for(i),
        })
        .collect();
    if params.sort_by_votes {
        // stable: equal votes keep input order
        votes.sort_by(|a, b| b.votes.cmp(&a.votes));
    }

    let mut winners: Vec<WinnerRow> = votes
        .iter()
        .filter(|r| r.seats > 0)
        .map(|r| WinnerRow { name: r.name.clone(), seats: r.seats })
        .collect();
    winners.sort_by(|a, b| b.seats.cmp(&a.seats).then_with(|| a.name.cmp(&b.name)));

    let grid = ap.matrix.display_grid(params.display_rounding);
    let matrix = MatrixSection {
        headers: ap.matrix.headers(),
        rows: ap
            .matrix
            .rows
            .iter()
            .zip(grid)
            .map(|(row, cells)| MatrixViewRow { name: row.name.clone(), cells })
            .collect(),
    };

    Ok(ReportModel {
        title: REPORT_TITLE.to_string(),
        totals: Totals {
            total_votes,
            candidates: ap.candidates.len(),
            seats_requested: params.seats(),
            seats_allocated: ap.allocation.total(),
        },
        display_rounding: params.display_rounding,
        votes,
        winners,
        matrix,
        last_seat_tie: ap.allocation.last_seat_tie,
        result_id: result_id.map(str::to_owned),
    })
}

fn check_consistency(ap: &Apportionment) -> Result<(), ReportError> {
    if ap.matrix.is_empty() {
        return Ok(());
    }
    if ap.matrix.rows.len() != ap.candidates.len() {
        return Err(ReportError::Inconsistent("matrix rows do not match candidates"));
    }
    let agrees = (0..ap.candidates.len())
        .all(|i| ap.matrix.highlighted_in_row(i) == ap.allocation.seats_for(i));
    if !agrees {
        return Err(ReportError::Inconsistent("matrix highlight does not match allocation"));
    }
    Ok(())
}

/// Two-decimal percent string, integer math only.
fn share_pct(part: u64, total: u64) -> String {
    let h = div_round_half_even(part as u128 * 10_000, total.max(1) as u128);
    format_hundredths(h as u64)
}
