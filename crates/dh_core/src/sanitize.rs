//! Sanitizer: raw rows → candidates.
//!
//! Contract:
//! - No row is ever dropped; input order is preserved (order is the tie-break key).
//! - name: absent → `""`; text verbatim; scalars stringified.
//! - votes: parse as a number; failure/absence/NaN/±inf → 0; negative → 0;
//!   rounded half-to-even; values beyond `u64::MAX` saturate.
//! - Pure: `sanitize(sanitize(x)) == sanitize(x)`.

use crate::entities::{Candidate, RawCandidate, RawValue};
use crate::rounding::round_half_even_f64;

/// Why a vote cell was neutralized to 0 (never surfaced as an error).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InvalidVotes {
    Missing,
    NotNumeric,
    NonFinite,
    Negative,
}

/// Sanitized rows plus the per-row notes for cells that were coerced to 0.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Sanitized {
    pub candidates: Vec<Candidate>,
    /// `(row index, reason)` in row order.
    pub invalid: Vec<(usize, InvalidVotes)>,
}

/// Normalize raw rows into candidates.
pub fn sanitize(rows: &[RawCandidate]) -> Vec<Candidate> {
    rows.iter().map(sanitize_one).collect()
}

/// Same as [`sanitize`], but also reports which vote cells were neutralized.
pub fn sanitize_audited(rows: &[RawCandidate]) -> Sanitized {
    let mut out = Sanitized { candidates: Vec::with_capacity(rows.len()), invalid: Vec::new() };
    for (i, row) in rows.iter().enumerate() {
        let (votes, note) = coerce_votes_checked(row.votes.as_ref());
        if let Some(reason) = note {
            out.invalid.push((i, reason));
        }
        out.candidates.push(Candidate { name: coerce_name(row.name.as_ref()), votes });
    }
    out
}

pub fn sanitize_one(row: &RawCandidate) -> Candidate {
    Candidate {
        name: coerce_name(row.name.as_ref()),
        votes: coerce_votes(row.votes.as_ref()),
    }
}

/// Name coercion: absent (or NaN) → empty string, everything else stringified.
pub fn coerce_name(v: Option<&RawValue>) -> String {
    match v {
        None => String::new(),
        Some(RawValue::Text(s)) => s.clone(),
        Some(RawValue::Bool(true)) => "True".to_string(),
        Some(RawValue::Bool(false)) => "False".to_string(),
        Some(RawValue::Int(i)) => i.to_string(),
        Some(RawValue::UInt(u)) => u.to_string(),
        Some(RawValue::Float(f)) if f.is_nan() => String::new(),
        Some(RawValue::Float(f)) => format!("{f:?}"),
    }
}

/// Vote coercion (see module docs).
#[inline]
pub fn coerce_votes(v: Option<&RawValue>) -> u64 {
    coerce_votes_checked(v).0
}

fn coerce_votes_checked(v: Option<&RawValue>) -> (u64, Option<InvalidVotes>) {
    match v {
        None => (0, Some(InvalidVotes::Missing)),
        Some(RawValue::Bool(b)) => (u64::from(*b), None),
        Some(RawValue::Int(i)) => match u64::try_from(*i) {
            Ok(u) => (u, None),
            Err(_) => (0, Some(InvalidVotes::Negative)),
        },
        Some(RawValue::UInt(u)) => (*u, None),
        Some(RawValue::Float(f)) => coerce_float(*f),
        Some(RawValue::Text(s)) => coerce_text(s),
    }
}

fn coerce_float(f: f64) -> (u64, Option<InvalidVotes>) {
    if !f.is_finite() {
        return (0, Some(InvalidVotes::NonFinite));
    }
    if f < 0.0 {
        // -0.4 still rounds to zero; only report genuinely negative counts.
        let note = if round_half_even_f64(f) < 0.0 { Some(InvalidVotes::Negative) } else { None };
        return (0, note);
    }
    // `as` saturates at u64::MAX for out-of-range floats.
    (round_half_even_f64(f) as u64, None)
}

fn coerce_text(s: &str) -> (u64, Option<InvalidVotes>) {
    let t = s.trim();
    if t.is_empty() {
        return (0, Some(InvalidVotes::NotNumeric));
    }
    if let Ok(i) = t.parse::<i128>() {
        if i < 0 {
            return (0, Some(InvalidVotes::Negative));
        }
        return (u64::try_from(i).unwrap_or(u64::MAX), None);
    }
    match t.parse::<f64>() {
        Ok(f) => coerce_float(f),
        Err(_) => (0, Some(InvalidVotes::NotNumeric)),
    }
}
