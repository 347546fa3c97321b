//! Result artifact: the allocation outcome as a canonical, content-addressed document.
//!
//! The id is `"RES:" + sha256(canonical bytes of the id-less payload)`, so two runs
//! over the same rows and seat count produce byte-identical `result.json` files.
//! Display settings (rounding, table order) are presentation only and stay out.

use serde::{Deserialize, Serialize};

use dh_algo::Apportionment;

use crate::canonical_json::to_canonical_bytes;
use crate::hasher::{result_id, sha256_hex};
use crate::IoResult;

pub const ENGINE_VERSION: &str = env!("CARGO_PKG_VERSION");

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultCandidate {
    pub index: usize,
    pub name: String,
    pub votes: u64,
    pub seats: u32,
}

/// One awarded seat, in award order. The quotient is `votes / divisor`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AwardedSeat {
    pub rank: usize,
    pub candidate_index: usize,
    pub divisor: u32,
    pub votes: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultDoc {
    pub id: String, // "RES:<hex64>"
    #[serde(flatten)]
    pub body: ResultBody,
}

/// Id-less payload (what the id is computed over).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultBody {
    pub engine_version: String,
    /// SHA-256 of the input file bytes; `None` for the built-in rows.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub input_sha256: Option<String>,
    pub seats: u32,
    pub candidates: Vec<ResultCandidate>,
    pub awarded: Vec<AwardedSeat>,
    pub last_seat_tie: bool,
}

/// Assemble the result document for one apportionment.
pub fn build_result(ap: &Apportionment, input_sha256: Option<&str>) -> IoResult<ResultDoc> {
    let candidates = ap
        .candidates
        .iter()
        .enumerate()
        .map(|(i, c)| ResultCandidate {
            index: i,
            name: c.name.clone(),
            votes: c.votes,
            seats: ap.allocation.seats_for(i),
        })
        .collect();

    let awarded = ap
        .ranked
        .winners()
        .map(|r| AwardedSeat {
            rank: r.rank,
            candidate_index: r.entry.candidate_index,
            divisor: r.entry.divisor,
            votes: r.entry.votes,
        })
        .collect();

    let body = ResultBody {
        engine_version: ENGINE_VERSION.to_string(),
        input_sha256: input_sha256.map(str::to_owned),
        seats: ap.ranked.seats(),
        candidates,
        awarded,
        last_seat_tie: ap.allocation.last_seat_tie,
    };
    let id = result_id(&body)?;
    tracing::debug!(%id, "result assembled");
    Ok(ResultDoc { id, body })
}

/// Recompute the id from the body and compare.
pub fn verify_result_id(doc: &ResultDoc) -> IoResult<bool> {
    let sha = sha256_hex(&to_canonical_bytes(&doc.body)?);
    Ok(doc.id.strip_prefix("RES:") == Some(sha.as_str()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_json_diff::assert_json_include;
    use dh_algo::{apportion, Candidate};
    use serde_json::json;

    fn worked_with(seats: i64) -> Apportionment {
        apportion(
            &[Candidate::new("A", 1000), Candidate::new("B", 500), Candidate::new("C", 250)],
            seats,
        )
    }

    fn worked() -> Apportionment {
        worked_with(4)
    }

    #[test]
    fn document_shape() {
        let doc = build_result(&worked(), None).unwrap();
        let v = serde_json::to_value(&doc).unwrap();
        assert_json_include!(
            actual: v,
            expected: json!({
                "seats": 4,
                "last_seat_tie": false,
                "candidates": [
                    { "index": 0, "name": "A", "votes": 1000, "seats": 3 },
                    { "index": 1, "name": "B", "votes": 500, "seats": 1 },
                    { "index": 2, "name": "C", "votes": 250, "seats": 0 }
                ],
                "awarded": [
                    { "rank": 1, "candidate_index": 0, "divisor": 1 },
                    { "rank": 2, "candidate_index": 0, "divisor": 2 },
                    { "rank": 3, "candidate_index": 1, "divisor": 1 },
                    { "rank": 4, "candidate_index": 0, "divisor": 3 }
                ]
            })
        );
        assert!(v.get("input_sha256").is_none());
    }

    #[test]
    fn id_is_stable_and_verifiable() {
        let a = build_result(&worked(), Some("ab")).unwrap();
        let b = build_result(&worked(), Some("ab")).unwrap();
        assert_eq!(a.id, b.id);
        assert!(verify_result_id(&a).unwrap());

        let c = build_result(&worked(), Some("cd")).unwrap();
        assert_ne!(a.id, c.id);

        let mut tampered = a.clone();
        tampered.body.seats = 5;
        assert!(!verify_result_id(&tampered).unwrap());
    }

    #[test]
    fn empty_run_has_no_awards() {
        let doc = build_result(&apportion(&[], 10), None).unwrap();
        assert!(doc.body.candidates.is_empty());
        assert!(doc.body.awarded.is_empty());
        assert_eq!(doc.body.seats, 10);
        assert_eq!(build_result(&worked_with(0), None).unwrap().body.seats, 0);
    }
}
