//! render_json.rs — Report JSON renderer.
//!
//! Key order follows the struct layout of [`ReportModel`]; no maps with
//! unordered keys are serialized, so output is byte-stable for a given model.

use crate::{ReportError, ReportModel};

/// Pretty-printed JSON with a trailing newline.
pub fn render_json(model: &ReportModel) -> Result<String, ReportError> {
    let mut s =
        serde_json::to_string_pretty(model).map_err(|_| ReportError::Template("json_serialize"))?;
    s.push('\n');
    Ok(s)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::build_model;
    use assert_json_diff::assert_json_eq;
    use dh_algo::{apportion, Candidate};
    use dh_core::variables::{DisplayRounding, Params};
    use serde_json::{json, Value};

    #[test]
    fn full_document() {
        let cs = vec![Candidate::new("A", 300), Candidate::new("B", 100)];
        let p = Params { seats: 2, ..Params::default() };
        let model = build_model(&apportion(&cs, 2), &p, None).unwrap();
        let v: Value = serde_json::from_str(&render_json(&model).unwrap()).unwrap();
        assert_json_eq!(
            v,
            json!({
                "title": "D'Hondt seat allocation",
                "totals": { "total_votes": 400, "candidates": 2, "seats_requested": 2, "seats_allocated": 2 },
                "display_rounding": "nearest_integer",
                "votes": [
                    { "index": 0, "name": "A", "votes": 300, "share_pct": "75.00", "seats": 2 },
                    { "index": 1, "name": "B", "votes": 100, "share_pct": "25.00", "seats": 0 }
                ],
                "winners": [ { "name": "A", "seats": 2 } ],
                "matrix": {
                    "headers": ["÷1", "÷2"],
                    "rows": [
                        { "name": "A", "cells": [
                            { "value": 300, "highlighted": true },
                            { "value": 150, "highlighted": true }
                        ] },
                        { "name": "B", "cells": [
                            { "value": 100, "highlighted": false },
                            { "value": 50, "highlighted": false }
                        ] }
                    ]
                },
                "last_seat_tie": false
            })
        );
    }

    #[test]
    fn unrounded_values_are_reals() {
        let cs = vec![Candidate::new("A", 1000)];
        let p = Params { seats: 3, display_rounding: DisplayRounding::None, ..Params::default() };
        let model = build_model(&apportion(&cs, 3), &p, Some("RES:abc")).unwrap();
        let v: Value = serde_json::from_str(&render_json(&model).unwrap()).unwrap();
        assert_eq!(v["display_rounding"], "none");
        assert_eq!(v["matrix"]["rows"][0]["cells"][1]["value"], json!(500.0));
        assert!((v["matrix"]["rows"][0]["cells"][2]["value"].as_f64().unwrap() - 333.333).abs() < 0.001);
        assert_eq!(v["result_id"], "RES:abc");
    }
}
