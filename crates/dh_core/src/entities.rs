//! Input rows and sanitized candidates.
//!
//! Candidate identity is **positional**: the index in the sanitized sequence is
//! the candidate's key everywhere downstream. Names are labels only and may
//! repeat.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// An untyped scalar as delivered by an external row source (JSON cell, CSV field).
///
/// Variant order matters for untagged deserialization: integers that fit `i64`
/// land in `Int`, larger unsigned ones in `UInt`, everything else numeric in `Float`.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(untagged))]
pub enum RawValue {
    Bool(bool),
    Int(i64),
    UInt(u64),
    Float(f64),
    Text(String),
}

impl From<&str> for RawValue {
    fn from(s: &str) -> Self {
        RawValue::Text(s.to_string())
    }
}

impl From<String> for RawValue {
    fn from(s: String) -> Self {
        RawValue::Text(s)
    }
}

impl From<i64> for RawValue {
    fn from(v: i64) -> Self {
        RawValue::Int(v)
    }
}

impl From<u64> for RawValue {
    fn from(v: u64) -> Self {
        match i64::try_from(v) {
            Ok(i) => RawValue::Int(i),
            Err(_) => RawValue::UInt(v),
        }
    }
}

impl From<f64> for RawValue {
    fn from(v: f64) -> Self {
        RawValue::Float(v)
    }
}

/// One raw input row; either field may be absent.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RawCandidate {
    #[cfg_attr(feature = "serde", serde(default))]
    pub name: Option<RawValue>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub votes: Option<RawValue>,
}

impl RawCandidate {
    pub fn new(name: impl Into<RawValue>, votes: impl Into<RawValue>) -> Self {
        Self { name: Some(name.into()), votes: Some(votes.into()) }
    }
}

/// A sanitized candidate: a label plus a non-negative vote count.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Candidate {
    pub name: String,
    pub votes: u64,
}

impl Candidate {
    pub fn new(name: impl Into<String>, votes: u64) -> Self {
        Self { name: name.into(), votes }
    }
}

/// Re-entry path for already sanitized rows (export → import, idempotence checks).
impl From<&Candidate> for RawCandidate {
    fn from(c: &Candidate) -> Self {
        RawCandidate {
            name: Some(RawValue::Text(c.name.clone())),
            votes: Some(RawValue::from(c.votes)),
        }
    }
}

#[cfg(all(test, feature = "serde"))]
mod tests {
    use super::*;

    #[test]
    fn raw_value_untagged_variants() {
        let v: RawValue = serde_json::from_str("12").unwrap();
        assert_eq!(v, RawValue::Int(12));
        let v: RawValue = serde_json::from_str("18446744073709551615").unwrap();
        assert_eq!(v, RawValue::UInt(u64::MAX));
        let v: RawValue = serde_json::from_str("2.5").unwrap();
        assert_eq!(v, RawValue::Float(2.5));
        let v: RawValue = serde_json::from_str("\"x\"").unwrap();
        assert_eq!(v, RawValue::Text("x".into()));
        let v: RawValue = serde_json::from_str("true").unwrap();
        assert_eq!(v, RawValue::Bool(true));
    }

    #[test]
    fn raw_candidate_fields_default_to_absent() {
        let r: RawCandidate = serde_json::from_str(r#"{"name":"A"}"#).unwrap();
        assert_eq!(r.name, Some(RawValue::Text("A".into())));
        assert!(r.votes.is_none());
    }
}
