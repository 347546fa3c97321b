//! dh_core — Core types, sanitization, ordering helpers and integer rounding.
//!
//! This crate is **I/O-free**. It defines the stable types/APIs used across the
//! engine (`dh_algo`, `dh_io`, `dh_report`, `dh_cli`).
//!
//! - Entities: `RawValue`, `RawCandidate`, `Candidate`
//! - Sanitizer: raw rows → candidates (coercion, never rejection)
//! - Deterministic ordering helpers for the quotient pool
//! - Integer-first rounding (half-even) for display and shares
//! - Parameter domains: `Params`, `DisplayRounding`
//!
//! Serialization derives are gated behind the `serde` feature.

#![forbid(unsafe_code)]

pub mod entities;
pub mod sanitize;
pub mod determinism;
pub mod rounding;
pub mod variables;

pub mod errors {
    use core::fmt;

    /// Minimal error set for core-domain validation & parsing.
    #[derive(Clone, Copy, Debug, Eq, PartialEq)]
    pub enum CoreError {
        DomainOutOfRange(&'static str),
        UnknownToken(&'static str),
    }

    impl fmt::Display for CoreError {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            match self {
                CoreError::DomainOutOfRange(k) => write!(f, "domain out of range: {k}"),
                CoreError::UnknownToken(k) => write!(f, "unknown token for {k}"),
            }
        }
    }

    impl std::error::Error for CoreError {}
}

pub use entities::{Candidate, RawCandidate, RawValue};
pub use sanitize::{sanitize, sanitize_audited, InvalidVotes, Sanitized};
pub use variables::{DisplayRounding, Params};
