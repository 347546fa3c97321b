//! crates/dh_io/src/lib.rs
//! Minimal, single-source-of-truth I/O crate.
//!
//! - Row loading (JSON/CSV) and parameter files: `loader`
//! - Canonical JSON bytes + atomic writes: `canonical_json`
//! - SHA-256 digests and result IDs: `hasher`
//! - Result artifact + row exports: `artifacts`, `export`
//!
//! The algorithm crates stay I/O-free; everything that touches bytes lives here.

#![forbid(unsafe_code)]

use thiserror::Error;

/// Unified error for dh_io.
#[derive(Debug, Error)]
pub enum IoError {
    /// Filesystem read failures.
    #[error("read {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Filesystem write failures (create_dir_all, rename, fsync, etc.)
    #[error("write {path}: {source}")]
    Write {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Path-level problems (non-local path, missing parent, ...).
    #[error("path error: {0}")]
    Path(String),

    /// JSON serialization/deserialization errors with a JSON Pointer-ish location.
    #[error("json error at {pointer}: {msg}")]
    Json { pointer: String, msg: String },

    /// CSV structure errors (1-based line number).
    #[error("csv error at line {line}: {msg}")]
    Csv { line: usize, msg: String },

    /// Parameter file shape or domain errors.
    #[error("params: {0}")]
    Params(String),

    /// Input exceeded a size limit.
    #[error("limit exceeded: {0}")]
    Limit(String),
}

pub type IoResult<T> = Result<T, IoError>;

impl From<serde_json::Error> for IoError {
    fn from(e: serde_json::Error) -> Self {
        // serde_json does not keep a pointer; report line/column at the root.
        IoError::Json {
            pointer: "/".to_string(),
            msg: e.to_string(),
        }
    }
}

pub mod artifacts;
pub mod canonical_json;
pub mod export;
pub mod hasher;
pub mod loader;

/// Returns true if `s` looks like a URL (any `<scheme>://`, including `file://`).
#[inline]
pub fn looks_like_url_strict(s: &str) -> bool {
    s.trim().contains("://")
}

pub mod prelude {
    pub use crate::{looks_like_url_strict, IoError, IoResult};

    pub use crate::artifacts::{build_result, ResultDoc};
    pub use crate::canonical_json::{to_canonical_bytes, write_canonical_file};
    pub use crate::export::{rows_to_csv, rows_to_json};
    pub use crate::hasher::{sha256_canonical, sha256_hex};
    pub use crate::loader::{default_rows, load_params, load_rows, LoadedRows, RowFormat};
}
