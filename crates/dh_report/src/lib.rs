//! dh_report/src/lib.rs — Pure offline report model + renderers (JSON/HTML/text).
//!
//! Determinism rules:
//! - No network, no I/O here. Callers supply the apportionment already in memory.
//! - Percent strings use two-decimal formatting without float arithmetic.
//! - Stable section order and field names.
//!
//! Notes:
//! - The model echoes the allocation and the matrix highlight; nothing is re-ranked.
//! - Display rounding is applied to the quotient grid only, after ranking.

#![deny(unsafe_code)]

use std::fmt;

pub mod structure;

#[cfg(feature = "render_json")]
pub mod render_json;
#[cfg(feature = "render_html")]
pub mod render_html;
pub mod render_text;

pub use structure::{
    build_model, MatrixSection, MatrixViewRow, ReportModel, Totals, VoteRow, WinnerRow,
};

#[cfg(feature = "render_html")]
pub use render_html::render_html;
#[cfg(feature = "render_json")]
pub use render_json::render_json;
pub use render_text::render_text;

// ===== Errors =====
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReportError {
    Template(&'static str),
    Inconsistent(&'static str),
}

impl fmt::Display for ReportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReportError::Template(what) => write!(f, "template error: {what}"),
            ReportError::Inconsistent(what) => write!(f, "inconsistent input: {what}"),
        }
    }
}

impl std::error::Error for ReportError {}

/// Output formats the renderers can produce.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RenderFormat {
    Json,
    Html,
    Text,
}

impl RenderFormat {
    pub fn file_name(self) -> &'static str {
        match self {
            RenderFormat::Json => "report.json",
            RenderFormat::Html => "report.html",
            RenderFormat::Text => "report.txt",
        }
    }
}

/// Render `model` in the requested format.
pub fn render(model: &ReportModel, format: RenderFormat) -> Result<String, ReportError> {
    match format {
        #[cfg(feature = "render_json")]
        RenderFormat::Json => render_json(model),
        #[cfg(feature = "render_html")]
        RenderFormat::Html => render_html(model),
        RenderFormat::Text => Ok(render_text(model)),
        #[allow(unreachable_patterns)]
        _ => Err(ReportError::Template("renderer not compiled in")),
    }
}

// ===== Helpers (pure; no floats) =====

/// Format a non-negative integer with `,` thousands separators.
pub fn fmt_int(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn thousands_separators() {
        assert_eq!(fmt_int(0), "0");
        assert_eq!(fmt_int(999), "999");
        assert_eq!(fmt_int(1000), "1,000");
        assert_eq!(fmt_int(1234567), "1,234,567");
        assert_eq!(fmt_int(u64::MAX), "18,446,744,073,709,551,615");
    }

    #[test]
    fn error_display() {
        assert_eq!(ReportError::Template("x").to_string(), "template error: x");
        assert_eq!(ReportError::Inconsistent("y").to_string(), "inconsistent input: y");
    }
}
