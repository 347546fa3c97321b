//! Loader: read local row files (JSON or CSV) and parameter files.
//!
//! Rows are returned **raw**: shape problems inside a row (missing cells,
//! non-numeric votes, odd types) are left for the sanitizer to neutralize.
//! Only file-level problems (unreadable, not an array, broken quoting) are errors.
//! No network I/O.

use std::fs;
use std::path::Path;

use serde_json::Value;

use dh_core::entities::{Candidate, RawCandidate, RawValue};
use dh_core::sanitize::{sanitize_audited, InvalidVotes};
use dh_core::variables::{self, Params};

use crate::hasher::sha256_hex;
use crate::{looks_like_url_strict, IoError, IoResult};

/// Hard cap on input file size.
pub const MAX_INPUT_BYTES: u64 = 16 * 1024 * 1024;

/// Accepted column/key names, in priority order (matched case-insensitively).
const NAME_KEYS: &[&str] = &["name", "party", "partido"];
const VOTE_KEYS: &[&str] = &["votes", "votos"];

/// Rows shipped with an interactive session when no input file is given.
const BASE_ROWS: &[(&str, u64)] = &[
    ("Fuerza Popular", 1000),
    ("Peru Libre", 1000),
    ("Renovación", 1000),
    ("Accion Popular", 1000),
    ("Podemos Perú", 1000),
    ("Partido 6", 1000),
    ("Partido 7", 1000),
    ("Partido 8", 1000),
    ("Partido 9", 1000),
    ("Partido 10", 1000),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowFormat {
    Json,
    Csv,
}

/// Raw rows plus provenance.
#[derive(Debug, Clone)]
pub struct LoadedRows {
    pub rows: Vec<RawCandidate>,
    pub format: RowFormat,
    /// SHA-256 of the file bytes as read (lowercase hex).
    pub sha256: String,
}

// ----------------------------- Orchestration -----------------------------

/// Default rows: ten parties with 1000 votes each.
pub fn default_rows() -> Vec<RawCandidate> {
    BASE_ROWS
        .iter()
        .map(|&(name, votes)| RawCandidate::new(name, votes))
        .collect()
}

/// Load raw rows from a local JSON or CSV file.
pub fn load_rows(path: &Path) -> IoResult<LoadedRows> {
    let bytes = read_with_limits(path)?;
    let format = detect_format(path, &bytes);
    let rows = match format {
        RowFormat::Json => parse_rows_json(&bytes)?,
        RowFormat::Csv => parse_rows_csv(&decode_utf8(&bytes)?)?,
    };
    tracing::debug!(path = %path.display(), ?format, rows = rows.len(), "rows loaded");
    Ok(LoadedRows { rows, format, sha256: sha256_hex(&bytes) })
}

/// Load and validate a parameter file. Missing fields take their defaults.
pub fn load_params(path: &Path) -> IoResult<Params> {
    let bytes = read_with_limits(path)?;
    let params: Params = serde_json::from_slice(&bytes)?;
    variables::validate_domains(&params).map_err(|e| IoError::Params(e.to_string()))?;
    Ok(params)
}

/// Sanitize rows and log every vote cell that had to be neutralized.
pub fn sanitize_logged(rows: &[RawCandidate]) -> Vec<Candidate> {
    let out = sanitize_audited(rows);
    for (row, reason) in &out.invalid {
        let reason = match reason {
            InvalidVotes::Missing => "missing",
            InvalidVotes::NotNumeric => "not numeric",
            InvalidVotes::NonFinite => "not finite",
            InvalidVotes::Negative => "negative",
        };
        tracing::warn!(row = row + 1, reason, "votes coerced to 0");
    }
    out.candidates
}

// ----------------------------- Targeted parsers -----------------------------

/// Pick the format by extension, then by the first non-blank byte.
pub fn detect_format(path: &Path, bytes: &[u8]) -> RowFormat {
    match path.extension().and_then(|e| e.to_str()).map(|e| e.to_ascii_lowercase()) {
        Some(ext) if ext == "json" => RowFormat::Json,
        Some(ext) if ext == "csv" => RowFormat::Csv,
        _ => {
            let first = strip_bom(bytes).iter().find(|b| !b.is_ascii_whitespace());
            if first == Some(&b'[') { RowFormat::Json } else { RowFormat::Csv }
        }
    }
}

/// JSON rows: an array whose elements are objects with name/vote keys.
/// Non-object elements become rows with both fields absent.
pub fn parse_rows_json(bytes: &[u8]) -> IoResult<Vec<RawCandidate>> {
    let v: Value = serde_json::from_slice(strip_bom(bytes))?;
    let arr = match v {
        Value::Array(a) => a,
        other => {
            return Err(IoError::Json {
                pointer: "/".into(),
                msg: format!("expected an array of rows, found {}", json_kind(&other)),
            })
        }
    };
    Ok(arr.iter().map(row_from_json).collect())
}

fn row_from_json(v: &Value) -> RawCandidate {
    let Value::Object(map) = v else {
        return RawCandidate::default();
    };
    let lookup = |keys: &[&str]| -> Option<RawValue> {
        keys.iter()
            .find_map(|k| map.iter().find(|(mk, _)| mk.trim().eq_ignore_ascii_case(k)))
            .and_then(|(_, val)| raw_from_json(val))
    };
    RawCandidate { name: lookup(NAME_KEYS), votes: lookup(VOTE_KEYS) }
}

fn raw_from_json(v: &Value) -> Option<RawValue> {
    match v {
        Value::Null | Value::Array(_) | Value::Object(_) => None,
        Value::Bool(b) => Some(RawValue::Bool(*b)),
        Value::String(s) => Some(RawValue::Text(s.clone())),
        Value::Number(n) => n
            .as_i64()
            .map(RawValue::Int)
            .or_else(|| n.as_u64().map(RawValue::UInt))
            .or_else(|| n.as_f64().map(RawValue::Float)),
    }
}

fn json_kind(v: &Value) -> &'static str {
    match v {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// CSV rows: header line locates the name/vote columns; empty cells are absent values.
pub fn parse_rows_csv(text: &str) -> IoResult<Vec<RawCandidate>> {
    let mut records = parse_csv_records(text)?.into_iter();
    let Some(header) = records.next() else {
        return Ok(Vec::new());
    };
    let find = |keys: &[&str]| {
        keys.iter()
            .find_map(|k| header.iter().position(|h| h.trim().eq_ignore_ascii_case(k)))
    };
    let name_col = find(NAME_KEYS);
    let vote_col = find(VOTE_KEYS);

    let cell = |rec: &[String], col: Option<usize>| -> Option<RawValue> {
        let s = rec.get(col?)?;
        if s.is_empty() { None } else { Some(RawValue::Text(s.clone())) }
    };

    Ok(records
        .map(|rec| RawCandidate { name: cell(&rec, name_col), votes: cell(&rec, vote_col) })
        .collect())
}

/// Minimal RFC 4180 reader: quoted fields, `""` escapes, LF or CRLF endings.
/// Blank lines are skipped.
fn parse_csv_records(text: &str) -> IoResult<Vec<Vec<String>>> {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);
    let mut records = Vec::new();
    let mut record: Vec<String> = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;
    let mut line = 1usize;
    let mut quote_line = 0usize;
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        if in_quotes {
            match c {
                '"' if chars.peek() == Some(&'"') => {
                    chars.next();
                    field.push('"');
                }
                '"' => in_quotes = false,
                '\n' => {
                    line += 1;
                    field.push(c);
                }
                _ => field.push(c),
            }
            continue;
        }
        match c {
            '"' if field.is_empty() => {
                in_quotes = true;
                quote_line = line;
            }
            ',' => record.push(std::mem::take(&mut field)),
            '\r' if chars.peek() == Some(&'\n') => {}
            '\n' => {
                line += 1;
                record.push(std::mem::take(&mut field));
                push_record(&mut records, std::mem::take(&mut record));
            }
            _ => field.push(c),
        }
    }
    if in_quotes {
        return Err(IoError::Csv { line: quote_line, msg: "unterminated quoted field".into() });
    }
    if !field.is_empty() || !record.is_empty() {
        record.push(field);
        push_record(&mut records, record);
    }
    Ok(records)
}

fn push_record(records: &mut Vec<Vec<String>>, record: Vec<String>) {
    let blank = record.len() == 1 && record[0].trim().is_empty();
    if !blank {
        records.push(record);
    }
}

// ----------------------------- Helpers -----------------------------

fn read_with_limits(path: &Path) -> IoResult<Vec<u8>> {
    if let Some(s) = path.to_str() {
        if looks_like_url_strict(s) {
            return Err(IoError::Path(format!("not a local file: {s}")));
        }
    }
    let rd = |source| IoError::Read { path: path.display().to_string(), source };
    let meta = fs::metadata(path).map_err(rd)?;
    if meta.len() > MAX_INPUT_BYTES {
        return Err(IoError::Limit(format!(
            "{} is {} bytes (max {MAX_INPUT_BYTES})",
            path.display(),
            meta.len()
        )));
    }
    fs::read(path).map_err(rd)
}

fn strip_bom(bytes: &[u8]) -> &[u8] {
    bytes.strip_prefix(b"\xEF\xBB\xBF").unwrap_or(bytes)
}

fn decode_utf8(bytes: &[u8]) -> IoResult<String> {
    String::from_utf8(bytes.to_vec()).map_err(|e| IoError::Csv {
        line: 1 + bytes[..e.utf8_error().valid_up_to()].iter().filter(|&&b| b == b'\n').count(),
        msg: "input is not valid UTF-8".into(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use dh_core::sanitize::sanitize;

    #[test]
    fn default_rows_are_ten_equal_parties() {
        let rows = sanitize(&default_rows());
        assert_eq!(rows.len(), 10);
        assert!(rows.iter().all(|c| c.votes == 1000));
        assert_eq!(rows[0].name, "Fuerza Popular");
        assert_eq!(rows[9].name, "Partido 10");
    }

    #[test]
    fn json_rows_with_aliases_and_odd_cells() {
        let src = br#"[
            {"name": "A", "votes": 10},
            {"Partido": "B", "Votos": "12.5"},
            {"party": "C"},
            {"name": null, "votes": [1]},
            7
        ]"#;
        let rows = sanitize(&parse_rows_json(src).unwrap());
        let got: Vec<(&str, u64)> = rows.iter().map(|c| (c.name.as_str(), c.votes)).collect();
        assert_eq!(got, vec![("A", 10), ("B", 12), ("C", 0), ("", 0), ("", 0)]);
    }

    #[test]
    fn json_must_be_an_array() {
        let err = parse_rows_json(br#"{"name":"A"}"#).unwrap_err();
        assert!(matches!(err, IoError::Json { .. }), "{err}");
    }

    #[test]
    fn csv_quoted_fields_and_missing_cells() {
        let src = "Votos,Partido\r\n100,\"Alianza, Unida\"\r\n\r\n\"5\"\"\",B\n,C\n40\n";
        let rows = sanitize(&parse_rows_csv(src).unwrap());
        let got: Vec<(&str, u64)> = rows.iter().map(|c| (c.name.as_str(), c.votes)).collect();
        assert_eq!(got, vec![("Alianza, Unida", 100), ("B", 0), ("C", 0), ("", 40)]);
    }

    #[test]
    fn csv_unterminated_quote_reports_line() {
        let err = parse_rows_csv("name,votes\nA,1\n\"B,2\n").unwrap_err();
        match err {
            IoError::Csv { line, .. } => assert_eq!(line, 3),
            other => panic!("unexpected {other}"),
        }
    }

    #[test]
    fn csv_empty_input_has_no_rows() {
        assert!(parse_rows_csv("").unwrap().is_empty());
        assert!(parse_rows_csv("name,votes\n").unwrap().is_empty());
    }

    #[test]
    fn format_detection() {
        assert_eq!(detect_format(Path::new("x.JSON"), b"name"), RowFormat::Json);
        assert_eq!(detect_format(Path::new("x.csv"), b"["), RowFormat::Csv);
        assert_eq!(detect_format(Path::new("rows"), b"  \n[{}]"), RowFormat::Json);
        assert_eq!(detect_format(Path::new("rows.txt"), b"name,votes"), RowFormat::Csv);
    }
}
