//! Row exports: the sanitized table as CSV or JSON, readable back by the loader.

use serde_json::{json, Value};

use dh_core::entities::Candidate;

use crate::IoResult;

/// `name,votes` header plus one line per candidate, LF line endings.
pub fn rows_to_csv(rows: &[Candidate]) -> String {
    let mut out = String::from("name,votes\n");
    for c in rows {
        out.push_str(&csv_escape(&c.name));
        out.push(',');
        out.push_str(&c.votes.to_string());
        out.push('\n');
    }
    out
}

/// Pretty JSON array of `{ "name", "votes" }` objects; non-ASCII is kept as-is.
pub fn rows_to_json(rows: &[Candidate]) -> IoResult<String> {
    let arr: Vec<Value> = rows.iter().map(|c| json!({ "name": c.name, "votes": c.votes })).collect();
    let mut s = serde_json::to_string_pretty(&Value::Array(arr))?;
    s.push('\n');
    Ok(s)
}

fn csv_escape(s: &str) -> String {
    if s.contains(',') || s.contains('"') || s.contains('\n') || s.contains('\r') {
        format!("\"{}\"", s.replace('"', "\"\""))
    } else {
        s.to_string()
    }
}
