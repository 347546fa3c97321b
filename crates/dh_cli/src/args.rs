// crates/dh_cli/src/args.rs
//
// Deterministic, offline CLI argument parsing surface (types + validation).
//
// Rules:
// - No networked paths (reject any scheme:// like http/https/file)
// - Optional inputs: --input (rows), --params (parameter JSON)
// - Output: --out dir, --render [json|html|text]*, --export [csv|json]*
// - --seats overrides the parameter file
// - --validate-only loads and sanitizes inputs without allocating

use clap::Parser;
use std::{
    env, fs,
    path::{Path, PathBuf},
};

/// Parsed CLI arguments (raw).
#[derive(Debug, Parser, Clone)]
#[command(
    name = "dhondt",
    disable_help_subcommand = true,
    about = "Offline, deterministic D'Hondt seat allocation"
)]
pub struct Args {
    // --- Inputs ---
    /// Rows file: JSON array of {name, votes} or CSV with a header. Omit for the built-in rows.
    #[arg(long)]
    pub input: Option<PathBuf>,
    /// Seats to allocate (overrides --params). Values <= 0 allocate nothing.
    #[arg(long, allow_negative_numbers = true)]
    pub seats: Option<i64>,
    /// Parameter JSON path (seats, display_rounding, sort_by_votes).
    #[arg(long)]
    pub params: Option<PathBuf>,

    // --- Output & rendering ---
    /// Output directory. result.json is always written there.
    #[arg(long)]
    pub out: Option<PathBuf>,
    /// Report format(s) to write into --out. Repeatable.
    #[arg(long, value_parser = ["json", "html", "text"], requires = "out")]
    pub render: Vec<String>,
    /// Export the sanitized rows into --out. Repeatable.
    #[arg(long, value_parser = ["csv", "json"], requires = "out")]
    pub export: Vec<String>,

    // --- Control ---
    /// Load and sanitize inputs, validate parameters, do not allocate.
    #[arg(long)]
    pub validate_only: bool,
    /// Do not print the report to stdout; only errors are logged.
    #[arg(long, conflicts_with = "verbose")]
    pub quiet: bool,
    /// Debug-level logging on stderr.
    #[arg(long)]
    pub verbose: bool,
}

/// Errors surfaced by argument validation.
/// Keep messages short/stable (handy for scripts/tests).
#[derive(Debug)]
pub enum CliError {
    NonLocalPath(String),
    NotFound(String),
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        use CliError::*;
        match self {
            NonLocalPath(p) => write!(f, "path must be local file (no scheme): {p}"),
            NotFound(p) => write!(f, "file not found: {p}"),
        }
    }
}
impl std::error::Error for CliError {}

/// Entry point used by main.rs
pub fn parse_and_validate() -> Result<Args, CliError> {
    validate(Args::parse())
}

/// Path checks and normalization on already parsed arguments.
pub fn validate(mut args: Args) -> Result<Args, CliError> {
    // Reject schemes for all provided paths (including --out)
    for p in iter_all_paths(&args) {
        ensure_local_path(p)?;
    }

    if let Some(p) = &args.input {
        ensure_local_exists(p, "--input")?;
    }
    if let Some(p) = &args.params {
        ensure_local_exists(p, "--params")?;
    }

    args.input = args.input.take().map(|p| normalize_path(&p));
    args.params = args.params.take().map(|p| normalize_path(&p));
    // Output directory may not exist yet
    args.out = args.out.take().map(|p| normalize_path(&p));

    Ok(args)
}

/// Reject any explicit URI scheme (e.g., http://, https://, file://).
#[inline]
fn has_scheme(s: &str) -> bool {
    let lower = s.trim().to_ascii_lowercase();
    dh_io::looks_like_url_strict(&lower)
        || lower.starts_with("http:")
        || lower.starts_with("https:")
        || lower.starts_with("file:")
}

/// Ensure a provided path string is local (no scheme); path existence is checked separately.
#[inline]
fn ensure_local_path(p: &Path) -> Result<(), CliError> {
    if let Some(s) = p.to_str() {
        if has_scheme(s) {
            return Err(CliError::NonLocalPath(s.to_string()));
        }
    }
    Ok(())
}

fn iter_all_paths(args: &Args) -> impl Iterator<Item = &Path> {
    [args.input.as_deref(), args.params.as_deref(), args.out.as_deref()]
        .into_iter()
        .flatten()
}

/// Ensure a path is local (no scheme) and exists as a regular file.
fn ensure_local_exists(p: &Path, label: &'static str) -> Result<(), CliError> {
    ensure_local_path(p)?;
    let meta = fs::metadata(p).map_err(|_| CliError::NotFound(format!("{label} {}", p.display())))?;
    if !meta.is_file() {
        return Err(CliError::NotFound(format!("{label} {}", p.display())));
    }
    Ok(())
}

/// Best-effort normalization to an absolute path.
/// If canonicalize fails (e.g., path doesn't exist yet), produce an absolute path relative to CWD.
fn normalize_path(p: &Path) -> PathBuf {
    fs::canonicalize(p).unwrap_or_else(|_| {
        if p.is_absolute() {
            p.to_path_buf()
        } else {
            env::current_dir().unwrap_or_else(|_| PathBuf::from(".")).join(p)
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(argv: &[&str]) -> Result<Args, clap::Error> {
        Args::try_parse_from(std::iter::once("dhondt").chain(argv.iter().copied()))
    }

    #[test]
    fn defaults_and_repeats() {
        let a = parse(&[]).unwrap();
        assert!(a.input.is_none() && a.seats.is_none() && a.out.is_none());
        assert!(a.render.is_empty() && a.export.is_empty());

        let a = parse(&["--out", "o", "--render", "json", "--render", "text", "--export", "csv"]).unwrap();
        assert_eq!(a.render, vec!["json", "text"]);
        assert_eq!(a.export, vec!["csv"]);
    }

    #[test]
    fn negative_seats_are_accepted() {
        assert_eq!(parse(&["--seats", "-3"]).unwrap().seats, Some(-3));
    }

    #[test]
    fn render_requires_out_and_known_values() {
        assert!(parse(&["--render", "json"]).is_err());
        assert!(parse(&["--out", "o", "--render", "pdf"]).is_err());
        assert!(parse(&["--out", "o", "--export", "xlsx"]).is_err());
        assert!(parse(&["--quiet", "--verbose"]).is_err());
    }

    #[test]
    fn ensure_local_path_rejects_schemes() {
        assert!(ensure_local_path(Path::new("http://x")).is_err());
        assert!(ensure_local_path(Path::new("file://C:/x.json")).is_err());
        assert!(ensure_local_path(Path::new("https://x/y.csv")).is_err());
        assert!(ensure_local_path(Path::new(r"C:\local\rows.csv")).is_ok());
        assert!(ensure_local_path(Path::new("/tmp/rows.json")).is_ok());
    }

    #[test]
    fn validate_checks_existence_and_normalizes() {
        let a = parse(&["--input", "does/not/exist.csv"]).unwrap();
        assert!(matches!(validate(a), Err(CliError::NotFound(_))));

        let a = parse(&["--out", "some/out/dir"]).unwrap();
        let v = validate(a).unwrap();
        assert!(v.out.unwrap().is_absolute());
    }
}
