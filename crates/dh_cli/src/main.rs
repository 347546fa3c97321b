// crates/dh_cli/src/main.rs
//
// Wires up: exit codes, typed error mapping, CLI parsing, logging, the
// validate-only short-circuit, and the full run path
// (load → sanitize → apportion → result → report → artifacts).

mod args;

mod exitcodes {
    pub const OK: i32 = 0;
    pub const VALIDATION: i32 = 2;
    pub const IO: i32 = 4;
    pub const RENDER: i32 = 5;
}

use std::fmt;
use std::fs;
use std::path::Path;
use std::process::ExitCode;

use tracing_subscriber::{fmt as log_fmt, EnvFilter};

use args::{parse_and_validate as parse_cli, Args};

use dh_algo::{apportion, Apportionment, Candidate};
use dh_core::entities::RawCandidate;
use dh_core::variables::{self, Params};
use dh_io::artifacts::{build_result, ResultDoc};
use dh_io::canonical_json::{write_atomic, write_canonical_file};
use dh_io::export::{rows_to_csv, rows_to_json};
use dh_io::loader::{self, default_rows, sanitize_logged};
use dh_io::IoError;
use dh_report::{build_model, render, render_text, RenderFormat, ReportError, ReportModel};

/// Central error type for CLI → exit-code mapping.
#[derive(Debug)]
enum MainError {
    /// Input shape / parameter domain failures
    Validation(String),
    /// I/O errors (read/write/path/limits)
    Io(String),
    /// Report build or render failures
    Render(String),
}

impl fmt::Display for MainError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MainError::Validation(m) => write!(f, "validation: {m}"),
            MainError::Io(m) => write!(f, "io: {m}"),
            MainError::Render(m) => write!(f, "render: {m}"),
        }
    }
}

fn main() -> ExitCode {
    let args = match parse_cli() {
        Ok(a) => a,
        Err(e) => {
            eprintln!("dhondt: error: {e}");
            return ExitCode::from(exitcodes::VALIDATION as u8);
        }
    };
    init_logging(&args);

    let outcome = if args.validate_only { validate_only(&args) } else { run_once(&args) };
    let rc = match outcome {
        Ok(()) => exitcodes::OK,
        Err(e) => {
            eprintln!("dhondt: error: {e}");
            map_error(&e)
        }
    };
    ExitCode::from(rc as u8)
}

/// Logs go to stderr so stdout carries only the report.
/// `--quiet`/`--verbose` win over `RUST_LOG`; otherwise `RUST_LOG` or `warn`.
fn init_logging(args: &Args) {
    let filter = if args.quiet {
        EnvFilter::new("error")
    } else if args.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    let _ = log_fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}

/// Map our typed errors to the exit-code table.
fn map_error(e: &MainError) -> i32 {
    use exitcodes::*;
    match e {
        MainError::Validation(_) => VALIDATION,
        MainError::Io(_) => IO,
        MainError::Render(_) => RENDER,
    }
}

/// Translate dh_io::IoError into MainError buckets for exit-code mapping.
fn map_io_err(e: IoError) -> MainError {
    match e {
        IoError::Json { .. } | IoError::Csv { .. } | IoError::Params(_) => {
            MainError::Validation(e.to_string())
        }
        IoError::Read { .. } | IoError::Write { .. } | IoError::Path(_) | IoError::Limit(_) => {
            MainError::Io(e.to_string())
        }
    }
}

fn map_report_err(e: ReportError) -> MainError {
    MainError::Render(e.to_string())
}

// ----------------------------- Inputs -----------------------------

struct Inputs {
    rows: Vec<RawCandidate>,
    /// Digest of the input file; `None` for the built-in rows.
    input_sha256: Option<String>,
    params: Params,
}

/// Load params (file, then `--seats` override, then domain check) and raw rows.
fn load_inputs(args: &Args) -> Result<Inputs, MainError> {
    let mut params = match &args.params {
        Some(p) => loader::load_params(p).map_err(map_io_err)?,
        None => Params::default(),
    };
    if let Some(s) = args.seats {
        params.seats = s;
    }
    variables::validate_domains(&params)
        .map_err(|e| MainError::Validation(format!("params: {e}")))?;

    let (rows, input_sha256) = match &args.input {
        Some(p) => {
            let loaded = loader::load_rows(p).map_err(map_io_err)?;
            (loaded.rows, Some(loaded.sha256))
        }
        None => (default_rows(), None),
    };
    Ok(Inputs { rows, input_sha256, params })
}

// ----------------------------- Modes -----------------------------

/// Validate-only path (no allocation, no artifacts).
fn validate_only(args: &Args) -> Result<(), MainError> {
    let inputs = load_inputs(args)?;
    let candidates = sanitize_logged(&inputs.rows);
    if !args.quiet {
        eprintln!(
            "validate-only: inputs OK ({} candidates, {} seats)",
            candidates.len(),
            inputs.params.seats
        );
    }
    Ok(())
}

fn run_once(args: &Args) -> Result<(), MainError> {
    let inputs = load_inputs(args)?;
    let candidates = sanitize_logged(&inputs.rows);
    tracing::debug!(candidates = candidates.len(), seats = inputs.params.seats, "inputs loaded");

    let ap = apportion(&candidates, inputs.params.seats());
    let result = build_result(&ap, inputs.input_sha256.as_deref()).map_err(map_io_err)?;
    let model = build_model(&ap, &inputs.params, Some(&result.id)).map_err(map_report_err)?;

    if let Some(out) = &args.out {
        write_artifacts(out, &result)?;
        write_reports(args, &model, out)?;
        write_exports(args, &ap, out)?;
    }

    if !args.quiet {
        print!("{}", render_text(&model));
        if let Some(out) = &args.out {
            eprintln!("run: artifacts written to {}", out.display());
        }
    }
    Ok(())
}

// ----------------------------- Outputs -----------------------------

fn write_artifacts(out_dir: &Path, result: &ResultDoc) -> Result<(), MainError> {
    fs::create_dir_all(out_dir)
        .map_err(|e| MainError::Io(format!("mkdir {}: {e}", out_dir.display())))?;
    write_canonical_file(&out_dir.join("result.json"), result).map_err(map_io_err)
}

fn write_reports(args: &Args, model: &ReportModel, out_dir: &Path) -> Result<(), MainError> {
    for name in &args.render {
        let format = match name.as_str() {
            "json" => RenderFormat::Json,
            "html" => RenderFormat::Html,
            "text" => RenderFormat::Text,
            other => return Err(MainError::Render(format!("unknown renderer: {other}"))),
        };
        let body = render(model, format).map_err(map_report_err)?;
        write_atomic(&out_dir.join(format.file_name()), body.as_bytes()).map_err(map_io_err)?;
    }
    Ok(())
}

fn write_exports(args: &Args, ap: &Apportionment, out_dir: &Path) -> Result<(), MainError> {
    let rows: &[Candidate] = &ap.candidates;
    for name in &args.export {
        let (file, body) = match name.as_str() {
            "csv" => ("rows.csv", rows_to_csv(rows)),
            "json" => ("rows.json", rows_to_json(rows).map_err(map_io_err)?),
            other => return Err(MainError::Validation(format!("unknown export: {other}"))),
        };
        write_atomic(&out_dir.join(file), body.as_bytes()).map_err(map_io_err)?;
    }
    Ok(())
}
