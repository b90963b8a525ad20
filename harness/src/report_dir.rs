//! Report directory persistence: write, read and verify a route run on disk.
//!
//! # Directory layout
//!
//! ```text
//! <dir>/
//!   report.json          route summary (pretty JSON)
//!   trace.json           canonical JSON of the search trace
//!   trace_digest.txt     ASCII digest of trace.json ("sha256:...")
//! ```
//!
//! The directory path is never part of the digest. Verification recomputes
//! the digest from `trace.json` and requires both `trace_digest.txt` and the
//! report's `trace_digest` field to match it.

use std::path::{Path, PathBuf};

use tracing::debug;
use wayfind_search::canon::canonical_hash;
use wayfind_search::trace::DOMAIN_SEARCH_TRACE;

use crate::error::HarnessError;
use crate::runner::{RouteReport, RouteRun};

pub const REPORT_FILENAME: &str = "report.json";
pub const TRACE_FILENAME: &str = "trace.json";
pub const DIGEST_FILENAME: &str = "trace_digest.txt";

/// Contents of a report directory as stored.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportDir {
    pub report: RouteReport,
    pub trace_bytes: Vec<u8>,
    pub stored_digest: String,
}

/// Write `run` into `dir`, creating the directory if needed.
///
/// Existing files with the same names are overwritten.
///
/// # Errors
///
/// Returns [`HarnessError::Io`] on filesystem failure and
/// [`HarnessError::Canon`] or [`HarnessError::Json`] if serialization fails.
pub fn write_report_dir(dir: &Path, run: &RouteRun) -> Result<(), HarnessError> {
    std::fs::create_dir_all(dir).map_err(|e| HarnessError::io(dir, e))?;

    let trace_bytes = run.outcome.trace.to_canonical_json_bytes()?;
    let report_bytes = serde_json::to_vec_pretty(&run.report)?;

    write_file(&dir.join(REPORT_FILENAME), &report_bytes)?;
    write_file(&dir.join(TRACE_FILENAME), &trace_bytes)?;
    write_file(
        &dir.join(DIGEST_FILENAME),
        run.report.trace_digest.as_bytes(),
    )?;

    debug!(dir = %dir.display(), digest = %run.report.trace_digest, "wrote report directory");
    Ok(())
}

/// Read a report directory without checking digests.
///
/// # Errors
///
/// Returns [`HarnessError::MissingFile`] if one of the three files is absent,
/// [`HarnessError::Io`] if a file cannot be read and [`HarnessError::Json`]
/// if `report.json` does not parse.
pub fn read_report_dir(dir: &Path) -> Result<ReportDir, HarnessError> {
    let report_bytes = read_file(dir, REPORT_FILENAME)?;
    let trace_bytes = read_file(dir, TRACE_FILENAME)?;
    let digest_bytes = read_file(dir, DIGEST_FILENAME)?;

    let report: RouteReport = serde_json::from_slice(&report_bytes)?;
    let stored_digest = String::from_utf8_lossy(&digest_bytes).trim().to_owned();

    Ok(ReportDir {
        report,
        trace_bytes,
        stored_digest,
    })
}

/// Read a report directory and check its digests.
///
/// # Errors
///
/// Any error of [`read_report_dir`], plus [`HarnessError::DigestMismatch`] if
/// the digest recomputed from `trace.json` differs from `trace_digest.txt`
/// or from the report's `trace_digest`.
pub fn verify_report_dir(dir: &Path) -> Result<ReportDir, HarnessError> {
    let contents = read_report_dir(dir)?;
    let recomputed = canonical_hash(DOMAIN_SEARCH_TRACE, &contents.trace_bytes);

    for stored in [&contents.stored_digest, &contents.report.trace_digest] {
        if *stored != recomputed {
            return Err(HarnessError::DigestMismatch {
                stored: stored.clone(),
                recomputed,
            });
        }
    }
    Ok(contents)
}

fn write_file(path: &Path, bytes: &[u8]) -> Result<(), HarnessError> {
    std::fs::write(path, bytes).map_err(|e| HarnessError::io(path, e))
}

fn read_file(dir: &Path, name: &str) -> Result<Vec<u8>, HarnessError> {
    let path: PathBuf = dir.join(name);
    if !path.is_file() {
        return Err(HarnessError::MissingFile {
            name: name.to_owned(),
        });
    }
    std::fs::read(&path).map_err(|e| HarnessError::io(path, e))
}
