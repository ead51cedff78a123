//! Batch readers for the raw inputs.
//!
//! Acquisition failures never abort a run: the `read_*` wrappers log the
//! error and return an empty batch. The `try_read_*` variants expose the
//! typed error for callers that want it.

use serde_json::{Map, Value};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FeedError {
    #[error("{0} not found")]
    NotFound(PathBuf),

    #[error("permission denied reading {0}")]
    PermissionDenied(PathBuf),

    #[error("cannot read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl FeedError {
    fn from_io(path: &Path, source: std::io::Error) -> Self {
        match source.kind() {
            ErrorKind::NotFound => FeedError::NotFound(path.to_path_buf()),
            ErrorKind::PermissionDenied => FeedError::PermissionDenied(path.to_path_buf()),
            _ => FeedError::Io {
                path: path.to_path_buf(),
                source,
            },
        }
    }
}

/// Read every line of an audit log. Invalid UTF-8 is replaced, not fatal.
pub async fn try_read_audit_log(path: &Path) -> Result<Vec<String>, FeedError> {
    let bytes = tokio::fs::read(path)
        .await
        .map_err(|e| FeedError::from_io(path, e))?;
    Ok(String::from_utf8_lossy(&bytes)
        .lines()
        .map(str::to_string)
        .collect())
}

/// [`try_read_audit_log`], logging failures and returning no lines.
pub async fn read_audit_log(path: &Path) -> Vec<String> {
    match try_read_audit_log(path).await {
        Ok(lines) => {
            tracing::info!(lines = lines.len(), path = %path.display(), "read audit log");
            lines
        }
        Err(e) => {
            tracing::error!(error = %e, "failed to read audit log");
            Vec::new()
        }
    }
}

/// Read up to `max_events` flat Sysmon records from a JSON-lines file.
///
/// Blank lines are ignored; lines that are not JSON objects are skipped with
/// a warning.
pub async fn try_read_sysmon_records(
    path: &Path,
    max_events: usize,
) -> Result<Vec<Map<String, Value>>, FeedError> {
    let bytes = tokio::fs::read(path)
        .await
        .map_err(|e| FeedError::from_io(path, e))?;
    let text = String::from_utf8_lossy(&bytes);

    let mut records = Vec::new();
    for (lineno, line) in text.lines().enumerate() {
        if records.len() >= max_events {
            tracing::info!(max_events, "reached max events; stopping collection");
            break;
        }
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        match serde_json::from_str::<Value>(line) {
            Ok(Value::Object(record)) => records.push(record),
            Ok(_) => tracing::warn!(line = lineno + 1, "sysmon record is not a JSON object"),
            Err(e) => tracing::warn!(line = lineno + 1, error = %e, "malformed sysmon record"),
        }
    }
    Ok(records)
}

/// [`try_read_sysmon_records`], logging failures and returning no records.
pub async fn read_sysmon_records(path: &Path, max_events: usize) -> Vec<Map<String, Value>> {
    match try_read_sysmon_records(path, max_events).await {
        Ok(records) => {
            tracing::info!(records = records.len(), path = %path.display(), "read sysmon records");
            records
        }
        Err(e) => {
            tracing::error!(error = %e, "failed to read sysmon records");
            Vec::new()
        }
    }
}
