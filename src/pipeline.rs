//! Batch pipeline: read all → group all → parse all → standardize all.
//!
//! The `normalize_*` functions are synchronous and pure apart from the
//! [`Diagnostics`] they return. The async [`run`] driver loads the mapping
//! table, reads the input through `artemis-feeds`, and runs normalization on a
//! blocking worker.

use anyhow::Context;
use artemis_core::config::Config;
use artemis_core::{standardize, Diagnostics, MappingTable, StandardEvent};
use artemis_feeds::{group_lines, reader, sysmon, AuditdParser};
use serde_json::{Map, Value};
use std::path::Path;
use std::sync::Arc;

/// Which telemetry source a run normalizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum Source {
    Linux,
    Windows,
}

impl std::fmt::Display for Source {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Source::Linux => write!(f, "linux"),
            Source::Windows => write!(f, "windows"),
        }
    }
}

/// Output of one normalization batch.
#[derive(Debug, Default)]
pub struct Batch {
    pub events: Vec<StandardEvent>,
    pub diagnostics: Diagnostics,
}

/// Normalize raw auditd lines.
pub fn normalize_linux<S: AsRef<str>>(
    lines: &[S],
    parser: &AuditdParser,
    agent_id: &str,
    table: &MappingTable,
) -> Batch {
    let mut diagnostics = Diagnostics::new();
    let groups = group_lines(lines, &mut diagnostics);

    let mut events = Vec::with_capacity(groups.len());
    for group in &groups {
        if let Some(parsed) = parser.parse(group, &mut diagnostics) {
            events.push(standardize(&parsed, agent_id, table, &mut diagnostics));
        }
    }
    Batch {
        events,
        diagnostics,
    }
}

/// Normalize flat Sysmon records.
pub fn normalize_windows(
    records: &[Map<String, Value>],
    agent_id: &str,
    table: &MappingTable,
) -> Batch {
    let mut diagnostics = Diagnostics::new();
    let events = records
        .iter()
        .map(|record| {
            let parsed = sysmon::parse_record(record, &mut diagnostics);
            standardize(&parsed, agent_id, table, &mut diagnostics)
        })
        .collect();
    Batch {
        events,
        diagnostics,
    }
}

/// Paths and identity for one run, resolved from config and CLI overrides.
#[derive(Debug, Clone)]
pub struct RunOptions {
    pub source: Source,
    pub input: std::path::PathBuf,
    pub mapping: std::path::PathBuf,
    pub agent_id: String,
}

impl RunOptions {
    /// Take the input and mapping paths for `source` from `config`.
    pub fn from_config(source: Source, config: &Config) -> Self {
        let (input, mapping) = match source {
            Source::Linux => (
                config.linux.audit_log_path.clone(),
                config.linux.mapping_path.clone(),
            ),
            Source::Windows => (
                config.windows.records_path.clone(),
                config.windows.mapping_path.clone(),
            ),
        };
        Self {
            source,
            input,
            mapping,
            agent_id: config.agent.agent_id.clone(),
        }
    }
}

/// Load the mapping table for a run. A broken table aborts the run.
pub fn load_mapping(path: &Path) -> anyhow::Result<Arc<MappingTable>> {
    let table = MappingTable::from_path(path)
        .with_context(|| format!("loading mapping table {}", path.display()))?;
    tracing::info!(event_types = table.len(), path = %path.display(), "loaded mapping table");
    tracing::debug!(
        event_types = ?table.event_types().collect::<Vec<_>>(),
        "mapped event types"
    );
    Ok(Arc::new(table))
}

/// Run one batch end to end and return the standard events.
///
/// Input acquisition failures yield zero events; only a mapping table that
/// cannot be loaded is an error.
pub async fn run(options: &RunOptions, config: &Config) -> anyhow::Result<Vec<StandardEvent>> {
    let table = load_mapping(&options.mapping)?;
    let agent_id = options.agent_id.clone();

    let batch = match options.source {
        Source::Linux => {
            let lines = reader::read_audit_log(&options.input).await;
            let parser = AuditdParser::from_config(&config.linux, config.agent.hostname.clone());
            tokio::task::spawn_blocking(move || {
                normalize_linux(&lines, &parser, &agent_id, &table)
            })
            .await
            .context("linux normalization worker failed")?
        }
        Source::Windows => {
            let records =
                reader::read_sysmon_records(&options.input, config.windows.max_events).await;
            tokio::task::spawn_blocking(move || normalize_windows(&records, &agent_id, &table))
                .await
                .context("windows normalization worker failed")?
        }
    };

    batch.diagnostics.emit();
    tracing::info!(
        source = %options.source,
        events = batch.events.len(),
        warnings = batch.diagnostics.len(),
        "normalization complete"
    );
    Ok(batch.events)
}

/// Serialize events as JSON lines.
pub fn write_json_lines<W: std::io::Write>(
    mut out: W,
    events: &[StandardEvent],
) -> anyhow::Result<()> {
    for event in events {
        serde_json::to_writer(&mut out, event)?;
        out.write_all(b"\n")?;
    }
    out.flush()?;
    Ok(())
}
