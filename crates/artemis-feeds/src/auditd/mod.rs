//! auditd feed: line grouping, parsing and classification.
//!
//! An auditd event is spread across several records (`SYSCALL`, `PATH`,
//! `PROCTITLE`, ...) that share a `msg=audit(<secs>.<frac>:<serial>):` header.
//! [`group_lines`] reassembles those records into [`EventGroup`]s, and
//! [`AuditdParser`] turns each group into a classified
//! [`ParsedEvent`](artemis_core::ParsedEvent).

mod classifier;
mod parser;
pub mod tokenizer;

pub use classifier::{
    AuditdClassifier, FILE_EVENT, NETWORK_EVENT, OTHER_EVENT, PROCESS_EVENT,
};
pub use parser::AuditdParser;

use artemis_core::{DiagnosticKind, Diagnostics};
use regex::Regex;
use std::sync::LazyLock;

static HEADER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^type=(\w+)\s+msg=audit\((\d+\.\d+):(\d+)\):")
        .expect("audit header pattern must compile")
});

static RECORD_TYPE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^type=(\w+)").expect("record type pattern must compile"));

/// The `type=<TAG> msg=audit(<ts>:<serial>):` prefix of a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuditHeader<'a> {
    pub record_type: &'a str,
    pub timestamp: &'a str,
    pub serial: &'a str,
    /// Byte offset just past the header's trailing colon.
    pub end: usize,
}

/// Match the group-start header at the beginning of `line`.
pub fn parse_header(line: &str) -> Option<AuditHeader<'_>> {
    let caps = HEADER.captures(line)?;
    Some(AuditHeader {
        record_type: caps.get(1)?.as_str(),
        timestamp: caps.get(2)?.as_str(),
        serial: caps.get(3)?.as_str(),
        end: caps.get(0)?.end(),
    })
}

/// The `type=` tag of a line, with or without a full header.
pub fn record_type(line: &str) -> Option<&str> {
    RECORD_TYPE
        .captures(line)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// Contiguous raw lines sharing one (timestamp, serial) identity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventGroup {
    pub timestamp: String,
    pub serial: String,
    pub lines: Vec<String>,
}

impl EventGroup {
    fn open(header: &AuditHeader<'_>, line: &str) -> Self {
        Self {
            timestamp: header.timestamp.to_string(),
            serial: header.serial.to_string(),
            lines: vec![line.to_string()],
        }
    }

    fn same_identity(&self, header: &AuditHeader<'_>) -> bool {
        self.timestamp == header.timestamp && self.serial == header.serial
    }
}

/// Partition `lines` into event groups in a single forward pass.
///
/// Lines are trimmed and blank lines skipped. A header with a new identity
/// closes the open group; a header repeating the open identity joins it.
/// Lines without a header continue the open group, or are dropped with an
/// [`DiagnosticKind::OrphanLine`] entry when no group is open.
pub fn group_lines<I, S>(lines: I, diags: &mut Diagnostics) -> Vec<EventGroup>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut groups = Vec::new();
    let mut current: Option<EventGroup> = None;

    for line in lines {
        let line = line.as_ref().trim();
        if line.is_empty() {
            continue;
        }

        let Some(header) = parse_header(line) else {
            match current.as_mut() {
                Some(group) => group.lines.push(line.to_string()),
                None => diags.warn(
                    DiagnosticKind::OrphanLine,
                    format!("skipping line outside any audit event: {line}"),
                ),
            }
            continue;
        };

        let continues = current
            .as_ref()
            .is_some_and(|group| group.same_identity(&header));
        if continues {
            if let Some(group) = current.as_mut() {
                group.lines.push(line.to_string());
            }
        } else if let Some(done) = current.replace(EventGroup::open(&header, line)) {
            groups.push(done);
        }
    }

    groups.extend(current);
    groups
}
