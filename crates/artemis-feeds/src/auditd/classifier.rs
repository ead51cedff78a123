//! Semantic classification of auditd events.

use artemis_core::config::LinuxConfig;
use artemis_core::Classify;
use serde_json::Value;
use std::collections::{BTreeMap, BTreeSet};

pub const PROCESS_EVENT: &str = "ProcessEvent";
pub const FILE_EVENT: &str = "FileEvent";
pub const NETWORK_EVENT: &str = "NetworkEvent";
pub const OTHER_EVENT: &str = "OtherEvent";

const AUDIT_CONTROL_COMMS: &[&str] = &["auditctl"];
const AUDIT_CONTROL_EXES: &[&str] = &["/usr/sbin/auditctl", "/sbin/auditctl"];

const PROCESS_KEY_MARKERS: &[&str] = &["exec", "process_create"];
const FILE_KEY_MARKERS: &[&str] = &["file_access", "file_mod"];
const NETWORK_KEY_MARKERS: &[&str] = &["net_conn", "socket_op"];

/// Classifies auditd events from the syscall number, the companion record
/// types present, and the audit rule key.
///
/// A syscall number plus its companion record is the reliable signal; rule
/// key substrings cover custom rules that do not key on standard syscalls.
/// File and network signals are checked after the process signal and
/// override it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuditdClassifier {
    pub exec_syscalls: BTreeSet<String>,
    pub file_syscalls: BTreeSet<String>,
    pub socket_syscalls: BTreeSet<String>,
}

impl AuditdClassifier {
    pub fn from_config(config: &LinuxConfig) -> Self {
        Self {
            exec_syscalls: config.exec_syscalls.clone(),
            file_syscalls: config.file_syscalls.clone(),
            socket_syscalls: config.socket_syscalls.clone(),
        }
    }
}

impl Default for AuditdClassifier {
    fn default() -> Self {
        Self::from_config(&LinuxConfig::default())
    }
}

impl Classify for AuditdClassifier {
    fn classify(&self, fields: &BTreeMap<String, Value>, line_types: &BTreeSet<String>) -> String {
        let text = |name: &str| fields.get(name).and_then(Value::as_str);
        let has = |record: &str| line_types.contains(record);
        let syscall = text("syscall").filter(|_| has("SYSCALL"));
        let in_set = |set: &BTreeSet<String>| syscall.is_some_and(|s| set.contains(s));
        let key_has = |markers: &[&str]| {
            text("key").is_some_and(|key| markers.iter().any(|m| key.contains(m)))
        };

        let mut event_type = OTHER_EVENT;

        let audit_control = text("comm").is_some_and(|c| AUDIT_CONTROL_COMMS.contains(&c))
            || text("exe").is_some_and(|e| AUDIT_CONTROL_EXES.contains(&e));
        if (in_set(&self.exec_syscalls) && (has("PROCTITLE") || audit_control))
            || key_has(PROCESS_KEY_MARKERS)
        {
            event_type = PROCESS_EVENT;
        }

        if (in_set(&self.file_syscalls) && has("PATH")) || key_has(FILE_KEY_MARKERS) {
            event_type = FILE_EVENT;
        }

        if (in_set(&self.socket_syscalls) && has("SOCKADDR")) || key_has(NETWORK_KEY_MARKERS) {
            event_type = NETWORK_EVENT;
        }

        event_type.to_string()
    }
}
