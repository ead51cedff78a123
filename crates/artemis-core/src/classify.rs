//! Event classification seam shared by every feed.

use serde_json::Value;
use std::collections::{BTreeMap, BTreeSet};

/// Derives the semantic event type of a parsed record.
///
/// auditd classification works from syscall numbers, companion record types
/// and rule keys; Sysmon classification is a direct Event ID lookup. Both sit
/// behind this trait so a feed can be swapped without touching the
/// standardization engine.
pub trait Classify: Send + Sync {
    fn classify(&self, fields: &BTreeMap<String, Value>, line_types: &BTreeSet<String>) -> String;
}
