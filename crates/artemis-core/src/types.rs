//! Core types for artemis-core.
//!
//! This module defines the records that flow through the normalization
//! pipeline: the source-vocabulary [`ParsedEvent`] produced by a feed parser,
//! and the fixed-shape [`StandardEvent`] produced by the standardization
//! engine. [`Os`] and [`EventSource`] discriminate where a record came from.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::{BTreeMap, BTreeSet};

/// Operating system a record was collected on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Os {
    Linux,
    Windows,
}

impl Os {
    /// The telemetry source implied by the operating system.
    pub fn event_source(self) -> EventSource {
        match self {
            Os::Windows => EventSource::Sysmon,
            Os::Linux => EventSource::Auditd,
        }
    }
}

impl std::fmt::Display for Os {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Os::Linux => write!(f, "linux"),
            Os::Windows => write!(f, "windows"),
        }
    }
}

/// Which telemetry provider produced a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventSource {
    Auditd,
    Sysmon,
}

impl std::fmt::Display for EventSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EventSource::Auditd => write!(f, "auditd"),
            EventSource::Sysmon => write!(f, "sysmon"),
        }
    }
}

/// A single event in its source vocabulary, annotated with a derived type.
///
/// `fields` holds every key the feed parser extracted (auditd field names or
/// Sysmon `Data Name` attributes). The remaining members are metadata the
/// parser derived from the record envelope. The struct serializes to one flat
/// JSON object, with `fields` flattened alongside the metadata keys.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParsedEvent {
    pub os: Os,
    pub event_source: EventSource,
    /// Semantic classification, e.g. `ProcessEvent` or `NetworkConnect`.
    pub event_type: String,
    /// Raw timestamp exactly as it appeared in the source.
    pub timestamp: Option<String>,
    /// ISO-8601 UTC rendering of `timestamp`, when it could be converted.
    pub event_utc_time: Option<String>,
    pub hostname: Option<String>,
    /// Sysmon `EventID`, or the auditd serial number.
    #[serde(rename = "original_event_id")]
    pub event_id: Option<String>,
    /// Record-type tags observed across the event's lines (auditd only).
    #[serde(rename = "_line_types", skip_serializing_if = "BTreeSet::is_empty")]
    pub line_types: BTreeSet<String>,
    /// Lines the event was reconstructed from (auditd only).
    #[serde(rename = "original_raw_lines", skip_serializing_if = "Vec::is_empty")]
    pub raw_lines: Vec<String>,
    #[serde(flatten)]
    pub fields: BTreeMap<String, Value>,
}

impl ParsedEvent {
    /// An empty event for `os`, classified as `event_type`.
    pub fn new(os: Os, event_type: impl Into<String>) -> Self {
        Self {
            os,
            event_source: os.event_source(),
            event_type: event_type.into(),
            timestamp: None,
            event_utc_time: None,
            hostname: None,
            event_id: None,
            line_types: BTreeSet::new(),
            raw_lines: Vec::new(),
            fields: BTreeMap::new(),
        }
    }

    /// String view of a field, if present and textual.
    pub fn field_str(&self, name: &str) -> Option<&str> {
        self.fields.get(name).and_then(Value::as_str)
    }

    /// The whole event as a flat JSON object.
    pub fn to_object(&self) -> Map<String, Value> {
        match serde_json::to_value(self) {
            Ok(Value::Object(map)) => map,
            _ => Map::new(),
        }
    }
}

/// Canonical output record. The top-level shape never varies.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StandardEvent {
    pub agent_id: String,
    pub event_timestamp: Option<String>,
    pub hostname: Option<String>,
    pub os: Os,
    pub event_source: EventSource,
    pub original_event_id: Option<String>,
    pub standard_event_type: String,
    pub action: Option<String>,
    pub process: Map<String, Value>,
    pub network: Map<String, Value>,
    pub file: Map<String, Value>,
    pub registry: Map<String, Value>,
    pub other_data: Map<String, Value>,
}

/// The nested sections of a [`StandardEvent`] a mapping may write into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Section {
    Process,
    Network,
    File,
    Registry,
}

impl Section {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "process" => Some(Section::Process),
            "network" => Some(Section::Network),
            "file" => Some(Section::File),
            "registry" => Some(Section::Registry),
            _ => None,
        }
    }
}

impl StandardEvent {
    /// A record with the fixed shape and every section empty.
    pub fn base(agent_id: impl Into<String>, os: Os, standard_event_type: impl Into<String>) -> Self {
        Self {
            agent_id: agent_id.into(),
            event_timestamp: None,
            hostname: None,
            os,
            event_source: os.event_source(),
            original_event_id: None,
            standard_event_type: standard_event_type.into(),
            action: None,
            process: Map::new(),
            network: Map::new(),
            file: Map::new(),
            registry: Map::new(),
            other_data: Map::new(),
        }
    }

    pub fn section(&self, section: Section) -> &Map<String, Value> {
        match section {
            Section::Process => &self.process,
            Section::Network => &self.network,
            Section::File => &self.file,
            Section::Registry => &self.registry,
        }
    }

    pub fn section_mut(&mut self, section: Section) -> &mut Map<String, Value> {
        match section {
            Section::Process => &mut self.process,
            Section::Network => &mut self.network,
            Section::File => &mut self.file,
            Section::Registry => &mut self.registry,
        }
    }
}
