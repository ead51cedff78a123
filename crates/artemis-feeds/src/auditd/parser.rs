//! Event group → [`ParsedEvent`].

use super::classifier::AuditdClassifier;
use super::tokenizer::{tokenize, Pair};
use super::{parse_header, record_type, EventGroup};
use artemis_core::config::LinuxConfig;
use artemis_core::{hex, timestamp, Classify, DiagnosticKind, Diagnostics, Os, ParsedEvent};
use serde_json::Value;
use std::collections::BTreeSet;

/// Turns grouped auditd records into classified parsed events.
#[derive(Debug, Clone)]
pub struct AuditdParser {
    /// Fields whose values auditd may hex-encode.
    pub hex_fields: BTreeSet<String>,
    /// Host name used when the records carry no `node` field.
    pub hostname: Option<String>,
    pub classifier: AuditdClassifier,
}

impl AuditdParser {
    pub fn from_config(config: &LinuxConfig, hostname: Option<String>) -> Self {
        Self {
            hex_fields: config.hex_fields.clone(),
            hostname,
            classifier: AuditdClassifier::from_config(config),
        }
    }

    /// Parse one event group. Returns `None` only for an empty group.
    ///
    /// Later occurrences of a key overwrite earlier ones, across all lines of
    /// the group. Timestamp and hex defects are recorded in `diags`; they
    /// never discard the event.
    pub fn parse(&self, group: &EventGroup, diags: &mut Diagnostics) -> Option<ParsedEvent> {
        let first = group.lines.first()?;
        let mut event = ParsedEvent::new(Os::Linux, super::OTHER_EVENT);

        if let Some(header) = parse_header(first) {
            event.timestamp = Some(header.timestamp.to_string());
            event.event_id = Some(header.serial.to_string());
            event.event_utc_time = Some(timestamp::audit_to_utc(header.timestamp, diags));
        }

        for line in &group.lines {
            if let Some(tag) = record_type(line) {
                event.line_types.insert(tag.to_string());
            }
            let body = match parse_header(line) {
                Some(header) => &line[header.end..],
                None => line.as_str(),
            };
            for pair in tokenize(body.trim()) {
                let value = self.decode(&pair, diags);
                event.fields.insert(pair.key.to_string(), Value::String(value));
            }
        }
        event.raw_lines = group.lines.clone();

        event.hostname = event
            .field_str("node")
            .map(str::to_string)
            .or_else(|| self.hostname.clone());
        event.event_type = self.classifier.classify(&event.fields, &event.line_types);
        Some(event)
    }

    /// Decode a hex-prone field. Values that are not valid hex are kept
    /// unchanged; only unquoted ones raise a `HexDecode` warning, since auditd
    /// writes plain-text values of these fields in double quotes
    /// (`comm="abc"` is kept silently, `comm=abc` warns).
    fn decode(&self, pair: &Pair<'_>, diags: &mut Diagnostics) -> String {
        if !self.hex_fields.contains(pair.key) {
            return pair.value.to_string();
        }
        if hex::looks_like_hex(pair.value) {
            return match hex::decode_text(pair.value) {
                Ok(text) => text,
                Err(e) => {
                    diags.warn_field(
                        DiagnosticKind::HexDecode,
                        pair.key,
                        format!("cannot decode hex value {:?}: {e}; keeping it", pair.value),
                    );
                    pair.value.to_string()
                }
            };
        }
        // auditd hex-encodes unquoted values of these fields; quoted values
        // are already plain text.
        if !pair.quoted {
            diags.warn_field(
                DiagnosticKind::HexDecode,
                pair.key,
                format!("value {:?} is not valid hex; keeping it", pair.value),
            );
        }
        pair.value.to_string()
    }
}

impl Default for AuditdParser {
    fn default() -> Self {
        Self::from_config(&LinuxConfig::default(), None)
    }
}
