//! Test builders: ergonomic constructors for `ParsedEvent` and mapping tables.
//!
//! These builders are designed for readability in test assertions, not for
//! production use. They panic on invalid input rather than returning `Result`.

use artemis_core::{MappingTable, Os, ParsedEvent};
use serde_json::{json, Map, Value};

// ---------------------------------------------------------------------------
// ParsedEventBuilder
// ---------------------------------------------------------------------------

/// Fluent builder for [`ParsedEvent`] test fixtures.
///
/// # Example
///
/// ```rust
/// let event = ParsedEventBuilder::windows("ProcessCreate")
///     .event_id("1")
///     .field("ProcessId", "4242")
///     .build();
/// ```
pub struct ParsedEventBuilder {
    event: ParsedEvent,
}

impl ParsedEventBuilder {
    pub fn new(os: Os, event_type: impl Into<String>) -> Self {
        Self {
            event: ParsedEvent::new(os, event_type),
        }
    }

    pub fn linux(event_type: impl Into<String>) -> Self {
        Self::new(Os::Linux, event_type)
    }

    pub fn windows(event_type: impl Into<String>) -> Self {
        Self::new(Os::Windows, event_type)
    }

    pub fn hostname(mut self, hostname: impl Into<String>) -> Self {
        self.event.hostname = Some(hostname.into());
        self
    }

    pub fn event_id(mut self, id: impl Into<String>) -> Self {
        self.event.event_id = Some(id.into());
        self
    }

    pub fn timestamp(mut self, raw: impl Into<String>) -> Self {
        self.event.timestamp = Some(raw.into());
        self
    }

    pub fn utc(mut self, utc: impl Into<String>) -> Self {
        self.event.event_utc_time = Some(utc.into());
        self
    }

    pub fn field(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.event.fields.insert(name.into(), value.into());
        self
    }

    pub fn line_type(mut self, tag: impl Into<String>) -> Self {
        self.event.line_types.insert(tag.into());
        self
    }

    pub fn raw_line(mut self, line: impl Into<String>) -> Self {
        self.event.raw_lines.push(line.into());
        self
    }

    pub fn build(self) -> ParsedEvent {
        self.event
    }
}

// ---------------------------------------------------------------------------
// MappingBuilder
// ---------------------------------------------------------------------------

/// Fluent builder for single-event-type [`MappingTable`]s.
///
/// # Example
///
/// ```rust
/// let table = MappingBuilder::new("ProcessCreate")
///     .meta("_event_type", "process_creation")
///     .entry("ProcessId", "process.pid", "integer")
///     .build();
/// ```
pub struct MappingBuilder {
    event_type: String,
    body: Map<String, Value>,
}

impl MappingBuilder {
    pub fn new(event_type: impl Into<String>) -> Self {
        Self {
            event_type: event_type.into(),
            body: Map::new(),
        }
    }

    pub fn meta(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.body.insert(key.to_string(), value.into());
        self
    }

    pub fn entry(mut self, field: &str, target: &str, field_type: &str) -> Self {
        self.body.insert(
            field.to_string(),
            json!({"standard_field": target, "type": field_type}),
        );
        self
    }

    pub fn handler(mut self, field: &str, target: &str, handler: &str) -> Self {
        self.body.insert(
            field.to_string(),
            json!({"standard_field": target, "handler": handler}),
        );
        self
    }

    /// An entry with no `standard_field`.
    pub fn untargeted(mut self, field: &str) -> Self {
        self.body.insert(field.to_string(), json!({"type": "string"}));
        self
    }

    pub fn build(self) -> MappingTable {
        let mut root = Map::new();
        root.insert(self.event_type, Value::Object(self.body));
        MappingTable::from_value(&Value::Object(root)).expect("builder produced an invalid table")
    }
}
