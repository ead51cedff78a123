//! Mapping table: declarative per-event-type field routing.
//!
//! A mapping table is a JSON document keyed by event type. Each event type
//! maps to an object whose `_`-prefixed keys are metadata (`_event_type`,
//! `_action`) and whose remaining keys are original field names:
//!
//! ```json
//! {
//!   "ProcessCreate": {
//!     "_event_type": "process_creation",
//!     "_action": "create",
//!     "ProcessId": { "standard_field": "process.pid", "type": "integer" },
//!     "Hashes":    { "standard_field": "process.hashes", "handler": "parse_hashes" }
//!   }
//! }
//! ```
//!
//! The table is loaded once, validated up front, and then shared read-only.

use crate::diagnostics::{DiagnosticKind, Diagnostics};
use crate::error::{MappingError, Result};
use crate::handlers::FieldHandler;
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::path::Path;

// ---------------------------------------------------------------------------
// Field types and coercion
// ---------------------------------------------------------------------------

/// Target type of a mapped field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FieldType {
    Integer,
    Boolean,
    Float,
    String,
    /// Pass the value through unchanged.
    #[default]
    None,
}

impl FieldType {
    fn parse(name: &str) -> Option<Self> {
        match name {
            "integer" | "int" => Some(FieldType::Integer),
            "boolean" | "bool" => Some(FieldType::Boolean),
            "float" => Some(FieldType::Float),
            "string" | "str" => Some(FieldType::String),
            "none" => Some(FieldType::None),
            _ => None,
        }
    }

    /// Coerce `value` to this type. On failure the original value is kept and
    /// a [`DiagnosticKind::Coercion`] entry is recorded against `field`.
    pub fn coerce(self, field: &str, value: Value, diags: &mut Diagnostics) -> Value {
        let coerced = match self {
            FieldType::None => return value,
            FieldType::String => Some(Value::String(crate::value::to_text(&value))),
            FieldType::Integer => to_integer(&value),
            FieldType::Boolean => to_boolean(&value),
            FieldType::Float => to_float(&value),
        };
        match coerced {
            Some(v) => v,
            None => {
                diags.warn_field(
                    DiagnosticKind::Coercion,
                    field,
                    format!("cannot coerce {value} to {self:?}; keeping original value"),
                );
                value
            }
        }
    }
}

fn to_integer(value: &Value) -> Option<Value> {
    match value {
        Value::Number(n) if n.is_i64() || n.is_u64() => Some(value.clone()),
        Value::String(s) => s.trim().parse::<i64>().ok().map(Value::from),
        _ => None,
    }
}

fn to_boolean(value: &Value) -> Option<Value> {
    match value {
        Value::Bool(_) => Some(value.clone()),
        Value::Number(n) => match n.as_i64() {
            Some(0) => Some(Value::Bool(false)),
            Some(1) => Some(Value::Bool(true)),
            _ => None,
        },
        Value::String(s) => match s.trim().to_ascii_lowercase().as_str() {
            "true" | "yes" | "1" => Some(Value::Bool(true)),
            "false" | "no" | "0" => Some(Value::Bool(false)),
            _ => None,
        },
        _ => None,
    }
}

fn to_float(value: &Value) -> Option<Value> {
    let f = match value {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => s.trim().parse::<f64>().ok()?,
        _ => return None,
    };
    serde_json::Number::from_f64(f).map(Value::Number)
}

// ---------------------------------------------------------------------------
// Table types
// ---------------------------------------------------------------------------

/// How one original field projects into the standard event.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MappingEntry {
    /// Dotted destination path, e.g. `process.parent.pid`.
    pub standard_field: Option<String>,
    pub field_type: FieldType,
    pub handler: Option<FieldHandler>,
}

/// Routing rules for a single event type.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct EventMapping {
    /// `_event_type`: the standard event type label.
    pub event_type: Option<String>,
    /// `_action`: the standard action label.
    pub action: Option<String>,
    /// Any other `_`-prefixed metadata, kept verbatim.
    pub metadata: BTreeMap<String, Value>,
    pub fields: BTreeMap<String, MappingEntry>,
}

impl EventMapping {
    pub fn entry(&self, field: &str) -> Option<&MappingEntry> {
        self.fields.get(field)
    }
}

/// The full mapping table, keyed by parsed event type.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MappingTable {
    events: BTreeMap<String, EventMapping>,
}

impl MappingTable {
    /// Read and validate a mapping table from a JSON file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| MappingError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&text)
    }

    pub fn from_json_str(text: &str) -> Result<Self> {
        let doc: Value = serde_json::from_str(text)?;
        Self::from_value(&doc)
    }

    pub fn from_value(doc: &Value) -> Result<Self> {
        let Value::Object(root) = doc else {
            return Err(MappingError::InvalidEventType {
                event_type: String::new(),
                reason: "mapping document must be a JSON object".to_string(),
            });
        };

        let mut events = BTreeMap::new();
        for (event_type, body) in root {
            events.insert(event_type.clone(), parse_event_mapping(event_type, body)?);
        }
        Ok(Self { events })
    }

    pub fn get(&self, event_type: &str) -> Option<&EventMapping> {
        self.events.get(event_type)
    }

    pub fn event_types(&self) -> impl Iterator<Item = &str> {
        self.events.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

fn parse_event_mapping(event_type: &str, body: &Value) -> Result<EventMapping> {
    let Value::Object(obj) = body else {
        return Err(MappingError::InvalidEventType {
            event_type: event_type.to_string(),
            reason: "expected an object".to_string(),
        });
    };

    let mut mapping = EventMapping::default();
    for (key, value) in obj {
        if key.starts_with('_') {
            match key.as_str() {
                "_event_type" => mapping.event_type = Some(meta_string(event_type, key, value)?),
                "_action" => mapping.action = Some(meta_string(event_type, key, value)?),
                _ => {
                    mapping.metadata.insert(key.clone(), value.clone());
                }
            }
            continue;
        }
        mapping
            .fields
            .insert(key.clone(), parse_entry(event_type, key, value)?);
    }
    Ok(mapping)
}

fn meta_string(event_type: &str, key: &str, value: &Value) -> Result<String> {
    value
        .as_str()
        .map(str::to_string)
        .ok_or_else(|| MappingError::InvalidEventType {
            event_type: event_type.to_string(),
            reason: format!("{key} must be a string"),
        })
}

fn parse_entry(event_type: &str, field: &str, value: &Value) -> Result<MappingEntry> {
    let invalid = |reason: String| MappingError::InvalidEntry {
        event_type: event_type.to_string(),
        field: field.to_string(),
        reason,
    };

    let obj: &Map<String, Value> = value
        .as_object()
        .ok_or_else(|| invalid("entry must be an object".to_string()))?;

    let standard_field = match obj.get("standard_field") {
        None | Some(Value::Null) => None,
        Some(Value::String(s)) if s.trim().is_empty() => None,
        Some(Value::String(s)) => Some(s.clone()),
        Some(other) => return Err(invalid(format!("standard_field must be a string, got {other}"))),
    };

    let field_type = match obj.get("type") {
        None | Some(Value::Null) => FieldType::None,
        Some(Value::String(s)) => {
            FieldType::parse(s).ok_or_else(|| invalid(format!("unknown type {s:?}")))?
        }
        Some(other) => return Err(invalid(format!("type must be a string, got {other}"))),
    };

    let handler = match obj.get("handler") {
        None | Some(Value::Null) => None,
        Some(Value::String(name)) => Some(name.parse::<FieldHandler>().map_err(|handler| {
            MappingError::UnknownHandler {
                event_type: event_type.to_string(),
                field: field.to_string(),
                handler,
            }
        })?),
        Some(other) => return Err(invalid(format!("handler must be a string, got {other}"))),
    };

    Ok(MappingEntry {
        standard_field,
        field_type,
        handler,
    })
}
