//! Named field handlers.
//!
//! A mapping entry may name a handler that pre-transforms the raw value
//! before type coercion. Handlers are a closed set resolved by name when the
//! mapping table is loaded, so an unknown name is a load-time error rather
//! than a per-event surprise.

use crate::diagnostics::{DiagnosticKind, Diagnostics};
use crate::hex;
use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;

/// The transforms a mapping entry can request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldHandler {
    /// `"SHA1=ab,MD5=cd"` → `{"sha1": "ab", "md5": "cd"}`.
    ParseHashes,
    /// Hex text → UTF-8 text.
    DecodeHex,
    Lowercase,
}

const HANDLERS: &[(&str, FieldHandler)] = &[
    ("parse_hashes", FieldHandler::ParseHashes),
    ("decode_hex", FieldHandler::DecodeHex),
    ("lowercase", FieldHandler::Lowercase),
];

impl FieldHandler {
    pub fn name(self) -> &'static str {
        HANDLERS
            .iter()
            .find(|(_, h)| *h == self)
            .map(|(name, _)| *name)
            .unwrap_or("unknown")
    }

    /// Apply the handler. On failure the original value is returned and a
    /// [`DiagnosticKind::Handler`] entry is recorded against `field`.
    pub fn apply(self, field: &str, value: &Value, diags: &mut Diagnostics) -> Value {
        match self {
            FieldHandler::ParseHashes => parse_hashes(field, value, diags),
            FieldHandler::DecodeHex => decode_hex(field, value, diags),
            FieldHandler::Lowercase => match value {
                Value::String(s) => Value::String(s.to_lowercase()),
                other => other.clone(),
            },
        }
    }
}

impl FromStr for FieldHandler {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        HANDLERS
            .iter()
            .find(|(name, _)| *name == s)
            .map(|(_, h)| *h)
            .ok_or_else(|| s.to_string())
    }
}

impl fmt::Display for FieldHandler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

fn parse_hashes(field: &str, value: &Value, diags: &mut Diagnostics) -> Value {
    let Some(text) = value.as_str() else {
        diags.warn_field(
            DiagnosticKind::Handler,
            field,
            "parse_hashes expects a string value",
        );
        return value.clone();
    };

    let mut hashes = Map::new();
    for part in text.split(',').map(str::trim).filter(|p| !p.is_empty()) {
        match part.split_once('=') {
            Some((algo, digest)) if !algo.trim().is_empty() && !digest.trim().is_empty() => {
                hashes.insert(
                    algo.trim().to_lowercase(),
                    Value::String(digest.trim().to_string()),
                );
            }
            _ => diags.warn_field(
                DiagnosticKind::Handler,
                field,
                format!("skipping malformed hash entry {part:?}"),
            ),
        }
    }

    if hashes.is_empty() {
        diags.warn_field(
            DiagnosticKind::Handler,
            field,
            format!("no hashes found in {text:?}"),
        );
        return value.clone();
    }
    Value::Object(hashes)
}

fn decode_hex(field: &str, value: &Value, diags: &mut Diagnostics) -> Value {
    let Some(text) = value.as_str() else {
        return value.clone();
    };
    match hex::decode_text(text) {
        Ok(decoded) => Value::String(decoded),
        Err(e) => {
            diags.warn_field(
                DiagnosticKind::Handler,
                field,
                format!("cannot hex-decode {text:?}: {e}"),
            );
            value.clone()
        }
    }
}
