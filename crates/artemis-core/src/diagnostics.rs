//! Diagnostics sink passed through every normalization stage.
//!
//! Parsing and standardization never log directly. They record structured
//! warnings into a [`Diagnostics`] value owned by the caller, which keeps the
//! transforms pure and lets tests assert on exactly what went wrong. The
//! pipeline flushes the collected entries to `tracing` with [`Diagnostics::emit`].

use std::fmt;

/// What kind of defect a diagnostic describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DiagnosticKind {
    /// A line that continues no open event group was dropped.
    OrphanLine,
    /// A timestamp could not be converted; a fallback value was used.
    TimestampParse,
    /// A hex-prone field could not be decoded and was kept verbatim.
    HexDecode,
    /// No mapping table entry exists for the event type.
    UnmappedEventType,
    /// A mapping entry has no `standard_field`.
    MissingTargetPath,
    /// A mapping entry's `standard_field` does not land inside a section.
    InvalidTargetPath,
    /// Type coercion failed; the original value was kept.
    Coercion,
    /// A field handler could not transform its input.
    Handler,
    /// A Windows flat record was malformed or incomplete.
    MalformedRecord,
}

impl fmt::Display for DiagnosticKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DiagnosticKind::OrphanLine => "orphan_line",
            DiagnosticKind::TimestampParse => "timestamp_parse",
            DiagnosticKind::HexDecode => "hex_decode",
            DiagnosticKind::UnmappedEventType => "unmapped_event_type",
            DiagnosticKind::MissingTargetPath => "missing_target_path",
            DiagnosticKind::InvalidTargetPath => "invalid_target_path",
            DiagnosticKind::Coercion => "coercion",
            DiagnosticKind::Handler => "handler",
            DiagnosticKind::MalformedRecord => "malformed_record",
        };
        f.write_str(name)
    }
}

/// One structured warning.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
    /// Source field the warning concerns, when there is one.
    pub field: Option<String>,
    pub message: String,
}

/// Ordered collection of warnings raised while processing a batch or event.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Diagnostics {
    entries: Vec<Diagnostic>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn warn(&mut self, kind: DiagnosticKind, message: impl Into<String>) {
        self.entries.push(Diagnostic {
            kind,
            field: None,
            message: message.into(),
        });
    }

    pub fn warn_field(
        &mut self,
        kind: DiagnosticKind,
        field: impl Into<String>,
        message: impl Into<String>,
    ) {
        self.entries.push(Diagnostic {
            kind,
            field: Some(field.into()),
            message: message.into(),
        });
    }

    pub fn entries(&self) -> &[Diagnostic] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether any entry of `kind` was recorded.
    pub fn has(&self, kind: DiagnosticKind) -> bool {
        self.entries.iter().any(|d| d.kind == kind)
    }

    pub fn count(&self, kind: DiagnosticKind) -> usize {
        self.entries.iter().filter(|d| d.kind == kind).count()
    }

    /// Forward every entry to `tracing` at WARN level.
    pub fn emit(&self) {
        for d in &self.entries {
            match &d.field {
                Some(field) => tracing::warn!(kind = %d.kind, field = %field, "{}", d.message),
                None => tracing::warn!(kind = %d.kind, "{}", d.message),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn records_in_order() {
        let mut diags = Diagnostics::new();
        diags.warn(DiagnosticKind::OrphanLine, "first");
        diags.warn_field(DiagnosticKind::Coercion, "pid", "second");

        assert_eq!(diags.len(), 2);
        assert_eq!(diags.entries()[0].message, "first");
        assert_eq!(diags.entries()[1].field.as_deref(), Some("pid"));
        assert!(diags.has(DiagnosticKind::Coercion));
        assert!(!diags.has(DiagnosticKind::HexDecode));
    }
}
