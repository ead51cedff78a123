//! Standardization engine: projects a [`ParsedEvent`] into a [`StandardEvent`].
//!
//! The engine is a pure function of the parsed event, the agent id and the
//! mapping table. Every original field ends up in exactly one place: a
//! canonical path inside one of the nested sections, or `other_data`.
//!
//! Envelope metadata (`hostname`, timestamps, the auditd record type, serial
//! number, line tags and raw lines) lives in the typed members of
//! [`ParsedEvent`], never in its field map. A source field that happens to
//! share one of those names is routed like any other field.

use crate::diagnostics::{DiagnosticKind, Diagnostics};
use crate::mapping::{MappingEntry, MappingTable};
use crate::timestamp;
use crate::types::{ParsedEvent, Section, StandardEvent};
use crate::value::set_at_path;

/// `standard_event_type` given to events whose type has no mapping.
pub const UNMAPPED_EVENT: &str = "UnmappedEvent";

/// Where a single field goes.
enum Route<'a> {
    CatchAll,
    Canonical {
        section: Section,
        path: &'a str,
        entry: &'a MappingEntry,
    },
}

/// Build the standard event for `parsed`.
pub fn standardize(
    parsed: &ParsedEvent,
    agent_id: &str,
    table: &MappingTable,
    diags: &mut Diagnostics,
) -> StandardEvent {
    let mut event = StandardEvent::base(agent_id, parsed.os, parsed.event_type.clone());
    event.hostname = parsed.hostname.clone();
    event.original_event_id = parsed.event_id.clone();
    event.event_timestamp = parsed
        .event_utc_time
        .clone()
        .or_else(|| parsed.timestamp.clone());

    let Some(mapping) = table.get(&parsed.event_type) else {
        diags.warn(
            DiagnosticKind::UnmappedEventType,
            format!(
                "no mapping for event type {:?}; keeping the whole event in other_data",
                parsed.event_type
            ),
        );
        event.standard_event_type = UNMAPPED_EVENT.to_string();
        event.other_data = parsed.to_object();
        return event;
    };

    event.standard_event_type = mapping
        .event_type
        .clone()
        .unwrap_or_else(|| parsed.event_type.clone());
    event.action = mapping.action.clone();

    for (name, value) in &parsed.fields {
        match route(name, mapping.entry(name), diags) {
            Route::CatchAll => {
                event.other_data.insert(name.clone(), value.clone());
            }
            Route::Canonical {
                section,
                path,
                entry,
            } => {
                let raw = match entry.handler {
                    Some(handler) => handler.apply(name, value, diags),
                    None => value.clone(),
                };
                let coerced = entry.field_type.coerce(name, raw, diags);
                set_at_path(event.section_mut(section), path, coerced);
            }
        }
    }

    event.event_timestamp = timestamp::finalize(
        parsed.event_utc_time.as_deref(),
        parsed.timestamp.as_deref(),
        diags,
    );

    event
}

fn route<'a>(
    name: &str,
    entry: Option<&'a MappingEntry>,
    diags: &mut Diagnostics,
) -> Route<'a> {
    let Some(entry) = entry else {
        return Route::CatchAll;
    };
    let Some(target) = entry.standard_field.as_deref() else {
        diags.warn_field(
            DiagnosticKind::MissingTargetPath,
            name,
            "mapping entry has no standard_field; keeping value in other_data",
        );
        return Route::CatchAll;
    };
    match split_target(target) {
        Some((section, path)) => Route::Canonical {
            section,
            path,
            entry,
        },
        None => {
            diags.warn_field(
                DiagnosticKind::InvalidTargetPath,
                name,
                format!(
                    "standard_field {target:?} must point inside process, network, file or registry"
                ),
            );
            Route::CatchAll
        }
    }
}

/// Split `section.rest` into its section and the path inside it.
fn split_target(target: &str) -> Option<(Section, &str)> {
    let (root, rest) = target.trim().split_once('.')?;
    let section = Section::from_name(root)?;
    if rest.split('.').all(str::is_empty) {
        return None;
    }
    Some((section, rest))
}
