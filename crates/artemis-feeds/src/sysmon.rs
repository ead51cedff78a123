//! Sysmon feed: flat Windows event records → [`ParsedEvent`].
//!
//! The acquisition side renders each Windows event to a flat map: the
//! `System` values `EventID`, `Computer` and `TimeCreated@SystemTime`, plus
//! every `<Data Name=...>` value keyed by its `Name` attribute.

use artemis_core::{value::to_text, Classify, DiagnosticKind, Diagnostics, Os, ParsedEvent};
use phf::phf_map;
use serde_json::{Map, Value};
use std::collections::{BTreeMap, BTreeSet};

pub const EVENT_ID_FIELD: &str = "EventID";
pub const COMPUTER_FIELD: &str = "Computer";
pub const SYSTEM_TIME_FIELD: &str = "TimeCreated@SystemTime";

/// Label for Event IDs outside [`SYSMON_EVENT_TYPES`].
pub const OTHER_SYSMON_EVENT: &str = "OtherSysmonEvent";

/// Sysmon Event ID → event type label.
pub static SYSMON_EVENT_TYPES: phf::Map<&'static str, &'static str> = phf_map! {
    "1" => "ProcessCreate",
    "3" => "NetworkConnect",
    "5" => "ProcessTermination",
    "7" => "ImageLoaded",
    "11" => "FileCreate",
    "12" => "RegistryObjectChange",
    "13" => "RegistryValueSet",
    "14" => "RegistryObjectRenamed",
    "23" => "FileDelete",
    "26" => "FileDeleteDetected",
};

/// Direct Event ID lookup.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SysmonClassifier;

impl Classify for SysmonClassifier {
    fn classify(&self, fields: &BTreeMap<String, Value>, _line_types: &BTreeSet<String>) -> String {
        fields
            .get(EVENT_ID_FIELD)
            .map(to_text)
            .and_then(|id| SYSMON_EVENT_TYPES.get(id.trim()).copied())
            .unwrap_or(OTHER_SYSMON_EVENT)
            .to_string()
    }
}

/// Build a parsed event from one flat Sysmon record.
///
/// The envelope keys move into the event's metadata; every other key is kept
/// as a field. A record without `EventID` is still produced, classified as
/// [`OTHER_SYSMON_EVENT`], with a [`DiagnosticKind::MalformedRecord`] entry.
pub fn parse_record(record: &Map<String, Value>, diags: &mut Diagnostics) -> ParsedEvent {
    let mut fields: BTreeMap<String, Value> = record
        .iter()
        .map(|(k, v)| (k.clone(), v.clone()))
        .collect();

    let event_type = SysmonClassifier.classify(&fields, &BTreeSet::new());
    let mut event = ParsedEvent::new(Os::Windows, event_type);

    event.event_id = fields.remove(EVENT_ID_FIELD).map(|v| to_text(&v));
    event.hostname = fields.remove(COMPUTER_FIELD).map(|v| to_text(&v));
    event.timestamp = fields.remove(SYSTEM_TIME_FIELD).map(|v| to_text(&v));
    event.fields = fields;

    if event.event_id.is_none() {
        diags.warn(
            DiagnosticKind::MalformedRecord,
            "sysmon record has no EventID; classifying as OtherSysmonEvent",
        );
    }
    event
}
