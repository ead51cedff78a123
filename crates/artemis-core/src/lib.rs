//! artemis-core: event normalization core.
//!
//! This crate holds everything that does not depend on a particular
//! telemetry source: the shared record types, the diagnostics sink, the
//! mapping table and the standardization engine that projects parsed events
//! into the canonical schema.
//!
//! # Architecture
//!
//! ```text
//! feed parser ──► ParsedEvent ──► standardize ──► StandardEvent
//!                                     ▲
//!                               MappingTable
//! ```
//!
//! Feed parsers live in `artemis-feeds`; they implement [`Classify`] and
//! produce [`ParsedEvent`] values.

pub mod classify;
pub mod config;
pub mod diagnostics;
pub mod error;
pub mod handlers;
pub mod hex;
pub mod mapping;
pub mod standardize;
pub mod timestamp;
pub mod types;
pub mod value;

pub use classify::Classify;
pub use diagnostics::{Diagnostic, DiagnosticKind, Diagnostics};
pub use error::MappingError;
pub use mapping::{EventMapping, FieldType, MappingEntry, MappingTable};
pub use standardize::{standardize, UNMAPPED_EVENT};
pub use types::{EventSource, Os, ParsedEvent, Section, StandardEvent};
