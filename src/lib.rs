//! artemis: security telemetry normalization
//!
//! Reads Linux audit logs or flat Windows Sysmon records and projects every
//! event into one canonical schema. The crate root exposes the batch
//! [`pipeline`] so that integration tests and benches can drive it directly.
//!
//! # Architecture
//!
//! ```text
//! reader ──► group_lines ──► AuditdParser ─┐
//!                                          ├──► standardize ──► JSON lines
//! reader ──► sysmon::parse_record ─────────┘         ▲
//!                                              MappingTable
//! ```
//!
//! Source-independent pieces live in `artemis-core`; the source adapters live
//! in `artemis-feeds`.

pub mod pipeline;

pub use pipeline::{normalize_linux, normalize_windows, Batch, RunOptions, Source};
