//! artemis-feeds: telemetry feed adapters for artemis.
//!
//! Each feed turns its raw input into classified
//! [`artemis_core::ParsedEvent`] values:
//!
//! * [`auditd`] groups audit log lines into events, tokenizes their fields
//!   and classifies them from syscall numbers and rule keys.
//! * [`sysmon`] accepts flat Windows event records and classifies them by
//!   Event ID.
//!
//! [`reader`] holds the batch readers that load raw input from disk.

pub mod auditd;
pub mod reader;
pub mod sysmon;

pub use auditd::{group_lines, AuditdClassifier, AuditdParser, EventGroup};
pub use reader::FeedError;
pub use sysmon::{parse_record, SysmonClassifier};
