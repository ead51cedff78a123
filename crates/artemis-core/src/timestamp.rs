//! Timestamp conversion with fallback chains.
//!
//! Nothing here returns an error: every failure degrades to a less precise
//! rendering and records a [`DiagnosticKind::TimestampParse`] entry.

use crate::diagnostics::{DiagnosticKind, Diagnostics};
use chrono::{
    DateTime, FixedOffset, Local, NaiveDateTime, Offset, SecondsFormat, TimeZone, Utc,
};

const NAIVE_ISO: &str = "%Y-%m-%dT%H:%M:%S%.6f";

/// Convert an auditd header timestamp (`<secs>.<frac>`) to ISO-8601 UTC.
///
/// The seconds are read as local wall-clock time and shifted to UTC with the
/// process's current local offset, so the daylight-saving state at read time
/// applies. Falls back to the local ISO rendering, then to `raw` itself.
pub fn audit_to_utc(raw: &str, diags: &mut Diagnostics) -> String {
    let read_offset = Local::now().offset().fix();
    audit_to_utc_in(raw, &Local, read_offset, diags)
}

/// [`audit_to_utc`] against an explicit zone and read-time offset.
pub fn audit_to_utc_in<Tz: TimeZone>(
    raw: &str,
    zone: &Tz,
    read_offset: FixedOffset,
    diags: &mut Diagnostics,
) -> String {
    let Some((secs, micros)) = split_epoch(raw) else {
        diags.warn(
            DiagnosticKind::TimestampParse,
            format!("could not parse auditd timestamp {raw:?}"),
        );
        return raw.to_string();
    };

    let Some(local) = zone.timestamp_opt(secs, micros * 1_000).single() else {
        diags.warn(
            DiagnosticKind::TimestampParse,
            format!("auditd timestamp {raw:?} is out of range"),
        );
        return raw.to_string();
    };
    let naive_local = local.naive_local();

    match read_offset.from_local_datetime(&naive_local).single() {
        Some(aware) => aware
            .with_timezone(&Utc)
            .to_rfc3339_opts(SecondsFormat::Micros, false),
        None => {
            diags.warn(
                DiagnosticKind::TimestampParse,
                format!("could not convert auditd timestamp {raw:?} to UTC"),
            );
            naive_local.format(NAIVE_ISO).to_string()
        }
    }
}

/// Pick the final `event_timestamp` for a standard event.
///
/// Priority: `utc` verbatim; numeric `raw` as UTC epoch seconds; ISO-like
/// `raw` reformatted with microseconds; otherwise `raw` unchanged.
pub fn finalize(utc: Option<&str>, raw: Option<&str>, diags: &mut Diagnostics) -> Option<String> {
    if let Some(utc) = utc.filter(|s| !s.is_empty()) {
        return Some(utc.to_string());
    }
    let raw = raw?;
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Some(raw.to_string());
    }

    if let Some(dt) = epoch_to_utc(trimmed) {
        return Some(dt.to_rfc3339_opts(SecondsFormat::Micros, false));
    }
    if let Some(rendered) = reformat_iso(trimmed) {
        return Some(rendered);
    }

    diags.warn(
        DiagnosticKind::TimestampParse,
        format!("could not interpret timestamp {raw:?}; keeping it verbatim"),
    );
    Some(raw.to_string())
}

/// Split `<secs>[.<frac>]` into whole seconds and microseconds. The fraction
/// is right-padded or truncated to six digits.
fn split_epoch(raw: &str) -> Option<(i64, u32)> {
    let (secs, frac) = raw.trim().split_once('.').unwrap_or((raw.trim(), ""));
    if secs.is_empty() || !secs.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    if !frac.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let secs: i64 = secs.parse().ok()?;
    let mut digits: String = frac.chars().take(6).collect();
    while digits.len() < 6 {
        digits.push('0');
    }
    let micros: u32 = digits.parse().ok()?;
    Some((secs, micros))
}

fn epoch_to_utc(text: &str) -> Option<DateTime<Utc>> {
    if let Some((secs, micros)) = split_epoch(text) {
        return DateTime::from_timestamp(secs, micros * 1_000);
    }
    let value: f64 = text.parse().ok()?;
    if !value.is_finite() {
        return None;
    }
    let total_micros = (value * 1_000_000.0).round();
    if total_micros.abs() >= i64::MAX as f64 {
        return None;
    }
    DateTime::from_timestamp_micros(total_micros as i64)
}

fn reformat_iso(text: &str) -> Option<String> {
    let normalized = match text.strip_suffix('Z').or_else(|| text.strip_suffix('z')) {
        Some(head) => format!("{head}+00:00"),
        None => text.to_string(),
    };

    if let Ok(dt) = DateTime::parse_from_rfc3339(&normalized) {
        return Some(dt.to_rfc3339_opts(SecondsFormat::Micros, false));
    }
    if let Ok(dt) = DateTime::parse_from_str(&normalized, "%Y-%m-%d %H:%M:%S%.f%:z") {
        return Some(dt.to_rfc3339_opts(SecondsFormat::Micros, false));
    }
    for fmt in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(&normalized, fmt) {
            return Some(naive.format(NAIVE_ISO).to_string());
        }
    }
    None
}
