//! Domain-specific assertion macros for artemis harnesses.
//!
//! These add context-rich failure messages that make it clear which routing
//! rule was violated and where in the standard event the value ended up.

/// Assert that a `StandardEvent` section holds `value` at a dotted path.
///
/// ```rust
/// assert_canonical!(event, Section::Process, "parent.pid", 4000);
/// ```
#[macro_export]
macro_rules! assert_canonical {
    ($event:expr, $section:expr, $path:expr, $($value:tt)+) => {{
        let event: &artemis_core::StandardEvent = &$event;
        let section: artemis_core::Section = $section;
        let path: &str = $path;
        let expected = serde_json::json!($($value)+);
        match artemis_core::value::get_at_path(event.section(section), path) {
            Some(actual) if *actual == expected => {}
            Some(actual) => panic!(
                "assert_canonical! failed at {:?}.{}\n  expected: {}\n  actual:   {}",
                section, path, expected, actual
            ),
            None => panic!(
                "assert_canonical! failed: {:?}.{} not found.\n  section: {}",
                section,
                path,
                serde_json::Value::Object(event.section(section).clone())
            ),
        }
    }};
}

/// Assert that a field sits in `other_data`, optionally with a value.
#[macro_export]
macro_rules! assert_in_other_data {
    ($event:expr, $key:expr) => {{
        let event: &artemis_core::StandardEvent = &$event;
        let key: &str = $key;
        if !event.other_data.contains_key(key) {
            panic!(
                "assert_in_other_data! failed: {:?} not in other_data.\n  Available: {:?}",
                key,
                event.other_data.keys().collect::<Vec<_>>()
            );
        }
    }};
    ($event:expr, $key:expr, $($value:tt)+) => {{
        let event: &artemis_core::StandardEvent = &$event;
        let key: &str = $key;
        let expected = serde_json::json!($($value)+);
        match event.other_data.get(key) {
            Some(actual) if *actual == expected => {}
            Some(actual) => panic!(
                "assert_in_other_data! failed: other_data[{:?}]\n  expected: {}\n  actual:   {}",
                key, expected, actual
            ),
            None => panic!(
                "assert_in_other_data! failed: {:?} not in other_data.\n  Available: {:?}",
                key,
                event.other_data.keys().collect::<Vec<_>>()
            ),
        }
    }};
}

/// Assert that none of the given keys appear in `other_data`.
#[macro_export]
macro_rules! assert_not_in_other_data {
    ($event:expr, $($key:expr),+ $(,)?) => {{
        let event: &artemis_core::StandardEvent = &$event;
        $(
            let key: &str = $key;
            if let Some(value) = event.other_data.get(key) {
                panic!(
                    "assert_not_in_other_data! failed: {:?} leaked into other_data with {}",
                    key, value
                );
            }
        )+
    }};
}

/// Assert the diagnostics contain at least one entry of `kind`.
#[macro_export]
macro_rules! assert_diagnosed {
    ($diags:expr, $kind:expr) => {{
        let diags: &artemis_core::Diagnostics = &$diags;
        let kind: artemis_core::DiagnosticKind = $kind;
        if !diags.has(kind) {
            panic!(
                "assert_diagnosed! failed: no {} diagnostic.\n  Got: {:?}",
                kind,
                diags.entries()
            );
        }
    }};
}
