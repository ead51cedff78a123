#![allow(unused)]
//! Line grouper integration harness.
//!
//! # What this covers
//!
//! - **Partition**: every headed line lands in exactly one group, in input
//!   order, and every group is non-empty.
//! - **Identity**: lines with distinct (timestamp, serial) identities produce
//!   one group each; contiguous repeats of one identity collapse into one.
//! - **Orphans**: lines before the first header are dropped with a warning;
//!   unheaded lines after a header join the open group.
//! - **Noise**: blank lines and surrounding whitespace never change the
//!   result.
//!
//! # Running
//!
//! ```sh
//! cargo test --test grouping_harness
//! ```

mod common;
use artemis_core::{DiagnosticKind, Diagnostics};
use artemis_feeds::group_lines;
use common::*;
use pretty_assertions::assert_eq;
use proptest::prelude::*;

fn header(secs: u32, frac: u16, serial: u32, body: &str) -> String {
    format!("type=SYSCALL msg=audit({secs}.{frac:03}:{serial}): {body}")
}

#[test]
fn fixture_log_groups() {
    let mut diags = Diagnostics::new();
    let groups = group_lines(audit_log(), &mut diags);

    assert_eq!(groups.len(), 4);
    // The trailing EOE repeats the first identity and joins its group.
    assert_eq!(groups[0].lines.len(), AUDIT_EXECVE.len() + 1);
    assert_eq!(groups[1].serial, "4712");
    assert_eq!(groups[2].lines.len(), AUDIT_CONNECT.len());
    assert_eq!(groups[3].timestamp, "1700000020.250");
    assert_eq!(diags.count(DiagnosticKind::OrphanLine), 1);
}

#[test]
fn whitespace_and_blank_lines_are_ignored() {
    let clean: Vec<String> = AUDIT_OPENAT.iter().map(|s| s.to_string()).collect();
    let noisy: Vec<String> = AUDIT_OPENAT
        .iter()
        .flat_map(|s| [format!("  {s}\t"), "   ".to_string()])
        .collect();

    let a = group_lines(&clean, &mut Diagnostics::new());
    let b = group_lines(&noisy, &mut Diagnostics::new());
    assert_eq!(a, b);
}

#[test]
fn interleaved_identities_are_not_merged() {
    // A returns after B: the grouper is forward-only, so A opens twice.
    let lines = [
        header(1, 0, 1, "a=1"),
        header(1, 0, 2, "b=1"),
        header(1, 0, 1, "a=2"),
    ];
    let groups = group_lines(&lines, &mut Diagnostics::new());
    assert_eq!(groups.len(), 3);
    assert_eq!(groups[0].serial, groups[2].serial);
}

proptest! {
    /// N lines with pairwise-distinct identities produce N groups.
    #[test]
    fn distinct_identities_one_group_each(serials in prop::collection::btree_set(1u32..100_000, 1..40)) {
        let lines: Vec<String> = serials
            .iter()
            .map(|serial| header(1_700_000_000, 0, *serial, "syscall=59"))
            .collect();

        let mut diags = Diagnostics::new();
        let groups = group_lines(&lines, &mut diags);

        prop_assert_eq!(groups.len(), lines.len());
        for (group, line) in groups.iter().zip(&lines) {
            prop_assert_eq!(&group.lines, &vec![line.clone()]);
        }
        prop_assert!(diags.is_empty());
    }

    /// Runs of repeated identities collapse to one group per run, and no line
    /// is lost or reordered.
    #[test]
    fn runs_collapse_and_preserve_lines(runs in prop::collection::vec(1usize..6, 1..20)) {
        let mut lines = Vec::new();
        for (serial, len) in runs.iter().enumerate() {
            for i in 0..*len {
                lines.push(header(5, 250, serial as u32, &format!("item={i}")));
            }
        }

        let groups = group_lines(&lines, &mut Diagnostics::new());

        prop_assert_eq!(groups.len(), runs.len());
        let sizes: Vec<usize> = groups.iter().map(|g| g.lines.len()).collect();
        prop_assert_eq!(sizes, runs.clone());
        let flattened: Vec<String> = groups.into_iter().flat_map(|g| g.lines).collect();
        prop_assert_eq!(flattened, lines);
    }
}
