mod common;

use common::{audit_sources, audit_sources_with, changes, file, row};
use snapshot_audit::{AuditConfig, KeyMatch, SOURCE_FILE_FIELD, audit_rows};

#[test]
fn two_snapshots_of_one_loan_detect_status_change() {
    let a = file(
        "A.csv",
        &["LoanNumber", "Status"],
        &[&["100", "Open"]],
    );
    let b = file(
        "B.csv",
        &["LoanNumber", "Status"],
        &[&["100", "Closed"]],
    );
    let results = audit_sources(&[a, b], "100", &[]);

    assert_eq!(results.len(), 2);
    assert!(results[0].changes.is_empty());
    assert_eq!(changes(&results[1]), vec!["Status"]);
    assert_eq!(results[0].row.source(), "A.csv");
    assert_eq!(results[1].row.source(), "B.csv");
}

#[test]
fn first_result_of_every_group_is_baseline() {
    let a = file(
        "A.csv",
        &["LoanNumber", "Status"],
        &[&["100", "Open"], &["200", "Pending"]],
    );
    let b = file(
        "B.csv",
        &["LoanNumber", "Status"],
        &[&["100", "Closed"], &["200", "Pending"]],
    );
    let results = audit_sources(&[a, b], "100,200", &[]);

    assert_eq!(results.len(), 4);
    // Group-major: both "100" snapshots first, then both "200" snapshots.
    let ids: Vec<String> = results
        .iter()
        .map(|r| r.row.get_str("LoanNumber").into_owned())
        .collect();
    assert_eq!(ids, vec!["100", "100", "200", "200"]);

    assert!(results[0].changes.is_empty());
    assert_eq!(changes(&results[1]), vec!["Status"]);
    assert!(results[2].changes.is_empty());
    assert!(results[3].changes.is_empty(), "200 never changed");
}

#[test]
fn groups_are_diffed_independently() {
    // Interleaved input: rows from two records alternate in pool order.
    // Grouping must compare each row to its own record's predecessor, not
    // the globally preceding row.
    let rows = [
        row("s1.csv", &[("LoanNumber", "100"), ("Status", "Open")]),
        row("s1.csv", &[("LoanNumber", "200"), ("Status", "Closed")]),
        row("s2.csv", &[("LoanNumber", "100"), ("Status", "Open")]),
        row("s2.csv", &[("LoanNumber", "200"), ("Status", "Funded")]),
    ];
    let refs: Vec<&snapshot_audit::Row> = rows.iter().collect();
    let results = audit_rows(&refs, "LoanNumber", &AuditConfig::default());

    assert_eq!(results.len(), 4);
    // 100's second snapshot is unchanged even though the globally previous
    // row (200/Closed) differs from it.
    assert!(results[1].changes.is_empty());
    // 200's second snapshot changed Status only.
    assert_eq!(changes(&results[3]), vec!["Status"]);
}

#[test]
fn missing_column_compares_as_empty_string() {
    let a = file("A.csv", &["LoanNumber", "Status"], &[&["100", "Open"]]);
    // B has an extra column and lacks Status.
    let b = file("B.csv", &["LoanNumber", "Owner"], &[&["100", "Jane"]]);
    let results = audit_sources(&[a, b], "100", &[]);

    assert_eq!(results.len(), 2);
    assert_eq!(changes(&results[1]), vec!["Owner", "Status"]);
}

#[test]
fn value_changing_to_empty_string_is_not_a_change_from_missing() {
    let a = file("A.csv", &["LoanNumber", "Note"], &[&["100", ""]]);
    let b = file("B.csv", &["LoanNumber"], &[&["100"]]);
    let results = audit_sources(&[a, b], "100", &[]);

    assert_eq!(results.len(), 2);
    assert!(
        results[1].changes.is_empty(),
        "explicit empty and absent must compare equal"
    );
}

#[test]
fn reserved_field_never_appears_in_changes() {
    let a = file("A.csv", &["LoanNumber", "Status"], &[&["100", "Open"]]);
    let b = file("B.csv", &["LoanNumber", "Status"], &[&["100", "Closed"]]);
    let results = audit_sources(&[a, b], "100", &[]);

    for result in &results {
        assert!(!result.changes.contains(SOURCE_FILE_FIELD));
    }
}

#[test]
fn normalized_key_match_merges_padded_identifiers() {
    let a = file("A.csv", &["LoanNumber", "Status"], &[&[" 100 ", "Open"]]);
    let b = file("B.csv", &["LoanNumber", "Status"], &[&["100", "Closed"]]);
    let results = audit_sources(&[a, b], "100", &[]);

    assert_eq!(results.len(), 2);
    assert!(results[0].changes.is_empty());
    // One timeline: the identifier's raw text differs too, so it shows up
    // as a changed field alongside Status.
    assert_eq!(changes(&results[1]), vec!["LoanNumber", "Status"]);
}

#[test]
fn exact_key_match_splits_padded_identifiers() {
    let a = file("A.csv", &["LoanNumber", "Status"], &[&[" 100 ", "Open"]]);
    let b = file("B.csv", &["LoanNumber", "Status"], &[&["100", "Closed"]]);
    let config = AuditConfig::builder()
        .key_match(KeyMatch::Exact)
        .build()
        .expect("valid config");
    let results = audit_sources_with(&[a, b], "100", &[], &config);

    assert_eq!(results.len(), 2);
    // Two singleton timelines: both are baselines.
    assert!(results[0].changes.is_empty());
    assert!(results[1].changes.is_empty());
}

#[test]
fn no_matches_yields_empty_results() {
    let a = file("A.csv", &["LoanNumber", "Status"], &[&["100", "Open"]]);
    let results = audit_sources(&[a], "999", &[]);
    assert!(results.is_empty());
}

#[test]
fn output_length_equals_filtered_length() {
    let a = file(
        "A.csv",
        &["LoanNumber", "Status"],
        &[
            &["100", "Open"],
            &["200", "Open"],
            &["100", "Closed"],
            &["300", "Open"],
        ],
    );
    let results = audit_sources(&[a], "", &[]);
    assert_eq!(results.len(), 4);
}

#[test]
fn rerunning_on_unchanged_inputs_is_idempotent() {
    let a = file(
        "A.csv",
        &["LoanNumber", "Status", "Owner"],
        &[&["100", "Open", "Ann"], &["200", "Open", "Bob"]],
    );
    let b = file(
        "B.csv",
        &["LoanNumber", "Status", "Owner"],
        &[&["100", "Closed", "Ann"], &["200", "Open", "Cyd"]],
    );
    let sources = vec![a, b];

    let first = audit_sources(&sources, "100,200", &[]);
    let second = audit_sources(&sources, "100,200", &[]);
    assert_eq!(first, second);
}
