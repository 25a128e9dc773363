//! Tests for progress export and import

use std::collections::{BTreeMap, BTreeSet};

use proptest::prelude::*;
use qtrack::core::models::{ExportDocument, GeneratedAt, Note, ProgressState};
use qtrack::core::services::transfer::{export, import_merge, parse_document, validate};
use qtrack::core::services::ImportError;
use serde_json::{Value, json};
use test_case::test_case;

fn progress(completed: &[&str], notes: &[(&str, &str, i64)]) -> ProgressState {
    let mut state = ProgressState::default();
    state.completed = completed.iter().map(ToString::to_string).collect();
    for (id, text, ts) in notes {
        state.notes.entry((*id).to_string()).or_default().push(Note::new(*text, *ts));
    }
    state
}

// =============================================================================
// EXPORT TESTS
// =============================================================================

#[test]
fn test_export_wire_shape() {
    let state = progress(&["two-sum"], &[("two-sum", "hash map", 1_714_564_800_000)]);
    let document = export(&state, 1_714_564_800_000);
    let value = serde_json::to_value(&document).unwrap();

    assert_eq!(value["version"], "2.0");
    assert!(value["generatedAt"].as_str().unwrap().starts_with("2024-05-01T12:00:00"));
    assert_eq!(value["data"]["completedProblems"], json!(["two-sum"]));
    assert_eq!(
        value["data"]["notes"]["two-sum"],
        json!([{"text": "hash map", "ts": 1_714_564_800_000_i64}])
    );
    assert!(validate(&value));
}

#[test]
fn test_export_then_import_on_fresh_state() {
    let original = progress(
        &["two-sum", "lru-cache"],
        &[("two-sum", "first", 1), ("two-sum", "second", 2), ("graph", "bfs", 3)],
    );
    let text = serde_json::to_string(&export(&original, 0)).unwrap();

    let document = parse_document(&text).unwrap();
    let mut fresh = ProgressState::default();
    import_merge(&document, &mut fresh);

    assert_eq!(fresh.completed, original.completed);
    assert_eq!(fresh.notes, original.notes);
}

// =============================================================================
// IMPORT TESTS
// =============================================================================

#[test]
fn test_import_preserves_local_progress() {
    let exported = export(&progress(&["a"], &[("a", "old", 1)]), 0);
    let mut local = progress(&["b"], &[("a", "newer", 2)]);

    let summary = import_merge(&exported, &mut local);

    assert_eq!(summary.completed_added, 1);
    assert_eq!(summary.notes_added, 1);
    assert_eq!(local.completed, BTreeSet::from(["a".to_string(), "b".to_string()]));
    let texts: Vec<_> = local.notes_for("a").iter().map(|n| n.text.as_str()).collect();
    assert_eq!(texts, vec!["newer", "old"]);
}

#[test]
fn test_import_accepts_epoch_generated_at_and_unknown_ids() {
    let document = parse_document(
        r#"{"version": "1.0", "generatedAt": 1700000000000,
            "data": {"completedProblems": ["not-in-any-dataset"]}}"#,
    )
    .unwrap();
    assert_eq!(document.generated_at, GeneratedAt::EpochMillis(1_700_000_000_000));

    let mut state = ProgressState::default();
    import_merge(&document, &mut state);
    assert!(state.is_completed("not-in-any-dataset"));
}

#[test_case("", true ; "empty input")]
#[test_case("{not json", true ; "broken json")]
#[test_case("[]", false ; "array root")]
#[test_case(r#"{"version": 2, "generatedAt": 1, "data": {"completedProblems": []}}"# , false ; "numeric version")]
#[test_case(r#"{"version": "2.0", "data": {"completedProblems": []}}"# , false ; "missing generatedAt")]
#[test_case(r#"{"version": "2.0", "generatedAt": 1, "data": {"completedProblems": [1, 2]}}"# , false ; "numeric ids")]
#[test_case(r#"{"version": "2.0", "generatedAt": 1, "data": {"completedProblems": [], "notes": []}}"# , false ; "notes not a map")]
#[test_case(r#"{"version": "2.0", "generatedAt": 1, "data": {"completedProblems": [], "notes": {"a": [{"text": "x"}]}}}"# , false ; "note without ts")]
fn test_rejected_documents(text: &str, malformed: bool) {
    let err = parse_document(text).unwrap_err();
    if malformed {
        assert!(matches!(err, ImportError::Malformed(_)), "{err:?}");
    } else {
        assert!(matches!(err, ImportError::InvalidShape(_)), "{err:?}");
    }
}

#[test]
fn test_validate_accepts_null_notes() {
    let value: Value = json!({
        "version": "2.0",
        "generatedAt": "2024-01-01T00:00:00Z",
        "data": {"completedProblems": ["x"], "notes": null}
    });
    assert!(validate(&value));
}

// =============================================================================
// PROPERTIES
// =============================================================================

fn arb_progress() -> impl Strategy<Value = ProgressState> {
    let id = prop_oneof![Just("a"), Just("b"), Just("c"), Just("d")].prop_map(String::from);
    let note = ("[a-z ]{1,8}", 0_i64..4).prop_map(|(text, ts)| Note::new(text, ts));
    (
        prop::collection::btree_set(id.clone(), 0..4),
        prop::collection::btree_map(id, prop::collection::vec(note, 1..3), 0..3),
    )
        .prop_map(|(completed, notes): (BTreeSet<String>, BTreeMap<String, Vec<Note>>)| {
            ProgressState { completed, notes }
        })
}

proptest! {
    /// Importing the same document twice equals importing it once
    #[test]
    fn import_is_idempotent(local in arb_progress(), exported in arb_progress()) {
        let document: ExportDocument = export(&exported, 0);

        let mut once = local.clone();
        import_merge(&document, &mut once);

        let mut twice = local;
        import_merge(&document, &mut twice);
        let second = import_merge(&document, &mut twice);

        prop_assert_eq!(&once, &twice);
        prop_assert!(second.is_noop());
    }

    /// Import never removes anything already present
    #[test]
    fn import_only_adds(local in arb_progress(), exported in arb_progress()) {
        let document = export(&exported, 0);
        let mut merged = local.clone();
        import_merge(&document, &mut merged);

        prop_assert!(local.completed.is_subset(&merged.completed));
        for (id, notes) in &local.notes {
            for note in notes {
                prop_assert!(merged.notes_for(id).contains(note));
            }
        }
    }
}
