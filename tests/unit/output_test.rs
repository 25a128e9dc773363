//! Tests for the JSON shapes the CLI prints

use qtrack::core::models::{CompletionStats, Difficulty, Note, Question};
use qtrack::core::services::ImportSummary;
use qtrack::output::{ImportResult, ListResult, NoteRow, QuestionDetail, QuestionRow};
use serde_json::json;

use crate::common::question_at;

#[test]
fn test_question_row_shape() {
    let row = QuestionRow::new(&question_at("two-sum", 7, &["Google"]), true, 2);
    let value = serde_json::to_value(&row).unwrap();

    assert_eq!(value["id"], "two-sum");
    assert_eq!(value["difficulty"], "Medium");
    assert_eq!(value["company_count"], 7);
    assert_eq!(value["completed"], true);
    assert_eq!(value["notes"], 2);
    assert_eq!(value["link"], "https://leetcode.com/problems/two-sum/");
    assert_eq!(value["companies"], json!(["GOOGLE"]));
}

#[test]
fn test_invalid_link_is_omitted() {
    let question = Question::new("Broken", Difficulty::Hard, 0, Some("not a url"), ["X"], ["Y"]);
    let value = serde_json::to_value(QuestionRow::new(&question, false, 0)).unwrap();
    assert!(value.get("link").is_none());
}

#[test]
fn test_detail_flattens_question_and_numbers_notes() {
    let notes = vec![Note::new("first", 10), Note::new("second", 20)];
    let detail = QuestionDetail {
        question: QuestionRow::new(&question_at("lru-cache", 1, &[]), false, notes.len()),
        note_list: NoteRow::numbered(&notes),
    };
    let value = serde_json::to_value(&detail).unwrap();

    assert_eq!(value["id"], "lru-cache");
    assert_eq!(
        value["note_list"],
        json!([
            {"index": 0, "text": "first", "ts": 10},
            {"index": 1, "text": "second", "ts": 20}
        ])
    );
}

#[test]
fn test_list_result_shape() {
    let result = ListResult {
        questions: Vec::new(),
        visible: 3,
        total: 10,
        stats: CompletionStats::from_counts(3, 1),
    };
    let value = serde_json::to_value(&result).unwrap();
    assert_eq!(value["stats"], json!({"total": 3, "completed": 1, "percentage": 33}));
}

#[test]
fn test_import_result_flattens_summary() {
    let result = ImportResult {
        file: "progress.json".to_string(),
        summary: ImportSummary {
            completed_added: 2,
            notes_added: 0,
        },
    };
    let value = serde_json::to_value(&result).unwrap();
    assert_eq!(
        value,
        json!({"file": "progress.json", "completed_added": 2, "notes_added": 0})
    );
}
