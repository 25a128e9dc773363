//! Integration tests for the qtrack CLI
//!
//! Every test gets its own `QTRACK_HOME` and dataset file, then drives the
//! binary through a browse → filter → track → export/import cycle.

use std::fs;
use std::path::{Path, PathBuf};

use assert_cmd::cargo;
use predicates::prelude::*;
use serde_json::Value;
use tempfile::TempDir;

const DATASET: &str = r#"[
    {"Question": "Two Sum", "Difficulty": "Easy", "Frequency (Number of Companies)": "10",
     "Link of Question": "https://leetcode.com/problems/two-sum/",
     "Companies Asking This Question": "Google, Amazon", "Topics": "Array, Hash Table"},
    {"Question": "LRU Cache", "Difficulty": "Medium", "Frequency (Number of Companies)": 20,
     "Link of Question": "https://leetcode.com/problems/lru-cache/",
     "Companies Asking This Question": "Amazon, Meta", "Topics": "Design, Hash Table"},
    {"Question": "Median of Two Sorted Arrays", "Difficulty": "Hard", "Frequency (Number of Companies)": 5,
     "Link of Question": "https://leetcode.com/problems/median-of-two-sorted-arrays/",
     "Companies Asking This Question": "Google", "Topics": "Array, Binary Search"}
]"#;

/// An isolated home directory with a dataset file in it
struct Sandbox {
    home: TempDir,
    dataset: PathBuf,
}

impl Sandbox {
    fn new() -> Self {
        let home = TempDir::new().unwrap();
        let dataset = home.path().join("questions.json");
        fs::write(&dataset, DATASET).unwrap();
        Self { home, dataset }
    }

    fn path(&self) -> &Path {
        self.home.path()
    }

    /// qtrack with this sandbox's home and dataset
    fn qtrack(&self) -> assert_cmd::Command {
        let mut cmd = qtrack();
        cmd.env("QTRACK_HOME", self.path()).arg("--dataset").arg(&self.dataset);
        cmd
    }

    fn json(&self, args: &[&str]) -> Value {
        let output = self.qtrack().arg("--json").args(args).output().unwrap();
        assert!(output.status.success(), "qtrack {args:?} failed: {output:?}");
        serde_json::from_slice(&output.stdout).unwrap()
    }
}

/// Helper function to create a qtrack command
fn qtrack() -> assert_cmd::Command {
    assert_cmd::Command::new(cargo::cargo_bin!("qtrack"))
}

// =============================================================================
// BASIC TESTS
// =============================================================================

#[test]
fn test_version() {
    qtrack()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("qtrack"));
}

#[test]
fn test_no_args_shows_info() {
    qtrack().assert().success().stdout(predicate::str::contains("qtrack list"));
}

#[test]
fn test_list_shows_most_asked_first() {
    let sandbox = Sandbox::new();
    sandbox
        .qtrack()
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("LRU Cache"))
        .stdout(predicate::str::contains("Showing 3 of 3 questions, 0/3 complete (0%)"));

    let list = sandbox.json(&["list"]);
    let ids: Vec<&str> = list["questions"]
        .as_array()
        .unwrap()
        .iter()
        .map(|q| q["id"].as_str().unwrap())
        .collect();
    assert_eq!(ids, vec!["lru-cache", "two-sum", "median-of-two-sorted-arrays"]);
}

#[test]
fn test_list_limit() {
    let sandbox = Sandbox::new();
    sandbox
        .qtrack()
        .args(["list", "--limit", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("... 2 more"));
}

#[test]
fn test_missing_dataset_fails() {
    let home = TempDir::new().unwrap();
    qtrack()
        .env("QTRACK_HOME", home.path())
        .args(["--dataset", "does-not-exist.json", "list"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Could not load the question dataset"));
}

// =============================================================================
// PROGRESS TESTS
// =============================================================================

#[test]
fn test_toggle_persists_between_runs() {
    let sandbox = Sandbox::new();
    sandbox
        .qtrack()
        .args(["toggle", "two-sum"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Completed: Two Sum"));

    let show = sandbox.json(&["show", "two-sum"]);
    assert_eq!(show["completed"], true);

    let stats = sandbox.json(&["stats"]);
    assert_eq!(stats["overall"]["completed"], 1);
    assert_eq!(stats["overall"]["percentage"], 33);

    sandbox
        .qtrack()
        .args(["toggle", "two-sum"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Not completed: Two Sum"));
}

#[test]
fn test_toggle_unknown_id_fails() {
    let sandbox = Sandbox::new();
    sandbox
        .qtrack()
        .args(["toggle", "no-such-question"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No question with id 'no-such-question'"));
}

#[test]
fn test_ephemeral_session_writes_nothing() {
    let sandbox = Sandbox::new();
    sandbox.qtrack().args(["--ephemeral", "toggle", "two-sum"]).assert().success();

    assert!(!sandbox.path().join("data").exists());
    let show = sandbox.json(&["show", "two-sum"]);
    assert_eq!(show["completed"], false);
}

#[test]
fn test_notes_add_list_remove() {
    let sandbox = Sandbox::new();
    sandbox
        .qtrack()
        .args(["note", "add", "two-sum", "use", "a", "hash", "map"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Added note to two-sum"));

    sandbox
        .qtrack()
        .args(["note", "list", "two-sum"])
        .assert()
        .success()
        .stdout(predicate::str::contains("use a hash map"));

    sandbox.qtrack().args(["note", "remove", "two-sum", "4"]).assert().failure();
    sandbox.qtrack().args(["note", "remove", "two-sum", "0"]).assert().success();

    let notes = sandbox.json(&["note", "list", "two-sum"]);
    assert_eq!(notes["notes"], serde_json::json!([]));
}

#[test]
fn test_blank_note_is_rejected() {
    let sandbox = Sandbox::new();
    sandbox
        .qtrack()
        .args(["note", "add", "two-sum", "   "])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Note text is empty"));
}

// =============================================================================
// FILTER TESTS
// =============================================================================

#[test]
fn test_filters_persist_between_runs() {
    let sandbox = Sandbox::new();
    sandbox
        .qtrack()
        .args(["filter", "company", "google"])
        .assert()
        .success()
        .stdout(predicate::str::contains("GOOGLE"))
        .stdout(predicate::str::contains("2 of 3 questions visible"));

    sandbox.qtrack().args(["filter", "difficulty", "HARD"]).assert().success();

    let list = sandbox.json(&["list"]);
    assert_eq!(list["visible"], 1);
    assert_eq!(list["questions"][0]["id"], "median-of-two-sorted-arrays");

    sandbox.qtrack().args(["filter", "clear"]).assert().success();
    assert_eq!(sandbox.json(&["list"])["visible"], 3);
}

#[test]
fn test_completion_filter_follows_toggles() {
    let sandbox = Sandbox::new();
    sandbox.qtrack().args(["filter", "status", "incomplete"]).assert().success();
    sandbox.qtrack().args(["toggle", "lru-cache"]).assert().success();

    let list = sandbox.json(&["list"]);
    assert_eq!(list["visible"], 2);
    assert_eq!(list["stats"]["completed"], 0);
}

#[test]
fn test_sort_by_title_ascending() {
    let sandbox = Sandbox::new();
    sandbox.qtrack().args(["filter", "sort", "title", "--asc"]).assert().success();

    let list = sandbox.json(&["list"]);
    assert_eq!(list["questions"][0]["title"], "LRU Cache");
    assert_eq!(list["questions"][2]["title"], "Two Sum");
}

#[test]
fn test_invalid_filter_value_fails() {
    let sandbox = Sandbox::new();
    sandbox
        .qtrack()
        .args(["filter", "difficulty", "impossible"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid difficulty"));
}

#[test]
fn test_suggest_companies() {
    let sandbox = Sandbox::new();
    sandbox
        .qtrack()
        .args(["suggest", "companies", "goo"])
        .assert()
        .success()
        .stdout(predicate::str::contains("GOOGLE"));

    let short = sandbox.json(&["suggest", "companies", "g"]);
    assert_eq!(short["suggestions"], serde_json::json!([]));

    sandbox.qtrack().args(["suggest", "people", "goo"]).assert().failure();
}

// =============================================================================
// EXPORT / IMPORT TESTS
// =============================================================================

#[test]
fn test_export_import_between_homes() {
    let laptop = Sandbox::new();
    laptop.qtrack().args(["toggle", "two-sum"]).assert().success();
    laptop.qtrack().args(["note", "add", "two-sum", "hash map"]).assert().success();

    let file = laptop.path().join("progress.json");
    laptop
        .qtrack()
        .args(["export", "-o"])
        .arg(&file)
        .assert()
        .success()
        .stdout(predicate::str::contains("Exported 1 completed question(s)"));

    let exported: Value = serde_json::from_str(&fs::read_to_string(&file).unwrap()).unwrap();
    assert_eq!(exported["version"], "2.0");
    assert_eq!(exported["data"]["completedProblems"], serde_json::json!(["two-sum"]));

    let desktop = Sandbox::new();
    desktop.qtrack().args(["toggle", "lru-cache"]).assert().success();
    desktop
        .qtrack()
        .arg("import")
        .arg(&file)
        .assert()
        .success()
        .stdout(predicate::str::contains("1 completion(s) and 1 note(s)"));

    let stats = desktop.json(&["stats"]);
    assert_eq!(stats["overall"]["completed"], 2);

    desktop
        .qtrack()
        .arg("import")
        .arg(&file)
        .assert()
        .success()
        .stdout(predicate::str::contains("Nothing new"));
}

#[test]
fn test_export_to_stdout() {
    let sandbox = Sandbox::new();
    sandbox
        .qtrack()
        .arg("export")
        .assert()
        .success()
        .stdout(predicate::str::contains("\"completedProblems\": []"));
}

#[test]
fn test_invalid_import_is_rejected() {
    let sandbox = Sandbox::new();
    let file = sandbox.path().join("bad.json");
    fs::write(&file, r#"{"version": "2.0", "data": {"completedProblems": "two-sum"}}"#).unwrap();

    sandbox
        .qtrack()
        .arg("import")
        .arg(&file)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Rejected"));
}

// =============================================================================
// CACHE AND CONFIG TESTS
// =============================================================================

#[test]
fn test_cached_dataset_survives_source_removal() {
    let sandbox = Sandbox::new();
    sandbox.qtrack().arg("list").assert().success();
    fs::remove_file(&sandbox.dataset).unwrap();

    // Within the TTL the cached copy is used
    assert_eq!(sandbox.json(&["list"])["total"], 3);

    // Refresh bypasses the cache and fails without a source
    sandbox.qtrack().arg("refresh").assert().failure();
}

#[test]
fn test_refresh_picks_up_new_dataset() {
    let sandbox = Sandbox::new();
    sandbox.qtrack().arg("list").assert().success();
    fs::write(&sandbox.dataset, r#"[{"Question": "Only One", "Difficulty": "Easy"}]"#).unwrap();

    sandbox
        .qtrack()
        .arg("refresh")
        .assert()
        .success()
        .stdout(predicate::str::contains("Fetched 1 questions"));
    assert_eq!(sandbox.json(&["list"])["total"], 1);
}

#[test]
fn test_config_set_ttl() {
    let home = TempDir::new().unwrap();
    qtrack()
        .env("QTRACK_HOME", home.path())
        .args(["config", "set-ttl", "6"])
        .assert()
        .success();

    let content = fs::read_to_string(home.path().join("config.toml")).unwrap();
    assert!(content.contains("cache_ttl_hours = 6"));

    qtrack()
        .env("QTRACK_HOME", home.path())
        .args(["--json", "config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"cache_ttl_hours\": 6"));
}
