//! CLI integration tests using assert_cmd.

use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

const HEADER: &str = "question_text,question_type,options,correct_answers,difficulty,points,explanation,code_language,is_public\n";

/// A command isolated from any config on the host.
fn quizkit(dir: &TempDir) -> Command {
    #[allow(deprecated)]
    let mut cmd = Command::cargo_bin("quizkit").unwrap();
    cmd.current_dir(dir.path())
        .env("HOME", dir.path())
        .env_remove("QUIZKIT_PASSING_THRESHOLD")
        .env_remove("QUIZKIT_MAX_REPORTED_ERRORS")
        .env_remove("RUST_LOG");
    cmd
}

fn write_csv(dir: &TempDir, name: &str, rows: &[&str]) -> std::path::PathBuf {
    let mut content = HEADER.to_string();
    for row in rows {
        content.push_str(row);
        content.push('\n');
    }
    let path = dir.path().join(name);
    std::fs::write(&path, content).unwrap();
    path
}

fn sample_rows() -> Vec<&'static str> {
    vec![
        r#"What is the capital of France?,single_choice,"[""London"",""Paris""]",[1],easy,1,,,true"#,
        r#"Which of these are prime numbers?,multiple_choice,"[""2"",""4"",""5""]","[0,2]",medium,2,,,false"#,
        r#"This row has broken options,single_choice,not-json,[0],easy,1,,,false"#,
        r#"The Earth orbits the Sun yearly.,true_false,"[""True"",""False""]",[0],easy,1,,,true"#,
    ]
}

fn read_bank(path: &Path) -> Vec<serde_json::Value> {
    let content = std::fs::read_to_string(path).unwrap();
    serde_json::from_str(&content).unwrap()
}

#[test]
fn validate_reports_row_errors() {
    let dir = TempDir::new().unwrap();
    let file = write_csv(&dir, "questions.csv", &sample_rows());

    quizkit(&dir)
        .arg("validate")
        .arg("--file")
        .arg(&file)
        .assert()
        .success()
        .stdout(predicate::str::contains("Line 4: invalid options JSON"))
        .stdout(predicate::str::contains("Errors:"));
}

#[test]
fn validate_clean_file() {
    let dir = TempDir::new().unwrap();
    let rows = sample_rows();
    let file = write_csv(&dir, "questions.csv", &[rows[0], rows[1]]);

    quizkit(&dir)
        .arg("validate")
        .arg("--file")
        .arg(&file)
        .assert()
        .success()
        .stdout(predicate::str::contains("All 2 question(s) valid."));
}

#[test]
fn validate_respects_max_reported_errors() {
    let dir = TempDir::new().unwrap();
    let file = write_csv(
        &dir,
        "bad.csv",
        &[
            "too short,single_choice",
            "also too short,single_choice",
            "still too short,single_choice",
        ],
    );
    let config = dir.path().join("custom.toml");
    std::fs::write(&config, "max_reported_errors = 1\n").unwrap();

    quizkit(&dir)
        .arg("validate")
        .arg("--file")
        .arg(&file)
        .arg("--config")
        .arg(&config)
        .assert()
        .success()
        .stdout(predicate::str::contains("Line 2: expected at least 4 columns"))
        .stdout(predicate::str::contains("Line 3").not())
        .stdout(predicate::str::contains("... and 2 more"));
}

#[test]
fn validate_nonexistent_file() {
    let dir = TempDir::new().unwrap();

    quizkit(&dir)
        .arg("validate")
        .arg("--file")
        .arg("nonexistent.csv")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error"));
}

#[test]
fn validate_rejects_malformed_json() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("questions.json");
    std::fs::write(&path, "{ not json").unwrap();

    quizkit(&dir)
        .arg("validate")
        .arg("--file")
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to import questions.json"));
}

#[test]
fn import_writes_bank_and_appends() {
    let dir = TempDir::new().unwrap();
    let file = write_csv(&dir, "questions.csv", &sample_rows());
    let bank = dir.path().join("bank.json");

    quizkit(&dir)
        .args(["import", "--topic", "geo", "--created-by", "alice", "--output"])
        .arg(&bank)
        .arg("--file")
        .arg(&file)
        .assert()
        .success()
        .stdout(predicate::str::contains("Imported 3 question(s)"));

    let questions = read_bank(&bank);
    assert_eq!(questions.len(), 3);
    assert_eq!(questions[0]["topicId"], "geo");
    assert_eq!(questions[0]["createdBy"], "alice");
    assert_eq!(questions[1]["questionType"], "multiple_choice");
    assert!(questions[0]["id"].as_str().is_some_and(|id| !id.is_empty()));

    quizkit(&dir)
        .args(["import", "--topic", "geo", "--output"])
        .arg(&bank)
        .arg("--file")
        .arg(&file)
        .assert()
        .success()
        .stdout(predicate::str::contains("(6 total)"));
}

#[test]
fn export_and_reimport_csv() {
    let dir = TempDir::new().unwrap();
    let file = write_csv(&dir, "questions.csv", &sample_rows());
    let bank = dir.path().join("bank.json");

    quizkit(&dir)
        .args(["import", "--topic", "geo", "--output"])
        .arg(&bank)
        .arg("--file")
        .arg(&file)
        .assert()
        .success();

    let exported = dir.path().join("export.csv");
    quizkit(&dir)
        .args(["export", "--format", "csv", "--bank"])
        .arg(&bank)
        .arg("--output")
        .arg(&exported)
        .assert()
        .success()
        .stdout(predicate::str::contains("Exported 3 question(s)"));

    let content = std::fs::read_to_string(&exported).unwrap();
    assert!(content.starts_with(HEADER));

    quizkit(&dir)
        .arg("validate")
        .arg("--file")
        .arg(&exported)
        .assert()
        .success()
        .stdout(predicate::str::contains("All 3 question(s) valid."));
}

#[test]
fn export_json_into_directory() {
    let dir = TempDir::new().unwrap();
    let bank = dir.path().join("bank.json");
    std::fs::write(&bank, "[]").unwrap();
    let out = dir.path().join("out");
    std::fs::create_dir(&out).unwrap();

    quizkit(&dir)
        .args(["export", "--format", "json", "--bank"])
        .arg(&bank)
        .arg("--output")
        .arg(&out)
        .assert()
        .success();

    assert_eq!(
        std::fs::read_to_string(out.join("questions.json")).unwrap().trim(),
        "[]"
    );
}

#[test]
fn export_rejects_unknown_format() {
    let dir = TempDir::new().unwrap();
    let bank = dir.path().join("bank.json");
    std::fs::write(&bank, "[]").unwrap();

    quizkit(&dir)
        .args(["export", "--format", "xlsx", "--bank"])
        .arg(&bank)
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown export format"));
}

#[test]
fn template_is_importable() {
    let dir = TempDir::new().unwrap();

    quizkit(&dir)
        .arg("template")
        .assert()
        .success()
        .stdout(predicate::str::contains("quiz-import-template.csv"));

    let template = dir.path().join("quiz-import-template.csv");
    assert!(template.exists());

    quizkit(&dir)
        .arg("validate")
        .arg("--file")
        .arg(&template)
        .assert()
        .success()
        .stdout(predicate::str::contains("All 1 question(s) valid."));
}

fn graded_bank(dir: &TempDir) -> (std::path::PathBuf, Vec<String>) {
    let rows = sample_rows();
    let file = write_csv(dir, "questions.csv", &[rows[0], rows[1], rows[3]]);
    let bank = dir.path().join("bank.json");

    quizkit(dir)
        .args(["import", "--topic", "geo", "--output"])
        .arg(&bank)
        .arg("--file")
        .arg(&file)
        .assert()
        .success();

    let ids = read_bank(&bank)
        .iter()
        .map(|q| q["id"].as_str().unwrap().to_string())
        .collect();
    (bank, ids)
}

#[test]
fn grade_text_output() {
    let dir = TempDir::new().unwrap();
    let (bank, ids) = graded_bank(&dir);

    // Two of three right: 67%.
    let answers = serde_json::json!({ &ids[0]: [1], &ids[1]: [2, 0], &ids[2]: [1] });
    let answers_path = dir.path().join("answers.json");
    std::fs::write(&answers_path, answers.to_string()).unwrap();

    quizkit(&dir)
        .arg("grade")
        .arg("--bank")
        .arg(&bank)
        .arg("--answers")
        .arg(&answers_path)
        .assert()
        .success()
        .stdout(predicate::str::contains("Score: 67% (2/3 correct), points 3/4"))
        .stdout(predicate::str::contains("FAILED (threshold 70%)"));

    quizkit(&dir)
        .arg("grade")
        .arg("--bank")
        .arg(&bank)
        .arg("--answers")
        .arg(&answers_path)
        .args(["--threshold", "60"])
        .assert()
        .success()
        .stdout(predicate::str::contains("PASSED (threshold 60%)"));
}

#[test]
fn grade_json_output() {
    let dir = TempDir::new().unwrap();
    let (bank, ids) = graded_bank(&dir);

    let answers = serde_json::json!({ &ids[0]: [1], &ids[1]: [0, 2], &ids[2]: [0] });
    let answers_path = dir.path().join("answers.json");
    std::fs::write(&answers_path, answers.to_string()).unwrap();

    let output = quizkit(&dir)
        .arg("grade")
        .arg("--bank")
        .arg(&bank)
        .arg("--answers")
        .arg(&answers_path)
        .args(["--format", "json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let graded: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(graded["score"], 100);
    assert_eq!(graded["passed"], true);
    assert_eq!(graded["pointsEarned"], 4);
    assert_eq!(graded["results"].as_array().unwrap().len(), 3);
}

#[test]
fn grade_rejects_out_of_range_threshold() {
    let dir = TempDir::new().unwrap();
    let bank = dir.path().join("bank.json");
    std::fs::write(&bank, "[]").unwrap();
    let answers = dir.path().join("answers.json");
    std::fs::write(&answers, "{}").unwrap();

    quizkit(&dir)
        .arg("grade")
        .arg("--bank")
        .arg(&bank)
        .arg("--answers")
        .arg(&answers)
        .args(["--threshold", "150"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("threshold must be between 0 and 100"));
}

#[test]
fn new_prints_empty_question() {
    let dir = TempDir::new().unwrap();

    quizkit(&dir)
        .args(["new", "--type", "true_false"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"True\""))
        .stdout(predicate::str::contains("\"questionType\": \"true_false\""));

    quizkit(&dir)
        .args(["new", "--type", "essay"])
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "expected one of: single_choice, multiple_choice, true_false, code",
        ));
}

#[test]
fn new_code_question_uses_configured_language() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("quizkit.toml"), "default_code_language = \"rust\"\n").unwrap();

    quizkit(&dir)
        .args(["new", "--type", "code"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"codeLanguage\": \"rust\""));
}
