use std::path::Path;

use docproof::pipeline::{CellOutcome, ResultRow};
use docproof::report::{default_output_path, render_csv, write_csv_report};

fn sample_rows() -> Vec<ResultRow> {
    let mut first = ResultRow::new(0, "第一段。", CellOutcome::Text("语法正确".to_string()));
    first.push_supplementary("check tone", CellOutcome::Text("tone is fine".to_string()));

    let mut second = ResultRow::new(
        1,
        "Second paragraph, with a comma.",
        CellOutcome::Failed {
            kind: "retries exhausted".to_string(),
            reason: "connection refused".to_string(),
        },
    );
    second.push_supplementary(
        "check tone",
        CellOutcome::Failed {
            kind: "rejected".to_string(),
            reason: "bad request".to_string(),
        },
    );

    vec![first, second]
}

#[test]
fn test_writeCsvReport_withMixedOutcomes_shouldProduceOneLinePerRow() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("report.csv");

    write_csv_report(&path, &sample_rows(), &["check tone".to_string()]).unwrap();

    let content = std::fs::read_to_string(&path).unwrap();
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(lines.len(), 3);
    assert_eq!(lines[0], "paragraph,original_text,grammar_check,check tone");
    assert!(lines[1].contains("语法正确"));
    assert!(lines[2].contains("[check failed: retries exhausted]"));
    assert!(lines[2].contains("[check failed: rejected]"));
}

#[test]
fn test_renderCsv_withNoRows_shouldStillEmitHeader() {
    let csv = render_csv(&[], &["check tone".to_string()]);
    assert_eq!(
        csv.lines().next().unwrap(),
        "paragraph,original_text,grammar_check,check tone"
    );
}

#[test]
fn test_renderCsv_failureMarker_shouldBeDistinctFromEmptyAnswer() {
    let empty_answer = ResultRow::new(0, "text", CellOutcome::Text(String::new()));
    let failed = ResultRow::new(1, "text", CellOutcome::Failed {
        kind: "retries exhausted".to_string(),
        reason: "down".to_string(),
    });

    let csv = render_csv(&[empty_answer, failed], &[]);
    let lines: Vec<&str> = csv.lines().collect();
    assert_eq!(lines[1], "0,text,");
    assert_eq!(lines[2], "1,text,[check failed: retries exhausted]");
}

#[test]
fn test_defaultOutputPath_withVariousInputs_shouldUseInputStem() {
    assert_eq!(
        default_output_path(Path::new("/docs/thesis.txt")),
        Path::new("/docs/thesis_grammar_check.csv")
    );
    assert_eq!(
        default_output_path(Path::new("notes.md")),
        Path::new("notes_grammar_check.csv")
    );
}
