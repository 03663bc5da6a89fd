/*!
 * Document-to-report workflow tests: paragraph extraction, the check
 * pipeline, and CSV writing working together.
 */

use std::io::Write;

use tokio_test;

use docproof::app_config::Language;
use docproof::document::extract_paragraphs_from_file;
use docproof::pipeline::{CancellationToken, CheckOrchestrator, NullReporter, PipelineConfig};
use docproof::providers::mock::MockProvider;
use docproof::report::write_csv_report;

#[tokio::test]
async fn test_workflow_documentToCsv_shouldProduceOneRowPerParagraph() {
    let mut input = tempfile::NamedTempFile::new().unwrap();
    write!(
        input,
        "First paragraph of the document.\n\n这是中文段落。\n\nFinal paragraph."
    )
    .unwrap();
    input.flush().unwrap();

    let paragraphs = extract_paragraphs_from_file(input.path()).unwrap();
    assert_eq!(paragraphs.len(), 3);

    let config = PipelineConfig {
        language: Language::English,
        max_retries: 1,
        retry_delay: 0.0,
        session_refresh_interval: 3,
        additional_checks: vec!["check tone".to_string()],
    };
    let mut orchestrator = CheckOrchestrator::new(Box::new(MockProvider::working()), config);
    let report = orchestrator
        .run(&paragraphs, &NullReporter, &CancellationToken::new())
        .await
        .unwrap();

    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("report.csv");
    write_csv_report(&output, &report.rows, &["check tone".to_string()]).unwrap();

    let content = std::fs::read_to_string(&output).unwrap();
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(lines.len(), 4);
    assert_eq!(lines[0], "paragraph,original_text,grammar_check,check tone");
    assert!(lines[1].contains("First paragraph of the document."));
    assert!(lines[2].contains("这是中文段落。"));
    assert!(lines[3].contains("Final paragraph."));
    // The mock echoes the prompt head back, so every result cell is populated
    for line in &lines[1..] {
        assert!(line.contains("reviewed:"));
    }
}

#[test]
fn test_workflow_partialRunAfterCancellation_shouldStillWriteFinalizedRows() {
    let mut input = tempfile::NamedTempFile::new().unwrap();
    write!(input, "Alpha paragraph.\n\nBeta paragraph.\n\nGamma paragraph.").unwrap();
    input.flush().unwrap();

    let paragraphs = extract_paragraphs_from_file(input.path()).unwrap();

    let cancel = CancellationToken::new();
    cancel.cancel();
    let config = PipelineConfig {
        language: Language::English,
        max_retries: 0,
        retry_delay: 0.0,
        session_refresh_interval: 3,
        additional_checks: Vec::new(),
    };
    let mut orchestrator = CheckOrchestrator::new(Box::new(MockProvider::working()), config);
    let report = tokio_test::block_on(async {
        orchestrator.run(&paragraphs, &NullReporter, &cancel).await
    })
    .unwrap();
    assert!(report.rows.is_empty());

    // A fully cancelled run still writes a valid report with just the header
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("partial.csv");
    write_csv_report(&output, &report.rows, &[]).unwrap();
    let content = std::fs::read_to_string(&output).unwrap();
    assert_eq!(content.lines().count(), 1);
}
