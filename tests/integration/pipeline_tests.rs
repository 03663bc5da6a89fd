/*!
 * End-to-end tests of the check orchestration pipeline against the mock
 * provider, covering row completeness, session refresh boundaries, retry
 * accounting, cancellation and determinism.
 */

use docproof::app_config::Language;
use docproof::pipeline::{
    CancellationToken, CellOutcome, CheckOrchestrator, NullReporter, PipelineConfig,
    ProgressEvent, RunStatus,
};
use docproof::providers::mock::MockProvider;

use crate::common::{make_paragraphs, CancelOnParagraph, CollectingReporter};

fn fast_config() -> PipelineConfig {
    PipelineConfig {
        language: Language::English,
        max_retries: 3,
        retry_delay: 0.0,
        session_refresh_interval: 3,
        additional_checks: Vec::new(),
    }
}

#[tokio::test]
async fn test_run_fiveParagraphsWithToneCheck_shouldRefreshAtParagraph3() {
    let provider = MockProvider::working();
    let tracker = provider.tracker();
    let config = PipelineConfig {
        additional_checks: vec!["check tone".to_string()],
        ..fast_config()
    };
    let mut orchestrator = CheckOrchestrator::new(Box::new(provider), config);

    let reporter = CollectingReporter::new();
    let report = orchestrator
        .run(&make_paragraphs(5), &reporter, &CancellationToken::new())
        .await
        .unwrap();

    assert_eq!(report.status, RunStatus::Completed);
    assert_eq!(report.rows.len(), 5);
    // Two sessions: one created before paragraph 0, one before paragraph 3
    assert_eq!(report.sessions_created, 2);
    let refreshes = reporter.filtered(|e| matches!(e, ProgressEvent::SessionRefreshed { .. }));
    assert_eq!(
        refreshes,
        vec![ProgressEvent::SessionRefreshed { index: 3 }]
    );

    // Every row has a grammar cell and a "check tone" cell
    for row in &report.rows {
        assert!(matches!(row.grammar, CellOutcome::Text(_)));
        assert_eq!(row.supplementary.len(), 1);
        assert_eq!(row.supplementary[0].0, "check tone");
    }

    // Two checks per paragraph, one call each
    assert_eq!(tracker.call_count(), 10);
}

#[tokio::test]
async fn test_run_providerFailsOnlyParagraph2_shouldMakeThreeAttemptsAndMarkCell() {
    let provider = MockProvider::failing_for("paragraph number 2");
    let tracker = provider.tracker();
    let config = PipelineConfig {
        max_retries: 2,
        ..fast_config()
    };
    let mut orchestrator = CheckOrchestrator::new(Box::new(provider), config);

    let reporter = CollectingReporter::new();
    let report = orchestrator
        .run(&make_paragraphs(5), &reporter, &CancellationToken::new())
        .await
        .unwrap();

    // One call each for paragraphs 0, 1, 3, 4 plus three attempts for 2
    assert_eq!(tracker.call_count(), 7);

    assert_eq!(report.rows.len(), 5);
    for row in &report.rows {
        if row.paragraph_index == 2 {
            assert!(matches!(row.grammar, CellOutcome::Failed { .. }));
        } else {
            assert!(matches!(row.grammar, CellOutcome::Text(_)));
        }
    }

    let failures = reporter.filtered(|e| matches!(e, ProgressEvent::CheckFailed { .. }));
    assert_eq!(failures.len(), 1);
    assert!(matches!(
        &failures[0],
        ProgressEvent::CheckFailed { index: 2, check, .. } if check == "grammar"
    ));
}

#[tokio::test]
async fn test_run_withPersistentFailures_shouldKeepAllIndicesWithoutGaps() {
    let mut orchestrator =
        CheckOrchestrator::new(Box::new(MockProvider::failing()), fast_config());
    let report = orchestrator
        .run(&make_paragraphs(6), &NullReporter, &CancellationToken::new())
        .await
        .unwrap();

    let indices: Vec<usize> = report.rows.iter().map(|r| r.paragraph_index).collect();
    assert_eq!(indices, vec![0, 1, 2, 3, 4, 5]);
}

#[tokio::test]
async fn test_run_cancelledBeforeParagraph2_shouldReturnExactlyRows0And1() {
    let provider = MockProvider::working();
    let tracker = provider.tracker();
    let mut orchestrator = CheckOrchestrator::new(Box::new(provider), fast_config());

    let cancel = CancellationToken::new();
    let reporter = CancelOnParagraph::new(2, cancel.clone());
    let report = orchestrator
        .run(&make_paragraphs(5), &reporter, &cancel)
        .await
        .unwrap();

    assert_eq!(report.status, RunStatus::Cancelled);
    let indices: Vec<usize> = report.rows.iter().map(|r| r.paragraph_index).collect();
    assert_eq!(indices, vec![0, 1]);
    // No check was issued for paragraph 2 or later
    assert_eq!(tracker.call_count(), 2);
}

#[tokio::test]
async fn test_run_twiceWithIdenticalInput_shouldProduceIdenticalRows() {
    let paragraphs = make_paragraphs(4);
    let config = PipelineConfig {
        additional_checks: vec!["check tone".to_string()],
        ..fast_config()
    };

    let mut first = CheckOrchestrator::new(Box::new(MockProvider::working()), config.clone());
    let first_rows = first
        .run(&paragraphs, &NullReporter, &CancellationToken::new())
        .await
        .unwrap()
        .rows;

    let mut second = CheckOrchestrator::new(Box::new(MockProvider::working()), config);
    let second_rows = second
        .run(&paragraphs, &NullReporter, &CancellationToken::new())
        .await
        .unwrap()
        .rows;

    assert_eq!(first_rows, second_rows);
}

#[tokio::test]
async fn test_run_withInterval1_shouldRefreshBetweenEveryParagraphNeverMidParagraph() {
    let provider = MockProvider::working();
    let tracker = provider.tracker();
    let config = PipelineConfig {
        session_refresh_interval: 1,
        additional_checks: vec!["check tone".to_string()],
        ..fast_config()
    };
    let mut orchestrator = CheckOrchestrator::new(Box::new(provider), config);

    let reporter = CollectingReporter::new();
    let report = orchestrator
        .run(&make_paragraphs(3), &reporter, &CancellationToken::new())
        .await
        .unwrap();

    assert_eq!(report.sessions_created, 3);
    assert_eq!(tracker.reset_count(), 2);

    // Each refresh comes before the paragraph-started event of its paragraph,
    // so both checks of a paragraph always share one session
    let events = reporter.events();
    for index in [1usize, 2] {
        let refresh_pos = events
            .iter()
            .position(|e| *e == ProgressEvent::SessionRefreshed { index })
            .unwrap();
        let started_pos = events
            .iter()
            .position(|e| *e == ProgressEvent::ParagraphStarted { index })
            .unwrap();
        assert!(refresh_pos < started_pos);
    }
}

#[tokio::test]
async fn test_run_withRejectingProvider_shouldContinueAcrossParagraphs() {
    let provider = MockProvider::rejecting();
    let tracker = provider.tracker();
    let config = PipelineConfig {
        max_retries: 5,
        ..fast_config()
    };
    let mut orchestrator = CheckOrchestrator::new(Box::new(provider), config);

    let report = orchestrator
        .run(&make_paragraphs(3), &NullReporter, &CancellationToken::new())
        .await
        .unwrap();

    // Non-retryable failures consume no retry budget and never abort the run
    assert_eq!(tracker.call_count(), 3);
    assert_eq!(report.rows.len(), 3);
    for row in &report.rows {
        match &row.grammar {
            CellOutcome::Failed { kind, .. } => assert_eq!(kind, "rejected"),
            other => panic!("expected failure marker, got {:?}", other),
        }
    }
}

#[tokio::test]
async fn test_run_completedRun_shouldEmitRunCompletedWithRowCount() {
    let mut orchestrator =
        CheckOrchestrator::new(Box::new(MockProvider::working()), fast_config());
    let reporter = CollectingReporter::new();
    orchestrator
        .run(&make_paragraphs(2), &reporter, &CancellationToken::new())
        .await
        .unwrap();

    let completed = reporter.filtered(|e| matches!(e, ProgressEvent::RunCompleted { .. }));
    assert_eq!(completed, vec![ProgressEvent::RunCompleted { rows: 2 }]);
}
