//! Submission loop tests against a mock indexing service

mod common;

use bulk_indexer::config::SubmitLimits;
use bulk_indexer::indexing::GoogleIndexingService;
use bulk_indexer::submit::{NoopProgress, Phase, create_submission_plan, execute_submission};
use bulk_indexer::types::{RunState, TerminalState};
use common::fixtures::{Event, RecordingProgress, make_item, make_items};
use common::mock_indexer::MockIndexingService;
use secrecy::SecretString;
use std::time::Duration;

fn limits(quota: usize, failure_limit: usize) -> SubmitLimits {
    SubmitLimits::new(quota, failure_limit).unwrap()
}

#[tokio::test]
async fn test_all_success_completes() {
    let items = make_items(3);
    let mock = MockIndexingService::new();

    let report = execute_submission(&items, limits(200, 5), &mock, &NoopProgress).await;

    assert_eq!(report.terminal, TerminalState::Completed);
    assert_eq!(report.state.submitted, 3);
    assert_eq!(report.state.succeeded, 3);
    assert_eq!(report.state.failed, 0);
    assert!(!report.state.aborted);
    assert_eq!(report.skipped, 0);
    assert!(report.failures.is_empty());
}

#[tokio::test]
async fn test_items_submitted_in_input_order() {
    let items = make_items(10);
    let mock = MockIndexingService::new();

    execute_submission(&items, limits(200, 5), &mock, &NoopProgress).await;

    let expected: Vec<String> = items.iter().map(|i| i.url.clone()).collect();
    assert_eq!(mock.published_urls(), expected);
}

#[tokio::test]
async fn test_quota_caps_attempts() {
    let items = make_items(150);
    let mock = MockIndexingService::new();

    let report = execute_submission(&items, limits(100, 5), &mock, &NoopProgress).await;

    assert_eq!(mock.publish_count(), 100);
    assert_eq!(report.terminal, TerminalState::QuotaExhausted);
    assert_eq!(report.state.submitted, 100);
    assert_eq!(report.skipped, 50);
    assert_eq!(
        mock.published_urls().last().map(String::as_str),
        Some("https://example.org/page-100")
    );
}

#[tokio::test]
async fn test_item_count_equal_to_quota_completes() {
    let items = make_items(4);
    let mock = MockIndexingService::new();

    let report = execute_submission(&items, limits(4, 5), &mock, &NoopProgress).await;

    assert_eq!(report.terminal, TerminalState::Completed);
    assert_eq!(mock.publish_count(), 4);
}

#[tokio::test]
async fn test_sixth_failure_aborts_before_seventh_item() {
    let items = make_items(10);
    let mock = MockIndexingService::new();
    mock.fail_all("Permission denied. Failed to verify the URL ownership.");

    let report = execute_submission(&items, limits(200, 5), &mock, &NoopProgress).await;

    assert_eq!(report.terminal, TerminalState::Aborted);
    assert!(report.state.aborted);
    assert_eq!(report.state.failed, 6);
    assert_eq!(report.state.submitted, 6);
    assert_eq!(mock.publish_count(), 6);
    assert!(!mock.published_urls().contains(&make_item(7).url));
    assert_eq!(report.failures.len(), 6);
    assert!(report.failures[0].reason.contains("Failed to verify the URL ownership"));
}

#[tokio::test]
async fn test_unreachable_endpoint_counts_as_failures() {
    // Nothing listens on port 1, so every publish is a connection error
    let service = GoogleIndexingService::new(
        SecretString::from("token".to_string()),
        "http://127.0.0.1:1",
        Duration::from_secs(5),
    )
    .unwrap();
    let items = make_items(10);

    let report = execute_submission(&items, limits(200, 5), &service, &NoopProgress).await;

    assert_eq!(report.terminal, TerminalState::Aborted);
    assert_eq!(
        report.state,
        RunState {
            submitted: 6,
            succeeded: 0,
            failed: 6,
            aborted: true,
        }
    );
    assert_eq!(report.skipped, 4);
}

#[tokio::test]
async fn test_failures_at_limit_do_not_abort() {
    let items = make_items(8);
    let mock = MockIndexingService::new();
    for n in 0..5 {
        mock.fail_call(n);
    }

    let report = execute_submission(&items, limits(200, 5), &mock, &NoopProgress).await;

    assert_eq!(report.terminal, TerminalState::Completed);
    assert_eq!(report.state.failed, 5);
    assert_eq!(report.state.succeeded, 3);
    assert_eq!(mock.publish_count(), 8);
}

#[tokio::test]
async fn test_scattered_failures_are_recorded_with_index() {
    let items = make_items(6);
    let mock = MockIndexingService::new();
    mock.fail_url(&make_item(2).url);
    mock.fail_url(&make_item(5).url);

    let report = execute_submission(&items, limits(200, 5), &mock, &NoopProgress).await;

    let failed: Vec<(usize, &str)> = report
        .failures
        .iter()
        .map(|f| (f.index, f.url.as_str()))
        .collect();
    assert_eq!(
        failed,
        vec![
            (1, "https://example.org/page-2"),
            (4, "https://example.org/page-5"),
        ]
    );
    assert_eq!(report.state.succeeded, 4);
}

#[tokio::test]
async fn test_abort_takes_precedence_on_last_item() {
    let items = make_items(2);
    let mock = MockIndexingService::new();
    mock.fail_call(1);

    let report = execute_submission(&items, limits(200, 0), &mock, &NoopProgress).await;

    assert_eq!(report.terminal, TerminalState::Aborted);
    assert_eq!(report.state.submitted, 2);
    assert_eq!(report.skipped, 0);
}

#[tokio::test]
async fn test_empty_input_completes_without_calls() {
    let mock = MockIndexingService::new();

    let report = execute_submission(&[], limits(200, 5), &mock, &NoopProgress).await;

    assert_eq!(report.terminal, TerminalState::Completed);
    assert_eq!(report.state, RunState::default());
    assert_eq!(report.total_items, 0);
    assert_eq!(mock.publish_count(), 0);
}

#[tokio::test]
async fn test_counters_stay_consistent_across_failure_patterns() {
    let items = make_items(30);

    for quota in [1, 7, 30, 50] {
        for failure_limit in [0, 2, 5] {
            for stride in [1, 2, 3, 7] {
                let mock = MockIndexingService::new();
                for n in (0..items.len()).step_by(stride) {
                    mock.fail_call(n);
                }

                let report =
                    execute_submission(&items, limits(quota, failure_limit), &mock, &NoopProgress)
                        .await;
                let state = report.state;

                assert_eq!(state.submitted, state.succeeded + state.failed);
                assert!(state.submitted <= quota);
                assert_eq!(state.submitted, mock.publish_count());
                assert_eq!(state.aborted, report.terminal == TerminalState::Aborted);
                assert!(state.failed <= failure_limit + 1);
                assert_eq!(report.skipped, items.len() - state.submitted);
            }
        }
    }
}

#[tokio::test]
async fn test_progress_events_in_order() {
    let items = make_items(3);
    let mock = MockIndexingService::new();
    mock.fail_call(1);
    let progress = RecordingProgress::default();

    execute_submission(&items, limits(2, 5), &mock, &progress).await;

    let stopped = RunState {
        submitted: 2,
        succeeded: 1,
        failed: 1,
        aborted: false,
    };
    assert_eq!(
        progress.events(),
        vec![
            Event::Phase(Phase::Submitting),
            Event::Started(0, make_item(1).url),
            Event::Finished(0, true),
            Event::Started(1, make_item(2).url),
            Event::Finished(1, false),
            Event::Message("Quota of 2 reached; 1 left for the next run".to_string()),
            Event::Stopped(TerminalState::QuotaExhausted, stopped),
            Event::Phase(Phase::Complete),
        ]
    );
}

#[tokio::test]
async fn test_api_failures_are_not_reported_as_errors() {
    let items = make_items(2);
    let mock = MockIndexingService::new();
    mock.fail_all("backend error");
    let progress = RecordingProgress::default();

    execute_submission(&items, limits(200, 5), &mock, &progress).await;

    assert!(
        !progress
            .events()
            .iter()
            .any(|e| matches!(e, Event::Error(_)))
    );
}

#[tokio::test]
async fn test_unexpected_error_is_counted_and_reported() {
    let items = make_items(3);
    let mock = MockIndexingService::new();
    mock.fail_internal(&make_item(2).url);
    let progress = RecordingProgress::default();

    let report = execute_submission(&items, limits(200, 5), &mock, &progress).await;

    assert_eq!(report.terminal, TerminalState::Completed);
    assert_eq!(report.state.failed, 1);
    assert_eq!(report.state.succeeded, 2);
    assert_eq!(report.failures[0].url, make_item(2).url);

    let errors: Vec<Event> = progress
        .events()
        .into_iter()
        .filter(|e| matches!(e, Event::Error(_)))
        .collect();
    assert_eq!(
        errors,
        vec![Event::Error(
            "internal error: request for https://example.org/page-2 could not be built".to_string()
        )]
    );
}

#[test]
fn test_plan_matches_execution_split() {
    let items = make_items(5);
    let plan = create_submission_plan(&items, limits(3, 5));

    assert_eq!(plan.to_submit, items[..3].to_vec());
    assert_eq!(plan.over_quota, items[3..].to_vec());
}
