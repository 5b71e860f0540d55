// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use super::helpers::mock_fetcher::{BrokenFetcherFactory, MockFetcherFactory};
use super::helpers::{TestProject, TITLE_TEMPLATE, WIDGET_PAGE};
use pagesift::config::script_settings::DelayPolicy;
use pagesift::domain::models::url_entry::{LedgerState, LedgerWrite, PendingSet};
use pagesift::utils::errors::PipelineError;
use serde_json::json;
use std::sync::Arc;

const P1: &str = "https://shop.example.com/p1";

#[tokio::test]
async fn test_successful_url_is_stored_and_completed() {
    let project = TestProject::new();
    project.write_template("example", TITLE_TEMPLATE);
    let fetchers = Arc::new(MockFetcherFactory::new().with_page(P1, WIDGET_PAGE));
    let pipeline = project.pipeline(fetchers.clone(), DelayPolicy::none());
    let mut pending: PendingSet = [P1].into_iter().collect();

    let report = pipeline.run(&mut pending).await;

    assert_eq!(project.results("example"), vec![json!({"title": "Widget"})]);
    assert_eq!(project.completed(), vec![P1]);
    assert!(project.failed().is_empty());
    assert!(pending.is_empty());
    assert_eq!(report.completed, 1);
    assert_eq!(report.failed, 0);
    assert_eq!(fetchers.acquired(), 1);
    assert_eq!(fetchers.released(), 1);
}

#[tokio::test]
async fn test_missing_template_fails_without_fetching() {
    let project = TestProject::new();
    let fetchers = Arc::new(MockFetcherFactory::new().with_page(P1, WIDGET_PAGE));
    let pipeline = project.pipeline(fetchers.clone(), DelayPolicy::none());
    let mut pending: PendingSet = [P1].into_iter().collect();

    let report = pipeline.run(&mut pending).await;

    assert_eq!(project.failed(), vec![P1]);
    assert!(project.completed().is_empty());
    assert!(!project.result_file_exists("example"));
    assert_eq!(fetchers.acquired(), 0);
    assert_eq!(report.failed, 1);
}

#[tokio::test]
async fn test_missing_template_is_always_failed() {
    let project = TestProject::new();
    let fetchers = Arc::new(MockFetcherFactory::new().with_page(P1, WIDGET_PAGE));
    let pipeline = project.pipeline(fetchers, DelayPolicy::none());

    for _ in 0..3 {
        let err = pipeline.process_url(P1).await.unwrap_err();
        assert!(matches!(
            err,
            PipelineError::TemplateMissing { ref domain, .. } if domain == "example"
        ));
    }
}

#[tokio::test]
async fn test_fetch_failure_marks_failed_and_releases_fetcher() {
    let project = TestProject::new();
    project.write_template("example", TITLE_TEMPLATE);
    let fetchers =
        Arc::new(MockFetcherFactory::new().with_failure(P1, "net::ERR_NAME_NOT_RESOLVED"));
    let pipeline = project.pipeline(fetchers.clone(), DelayPolicy::none());
    let mut pending: PendingSet = [P1].into_iter().collect();

    pipeline.run(&mut pending).await;

    assert_eq!(project.failed(), vec![P1]);
    assert!(!project.result_file_exists("example"));
    assert_eq!(fetchers.acquired(), 1);
    assert_eq!(fetchers.released(), 1);
}

#[tokio::test]
async fn test_fetcher_launch_failure_marks_failed() {
    let project = TestProject::new();
    project.write_template("example", TITLE_TEMPLATE);
    let pipeline = project.pipeline(Arc::new(BrokenFetcherFactory), DelayPolicy::none());

    let err = pipeline.process_url(P1).await.unwrap_err();
    assert!(matches!(err, PipelineError::Fetch(_)));

    let mut pending: PendingSet = [P1].into_iter().collect();
    pipeline.run(&mut pending).await;
    assert_eq!(project.failed(), vec![P1]);
}

#[tokio::test]
async fn test_empty_extraction_is_failed() {
    let project = TestProject::new();
    project.write_template("example", "rating:\n  css: div.rating\n");
    let fetchers = Arc::new(MockFetcherFactory::new().with_page(P1, WIDGET_PAGE));
    let pipeline = project.pipeline(fetchers, DelayPolicy::none());

    let err = pipeline.process_url(P1).await.unwrap_err();
    assert!(matches!(err, PipelineError::EmptyResult));

    let mut pending: PendingSet = [P1].into_iter().collect();
    pipeline.run(&mut pending).await;
    assert_eq!(project.failed(), vec![P1]);
    assert!(!project.result_file_exists("example"));
}

#[tokio::test]
async fn test_invalid_template_is_failed() {
    let project = TestProject::new();
    project.write_template("example", "title:\n  xpath: //h1\n");
    let fetchers = Arc::new(MockFetcherFactory::new().with_page(P1, WIDGET_PAGE));
    let pipeline = project.pipeline(fetchers.clone(), DelayPolicy::none());

    let err = pipeline.process_url(P1).await.unwrap_err();
    assert!(matches!(err, PipelineError::Template(_)));
    assert_eq!(fetchers.acquired(), 0);
}

#[tokio::test]
async fn test_undeterminable_domain_is_failed_and_run_continues() {
    let project = TestProject::new();
    project.write_template("example", TITLE_TEMPLATE);
    let fetchers = Arc::new(MockFetcherFactory::new().with_page(P1, WIDGET_PAGE));
    let pipeline = project.pipeline(fetchers, DelayPolicy::none());
    let mut pending: PendingSet = ["http://localhost/admin", P1].into_iter().collect();

    let report = pipeline.run(&mut pending).await;

    assert_eq!(project.failed(), vec!["http://localhost/admin"]);
    assert_eq!(project.completed(), vec![P1]);
    assert_eq!(report.processed(), 2);
}

#[tokio::test]
async fn test_every_url_lands_in_exactly_one_ledger() {
    let project = TestProject::new();
    project.write_template("example", TITLE_TEMPLATE);
    let ok = "https://www.example.com/ok";
    let broken = "https://www.example.com/broken";
    let unknown = "https://www.unknown.org/page";
    let fetchers = Arc::new(
        MockFetcherFactory::new()
            .with_page(ok, WIDGET_PAGE)
            .with_failure(broken, "timeout"),
    );
    let pipeline = project.pipeline(fetchers.clone(), DelayPolicy::none());
    let urls = [ok, broken, unknown, "not a url"];
    let mut pending: PendingSet = urls.into_iter().collect();

    let report = pipeline.run(&mut pending).await;

    let completed = project.completed();
    let failed = project.failed();
    for url in urls {
        let in_completed = completed.iter().any(|u| u == url);
        let in_failed = failed.iter().any(|u| u == url);
        assert!(in_completed ^ in_failed, "{} must be in exactly one ledger", url);
    }
    assert_eq!(completed, vec![ok]);
    assert_eq!(report.completed, 1);
    assert_eq!(report.failed, 3);
    assert!(pending.is_empty());
    assert_eq!(fetchers.acquired(), fetchers.released());
    assert_eq!(fetchers.fetched(), vec![ok, broken]);
}

#[tokio::test]
async fn test_non_ascii_url_is_processed_but_not_ledgered() {
    let project = TestProject::new();
    project.write_template("example", TITLE_TEMPLATE);
    let url = "https://www.example.com/café";
    let fetchers = Arc::new(MockFetcherFactory::new().with_page(url, WIDGET_PAGE));
    let pipeline = project.pipeline(fetchers, DelayPolicy::none());
    let mut pending: PendingSet = [url].into_iter().collect();

    let report = pipeline.run(&mut pending).await;

    assert!(project.completed().is_empty());
    assert!(project.failed().is_empty());
    assert!(pending.is_empty());
    assert_eq!(project.results("example").len(), 1);
    assert_eq!(report.completed, 1);
    assert_eq!(report.unledgered, 1);
}

#[tokio::test]
async fn test_handle_outcome_removes_from_pending() {
    let project = TestProject::new();
    let pipeline = project.pipeline(Arc::new(MockFetcherFactory::new()), DelayPolicy::none());
    let mut pending: PendingSet = [P1, "https://www.example.com/other"].into_iter().collect();

    let (state, write) = pipeline
        .handle_outcome(P1, Err(PipelineError::EmptyResult), &mut pending)
        .await;

    assert_eq!(state, LedgerState::Failed);
    assert_eq!(write, Some(LedgerWrite::Recorded));
    assert!(!pending.contains(P1));
    assert_eq!(pending.len(), 1);
}

#[tokio::test]
async fn test_results_accumulate_across_runs() {
    let project = TestProject::new();
    project.write_template("example", TITLE_TEMPLATE);
    let p2 = "https://www.example.com/p2";
    let fetchers = Arc::new(
        MockFetcherFactory::new()
            .with_page(P1, WIDGET_PAGE)
            .with_page(p2, WIDGET_PAGE),
    );

    let mut first: PendingSet = [P1].into_iter().collect();
    project.pipeline(fetchers.clone(), DelayPolicy::none()).run(&mut first).await;
    let mut second: PendingSet = [p2].into_iter().collect();
    project.pipeline(fetchers, DelayPolicy::none()).run(&mut second).await;

    assert_eq!(project.results("example").len(), 2);
    assert_eq!(project.completed(), vec![P1, p2]);
}
