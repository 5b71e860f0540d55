// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use super::helpers::mock_fetcher::MockFetcherFactory;
use super::helpers::{TestProject, TITLE_TEMPLATE, WIDGET_PAGE};
use pagesift::config::script_settings::DelayPolicy;
use pagesift::infrastructure::ledger_store::load_pending;
use std::sync::Arc;

const OK: &str = "https://www.example.com/ok";
const BROKEN: &str = "https://www.example.com/broken";
const ACCENTED: &str = "https://www.example.com/café";

fn fetchers() -> Arc<MockFetcherFactory> {
    Arc::new(
        MockFetcherFactory::new()
            .with_page(OK, WIDGET_PAGE)
            .with_page(ACCENTED, WIDGET_PAGE)
            .with_failure(BROKEN, "connection reset"),
    )
}

async fn run_once(project: &TestProject, retry_failed: bool) -> Arc<MockFetcherFactory> {
    let ledger = project.ledger();
    let urls = project.read(&project.layout.urls_list_file);
    let mut pending = load_pending(&urls, ledger.as_ref(), retry_failed)
        .await
        .unwrap();

    let fetchers = fetchers();
    project
        .pipeline(fetchers.clone(), DelayPolicy::none())
        .run(&mut pending)
        .await;
    fetchers
}

#[tokio::test]
async fn test_second_run_skips_ledgered_urls() {
    let project = TestProject::new();
    project.write_template("example", TITLE_TEMPLATE);
    project.write_urls(&[OK, BROKEN, ACCENTED]);

    let first = run_once(&project, false).await;
    assert_eq!(first.fetched(), vec![OK, BROKEN, ACCENTED]);

    let second = run_once(&project, false).await;

    // 非 ASCII URL 不在任何账本中，因此会被再次处理
    assert_eq!(second.fetched(), vec![ACCENTED]);
    assert_eq!(project.completed(), vec![OK]);
    assert_eq!(project.failed(), vec![BROKEN]);
    assert_eq!(project.results("example").len(), 3);
}

#[tokio::test]
async fn test_retry_failed_reprocesses_failed_ledger() {
    let project = TestProject::new();
    project.write_template("example", TITLE_TEMPLATE);
    project.write_urls(&[OK, BROKEN]);

    run_once(&project, false).await;
    let retry = run_once(&project, true).await;

    assert_eq!(retry.fetched(), vec![BROKEN]);
    assert_eq!(project.failed(), vec![BROKEN, BROKEN]);
    assert_eq!(project.completed(), vec![OK]);
}
