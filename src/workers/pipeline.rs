// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tracing::{error, info, info_span, instrument, warn, Instrument};
use uuid::Uuid;

use crate::config::script_settings::DelayPolicy;
use crate::domain::models::extraction_result::ExtractionResult;
use crate::domain::models::run_report::RunReport;
use crate::domain::models::url_entry::{LedgerState, LedgerWrite, PendingSet};
use crate::domain::repositories::ledger_repository::LedgerRepository;
use crate::domain::repositories::storage_repository::ResultRepository;
use crate::domain::repositories::template_repository::TemplateRepository;
use crate::domain::services::extraction_service::Extractor;
use crate::engines::traits::FetcherFactory;
use crate::utils::errors::PipelineError;
use crate::utils::url_utils;
use crate::workers::fetcher_guard::FetcherGuard;

/// 抓取流水线
///
/// 按顺序处理待处理集合中的URL：解析模板、抓取、提取、保存、更新账本。
/// 单个URL的失败只影响该URL。
pub struct ScrapePipeline {
    templates: Arc<dyn TemplateRepository>,
    fetchers: Arc<dyn FetcherFactory>,
    extractor: Arc<dyn Extractor>,
    results: Arc<dyn ResultRepository>,
    ledger: Arc<dyn LedgerRepository>,
    delay: DelayPolicy,
    /// 本次运行是否已经发出过请求
    fetched_before: AtomicBool,
}

impl ScrapePipeline {
    /// 创建新的流水线实例
    pub fn new(
        templates: Arc<dyn TemplateRepository>,
        fetchers: Arc<dyn FetcherFactory>,
        extractor: Arc<dyn Extractor>,
        results: Arc<dyn ResultRepository>,
        ledger: Arc<dyn LedgerRepository>,
        delay: DelayPolicy,
    ) -> Self {
        Self {
            templates,
            fetchers,
            extractor,
            results,
            ledger,
            delay,
            fetched_before: AtomicBool::new(false),
        }
    }

    /// 处理全部待处理URL
    ///
    /// 遍历集合快照，每处理完一个URL就将其移出集合。两次页面请求之间按
    /// 间隔策略随机等待；第一个请求之前、最后一个请求之后以及没有发出请求
    /// 的URL（无法推导域名、模板缺失或无效）都不等待。
    pub async fn run(&self, pending: &mut PendingSet) -> RunReport {
        let run_id = Uuid::new_v4();
        let span = info_span!("run", %run_id);

        async move {
            let snapshot = pending.snapshot();
            let mut report = RunReport::new(run_id, snapshot.len());
            info!("Starting to scrape {} URLs sequentially", snapshot.len());

            self.fetched_before.store(false, Ordering::SeqCst);

            for url in snapshot.iter() {
                let outcome = self.process_url(url).await;
                let (state, write) = self.handle_outcome(url, outcome, pending).await;
                report.record(state, write);
            }

            report.finish();
            info!(
                "Finished scraping URLs sequentially: {} completed, {} failed, {} not ledgered",
                report.completed, report.failed, report.unledgered
            );
            report
        }
        .instrument(span)
        .await
    }

    /// 处理单个URL，不修改账本
    #[instrument(skip(self))]
    pub async fn process_url(&self, url: &str) -> Result<ExtractionResult, PipelineError> {
        info!("Starting to scrape URL");

        let domain = url_utils::derive_domain(url)?;
        let template = self.templates.resolve(&domain).await?.ok_or_else(|| {
            PipelineError::TemplateMissing {
                domain: domain.clone(),
                url: url.to_string(),
            }
        })?;

        let content = self.fetch_page(url).await?;

        let record = self.extractor.extract(&template, &content)?;
        if record.is_empty() {
            return Err(PipelineError::EmptyResult);
        }
        info!("Extracted {} fields for domain {}", record.fields.len(), domain);

        self.results.append(&domain, &record).await?;
        info!("Successfully scraped URL");

        Ok(record)
    }

    /// 为单次抓取获取一个新的抓取器，抓取结束后无论成败都释放
    ///
    /// 本次运行中已有过请求时，先按间隔策略等待
    async fn fetch_page(&self, url: &str) -> Result<String, PipelineError> {
        if self.fetched_before.swap(true, Ordering::SeqCst) {
            self.pause().await;
        }

        let fetcher = self.fetchers.acquire().await?;
        let mut guard = FetcherGuard::new(fetcher, url);
        let content = guard.fetch().await;
        guard.release().await;
        Ok(content?)
    }

    /// 根据处理结果更新账本，并把URL移出待处理集合
    pub async fn handle_outcome(
        &self,
        url: &str,
        outcome: Result<ExtractionResult, PipelineError>,
        pending: &mut PendingSet,
    ) -> (LedgerState, Option<LedgerWrite>) {
        let (state, write) = match outcome {
            Ok(_) => (LedgerState::Completed, self.ledger.mark_completed(url).await),
            Err(e) => {
                match &e {
                    PipelineError::TemplateMissing { domain, .. } => warn!(
                        "Template does not exist for domain: {}. Skipping URL: {}",
                        domain, url
                    ),
                    other => error!(
                        kind = other.kind(),
                        "Error occurred while scraping URL {}: {}", url, other
                    ),
                }
                (LedgerState::Failed, self.ledger.mark_failed(url).await)
            }
        };

        let write = match write {
            Ok(LedgerWrite::SkippedNonAscii) => {
                metrics::counter!("pagesift_ledger_skipped_total").increment(1);
                Some(LedgerWrite::SkippedNonAscii)
            }
            Ok(w) => Some(w),
            Err(e) => {
                error!("Failed to write {} ledger for {}: {}", state, url, e);
                None
            }
        };

        metrics::counter!("pagesift_urls_total", "outcome" => state.to_string()).increment(1);
        pending.remove(url);

        (state, write)
    }

    async fn pause(&self) {
        let wait = self.delay.sample(&mut rand::rng());
        if wait.is_zero() {
            return;
        }
        info!("Waiting for {:.1} seconds before the next request", wait.as_secs_f64());
        tokio::time::sleep(wait).await;
    }
}
