// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use async_trait::async_trait;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use tokio::fs::{self, OpenOptions};
use tokio::io::AsyncWriteExt;
use tracing::{info, warn};

use crate::domain::models::url_entry::{LedgerState, LedgerWrite, PendingSet};
use crate::domain::repositories::ledger_repository::LedgerRepository;
use crate::domain::repositories::storage_repository::StorageError;
use crate::utils::url_utils;

/// 文本文件账本
///
/// 完成账本与失败账本各一个文件，每行一个URL，只追加
pub struct FileLedger {
    completed_file: PathBuf,
    failed_file: PathBuf,
}

impl FileLedger {
    pub fn new(completed_file: impl Into<PathBuf>, failed_file: impl Into<PathBuf>) -> Self {
        Self {
            completed_file: completed_file.into(),
            failed_file: failed_file.into(),
        }
    }

    async fn append(
        &self,
        path: &Path,
        url: &str,
        state: LedgerState,
    ) -> Result<LedgerWrite, StorageError> {
        if !url_utils::is_ledger_safe(url) {
            warn!("Skipped non-ASCII URL: {}", url);
            return Ok(LedgerWrite::SkippedNonAscii);
        }

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .await?;
        file.write_all(format!("{}\n", url).as_bytes()).await?;
        file.flush().await?;

        info!("Moved URL to {} ledger: {}", state, url);
        Ok(LedgerWrite::Recorded)
    }
}

#[async_trait]
impl LedgerRepository for FileLedger {
    async fn mark_completed(&self, url: &str) -> Result<LedgerWrite, StorageError> {
        self.append(&self.completed_file, url, LedgerState::Completed)
            .await
    }

    async fn mark_failed(&self, url: &str) -> Result<LedgerWrite, StorageError> {
        self.append(&self.failed_file, url, LedgerState::Failed).await
    }

    async fn recorded(&self, state: LedgerState) -> Result<HashSet<String>, StorageError> {
        let path = match state {
            LedgerState::Completed => &self.completed_file,
            LedgerState::Failed => &self.failed_file,
            LedgerState::Pending => return Ok(HashSet::new()),
        };

        match fs::read_to_string(path).await {
            Ok(content) => Ok(parse_url_lines(&content).collect()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(HashSet::new()),
            Err(e) => Err(StorageError::Io(e)),
        }
    }
}

/// 按行解析URL列表，去掉首尾空白并跳过空行
pub fn parse_url_lines(content: &str) -> impl Iterator<Item = String> + '_ {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
}

/// 构建本次运行的待处理集合
///
/// 已完成的URL总是跳过；失败的URL仅在 `retry_failed` 为 false 时跳过。
/// 非 ASCII URL 从不写入账本，因此每次运行都会重新处理。
pub async fn load_pending<L>(
    urls_list: &str,
    ledger: &L,
    retry_failed: bool,
) -> Result<PendingSet, StorageError>
where
    L: LedgerRepository + ?Sized,
{
    let completed = ledger.recorded(LedgerState::Completed).await?;
    let failed = if retry_failed {
        HashSet::new()
    } else {
        ledger.recorded(LedgerState::Failed).await?
    };

    let mut pending = PendingSet::new();
    let mut skipped = 0usize;
    for url in parse_url_lines(urls_list) {
        if completed.contains(&url) || failed.contains(&url) {
            skipped += 1;
            continue;
        }
        pending.insert(url);
    }

    if skipped > 0 {
        info!(
            "Resuming: skipped {} URLs already recorded in the ledgers",
            skipped
        );
    }
    info!("Loaded {} pending URLs", pending.len());

    Ok(pending)
}
