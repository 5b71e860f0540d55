// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use async_trait::async_trait;
use std::path::PathBuf;
use tokio::fs::OpenOptions;
use tokio::io::AsyncWriteExt;

use crate::domain::models::extraction_result::ExtractionResult;
use crate::domain::repositories::storage_repository::{ResultRepository, StorageError};

/// JSON Lines 结果存储
///
/// 每个域名一个文件 `<results_dir>/<domain>_results.txt`，每行一条 JSON 记录
pub struct JsonLinesResultStore {
    results_dir: PathBuf,
}

impl JsonLinesResultStore {
    pub fn new(results_dir: impl Into<PathBuf>) -> Self {
        Self {
            results_dir: results_dir.into(),
        }
    }

    pub fn result_path(&self, domain: &str) -> PathBuf {
        self.results_dir.join(format!("{}_results.txt", domain))
    }
}

#[async_trait]
impl ResultRepository for JsonLinesResultStore {
    async fn append(&self, domain: &str, record: &ExtractionResult) -> Result<(), StorageError> {
        let mut line = serde_json::to_string(record)?;
        line.push('\n');

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(self.result_path(domain))
            .await?;
        file.write_all(line.as_bytes()).await?;
        file.flush().await?;

        Ok(())
    }
}
