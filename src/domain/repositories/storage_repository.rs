// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::models::extraction_result::ExtractionResult;

/// 存储错误类型
#[derive(Error, Debug)]
pub enum StorageError {
    /// IO错误
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    /// 序列化错误
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// 结果仓库特质
///
/// 按域名追加提取结果，只追加，不覆盖也不重排已有记录
#[async_trait]
pub trait ResultRepository: Send + Sync {
    /// 追加一条结果到该域名的结果日志
    async fn append(&self, domain: &str, record: &ExtractionResult) -> Result<(), StorageError>;
}
