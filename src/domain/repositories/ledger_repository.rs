// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use std::collections::HashSet;

use async_trait::async_trait;

use crate::domain::models::url_entry::{LedgerState, LedgerWrite};
use crate::domain::repositories::storage_repository::StorageError;

/// URL 账本仓库特质
///
/// 完成与失败两本账均只追加；非 ASCII URL 不写入任何一本
#[async_trait]
pub trait LedgerRepository: Send + Sync {
    /// 记录URL为已完成
    async fn mark_completed(&self, url: &str) -> Result<LedgerWrite, StorageError>;

    /// 记录URL为失败
    async fn mark_failed(&self, url: &str) -> Result<LedgerWrite, StorageError>;

    /// 读取某一本账中已有的URL，`Pending` 返回空集合
    async fn recorded(&self, state: LedgerState) -> Result<HashSet<String>, StorageError>;
}
