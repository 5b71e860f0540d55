// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use std::collections::{HashSet, VecDeque};
use std::fmt;

/// URL 账本状态
///
/// 状态只迁移一次：`Pending -> Completed` 或 `Pending -> Failed`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LedgerState {
    Pending,
    Completed,
    Failed,
}

impl fmt::Display for LedgerState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LedgerState::Pending => write!(f, "pending"),
            LedgerState::Completed => write!(f, "completed"),
            LedgerState::Failed => write!(f, "failed"),
        }
    }
}

/// 账本写入结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LedgerWrite {
    /// 已追加到账本文件
    Recorded,
    /// 非 ASCII URL，未写入任何账本文件
    SkippedNonAscii,
}

/// 本次运行中尚未完成或失败的URL集合
///
/// 保持加载顺序，同一URL只出现一次
#[derive(Debug, Clone, Default)]
pub struct PendingSet {
    order: VecDeque<String>,
    members: HashSet<String>,
}

impl PendingSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// 加入URL，已存在时返回 false
    pub fn insert(&mut self, url: impl Into<String>) -> bool {
        let url = url.into();
        if self.members.contains(&url) {
            return false;
        }
        self.members.insert(url.clone());
        self.order.push_back(url);
        true
    }

    pub fn remove(&mut self, url: &str) -> bool {
        if !self.members.remove(url) {
            return false;
        }
        if let Some(pos) = self.order.iter().position(|u| u == url) {
            self.order.remove(pos);
        }
        true
    }

    pub fn contains(&self, url: &str) -> bool {
        self.members.contains(url)
    }

    /// 当前成员的快照，用于边遍历边删除
    pub fn snapshot(&self) -> Vec<String> {
        self.order.iter().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

impl<S: Into<String>> FromIterator<S> for PendingSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut set = PendingSet::new();
        for url in iter {
            set.insert(url);
        }
        set
    }
}
