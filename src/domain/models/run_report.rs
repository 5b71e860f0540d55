// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::models::url_entry::{LedgerState, LedgerWrite};

/// 单次运行的汇总
#[derive(Debug, Clone)]
pub struct RunReport {
    /// 运行标识
    pub run_id: Uuid,
    pub started_at: DateTime<Utc>,
    pub finished_at: Option<DateTime<Utc>>,
    /// 本次运行开始时的待处理URL数
    pub total: usize,
    pub completed: usize,
    pub failed: usize,
    /// 未写入任何账本的URL数（非 ASCII 或写入失败）
    pub unledgered: usize,
}

impl RunReport {
    pub fn new(run_id: Uuid, total: usize) -> Self {
        Self {
            run_id,
            started_at: Utc::now(),
            finished_at: None,
            total,
            completed: 0,
            failed: 0,
            unledgered: 0,
        }
    }

    /// 记录一个URL的最终状态
    pub fn record(&mut self, state: LedgerState, write: Option<LedgerWrite>) {
        match state {
            LedgerState::Completed => self.completed += 1,
            LedgerState::Failed => self.failed += 1,
            LedgerState::Pending => {}
        }
        if write != Some(LedgerWrite::Recorded) {
            self.unledgered += 1;
        }
    }

    pub fn finish(&mut self) {
        self.finished_at = Some(Utc::now());
    }

    pub fn processed(&self) -> usize {
        self.completed + self.failed
    }
}
