// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use std::time::Duration;

use rand::Rng;
use thiserror::Error;
use tracing::{error, info};

/// 驱动启动参数
///
/// 每行一个命令行参数，原样传给浏览器，空行忽略
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DriverSettings {
    pub flags: Vec<String>,
}

impl DriverSettings {
    pub fn parse(text: &str) -> Self {
        let flags = text
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(str::to_string)
            .collect();
        Self { flags }
    }
}

/// 请求间隔配置错误
#[derive(Error, Debug, PartialEq, Eq)]
pub enum DelayConfigError {
    /// 行数不是两行
    #[error("expected exactly two lines (min_delay, max_delay), found {0}")]
    LineCount(usize),
    /// 不是非负整数
    #[error("'{0}' is not a non-negative integer")]
    NotAnInteger(String),
    /// 最小值大于最大值
    #[error("min_delay {min} is greater than max_delay {max}")]
    InvertedRange { min: u64, max: u64 },
}

/// 请求间隔策略
///
/// 两次请求之间等待 `[min_delay, max_delay]` 秒内均匀分布的随机时长
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DelayPolicy {
    min_delay: u64,
    max_delay: u64,
}

impl DelayPolicy {
    pub fn new(min_delay: u64, max_delay: u64) -> Result<Self, DelayConfigError> {
        if min_delay > max_delay {
            return Err(DelayConfigError::InvertedRange {
                min: min_delay,
                max: max_delay,
            });
        }
        Ok(Self {
            min_delay,
            max_delay,
        })
    }

    /// 不等待
    pub fn none() -> Self {
        Self {
            min_delay: 0,
            max_delay: 0,
        }
    }

    /// 解析间隔配置文件内容
    ///
    /// 全部为空行时视为未配置，返回 `DelayPolicy::none()`
    pub fn parse(text: &str) -> Result<Self, DelayConfigError> {
        let lines: Vec<&str> = text
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect();

        if lines.is_empty() {
            return Ok(Self::none());
        }
        if lines.len() != 2 {
            return Err(DelayConfigError::LineCount(lines.len()));
        }

        let min_delay = parse_seconds(lines[0])?;
        let max_delay = parse_seconds(lines[1])?;
        Self::new(min_delay, max_delay)
    }

    pub fn min_delay(&self) -> u64 {
        self.min_delay
    }

    pub fn max_delay(&self) -> u64 {
        self.max_delay
    }

    pub fn is_none(&self) -> bool {
        self.max_delay == 0
    }

    /// 抽取下一次等待时长
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Duration {
        if self.is_none() {
            return Duration::ZERO;
        }
        let secs = rng.random_range(self.min_delay as f64..=self.max_delay as f64);
        Duration::from_secs_f64(secs)
    }
}

impl Default for DelayPolicy {
    fn default() -> Self {
        Self::none()
    }
}

/// 读取间隔配置，配置无效时记录错误并关闭等待
pub fn load_delay_policy(text: &str) -> DelayPolicy {
    match DelayPolicy::parse(text) {
        Ok(policy) if policy.is_none() => {
            info!("No delay configured between requests");
            policy
        }
        Ok(policy) => {
            info!(
                "Delay between requests: {}-{} seconds",
                policy.min_delay(),
                policy.max_delay()
            );
            policy
        }
        Err(e) => {
            error!("Error: script_settings contains invalid values: {}", e);
            DelayPolicy::none()
        }
    }
}

fn parse_seconds(raw: &str) -> Result<u64, DelayConfigError> {
    raw.parse::<u64>()
        .map_err(|_| DelayConfigError::NotAnInteger(raw.to_string()))
}
