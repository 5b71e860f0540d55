// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use std::fs::{File, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tracing::Subscriber;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, Layer};

use crate::utils::errors::StartupError;

/// 日志文件路径
#[derive(Debug, Clone)]
pub struct LogFiles {
    /// 运行日志（INFO 及以上）
    pub info_log: PathBuf,
    /// 错误日志（仅 ERROR）
    pub error_log: PathBuf,
}

/// 初始化日志系统
///
/// 控制台输出受 `RUST_LOG` 控制；运行日志与错误日志以追加方式写入文件，
/// 二者都带时间戳。
pub fn init_telemetry(files: &LogFiles) -> Result<(), StartupError> {
    let info_file = open_append(&files.info_log)?;
    let error_file = open_append(&files.error_log)?;

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer().with_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| "info".into()),
            ),
        )
        .with(channel_layer(Mutex::new(info_file), LevelFilter::INFO))
        .with(channel_layer(Mutex::new(error_file), LevelFilter::ERROR))
        .try_init()
        .map_err(|e| StartupError::Telemetry(e.to_string()))
}

/// 日志通道层：把 `level` 及以上的事件以纯文本写入 `writer`
pub fn channel_layer<S, W>(writer: W, level: LevelFilter) -> impl Layer<S>
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    tracing_subscriber::fmt::layer()
        .with_ansi(false)
        .with_writer(writer)
        .with_filter(level)
}

fn open_append(path: &Path) -> Result<File, StartupError> {
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|source| StartupError::CreateFile {
            path: path.to_path_buf(),
            source,
        })
}
