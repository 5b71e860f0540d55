// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use std::path::PathBuf;

use thiserror::Error;

use crate::domain::models::template::TemplateError;
use crate::domain::repositories::storage_repository::StorageError;
use crate::domain::services::extraction_service::ExtractionError;
use crate::engines::traits::EngineError;

/// 单个URL处理错误类型
///
/// 所有变体都只影响当前URL，由编排器转换为 `failed` 账本状态。
#[derive(Error, Debug)]
pub enum PipelineError {
    /// 无法从URL推导域名
    #[error("Cannot derive domain from URL: {0}")]
    InvalidDomain(String),

    /// 域名没有对应模板
    #[error("No template for domain '{domain}', skipping URL: {url}")]
    TemplateMissing { domain: String, url: String },

    /// 模板存在但无法加载
    #[error("Template error: {0}")]
    Template(#[from] TemplateError),

    /// 页面抓取失败
    #[error("Fetch failed: {0}")]
    Fetch(#[from] EngineError),

    /// 提取失败
    #[error("Extraction failed: {0}")]
    Extraction(#[from] ExtractionError),

    /// 提取结果为空
    #[error("Extraction produced an empty record")]
    EmptyResult,

    /// 结果持久化失败
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}

impl PipelineError {
    /// 错误类别标签，用于日志和指标
    pub fn kind(&self) -> &'static str {
        match self {
            PipelineError::InvalidDomain(_) => "invalid_domain",
            PipelineError::TemplateMissing { .. } => "template_missing",
            PipelineError::Template(_) => "template_invalid",
            PipelineError::Fetch(_) => "fetch",
            PipelineError::Extraction(_) => "extraction",
            PipelineError::EmptyResult => "empty_result",
            PipelineError::Storage(_) => "storage",
        }
    }
}

/// 启动错误类型
///
/// 在处理任何URL之前发生，终止本次运行。
#[derive(Error, Debug)]
pub enum StartupError {
    #[error("Failed to create directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to create file {path}: {source}")]
    CreateFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to read file {path}: {source}")]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("Failed to initialize logging: {0}")]
    Telemetry(String),
}
