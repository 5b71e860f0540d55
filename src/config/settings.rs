// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

/// 应用程序配置设置
///
/// 进程启动时加载一次，此后只读
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    /// 目录配置
    pub paths: PathSettings,
    /// 日志配置
    pub logging: LoggingSettings,
    /// 浏览器驱动配置
    pub driver: DriverOptions,
    /// 流水线配置
    pub pipeline: PipelineSettings,
}

/// 目录配置设置
#[derive(Debug, Clone, Deserialize)]
pub struct PathSettings {
    /// 项目根目录
    pub root: String,
}

/// 日志配置设置
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    /// 运行日志文件
    pub info_log: String,
    /// 错误日志文件
    pub error_log: String,
}

/// 浏览器驱动配置设置
#[derive(Debug, Clone, Deserialize)]
pub struct DriverOptions {
    /// 是否无头模式
    pub headless: bool,
    /// 驱动自身的请求超时时间（秒）
    pub request_timeout_secs: u64,
    /// 远程调试地址，设置后连接已有的 Chrome 而不是启动新进程
    pub remote_debugging_url: Option<String>,
    /// Chrome 可执行文件路径
    pub chrome_executable: Option<String>,
}

impl Default for DriverOptions {
    fn default() -> Self {
        Self {
            headless: true,
            request_timeout_secs: 30,
            remote_debugging_url: None,
            chrome_executable: None,
        }
    }
}

/// 流水线配置设置
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PipelineSettings {
    /// 是否重新处理失败账本中的URL
    pub retry_failed: bool,
}

impl Settings {
    /// 创建新的配置实例
    ///
    /// 依次合并默认值、`config/default`、`config/{APP_ENVIRONMENT}` 和
    /// `PAGESIFT__*` 环境变量
    ///
    /// # Returns
    ///
    /// * `Ok(Settings)` - 成功加载的配置
    /// * `Err(ConfigError)` - 配置加载失败
    pub fn new() -> Result<Self, ConfigError> {
        let env = std::env::var("APP_ENVIRONMENT").unwrap_or_else(|_| "development".to_string());
        let mut builder = Self::defaults(Config::builder())?;
        for name in config_files(&env) {
            builder = builder.add_source(File::with_name(&name).required(false));
        }

        builder
            .add_source(Environment::with_prefix("PAGESIFT").separator("__"))
            .build()?
            .try_deserialize()
    }

    /// 仅由默认值构建的配置
    pub fn from_defaults() -> Result<Self, ConfigError> {
        Self::defaults(Config::builder())?.build()?.try_deserialize()
    }

    fn defaults(
        builder: config::ConfigBuilder<config::builder::DefaultState>,
    ) -> Result<config::ConfigBuilder<config::builder::DefaultState>, ConfigError> {
        builder
            .set_default("paths.root", "./project")?
            .set_default("logging.info_log", "scraping.log")?
            .set_default("logging.error_log", "errors.log")?
            .set_default("driver.headless", true)?
            .set_default("driver.request_timeout_secs", 30)?
            .set_default("pipeline.retry_failed", false)
    }
}

/// 按优先级从低到高排列的配置文件，环境名为 `default` 时不重复加载
fn config_files(env: &str) -> Vec<String> {
    let mut files = vec!["config/default".to_string()];
    if env != "default" {
        files.push(format!("config/{}", env));
    }
    files
}
