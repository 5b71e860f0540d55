// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use async_trait::async_trait;
use chromiumoxide::{Browser, BrowserConfig};
use futures::StreamExt;
use std::time::Duration;
use tokio::task::JoinHandle;

use crate::config::script_settings::DriverSettings;
use crate::config::settings::DriverOptions;
use crate::engines::traits::{EngineError, FetcherFactory, PageFetcher};

/// 内置启动参数，用户参数追加在其后
const DEFAULT_ARGS: &[&str] = &[
    "--window-size=800,600",
    "--no-first-run",
    "--no-default-browser-check",
    "--disable-extensions",
    "--disable-notifications",
    "--disable-dev-shm-usage",
];

/// Chromium 抓取器工厂
///
/// 每个URL启动（或连接）一个新的浏览器
pub struct ChromiumFetcherFactory {
    settings: DriverSettings,
    options: DriverOptions,
}

impl ChromiumFetcherFactory {
    pub fn new(settings: DriverSettings, options: DriverOptions) -> Self {
        Self { settings, options }
    }

    /// 合并内置参数与用户参数
    pub fn launch_args(&self) -> Vec<String> {
        DEFAULT_ARGS
            .iter()
            .map(|arg| arg.to_string())
            .chain(self.settings.flags.iter().cloned())
            .collect()
    }

    fn browser_config(&self) -> Result<BrowserConfig, EngineError> {
        let mut builder = BrowserConfig::builder()
            .no_sandbox()
            .request_timeout(Duration::from_secs(self.options.request_timeout_secs))
            .args(self.launch_args());

        if !self.options.headless {
            builder = builder.with_head();
        }
        if let Some(path) = &self.options.chrome_executable {
            builder = builder.chrome_executable(path);
        }

        builder.build().map_err(EngineError::Launch)
    }
}

#[async_trait]
impl FetcherFactory for ChromiumFetcherFactory {
    async fn acquire(&self) -> Result<Box<dyn PageFetcher>, EngineError> {
        let (browser, mut handler, remote) = match &self.options.remote_debugging_url {
            Some(url) => {
                tracing::debug!("Connecting to remote Chrome instance at: {}", url);
                let (browser, handler) = Browser::connect(url.as_str()).await.map_err(|e| {
                    EngineError::Launch(format!("Failed to connect to remote Chrome: {}", e))
                })?;
                (browser, handler, true)
            }
            None => {
                let (browser, handler) = Browser::launch(self.browser_config()?)
                    .await
                    .map_err(|e| EngineError::Launch(e.to_string()))?;
                (browser, handler, false)
            }
        };

        // Spawn a handler to process browser events
        let handler_task = tokio::spawn(async move {
            while let Some(h) = handler.next().await {
                if h.is_err() {
                    break;
                }
            }
        });

        Ok(Box::new(ChromiumFetcher {
            browser,
            handler_task,
            remote,
        }))
    }
}

/// 单次使用的 Chromium 抓取器
pub struct ChromiumFetcher {
    browser: Browser,
    handler_task: JoinHandle<()>,
    remote: bool,
}

#[async_trait]
impl PageFetcher for ChromiumFetcher {
    async fn fetch(&mut self, url: &str) -> Result<String, EngineError> {
        let page = self
            .browser
            .new_page("about:blank")
            .await
            .map_err(|e| EngineError::Other(e.to_string()))?;

        let content = async {
            page.goto(url)
                .await
                .map_err(|e| EngineError::Navigation(e.to_string()))?;
            page.wait_for_navigation()
                .await
                .map_err(|e| EngineError::Navigation(e.to_string()))?;
            page.content()
                .await
                .map_err(|e| EngineError::Content(e.to_string()))
        }
        .await;

        if let Err(e) = page.close().await {
            tracing::debug!("Failed to close page for {}: {}", url, e);
        }

        content
    }

    async fn shutdown(mut self: Box<Self>) -> Result<(), EngineError> {
        let result = if self.remote {
            // 远程浏览器不归本进程所有，只断开连接
            Ok(())
        } else {
            match self.browser.close().await {
                Ok(_) => self
                    .browser
                    .wait()
                    .await
                    .map(|_| ())
                    .map_err(|e| EngineError::Shutdown(e.to_string())),
                Err(e) => Err(EngineError::Shutdown(e.to_string())),
            }
        };

        self.handler_task.abort();
        result
    }

    fn name(&self) -> &'static str {
        "chromium"
    }
}
