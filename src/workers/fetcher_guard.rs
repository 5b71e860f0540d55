// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use tracing::{debug, warn};

use crate::engines::traits::{EngineError, PageFetcher};

/// 抓取器作用域守卫
///
/// 优先调用 `release` 显式关闭；若守卫在未释放时被丢弃（例如任务被取消），
/// 由 Drop 在当前运行时上派生后台任务完成关闭。
pub struct FetcherGuard {
    fetcher: Option<Box<dyn PageFetcher>>,
    url: String,
}

impl FetcherGuard {
    pub fn new(fetcher: Box<dyn PageFetcher>, url: impl Into<String>) -> Self {
        Self {
            fetcher: Some(fetcher),
            url: url.into(),
        }
    }

    /// 抓取守卫对应的URL
    pub async fn fetch(&mut self) -> Result<String, EngineError> {
        match self.fetcher.as_mut() {
            Some(fetcher) => fetcher.fetch(&self.url).await,
            None => Err(EngineError::Other("fetcher already released".to_string())),
        }
    }

    /// 关闭抓取器，关闭失败只记录日志
    pub async fn release(mut self) {
        if let Some(fetcher) = self.fetcher.take() {
            let name = fetcher.name();
            match fetcher.shutdown().await {
                Ok(()) => debug!("Released {} fetcher for {}", name, self.url),
                Err(e) => warn!("Failed to shut down {} fetcher for {}: {}", name, self.url, e),
            }
        }
    }
}

impl Drop for FetcherGuard {
    fn drop(&mut self) {
        if let Some(fetcher) = self.fetcher.take() {
            let url = std::mem::take(&mut self.url);
            match tokio::runtime::Handle::try_current() {
                Ok(handle) => {
                    handle.spawn(async move {
                        if let Err(e) = fetcher.shutdown().await {
                            warn!("Background shutdown failed for {}: {}", url, e);
                        }
                    });
                }
                Err(_) => warn!("No runtime to shut down fetcher for {}", url),
            }
        }
    }
}
