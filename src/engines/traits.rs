// Copyright 2025 Kirky.X
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use async_trait::async_trait;
use thiserror::Error;

/// 引擎错误类型
#[derive(Error, Debug)]
pub enum EngineError {
    /// 浏览器启动或连接失败
    #[error("Browser launch failed: {0}")]
    Launch(String),
    /// 页面导航失败
    #[error("Navigation failed: {0}")]
    Navigation(String),
    /// 读取页面内容失败
    #[error("Reading page content failed: {0}")]
    Content(String),
    /// 关闭浏览器失败
    #[error("Browser shutdown failed: {0}")]
    Shutdown(String),
    /// 其他错误
    #[error("Other error: {0}")]
    Other(String),
}

/// 页面抓取器特质
///
/// 每个实例只服务一个URL：抓取一次后必须调用 `shutdown`
#[async_trait]
pub trait PageFetcher: Send {
    /// 抓取渲染后的页面内容
    async fn fetch(&mut self, url: &str) -> Result<String, EngineError>;

    /// 释放底层浏览器资源
    async fn shutdown(self: Box<Self>) -> Result<(), EngineError>;

    /// 引擎名称
    fn name(&self) -> &'static str;
}

/// 抓取器工厂特质
///
/// 每次调用 `acquire` 都返回一个全新的抓取器，不做池化
#[async_trait]
pub trait FetcherFactory: Send + Sync {
    async fn acquire(&self) -> Result<Box<dyn PageFetcher>, EngineError>;
}
