// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use async_trait::async_trait;
use pagesift::engines::traits::{EngineError, FetcherFactory, PageFetcher};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

/// 返回预置页面的抓取器工厂，统计获取与释放次数
#[derive(Default)]
pub struct MockFetcherFactory {
    pages: HashMap<String, Result<String, String>>,
    pub acquired: Arc<AtomicUsize>,
    pub released: Arc<AtomicUsize>,
    pub fetched: Arc<Mutex<Vec<String>>>,
}

impl MockFetcherFactory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_page(mut self, url: &str, html: &str) -> Self {
        self.pages.insert(url.to_string(), Ok(html.to_string()));
        self
    }

    pub fn with_failure(mut self, url: &str, reason: &str) -> Self {
        self.pages.insert(url.to_string(), Err(reason.to_string()));
        self
    }

    pub fn acquired(&self) -> usize {
        self.acquired.load(Ordering::SeqCst)
    }

    pub fn released(&self) -> usize {
        self.released.load(Ordering::SeqCst)
    }

    pub fn fetched(&self) -> Vec<String> {
        self.fetched.lock().unwrap().clone()
    }
}

#[async_trait]
impl FetcherFactory for MockFetcherFactory {
    async fn acquire(&self) -> Result<Box<dyn PageFetcher>, EngineError> {
        self.acquired.fetch_add(1, Ordering::SeqCst);
        Ok(Box::new(MockFetcher {
            pages: self.pages.clone(),
            released: self.released.clone(),
            fetched: self.fetched.clone(),
            used: false,
        }))
    }
}

pub struct MockFetcher {
    pages: HashMap<String, Result<String, String>>,
    released: Arc<AtomicUsize>,
    fetched: Arc<Mutex<Vec<String>>>,
    used: bool,
}

#[async_trait]
impl PageFetcher for MockFetcher {
    async fn fetch(&mut self, url: &str) -> Result<String, EngineError> {
        assert!(!self.used, "fetcher reused across URLs");
        self.used = true;
        self.fetched.lock().unwrap().push(url.to_string());

        match self.pages.get(url) {
            Some(Ok(html)) => Ok(html.clone()),
            Some(Err(reason)) => Err(EngineError::Navigation(reason.clone())),
            None => Err(EngineError::Navigation(format!("no page for {}", url))),
        }
    }

    async fn shutdown(self: Box<Self>) -> Result<(), EngineError> {
        self.released.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    fn name(&self) -> &'static str {
        "mock"
    }
}

/// 启动即失败的工厂
pub struct BrokenFetcherFactory;

#[async_trait]
impl FetcherFactory for BrokenFetcherFactory {
    async fn acquire(&self) -> Result<Box<dyn PageFetcher>, EngineError> {
        Err(EngineError::Launch("chrome not installed".to_string()))
    }
}
