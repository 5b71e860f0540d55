// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use async_trait::async_trait;
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::fs;
use tokio::sync::RwLock;
use tracing::{debug, info};

use crate::domain::models::template::{Template, TemplateError};
use crate::domain::repositories::template_repository::TemplateRepository;

/// 基于目录的模板仓库
///
/// 模板文件为 `<templates_dir>/<domain>.yml`，每个域名在一次运行中只加载一次
pub struct FileTemplateRepository {
    templates_dir: PathBuf,
    cache: RwLock<HashMap<String, Arc<Template>>>,
}

impl FileTemplateRepository {
    pub fn new(templates_dir: impl Into<PathBuf>) -> Self {
        Self {
            templates_dir: templates_dir.into(),
            cache: RwLock::new(HashMap::new()),
        }
    }

    fn template_path(&self, domain: &str) -> PathBuf {
        self.templates_dir.join(format!("{}.yml", domain))
    }
}

#[async_trait]
impl TemplateRepository for FileTemplateRepository {
    async fn resolve(&self, domain: &str) -> Result<Option<Arc<Template>>, TemplateError> {
        if let Some(template) = self.cache.read().await.get(domain) {
            debug!("Template cache hit for domain: {}", domain);
            return Ok(Some(template.clone()));
        }

        let path = self.template_path(domain);
        let yaml = match fs::read_to_string(&path).await {
            Ok(yaml) => yaml,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(TemplateError::Io(e)),
        };

        let template = Arc::new(Template::from_yaml(domain, &yaml)?);
        info!("Template exists for domain: {}", domain);

        self.cache
            .write()
            .await
            .insert(domain.to_string(), template.clone());

        Ok(Some(template))
    }
}
