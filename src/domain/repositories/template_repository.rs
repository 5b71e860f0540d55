// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::models::template::{Template, TemplateError};

/// 模板仓库特质
///
/// 按域名查找提取模板。模板不存在是正常结果，返回 `Ok(None)`
#[async_trait]
pub trait TemplateRepository: Send + Sync {
    async fn resolve(&self, domain: &str) -> Result<Option<Arc<Template>>, TemplateError>;
}
