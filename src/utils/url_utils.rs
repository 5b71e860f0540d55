// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use url::Url;

use crate::utils::errors::PipelineError;

/// 从URL推导域名标签
///
/// 取主机名倒数第二个标签，例如 `www.example.com` -> `example`。
/// 标签取自URL中书写的主机名（只转小写），国际化域名保持 Unicode 形式，
/// 例如 `www.bücher.de` -> `bücher`，而不是 punycode。
/// 主机名少于两个标签或URL无法解析时返回 `PipelineError::InvalidDomain`。
pub fn derive_domain(raw_url: &str) -> Result<String, PipelineError> {
    let invalid = || PipelineError::InvalidDomain(raw_url.to_string());

    let parsed = Url::parse(raw_url).map_err(|_| invalid())?;
    if parsed.host_str().is_none() {
        return Err(invalid());
    }

    let host = written_host(raw_url).ok_or_else(invalid)?;
    let labels: Vec<&str> = host.trim_end_matches('.').split('.').collect();
    if labels.len() < 2 {
        return Err(invalid());
    }

    let domain = labels[labels.len() - 2];
    if domain.is_empty() {
        return Err(invalid());
    }

    Ok(domain.to_lowercase())
}

/// URL中原样书写的主机名，去掉用户信息和端口
fn written_host(raw_url: &str) -> Option<&str> {
    let (_, rest) = raw_url.trim().split_once("://")?;
    let authority = rest.split(['/', '?', '#']).next()?;
    let host_port = authority.rsplit('@').next()?;

    let host = match host_port.rsplit_once(':') {
        Some((host, port)) if port.chars().all(|c| c.is_ascii_digit()) => host,
        _ => host_port,
    };

    if host.is_empty() || host.starts_with('[') {
        return None;
    }
    Some(host)
}

/// URL是否只包含ASCII字符（账本写入守卫）
pub fn is_ledger_safe(url: &str) -> bool {
    url.is_ascii()
}
