// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use scraper::Selector;
use serde::Deserialize;
use thiserror::Error;

/// 模板错误类型
#[derive(Error, Debug)]
pub enum TemplateError {
    /// IO错误
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    /// YAML 解析错误
    #[error("YAML parse error: {0}")]
    Parse(#[from] serde_yaml::Error),
    /// 字段规则无效
    #[error("Invalid rule for field '{field}': {reason}")]
    Invalid { field: String, reason: String },
}

/// 字段取值方式
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldKind {
    /// 元素全部文本
    Text,
    /// `href` 属性
    Link,
    /// `src` 属性
    Image,
    /// 指定属性
    Attribute(String),
    /// 元素外层 HTML
    Html,
}

/// 单个字段的提取规则
#[derive(Debug, Clone)]
pub struct FieldRule {
    /// CSS 选择器原文
    pub css: String,
    /// 编译后的选择器
    pub selector: Selector,
    pub kind: FieldKind,
    /// 是否返回全部匹配
    pub multiple: bool,
    /// 相对于匹配元素求值的子字段
    pub children: Vec<(String, FieldRule)>,
}

/// 提取模板
///
/// 按域名加载的声明式规则集，字段顺序与文件中一致
#[derive(Debug, Clone)]
pub struct Template {
    pub domain: String,
    pub fields: Vec<(String, FieldRule)>,
}

#[derive(Debug, Deserialize)]
struct RawRule {
    css: Option<String>,
    xpath: Option<String>,
    #[serde(rename = "type")]
    kind: Option<String>,
    attribute: Option<String>,
    #[serde(default)]
    multiple: bool,
    children: Option<serde_yaml::Mapping>,
}

impl Template {
    /// 从 YAML 文本解析模板
    ///
    /// # 参数
    ///
    /// * `domain` - 模板对应的域名
    /// * `yaml` - 模板内容
    ///
    /// # 返回值
    ///
    /// * `Ok(Template)` - 解析成功，所有选择器已编译
    /// * `Err(TemplateError)` - YAML 无效或规则无效
    pub fn from_yaml(domain: &str, yaml: &str) -> Result<Self, TemplateError> {
        if yaml.trim().is_empty() {
            return Err(TemplateError::Invalid {
                field: domain.to_string(),
                reason: "template defines no fields".to_string(),
            });
        }

        let mapping: serde_yaml::Mapping = serde_yaml::from_str(yaml)?;
        let fields = parse_fields(&mapping)?;
        if fields.is_empty() {
            return Err(TemplateError::Invalid {
                field: domain.to_string(),
                reason: "template defines no fields".to_string(),
            });
        }

        Ok(Self {
            domain: domain.to_string(),
            fields,
        })
    }
}

fn parse_fields(mapping: &serde_yaml::Mapping) -> Result<Vec<(String, FieldRule)>, TemplateError> {
    let mut fields = Vec::with_capacity(mapping.len());

    for (key, value) in mapping {
        let name = key
            .as_str()
            .ok_or_else(|| TemplateError::Invalid {
                field: format!("{:?}", key),
                reason: "field names must be strings".to_string(),
            })?
            .to_string();

        let raw: RawRule = serde_yaml::from_value(value.clone())?;
        let rule = build_rule(&name, raw)?;
        fields.push((name, rule));
    }

    Ok(fields)
}

fn build_rule(name: &str, raw: RawRule) -> Result<FieldRule, TemplateError> {
    let invalid = |reason: String| TemplateError::Invalid {
        field: name.to_string(),
        reason,
    };

    let css = match (raw.css, raw.xpath) {
        (Some(css), _) if !css.trim().is_empty() => css,
        (_, Some(_)) => return Err(invalid("xpath selectors are not supported, use css".into())),
        _ => return Err(invalid("missing css selector".into())),
    };

    let selector =
        Selector::parse(&css).map_err(|e| invalid(format!("bad css selector '{}': {}", css, e)))?;

    let kind = match raw.kind.as_deref().map(str::to_ascii_lowercase).as_deref() {
        None | Some("text") => FieldKind::Text,
        Some("link") => FieldKind::Link,
        Some("image") => FieldKind::Image,
        Some("html") => FieldKind::Html,
        Some("attribute") => match raw.attribute {
            Some(attr) if !attr.is_empty() => FieldKind::Attribute(attr),
            _ => return Err(invalid("type Attribute requires an 'attribute' key".into())),
        },
        Some(other) => return Err(invalid(format!("unknown type '{}'", other))),
    };

    let children = match raw.children {
        Some(mapping) => parse_fields(&mapping)?,
        None => Vec::new(),
    };

    Ok(FieldRule {
        css,
        selector,
        kind,
        multiple: raw.multiple,
        children,
    })
}
