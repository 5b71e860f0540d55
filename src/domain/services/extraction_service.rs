// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use scraper::{ElementRef, Html, Selector};
use serde_json::{Map, Value};
use thiserror::Error;

use crate::domain::models::extraction_result::ExtractionResult;
use crate::domain::models::template::{FieldKind, FieldRule, Template};

/// 提取错误类型
#[derive(Error, Debug)]
pub enum ExtractionError {
    /// 页面内容为空
    #[error("Page content is empty")]
    EmptyContent,
}

/// 提取器特质
///
/// 对相同的模板和页面内容结果确定
pub trait Extractor: Send + Sync {
    fn extract(
        &self,
        template: &Template,
        html: &str,
    ) -> Result<ExtractionResult, ExtractionError>;
}

/// 基于 CSS 选择器的模板提取器
#[derive(Debug, Clone, Copy, Default)]
pub struct TemplateExtractor;

impl Extractor for TemplateExtractor {
    fn extract(
        &self,
        template: &Template,
        html: &str,
    ) -> Result<ExtractionResult, ExtractionError> {
        if html.trim().is_empty() {
            return Err(ExtractionError::EmptyContent);
        }

        let document = Html::parse_document(html);
        let fields = extract_fields(Scope::Document(&document), &template.fields);
        Ok(ExtractionResult::new(fields))
    }
}

#[derive(Clone, Copy)]
enum Scope<'a> {
    Document(&'a Html),
    Element(ElementRef<'a>),
}

impl<'a> Scope<'a> {
    fn select(self, selector: &Selector) -> Vec<ElementRef<'a>> {
        match self {
            Scope::Document(document) => document.select(selector).collect(),
            Scope::Element(element) => element.select(selector).collect(),
        }
    }
}

fn extract_fields(scope: Scope<'_>, fields: &[(String, FieldRule)]) -> Map<String, Value> {
    let mut result = Map::with_capacity(fields.len());

    for (name, rule) in fields {
        let matches = scope.select(&rule.selector);

        let value = if rule.multiple {
            Value::Array(
                matches
                    .into_iter()
                    .map(|element| element_value(element, rule))
                    .filter(|v| !v.is_null())
                    .collect(),
            )
        } else {
            matches
                .into_iter()
                .next()
                .map(|element| element_value(element, rule))
                .unwrap_or(Value::Null)
        };

        result.insert(name.clone(), value);
    }

    result
}

fn element_value(element: ElementRef<'_>, rule: &FieldRule) -> Value {
    if !rule.children.is_empty() {
        return Value::Object(extract_fields(Scope::Element(element), &rule.children));
    }

    let attr = |name: &str| {
        element
            .value()
            .attr(name)
            .map(|v| Value::String(v.trim().to_string()))
            .unwrap_or(Value::Null)
    };

    match &rule.kind {
        FieldKind::Text => {
            let text = element.text().collect::<Vec<_>>().join(" ");
            Value::String(text.split_whitespace().collect::<Vec<_>>().join(" "))
        }
        FieldKind::Link => attr("href"),
        FieldKind::Image => attr("src"),
        FieldKind::Attribute(name) => attr(name),
        FieldKind::Html => Value::String(element.html()),
    }
}
