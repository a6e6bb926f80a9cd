//! 指标定义数据模型
//! 仅存储配置数据，支持从 YAML 反序列化

use serde::{Deserialize, Serialize};

use crate::error::GrokResult;

/// 标签绑定：grok 字段 -> 指标标签
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct LabelBinding {
    pub grok_field_name: String,
    pub prometheus_label: String,
}

impl LabelBinding {
    pub fn new(grok_field_name: impl Into<String>, prometheus_label: impl Into<String>) -> Self {
        Self {
            grok_field_name: grok_field_name.into(),
            prometheus_label: prometheus_label.into(),
        }
    }
}

/// 指标定义
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct MetricDefinition {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub help: Option<String>,
    // 用于匹配日志行的 grok 表达式
    #[serde(rename = "match", default, skip_serializing_if = "Option::is_none")]
    pub match_expression: Option<String>,
    // 提供数值的 grok 字段
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub labels: Vec<LabelBinding>,
}

/// `metrics:` 列表文档
#[derive(Debug, Deserialize)]
struct MetricsDocument {
    #[serde(default)]
    metrics: Vec<MetricDefinition>,
}

impl MetricDefinition {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn with_match(mut self, expression: impl Into<String>) -> Self {
        self.match_expression = Some(expression.into());
        self
    }

    pub fn with_value(mut self, field: impl Into<String>) -> Self {
        self.value = Some(field.into());
        self
    }

    pub fn with_label(mut self, grok_field_name: impl Into<String>, prometheus_label: impl Into<String>) -> Self {
        self.labels.push(LabelBinding::new(grok_field_name, prometheus_label));
        self
    }

    /// 解析单个指标定义
    pub fn from_yaml(source: &str) -> GrokResult<Self> {
        Ok(serde_yml::from_str(source)?)
    }

    /// 解析 `metrics:` 列表
    pub fn list_from_yaml(source: &str) -> GrokResult<Vec<Self>> {
        let document: MetricsDocument = serde_yml::from_str(source)?;
        Ok(document.metrics)
    }

    /// 引用到的 grok 字段：value 在前，随后按标签顺序，去重
    pub fn required_fields(&self) -> Vec<&str> {
        let mut fields: Vec<&str> = Vec::with_capacity(self.labels.len() + 1);
        let referenced = self
            .value
            .as_deref()
            .into_iter()
            .chain(self.labels.iter().map(|l| l.grok_field_name.as_str()));

        for field in referenced {
            if !fields.contains(&field) {
                fields.push(field);
            }
        }
        fields
    }
}
