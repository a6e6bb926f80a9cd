//! 指标字段提取
//! 将已校验的指标定义应用到日志行，提取数值与标签

use std::fmt;

use super::definition::MetricDefinition;
use super::verifier::FieldVerifier;
use crate::compiler::{CompiledPattern, GrokCompiler};
use crate::engine::{CompiledRegex, RegexEngine};
use crate::error::{GrokError, GrokResult};

/// 单行日志提取结果
#[derive(Debug, Clone, PartialEq)]
pub struct MetricSample {
    pub value: Option<f64>,
    pub labels: Vec<(String, String)>, // 指标标签 -> 值，按定义顺序
}

impl MetricSample {
    pub fn label(&self, prometheus_label: &str) -> Option<&str> {
        self.labels
            .iter()
            .find(|(name, _)| name == prometheus_label)
            .map(|(_, value)| value.as_str())
    }
}

impl fmt::Display for MetricSample {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let labels: Vec<String> = self
            .labels
            .iter()
            .map(|(k, v)| format!("{}={:?}", k, v))
            .collect();
        write!(f, "{{{}}}", labels.join(","))?;
        if let Some(value) = self.value {
            write!(f, " {}", value)?;
        }
        Ok(())
    }
}

/// 已编译并通过字段校验的指标
#[derive(Debug)]
pub struct CompiledMetric<R: CompiledRegex = fancy_regex::Regex> {
    definition: MetricDefinition,
    pattern: CompiledPattern<R>,
}

impl<R: CompiledRegex> CompiledMetric<R> {
    /// 编译指标的 match 表达式并校验字段
    pub fn new<E>(definition: MetricDefinition, compiler: &GrokCompiler<E>) -> GrokResult<Self>
    where
        E: RegexEngine<Regex = R>,
    {
        let expression = definition.match_expression.as_deref().ok_or_else(|| {
            GrokError::Config(format!("指标 {} 缺少 match 表达式", definition.name))
        })?;
        let pattern = compiler.compile(expression)?;
        Self::from_parts(definition, pattern)
    }

    /// 使用已编译的模式构建，校验失败时模式随之释放
    pub fn from_parts(definition: MetricDefinition, pattern: CompiledPattern<R>) -> GrokResult<Self> {
        FieldVerifier::verify(&definition, &pattern)?;
        Ok(Self { definition, pattern })
    }

    pub fn definition(&self) -> &MetricDefinition {
        &self.definition
    }

    pub fn pattern(&self) -> &CompiledPattern<R> {
        &self.pattern
    }

    /// 处理单行日志；不匹配返回 None
    pub fn process_line(&self, line: &str) -> GrokResult<Option<MetricSample>> {
        let Some(fields) = self.pattern.captures(line)? else {
            return Ok(None);
        };

        let value = match self.definition.value.as_deref() {
            Some(field) => {
                let raw = fields.get(field).map(String::as_str).unwrap_or_default();
                let parsed = raw.trim().parse::<f64>().map_err(|_| GrokError::InvalidValue {
                    field: field.to_string(),
                    value: raw.to_string(),
                })?;
                Some(parsed)
            }
            None => None,
        };

        // 可选分组未参与匹配时标签值为空
        let labels = self
            .definition
            .labels
            .iter()
            .map(|binding| {
                let value = fields
                    .get(&binding.grok_field_name)
                    .cloned()
                    .unwrap_or_default();
                (binding.prometheus_label.clone(), value)
            })
            .collect();

        Ok(Some(MetricSample { value, labels }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use crate::pattern::PatternDictionary;

    fn compiler() -> GrokCompiler {
        GrokCompiler::new(Arc::new(PatternDictionary::from_pairs([
            ("WORD", r"\w+"),
            ("NUM", r"[0-9.]+"),
        ])))
    }

    fn metric() -> MetricDefinition {
        MetricDefinition::new("latency")
            .with_match("%{WORD:user} took %{NUM:ms}ms(?: on %{WORD:host})?")
            .with_value("ms")
            .with_label("user", "user")
            .with_label("host", "instance")
    }

    #[test]
    fn test_process_matching_line() {
        let compiled = CompiledMetric::new(metric(), &compiler()).unwrap();
        let sample = compiled.process_line("alice took 12.5ms on web1").unwrap().unwrap();

        assert_eq!(sample.value, Some(12.5));
        assert_eq!(sample.label("user"), Some("alice"));
        assert_eq!(sample.label("instance"), Some("web1"));
        assert_eq!(sample.to_string(), r#"{user="alice",instance="web1"} 12.5"#);
    }

    #[test]
    fn test_optional_group_yields_empty_label() {
        let compiled = CompiledMetric::new(metric(), &compiler()).unwrap();
        let sample = compiled.process_line("bob took 3ms").unwrap().unwrap();
        assert_eq!(sample.label("instance"), Some(""));
    }

    #[test]
    fn test_non_matching_line() {
        let compiled = CompiledMetric::new(metric(), &compiler()).unwrap();
        assert!(compiled.process_line("nothing here").unwrap().is_none());
    }

    #[test]
    fn test_unparsable_value() {
        let compiled = CompiledMetric::new(metric(), &compiler()).unwrap();
        let err = compiled.process_line("carol took 1.2.3ms").unwrap_err();
        assert!(matches!(err, GrokError::InvalidValue { ref field, .. } if field == "ms"));
    }

    #[test]
    fn test_counter_without_value() {
        let definition = MetricDefinition::new("events")
            .with_match("%{WORD:user} logged in")
            .with_label("user", "user");
        let compiled = CompiledMetric::new(definition, &compiler()).unwrap();
        let sample = compiled.process_line("dave logged in").unwrap().unwrap();
        assert_eq!(sample.value, None);
        assert_eq!(sample.to_string(), r#"{user="dave"}"#);
    }

    #[test]
    fn test_missing_match_is_config_error() {
        let definition = MetricDefinition::new("no_match");
        assert!(matches!(
            CompiledMetric::new(definition, &compiler()),
            Err(GrokError::Config(_))
        ));
    }

    #[test]
    fn test_unknown_field_fails_verification() {
        let definition = metric().with_label("region", "region");
        assert!(matches!(
            CompiledMetric::new(definition, &compiler()),
            Err(GrokError::MissingField { .. })
        ));
    }
}
