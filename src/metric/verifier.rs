//! 字段校验工具
//! 确认指标定义引用的每个 grok 字段都是已编译模式中的命名分组

use tracing::debug;

use super::definition::MetricDefinition;
use crate::compiler::CompiledPattern;
use crate::engine::CompiledRegex;
use crate::error::{GrokError, GrokResult};

/// 字段校验器
pub struct FieldVerifier;

impl FieldVerifier {
    /// 校验指标定义与模式的命名分组是否一致
    ///
    /// 未被引用的命名分组不视为错误；既无 value 也无标签的定义直接通过。
    /// 缺失字段全部列出，按首次引用顺序。
    pub fn verify<R: CompiledRegex>(
        metric: &MetricDefinition,
        pattern: &CompiledPattern<R>,
    ) -> GrokResult<()> {
        let missing: Vec<String> = metric
            .required_fields()
            .into_iter()
            .filter(|field| !pattern.has_group(field))
            .map(str::to_string)
            .collect();

        if missing.is_empty() {
            return Ok(());
        }

        debug!(
            "指标 {} 引用的字段 {:?} 不在模式 {} 的命名分组中",
            metric.name,
            missing,
            pattern.expression()
        );
        Err(GrokError::MissingField { aliases: missing })
    }
}

/// 校验指标定义引用的字段名
pub fn verify_field_names<R: CompiledRegex>(
    metric: &MetricDefinition,
    pattern: &CompiledPattern<R>,
) -> GrokResult<()> {
    FieldVerifier::verify(metric, pattern)
}
