//! 编译后模式模型
//! 持有引擎原生正则句柄，离开作用域时释放

use std::collections::{BTreeMap, HashMap};
use tracing::trace;

use crate::engine::CompiledRegex;
use crate::error::{GrokError, GrokResult};

/// 编译后的 grok 模式
#[derive(Debug)]
pub struct CompiledPattern<R: CompiledRegex = fancy_regex::Regex> {
    expression: String,
    regex: R,
    groups: BTreeMap<String, usize>, // 命名分组 -> 分组序号
}

impl<R: CompiledRegex> CompiledPattern<R> {
    pub(crate) fn new(expression: &str, regex: R) -> Self {
        let groups = regex
            .named_groups()
            .into_iter()
            .map(|(index, name)| (name, index))
            .collect();
        Self {
            expression: expression.to_string(),
            regex,
            groups,
        }
    }

    /// 原始 grok 表达式（展开前）
    pub fn expression(&self) -> &str {
        &self.expression
    }

    /// 展开后的正则源码
    pub fn source(&self) -> &str {
        self.regex.source()
    }

    /// 引擎原生正则句柄
    pub fn regex(&self) -> &R {
        &self.regex
    }

    /// 命名捕获分组（名称 -> 分组序号）
    pub fn capture_groups(&self) -> &BTreeMap<String, usize> {
        &self.groups
    }

    /// 按名称排序的命名分组
    pub fn group_names(&self) -> impl Iterator<Item = &str> {
        self.groups.keys().map(String::as_str)
    }

    pub fn has_group(&self, name: &str) -> bool {
        self.groups.contains_key(name)
    }

    pub fn group_index(&self, name: &str) -> Option<usize> {
        self.groups.get(name).copied()
    }

    /// 匹配单行输入，返回各命名分组捕获的文本
    pub fn captures(&self, input: &str) -> GrokResult<Option<HashMap<String, String>>> {
        self.regex.capture_fields(input).map_err(GrokError::Match)
    }

    pub fn is_match(&self, input: &str) -> GrokResult<bool> {
        Ok(self.captures(input)?.is_some())
    }

    /// 显式释放（等价于离开作用域）
    pub fn free(self) {
        drop(self);
    }
}

impl<R: CompiledRegex> Drop for CompiledPattern<R> {
    fn drop(&mut self) {
        trace!("释放已编译模式：{}", self.expression);
    }
}
