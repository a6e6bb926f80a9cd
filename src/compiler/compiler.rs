//! grok 编译器核心
//! 递归展开 %{NAME} / %{NAME:alias} 占位符，再交给正则引擎编译

use std::sync::Arc;
use std::time::Instant;
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

use super::pattern::CompiledPattern;
use crate::config::{GrokConfig, DEFAULT_MAX_EXPANSION_DEPTH};
use crate::engine::{FancyRegexEngine, RegexEngine};
use crate::error::{GrokError, GrokResult};
use crate::pattern::{PatternDictionary, PatternLoader};

/// 占位符：%{...}，内容由 parse_placeholder 校验
static PLACEHOLDER_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"%\{([^}]*)\}").unwrap());

/// grok 编译器
#[derive(Debug, Clone)]
pub struct GrokCompiler<E: RegexEngine = FancyRegexEngine> {
    dictionary: Arc<PatternDictionary>,
    engine: E,
    max_depth: usize,
}

impl GrokCompiler<FancyRegexEngine> {
    /// 使用默认引擎创建编译器
    pub fn new(dictionary: Arc<PatternDictionary>) -> Self {
        Self::with_engine(dictionary, FancyRegexEngine)
    }

    /// 按配置加载模式字典并创建编译器
    pub fn from_config(config: &GrokConfig) -> GrokResult<Self> {
        let dictionary = PatternLoader::load(config)?;
        Ok(Self::new(Arc::new(dictionary)).max_expansion_depth(config.max_expansion_depth))
    }
}

impl<E: RegexEngine> GrokCompiler<E> {
    pub fn with_engine(dictionary: Arc<PatternDictionary>, engine: E) -> Self {
        Self {
            dictionary,
            engine,
            max_depth: DEFAULT_MAX_EXPANSION_DEPTH,
        }
    }

    pub fn max_expansion_depth(mut self, depth: usize) -> Self {
        self.max_depth = depth;
        self
    }

    pub fn dictionary(&self) -> &Arc<PatternDictionary> {
        &self.dictionary
    }

    /// 仅展开占位符，不编译
    pub fn expand(&self, expression: &str) -> GrokResult<String> {
        Expander::new(&self.dictionary, self.max_depth).expand(expression)
    }

    /// 编译 grok 表达式
    pub fn compile(&self, expression: &str) -> GrokResult<CompiledPattern<E::Regex>> {
        compile_with(expression, &self.dictionary, &self.engine, self.max_depth)
    }
}

/// 编译 grok 表达式（一次性调用）
pub fn compile<E: RegexEngine>(
    expression: &str,
    dictionary: &PatternDictionary,
    engine: &E,
) -> GrokResult<CompiledPattern<E::Regex>> {
    compile_with(expression, dictionary, engine, DEFAULT_MAX_EXPANSION_DEPTH)
}

/// 展开 grok 表达式（默认嵌套上限）
pub fn expand(expression: &str, dictionary: &PatternDictionary) -> GrokResult<String> {
    Expander::new(dictionary, DEFAULT_MAX_EXPANSION_DEPTH).expand(expression)
}

/// 展开 -> 引擎编译 -> 收集命名分组
fn compile_with<E: RegexEngine>(
    expression: &str,
    dictionary: &PatternDictionary,
    engine: &E,
    max_depth: usize,
) -> GrokResult<CompiledPattern<E::Regex>> {
    let start = Instant::now();
    let source = Expander::new(dictionary, max_depth).expand(expression)?;

    let regex = engine
        .compile(&source)
        .map_err(|message| GrokError::InvalidRegex {
            expression: expression.to_string(),
            message,
        })?;
    let pattern = CompiledPattern::new(expression, regex);

    debug!(
        "grok 编译完成 [{}]：{} -> {}，命名分组{}个，耗时{:?}",
        engine.name(),
        expression,
        pattern.source(),
        pattern.capture_groups().len(),
        start.elapsed()
    );
    Ok(pattern)
}

/// 拆分占位符内容：NAME 或 NAME:alias
fn parse_placeholder(body: &str) -> Option<(&str, Option<&str>)> {
    let (name, alias) = match body.split_once(':') {
        Some((name, alias)) => (name, Some(alias)),
        None => (body, None),
    };
    let name_ok = !name.is_empty() && name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_');
    if !name_ok || !alias.is_none_or(is_valid_alias) {
        return None;
    }
    Some((name, alias))
}

/// 分组名：字母或下划线开头，其后字母、数字、下划线
fn is_valid_alias(alias: &str) -> bool {
    let mut chars = alias.chars();
    chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// 递归展开器，stack 记录正在展开的模式名
struct Expander<'a> {
    dictionary: &'a PatternDictionary,
    max_depth: usize,
    stack: Vec<&'a str>,
}

impl<'a> Expander<'a> {
    fn new(dictionary: &'a PatternDictionary, max_depth: usize) -> Self {
        Self {
            dictionary,
            max_depth,
            stack: Vec::new(),
        }
    }

    fn expand(&mut self, text: &str) -> GrokResult<String> {
        let mut result = String::with_capacity(text.len());
        let mut last_end = 0;

        for caps in PLACEHOLDER_REGEX.captures_iter(text) {
            let Some(token) = caps.get(0) else {
                continue;
            };
            result.push_str(&text[last_end..token.start()]);
            last_end = token.end();

            let (name, alias) = parse_placeholder(&caps[1]).ok_or_else(|| {
                GrokError::InvalidPlaceholder {
                    token: token.as_str().to_string(),
                    context: self.context(text, token.as_str()),
                }
            })?;

            let dictionary = self.dictionary;
            let (name, definition) = dictionary
                .lookup_entry(name)
                .ok_or_else(|| GrokError::UndefinedPattern {
                    name: name.to_string(),
                    context: self.context(text, token.as_str()),
                })?;

            if let Some(pos) = self.stack.iter().position(|n| *n == name) {
                let mut participants: Vec<String> =
                    self.stack[pos..].iter().map(|n| n.to_string()).collect();
                participants.push(name.to_string());
                return Err(GrokError::CyclicPattern { participants });
            }

            if self.stack.len() >= self.max_depth {
                return Err(GrokError::ExpansionTooDeep {
                    depth: self.max_depth,
                    expression: self.context(text, token.as_str()),
                });
            }

            self.stack.push(name);
            let expanded = self.expand(definition)?;
            self.stack.pop();

            match alias {
                Some(alias) => result.push_str(&format!("(?P<{}>{})", alias, expanded)),
                None => result.push_str(&format!("(?:{})", expanded)),
            }
        }

        result.push_str(&text[last_end..]);
        Ok(result)
    }

    /// 错误定位信息：出错的占位符及其所在的表达式或模式定义
    fn context(&self, text: &str, token: &str) -> String {
        match self.stack.last() {
            Some(parent) => format!("模式 {} 的定义「{}」中的 {}", parent, text, token),
            None => format!("表达式「{}」中的 {}", text, token),
        }
    }
}
