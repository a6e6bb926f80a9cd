//! 全局错误类型定义

use thiserror::Error;
use serde_yml::Error as SerdeYamlError;

#[derive(Error, Debug)]
pub enum GrokError {
    // 展开相关错误
    #[error("模式 {name} 未定义（位于：{context}）")]
    UndefinedPattern {
        name: String,
        context: String,
    },
    #[error("非法占位符 {token}（位于：{context}）")]
    InvalidPlaceholder {
        token: String,
        context: String,
    },
    #[error("模式存在循环引用：{}", participants.join(" -> "))]
    CyclicPattern {
        participants: Vec<String>,
    },
    #[error("模式嵌套层数超过上限 {depth}：{expression}")]
    ExpansionTooDeep {
        depth: usize,
        expression: String,
    },

    // 编译相关错误
    #[error("grok 表达式「{expression}」不是合法正则：{message}")]
    InvalidRegex {
        expression: String,
        message: String,
    },

    // 校验相关错误
    #[error("grok 模式中不存在字段：{}", aliases.join(", "))]
    MissingField {
        aliases: Vec<String>,
    },

    // 模式文件相关错误
    #[error("模式文件解析失败：{origin} 第 {line} 行：{message}")]
    PatternParse {
        origin: String,
        line: usize,
        message: String,
    },
    #[error("模式加载失败：{0}")]
    PatternLoad(String),

    // 配置相关错误
    #[error("配置无效：{0}")]
    Config(String),
    #[error("YAML解析失败：{0}")]
    Yaml(#[from] SerdeYamlError),

    // 匹配相关错误
    #[error("字段 {field} 的值 {value:?} 不是合法数字")]
    InvalidValue {
        field: String,
        value: String,
    },
    #[error("匹配失败：{0}")]
    Match(String),

    #[error("全局编译器未初始化")]
    NotInitialized,
}

// 全局Result类型
pub type GrokResult<T> = Result<T, GrokError>;
