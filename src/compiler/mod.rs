//! 编译模块：将 grok 表达式展开并编译为可执行的正则模式
pub mod pattern;
pub mod compiler;

pub use self::pattern::CompiledPattern;
pub use self::compiler::{compile, expand, GrokCompiler};
