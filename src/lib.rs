//! rsgrok - Rust grok 表达式编译与指标字段校验

// 导出全局错误类型
pub use self::error::{GrokError, GrokResult};

// 导出配置模块
pub use self::config::{ConfigManager, CustomConfigBuilder, GrokConfig};

// 导出正则引擎接口
pub use self::engine::{CompiledRegex, FancyRegexEngine, RegexEngine, StdRegexEngine};

// 导出模式模块核心接口
pub use self::pattern::{PatternDictionary, PatternLoader};

// 导出编译模块核心接口
pub use self::compiler::{compile, expand, CompiledPattern, GrokCompiler};

// 导出指标模块核心接口
pub use self::metric::{
    verify_field_names, CompiledMetric, FieldVerifier, LabelBinding, MetricDefinition, MetricSample,
};

// 导出全局编译器接口
pub use self::global::{compile_global, global_compiler, init_grok, init_grok_with_config};

// 声明所有子模块
pub mod config;
pub mod error;
pub mod engine;
pub mod pattern;
pub mod compiler;
pub mod metric;
pub mod global;
