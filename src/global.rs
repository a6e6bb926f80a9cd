//! 全局编译器单例管理
use once_cell::sync::OnceCell;
use tracing::debug;

use crate::compiler::{CompiledPattern, GrokCompiler};
use crate::config::{ConfigManager, GrokConfig};
use crate::error::{GrokError, GrokResult};

/// 全局编译器实例
static GLOBAL_COMPILER: OnceCell<GrokCompiler> = OnceCell::new();

/// 初始化全局编译器（默认配置）
pub fn init_grok() -> GrokResult<()> {
    init_grok_with_config(ConfigManager::get_default())
}

/// 带自定义配置初始化全局编译器，重复初始化时保留首次结果
pub fn init_grok_with_config(config: GrokConfig) -> GrokResult<()> {
    GLOBAL_COMPILER.get_or_try_init(|| GrokCompiler::from_config(&config))?;
    debug!("全局 grok 编译器已就绪");
    Ok(())
}

/// 获取全局编译器
pub fn global_compiler() -> GrokResult<&'static GrokCompiler> {
    GLOBAL_COMPILER.get().ok_or(GrokError::NotInitialized)
}

/// 使用全局编译器编译 grok 表达式
pub fn compile_global(expression: &str) -> GrokResult<CompiledPattern> {
    global_compiler()?.compile(expression)
}
