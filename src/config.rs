//! 全局配置管理,存储所有可配置项

use std::path::PathBuf;

/// 默认最大嵌套展开层数
pub const DEFAULT_MAX_EXPANSION_DEPTH: usize = 64;

/// 全局配置
#[derive(Debug, Clone)]
pub struct GrokConfig {
    // 自定义模式文件目录（None 表示不加载）
    pub patterns_dir: Option<PathBuf>,
    // 是否加载内置模式库
    pub embedded_patterns: bool,
    // 占位符最大嵌套展开层数
    pub max_expansion_depth: usize,
    // 是否启用详细日志
    pub verbose: bool,
}

impl Default for GrokConfig {
    fn default() -> Self {
        Self {
            patterns_dir: None,
            embedded_patterns: true,
            max_expansion_depth: DEFAULT_MAX_EXPANSION_DEPTH,
            verbose: false,
        }
    }
}

/// 配置管理器
pub struct ConfigManager;

impl ConfigManager {
    /// 获取默认配置
    pub fn get_default() -> GrokConfig {
        GrokConfig::default()
    }

    /// 自定义配置
    pub fn custom() -> CustomConfigBuilder {
        CustomConfigBuilder::new()
    }
}

/// 配置构建器（便于自定义配置）
#[derive(Debug, Clone, Default)]
pub struct CustomConfigBuilder {
    config: GrokConfig,
}

impl CustomConfigBuilder {
    pub fn new() -> Self {
        Self {
            config: GrokConfig::default(),
        }
    }

    pub fn patterns_dir(mut self, path: PathBuf) -> Self {
        self.config.patterns_dir = Some(path);
        self
    }

    pub fn embedded_patterns(mut self, enabled: bool) -> Self {
        self.config.embedded_patterns = enabled;
        self
    }

    pub fn max_expansion_depth(mut self, depth: usize) -> Self {
        self.config.max_expansion_depth = depth;
        self
    }

    pub fn verbose(mut self, verbose: bool) -> Self {
        self.config.verbose = verbose;
        self
    }

    pub fn build(self) -> GrokConfig {
        self.config
    }
}
