//! 模式加载管理器
//! 负责从内置模式库、模式文件或模式目录构建模式字典

use std::fs;
use std::path::Path;
use tracing::{debug, warn};
use walkdir::{DirEntry, WalkDir};

use super::dictionary::PatternDictionary;
use crate::config::GrokConfig;
use crate::error::{GrokError, GrokResult};

/// 内置模式库
const EMBEDDED_PATTERNS: &str = include_str!("../../patterns/grok-patterns");

/// 模式加载管理器
pub struct PatternLoader;

impl PatternLoader {
    /// 按配置加载模式字典（内置模式库在前，目录中的同名模式覆盖内置定义）
    pub fn load(config: &GrokConfig) -> GrokResult<PatternDictionary> {
        let mut dictionary = PatternDictionary::new();

        if config.embedded_patterns {
            dictionary.merge(Self::load_embedded()?);
        }

        if let Some(dir) = config.patterns_dir.as_deref() {
            let overridden = dictionary.merge(Self::load_dir(dir)?);
            if !overridden.is_empty() {
                debug!("模式目录覆盖了内置模式：{}", overridden.join(", "));
            }
        }

        if dictionary.is_empty() {
            return Err(GrokError::PatternLoad(
                "未配置任何模式来源（内置模式库已禁用且未指定模式目录）".to_string(),
            ));
        }

        debug!("模式字典加载完成，模式总数：{}", dictionary.len());
        Ok(dictionary)
    }

    /// 加载内置模式库
    pub fn load_embedded() -> GrokResult<PatternDictionary> {
        Self::parse_str(EMBEDDED_PATTERNS, "<embedded>")
    }

    /// 加载单个模式文件
    pub fn load_file(path: &Path) -> GrokResult<PatternDictionary> {
        let content = fs::read_to_string(path).map_err(|e| {
            GrokError::PatternLoad(format!("读取模式文件失败：{} - {}", path.display(), e))
        })?;
        Self::parse_str(&content, &path.display().to_string())
    }

    /// 加载目录下所有模式文件（递归，按文件名排序，跳过隐藏文件）
    pub fn load_dir(dir: &Path) -> GrokResult<PatternDictionary> {
        if !dir.is_dir() {
            return Err(GrokError::PatternLoad(format!(
                "模式目录不存在或不是目录：{}",
                dir.display()
            )));
        }

        let mut dictionary = PatternDictionary::new();
        let mut file_count = 0;

        let walker = WalkDir::new(dir)
            .min_depth(1)
            .follow_links(true)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|entry| !is_hidden(entry));

        for entry in walker {
            let entry = entry.map_err(|e| {
                GrokError::PatternLoad(format!("遍历模式目录失败：{} - {}", dir.display(), e))
            })?;
            if !entry.file_type().is_file() {
                continue;
            }

            let replaced = dictionary.merge(Self::load_file(entry.path())?);
            for name in replaced {
                warn!("模式 {} 被重复定义，采用 {} 中的定义", name, entry.path().display());
            }
            file_count += 1;
        }

        debug!("从目录 {} 加载模式文件{}个，模式{}条", dir.display(), file_count, dictionary.len());
        Ok(dictionary)
    }

    /// 解析模式文本：每行 `NAME DEFINITION`，空行与 `#` 注释行忽略
    pub fn parse_str(source: &str, origin: &str) -> GrokResult<PatternDictionary> {
        let mut dictionary = PatternDictionary::new();

        for (index, raw_line) in source.lines().enumerate() {
            let line = raw_line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let parse_error = |message: String| GrokError::PatternParse {
                origin: origin.to_string(),
                line: index + 1,
                message,
            };

            let (name, definition) = line
                .split_once(char::is_whitespace)
                .map(|(name, rest)| (name, rest.trim_start()))
                .filter(|(_, definition)| !definition.is_empty())
                .ok_or_else(|| parse_error(format!("模式 {} 缺少定义", line)))?;

            if !is_valid_name(name) {
                return Err(parse_error(format!("非法模式名称：{}", name)));
            }

            if dictionary.insert(name.to_string(), definition.to_string()).is_some() {
                warn!("{} 第 {} 行：模式 {} 被重复定义，采用后者", origin, index + 1, name);
            }
        }

        Ok(dictionary)
    }
}

/// 模式名称仅允许字母、数字、下划线
fn is_valid_name(name: &str) -> bool {
    !name.is_empty() && name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
}

// 根目录本身不参与判断（临时目录常以 . 开头）
fn is_hidden(entry: &DirEntry) -> bool {
    entry.depth() > 0
        && entry
            .file_name()
            .to_str()
            .is_some_and(|s| s.starts_with('.'))
}
