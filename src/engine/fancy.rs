//! fancy-regex 引擎：支持环视、原子分组、反向引用，标准 grok 模式库依赖这些语法

use std::collections::HashMap;
use fancy_regex::Regex;

use super::{collect_named, CompiledRegex, RegexEngine};

/// 基于 fancy-regex 的引擎（默认）
#[derive(Debug, Clone, Copy, Default)]
pub struct FancyRegexEngine;

impl RegexEngine for FancyRegexEngine {
    type Regex = Regex;

    fn name(&self) -> &'static str {
        "fancy-regex"
    }

    fn compile(&self, source: &str) -> Result<Regex, String> {
        Regex::new(source).map_err(|e| e.to_string())
    }
}

impl CompiledRegex for Regex {
    fn source(&self) -> &str {
        self.as_str()
    }

    fn named_groups(&self) -> Vec<(usize, String)> {
        collect_named(self.capture_names())
    }

    fn capture_fields(&self, input: &str) -> Result<Option<HashMap<String, String>>, String> {
        let Some(captures) = self.captures(input).map_err(|e| e.to_string())? else {
            return Ok(None);
        };

        let mut fields = HashMap::new();
        for name in self.capture_names().flatten() {
            if let Some(matched) = captures.name(name) {
                fields.insert(name.to_string(), matched.as_str().to_string());
            }
        }
        Ok(Some(fields))
    }
}
