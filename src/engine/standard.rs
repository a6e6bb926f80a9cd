//! regex 引擎：线性时间匹配，不支持原子分组与反向引用

use std::collections::HashMap;
use regex::Regex;

use super::{collect_named, CompiledRegex, RegexEngine};

/// 基于 regex crate 的引擎
#[derive(Debug, Clone, Copy, Default)]
pub struct StdRegexEngine;

impl RegexEngine for StdRegexEngine {
    type Regex = Regex;

    fn name(&self) -> &'static str {
        "regex"
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
        let Some(captures) = self.captures(input) else {
            return Ok(None);
        };

        let fields = self
            .capture_names()
            .flatten()
            .filter_map(|name| {
                captures
                    .name(name)
                    .map(|m| (name.to_string(), m.as_str().to_string()))
            })
            .collect();
        Ok(Some(fields))
    }
}
