//! 模式字典：模式名 -> 正则片段定义
//! 仅存储数据，构建完成后只读

use std::collections::HashMap;

/// 模式字典（名称区分大小写）
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PatternDictionary {
    patterns: HashMap<String, String>,
}

impl PatternDictionary {
    pub fn new() -> Self {
        Self::default()
    }

    /// 从 (名称, 定义) 列表构建，重复名称以后者为准
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        pairs.into_iter().collect()
    }

    /// 查询模式定义
    pub fn lookup(&self, name: &str) -> Option<&str> {
        self.patterns.get(name).map(String::as_str)
    }

    /// 查询模式，返回字典内的 (名称, 定义)
    pub(crate) fn lookup_entry(&self, name: &str) -> Option<(&str, &str)> {
        self.patterns
            .get_key_value(name)
            .map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.patterns.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    /// 按名称排序的模式名列表
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.patterns.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// 合并另一个字典，同名模式被覆盖，返回被覆盖的名称
    pub(crate) fn merge(&mut self, other: PatternDictionary) -> Vec<String> {
        let mut replaced = Vec::new();
        for (name, definition) in other.patterns {
            if self.patterns.insert(name.clone(), definition).is_some() {
                replaced.push(name);
            }
        }
        replaced
    }

    pub(crate) fn insert(&mut self, name: String, definition: String) -> Option<String> {
        self.patterns.insert(name, definition)
    }
}

impl<K, V> FromIterator<(K, V)> for PatternDictionary
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        Self {
            patterns: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_is_case_sensitive() {
        let dict = PatternDictionary::from_pairs([("USER", "[a-z]+")]);
        assert_eq!(dict.lookup("USER"), Some("[a-z]+"));
        assert_eq!(dict.lookup("user"), None);
    }

    #[test]
    fn test_later_pair_wins() {
        let dict = PatternDictionary::from_pairs([("A", "1"), ("B", "2"), ("A", "3")]);
        assert_eq!(dict.len(), 2);
        assert_eq!(dict.lookup("A"), Some("3"));
        assert_eq!(dict.names(), vec!["A", "B"]);
    }

    #[test]
    fn test_merge_reports_replaced_names() {
        let mut base = PatternDictionary::from_pairs([("A", "1"), ("B", "2")]);
        let replaced = base.merge(PatternDictionary::from_pairs([("B", "x"), ("C", "3")]));
        assert_eq!(replaced, vec!["B".to_string()]);
        assert_eq!(base.lookup("B"), Some("x"));
        assert_eq!(base.len(), 3);
    }
}
