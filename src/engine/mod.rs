//! 正则引擎抽象：编译、枚举命名分组、匹配
//! 编译结果的释放由所有权负责（Drop），不存在重复释放
pub mod fancy;
pub mod standard;

use std::collections::HashMap;

pub use self::fancy::FancyRegexEngine;
pub use self::standard::StdRegexEngine;

/// 引擎编译出的正则句柄
pub trait CompiledRegex: Send + Sync {
    /// 展开后的正则源码
    fn source(&self) -> &str;

    /// 命名捕获分组（分组序号, 名称）
    fn named_groups(&self) -> Vec<(usize, String)>;

    /// 匹配输入，返回各命名分组捕获到的文本；未匹配返回 None
    fn capture_fields(&self, input: &str) -> Result<Option<HashMap<String, String>>, String>;
}

/// 正则引擎能力
pub trait RegexEngine: Send + Sync {
    type Regex: CompiledRegex;

    /// 引擎名称（用于日志输出）
    fn name(&self) -> &'static str;

    /// 编译正则源码，失败时返回引擎原生错误信息
    fn compile(&self, source: &str) -> Result<Self::Regex, String>;
}

/// 收集命名分组，跳过未命名分组（序号 0 为整体匹配）
pub(crate) fn collect_named<'a, I>(names: I) -> Vec<(usize, String)>
where
    I: Iterator<Item = Option<&'a str>>,
{
    names
        .enumerate()
        .filter_map(|(index, name)| name.map(|n| (index, n.to_string())))
        .collect()
}
