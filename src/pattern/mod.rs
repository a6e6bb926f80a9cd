//! 模式模块：负责模式字典的数据结构与加载
pub mod dictionary;
pub mod loader;

// 导出核心接口
pub use self::dictionary::PatternDictionary;
pub use self::loader::PatternLoader;
