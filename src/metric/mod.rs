//! 指标模块：指标定义、字段校验、字段提取
pub mod definition;
pub mod verifier;
pub mod extractor;

// 导出核心接口
pub use self::definition::{LabelBinding, MetricDefinition};
pub use self::verifier::{verify_field_names, FieldVerifier};
pub use self::extractor::{CompiledMetric, MetricSample};
