//! 检测模块：置信度聚合与分类器门面
pub mod confidence;
pub mod detector;

// 导出核心接口
pub use self::confidence::{confidence, confidence_of};
pub use self::detector::{classify, TypechoDetector};
