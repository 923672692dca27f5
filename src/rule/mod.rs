//! 规则模块：指纹规则库、信号定义、检测结果结构
pub mod patterns;
pub mod signal;
pub mod detect_result;

pub use self::patterns::PatternSet;
pub use self::signal::{Signal, SignalSet};
pub use self::detect_result::{DetectionDetails, DetectionResult, TtdfInfo};
