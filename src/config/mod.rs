//! 配置模块
pub mod detect;

pub use self::detect::{ConfigManager, CustomConfigBuilder, SnapshotConfig, DEFAULT_MAX_HTML_LEN};
