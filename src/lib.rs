//! rstypecho - Typecho 博客系统与 TTDF 主题框架指纹识别库

pub mod analyzer;
pub mod config;
pub mod detector;
pub mod error;
pub mod host;
pub mod rule;
pub mod snapshot;
pub mod utils;

// 导出全局错误类型
pub use self::error::{RstResult, RstypechoError};

// 导出配置模块核心结构体与构建器
pub use self::config::{ConfigManager, CustomConfigBuilder, SnapshotConfig};

// 导出规则模块核心接口与数据结构
pub use self::rule::{DetectionDetails, DetectionResult, PatternSet, Signal, SignalSet, TtdfInfo};

// 导出文档快照与全局名探测能力
pub use self::snapshot::{
    AlternateLink, DocumentSnapshot, EndpointRef, EndpointTag, GlobalProbe, NoGlobals,
    ResourceKind, ResourceRef,
};

// 导出检测模块核心接口
pub use self::detector::{classify, confidence, confidence_of, TypechoDetector};

// 导出HTML提取与Header转换工具
pub use self::utils::{HeaderConverter, HtmlExtractor, HtmlInputGuard};

// 导出宿主协作组件
pub use self::host::{
    render_report, BadgeState, ConfidenceTier, DetectionCache, DetectionResponse,
    DetectionService, DocumentId, MemoryProvider, SnapshotProvider,
};
