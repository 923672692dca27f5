//! 宿主协作组件：请求通道、按文档缓存、图标状态、报告渲染
pub mod badge;
pub mod cache;
pub mod channel;
pub mod report;

pub use self::badge::BadgeState;
pub use self::cache::DetectionCache;
pub use self::channel::{DetectionResponse, DetectionService, DocumentId, MemoryProvider, SnapshotProvider};
pub use self::report::{render_report, render_result, ConfidenceTier};
