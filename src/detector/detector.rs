//! Typecho 分类器门面
//! 核心职责：
//! 1. 对快照运行六个信号提取器
//! 2. 聚合置信度，仅在路径信号命中时收集资源证据
//! 3. 独立识别 TTDF 框架
//! 4. 提供快照 / 原始 HTML / HTTP 响应等多种入口

use http::header::HeaderMap;
use log::debug;

use crate::analyzer::{
    collect_signals, framework::FrameworkAnalyzer, path::PathAnalyzer, AnalyzeContext,
};
use crate::config::SnapshotConfig;
use crate::detector::confidence::confidence;
use crate::rule::detect_result::{DetectionDetails, DetectionResult};
use crate::rule::signal::Signal;
use crate::snapshot::{DocumentSnapshot, GlobalProbe};
use crate::utils::{HeaderConverter, HtmlExtractor};

/// 无状态分类器
/// 不持有任何可变状态，可跨线程共享并发调用
#[derive(Debug, Clone, Copy, Default)]
pub struct TypechoDetector;

impl TypechoDetector {
    pub fn new() -> Self {
        Self
    }

    /// 使用快照自带的全局名声明作为探测器
    #[inline(always)]
    pub fn classify(&self, snapshot: &DocumentSnapshot) -> DetectionResult {
        self.classify_with(snapshot, snapshot)
    }

    /// 使用宿主注入的全局名探测器
    pub fn classify_with(
        &self,
        snapshot: &DocumentSnapshot,
        globals: &dyn GlobalProbe,
    ) -> DetectionResult {
        let ctx = AnalyzeContext::new(snapshot, globals);

        // 1. 六维信号
        let signals = collect_signals(&ctx);

        // 2. 置信度
        let confidence = confidence(signals);

        // 3. 证据：仅路径命中时收集
        let matched_resources = if signals.get(Signal::Path) {
            PathAnalyzer::matched_resources(snapshot)
        } else {
            Vec::new()
        };

        // 4. TTDF 框架（独立）
        let ttdf = FrameworkAnalyzer::analyze(snapshot);

        let result = DetectionResult {
            is_typecho: signals.any(),
            details: DetectionDetails::from_signals(signals, matched_resources),
            confidence,
            ttdf,
        };
        debug!(
            "[Detector] classification complete | {} | signals: {:?}",
            result,
            signals.iter_matched().collect::<Vec<_>>()
        );
        result
    }

    /// 原始 HTML 入口：提取快照后分类
    pub fn detect_html(&self, html: &str, config: &SnapshotConfig) -> DetectionResult {
        let snapshot = HtmlExtractor::extract(html, config);
        self.classify(&snapshot)
    }

    /// HTTP 响应入口：Cookie / Set-Cookie 头合并为 cookie 串，配置中已有的 cookie 优先拼接在前
    /// 空的配置 cookie 视为未配置
    pub fn detect_response(
        &self,
        headers: &HeaderMap,
        body: &[u8],
        config: &SnapshotConfig,
    ) -> DetectionResult {
        let header_cookie = HeaderConverter::to_cookie_string(headers);
        let existing = config.cookie.as_deref().filter(|c| !c.is_empty());
        let cookie = match (existing, header_cookie.is_empty()) {
            (Some(existing), false) => Some(format!("{}; {}", existing, header_cookie)),
            (Some(existing), true) => Some(existing.to_string()),
            (None, false) => Some(header_cookie),
            (None, true) => config.cookie.clone(),
        };
        let config = SnapshotConfig {
            cookie,
            ..config.clone()
        };

        let html = String::from_utf8_lossy(body);
        self.detect_html(&html, &config)
    }
}

/// 便捷入口：对快照执行一次分类
#[inline(always)]
pub fn classify(snapshot: &DocumentSnapshot) -> DetectionResult {
    TypechoDetector.classify(snapshot)
}
