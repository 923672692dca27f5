//! 检测结果结构
//! 字段名与扩展消息通道上的 JSON 记录保持一致（isTypecho / byAPI / isTTDF ...）

use serde::{Deserialize, Serialize};

use crate::rule::signal::{Signal, SignalSet};

/// 单次分类结果，构造后不可变，所有权完全交给调用方
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DetectionResult {
    #[serde(rename = "isTypecho")]
    pub is_typecho: bool,
    pub details: DetectionDetails,
    pub confidence: u8,
    pub ttdf: TtdfInfo,
}

/// 各维度命中情况 + 资源路径证据
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DetectionDetails {
    #[serde(rename = "byMetaTag")]
    pub by_meta_tag: bool,
    #[serde(rename = "byPath")]
    pub by_path: bool,
    #[serde(rename = "byStructure")]
    pub by_structure: bool,
    #[serde(rename = "byCookie")]
    pub by_cookie: bool,
    #[serde(rename = "byAPI")]
    pub by_api: bool,
    #[serde(rename = "byRSS")]
    pub by_rss: bool,
    #[serde(rename = "matchedResources", default)]
    pub matched_resources: Vec<String>,
}

impl DetectionDetails {
    pub fn from_signals(signals: SignalSet, matched_resources: Vec<String>) -> Self {
        Self {
            by_meta_tag: signals.get(Signal::MetaTag),
            by_path: signals.get(Signal::Path),
            by_structure: signals.get(Signal::Structure),
            by_cookie: signals.get(Signal::Cookie),
            by_api: signals.get(Signal::Api),
            by_rss: signals.get(Signal::Rss),
            matched_resources,
        }
    }

    pub fn get(&self, signal: Signal) -> bool {
        match signal {
            Signal::MetaTag => self.by_meta_tag,
            Signal::Path => self.by_path,
            Signal::Structure => self.by_structure,
            Signal::Cookie => self.by_cookie,
            Signal::Api => self.by_api,
            Signal::Rss => self.by_rss,
        }
    }

    /// 还原为信号集合
    pub fn signals(&self) -> SignalSet {
        Signal::ALL.into_iter().filter(|s| self.get(*s)).collect()
    }
}

/// TTDF 主题框架识别结果，与 Typecho 置信度无关
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TtdfInfo {
    #[serde(rename = "isTTDF")]
    pub is_ttdf: bool,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub version: Option<String>,
}

impl TtdfInfo {
    pub fn detected(version: impl Into<String>) -> Self {
        Self {
            is_ttdf: true,
            version: Some(version.into()),
        }
    }

    pub fn absent() -> Self {
        Self::default()
    }
}

impl std::fmt::Display for DetectionResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Typecho: {} (confidence {}%)",
            self.is_typecho, self.confidence
        )?;
        if let Some(version) = self.ttdf.version.as_deref().filter(|_| self.ttdf.is_ttdf) {
            write!(f, " | TTDF {}", version)?;
        }
        Ok(())
    }
}
