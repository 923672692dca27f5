//! 宿主请求/响应通道
//! 给定文档标识，获取该文档的实时快照，分类一次并返回结果
//! 文档不可达时返回可区分的 Unavailable，绝不返回部分结果

use std::fmt::{Display, Formatter};
use std::sync::{PoisonError, RwLock};

use log::{debug, warn};
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::detector::TypechoDetector;
use crate::error::{RstResult, RstypechoError};
use crate::host::badge::BadgeState;
use crate::host::cache::DetectionCache;
use crate::rule::detect_result::DetectionResult;
use crate::snapshot::DocumentSnapshot;

/// 文档（标签页）标识
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DocumentId(String);

impl DocumentId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<u64> for DocumentId {
    fn from(id: u64) -> Self {
        Self(id.to_string())
    }
}

impl From<&str> for DocumentId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl Display for DocumentId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// 通道响应
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "camelCase")]
pub enum DetectionResponse {
    Ready(DetectionResult),
    Unavailable { reason: String },
}

impl DetectionResponse {
    pub fn result(&self) -> Option<&DetectionResult> {
        match self {
            DetectionResponse::Ready(result) => Some(result),
            DetectionResponse::Unavailable { .. } => None,
        }
    }

    pub fn is_available(&self) -> bool {
        matches!(self, DetectionResponse::Ready(_))
    }
}

/// 快照来源：宿主负责读取文档的实时状态
pub trait SnapshotProvider {
    fn snapshot(&self, id: &DocumentId) -> RstResult<DocumentSnapshot>;
}

impl<F> SnapshotProvider for F
where
    F: Fn(&DocumentId) -> RstResult<DocumentSnapshot>,
{
    fn snapshot(&self, id: &DocumentId) -> RstResult<DocumentSnapshot> {
        self(id)
    }
}

/// 内存快照表：宿主将已物化的文档登记于此
#[derive(Debug, Default)]
pub struct MemoryProvider {
    documents: RwLock<FxHashMap<DocumentId, DocumentSnapshot>>,
}

impl MemoryProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&self, id: DocumentId, snapshot: DocumentSnapshot) {
        self.documents
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(id, snapshot);
    }

    pub fn remove(&self, id: &DocumentId) -> Option<DocumentSnapshot> {
        self.documents
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(id)
    }
}

impl SnapshotProvider for MemoryProvider {
    fn snapshot(&self, id: &DocumentId) -> RstResult<DocumentSnapshot> {
        self.documents
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(id)
            .cloned()
            .ok_or_else(|| RstypechoError::DocumentUnavailable(format!("文档 {} 未登记", id)))
    }
}

/// 检测服务：快照来源 + 分类器 + 按文档缓存
pub struct DetectionService<P> {
    provider: P,
    detector: TypechoDetector,
    cache: DetectionCache,
}

impl<P: SnapshotProvider> DetectionService<P> {
    pub fn new(provider: P) -> Self {
        Self {
            provider,
            detector: TypechoDetector::new(),
            cache: DetectionCache::new(),
        }
    }

    /// 命中缓存直接返回；否则取快照分类一次并写入缓存
    /// 获取失败不写缓存，下次请求重新获取
    pub fn request(&self, id: &DocumentId) -> DetectionResponse {
        if let Some(cached) = self.cache.get(id) {
            debug!("[Channel] 文档 {} 命中缓存", id);
            return DetectionResponse::Ready(cached);
        }

        match self.provider.snapshot(id) {
            Ok(snapshot) => {
                let result = self.detector.classify(&snapshot);
                self.cache.insert(id.clone(), result.clone());
                DetectionResponse::Ready(result)
            }
            Err(e) => {
                warn!("[Channel] 文档 {} 快照获取失败: {}", id, e);
                DetectionResponse::Unavailable {
                    reason: e.to_string(),
                }
            }
        }
    }

    /// 文档导航或刷新：旧结果作废
    pub fn navigated(&self, id: &DocumentId) {
        self.cache.invalidate(id);
    }

    /// 当前文档的图标状态，仅依据已缓存结果
    pub fn badge(&self, id: &DocumentId) -> BadgeState {
        self.cache
            .get(id)
            .map(|result| BadgeState::from_result(&result))
            .unwrap_or_default()
    }

    pub fn cache(&self) -> &DetectionCache {
        &self.cache
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    fn typecho_snapshot() -> DocumentSnapshot {
        DocumentSnapshot::new().with_meta("generator", "Typecho 1.2.1")
    }

    #[test]
    fn test_request_classifies_once_and_caches() {
        let calls = Cell::new(0);
        let provider = |_: &DocumentId| -> RstResult<DocumentSnapshot> {
            calls.set(calls.get() + 1);
            Ok(typecho_snapshot())
        };
        let service = DetectionService::new(provider);
        let tab = DocumentId::from(1u64);

        let first = service.request(&tab);
        let second = service.request(&tab);
        assert_eq!(first, second);
        assert_eq!(calls.get(), 1);
        assert_eq!(first.result().map(|r| r.confidence), Some(100));

        // 导航后重新获取
        service.navigated(&tab);
        service.request(&tab);
        assert_eq!(calls.get(), 2);
    }

    #[test]
    fn test_unavailable_is_not_cached() {
        let service = DetectionService::new(MemoryProvider::new());
        let tab = DocumentId::from("tab-3");

        let response = service.request(&tab);
        assert!(!response.is_available());
        assert!(response.result().is_none());
        assert!(service.cache().is_empty());
        assert_eq!(service.badge(&tab), BadgeState::None);

        service.provider().register(tab.clone(), typecho_snapshot());
        assert!(service.request(&tab).is_available());
        assert_eq!(service.badge(&tab), BadgeState::Typecho);
    }

    #[test]
    fn test_response_wire_format() {
        let unavailable = DetectionResponse::Unavailable {
            reason: "gone".into(),
        };
        let json = serde_json::to_value(&unavailable).unwrap();
        assert_eq!(json["status"], "unavailable");
        assert_eq!(json["reason"], "gone");

        let ready = DetectionResponse::Ready(crate::detector::classify(&typecho_snapshot()));
        let json = serde_json::to_value(&ready).unwrap();
        assert_eq!(json["status"], "ready");
        assert_eq!(json["isTypecho"], true);
        assert_eq!(json["details"]["byMetaTag"], true);

        let back: DetectionResponse = serde_json::from_value(json).unwrap();
        assert_eq!(back, ready);
    }
}
