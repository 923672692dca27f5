//! 按文档缓存的检测结果
//! 文档导航 / 刷新时由宿主失效对应条目

use std::sync::{PoisonError, RwLock};

use log::info;
use rustc_hash::FxHashMap;

use crate::host::channel::DocumentId;
use crate::rule::detect_result::DetectionResult;

#[derive(Debug, Default)]
pub struct DetectionCache {
    entries: RwLock<FxHashMap<DocumentId, DetectionResult>>,
}

impl DetectionCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, id: &DocumentId) -> Option<DetectionResult> {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(id)
            .cloned()
    }

    /// 写入结果，返回被替换的旧值
    pub fn insert(&self, id: DocumentId, result: DetectionResult) -> Option<DetectionResult> {
        self.entries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(id, result)
    }

    pub fn invalidate(&self, id: &DocumentId) -> Option<DetectionResult> {
        let removed = self
            .entries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(id);
        if removed.is_some() {
            info!("[Cache] 文档 {} 的检测结果已失效", id);
        }
        removed
    }

    pub fn clear(&self) {
        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        let count = entries.len();
        entries.clear();
        info!("[Cache] 已清空 {} 条检测结果", count);
    }

    pub fn len(&self) -> usize {
        self.entries.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
