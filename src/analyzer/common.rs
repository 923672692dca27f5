use log::debug;

use crate::utils::log_format::preview_compact;

/// 日志中证据内容的最大预览长度
const EVIDENCE_PREVIEW_LEN: usize = 120;

/// 命中证据：匹配项 + 命中内容（借用自快照或静态规则）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Evidence<'a> {
    pub target: &'static str,
    pub value: &'a str,
}

impl<'a> Evidence<'a> {
    #[inline(always)]
    pub fn new(target: &'static str, value: &'a str) -> Self {
        Self { target, value }
    }
}

/// 匹配成功通用处理器 - 标准日志输出
#[inline(always)]
pub fn handle_match_success(analyzer_type: &str, evidence: &Evidence<'_>) {
    debug!(
        "[{}] matched | target: {} | content: {}",
        analyzer_type,
        evidence.target,
        preview_compact(evidence.value, EVIDENCE_PREVIEW_LEN)
    );
}

/// 未命中的维度只在 trace 级别记录
#[inline(always)]
pub fn handle_no_match(analyzer_type: &str) {
    log::trace!("[{}] no match", analyzer_type);
}
