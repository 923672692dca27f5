use log::debug;

use crate::{
    rule::{
        detect_result::TtdfInfo,
        patterns::{FRAMEWORK_META_NAME, FRAMEWORK_REGEX},
    },
    snapshot::DocumentSnapshot,
};

// TTDF 主题框架分析器
// 与 Typecho 各信号相互独立，结果不参与置信度计算
pub struct FrameworkAnalyzer;

impl FrameworkAnalyzer {
    pub const TYPE_NAME: &'static str = "Framework";

    pub fn analyze(snapshot: &DocumentSnapshot) -> TtdfInfo {
        let version = snapshot
            .meta_content(FRAMEWORK_META_NAME)
            .and_then(|content| FRAMEWORK_REGEX.captures(content))
            .and_then(|cap| cap.get(1))
            .map(|m| m.as_str().to_string());

        match version {
            Some(version) => {
                debug!("[{}] matched | TTDF version: {}", Self::TYPE_NAME, version);
                TtdfInfo::detected(version)
            }
            None => TtdfInfo::absent(),
        }
    }
}
