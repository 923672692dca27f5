//! 工具栏图标状态
use serde::{Deserialize, Serialize};

use crate::host::channel::DetectionResponse;
use crate::rule::detect_result::DetectionResult;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BadgeState {
    #[default]
    None,
    Typecho,
    /// TTDF 优先于 Typecho
    TypechoTtdf,
}

impl BadgeState {
    pub fn from_result(result: &DetectionResult) -> Self {
        if result.ttdf.is_ttdf {
            BadgeState::TypechoTtdf
        } else if result.is_typecho {
            BadgeState::Typecho
        } else {
            BadgeState::None
        }
    }

    /// 不可达的文档不点亮图标
    pub fn from_response(response: &DetectionResponse) -> Self {
        response
            .result()
            .map(Self::from_result)
            .unwrap_or_default()
    }

    pub fn icon_path(self) -> &'static str {
        match self {
            BadgeState::None => "icons/icon.svg",
            BadgeState::Typecho => "icons/typecho-detected.svg",
            BadgeState::TypechoTtdf => "icons/ttdf-detected.svg",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detector::classify;
    use crate::snapshot::DocumentSnapshot;

    #[test]
    fn test_badge_priority() {
        let plain = classify(&DocumentSnapshot::new());
        assert_eq!(BadgeState::from_result(&plain), BadgeState::None);

        let typecho = classify(&DocumentSnapshot::new().with_cookie("__typecho_uid=1"));
        assert_eq!(BadgeState::from_result(&typecho), BadgeState::Typecho);

        // 仅 TTDF 命中也显示 TTDF 图标
        let ttdf_only = classify(&DocumentSnapshot::new().with_meta("framework", "TTDF 1.0"));
        assert!(!ttdf_only.is_typecho);
        assert_eq!(BadgeState::from_result(&ttdf_only), BadgeState::TypechoTtdf);
        assert_eq!(BadgeState::TypechoTtdf.icon_path(), "icons/ttdf-detected.svg");
    }

    #[test]
    fn test_unavailable_badge() {
        let response = DetectionResponse::Unavailable {
            reason: "closed".into(),
        };
        assert_eq!(BadgeState::from_response(&response), BadgeState::None);
        assert_eq!(BadgeState::None.icon_path(), "icons/icon.svg");
    }
}
