//! 检测报告渲染
//! 置信度分档 + 六项依据 + 资源证据 + TTDF 版本

use std::fmt::Write;

use crate::host::channel::DetectionResponse;
use crate::rule::detect_result::DetectionResult;
use crate::rule::signal::Signal;

pub const FAILURE_MESSAGE: &str = "检测失败，请刷新页面后重试";
pub const NOT_DETECTED_MESSAGE: &str = "未发现Typecho的特征标识";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfidenceTier {
    Confirmed,
    High,
    Likely,
    Possible,
}

impl ConfidenceTier {
    pub fn from_confidence(confidence: u8) -> Self {
        match confidence {
            100.. => ConfidenceTier::Confirmed,
            90..=99 => ConfidenceTier::High,
            80..=89 => ConfidenceTier::Likely,
            _ => ConfidenceTier::Possible,
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            ConfidenceTier::Confirmed => "确信是Typecho",
            ConfidenceTier::High => "高度确信是Typecho",
            ConfidenceTier::Likely => "很可能是Typecho",
            ConfidenceTier::Possible => "可能是Typecho",
        }
    }

    pub fn explanation(self) -> &'static str {
        match self {
            ConfidenceTier::Confirmed => "找到meta标签",
            ConfidenceTier::High => "多个强特征匹配",
            ConfidenceTier::Likely => "关键特征匹配",
            ConfidenceTier::Possible => "部分特征匹配",
        }
    }
}

fn detail_label(signal: Signal) -> &'static str {
    match signal {
        Signal::MetaTag => "Meta标签",
        Signal::Path => "路径特征",
        Signal::Structure => "HTML结构",
        Signal::Cookie => "Cookie特征",
        Signal::Api => "API端点",
        Signal::Rss => "RSS链接",
    }
}

/// 渲染纯文本报告
/// 不可达的文档只输出一行通用失败提示，不与“未检测到”混淆
pub fn render_report(response: &DetectionResponse) -> String {
    match response {
        DetectionResponse::Ready(result) => render_result(result),
        DetectionResponse::Unavailable { .. } => FAILURE_MESSAGE.to_string(),
    }
}

pub fn render_result(result: &DetectionResult) -> String {
    if !result.is_typecho {
        return NOT_DETECTED_MESSAGE.to_string();
    }

    let tier = ConfidenceTier::from_confidence(result.confidence);
    let mut out = String::new();
    // 写入 String 不会失败
    let _ = writeln!(out, "{} ({}%)", tier.title(), result.confidence);
    let _ = writeln!(out, "{}", tier.explanation());
    let _ = writeln!(out);
    let _ = writeln!(out, "检测依据:");
    for signal in Signal::ALL {
        let marker = if result.details.get(signal) {
            "✔ 匹配"
        } else {
            "✘ 未匹配"
        };
        let _ = writeln!(out, "  {}: {}", detail_label(signal), marker);
    }

    if !result.details.matched_resources.is_empty() {
        let _ = writeln!(out);
        let _ = writeln!(out, "匹配资源:");
        for resource in &result.details.matched_resources {
            let _ = writeln!(out, "  - {}", resource);
        }
    }

    if let Some(version) = result.ttdf.version.as_deref().filter(|_| result.ttdf.is_ttdf) {
        let _ = writeln!(out);
        let _ = writeln!(out, "主题使用 TTDF v{} 构建.", version);
    }

    out.trim_end().to_string()
}
