use rustc_hash::FxHashSet;

use crate::{
    analyzer::{common::Evidence, AnalyzeContext, Analyzer},
    rule::{patterns::RESOURCE_PATH_PATTERNS, signal::Signal},
    snapshot::DocumentSnapshot,
};

// 资源路径分析器：主题 / 插件 / 核心资源与特殊端点
pub struct PathAnalyzer;

impl Analyzer for PathAnalyzer {
    const TYPE_NAME: &'static str = "Path";
    const SIGNAL: Signal = Signal::Path;

    fn match_logic<'a>(ctx: &AnalyzeContext<'a>) -> Option<Evidence<'a>> {
        let snapshot = ctx.snapshot;

        // 元素引用（link/script/img + background-image），首个命中即返回
        if let Some(url) = snapshot
            .resource_urls()
            .find(|url| !url.is_empty() && RESOURCE_PATH_PATTERNS.is_match(url))
        {
            return Some(Evidence::new("resource", url));
        }

        // 内联脚本文本
        snapshot
            .inline_script_texts()
            .find(|text| RESOURCE_PATH_PATTERNS.is_match(text))
            .map(|text| Evidence::new("inline_script", text))
    }
}

impl PathAnalyzer {
    /// 收集全部命中证据：去重，保持扫描顺序
    /// 元素引用记录完整 URL；内联脚本记录每条规则的匹配片段
    pub fn matched_resources(snapshot: &DocumentSnapshot) -> Vec<String> {
        let mut seen: FxHashSet<&str> = FxHashSet::default();
        let mut resources = Vec::new();

        for url in snapshot.resource_urls() {
            if !url.is_empty() && RESOURCE_PATH_PATTERNS.is_match(url) && seen.insert(url) {
                resources.push(url.to_string());
            }
        }

        for text in snapshot.inline_script_texts() {
            for pattern in RESOURCE_PATH_PATTERNS.iter() {
                if let Some(m) = pattern.find(text) {
                    if seen.insert(m.as_str()) {
                        resources.push(m.as_str().to_string());
                    }
                }
            }
        }

        resources
    }
}
