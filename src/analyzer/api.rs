use crate::{
    analyzer::{common::Evidence, AnalyzeContext, Analyzer},
    rule::{
        patterns::{
            ACTION_JSON_REGEX, ACTION_REGEX, INLINE_AJAX_PATTERNS, TYPECHO_GLOBAL_NAMES,
            XMLRPC_REGEX,
        },
        signal::Signal,
    },
};

// API 端点分析器
// 五项子检查相互独立、结果取或：XML-RPC / action 端点 / action JSON 脚本 / 内联 AJAX / 全局对象
pub struct ApiAnalyzer;

impl Analyzer for ApiAnalyzer {
    const TYPE_NAME: &'static str = "API";
    const SIGNAL: Signal = Signal::Api;

    fn match_logic<'a>(ctx: &AnalyzeContext<'a>) -> Option<Evidence<'a>> {
        let snapshot = ctx.snapshot;

        let xmlrpc = move || {
            snapshot
                .endpoint_urls()
                .find(|url| XMLRPC_REGEX.is_match(url))
                .map(|url| Evidence::new("xmlrpc", url))
        };
        let action = move || {
            snapshot
                .endpoint_urls()
                .find(|url| ACTION_REGEX.is_match(url))
                .map(|url| Evidence::new("action", url))
        };
        let action_json = move || {
            snapshot
                .script_srcs()
                .find(|src| ACTION_JSON_REGEX.is_match(src))
                .map(|src| Evidence::new("action_json", src))
        };
        let inline_ajax = move || {
            snapshot
                .inline_script_texts()
                .find(|text| INLINE_AJAX_PATTERNS.is_match(text))
                .map(|text| Evidence::new("inline_ajax", text))
        };
        let globals = move || {
            TYPECHO_GLOBAL_NAMES
                .iter()
                .find(|name| ctx.globals.is_defined(name))
                .map(|name| Evidence::new("global", name))
        };

        xmlrpc()
            .or_else(action)
            .or_else(action_json)
            .or_else(inline_ajax)
            .or_else(globals)
    }
}
