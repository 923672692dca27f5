//! 信号提取器
//! 六个相互独立的 Typecho 证据维度 + 一个独立的 TTDF 框架识别器
//! 每个提取器都是快照的纯函数：缺失元素/属性一律视为负面证据，从不报错
use crate::{
    rule::signal::{Signal, SignalSet},
    snapshot::{DocumentSnapshot, GlobalProbe},
};

pub mod common;
pub mod meta;
pub mod path;
pub mod structure;
pub mod cookie;
pub mod api;
pub mod rss;
pub mod framework;

use self::common::{handle_match_success, handle_no_match, Evidence};

/// 单次分析的只读上下文
#[derive(Clone, Copy)]
pub struct AnalyzeContext<'a> {
    pub snapshot: &'a DocumentSnapshot,
    /// 注入的全局名探测能力（仅 API 维度使用）
    pub globals: &'a dyn GlobalProbe,
}

impl<'a> AnalyzeContext<'a> {
    pub fn new(snapshot: &'a DocumentSnapshot, globals: &'a dyn GlobalProbe) -> Self {
        Self { snapshot, globals }
    }
}

/// 所有信号提取器的通用抽象特质
pub trait Analyzer {
    /// 分析器类型名称，用于日志标准化输出
    const TYPE_NAME: &'static str;
    /// 该分析器产出的信号
    const SIGNAL: Signal;

    /// 核心匹配逻辑 - 命中时返回第一条证据
    fn match_logic<'a>(ctx: &AnalyzeContext<'a>) -> Option<Evidence<'a>>;

    /// 通用分析执行骨架：匹配 → 日志 → 写入信号集合
    #[inline(always)]
    fn analyze(ctx: &AnalyzeContext<'_>, signals: &mut SignalSet) -> bool
    where
        Self: Sized,
    {
        let matched = match Self::match_logic(ctx) {
            Some(evidence) => {
                handle_match_success(Self::TYPE_NAME, &evidence);
                true
            }
            None => {
                handle_no_match(Self::TYPE_NAME);
                false
            }
        };
        signals.set(Self::SIGNAL, matched);
        matched
    }
}

/// 运行全部六个 Typecho 信号提取器
pub fn collect_signals(ctx: &AnalyzeContext<'_>) -> SignalSet {
    let mut signals = SignalSet::new();
    meta::MetaAnalyzer::analyze(ctx, &mut signals);
    path::PathAnalyzer::analyze(ctx, &mut signals);
    structure::StructureAnalyzer::analyze(ctx, &mut signals);
    cookie::CookieAnalyzer::analyze(ctx, &mut signals);
    api::ApiAnalyzer::analyze(ctx, &mut signals);
    rss::RssAnalyzer::analyze(ctx, &mut signals);
    signals
}
