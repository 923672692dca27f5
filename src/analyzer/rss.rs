use crate::{
    analyzer::{common::Evidence, AnalyzeContext, Analyzer},
    rule::{
        patterns::{FEED_MIME_TYPES, FEED_PATH_REGEX},
        signal::Signal,
    },
};

// RSS 分析器：link[rel=alternate] 订阅类型 + Typecho 默认 feed 路径
pub struct RssAnalyzer;

impl Analyzer for RssAnalyzer {
    const TYPE_NAME: &'static str = "RSS";
    const SIGNAL: Signal = Signal::Rss;

    fn match_logic<'a>(ctx: &AnalyzeContext<'a>) -> Option<Evidence<'a>> {
        ctx.snapshot
            .alternate_links
            .iter()
            .filter(|link| {
                link.link_type
                    .as_deref()
                    .is_some_and(|t| FEED_MIME_TYPES.iter().any(|mime| *mime == t))
            })
            .filter_map(|link| link.href.as_deref())
            .find(|href| FEED_PATH_REGEX.is_match(href))
            .map(|href| Evidence::new("link[rel=alternate]", href))
    }
}
