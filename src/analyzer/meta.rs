use crate::{
    analyzer::{common::Evidence, AnalyzeContext, Analyzer},
    rule::{
        patterns::{GENERATOR_META_NAME, GENERATOR_REGEX},
        signal::Signal,
    },
};

// Meta generator 分析器：最高可信度信号
pub struct MetaAnalyzer;

impl Analyzer for MetaAnalyzer {
    const TYPE_NAME: &'static str = "Meta";
    const SIGNAL: Signal = Signal::MetaTag;

    fn match_logic<'a>(ctx: &AnalyzeContext<'a>) -> Option<Evidence<'a>> {
        ctx.snapshot
            .meta_content(GENERATOR_META_NAME)
            .filter(|content| GENERATOR_REGEX.is_match(content))
            .map(|content| Evidence::new("meta[name=generator]", content))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::snapshot::{DocumentSnapshot, NoGlobals};

    fn run(snapshot: &DocumentSnapshot) -> bool {
        MetaAnalyzer::match_logic(&AnalyzeContext::new(snapshot, &NoGlobals)).is_some()
    }

    #[test]
    fn test_generator_versions() {
        assert!(run(&DocumentSnapshot::new().with_meta("generator", "Typecho 1.2.1")));
        assert!(run(&DocumentSnapshot::new().with_meta("generator", "TYPECHO 1.1")));
        assert!(run(&DocumentSnapshot::new().with_meta("generator", "Typecho 1.3.0 (Dev)")));
    }

    #[test]
    fn test_generator_negative() {
        assert!(!run(&DocumentSnapshot::new()));
        assert!(!run(&DocumentSnapshot::new().with_meta("generator", "Typecho")));
        assert!(!run(&DocumentSnapshot::new().with_meta("generator", "WordPress 6.5")));
        assert!(!run(&DocumentSnapshot::new().with_meta("description", "Typecho 1.2")));
    }

    #[test]
    fn test_only_first_generator_counts() {
        let snapshot = DocumentSnapshot::new()
            .with_meta("generator", "Hexo 7.0")
            .with_meta("generator", "Typecho 1.2");
        assert!(!run(&snapshot));
    }
}
