use crate::{
    analyzer::{common::Evidence, AnalyzeContext, Analyzer},
    rule::{patterns::STRUCTURE_SELECTORS, signal::Signal},
};

// HTML 结构分析器：后台 / 登录页特有的 class、id 标记
pub struct StructureAnalyzer;

impl Analyzer for StructureAnalyzer {
    const TYPE_NAME: &'static str = "Structure";
    const SIGNAL: Signal = Signal::Structure;

    fn match_logic<'a>(ctx: &AnalyzeContext<'a>) -> Option<Evidence<'a>> {
        STRUCTURE_SELECTORS
            .iter()
            .find(|selector| ctx.snapshot.matches_selector(selector))
            .map(|selector| Evidence::new("selector", selector))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::snapshot::{DocumentSnapshot, NoGlobals};

    #[test]
    fn test_any_selector_hit() {
        let snapshot = DocumentSnapshot::new().with_structure_hit("div#typecho-navbar");
        let evidence = StructureAnalyzer::match_logic(&AnalyzeContext::new(&snapshot, &NoGlobals));
        assert_eq!(evidence.map(|e| e.value), Some("div#typecho-navbar"));
    }

    #[test]
    fn test_unknown_selector_ignored() {
        let snapshot = DocumentSnapshot::new().with_structure_hit("div.wp-site-blocks");
        assert!(StructureAnalyzer::match_logic(&AnalyzeContext::new(&snapshot, &NoGlobals)).is_none());
    }
}
