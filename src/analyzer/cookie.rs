use crate::{
    analyzer::{common::Evidence, AnalyzeContext, Analyzer},
    rule::{patterns::TYPECHO_COOKIE_MARKER, signal::Signal},
};

// Cookie 分析器：document.cookie 中出现 __typecho_ 前缀即命中
pub struct CookieAnalyzer;

impl Analyzer for CookieAnalyzer {
    const TYPE_NAME: &'static str = "Cookie";
    const SIGNAL: Signal = Signal::Cookie;

    fn match_logic<'a>(ctx: &AnalyzeContext<'a>) -> Option<Evidence<'a>> {
        let cookie = ctx.snapshot.cookie_str();
        cookie
            .contains(TYPECHO_COOKIE_MARKER)
            .then(|| Evidence::new("cookie", cookie))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::snapshot::{DocumentSnapshot, NoGlobals};

    fn run(snapshot: &DocumentSnapshot) -> bool {
        CookieAnalyzer::match_logic(&AnalyzeContext::new(snapshot, &NoGlobals)).is_some()
    }

    #[test]
    fn test_cookie_marker() {
        assert!(run(&DocumentSnapshot::new().with_cookie("PHPSESSID=1; __typecho_uid=3")));
        assert!(run(&DocumentSnapshot::new().with_cookie("a=__typecho_x")));
    }

    #[test]
    fn test_cookie_negative() {
        assert!(!run(&DocumentSnapshot::new()));
        assert!(!run(&DocumentSnapshot::new().with_cookie("")));
        // 区分大小写的子串匹配
        assert!(!run(&DocumentSnapshot::new().with_cookie("__TYPECHO_uid=1")));
        assert!(!run(&DocumentSnapshot::new().with_cookie("typecho_uid=1")));
    }
}
