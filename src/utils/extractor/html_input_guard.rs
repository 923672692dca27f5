/// HTML 输入守卫：负责在进入 lol_html 解析前
/// 保证输入「值得分析」且「不会拖垮提取器」
use log::warn;

pub struct HtmlInputGuard;

impl HtmlInputGuard {
    /// 默认最大 HTML 长度（2MB）
    pub const MAX_HTML_LEN: usize = 2 * 1024 * 1024;

    /// 空输入 / 纯空白输入返回 None；超长输入在 UTF-8 边界处零拷贝截断
    pub fn guard(html: &str, max_len: usize) -> Option<&str> {
        // 1. 无有效字符：直接判定无效
        if html.bytes().all(|b| b.is_ascii_whitespace() || b.is_ascii_control()) {
            return None;
        }

        // 2. 超长保护
        if html.len() <= max_len {
            return Some(html);
        }
        let mut cut = max_len;
        while !html.is_char_boundary(cut) {
            cut -= 1;
        }
        warn!(
            "HTML 输入超出上限，已截断 | 原始长度: {} | 截断后: {}",
            html.len(),
            cut
        );

        let truncated = &html[..cut];
        // 截断后可能只剩空白
        if truncated.trim().is_empty() {
            return None;
        }
        Some(truncated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reject_empty_input() {
        assert_eq!(HtmlInputGuard::guard("", HtmlInputGuard::MAX_HTML_LEN), None);
        assert_eq!(HtmlInputGuard::guard(" \n\t\r ", HtmlInputGuard::MAX_HTML_LEN), None);
        assert_eq!(HtmlInputGuard::guard("<p>", HtmlInputGuard::MAX_HTML_LEN), Some("<p>"));
    }

    #[test]
    fn test_truncate_at_char_boundary() {
        // “中” 占 3 字节，上限 4 落在第二个字符中间
        let html = "中文页面";
        assert_eq!(HtmlInputGuard::guard(html, 4), Some("中"));
        assert_eq!(HtmlInputGuard::guard(html, 6), Some("中文"));
        assert_eq!(HtmlInputGuard::guard(html, 100), Some(html));
    }

    #[test]
    fn test_truncate_to_whitespace() {
        assert_eq!(HtmlInputGuard::guard("   <html>", 2), None);
    }
}
