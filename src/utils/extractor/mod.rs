//! 提取模块：从原始 HTML 中物化文档快照
pub mod html_extractor;
pub mod html_input_guard;

pub use self::html_extractor::HtmlExtractor;
pub use self::html_input_guard::HtmlInputGuard;
