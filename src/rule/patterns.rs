//! Typecho 指纹规则库
//! 按信号维度组织的只读匹配规则：资源路径正则、DOM 结构选择器、Cookie 标记、API/RSS 规则
//! 所有正则在首次访问时编译一次，之后全局只读共享（线程安全、可重入）

use once_cell::sync::Lazy;
use regex::{Regex, RegexBuilder};

use crate::error::{RstResult, RstypechoError};

/// 有序正则集合
/// 匹配时顺序无关（任一命中即可），提取证据时按顺序扫描
#[derive(Debug, Clone)]
pub struct PatternSet {
    name: &'static str,
    patterns: Vec<Regex>,
}

impl PatternSet {
    /// 编译一组忽略大小写的正则；任一条编译失败即返回错误
    pub fn new(name: &'static str, sources: &[&str]) -> RstResult<Self> {
        if sources.is_empty() {
            return Err(RstypechoError::EmptyPatternSet(name.to_string()));
        }
        let patterns = sources
            .iter()
            .map(|src| RegexBuilder::new(src).case_insensitive(true).build())
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { name, patterns })
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Regex> {
        self.patterns.iter()
    }

    /// 任一规则命中即返回 true（短路）
    #[inline(always)]
    pub fn is_match(&self, input: &str) -> bool {
        self.patterns.iter().any(|re| re.is_match(input))
    }
}

/// 内置规则编译入口，规则为常量，编译失败属于程序缺陷
fn builtin(name: &'static str, sources: &[&str]) -> PatternSet {
    PatternSet::new(name, sources)
        .unwrap_or_else(|e| panic!("内置规则集 [{}] 编译失败: {}", name, e))
}

fn builtin_single(name: &'static str, source: &str) -> Regex {
    RegexBuilder::new(source)
        .case_insensitive(true)
        .build()
        .unwrap_or_else(|e| panic!("内置规则 [{}] 编译失败: {}", name, e))
}

// ======================== 资源路径 ========================

/// 资源路径正则源（主题 / 插件 / 核心 / 特殊端点）
pub const RESOURCE_PATH_SOURCES: &[&str] = &[
    // 主题资源路径
    r"/usr/themes/[\w-]+/(?:style|main|theme|custom)(?:\.min)?\.(css|js)(?:\?.*)?$",
    r"/usr/themes/[\w-]+/assets/[\w/-]+\.(css|js)(?:\?.*)?$",
    r"/usr/themes/[\w-]+/js/[\w-]+\.(js)(?:\?.*)?$",
    r"/usr/themes/[\w-]+/css/[\w-]+\.(css)(?:\?.*)?$",
    // 插件资源路径
    r"/usr/plugins/[\w-]+/(?:script|main|plugin|admin)(?:\.min)?\.(js)(?:\?.*)?$",
    r"/usr/plugins/[\w-]+/(?:style|main|plugin|admin)(?:\.min)?\.(css)(?:\?.*)?$",
    r"/usr/plugins/[\w-]+/assets/[\w/-]+\.(css|js)(?:\?.*)?$",
    // 核心资源路径
    r"/admin/assets/[\w/-]+\.(css|js)(?:\?.*)?$",
    r"/var/[\w/-]+\.(css|js)(?:\?.*)?$",
    // 特殊文件
    r"/install\.php(?:\?.*)?$",
    r"/xmlrpc\.php(?:\?.*)?$",
    r"/action/[\w-]+(?:\?.*)?$",
];

pub static RESOURCE_PATH_PATTERNS: Lazy<PatternSet> =
    Lazy::new(|| builtin("resource_path", RESOURCE_PATH_SOURCES));

/// 内联 style 中的 background-image: url(...) 提取
pub static BACKGROUND_URL_REGEX: Lazy<Regex> =
    Lazy::new(|| builtin_single("background_url", r#"url\(['"]?(.*?)['"]?\)"#));

// ======================== DOM 结构 ========================

/// Typecho 后台/登录页特有的结构选择器
pub const STRUCTURE_SELECTORS: &[&str] = &[
    r#"form[action*="action/login"] input[name="referer"]"#,
    "div.typecho-login",
    "div.typecho-page-title",
    "ul.typecho-option-list",
    "div.typecho-foot",
    "div#typecho-navbar",
    "div.typecho-header",
    "div.typecho-nav-list",
];

// ======================== Cookie ========================

pub const TYPECHO_COOKIE_MARKER: &str = "__typecho_";

// ======================== API 端点 ========================

pub static XMLRPC_REGEX: Lazy<Regex> =
    Lazy::new(|| builtin_single("xmlrpc", r"/xmlrpc\.php(?:\?.*)?$"));

pub static ACTION_REGEX: Lazy<Regex> =
    Lazy::new(|| builtin_single("action", r"/action/[\w-]+(?:\?.*)?$"));

pub static ACTION_JSON_REGEX: Lazy<Regex> =
    Lazy::new(|| builtin_single("action_json", r"/action/[\w-]+\.json(?:\?.*)?$"));

/// 内联脚本中的 AJAX 痕迹：typecho_ajax 令牌，或 `.action = '...typecho...'` 赋值
pub static INLINE_AJAX_PATTERNS: Lazy<PatternSet> = Lazy::new(|| {
    builtin(
        "inline_ajax",
        &[r"typecho_ajax", r#"\.action\s*=\s*['"][^'"]*typecho"#],
    )
});

/// 页面执行环境中的全局对象名
pub const TYPECHO_GLOBAL_NAMES: &[&str] = &["typecho", "Typecho"];

// ======================== RSS ========================

pub const FEED_MIME_TYPES: &[&str] = &[
    "application/rss+xml",
    "application/rdf+xml",
    "application/atom+xml",
];

pub static FEED_PATH_REGEX: Lazy<Regex> =
    Lazy::new(|| builtin_single("feed_path", r"/feed(?:/|/rss|/atom)?/?$"));

// ======================== Meta ========================

pub const GENERATOR_META_NAME: &str = "generator";
pub const FRAMEWORK_META_NAME: &str = "framework";

pub static GENERATOR_REGEX: Lazy<Regex> =
    Lazy::new(|| builtin_single("generator", r"Typecho\s*\d+\.\d+(\.\d+)?"));

/// TTDF 版本号，允许下划线后缀（如 1.2.3_beta）
pub static FRAMEWORK_REGEX: Lazy<Regex> =
    Lazy::new(|| builtin_single("framework", r"^TTDF\s+([\d.]+(?:_\w+)?)$"));
