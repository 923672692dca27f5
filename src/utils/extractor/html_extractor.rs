//! HTML 快照提取器
//! 单次流式解析 HTML，物化分类所需的全部文档特征：
//! meta、资源引用、端点、内联脚本、结构选择器命中、订阅链接
use std::cell::RefCell;

use lol_html::{element, text, HtmlRewriter, Settings};
use log::{debug, warn};
use url::Url;

use crate::config::SnapshotConfig;
use crate::rule::patterns::{BACKGROUND_URL_REGEX, STRUCTURE_SELECTORS};
use crate::snapshot::{
    AlternateLink, DocumentSnapshot, EndpointRef, EndpointTag, ResourceKind, ResourceRef,
};
use crate::utils::extractor::html_input_guard::HtmlInputGuard;
use crate::utils::log_format::preview_compact;

/// 资源引用来源：(选择器, 类型, 属性)
const RESOURCE_SOURCES: [(&str, ResourceKind, &str); 3] = [
    ("link[href]", ResourceKind::Link, "href"),
    ("script[src]", ResourceKind::Script, "src"),
    ("img[src]", ResourceKind::Image, "src"),
];

/// 端点来源：(选择器, 标签, 属性)，form 单独处理
const ENDPOINT_SOURCES: [(&str, EndpointTag, &str); 3] = [
    ("link", EndpointTag::Link, "href"),
    ("script", EndpointTag::Script, "src"),
    ("a", EndpointTag::Anchor, "href"),
];

/// 解析过程中的中间状态
/// 带 background-image 的元素单独收集，最后追加到资源列表末尾（与扫描顺序一致）
#[derive(Debug, Default)]
struct Collector {
    snapshot: DocumentSnapshot,
    backgrounds: Vec<ResourceRef>,
}

impl Collector {
    fn push_resource(&mut self, kind: ResourceKind, url: String) {
        self.snapshot.resources.push(ResourceRef { kind, url });
    }

    fn push_endpoint(&mut self, tag: EndpointTag, url: String) {
        if !url.is_empty() {
            self.snapshot.endpoints.push(EndpointRef { tag, url });
        }
    }

    fn finish(mut self) -> DocumentSnapshot {
        self.snapshot.resources.append(&mut self.backgrounds);
        self.snapshot
    }
}

/// 对外暴露的 HTML 提取器
#[derive(Debug, Default)]
pub struct HtmlExtractor;

impl HtmlExtractor {
    pub fn new() -> Self {
        Self::default()
    }

    /// 提取文档快照
    /// 输入为空或解析中途失败时返回已收集的部分（缺失字段即负面证据）
    pub fn extract(html: &str, config: &SnapshotConfig) -> DocumentSnapshot {
        let mut snapshot = match HtmlInputGuard::guard(html, config.max_html_len) {
            Some(html) => Self::parse(html, config.page_url.as_ref()),
            None => {
                debug!("[Extractor] 空 HTML 输入，跳过解析");
                DocumentSnapshot::default()
            }
        };

        snapshot.cookie = config.cookie.clone();
        snapshot
            .declared_globals
            .extend(config.declared_globals.iter().cloned());
        snapshot
    }

    fn parse(html: &str, base: Option<&Url>) -> DocumentSnapshot {
        let collector = RefCell::new(Collector::default());
        let c = &collector;

        let mut handlers = vec![
            // <meta name content>：只保留首个同名项的语义由快照查询保证
            element!("meta[name]", move |el| {
                let name = el.get_attribute("name").unwrap_or_default();
                let content = el.get_attribute("content").unwrap_or_default();
                c.borrow_mut()
                    .snapshot
                    .meta_tags
                    .push((name.to_ascii_lowercase(), content));
                Ok(())
            }),
            // 行内背景图：元素自身的 href/src 优先（仅限带该属性语义的标签），其次解析 style 中的 url(...)
            element!(r#"*[style*="background-image"]"#, move |el| {
                let url = match own_url_attr(&el.tag_name())
                    .and_then(|attr| el.get_attribute(attr))
                    .filter(|raw| !raw.trim().is_empty())
                {
                    Some(raw) => Some(resolve(base, &raw)),
                    None => el
                        .get_attribute("style")
                        .as_deref()
                        .and_then(background_image_url),
                };
                if let Some(url) = url {
                    c.borrow_mut().backgrounds.push(ResourceRef {
                        kind: ResourceKind::Background,
                        url,
                    });
                }
                Ok(())
            }),
            // 无 action 的表单提交到当前页
            element!("form", move |el| {
                let action = el
                    .get_attribute("action")
                    .filter(|raw| !raw.trim().is_empty())
                    .map(|raw| resolve(base, &raw))
                    .or_else(|| base.map(|b| b.as_str().to_string()));
                if let Some(url) = action {
                    c.borrow_mut().push_endpoint(EndpointTag::Form, url);
                }
                Ok(())
            }),
            // 内联脚本：元素开始时占位，文本分块追加
            element!("script:not([src])", move |_el| {
                c.borrow_mut().snapshot.inline_scripts.push(String::new());
                Ok(())
            }),
            text!("script:not([src])", move |t| {
                if let Some(current) = c.borrow_mut().snapshot.inline_scripts.last_mut() {
                    current.push_str(t.as_str());
                }
                Ok(())
            }),
            // 订阅链接：保留原始属性
            element!(r#"link[rel="alternate"]"#, move |el| {
                c.borrow_mut().snapshot.alternate_links.push(AlternateLink {
                    link_type: el.get_attribute("type"),
                    href: el.get_attribute("href"),
                });
                Ok(())
            }),
        ];

        // 资源引用：link[href] / script[src] / img[src]，各元素按文档顺序触发
        handlers.extend(RESOURCE_SOURCES.iter().map(|&(selector, kind, attr)| {
            element!(selector, move |el| {
                if let Some(raw) = el.get_attribute(attr) {
                    c.borrow_mut().push_resource(kind, resolve(base, &raw));
                }
                Ok(())
            })
        }));

        // 端点：link/script/a 取 href 或 src，空值忽略
        handlers.extend(ENDPOINT_SOURCES.iter().map(|&(selector, tag, attr)| {
            element!(selector, move |el| {
                if let Some(raw) = el.get_attribute(attr) {
                    c.borrow_mut().push_endpoint(tag, resolve(base, &raw));
                }
                Ok(())
            })
        }));

        // 结构选择器：命中任意节点即记录
        handlers.extend(STRUCTURE_SELECTORS.iter().map(|&selector| {
            element!(selector, move |_el| {
                c.borrow_mut()
                    .snapshot
                    .structure_hits
                    .insert(selector.to_string());
                Ok(())
            })
        }));

        let settings = Settings {
            strict: false, // 兼容畸形HTML/大小写标签/残缺标签
            element_content_handlers: handlers,
            ..Settings::default()
        };

        // 只提取不修改，输出直接丢弃
        let outcome = {
            let mut rewriter = HtmlRewriter::new(settings, |_: &[u8]| {});
            match rewriter.write(html.as_bytes()) {
                Ok(()) => rewriter.end(),
                Err(e) => Err(e),
            }
        };
        if let Err(e) = outcome {
            warn!(
                "[Extractor] HTML 解析中断，使用已收集的部分结果 | 错误: {} | 输入: {}",
                e,
                preview_compact(html, 80)
            );
        }

        collector.into_inner().finish()
    }
}

/// 按页面地址解析相对引用；无页面地址或解析失败时保留原值
fn resolve(base: Option<&Url>, raw: &str) -> String {
    let raw = raw.trim();
    match base {
        Some(base) => base
            .join(raw)
            .map(String::from)
            .unwrap_or_else(|_| raw.to_string()),
        None => raw.to_string(),
    }
}

/// 标签自带的链接属性：a/link/area 用 href，可嵌入资源的标签用 src，其余标签没有
fn own_url_attr(tag: &str) -> Option<&'static str> {
    match tag.to_ascii_lowercase().as_str() {
        "a" | "link" | "area" => Some("href"),
        "img" | "script" | "iframe" | "embed" | "video" | "audio" | "source" | "input"
        | "track" => Some("src"),
        _ => None,
    }
}

/// 取出 style 中 background-image 声明的 url(...) 内容
fn background_image_url(style: &str) -> Option<String> {
    let lower = style.to_ascii_lowercase();
    let start = lower.find("background-image")?;
    let declaration = style[start..].split(';').next().unwrap_or_default();
    BACKGROUND_URL_REGEX
        .captures(declaration)
        .and_then(|cap| cap.get(1))
        .map(|m| m.as_str().to_string())
        .filter(|url| !url.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConfigManager;

    const SAMPLE: &str = r#"<!DOCTYPE html>
<html>
<head>
    <meta charset="utf-8">
    <meta NAME="Generator" content="Typecho 1.2.1">
    <meta name="framework" content="TTDF 2.0">
    <link rel="stylesheet" href="/usr/themes/Joe/style.css">
    <link rel="alternate" type="application/rss+xml" href="/feed/">
    <script src="/usr/plugins/Like/plugin.js"></script>
    <script>var a = 1;</script>
</head>
<body>
    <section style="background-image: url('/usr/themes/Joe/assets/img/bg.css'); color: red"></section>
    <img src="/logo.png">
    <a href="/index.php/action/logout">logout</a>
    <a>no href</a>
    <form method="post"></form>
</body>
</html>"#;

    #[test]
    fn test_extract_sample() {
        let snapshot = HtmlExtractor::extract(SAMPLE, &SnapshotConfig::default());

        assert_eq!(snapshot.meta_content("generator"), Some("Typecho 1.2.1"));
        assert_eq!(snapshot.meta_content("framework"), Some("TTDF 2.0"));

        let resources: Vec<(ResourceKind, &str)> = snapshot
            .resources
            .iter()
            .map(|r| (r.kind, r.url.as_str()))
            .collect();
        assert_eq!(
            resources,
            vec![
                (ResourceKind::Link, "/usr/themes/Joe/style.css"),
                (ResourceKind::Link, "/feed/"),
                (ResourceKind::Script, "/usr/plugins/Like/plugin.js"),
                (ResourceKind::Image, "/logo.png"),
                (ResourceKind::Background, "/usr/themes/Joe/assets/img/bg.css"),
            ]
        );

        assert_eq!(snapshot.inline_scripts, vec!["var a = 1;".to_string()]);
        assert_eq!(
            snapshot.alternate_links,
            vec![AlternateLink {
                link_type: Some("application/rss+xml".into()),
                href: Some("/feed/".into()),
            }]
        );
        // 无页面地址时，无 action 的表单与无 href 的链接都不产生端点
        assert_eq!(
            snapshot.endpoint_urls().collect::<Vec<_>>(),
            vec![
                "/usr/themes/Joe/style.css",
                "/feed/",
                "/usr/plugins/Like/plugin.js",
                "/index.php/action/logout",
            ]
        );
        assert!(snapshot.structure_hits.is_empty());
        assert!(snapshot.cookie.is_none());
    }

    #[test]
    fn test_resolve_against_page_url() {
        let config = ConfigManager::custom()
            .page_url("https://blog.example.com/archives/12/")
            .build()
            .unwrap();
        let snapshot = HtmlExtractor::extract(SAMPLE, &config);

        assert_eq!(
            snapshot.script_srcs().collect::<Vec<_>>(),
            vec!["https://blog.example.com/usr/plugins/Like/plugin.js"]
        );
        let form = snapshot
            .endpoints
            .iter()
            .find(|e| e.tag == EndpointTag::Form)
            .map(|e| e.url.as_str());
        assert_eq!(form, Some("https://blog.example.com/archives/12/"));
        // 订阅链接保留原始属性
        assert_eq!(snapshot.alternate_links[0].href.as_deref(), Some("/feed/"));
    }

    #[test]
    fn test_structure_hits() {
        let html = r#"<html><body>
            <div class="typecho-login">
                <form action="/index.php/action/login?_=abc" method="post">
                    <input type="hidden" name="referer" value="/admin/">
                </form>
            </div>
            <ul class="typecho-option-list"><li>x</li></ul>
            <div class="typecho-foot-note"></div>
        </body></html>"#;
        let snapshot = HtmlExtractor::extract(html, &SnapshotConfig::default());

        assert!(snapshot.matches_selector("div.typecho-login"));
        assert!(snapshot.matches_selector("ul.typecho-option-list"));
        assert!(snapshot.matches_selector(STRUCTURE_SELECTORS[0]));
        assert!(!snapshot.matches_selector("div.typecho-foot"));
        assert_eq!(snapshot.structure_hits.len(), 3);
    }

    #[test]
    fn test_broken_html_and_config_passthrough() {
        let html = r#"<HTML><HEAD><SCRIPT SRC="/usr/themes/a/main.js"><META NAME="generator" CONTENT="Typecho 1.1"><script>typecho_ajax()"#;
        let config = ConfigManager::custom()
            .cookie("__typecho_uid=1")
            .global("Typecho")
            .build()
            .unwrap();
        let snapshot = HtmlExtractor::extract(html, &config);

        assert_eq!(snapshot.script_srcs().collect::<Vec<_>>(), vec!["/usr/themes/a/main.js"]);
        assert_eq!(snapshot.cookie_str(), "__typecho_uid=1");
        assert!(snapshot.declared_globals.contains("Typecho"));
    }

    #[test]
    fn test_empty_input_keeps_config() {
        let config = ConfigManager::custom().cookie("a=1").build().unwrap();
        let snapshot = HtmlExtractor::extract("   ", &config);
        assert!(snapshot.resources.is_empty());
        assert!(snapshot.meta_tags.is_empty());
        assert_eq!(snapshot.cookie_str(), "a=1");
    }

    #[test]
    fn test_background_own_url_by_tag() {
        let html = r#"<html><body>
            <div src="/usr/themes/x/main.js" style="background-image:url('/a/bg.png')"></div>
            <a href="/usr/themes/Joe/style.css" style="background-image:url('/a/other.png')">x</a>
            <img src="" style="background-image:url('/a/empty.png')">
        </body></html>"#;
        let snapshot = HtmlExtractor::extract(html, &SnapshotConfig::default());

        let backgrounds: Vec<&str> = snapshot
            .resources
            .iter()
            .filter(|r| r.kind == ResourceKind::Background)
            .map(|r| r.url.as_str())
            .collect();
        assert_eq!(
            backgrounds,
            vec!["/a/bg.png", "/usr/themes/Joe/style.css", "/a/empty.png"]
        );
    }

    #[test]
    fn test_own_url_attr() {
        assert_eq!(own_url_attr("A"), Some("href"));
        assert_eq!(own_url_attr("img"), Some("src"));
        assert_eq!(own_url_attr("div"), None);
        assert_eq!(own_url_attr("section"), None);
    }

    #[test]
    fn test_background_image_url() {
        assert_eq!(
            background_image_url(r#"background-image: url("/a/b.png")"#).as_deref(),
            Some("/a/b.png")
        );
        assert_eq!(
            background_image_url("color:red;Background-Image:url(/a.css);width:1px").as_deref(),
            Some("/a.css")
        );
        assert_eq!(background_image_url("background-image: none"), None);
        assert_eq!(background_image_url("color: red"), None);
    }
}
