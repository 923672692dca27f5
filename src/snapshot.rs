//! 文档快照：分类器的唯一输入
//! 由宿主预先物化（或经 HtmlExtractor 从 HTML 提取），分类过程中只读

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

/// 资源引用来源
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ResourceKind {
    /// link[href]
    Link,
    /// script[src]
    Script,
    /// img[src]
    Image,
    /// style 中的 background-image: url(...)
    Background,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceRef {
    pub kind: ResourceKind,
    pub url: String,
}

/// 端点引用来源（link / script / a / form）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EndpointTag {
    Link,
    Script,
    Anchor,
    Form,
}

/// 元素的 href / src / action（按此优先级取第一个非空值）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EndpointRef {
    pub tag: EndpointTag,
    pub url: String,
}

/// link[rel="alternate"] 的原始属性
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlternateLink {
    #[serde(rename = "type")]
    pub link_type: Option<String>,
    pub href: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DocumentSnapshot {
    /// (name 小写, content)，文档顺序
    pub meta_tags: Vec<(String, String)>,
    /// 资源引用：先 link/script/img，再 background-image，扫描顺序
    pub resources: Vec<ResourceRef>,
    pub endpoints: Vec<EndpointRef>,
    /// 无 src 的内联脚本文本
    pub inline_scripts: Vec<String>,
    /// 至少命中一个节点的结构选择器
    pub structure_hits: FxHashSet<String>,
    pub cookie: Option<String>,
    pub alternate_links: Vec<AlternateLink>,
    /// 页面执行环境中已定义的全局名
    pub declared_globals: FxHashSet<String>,
}

impl DocumentSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    /// 第一个同名 meta 的 content（name 忽略大小写）
    pub fn meta_content(&self, name: &str) -> Option<&str> {
        self.meta_tags
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, c)| c.as_str())
    }

    pub fn resource_urls(&self) -> impl Iterator<Item = &str> {
        self.resources.iter().map(|r| r.url.as_str())
    }

    pub fn script_srcs(&self) -> impl Iterator<Item = &str> {
        self.resources
            .iter()
            .filter(|r| r.kind == ResourceKind::Script)
            .map(|r| r.url.as_str())
    }

    pub fn endpoint_urls(&self) -> impl Iterator<Item = &str> {
        self.endpoints.iter().map(|e| e.url.as_str())
    }

    /// 非空内联脚本
    pub fn inline_script_texts(&self) -> impl Iterator<Item = &str> {
        self.inline_scripts
            .iter()
            .map(String::as_str)
            .filter(|s| !s.is_empty())
    }

    pub fn matches_selector(&self, selector: &str) -> bool {
        self.structure_hits.contains(selector)
    }

    /// 缺失的 cookie 视为空串
    pub fn cookie_str(&self) -> &str {
        self.cookie.as_deref().unwrap_or("")
    }

    // ---------- 宿主侧构造辅助 ----------

    pub fn with_meta(mut self, name: &str, content: impl Into<String>) -> Self {
        self.meta_tags.push((name.to_ascii_lowercase(), content.into()));
        self
    }

    pub fn with_resource(mut self, kind: ResourceKind, url: impl Into<String>) -> Self {
        self.resources.push(ResourceRef { kind, url: url.into() });
        self
    }

    pub fn with_endpoint(mut self, tag: EndpointTag, url: impl Into<String>) -> Self {
        self.endpoints.push(EndpointRef { tag, url: url.into() });
        self
    }

    pub fn with_inline_script(mut self, text: impl Into<String>) -> Self {
        self.inline_scripts.push(text.into());
        self
    }

    pub fn with_structure_hit(mut self, selector: impl Into<String>) -> Self {
        self.structure_hits.insert(selector.into());
        self
    }

    pub fn with_cookie(mut self, cookie: impl Into<String>) -> Self {
        self.cookie = Some(cookie.into());
        self
    }

    pub fn with_alternate_link(mut self, link_type: Option<&str>, href: Option<&str>) -> Self {
        self.alternate_links.push(AlternateLink {
            link_type: link_type.map(str::to_string),
            href: href.map(str::to_string),
        });
        self
    }

    pub fn with_global(mut self, name: impl Into<String>) -> Self {
        self.declared_globals.insert(name.into());
        self
    }
}

/// 注入能力：判断页面执行环境中某个全局名是否已定义
/// 分类器不直接访问任何运行环境，由宿主提供该判断
pub trait GlobalProbe {
    fn is_defined(&self, name: &str) -> bool;
}

impl<F> GlobalProbe for F
where
    F: Fn(&str) -> bool,
{
    fn is_defined(&self, name: &str) -> bool {
        self(name)
    }
}

/// 静态 HTML 场景：无法观察运行环境，一律视为未定义
#[derive(Debug, Clone, Copy, Default)]
pub struct NoGlobals;

impl GlobalProbe for NoGlobals {
    fn is_defined(&self, _name: &str) -> bool {
        false
    }
}

/// 快照自带的已声明全局名
impl GlobalProbe for DocumentSnapshot {
    fn is_defined(&self, name: &str) -> bool {
        self.declared_globals.contains(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_meta_first_wins() {
        let snapshot = DocumentSnapshot::new()
            .with_meta("Generator", "Typecho 1.2.1")
            .with_meta("generator", "Other");
        assert_eq!(snapshot.meta_content("generator"), Some("Typecho 1.2.1"));
        assert_eq!(snapshot.meta_content("framework"), None);
    }

    #[test]
    fn test_missing_fields_are_empty() {
        let snapshot = DocumentSnapshot::new().with_inline_script("");
        assert_eq!(snapshot.cookie_str(), "");
        assert_eq!(snapshot.inline_script_texts().count(), 0);
        assert!(!snapshot.matches_selector("div.typecho-login"));
    }

    #[test]
    fn test_global_probes() {
        let snapshot = DocumentSnapshot::new().with_global("Typecho");
        assert!(snapshot.is_defined("Typecho"));
        assert!(!snapshot.is_defined("typecho"));
        assert!(!NoGlobals.is_defined("Typecho"));

        let closure = |name: &str| name == "typecho";
        assert!(closure.is_defined("typecho"));
    }

    #[test]
    fn test_deserialize_partial_snapshot() {
        let snapshot: DocumentSnapshot =
            serde_json::from_str(r#"{"cookie":"__typecho_uid=1","meta_tags":[["generator","Typecho 1.2"]]}"#)
                .unwrap();
        assert_eq!(snapshot.cookie_str(), "__typecho_uid=1");
        assert_eq!(snapshot.meta_content("generator"), Some("Typecho 1.2"));
        assert!(snapshot.resources.is_empty());
    }
}
