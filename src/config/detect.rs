//! 快照提取配置管理

use url::Url;

use crate::error::{RstResult, RstypechoError};
use crate::utils::extractor::HtmlInputGuard;

/// HTML 默认最大长度（2MB）
pub const DEFAULT_MAX_HTML_LEN: usize = HtmlInputGuard::MAX_HTML_LEN;

/// 快照提取配置
#[derive(Debug, Clone)]
pub struct SnapshotConfig {
    // 页面地址，用于解析相对 href/src/action
    pub page_url: Option<Url>,
    // 超出部分在 UTF-8 边界截断
    pub max_html_len: usize,
    // 页面可见的 cookie 串
    pub cookie: Option<String>,
    // 执行环境中已定义的全局名
    pub declared_globals: Vec<String>,
}

impl Default for SnapshotConfig {
    fn default() -> Self {
        Self {
            page_url: None,
            max_html_len: DEFAULT_MAX_HTML_LEN,
            cookie: None,
            declared_globals: Vec::new(),
        }
    }
}

/// 配置管理器
pub struct ConfigManager;

impl ConfigManager {
    /// 获取默认配置
    pub fn get_default() -> SnapshotConfig {
        SnapshotConfig::default()
    }

    /// 自定义配置
    pub fn custom() -> CustomConfigBuilder {
        CustomConfigBuilder::new()
    }
}

/// 配置构建器
/// 页面地址延迟到 build 时解析，保持链式调用
#[derive(Debug, Clone, Default)]
pub struct CustomConfigBuilder {
    config: SnapshotConfig,
    page_url: Option<String>,
}

impl CustomConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn page_url(mut self, url: impl Into<String>) -> Self {
        self.page_url = Some(url.into());
        self
    }

    pub fn max_html_len(mut self, len: usize) -> Self {
        self.config.max_html_len = len;
        self
    }

    pub fn cookie(mut self, cookie: impl Into<String>) -> Self {
        self.config.cookie = Some(cookie.into());
        self
    }

    pub fn global(mut self, name: impl Into<String>) -> Self {
        self.config.declared_globals.push(name.into());
        self
    }

    pub fn globals<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.config
            .declared_globals
            .extend(names.into_iter().map(Into::into));
        self
    }

    pub fn build(self) -> RstResult<SnapshotConfig> {
        let mut config = self.config;
        if config.max_html_len == 0 {
            return Err(RstypechoError::InvalidInput(
                "max_html_len 必须大于 0".to_string(),
            ));
        }
        if let Some(raw) = self.page_url {
            config.page_url = Some(Url::parse(raw.trim())?);
        }
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ConfigManager::get_default();
        assert!(config.page_url.is_none());
        assert_eq!(config.max_html_len, 2 * 1024 * 1024);
        assert!(config.cookie.is_none());
        assert!(config.declared_globals.is_empty());
    }

    #[test]
    fn test_builder_chain() {
        let config = ConfigManager::custom()
            .page_url("https://blog.example.com/archives/1/")
            .max_html_len(4096)
            .cookie("__typecho_uid=1")
            .global("Typecho")
            .globals(["jQuery", "$"])
            .build()
            .unwrap();

        assert_eq!(
            config.page_url.as_ref().map(Url::as_str),
            Some("https://blog.example.com/archives/1/")
        );
        assert_eq!(config.max_html_len, 4096);
        assert_eq!(config.cookie.as_deref(), Some("__typecho_uid=1"));
        assert_eq!(config.declared_globals, vec!["Typecho", "jQuery", "$"]);
    }

    #[test]
    fn test_builder_errors() {
        assert!(matches!(
            ConfigManager::custom().page_url("not a url").build(),
            Err(RstypechoError::UrlError(_))
        ));
        assert!(matches!(
            ConfigManager::custom().max_html_len(0).build(),
            Err(RstypechoError::InvalidInput(_))
        ));
    }
}
