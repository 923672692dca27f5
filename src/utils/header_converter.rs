//! Header格式转换工具
//! 将 HTTP 响应 / 请求头中的 Cookie、Set-Cookie 归一为页面可见的 `name=value; ...` 串
use http::header::{HeaderMap, COOKIE, SET_COOKIE};
use log::warn;

/// 单次转换最多处理的 Header 条数
const MAX_HEADER_ITER: usize = 1000;

/// Header转换工具
pub struct HeaderConverter;

impl HeaderConverter {
    /// 提取全部 cookie 键值对，保持 Header 出现顺序
    /// Set-Cookie 只取首段 name=value，值为 deleted 的条目忽略
    /// 非 ASCII 字节按 UTF-8 有损解码，单个畸形值不影响其余 Header
    pub fn cookie_pairs(headers: &HeaderMap) -> Vec<(String, String)> {
        let mut pairs = Vec::new();
        let mut iter_count = 0;

        for (key, value) in headers.iter() {
            iter_count += 1;
            if iter_count > MAX_HEADER_ITER {
                warn!("Header迭代超过{}次，强制终止", MAX_HEADER_ITER);
                break;
            }

            if key == SET_COOKIE {
                Self::parse_set_cookie(&String::from_utf8_lossy(value.as_bytes()), &mut pairs);
            } else if key == COOKIE {
                Self::parse_request_cookie(&String::from_utf8_lossy(value.as_bytes()), &mut pairs);
            }
        }

        pairs
    }

    /// 拼接为 document.cookie 形式的字符串；无 cookie 时返回空串
    pub fn to_cookie_string(headers: &HeaderMap) -> String {
        Self::cookie_pairs(headers)
            .iter()
            .map(|(name, value)| format!("{}={}", name, value))
            .collect::<Vec<_>>()
            .join("; ")
    }

    // 快速解析Set-Cookie，极简过滤deleted Cookie
    fn parse_set_cookie(raw_cookie: &str, pairs: &mut Vec<(String, String)>) {
        let mut segments = raw_cookie.split(';').map(str::trim).filter(|s| !s.is_empty());
        let Some(core_kv) = segments.next() else { return; };

        if let Some((name, value)) = Self::split_kv(core_kv) {
            pairs.push((name.to_string(), value.to_string()));
        }
    }

    // 快速解析Request-Cookie
    fn parse_request_cookie(raw_cookie: &str, pairs: &mut Vec<(String, String)>) {
        for core_kv in raw_cookie.split(';').map(str::trim).filter(|s| !s.is_empty()) {
            if let Some((name, value)) = Self::split_kv(core_kv) {
                pairs.push((name.to_string(), value.to_string()));
            }
        }
    }

    // Cookie名不能为空，值不能是deleted
    fn split_kv(core_kv: &str) -> Option<(&str, &str)> {
        let (name, value) = core_kv.split_once('=')?;
        let (name, value) = (name.trim(), value.trim());
        if name.is_empty() || value.eq_ignore_ascii_case("deleted") {
            return None;
        }
        Some((name, value))
    }
}
