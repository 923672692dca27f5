//! 全局错误类型定义
//! 分类器本身是全函数（缺失字段视为负面证据），错误只出现在配置、输入转换与宿主边界
use thiserror::Error;
use regex::Error as RegexError;
use url::ParseError as UrlParseError;

#[derive(Error, Debug)]
pub enum RstypechoError {
    // 规则相关错误
    #[error("正则编译失败：{0}")]
    RegexCompileError(#[from] RegexError),
    #[error("规则集为空：{0}")]
    EmptyPatternSet(String),

    // 输入相关错误
    #[error("无效输入：{0}")]
    InvalidInput(String),
    #[error("URL解析失败：{0}")]
    UrlError(#[from] UrlParseError),

    // 宿主边界错误：目标文档不可达，不得当作“未检测到”处理
    #[error("文档不可用: {0}")]
    DocumentUnavailable(String),
}

// 全局Result类型
pub type RstResult<T> = Result<T, RstypechoError>;
