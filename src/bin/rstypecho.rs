//! rstypecho 命令行入口
//! 从文件或标准输入读取 HTML，输出 Typecho / TTDF 识别报告或 JSON 结果
//!
//! 运行命令：
//! cargo run --features cli -- page.html --url https://blog.example.com/
//! curl -s https://blog.example.com/ | cargo run --features cli -- --json

use std::error::Error;
use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;

use clap::Parser;
use env_logger::{Builder, Env};
use log::info;
use rstypecho::{render_report, ConfigManager, DetectionResponse, TypechoDetector};

#[derive(Parser, Debug)]
#[command(name = "rstypecho", version, about = "识别页面是否由 Typecho 构建（含 TTDF 主题框架）")]
struct Cli {
    /// HTML 文件路径，缺省或为 - 时读取标准输入
    input: Option<PathBuf>,

    /// 页面地址，用于解析相对链接
    #[arg(long)]
    url: Option<String>,

    /// 页面可见的 cookie 串
    #[arg(long)]
    cookie: Option<String>,

    /// 页面执行环境中已定义的全局名，可重复
    #[arg(long = "global", value_name = "NAME")]
    globals: Vec<String>,

    /// HTML 最大读取长度（字节）
    #[arg(long, value_name = "BYTES")]
    max_len: Option<usize>,

    /// 输出 JSON 结果
    #[arg(long)]
    json: bool,
}

fn read_input(input: Option<&PathBuf>) -> io::Result<String> {
    match input {
        Some(path) if path.as_os_str() != "-" => {
            let bytes = fs::read(path)?;
            Ok(String::from_utf8_lossy(&bytes).into_owned())
        }
        _ => {
            let mut bytes = Vec::new();
            io::stdin().read_to_end(&mut bytes)?;
            Ok(String::from_utf8_lossy(&bytes).into_owned())
        }
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    Builder::from_env(Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    let mut builder = ConfigManager::custom().globals(cli.globals);
    if let Some(url) = cli.url {
        builder = builder.page_url(url);
    }
    if let Some(cookie) = cli.cookie {
        builder = builder.cookie(cookie);
    }
    if let Some(max_len) = cli.max_len {
        builder = builder.max_html_len(max_len);
    }
    let config = builder.build()?;

    let html = read_input(cli.input.as_ref())?;
    info!("读取 HTML {} 字节", html.len());

    let result = TypechoDetector::new().detect_html(&html, &config);

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        println!("{}", render_report(&DetectionResponse::Ready(result)));
    }
    Ok(())
}
