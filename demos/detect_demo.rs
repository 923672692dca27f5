//! Typecho detection demonstration for rstypecho
//! rstypecho 指纹识别演示程序
//! 功能说明：
//! 1. 从内置样例页面提取文档快照
//! 2. 执行六维信号分类与 TTDF 识别
//! 3. 输出耗时统计、文本报告与结构化 JSON 结果
//!
//! 运行命令：
//! cargo run --example detect_demo

use std::error::Error;
use std::time::Instant;

use env_logger::{Builder, Env, Target};
use rstypecho::{
    render_report, ConfigManager, DetectionResponse, HtmlExtractor, TypechoDetector,
};
use serde_json::to_string_pretty;

const SAMPLE_PAGE: &str = r#"<!DOCTYPE html>
<html lang="zh-CN">
<head>
    <meta charset="UTF-8">
    <meta name="generator" content="Typecho 1.2.1" />
    <meta name="framework" content="TTDF 2.3.0_beta" />
    <title>示例博客</title>
    <link rel="stylesheet" href="/usr/themes/Joe/assets/css/joe-global.css?v=7.3.6">
    <link rel="alternate" type="application/rss+xml" title="RSS 2.0" href="/feed/" />
    <link rel="alternate" type="application/atom+xml" title="ATOM 1.0" href="/feed/atom/" />
    <link rel="EditURI" type="application/rsd+xml" title="RSD" href="/xmlrpc.php?rsd" />
    <script src="/usr/plugins/Meting/assets/js/Meting.js"></script>
</head>
<body>
    <header class="site-header" style="background-image: url('/usr/themes/Joe/assets/img/header.css')"></header>
    <article>Hello Typecho</article>
    <form id="comment-form" method="post" action="/archives/1/comment"></form>
    <script>window.Joe = { BASE_API: '/index.php/joe/api' };</script>
</body>
</html>"#;

fn main() -> Result<(), Box<dyn Error>> {
    // ========== 1. 日志系统初始化 ==========
    Builder::from_env(Env::default().default_filter_or("debug"))
        .target(Target::Stdout)
        .init();

    // ========== 2. 配置 ==========
    let config = ConfigManager::custom()
        .page_url("https://blog.example.com/archives/1/")
        .cookie("__typecho_lang=zh_CN; PHPSESSID=demo")
        .build()?;
    let detector = TypechoDetector::new();

    // ========== 3. 提取 + 分类（含耗时统计） ==========
    let start_instant = Instant::now();
    let snapshot = HtmlExtractor::extract(SAMPLE_PAGE, &config);
    let result = detector.classify(&snapshot);
    let duration_ms = start_instant.elapsed().as_secs_f64() * 1000.0;

    // ========== 4. 输出 ==========
    println!("\n======================================= 检测结果 =======================================");
    println!("✅ 识别完成 | 总耗时: {:.3} 毫秒", duration_ms);
    println!("========================================================================================");
    println!("{}", render_report(&DetectionResponse::Ready(result.clone())));

    let result_json = to_string_pretty(&result)?;
    println!("\n📊 检测结果（结构化JSON）:\n{}", result_json);

    Ok(())
}
