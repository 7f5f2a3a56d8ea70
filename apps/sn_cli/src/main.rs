// stormnet\apps\sn_cli\src/main.rs

//! StormNet 命令行界面
//!
//! 把 GeoJSON 图层文件合成为 SWMM 输入文件的命令行工具。
//!
//! # 架构层级
//!
//! 本模块属于应用层：错误用 anyhow 聚合展示，
//! 引擎内部的 `SnError` 与导出日志在命令实现里转译。

mod commands;

use clap::{Parser, Subcommand};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

/// StormNet 管网导出命令行工具
#[derive(Parser)]
#[command(name = "sn_cli")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Stormwater network synthesis and SWMM export", long_about = None)]
struct Cli {
    /// 日志级别 (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "info")]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// 导出 SWMM 输入文件
    Export(commands::export::ExportArgs),
    /// 校验图层并报告合成日志，不写文件
    Validate(commands::validate::ValidateArgs),
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // 初始化日志
    let level = match cli.log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    // 执行命令
    match cli.command {
        Commands::Export(args) => commands::export::execute(args),
        Commands::Validate(args) => commands::validate::execute(args),
    }
}
