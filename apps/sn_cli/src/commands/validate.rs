// stormnet\apps\sn_cli\src\commands/validate.rs

//! 图层校验命令
//!
//! 跑一遍完整合成但不写文件，把导出日志打到终端。
//! 用于上传数据的预检：哪些环会被修复、哪些要素会被丢弃。

use super::LayerPaths;
use anyhow::{bail, Result};
use clap::Args;
use sn_export::SwmmExporter;
use sn_foundation::LogLevel;
use sn_geo::projection::{IdentityProjection, LinearUnit};
use std::path::PathBuf;
use tracing::{error, info, warn};

/// 校验参数
#[derive(Args)]
pub struct ValidateArgs {
    /// 检查井/雨水口图层 (GeoJSON)
    #[arg(long)]
    pub catch_basins: Option<PathBuf>,

    /// 检查井字段映射
    #[arg(long)]
    pub catch_basins_map: Option<PathBuf>,

    /// 管道图层 (GeoJSON)
    #[arg(long)]
    pub pipes: Option<PathBuf>,

    /// 管道字段映射
    #[arg(long)]
    pub pipes_map: Option<PathBuf>,

    /// 排水分区图层 (GeoJSON)
    #[arg(long)]
    pub drainage_areas: Option<PathBuf>,

    /// 严格模式（有警告即失败）
    #[arg(long)]
    pub strict: bool,
}

/// 执行校验命令
pub fn execute(args: ValidateArgs) -> Result<()> {
    info!("=== StormNet 图层校验 ===");

    let layers = LayerPaths {
        catch_basins: args.catch_basins,
        catch_basins_map: args.catch_basins_map,
        pipes: args.pipes,
        pipes_map: args.pipes_map,
        drainage_areas: args.drainage_areas,
    }
    .load()?;

    // 校验用恒等投影跑合成：几何问题与投影选择无关
    let projector = IdentityProjection::new(LinearUnit::Feet);
    let output = SwmmExporter::new("validate").export(&layers, &projector)?;

    for entry in &output.log.entries {
        match entry.level {
            LogLevel::Info => info!("{}", entry.message),
            LogLevel::Warn => warn!("{}", entry.message),
            LogLevel::Error => error!("{}", entry.message),
        }
    }

    let warn_count = output.log.count(LogLevel::Warn);
    if output.log.has_errors() {
        bail!("校验失败: {} 条错误", output.log.count(LogLevel::Error));
    }
    if args.strict && warn_count > 0 {
        bail!("严格模式: {warn_count} 条警告");
    }

    info!("校验通过 ({warn_count} 条警告)");
    Ok(())
}
