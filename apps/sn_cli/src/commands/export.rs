// stormnet\apps\sn_cli\src\commands/export.rs

//! 导出命令
//!
//! 读取图层文件，合成模型并写出 SWMM 输入文件。

use super::LayerPaths;
use anyhow::{Context, Result};
use clap::Args;
use sn_export::SwmmExporter;
use sn_foundation::LogLevel;
use sn_geo::projection::{IdentityProjection, LinearUnit, Projector, TransverseMercator};
use std::path::PathBuf;
use tracing::{error, info, warn};

/// 导出参数
#[derive(Args)]
pub struct ExportArgs {
    /// 检查井/雨水口图层 (GeoJSON)
    #[arg(long)]
    pub catch_basins: Option<PathBuf>,

    /// 检查井字段映射 (JSON: 规范键 -> 源属性名)
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

    /// 投影方式: identity (已投影数据) 或 utm
    #[arg(long, default_value = "identity")]
    pub projection: String,

    /// UTM 带号 (projection = utm 时必需)
    #[arg(long)]
    pub zone: Option<u8>,

    /// 南半球 UTM 带
    #[arg(long)]
    pub south: bool,

    /// 平面单位: feet 或 meters
    #[arg(long, default_value = "feet")]
    pub units: String,

    /// 模板文件（缺省用内置模板）
    #[arg(long)]
    pub template: Option<PathBuf>,

    /// 项目名（进入输出文件名）
    #[arg(long, default_value = "project")]
    pub project: String,

    /// 版本标记（进入输出文件名）
    #[arg(long, default_value = "v1")]
    pub version_tag: String,

    /// 输出目录
    #[arg(short, long, default_value = ".")]
    pub output: PathBuf,
}

/// 按参数构造投影器
pub fn build_projector(
    projection: &str,
    zone: Option<u8>,
    south: bool,
    units: &str,
) -> Result<Box<dyn Projector>> {
    let unit = match units.to_lowercase().as_str() {
        "meters" | "m" => LinearUnit::Meters,
        _ => LinearUnit::Feet,
    };

    match projection.to_lowercase().as_str() {
        "utm" => {
            let zone = zone.context("projection = utm 需要 --zone")?;
            let tm = TransverseMercator::utm(zone, !south);
            Ok(match unit {
                LinearUnit::Feet => Box::new(tm.with_feet()),
                LinearUnit::Meters => Box::new(tm),
            })
        }
        _ => Ok(Box::new(IdentityProjection::new(unit))),
    }
}

/// 执行导出命令
pub fn execute(args: ExportArgs) -> Result<()> {
    let layers = LayerPaths {
        catch_basins: args.catch_basins,
        catch_basins_map: args.catch_basins_map,
        pipes: args.pipes,
        pipes_map: args.pipes_map,
        drainage_areas: args.drainage_areas,
    }
    .load()?;

    let projector = build_projector(&args.projection, args.zone, args.south, &args.units)?;

    let mut exporter =
        SwmmExporter::new(args.version_tag.as_str()).project_name(args.project.as_str());
    if let Some(template_path) = &args.template {
        let text = std::fs::read_to_string(template_path)
            .with_context(|| format!("读取模板失败: {}", template_path.display()))?;
        exporter = exporter.template(text);
    }

    let output = exporter
        .export(&layers, projector.as_ref())
        .context("导出失败")?;

    // 软问题日志转发到终端
    for entry in &output.log.entries {
        match entry.level {
            LogLevel::Info => info!("{}", entry.message),
            LogLevel::Warn => warn!("{}", entry.message),
            LogLevel::Error => error!("{}", entry.message),
        }
    }

    let path = args.output.join(&output.filename);
    std::fs::write(&path, output.content.as_bytes())
        .with_context(|| format!("写出失败: {}", path.display()))?;

    info!("已写出 {}", path.display());
    Ok(())
}
