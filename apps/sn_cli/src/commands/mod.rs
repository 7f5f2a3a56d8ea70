// stormnet\apps\sn_cli\src\commands/mod.rs

//! 命令实现

pub mod export;
pub mod validate;

use anyhow::{Context, Result};
use sn_layers::{FieldMap, LayerData, LayerSet};
use std::path::{Path, PathBuf};

/// 读取一个图层：GeoJSON 文件 + 可选字段映射 JSON
pub fn load_layer(
    name: &str,
    geojson_path: &Path,
    field_map_path: Option<&PathBuf>,
) -> Result<LayerData> {
    let text = std::fs::read_to_string(geojson_path)
        .with_context(|| format!("读取图层文件失败: {}", geojson_path.display()))?;
    let geojson = sn_layers::FeatureCollection::from_json(&text)
        .with_context(|| format!("解析 GeoJSON 失败: {}", geojson_path.display()))?;

    let mut layer = LayerData::new(name, geojson);
    if let Some(map_path) = field_map_path {
        let map_text = std::fs::read_to_string(map_path)
            .with_context(|| format!("读取字段映射失败: {}", map_path.display()))?;
        let field_map: FieldMap = serde_json::from_str(&map_text)
            .with_context(|| format!("解析字段映射失败: {}", map_path.display()))?;
        layer = layer.with_field_map(field_map);
    }
    Ok(layer)
}

/// 图层路径参数组装图层集合
pub struct LayerPaths {
    /// 检查井图层
    pub catch_basins: Option<PathBuf>,
    /// 检查井字段映射
    pub catch_basins_map: Option<PathBuf>,
    /// 管道图层
    pub pipes: Option<PathBuf>,
    /// 管道字段映射
    pub pipes_map: Option<PathBuf>,
    /// 排水分区图层
    pub drainage_areas: Option<PathBuf>,
}

impl LayerPaths {
    /// 加载全部指定的图层
    pub fn load(&self) -> Result<LayerSet> {
        let mut set = LayerSet::default();
        if let Some(path) = &self.catch_basins {
            set.push(load_layer(
                sn_layers::LAYER_CATCH_BASINS,
                path,
                self.catch_basins_map.as_ref(),
            )?);
        }
        if let Some(path) = &self.pipes {
            set.push(load_layer(
                sn_layers::LAYER_PIPES,
                path,
                self.pipes_map.as_ref(),
            )?);
        }
        if let Some(path) = &self.drainage_areas {
            set.push(load_layer(sn_layers::LAYER_DRAINAGE_AREAS, path, None)?);
        }
        Ok(set)
    }
}
