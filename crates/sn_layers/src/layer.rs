// crates/sn_layers/src/layer.rs

//! 图层容器
//!
//! 外围应用按固定名称上传图层；引擎以只读快照方式消费。
//! 缺失的图层不是错误——对应的记录集合为空即可。

use crate::geojson::FeatureCollection;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// 检查井/雨水口图层名
pub const LAYER_CATCH_BASINS: &str = "Catch Basins / Manholes";
/// 管道图层名
pub const LAYER_PIPES: &str = "Pipes";
/// 排水分区图层名
pub const LAYER_DRAINAGE_AREAS: &str = "Drainage Areas";

/// 字段映射：规范键 -> 源属性名
pub type FieldMap = HashMap<String, String>;

/// 单个图层快照
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LayerData {
    /// 图层名（上述常量之一）
    pub name: String,
    /// 要素集合
    pub geojson: FeatureCollection,
    /// 可选字段映射
    #[serde(default)]
    pub field_map: Option<FieldMap>,
}

impl LayerData {
    /// 创建图层
    #[must_use]
    pub fn new(name: impl Into<String>, geojson: FeatureCollection) -> Self {
        Self {
            name: name.into(),
            geojson,
            field_map: None,
        }
    }

    /// 附加字段映射
    #[must_use]
    pub fn with_field_map(mut self, field_map: FieldMap) -> Self {
        self.field_map = Some(field_map);
        self
    }
}

/// 图层集合
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LayerSet {
    /// 图层列表
    pub layers: Vec<LayerData>,
}

impl LayerSet {
    /// 创建图层集合
    #[must_use]
    pub fn new(layers: Vec<LayerData>) -> Self {
        Self { layers }
    }

    /// 按名称查找图层
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&LayerData> {
        self.layers.iter().find(|l| l.name == name)
    }

    /// 追加图层
    pub fn push(&mut self, layer: LayerData) {
        self.layers.push(layer);
    }
}

// ============================================================================
// 测试
// ============================================================================
