// crates/sn_layers/src/geojson.rs

//! GeoJSON 要素模型
//!
//! 引擎只消费五种几何：Point、LineString、MultiLineString、Polygon、
//! MultiPolygon。几何用带标签的枚举表达，合成器边界上显式穷举匹配，
//! 不支持的几何类型在解析阶段即报错。
//!
//! 属性是 `Map<String, Value>` 动态包——上传数据的属性表没有任何
//! 模式保证，缺失属性是常态，由 [`crate::fields`] 做规范化查找。

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use sn_foundation::{SnError, SnResult};

/// 经纬度坐标对 [lon, lat]
pub type Position = Vec<f64>;

/// 几何类型（带标签的和类型）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Geometry {
    /// 点
    Point {
        /// [lon, lat]
        coordinates: Position,
    },
    /// 折线
    LineString {
        /// 顶点序列
        coordinates: Vec<Position>,
    },
    /// 多折线
    MultiLineString {
        /// 折线集合
        coordinates: Vec<Vec<Position>>,
    },
    /// 多边形（首环为外环）
    Polygon {
        /// 环集合
        coordinates: Vec<Vec<Position>>,
    },
    /// 多多边形
    MultiPolygon {
        /// 多边形集合
        coordinates: Vec<Vec<Vec<Position>>>,
    },
}

/// 要素
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Feature {
    /// 类型标签，恒为 "Feature"
    #[serde(rename = "type", default = "feature_type")]
    pub kind: String,
    /// 几何，可为 null
    #[serde(default)]
    pub geometry: Option<Geometry>,
    /// 属性包，可为 null
    #[serde(default)]
    pub properties: Option<Map<String, Value>>,
}

fn feature_type() -> String {
    "Feature".into()
}

impl Feature {
    /// 创建带几何与属性的要素
    #[must_use]
    pub fn new(geometry: Option<Geometry>, properties: Option<Map<String, Value>>) -> Self {
        Self {
            kind: feature_type(),
            geometry,
            properties,
        }
    }

    /// 属性包引用（null 视为空）
    #[must_use]
    pub fn props(&self) -> Option<&Map<String, Value>> {
        self.properties.as_ref()
    }
}

/// 要素集合
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureCollection {
    /// 类型标签，恒为 "FeatureCollection"
    #[serde(rename = "type", default = "collection_type")]
    pub kind: String,
    /// 要素列表
    #[serde(default)]
    pub features: Vec<Feature>,
}

fn collection_type() -> String {
    "FeatureCollection".into()
}

impl FeatureCollection {
    /// 创建要素集合
    #[must_use]
    pub fn new(features: Vec<Feature>) -> Self {
        Self {
            kind: collection_type(),
            features,
        }
    }

    /// 从 JSON 文本解析
    ///
    /// # Errors
    /// 文本不是合法的 GeoJSON FeatureCollection 时返回 [`SnError::GeoJson`]
    pub fn from_json(text: &str) -> SnResult<Self> {
        serde_json::from_str(text).map_err(|e| SnError::GeoJson {
            message: e.to_string(),
        })
    }
}

impl Default for FeatureCollection {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

// ============================================================================
// 测试
// ============================================================================
