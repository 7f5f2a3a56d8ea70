// crates/sn_model/src/records.rs

//! 模型记录类型
//!
//! 合成器的输出记录。所有集合都按 id 字典序（或产生顺序）排列，
//! 序列化端不再排序。

use serde::{Deserialize, Serialize};
use sn_geo::direction::Dir8;
use sn_geo::geometry::Point2D;

/// 节点记录
///
/// 由一个或多个重合的点要素合并而来：管底高程取最小、地面高程取最大
/// （对深度/容量保守）。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NodeRecord {
    /// 节点 id（已清理，组内多簇时带 `_n` 后缀）
    pub id: String,
    /// 投影平面坐标
    pub coord: Point2D,
    /// 管底高程 [ft]
    pub invert: f64,
    /// 地面高程 [ft]
    pub ground: f64,
    /// 是否出水口（标签以 "OF" 开头，不分大小写）
    pub is_outfall: bool,
    /// 方向性管底高程，按 [`Dir8`] 罗盘序
    pub dir_inverts: [Option<f64>; 8],
}

impl NodeRecord {
    /// 指定方位的管底高程读数
    #[must_use]
    pub fn dir_invert(&self, dir: Dir8) -> Option<f64> {
        self.dir_inverts[dir.index()]
    }
}

/// 节点集合
///
/// 合并后的节点记录，外加全部点要素的原始（未投影）坐标，
/// 供管段合成在节点处做精确顶点匹配拆分。
#[derive(Debug, Clone, Default)]
pub struct NodeSet {
    /// 合并后的节点，按 id 字典序
    pub nodes: Vec<NodeRecord>,
    /// 全部点要素的原始经纬度坐标
    pub raw_points: Vec<Point2D>,
}

impl NodeSet {
    /// 按 id 查找节点
    #[must_use]
    pub fn find(&self, id: &str) -> Option<&NodeRecord> {
        self.nodes.iter().find(|n| n.id == id)
    }

    /// 距给定投影坐标最近的节点
    ///
    /// 暴力线性扫描。节点规模是几十到几百个，O(n·m) 的简单性优先于
    /// 渐近复杂度；规模增长时可换空间索引。
    #[must_use]
    pub fn nearest(&self, p: &Point2D) -> Option<&NodeRecord> {
        let mut best: Option<&NodeRecord> = None;
        let mut best_dist = f64::INFINITY;
        for n in &self.nodes {
            let d = p.distance_squared_to(&n.coord);
            if d < best_dist {
                best_dist = d;
                best = Some(n);
            }
        }
        best
    }
}

/// 管段记录
///
/// 端点 id 永远引用当前节点集中存在的节点。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinkRecord {
    /// 管段 id
    pub id: String,
    /// 上游节点 id
    pub from_node: String,
    /// 下游节点 id
    pub to_node: String,
    /// 投影平面上的折线长度
    pub length: f64,
    /// 曼宁糙率
    pub roughness: f64,
    /// 管径 [ft]
    pub diameter_ft: f64,
    /// 进口偏移：管段进口管底 - 上游节点管底
    pub in_offset: f64,
    /// 出口偏移：管段出口管底 - 下游节点管底
    pub out_offset: f64,
}

/// 排水分区记录
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubcatchmentRecord {
    /// 分区 id
    pub id: String,
    /// 面积 [英亩]
    pub area_acres: f64,
    /// 投影后的闭合环，组内按面积降序
    pub rings: Vec<Vec<Point2D>>,
}

impl SubcatchmentRecord {
    /// 模型要求的特征宽度占位值
    ///
    /// `面积(英亩) × 100`，与真实边界形状无关的文档化近似。
    #[must_use]
    pub fn width(&self) -> f64 {
        self.area_acres * 100.0
    }
}

/// 聚合模型
///
/// 每次导出调用生成一次，序列化后即丢弃。
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExportModel {
    /// 节点，按 id 字典序
    pub nodes: Vec<NodeRecord>,
    /// 管段，按输入顺序
    pub links: Vec<LinkRecord>,
    /// 排水分区，按 id 字典序
    pub subcatchments: Vec<SubcatchmentRecord>,
}

// ============================================================================
// 测试
// ============================================================================
