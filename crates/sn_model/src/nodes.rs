// crates/sn_model/src/nodes.rs

//! 节点合成器
//!
//! 把检查井/雨水口图层的点要素转换为节点记录。
//!
//! 测绘数据经常把同一座检查井数字化成多个点（结构点 + 各管口点），
//! 标签相同、坐标相差几英寸。合成器按清理后的标签分组，在 0.3 个
//! 投影单位容差内合并重合点：管底取最小、地面取最大、出水口标志取或。
//! 同标签但相距较远的点保留为独立节点，id 加 `_n` 序号后缀。

use crate::records::{NodeRecord, NodeSet};
use sn_foundation::{ExportLog, SnResult};
use sn_geo::geometry::Point2D;
use sn_geo::projection::Projector;
use sn_layers::fields::{
    resolve_number, resolve_string, CANDIDATES_DIR_INVERT, KEYS_DIR_INVERT, KEY_GROUND,
    KEY_INV_OUT, KEY_LABEL,
};
use sn_layers::{sanitize_id, Geometry, LayerData};
use std::collections::BTreeMap;

/// 重合合并容差（投影线性单位，如英尺）
pub const COINCIDENCE_TOLERANCE: f64 = 0.3;

/// 合并前的候选节点
struct RawNode {
    orig_id: String,
    coord: Point2D,
    invert: f64,
    ground: f64,
    is_outfall: bool,
    dir_inverts: [Option<f64>; 8],
}

/// 合成节点集合
///
/// 图层缺失时返回空集。非点几何的要素静默跳过——异构图层是常态。
///
/// # Errors
/// 投影失败时返回错误。
pub fn synthesize_nodes(
    layer: Option<&LayerData>,
    projector: &dyn Projector,
    log: &mut ExportLog,
) -> SnResult<NodeSet> {
    let Some(layer) = layer else {
        return Ok(NodeSet::default());
    };
    let field_map = layer.field_map.as_ref();

    let mut raw_nodes: Vec<RawNode> = Vec::new();
    let mut raw_points: Vec<Point2D> = Vec::new();

    for (i, feature) in layer.geojson.features.iter().enumerate() {
        let Some(Geometry::Point { coordinates }) = &feature.geometry else {
            continue;
        };
        let (Some(&lon), Some(&lat)) = (coordinates.first(), coordinates.get(1)) else {
            log.warn(format!("[JUNCTIONS] 点要素 #{i} 坐标不完整，已跳过"));
            continue;
        };

        let props = feature.props();
        let raw_label =
            resolve_string(props, field_map, KEY_LABEL, &["Label"]).unwrap_or_default();
        let orig_id = sanitize_id(&raw_label, i);

        let ground =
            resolve_number(
                props,
                field_map,
                KEY_GROUND,
                &["Elevation Ground [ft]", "Elevation Ground [ft]:"],
            )
            .unwrap_or(0.0);

        let explicit_invert = resolve_number(
            props,
            field_map,
            KEY_INV_OUT,
            &["Inv Out [ft]", "Inv Out [ft]:", "Elevation Invert[ft]"],
        );

        let mut dir_inverts = [None; 8];
        for (slot, (key, cand)) in dir_inverts
            .iter_mut()
            .zip(KEYS_DIR_INVERT.iter().zip(CANDIDATES_DIR_INVERT.iter()))
        {
            *slot = resolve_number(props, field_map, key, &[*cand]);
        }

        // 出口管底缺失时，取各方向管口读数的最小值：
        // 最低的管口约束出流
        let invert = explicit_invert
            .or_else(|| {
                dir_inverts
                    .iter()
                    .flatten()
                    .copied()
                    .fold(None, |acc: Option<f64>, v| {
                        Some(acc.map_or(v, |a| a.min(v)))
                    })
            })
            .unwrap_or(0.0);

        let is_outfall = raw_label.to_uppercase().starts_with("OF");

        raw_points.push(Point2D::from_lonlat(lon, lat));
        let coord = projector.forward_point(Point2D::from_lonlat(lon, lat))?;

        raw_nodes.push(RawNode {
            orig_id,
            coord,
            invert,
            ground,
            is_outfall,
            dir_inverts,
        });
    }

    Ok(NodeSet {
        nodes: merge_coincident(raw_nodes),
        raw_points,
    })
}

/// 元素级合并方向性管底读数，取最小
fn merge_dir_inverts(a: &mut [Option<f64>; 8], b: &[Option<f64>; 8]) {
    for (slot, other) in a.iter_mut().zip(b.iter()) {
        *slot = match (*slot, *other) {
            (Some(x), Some(y)) => Some(x.min(y)),
            (Some(x), None) => Some(x),
            (None, y) => y,
        };
    }
}

/// 按标签分组并合并重合簇
///
/// 组内按投影 x、y 排序后线性扫描；与当前簇的代表坐标两轴都相差
/// 小于容差的点并入该簇。组内多簇时 id 加序号后缀保持唯一。
fn merge_coincident(raw_nodes: Vec<RawNode>) -> Vec<NodeRecord> {
    let mut by_id: BTreeMap<String, Vec<RawNode>> = BTreeMap::new();
    for n in raw_nodes {
        by_id.entry(n.orig_id.clone()).or_default().push(n);
    }

    let mut nodes: Vec<NodeRecord> = Vec::new();
    for (orig_id, mut group) in by_id {
        group.sort_by(|a, b| {
            a.coord
                .x
                .total_cmp(&b.coord.x)
                .then(a.coord.y.total_cmp(&b.coord.y))
        });

        let mut clusters: Vec<NodeRecord> = Vec::new();
        for n in group {
            match clusters.last_mut() {
                Some(last)
                    if (last.coord.x - n.coord.x).abs() < COINCIDENCE_TOLERANCE
                        && (last.coord.y - n.coord.y).abs() < COINCIDENCE_TOLERANCE =>
                {
                    last.invert = last.invert.min(n.invert);
                    last.ground = last.ground.max(n.ground);
                    last.is_outfall = last.is_outfall || n.is_outfall;
                    merge_dir_inverts(&mut last.dir_inverts, &n.dir_inverts);
                }
                _ => clusters.push(NodeRecord {
                    id: orig_id.clone(),
                    coord: n.coord,
                    invert: n.invert,
                    ground: n.ground,
                    is_outfall: n.is_outfall,
                    dir_inverts: n.dir_inverts,
                }),
            }
        }

        let multi = clusters.len() > 1;
        for (idx, mut cluster) in clusters.into_iter().enumerate() {
            if multi {
                cluster.id = format!("{}_{}", cluster.id, idx + 1);
            }
            nodes.push(cluster);
        }
    }

    nodes.sort_by(|a, b| a.id.cmp(&b.id));
    nodes
}

// ============================================================================
// 测试
// ============================================================================
