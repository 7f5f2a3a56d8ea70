// crates/sn_model/src/subcatchments.rs

//! 排水分区合成器
//!
//! 把排水分区图层的面要素按分区名分组，累计面积并修复多边形环。
//!
//! 环修复流水线（按序）：
//!
//! 1. 去除连续重复顶点
//! 2. 统一为逆时针绕向
//! 3. 1e-6 量化全局去重（同时去掉闭合点）
//! 4. 不足 3 个独立顶点的环丢弃并告警
//! 5. 自交环按绕质心角度重排（启发式修复，结果按原样接受）
//! 6. 重新闭合、投影
//! 7. 投影后不足 4 个顶点（3 个独立 + 闭合点）的环丢弃并告警
//!
//! 一个分区的环全部被丢弃时整个分区不输出——不产生零面积的模型条目。

use crate::records::SubcatchmentRecord;
use sn_foundation::{ExportLog, SnResult};
use sn_geo::geometry::Point2D;
use sn_geo::projection::Projector;
use sn_geo::ring;
use sn_layers::fields::{resolve_string, KEY_LABEL};
use sn_layers::geojson::Position;
use sn_layers::{sanitize_id, Geometry, LayerData};
use std::collections::BTreeMap;

/// 分组累积：环带缓存的投影面积，避免重复投影
#[derive(Default)]
struct GroupAcc {
    area_acres: f64,
    rings: Vec<(f64, Vec<Point2D>)>,
}

/// 合成排水分区集合
///
/// 图层缺失时返回空集。分区按 id 字典序输出，组内环按面积降序。
///
/// # Errors
/// 投影失败时返回错误。
pub fn synthesize_subcatchments(
    layer: Option<&LayerData>,
    projector: &dyn Projector,
    log: &mut ExportLog,
) -> SnResult<Vec<SubcatchmentRecord>> {
    let Some(layer) = layer else {
        return Ok(Vec::new());
    };
    let field_map = layer.field_map.as_ref();
    let acres_factor = projector.unit().acres_per_square_unit();

    // 分组：分区名 -> 外环集合 + 面积
    let mut grouped: BTreeMap<String, GroupAcc> = BTreeMap::new();
    for (i, feature) in layer.geojson.features.iter().enumerate() {
        let outer_rings: Vec<&Vec<Position>> = match &feature.geometry {
            Some(Geometry::Polygon { coordinates }) => coordinates.first().into_iter().collect(),
            Some(Geometry::MultiPolygon { coordinates }) => {
                coordinates.iter().filter_map(|poly| poly.first()).collect()
            }
            _ => continue,
        };

        let raw_name = resolve_string(feature.props(), field_map, KEY_LABEL, &["DA_NAME"])
            .unwrap_or_default();
        let id = sanitize_id(&raw_name, i);

        let entry = grouped.entry(id).or_default();
        for raw_ring in outer_rings {
            let ring_pts = to_points(raw_ring);
            // 面积在清理前累计：退化环贡献约等于零
            let projected = project_ring(&ring_pts, projector)?;
            let area = ring::ring_area(&projected);
            entry.area_acres += area * acres_factor;
            entry.rings.push((area, ring_pts));
        }
    }

    // 逐组修复并输出
    let mut records: Vec<SubcatchmentRecord> = Vec::new();
    for (id, mut group) in grouped {
        // 组内环按投影面积降序：最大环近似外边界
        group.rings.sort_by(|a, b| b.0.total_cmp(&a.0));

        let mut surviving: Vec<Vec<Point2D>> = Vec::new();
        for (_, raw_ring) in group.rings.drain(..) {
            match repair_ring(&raw_ring, projector, &id, log)? {
                Some(projected) => surviving.push(projected),
                None => {}
            }
        }

        // 环全军覆没的分区整组丢弃，不产生零面积条目
        if surviving.is_empty() {
            continue;
        }

        records.push(SubcatchmentRecord {
            id,
            area_acres: group.area_acres,
            rings: surviving,
        });
    }

    Ok(records)
}

/// 坐标对转点，丢弃坐标不完整或非有限的顶点
fn to_points(ring: &[Position]) -> Vec<Point2D> {
    ring.iter()
        .filter_map(|c| {
            let (x, y) = (*c.first()?, *c.get(1)?);
            let p = Point2D::new(x, y);
            p.is_finite().then_some(p)
        })
        .collect()
}

/// 投影整个环
fn project_ring(ring: &[Point2D], projector: &dyn Projector) -> SnResult<Vec<Point2D>> {
    ring.iter().map(|p| projector.forward_point(*p)).collect()
}

/// 单环修复流水线
///
/// 返回投影后的闭合环；环退化时返回 None 并告警。
fn repair_ring(
    raw_ring: &[Point2D],
    projector: &dyn Projector,
    catchment_id: &str,
    log: &mut ExportLog,
) -> SnResult<Option<Vec<Point2D>>> {
    let cleaned = ring::dedup_consecutive(raw_ring);
    let rewound = ring::rewind_ccw(cleaned);
    let dedup = ring::dedup_global(&rewound);

    if dedup.len() < 3 {
        log.warn(format!("[POLYGONS] 分区 {catchment_id} 的退化环已丢弃"));
        return Ok(None);
    }

    let repaired = if ring::has_kinks(&dedup) {
        ring::reorder_by_angle(&dedup)
    } else {
        dedup
    };

    let closed = ring::close_ring(repaired);
    let projected = project_ring(&closed, projector)?;

    if projected.len() < 4 {
        log.warn(format!("[POLYGONS] 分区 {catchment_id} 的退化环已丢弃"));
        return Ok(None);
    }

    Ok(Some(projected))
}

// ============================================================================
// 测试
// ============================================================================
