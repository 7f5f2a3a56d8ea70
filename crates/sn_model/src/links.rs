// crates/sn_model/src/links.rs

//! 管段合成器
//!
//! 把管道图层的线要素转换为管段记录。
//!
//! 端点解析按优先级：
//!
//! 1. 显式流向描述 `"<from> to <to>"`，两端标签都能在节点集中解析时直接采用
//! 2. 几何推断：线的首末顶点投影后各找最近节点（暴力扫描），并用首末
//!    线段的八方位在节点的方向性管口读数中补齐缺失的管段进出口管底；
//!    两端节点管底都已知且上游低于下游时交换方向（水往低处流）
//!
//! 线在内部顶点与某个节点的原始坐标完全重合时，先在该顶点拆分成多段，
//! 各段继承源属性、id 加 `-n` 段号，显式流向描述作废。

use crate::records::{LinkRecord, NodeRecord, NodeSet};
use serde_json::{Map, Value};
use sn_foundation::{ExportLog, SnResult};
use sn_geo::direction::Dir8;
use sn_geo::geometry::Point2D;
use sn_geo::projection::Projector;
use sn_layers::fields::{
    resolve_number, resolve_string, KEY_DIAMETER, KEY_DIRECTION, KEY_INV_IN, KEY_INV_OUT,
    KEY_LABEL, KEY_ROUGHNESS,
};
use sn_layers::geojson::Position;
use sn_layers::{sanitize_id, Geometry, LayerData};
use std::collections::HashSet;

/// 缺省管径 [in]
const DEFAULT_DIAMETER_IN: f64 = 12.0;

/// 缺省曼宁糙率
const DEFAULT_ROUGHNESS: f64 = 0.01;

/// 拆分/展开后的单条简单线
struct PipeLine {
    coords: Vec<Position>,
    props: Option<Map<String, Value>>,
    /// 节点处拆分产生的段号（1 起），未拆分为 None
    segment: Option<usize>,
}

/// 合成管段集合
///
/// 图层缺失时返回空集。MultiLineString 先展开成独立的 LineString。
///
/// # Errors
/// 投影失败时返回错误。
pub fn synthesize_links(
    layer: Option<&LayerData>,
    nodes: &NodeSet,
    projector: &dyn Projector,
    log: &mut ExportLog,
) -> SnResult<Vec<LinkRecord>> {
    let Some(layer) = layer else {
        return Ok(Vec::new());
    };
    let field_map = layer.field_map.as_ref();

    let exploded = explode_lines(layer);
    let pipe_lines = split_at_nodes(exploded, &nodes.raw_points);

    let mut links: Vec<LinkRecord> = Vec::new();
    for (i, line) in pipe_lines.iter().enumerate() {
        if line.coords.len() < 2 {
            log.warn(format!("[CONDUITS] 线要素 #{i} 顶点不足，已跳过"));
            continue;
        }

        let props = line.props.as_ref();
        let mut raw_label =
            resolve_string(props, field_map, KEY_LABEL, &["Label", "Name"]).unwrap_or_default();
        if let Some(seg) = line.segment {
            raw_label = format!("{raw_label}-{seg}");
        }
        let id = sanitize_id(&raw_label, i);

        // 投影整条折线；顶点坐标不完整的要素丢弃
        let mut projected: Vec<Point2D> = Vec::with_capacity(line.coords.len());
        let mut malformed = false;
        for c in &line.coords {
            let (Some(&lon), Some(&lat)) = (c.first(), c.get(1)) else {
                malformed = true;
                break;
            };
            projected.push(projector.forward_point(Point2D::from_lonlat(lon, lat))?);
        }
        if malformed {
            log.warn(format!("[CONDUITS] {id} 顶点坐标不完整，已跳过"));
            continue;
        }

        let mut inv_in = resolve_number(props, field_map, KEY_INV_IN, &["Elevation Invert In [ft]"]);
        let mut inv_out =
            resolve_number(props, field_map, KEY_INV_OUT, &["Elevation Invert Out [ft]"]);

        // 拆分出的段不再信任整条管道的流向描述
        let direction = if line.segment.is_some() {
            None
        } else {
            resolve_string(props, field_map, KEY_DIRECTION, &["Directions"])
        };

        let explicit = direction
            .as_deref()
            .and_then(split_direction)
            .and_then(|(a, b)| {
                let from = nodes.find(&sanitize_id(a, 0))?;
                let to = nodes.find(&sanitize_id(b, 0))?;
                Some((from, to))
            });

        let (from, to) = match explicit {
            Some(pair) => pair,
            None => {
                let Some(pair) = resolve_by_geometry(
                    line,
                    &projected,
                    nodes,
                    &mut inv_in,
                    &mut inv_out,
                ) else {
                    log.warn(format!("[CONDUITS] {id} 无可解析端点（节点集为空），已跳过"));
                    continue;
                };
                pair
            }
        };

        let length: f64 = projected
            .windows(2)
            .map(|w| w[0].distance_to(&w[1]))
            .sum();

        let roughness = resolve_number(props, field_map, KEY_ROUGHNESS, &["Rougness", "Roughness"])
            .unwrap_or(DEFAULT_ROUGHNESS);

        let diameter_in = resolve_number(props, field_map, KEY_DIAMETER, &["Diameter [in]"])
            .filter(|d| d.is_finite() && *d > 0.0)
            .unwrap_or(DEFAULT_DIAMETER_IN);

        let in_offset = inv_in.map_or(0.0, |v| v - from.invert);
        let out_offset = inv_out.map_or(0.0, |v| v - to.invert);

        links.push(LinkRecord {
            id,
            from_node: from.id.clone(),
            to_node: to.id.clone(),
            length,
            roughness,
            diameter_ft: diameter_in / 12.0,
            in_offset,
            out_offset,
        });
    }

    Ok(links)
}

/// 展开图层要素为简单线列表
///
/// LineString 原样收集；MultiLineString 的每条成员线继承属性；
/// 其他几何静默跳过。
fn explode_lines(layer: &LayerData) -> Vec<PipeLine> {
    let mut out = Vec::new();
    for feature in &layer.geojson.features {
        match &feature.geometry {
            Some(Geometry::LineString { coordinates }) => out.push(PipeLine {
                coords: coordinates.clone(),
                props: feature.properties.clone(),
                segment: None,
            }),
            Some(Geometry::MultiLineString { coordinates }) => {
                for coords in coordinates {
                    out.push(PipeLine {
                        coords: coords.clone(),
                        props: feature.properties.clone(),
                        segment: None,
                    });
                }
            }
            _ => {}
        }
    }
    out
}

/// 坐标的位级键，用于精确重合判断
fn exact_key(pos: &Position) -> Option<(u64, u64)> {
    Some((pos.first()?.to_bits(), pos.get(1)?.to_bits()))
}

/// 在与节点原始坐标完全重合的内部顶点处拆分线
///
/// 匹配用原始（未投影）坐标的完全相等判断：拆分针对的是同一份源数据
/// 里点层和线层共享的数字化顶点。
fn split_at_nodes(lines: Vec<PipeLine>, node_points: &[Point2D]) -> Vec<PipeLine> {
    let node_keys: HashSet<(u64, u64)> = node_points
        .iter()
        .map(|p| (p.x.to_bits(), p.y.to_bits()))
        .collect();

    let mut out = Vec::new();
    for line in lines {
        let n = line.coords.len();
        let split_idxs: Vec<usize> = (1..n.saturating_sub(1))
            .filter(|&i| exact_key(&line.coords[i]).is_some_and(|k| node_keys.contains(&k)))
            .collect();

        if split_idxs.is_empty() {
            out.push(line);
            continue;
        }

        let mut prev = 0;
        let mut boundaries = split_idxs;
        boundaries.push(n - 1);
        for (seg, idx) in boundaries.into_iter().enumerate() {
            out.push(PipeLine {
                coords: line.coords[prev..=idx].to_vec(),
                props: line.props.clone(),
                segment: Some(seg + 1),
            });
            prev = idx;
        }
    }
    out
}

/// 解析 `"<from> to <to>"` 流向描述
///
/// 分隔符是被空白包围的小写 `to`；标签本身可以含空格。
/// 取首个分隔符，两侧去掉空白后都非空才算有效。
fn split_direction(s: &str) -> Option<(&str, &str)> {
    let bytes = s.as_bytes();
    for (idx, _) in s.match_indices("to") {
        let before_ws = idx > 0 && bytes[idx - 1].is_ascii_whitespace();
        let after_ws = idx + 2 < bytes.len() && bytes[idx + 2].is_ascii_whitespace();
        if before_ws && after_ws {
            let a = s[..idx].trim();
            let b = s[idx + 2..].trim();
            if !a.is_empty() && !b.is_empty() {
                return Some((a, b));
            }
        }
    }
    None
}

/// 几何推断端点
///
/// 首末顶点投影后各找最近节点；用首末线段的八方位从节点的方向性管口
/// 读数补齐缺失的 `inv_in`/`inv_out`；两端管底都已知且上游更低时交换。
/// 节点集为空时返回 None。
fn resolve_by_geometry<'a>(
    line: &PipeLine,
    projected: &[Point2D],
    nodes: &'a NodeSet,
    inv_in: &mut Option<f64>,
    inv_out: &mut Option<f64>,
) -> Option<(&'a NodeRecord, &'a NodeRecord)> {
    let mut from = nodes.nearest(projected.first()?)?;
    let mut to = nodes.nearest(projected.last()?)?;

    // 首/末线段的方位（原始坐标系）
    let raw_pair = |a: &Position, b: &Position| -> Option<Dir8> {
        Some(Dir8::between(
            (*a.first()?, *a.get(1)?),
            (*b.first()?, *b.get(1)?),
        ))
    };
    let n = line.coords.len();
    let dir_start = raw_pair(&line.coords[0], &line.coords[1]);
    let dir_end = raw_pair(&line.coords[n - 1], &line.coords[n - 2]);

    if inv_in.is_none() {
        *inv_in = dir_start.and_then(|d| from.dir_invert(d));
    }
    if inv_out.is_none() {
        *inv_out = dir_end.and_then(|d| to.dir_invert(d));
    }

    // 水往低处流：上游节点管底低于下游时认为数字化方向画反了
    if from.invert < to.invert {
        std::mem::swap(&mut from, &mut to);
        std::mem::swap(inv_in, inv_out);
    }

    Some((from, to))
}

// ============================================================================
// 测试
// ============================================================================
