// crates/sn_export/src/sections.rs

//! 小节行渲染
//!
//! 每个小节一行一条记录，列序和格式是目标软件规定死的：
//! 制表符分隔、指定小数位。水文参数（%不透水、宽度系数、Horton 入渗
//! 参数等）是工程上常用的初始值，用户在建模软件里再细调。
//!
//! [`validate_polygon_lines`] 是序列化前的最后一道门：几何修复流水线
//! 的任何漏网之鱼都必须在这里被拦下，绝不能产出损坏的模型文件。

use sn_foundation::{SnError, SnResult};
use sn_model::{LinkRecord, NodeRecord, SubcatchmentRecord};
use std::collections::BTreeSet;

/// SUBCATCHMENTS 小节列头
pub const SUBCATCH_HEADER: &str =
    ";;Name\tRain Gage\tOutlet\tArea\t%Imperv\tWidth\t%Slope\tCurbLen\tSnowPack";
/// SUBAREAS 小节列头
pub const SUBAREA_HEADER: &str =
    ";;Subcatchment\tN-Imperv\tN-Perv\tS-Imperv\tS-Perv\tPctZero\tRouteTo\tPctRouted";
/// INFILTRATION 小节列头
pub const INFIL_HEADER: &str = ";;Subcatchment\tParam1\tParam2\tParam3\tParam4\tParam5";
/// POLYGONS 小节列头
pub const POLYGON_HEADER: &str = ";;Subcatchment\tX-Coord\tY-Coord";
/// JUNCTIONS 小节列头
pub const JUNCTION_HEADER: &str =
    ";;Name\tElevation  MaxDepth   InitDepth  SurDepth   Aponded";
/// OUTFALLS 小节列头
pub const OUTFALL_HEADER: &str =
    ";;Name\tElevation  Type       Stage Data       Gated    Route To";
/// CONDUITS 小节列头
pub const CONDUIT_HEADER: &str =
    ";;Name\tFrom Node        To Node          Length     Roughness  InOffset   OutOffset  InitFlow   MaxFlow";
/// XSECTIONS 小节列头
pub const XSECTION_HEADER: &str =
    ";;Link           Shape        Geom1            Geom2      Geom3      Geom4      Barrels    Culvert";
/// COORDINATES 小节列头
pub const COORD_HEADER: &str = ";;Node           X-Coord            Y-Coord";

/// 渲染 SUBCATCHMENTS 行
///
/// 列：名称、雨量计(*)、出口(*)、面积(英亩,4位)、%不透水、宽度(2位)、
/// %坡度、路缘长
#[must_use]
pub fn render_subcatchments(subcatchments: &[SubcatchmentRecord]) -> Vec<String> {
    subcatchments
        .iter()
        .map(|s| {
            format!(
                "{}\t*\t*\t{:.4}\t25\t{:.2}\t0.5\t0",
                s.id, s.area_acres, s.width()
            )
        })
        .collect()
}

/// 渲染 SUBAREAS 行
#[must_use]
pub fn render_subareas(subcatchments: &[SubcatchmentRecord]) -> Vec<String> {
    subcatchments
        .iter()
        .map(|s| format!("{}\t0.01\t0.1\t0.05\t0.05\t25\tOUTLET", s.id))
        .collect()
}

/// 渲染 INFILTRATION 行（Horton 参数）
#[must_use]
pub fn render_infiltration(subcatchments: &[SubcatchmentRecord]) -> Vec<String> {
    subcatchments
        .iter()
        .map(|s| format!("{}\t3\t0.5\t4\t7\t0", s.id))
        .collect()
}

/// 渲染 POLYGONS 行：每个投影顶点一行
#[must_use]
pub fn render_polygons(subcatchments: &[SubcatchmentRecord]) -> Vec<String> {
    let mut lines = Vec::new();
    for s in subcatchments {
        for ring in &s.rings {
            for p in ring {
                lines.push(format!("{}\t{}\t{}", s.id, p.x, p.y));
            }
        }
    }
    lines
}

/// 渲染 JUNCTIONS 行（非出水口节点）
///
/// 最大深度 = max(0, 地面 - 管底)
#[must_use]
pub fn render_junctions(nodes: &[NodeRecord]) -> Vec<String> {
    nodes
        .iter()
        .filter(|n| !n.is_outfall)
        .map(|n| {
            format!(
                "{}\t{}\t{}\t0\t0\t0",
                n.id,
                n.ground,
                (n.ground - n.invert).max(0.0)
            )
        })
        .collect()
}

/// 渲染 OUTFALLS 行
#[must_use]
pub fn render_outfalls(nodes: &[NodeRecord]) -> Vec<String> {
    nodes
        .iter()
        .filter(|n| n.is_outfall)
        .map(|n| format!("{}\t{}\tFREE\t\tNO\t", n.id, n.invert))
        .collect()
}

/// 渲染 CONDUITS 行
#[must_use]
pub fn render_conduits(links: &[LinkRecord]) -> Vec<String> {
    links
        .iter()
        .map(|l| {
            format!(
                "{}\t{}\t{}\t{:.3}\t{}\t{:.3}\t{:.3}\t0\t0",
                l.id, l.from_node, l.to_node, l.length, l.roughness, l.in_offset, l.out_offset
            )
        })
        .collect()
}

/// 渲染 XSECTIONS 行（圆形断面）
#[must_use]
pub fn render_xsections(links: &[LinkRecord]) -> Vec<String> {
    links
        .iter()
        .map(|l| format!("{}\tCIRCULAR\t{}\t0\t0\t0\t1", l.id, l.diameter_ft))
        .collect()
}

/// 渲染 COORDINATES 行（全部节点）
#[must_use]
pub fn render_coordinates(nodes: &[NodeRecord]) -> Vec<String> {
    nodes
        .iter()
        .map(|n| format!("{}\t{}\t{}", n.id, n.coord.x, n.coord.y))
        .collect()
}

/// 过滤掉引用已消失分区的 POLYGONS 行
///
/// 保持 POLYGONS 与 SUBCATCHMENTS 两个小节互相一致。
#[must_use]
pub fn filter_polygon_lines(lines: Vec<String>, valid_ids: &BTreeSet<String>) -> Vec<String> {
    lines
        .into_iter()
        .filter(|l| {
            l.split_whitespace()
                .next()
                .is_some_and(|id| valid_ids.contains(id))
        })
        .collect()
}

/// 十进制数值词法检查
///
/// 可带符号、可带小数部分、可带指数（`-?\d+(\.\d+)?([eE][+-]?\d+)?`）。
fn is_decimal_token(s: &str) -> bool {
    let mut chars = s.chars().peekable();

    if chars.peek() == Some(&'-') {
        chars.next();
    }

    let mut int_digits = 0;
    while chars.peek().is_some_and(char::is_ascii_digit) {
        chars.next();
        int_digits += 1;
    }
    if int_digits == 0 {
        return false;
    }

    if chars.peek() == Some(&'.') {
        chars.next();
        let mut frac_digits = 0;
        while chars.peek().is_some_and(char::is_ascii_digit) {
            chars.next();
            frac_digits += 1;
        }
        if frac_digits == 0 {
            return false;
        }
    }

    if matches!(chars.peek(), Some('e') | Some('E')) {
        chars.next();
        if matches!(chars.peek(), Some('+') | Some('-')) {
            chars.next();
        }
        let mut exp_digits = 0;
        while chars.peek().is_some_and(char::is_ascii_digit) {
            chars.next();
            exp_digits += 1;
        }
        if exp_digits == 0 {
            return false;
        }
    }

    chars.next().is_none()
}

/// POLYGONS 校验门
///
/// 每行必须恰好 3 个空白分隔的词，第 2/3 个词必须是十进制数。
/// 任何违例都中止整个导出，错误里带上出事的那一行。
///
/// # Errors
/// 行格式非法时返回 [`SnError::MalformedSectionLine`]。
pub fn validate_polygon_lines(lines: &[String]) -> SnResult<()> {
    for line in lines {
        let tokens: Vec<&str> = line.split_whitespace().collect();
        if tokens.len() != 3 {
            return Err(SnError::MalformedSectionLine {
                section: "POLYGONS",
                line: line.clone(),
            });
        }
        if !is_decimal_token(tokens[1]) || !is_decimal_token(tokens[2]) {
            return Err(SnError::MalformedSectionLine {
                section: "POLYGONS",
                line: line.clone(),
            });
        }
    }
    Ok(())
}

// ============================================================================
// 测试
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use sn_geo::geometry::Point2D;

    fn node(id: &str, ground: f64, invert: f64, outfall: bool) -> NodeRecord {
        NodeRecord {
            id: id.into(),
            coord: Point2D::new(100.0, 200.0),
            invert,
            ground,
            is_outfall: outfall,
            dir_inverts: [None; 8],
        }
    }

    #[test]
    fn test_junction_line_format() {
        let lines = render_junctions(&[node("CB-1", 100.0, 95.5, false)]);
        assert_eq!(lines, vec!["CB-1\t100\t4.5\t0\t0\t0"]);
    }

    #[test]
    fn test_junction_depth_clamped_to_zero() {
        // 管底高于地面的脏数据：深度钳到 0
        let lines = render_junctions(&[node("CB-2", 90.0, 95.0, false)]);
        assert!(lines[0].contains("\t0\t0\t0\t0"));
    }

    #[test]
    fn test_outfall_line_format() {
        let lines = render_outfalls(&[node("OF-1", 100.0, 88.25, true)]);
        assert_eq!(lines, vec!["OF-1\t88.25\tFREE\t\tNO\t"]);
    }

    #[test]
    fn test_outfalls_excluded_from_junctions() {
        let nodes = vec![node("CB-1", 100.0, 95.0, false), node("OF-1", 0.0, 0.0, true)];
        assert_eq!(render_junctions(&nodes).len(), 1);
        assert_eq!(render_outfalls(&nodes).len(), 1);
    }

    #[test]
    fn test_conduit_line_format() {
        let links = vec![LinkRecord {
            id: "P-1".into(),
            from_node: "CB-1".into(),
            to_node: "CB-2".into(),
            length: 123.4567,
            roughness: 0.013,
            diameter_ft: 1.25,
            in_offset: 0.5,
            out_offset: 0.0,
        }];
        assert_eq!(
            render_conduits(&links),
            vec!["P-1\tCB-1\tCB-2\t123.457\t0.013\t0.500\t0.000\t0\t0"]
        );
        assert_eq!(
            render_xsections(&links),
            vec!["P-1\tCIRCULAR\t1.25\t0\t0\t0\t1"]
        );
    }

    #[test]
    fn test_subcatchment_line_format() {
        let subs = vec![SubcatchmentRecord {
            id: "DA-1".into(),
            area_acres: 2.53846,
            rings: vec![],
        }];
        assert_eq!(
            render_subcatchments(&subs),
            vec!["DA-1\t*\t*\t2.5385\t25\t253.85\t0.5\t0"]
        );
        assert_eq!(
            render_subareas(&subs),
            vec!["DA-1\t0.01\t0.1\t0.05\t0.05\t25\tOUTLET"]
        );
        assert_eq!(render_infiltration(&subs), vec!["DA-1\t3\t0.5\t4\t7\t0"]);
    }

    #[test]
    fn test_polygon_lines_per_vertex() {
        let subs = vec![SubcatchmentRecord {
            id: "DA-1".into(),
            area_acres: 1.0,
            rings: vec![vec![Point2D::new(0.0, 0.0), Point2D::new(10.0, 0.5)]],
        }];
        assert_eq!(
            render_polygons(&subs),
            vec!["DA-1\t0\t0", "DA-1\t10\t0.5"]
        );
    }

    #[test]
    fn test_filter_polygon_lines() {
        let valid: BTreeSet<String> = ["DA-1".to_string()].into_iter().collect();
        let lines = vec!["DA-1\t0\t0".to_string(), "DA-2\t1\t1".to_string()];
        let kept = filter_polygon_lines(lines, &valid);
        assert_eq!(kept, vec!["DA-1\t0\t0"]);
    }

    #[test]
    fn test_decimal_token() {
        assert!(is_decimal_token("0"));
        assert!(is_decimal_token("-12"));
        assert!(is_decimal_token("3.25"));
        assert!(is_decimal_token("-1.5e-3"));
        assert!(is_decimal_token("2E8"));
        assert!(!is_decimal_token(""));
        assert!(!is_decimal_token("abc"));
        assert!(!is_decimal_token("1."));
        assert!(!is_decimal_token(".5"));
        assert!(!is_decimal_token("1e"));
        assert!(!is_decimal_token("NaN"));
        assert!(!is_decimal_token("1.2.3"));
    }

    #[test]
    fn test_validate_gate_passes_clean_lines() {
        let lines = vec!["DA-1\t100.5\t-200".to_string()];
        assert!(validate_polygon_lines(&lines).is_ok());
    }

    #[test]
    fn test_validate_gate_rejects_wrong_token_count() {
        let lines = vec!["DA-1\t100.5".to_string()];
        let err = validate_polygon_lines(&lines).unwrap_err();
        assert!(format!("{err}").contains("DA-1\t100.5"));
    }

    #[test]
    fn test_validate_gate_rejects_non_numeric() {
        let lines = vec!["DA-1\tNaN\t2.0".to_string()];
        let err = validate_polygon_lines(&lines).unwrap_err();
        // 错误信息必须引用出事的那一行
        assert!(format!("{err}").contains("DA-1\tNaN\t2.0"));
    }
}
