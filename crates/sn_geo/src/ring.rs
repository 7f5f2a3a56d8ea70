// crates/sn_geo/src/ring.rs

//! 多边形环工具
//!
//! 排水分区多边形来自手工数字化的 shapefile，环经常不闭合、含重复顶点
//! 或自交。本模块提供环修复流水线的几何原语：
//!
//! 1. [`dedup_consecutive`] / [`dedup_global`]: 顶点去重
//! 2. [`rewind_ccw`]: 统一为逆时针绕向
//! 3. [`has_kinks`]: 自交检测
//! 4. [`reorder_by_angle`]: 绕质心角度排序的启发式修复
//! 5. [`close_ring`]: 重新闭合
//!
//! 角度排序修复是尽力而为：它保证输出无自交的代价是可能得到一个
//! 不同的多边形；若排序结果仍自交则按原样接受，不做第二次修复。

use crate::geometry::Point2D;

/// 全局去重的坐标量化精度（小数位数）
const DEDUP_DECIMALS: i32 = 6;

/// 环的有符号面积（鞋带公式，逆时针为正）
///
/// 输入环可闭合可不闭合，闭合点自动处理。
#[must_use]
pub fn signed_area(ring: &[Point2D]) -> f64 {
    if ring.len() < 3 {
        return 0.0;
    }
    let mut sum = 0.0;
    for i in 0..ring.len() {
        let p = ring[i];
        let q = ring[(i + 1) % ring.len()];
        sum += p.x * q.y - q.x * p.y;
    }
    sum / 2.0
}

/// 环的无符号面积
#[must_use]
pub fn ring_area(ring: &[Point2D]) -> f64 {
    signed_area(ring).abs()
}

/// 顶点质心（算术平均）
///
/// 用作角度排序修复的参考点，不是面积质心。
#[must_use]
pub fn centroid(ring: &[Point2D]) -> Point2D {
    if ring.is_empty() {
        return Point2D::ZERO;
    }
    let n = ring.len() as f64;
    let sum = ring
        .iter()
        .fold(Point2D::ZERO, |acc, p| Point2D::new(acc.x + p.x, acc.y + p.y));
    Point2D::new(sum.x / n, sum.y / n)
}

/// 去除连续重复顶点（严格相等）
#[must_use]
pub fn dedup_consecutive(ring: &[Point2D]) -> Vec<Point2D> {
    let mut out: Vec<Point2D> = Vec::with_capacity(ring.len());
    for &p in ring {
        if out.last() != Some(&p) {
            out.push(p);
        }
    }
    out
}

/// 量化坐标键，1e-6 精度
fn quantize(p: &Point2D) -> (i64, i64) {
    let scale = 10f64.powi(DEDUP_DECIMALS);
    ((p.x * scale).round() as i64, (p.y * scale).round() as i64)
}

/// 全局去重：按 1e-6 量化键保留首次出现的顶点
///
/// 同时去掉闭合重复点，结果是开放环。
#[must_use]
pub fn dedup_global(ring: &[Point2D]) -> Vec<Point2D> {
    let mut seen = std::collections::HashSet::new();
    let mut out = Vec::with_capacity(ring.len());
    for &p in ring {
        if seen.insert(quantize(&p)) {
            out.push(p);
        }
    }
    out
}

/// 闭合环：首尾顶点不同时追加首点
///
/// 少于 3 个顶点的环原样返回。
#[must_use]
pub fn close_ring(mut ring: Vec<Point2D>) -> Vec<Point2D> {
    if ring.len() < 3 {
        return ring;
    }
    let first = ring[0];
    let last = ring[ring.len() - 1];
    if first.x != last.x || first.y != last.y {
        ring.push(first);
    }
    ring
}

/// 统一为逆时针绕向
#[must_use]
pub fn rewind_ccw(mut ring: Vec<Point2D>) -> Vec<Point2D> {
    if signed_area(&ring) < 0.0 {
        ring.reverse();
    }
    ring
}

/// 两线段是否严格相交（交点在两线段内部）
fn segments_cross(a1: Point2D, a2: Point2D, b1: Point2D, b2: Point2D) -> bool {
    let d = |p: Point2D, q: Point2D, r: Point2D| (q - p).cross(&(r - p));
    let d1 = d(b1, b2, a1);
    let d2 = d(b1, b2, a2);
    let d3 = d(a1, a2, b1);
    let d4 = d(a1, a2, b2);
    ((d1 > 0.0 && d2 < 0.0) || (d1 < 0.0 && d2 > 0.0))
        && ((d3 > 0.0 && d4 < 0.0) || (d3 < 0.0 && d4 > 0.0))
}

/// 检测环的自交（kink）
///
/// 输入视为开放环，内部按闭合处理；相邻线段共享端点不算自交。
#[must_use]
pub fn has_kinks(ring: &[Point2D]) -> bool {
    let n = ring.len();
    if n < 4 {
        return false;
    }
    // 闭合后的线段 i: ring[i] -> ring[(i+1) % n]
    for i in 0..n {
        for j in (i + 1)..n {
            // 跳过相邻线段（含首尾相邻）
            if j == i + 1 || (i == 0 && j == n - 1) {
                continue;
            }
            let a1 = ring[i];
            let a2 = ring[(i + 1) % n];
            let b1 = ring[j];
            let b2 = ring[(j + 1) % n];
            if segments_cross(a1, a2, b1, b2) {
                return true;
            }
        }
    }
    false
}

/// 绕质心角度排序的启发式修复
///
/// 按 atan2 角度升序重排顶点，消除蝴蝶结式自交。
/// 结果可能与原多边形形状不同，这是接受的风险。
#[must_use]
pub fn reorder_by_angle(ring: &[Point2D]) -> Vec<Point2D> {
    let c = centroid(ring);
    let mut pts: Vec<Point2D> = ring.to_vec();
    pts.sort_by(|a, b| {
        let ang_a = (a.y - c.y).atan2(a.x - c.x);
        let ang_b = (b.y - c.y).atan2(b.x - c.x);
        ang_a.total_cmp(&ang_b)
    });
    pts
}

// ============================================================================
// 测试
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn square() -> Vec<Point2D> {
        vec![
            Point2D::new(0.0, 0.0),
            Point2D::new(10.0, 0.0),
            Point2D::new(10.0, 10.0),
            Point2D::new(0.0, 10.0),
        ]
    }

    #[test]
    fn test_signed_area_ccw_positive() {
        assert!((signed_area(&square()) - 100.0).abs() < 1e-10);
    }

    #[test]
    fn test_signed_area_cw_negative() {
        let mut r = square();
        r.reverse();
        assert!((signed_area(&r) + 100.0).abs() < 1e-10);
    }

    #[test]
    fn test_ring_area_closed_equals_open() {
        let open = square();
        let closed = close_ring(square());
        assert!((ring_area(&open) - ring_area(&closed)).abs() < 1e-10);
    }

    #[test]
    fn test_degenerate_area_zero() {
        let line = vec![Point2D::new(0.0, 0.0), Point2D::new(1.0, 1.0)];
        assert_eq!(ring_area(&line), 0.0);
    }

    #[test]
    fn test_dedup_consecutive() {
        let r = vec![
            Point2D::new(0.0, 0.0),
            Point2D::new(0.0, 0.0),
            Point2D::new(1.0, 0.0),
            Point2D::new(1.0, 0.0),
            Point2D::new(1.0, 1.0),
        ];
        let out = dedup_consecutive(&r);
        assert_eq!(out.len(), 3);
    }

    #[test]
    fn test_dedup_global_drops_closing_point() {
        let closed = close_ring(square());
        let out = dedup_global(&closed);
        assert_eq!(out.len(), 4);
    }

    #[test]
    fn test_dedup_global_quantized() {
        // 1e-6 以下的差异视为同一顶点
        let r = vec![
            Point2D::new(1.0, 1.0),
            Point2D::new(1.0 + 1e-9, 1.0),
            Point2D::new(2.0, 2.0),
        ];
        let out = dedup_global(&r);
        assert_eq!(out.len(), 2);
    }

    #[test]
    fn test_close_ring_appends_first() {
        let closed = close_ring(square());
        assert_eq!(closed.len(), 5);
        assert_eq!(closed[0], closed[4]);
        // 已闭合的环不再追加
        assert_eq!(close_ring(closed.clone()).len(), 5);
    }

    #[test]
    fn test_rewind_ccw() {
        let mut cw = square();
        cw.reverse();
        let ccw = rewind_ccw(cw);
        assert!(signed_area(&ccw) > 0.0);
    }

    #[test]
    fn test_square_has_no_kinks() {
        assert!(!has_kinks(&square()));
    }

    #[test]
    fn test_bowtie_has_kinks() {
        // 蝴蝶结: (0,0)-(10,10)-(10,0)-(0,10)
        let bowtie = vec![
            Point2D::new(0.0, 0.0),
            Point2D::new(10.0, 10.0),
            Point2D::new(10.0, 0.0),
            Point2D::new(0.0, 10.0),
        ];
        assert!(has_kinks(&bowtie));
    }

    #[test]
    fn test_reorder_by_angle_repairs_bowtie() {
        let bowtie = vec![
            Point2D::new(0.0, 0.0),
            Point2D::new(10.0, 10.0),
            Point2D::new(10.0, 0.0),
            Point2D::new(0.0, 10.0),
        ];
        let repaired = reorder_by_angle(&bowtie);
        assert_eq!(repaired.len(), 4);
        assert!(!has_kinks(&repaired));
        // 修复后面积为正方形面积
        assert!((ring_area(&repaired) - 100.0).abs() < 1e-10);
    }

    #[test]
    fn test_centroid_of_square() {
        let c = centroid(&square());
        assert!((c.x - 5.0).abs() < 1e-10);
        assert!((c.y - 5.0).abs() < 1e-10);
    }
}
