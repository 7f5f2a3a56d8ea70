// crates/sn_geo/src/bounds.rs

//! 包围盒
//!
//! 输出文件 MAP 块的范围计算：覆盖所有多边形顶点，每轴外扩 1%。

use crate::geometry::Point2D;

/// 边界框
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    /// 最小 x
    pub min_x: f64,
    /// 最小 y
    pub min_y: f64,
    /// 最大 x
    pub max_x: f64,
    /// 最大 y
    pub max_y: f64,
}

impl BoundingBox {
    /// 创建新的边界框
    #[must_use]
    pub fn new(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Self {
        Self {
            min_x: min_x.min(max_x),
            min_y: min_y.min(max_y),
            max_x: min_x.max(max_x),
            max_y: min_y.max(max_y),
        }
    }

    /// 从点集创建，空集返回 None
    #[must_use]
    pub fn from_points<'a, I>(points: I) -> Option<Self>
    where
        I: IntoIterator<Item = &'a Point2D>,
    {
        let mut iter = points.into_iter();
        let first = iter.next()?;
        let mut bbox = Self {
            min_x: first.x,
            min_y: first.y,
            max_x: first.x,
            max_y: first.y,
        };
        for p in iter {
            bbox.expand_point(p);
        }
        Some(bbox)
    }

    /// 扩展到包含指定点
    pub fn expand_point(&mut self, p: &Point2D) {
        self.min_x = self.min_x.min(p.x);
        self.min_y = self.min_y.min(p.y);
        self.max_x = self.max_x.max(p.x);
        self.max_y = self.max_y.max(p.y);
    }

    /// 计算宽度
    #[must_use]
    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    /// 计算高度
    #[must_use]
    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }

    /// 每轴按范围比例外扩
    ///
    /// `fraction` 为每轴范围的倍数（MAP 块使用 0.01）。
    #[must_use]
    pub fn padded(&self, fraction: f64) -> Self {
        let dx = self.width() * fraction;
        let dy = self.height() * fraction;
        Self {
            min_x: self.min_x - dx,
            min_y: self.min_y - dy,
            max_x: self.max_x + dx,
            max_y: self.max_y + dy,
        }
    }

    /// 检查点是否在边界框内
    #[must_use]
    pub fn contains_point(&self, point: &Point2D) -> bool {
        point.x >= self.min_x
            && point.x <= self.max_x
            && point.y >= self.min_y
            && point.y <= self.max_y
    }
}

// ============================================================================
// 测试
// ============================================================================
