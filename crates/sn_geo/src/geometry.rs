// crates/sn_geo/src/geometry.rs

//! 几何类型定义
//!
//! 提供项目统一的平面点类型。所有距离计算都假定投影后的平面坐标，
//! 单位与投影单位一致（英尺或米）。

use serde::{Deserialize, Serialize};
use std::ops::{Add, Mul, Neg, Sub};

/// 2D点 - 平面坐标（或投影前的经纬度对）
///
/// # 示例
///
/// ```
/// use sn_geo::geometry::Point2D;
///
/// let p1 = Point2D::new(0.0, 0.0);
/// let p2 = Point2D::new(3.0, 4.0);
/// assert!((p1.distance_to(&p2) - 5.0).abs() < 1e-10);
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Point2D {
    /// X坐标（或经度）
    pub x: f64,
    /// Y坐标（或纬度）
    pub y: f64,
}

impl Point2D {
    /// 零点常量
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };

    /// 创建新的2D点
    #[inline]
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// 从经纬度创建（lon, lat）
    #[inline]
    #[must_use]
    pub const fn from_lonlat(lon: f64, lat: f64) -> Self {
        Self { x: lon, y: lat }
    }

    /// 计算到另一个点的欧几里得距离
    ///
    /// 适用于投影坐标，单位与坐标单位一致。**不要用于经纬度坐标！**
    #[inline]
    #[must_use]
    pub fn distance_to(&self, other: &Self) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }

    /// 计算到另一个点的距离的平方
    #[inline]
    #[must_use]
    pub fn distance_squared_to(&self, other: &Self) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        dx * dx + dy * dy
    }

    /// 点积
    #[inline]
    #[must_use]
    pub fn dot(&self, other: &Self) -> f64 {
        self.x * other.x + self.y * other.y
    }

    /// 叉积（返回标量，即Z分量）
    #[inline]
    #[must_use]
    pub fn cross(&self, other: &Self) -> f64 {
        self.x * other.y - self.y * other.x
    }

    /// 向量长度
    #[inline]
    #[must_use]
    pub fn length(&self) -> f64 {
        (self.x * self.x + self.y * self.y).sqrt()
    }

    /// 判断是否为有限数（非NaN、非Inf）
    #[inline]
    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    /// 标量乘法
    #[inline]
    #[must_use]
    pub fn scale(&self, factor: f64) -> Self {
        Self {
            x: self.x * factor,
            y: self.y * factor,
        }
    }
}

// ============================================================================
// 运算符实现
// ============================================================================

impl Add for Point2D {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Self {
            x: self.x + other.x,
            y: self.y + other.y,
        }
    }
}

impl Sub for Point2D {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Self {
            x: self.x - other.x,
            y: self.y - other.y,
        }
    }
}

impl Neg for Point2D {
    type Output = Self;

    #[inline]
    fn neg(self) -> Self {
        Self {
            x: -self.x,
            y: -self.y,
        }
    }
}

impl Mul<f64> for Point2D {
    type Output = Self;

    #[inline]
    fn mul(self, scalar: f64) -> Self {
        self.scale(scalar)
    }
}

// ============================================================================
// 转换实现
// ============================================================================

impl From<[f64; 2]> for Point2D {
    fn from([x, y]: [f64; 2]) -> Self {
        Self::new(x, y)
    }
}

impl From<Point2D> for [f64; 2] {
    fn from(p: Point2D) -> Self {
        [p.x, p.y]
    }
}

impl From<(f64, f64)> for Point2D {
    fn from((x, y): (f64, f64)) -> Self {
        Self::new(x, y)
    }
}

impl From<Point2D> for (f64, f64) {
    fn from(p: Point2D) -> Self {
        (p.x, p.y)
    }
}

// ============================================================================
// 测试
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_point2d_new() {
        let p = Point2D::new(1.0, 2.0);
        assert_eq!(p.x, 1.0);
        assert_eq!(p.y, 2.0);
    }

    #[test]
    fn test_point2d_distance() {
        let p1 = Point2D::new(0.0, 0.0);
        let p2 = Point2D::new(3.0, 4.0);
        assert!((p1.distance_to(&p2) - 5.0).abs() < 1e-10);
        assert!((p1.distance_squared_to(&p2) - 25.0).abs() < 1e-10);
    }

    #[test]
    fn test_point2d_ops() {
        let p1 = Point2D::new(1.0, 2.0);
        let p2 = Point2D::new(3.0, 5.0);
        let sum = p1 + p2;
        let diff = p2 - p1;
        assert_eq!(sum, Point2D::new(4.0, 7.0));
        assert_eq!(diff, Point2D::new(2.0, 3.0));
        assert_eq!(-p1, Point2D::new(-1.0, -2.0));
        assert_eq!(p1 * 2.0, Point2D::new(2.0, 4.0));
    }

    #[test]
    fn test_point2d_cross() {
        let i = Point2D::new(1.0, 0.0);
        let j = Point2D::new(0.0, 1.0);
        assert!((i.cross(&j) - 1.0).abs() < 1e-10);
        assert!((j.cross(&i) + 1.0).abs() < 1e-10);
    }

    #[test]
    fn test_point2d_is_finite() {
        assert!(Point2D::new(1.0, 2.0).is_finite());
        assert!(!Point2D::new(f64::NAN, 2.0).is_finite());
        assert!(!Point2D::new(1.0, f64::INFINITY).is_finite());
    }

    #[test]
    fn test_point2d_conversions() {
        let p: Point2D = [3.0, 4.0].into();
        assert_eq!(p, Point2D::new(3.0, 4.0));
        let t: (f64, f64) = p.into();
        assert_eq!(t, (3.0, 4.0));
    }
}
