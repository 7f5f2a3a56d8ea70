// crates/sn_geo/src/projection.rs

//! 投影适配器
//!
//! 定义统一的正向投影接口，并提供两个内置实现：
//!
//! - [`IdentityProjection`]: 恒等变换，用于已投影的数据和测试
//! - [`TransverseMercator`]: 横轴墨卡托（UTM / 州平面式参数化），
//!   经典 Snyder 级数展开，平面精度厘米级，对排水网络建模足够
//!
//! 投影失败（纬度越界、非有限坐标）是致命错误，沿 `SnResult` 向上传播，
//! 调用方中止整个导出。

use crate::geometry::Point2D;
use sn_foundation::{SnError, SnResult};
use std::f64::consts::PI;

/// 国际英尺 (米)
const METERS_PER_FOOT: f64 = 0.3048;

/// 角度转弧度
#[inline]
fn deg_to_rad(deg: f64) -> f64 {
    deg * PI / 180.0
}

// ============================================================================
// 线性单位
// ============================================================================

/// 投影平面的线性单位
///
/// 决定输出文件 MAP 块的 `UNITS` 行，以及面积换算到英亩的系数。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinearUnit {
    /// 英尺
    Feet,
    /// 米
    Meters,
}

impl LinearUnit {
    /// 单位平方 -> 英亩 的换算系数
    ///
    /// 1 英亩 = 43560 平方英尺 = 4046.8564224 平方米
    #[must_use]
    pub fn acres_per_square_unit(&self) -> f64 {
        match self {
            Self::Feet => 1.0 / 43_560.0,
            Self::Meters => 0.000_247_105,
        }
    }

    /// MAP 块中的单位标签
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::Feet => "Feet",
            Self::Meters => "Meters",
        }
    }
}

// ============================================================================
// 椭球体
// ============================================================================

/// 参考椭球体参数
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ellipsoid {
    /// 长半轴 (米)
    pub a: f64,
    /// 扁率
    pub f: f64,
}

impl Ellipsoid {
    /// WGS84 椭球体
    pub const WGS84: Self = Self {
        a: 6_378_137.0,
        f: 1.0 / 298.257_223_563,
    };

    /// GRS80 椭球体（NAD83 州平面常用）
    pub const GRS80: Self = Self {
        a: 6_378_137.0,
        f: 1.0 / 298.257_222_101,
    };

    /// 第一偏心率的平方
    #[inline]
    #[must_use]
    pub fn e2(&self) -> f64 {
        self.f * (2.0 - self.f)
    }

    /// 短半轴 (米)
    #[inline]
    #[must_use]
    pub fn b(&self) -> f64 {
        self.a * (1.0 - self.f)
    }
}

// ============================================================================
// Projector Trait
// ============================================================================

/// 正向投影接口
///
/// 引擎只消费正向投影：经纬度 -> 平面坐标。实现必须是纯函数，
/// 引擎不会缓存或修改投影器。
pub trait Projector: Send + Sync {
    /// 获取投影名称
    fn name(&self) -> &'static str;

    /// 正向投影：地理坐标 -> 平面坐标
    ///
    /// # Arguments
    /// - `lon`: 经度 (度)
    /// - `lat`: 纬度 (度)
    ///
    /// # Returns
    /// (x, y) 平面坐标，单位由 [`Projector::unit`] 给出
    fn forward(&self, lon: f64, lat: f64) -> SnResult<(f64, f64)>;

    /// 平面坐标的线性单位
    fn unit(&self) -> LinearUnit;

    /// 投影一个点
    fn forward_point(&self, p: Point2D) -> SnResult<Point2D> {
        let (x, y) = self.forward(p.x, p.y)?;
        Ok(Point2D::new(x, y))
    }
}

// ============================================================================
// 恒等投影
// ============================================================================

/// 恒等投影
///
/// 输入已是平面坐标时使用（例如已按州平面发布的 shapefile），
/// 坐标原样通过，仅携带单位元数据。
#[derive(Debug, Clone, Copy)]
pub struct IdentityProjection {
    unit: LinearUnit,
}

impl IdentityProjection {
    /// 创建恒等投影
    #[must_use]
    pub const fn new(unit: LinearUnit) -> Self {
        Self { unit }
    }
}

impl Projector for IdentityProjection {
    fn name(&self) -> &'static str {
        "identity"
    }

    fn forward(&self, lon: f64, lat: f64) -> SnResult<(f64, f64)> {
        if !lon.is_finite() || !lat.is_finite() {
            return Err(SnError::projection(format!(
                "非有限坐标: ({lon}, {lat})"
            )));
        }
        Ok((lon, lat))
    }

    fn unit(&self) -> LinearUnit {
        self.unit
    }
}

// ============================================================================
// 横轴墨卡托
// ============================================================================

/// 横轴墨卡托投影
///
/// 经典 Snyder 级数（Map Projections: A Working Manual, USGS PP 1395,
/// 式 8-9 至 8-13）。支持 UTM 带和自定义中央子午线/比例因子参数化。
#[derive(Debug, Clone)]
pub struct TransverseMercator {
    /// 椭球体
    pub ellipsoid: Ellipsoid,
    /// 中央子午线 (度)
    pub central_meridian: f64,
    /// 纬度原点 (度)
    pub lat_origin: f64,
    /// 比例因子
    pub scale_factor: f64,
    /// 假东 (米)
    pub false_easting: f64,
    /// 假北 (米)
    pub false_northing: f64,
    /// 输出单位
    unit: LinearUnit,
}

impl TransverseMercator {
    /// 创建 UTM 带投影（输出米）
    #[must_use]
    pub fn utm(zone: u8, north: bool) -> Self {
        let central_meridian = f64::from(zone) * 6.0 - 183.0;
        Self {
            ellipsoid: Ellipsoid::WGS84,
            central_meridian,
            lat_origin: 0.0,
            scale_factor: 0.9996,
            false_easting: 500_000.0,
            false_northing: if north { 0.0 } else { 10_000_000.0 },
            unit: LinearUnit::Meters,
        }
    }

    /// 自定义横轴墨卡托参数（米制输入）
    #[must_use]
    pub fn custom(
        ellipsoid: Ellipsoid,
        central_meridian: f64,
        lat_origin: f64,
        scale_factor: f64,
        false_easting: f64,
        false_northing: f64,
    ) -> Self {
        Self {
            ellipsoid,
            central_meridian,
            lat_origin,
            scale_factor,
            false_easting,
            false_northing,
            unit: LinearUnit::Meters,
        }
    }

    /// 切换输出单位为英尺
    ///
    /// 假东/假北仍以米指定，输出坐标整体换算为国际英尺。
    #[must_use]
    pub fn with_feet(mut self) -> Self {
        self.unit = LinearUnit::Feet;
        self
    }

    /// 子午线弧长 M(φ)
    fn meridian_arc(&self, phi: f64) -> f64 {
        let a = self.ellipsoid.a;
        let e2 = self.ellipsoid.e2();
        let e4 = e2 * e2;
        let e6 = e4 * e2;

        a * ((1.0 - e2 / 4.0 - 3.0 * e4 / 64.0 - 5.0 * e6 / 256.0) * phi
            - (3.0 * e2 / 8.0 + 3.0 * e4 / 32.0 + 45.0 * e6 / 1024.0) * (2.0 * phi).sin()
            + (15.0 * e4 / 256.0 + 45.0 * e6 / 1024.0) * (4.0 * phi).sin()
            - (35.0 * e6 / 3072.0) * (6.0 * phi).sin())
    }
}

impl Projector for TransverseMercator {
    fn name(&self) -> &'static str {
        "transverse_mercator"
    }

    fn forward(&self, lon: f64, lat: f64) -> SnResult<(f64, f64)> {
        if !lon.is_finite() || !lat.is_finite() {
            return Err(SnError::projection(format!(
                "非有限坐标: ({lon}, {lat})"
            )));
        }
        if !(-90.0..=90.0).contains(&lat) {
            return Err(SnError::projection(format!("纬度越界: {lat}")));
        }

        let a = self.ellipsoid.a;
        let e2 = self.ellipsoid.e2();
        let ep2 = e2 / (1.0 - e2);
        let k0 = self.scale_factor;

        let phi = deg_to_rad(lat);
        let dlam = deg_to_rad(lon - self.central_meridian);

        let sin_phi = phi.sin();
        let cos_phi = phi.cos();
        let tan_phi = phi.tan();

        let n = a / (1.0 - e2 * sin_phi * sin_phi).sqrt();
        let t = tan_phi * tan_phi;
        let c = ep2 * cos_phi * cos_phi;
        let big_a = dlam * cos_phi;

        let m = self.meridian_arc(phi);
        let m0 = self.meridian_arc(deg_to_rad(self.lat_origin));

        let a2 = big_a * big_a;
        let a3 = a2 * big_a;
        let a4 = a3 * big_a;
        let a5 = a4 * big_a;
        let a6 = a5 * big_a;

        let x = k0
            * n
            * (big_a
                + (1.0 - t + c) * a3 / 6.0
                + (5.0 - 18.0 * t + t * t + 72.0 * c - 58.0 * ep2) * a5 / 120.0)
            + self.false_easting;

        let y = k0
            * (m - m0
                + n * tan_phi
                    * (a2 / 2.0
                        + (5.0 - t + 9.0 * c + 4.0 * c * c) * a4 / 24.0
                        + (61.0 - 58.0 * t + t * t + 600.0 * c - 330.0 * ep2) * a6 / 720.0))
            + self.false_northing;

        match self.unit {
            LinearUnit::Meters => Ok((x, y)),
            LinearUnit::Feet => Ok((x / METERS_PER_FOOT, y / METERS_PER_FOOT)),
        }
    }

    fn unit(&self) -> LinearUnit {
        self.unit
    }
}

// ============================================================================
// 测试
// ============================================================================
