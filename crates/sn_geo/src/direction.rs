// crates/sn_geo/src/direction.rs

//! 八方位罗盘
//!
//! 管段端点的方位用于在检查井的方向性管底高程
//! (Invert N/S/E/W/NE/SE/SW/NW) 中挑选对应端口的读数。

use std::fmt;

/// 八方位
///
/// 角度从正北顺时针，每 45° 一档。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dir8 {
    /// 北
    N,
    /// 东北
    NE,
    /// 东
    E,
    /// 东南
    SE,
    /// 南
    S,
    /// 西南
    SW,
    /// 西
    W,
    /// 西北
    NW,
}

impl Dir8 {
    /// 全部方位，按罗盘顺时针顺序
    pub const ALL: [Self; 8] = [
        Self::N,
        Self::NE,
        Self::E,
        Self::SE,
        Self::S,
        Self::SW,
        Self::W,
        Self::NW,
    ];

    /// 罗盘序号 (N=0, NE=1, ..., NW=7)
    #[inline]
    #[must_use]
    pub fn index(&self) -> usize {
        match self {
            Self::N => 0,
            Self::NE => 1,
            Self::E => 2,
            Self::SE => 3,
            Self::S => 4,
            Self::SW => 5,
            Self::W => 6,
            Self::NW => 7,
        }
    }

    /// 从 a 指向 b 的方位
    ///
    /// `atan2(dx, dy)` 给出从正北顺时针的角度，按最近 45° 取档。
    /// 两点重合时返回北。
    #[must_use]
    pub fn between(a: (f64, f64), b: (f64, f64)) -> Self {
        let dx = b.0 - a.0;
        let dy = b.1 - a.1;
        let angle = dx.atan2(dy).to_degrees();
        let normalized = (angle + 360.0) % 360.0;
        let index = ((normalized / 45.0).round() as usize) % 8;
        Self::ALL[index]
    }
}

impl fmt::Display for Dir8 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::N => "N",
            Self::NE => "NE",
            Self::E => "E",
            Self::SE => "SE",
            Self::S => "S",
            Self::SW => "SW",
            Self::W => "W",
            Self::NW => "NW",
        };
        write!(f, "{s}")
    }
}

// ============================================================================
// 测试
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cardinal_directions() {
        let o = (0.0, 0.0);
        assert_eq!(Dir8::between(o, (0.0, 1.0)), Dir8::N);
        assert_eq!(Dir8::between(o, (1.0, 0.0)), Dir8::E);
        assert_eq!(Dir8::between(o, (0.0, -1.0)), Dir8::S);
        assert_eq!(Dir8::between(o, (-1.0, 0.0)), Dir8::W);
    }

    #[test]
    fn test_diagonal_directions() {
        let o = (0.0, 0.0);
        assert_eq!(Dir8::between(o, (1.0, 1.0)), Dir8::NE);
        assert_eq!(Dir8::between(o, (1.0, -1.0)), Dir8::SE);
        assert_eq!(Dir8::between(o, (-1.0, -1.0)), Dir8::SW);
        assert_eq!(Dir8::between(o, (-1.0, 1.0)), Dir8::NW);
    }

    #[test]
    fn test_rounding_to_nearest_sector() {
        // 22.6° 偏东北，落在 NE 档
        let o = (0.0, 0.0);
        let angle = 22.6f64.to_radians();
        assert_eq!(
            Dir8::between(o, (angle.sin(), angle.cos())),
            Dir8::NE
        );
        // 22.4° 仍是 N
        let angle = 22.4f64.to_radians();
        assert_eq!(Dir8::between(o, (angle.sin(), angle.cos())), Dir8::N);
    }

    #[test]
    fn test_index_order_matches_all() {
        for (i, d) in Dir8::ALL.iter().enumerate() {
            assert_eq!(d.index(), i);
        }
    }

    #[test]
    fn test_display() {
        assert_eq!(Dir8::NW.to_string(), "NW");
    }
}
