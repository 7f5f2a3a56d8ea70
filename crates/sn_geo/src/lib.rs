// stormnet\crates\sn_geo\src/lib.rs

//! StormNet 平面几何模块
//!
//! 提供投影适配、环清理修复、包围盒和八方位计算。
//!
//! # 模块
//!
//! - `geometry`: 平面点类型 (Point2D)
//! - `projection`: 投影适配器 (恒等、横轴墨卡托/UTM)
//! - `ring`: 多边形环工具（面积、去重、自交检测、角度排序修复）
//! - `bounds`: 包围盒
//! - `direction`: 八方位罗盘
//!
//! # 示例
//!
//! ```
//! use sn_geo::prelude::*;
//!
//! let proj = IdentityProjection::new(LinearUnit::Feet);
//! let (x, y) = proj.forward(12.5, 3.0).unwrap();
//! assert_eq!((x, y), (12.5, 3.0));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

pub mod bounds;
pub mod direction;
pub mod geometry;
pub mod projection;
pub mod ring;

/// 预导入模块
pub mod prelude {
    pub use crate::bounds::BoundingBox;
    pub use crate::direction::Dir8;
    pub use crate::geometry::Point2D;
    pub use crate::projection::{
        Ellipsoid, IdentityProjection, LinearUnit, Projector, TransverseMercator,
    };
}

// 重导出常用类型
pub use bounds::BoundingBox;
pub use direction::Dir8;
pub use geometry::Point2D;
pub use projection::{Ellipsoid, IdentityProjection, LinearUnit, Projector, TransverseMercator};
