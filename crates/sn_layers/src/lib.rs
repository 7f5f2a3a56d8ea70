// stormnet\crates\sn_layers\src/lib.rs

//! StormNet 图层数据模型
//!
//! 上传的 shapefile 经外围应用转换为 GeoJSON 图层后进入引擎。
//! 本 crate 定义只读的图层快照类型和属性解析工具。
//!
//! # 模块
//!
//! - `geojson`: 带标签的几何枚举与要素集合
//! - `layer`: 图层容器与已知图层名
//! - `fields`: 规范字段解析器（显式映射优先，候选名兜底）
//! - `ident`: 模型标识符清理
//!
//! # 示例
//!
//! ```
//! use serde_json::json;
//! use sn_layers::fields::resolve_number;
//!
//! let props = json!({ "Inv Out [ft]": "95.5" });
//! let props = props.as_object().unwrap();
//! let v = resolve_number(Some(props), None, "inv_out", &["Inv Out [ft]"]);
//! assert_eq!(v, Some(95.5));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

pub mod fields;
pub mod geojson;
pub mod ident;
pub mod layer;

// 重导出常用类型
pub use geojson::{Feature, FeatureCollection, Geometry};
pub use ident::sanitize_id;
pub use layer::{FieldMap, LayerData, LayerSet};
pub use layer::{LAYER_CATCH_BASINS, LAYER_DRAINAGE_AREAS, LAYER_PIPES};
