// stormnet\crates\sn_model\src/lib.rs

//! StormNet 管网模型合成
//!
//! 把原始图层要素合成为拓扑一致的水力网络模型：
//!
//! - [`nodes`]: 点要素 -> 节点记录（重合合并、出水口识别）
//! - [`links`]: 线要素 -> 管段记录（端点解析、流向推断、节点处拆分）
//! - [`subcatchments`]: 面要素 -> 排水分区记录（分组、环修复）
//! - [`records`]: 记录类型与聚合模型
//!
//! 数据单向流动：图层 -> 各合成器 -> [`records::ExportModel`]。
//! 管段合成依赖节点合成的结果，除此之外合成器互不调用。
//! 逐要素的数据缺口只进日志；只有投影失败会中断合成。

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

pub mod links;
pub mod nodes;
pub mod records;
pub mod subcatchments;

// 重导出常用类型
pub use links::synthesize_links;
pub use nodes::synthesize_nodes;
pub use records::{ExportModel, LinkRecord, NodeRecord, NodeSet, SubcatchmentRecord};
pub use subcatchments::synthesize_subcatchments;

use sn_foundation::{ExportLog, SnResult};
use sn_geo::projection::Projector;
use sn_layers::{LayerSet, LAYER_CATCH_BASINS, LAYER_DRAINAGE_AREAS, LAYER_PIPES};

/// 从图层集合合成完整模型
///
/// 缺失的图层对应空集合。每次调用生成全新模型，不持有任何跨调用状态；
/// 同一输入两次调用产生完全相同的记录序列。
///
/// # Errors
/// 投影失败时返回错误并中止。
pub fn synthesize_model(
    layers: &LayerSet,
    projector: &dyn Projector,
    log: &mut ExportLog,
) -> SnResult<ExportModel> {
    let node_set = synthesize_nodes(layers.get(LAYER_CATCH_BASINS), projector, log)?;
    let links = synthesize_links(layers.get(LAYER_PIPES), &node_set, projector, log)?;
    let subcatchments =
        synthesize_subcatchments(layers.get(LAYER_DRAINAGE_AREAS), projector, log)?;

    Ok(ExportModel {
        nodes: node_set.nodes,
        links,
        subcatchments,
    })
}
