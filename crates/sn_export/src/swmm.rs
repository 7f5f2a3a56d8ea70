// crates/sn_export/src/swmm.rs

//! SWMM 导出入口
//!
//! 对输入图层快照做一次完整的 合成 -> 渲染 -> 校验 -> 模板注入，
//! 返回文件名、文件内容和导出日志。引擎不持有跨调用状态，
//! 同一输入两次导出的输出逐字节一致。

use crate::sections;
use crate::template::{TemplateDocument, DEFAULT_TEMPLATE};
use sn_foundation::{ExportLog, SnResult};
use sn_geo::bounds::BoundingBox;
use sn_geo::projection::Projector;
use sn_layers::LayerSet;
use sn_model::{synthesize_model, ExportModel};
use std::collections::BTreeSet;

/// MAP 范围块每轴的外扩比例
const MAP_PADDING: f64 = 0.01;

/// 导出结果
#[derive(Debug, Clone)]
pub struct ExportOutput {
    /// 下载文件名：`{项目名}_{版本}.inp`
    pub filename: String,
    /// 完整文件内容
    pub content: String,
    /// 合成过程中的软问题日志
    pub log: ExportLog,
}

/// SWMM 导出器
///
/// # 示例
///
/// ```no_run
/// use sn_export::SwmmExporter;
/// use sn_geo::projection::{IdentityProjection, LinearUnit};
/// use sn_layers::LayerSet;
///
/// let exporter = SwmmExporter::new("v2").project_name("riverside");
/// let projector = IdentityProjection::new(LinearUnit::Feet);
/// let output = exporter.export(&LayerSet::default(), &projector)?;
/// assert_eq!(output.filename, "riverside_v2.inp");
/// # Ok::<(), sn_foundation::SnError>(())
/// ```
#[derive(Debug, Clone)]
pub struct SwmmExporter {
    project_name: Option<String>,
    version: String,
    template: Option<String>,
}

impl SwmmExporter {
    /// 创建导出器，`version` 进入输出文件名
    #[must_use]
    pub fn new(version: impl Into<String>) -> Self {
        Self {
            project_name: None,
            version: version.into(),
            template: None,
        }
    }

    /// 设置项目名（缺省 "project"）
    #[must_use]
    pub fn project_name(mut self, name: impl Into<String>) -> Self {
        self.project_name = Some(name.into());
        self
    }

    /// 使用调用方提供的模板文本替代内置模板
    #[must_use]
    pub fn template(mut self, text: impl Into<String>) -> Self {
        self.template = Some(text.into());
        self
    }

    /// 执行导出
    ///
    /// # Errors
    ///
    /// - 投影失败
    /// - POLYGONS 校验门不通过
    /// - 模板缺少需要写入的小节
    pub fn export(&self, layers: &LayerSet, projector: &dyn Projector) -> SnResult<ExportOutput> {
        let mut log = ExportLog::new();
        let model = synthesize_model(layers, projector, &mut log)?;

        let content = self.render(&model, projector, &mut log)?;

        let filename = format!(
            "{}_{}.inp",
            self.project_name.as_deref().unwrap_or("project"),
            self.version
        );

        Ok(ExportOutput {
            filename,
            content,
            log,
        })
    }

    /// 渲染模型到模板
    fn render(
        &self,
        model: &ExportModel,
        projector: &dyn Projector,
        log: &mut ExportLog,
    ) -> SnResult<String> {
        let valid_ids: BTreeSet<String> =
            model.subcatchments.iter().map(|s| s.id.clone()).collect();

        let polygon_lines = sections::filter_polygon_lines(
            sections::render_polygons(&model.subcatchments),
            &valid_ids,
        );
        sections::validate_polygon_lines(&polygon_lines)?;

        let mut doc =
            TemplateDocument::parse(self.template.as_deref().unwrap_or(DEFAULT_TEMPLATE));

        let blocks: [(&str, &str, Vec<String>); 9] = [
            (
                "SUBCATCHMENTS",
                sections::SUBCATCH_HEADER,
                sections::render_subcatchments(&model.subcatchments),
            ),
            (
                "SUBAREAS",
                sections::SUBAREA_HEADER,
                sections::render_subareas(&model.subcatchments),
            ),
            (
                "INFILTRATION",
                sections::INFIL_HEADER,
                sections::render_infiltration(&model.subcatchments),
            ),
            ("POLYGONS", sections::POLYGON_HEADER, polygon_lines.clone()),
            (
                "JUNCTIONS",
                sections::JUNCTION_HEADER,
                sections::render_junctions(&model.nodes),
            ),
            (
                "OUTFALLS",
                sections::OUTFALL_HEADER,
                sections::render_outfalls(&model.nodes),
            ),
            (
                "CONDUITS",
                sections::CONDUIT_HEADER,
                sections::render_conduits(&model.links),
            ),
            (
                "XSECTIONS",
                sections::XSECTION_HEADER,
                sections::render_xsections(&model.links),
            ),
            (
                "COORDINATES",
                sections::COORD_HEADER,
                sections::render_coordinates(&model.nodes),
            ),
        ];

        for (name, header, lines) in blocks {
            let body = if lines.is_empty() {
                header.to_string()
            } else {
                format!("{header}\n{}", lines.join("\n"))
            };
            doc.replace_section(name, &body)?;
        }

        // MAP 范围块：覆盖所有输出顶点，每轴外扩 1%
        if !polygon_lines.is_empty() {
            let bbox = BoundingBox::from_points(
                model
                    .subcatchments
                    .iter()
                    .flat_map(|s| s.rings.iter().flatten()),
            );
            if let Some(bbox) = bbox {
                let padded = bbox.padded(MAP_PADDING);
                let map_body = format!(
                    "DIMENSIONS       {} {}  {} {}\nUNITS            {}",
                    padded.min_x,
                    padded.min_y,
                    padded.max_x,
                    padded.max_y,
                    projector.unit().label()
                );
                doc.replace_section("MAP", &map_body)?;
            }
        }

        log.info("SWMM file exported");
        Ok(doc.render())
    }
}

// ============================================================================
// 测试
// ============================================================================
