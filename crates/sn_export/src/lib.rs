// stormnet\crates\sn_export\src/lib.rs

//! StormNet SWMM 序列化模块
//!
//! 把合成好的管网模型渲染为 SWMM 输入文件（.inp 变体）：九个固定小节、
//! 制表符分隔的固定列序，注入到模板文档的同名小节中，并派生 MAP 范围块。
//!
//! # 模块
//!
//! - [`sections`]: 逐小节的行渲染与 POLYGONS 校验门
//! - [`template`]: 结构化模板文档（命名小节的解析与替换）
//! - [`swmm`]: 导出入口 [`swmm::SwmmExporter`]
//!
//! # 失败面
//!
//! 序列化前的校验门和模板小节缺失是仅有的致命错误来源；
//! 合成阶段的软问题全部进 [`sn_foundation::ExportLog`] 随结果返回。

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

pub mod sections;
pub mod swmm;
pub mod template;

// 重导出常用类型
pub use swmm::{ExportOutput, SwmmExporter};
pub use template::{TemplateDocument, DEFAULT_TEMPLATE};
