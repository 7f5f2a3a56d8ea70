// stormnet\crates\sn_foundation\src/lib.rs

//! StormNet Foundation Layer
//!
//! 雨水管网导出引擎的基础层，提供统一错误类型和导出日志。
//!
//! # 模块概览
//!
//! - [`error`]: 统一错误类型 (`SnError` / `SnResult`)
//! - [`log`]: 导出日志 (`ExportLog`，info/warn/error 条目)
//!
//! # 设计原则
//!
//! 1. **最小依赖**: 仅依赖 serde 和 thiserror
//! 2. **可跳过 vs 致命**: 逐要素的数据缺口只进日志，结构性错误才返回 `SnError`
//! 3. **日志随成功返回**: 导出成功时调用方仍可看到所有软问题
//!
//! # 示例
//!
//! ```
//! use sn_foundation::{ExportLog, SnError, SnResult};
//!
//! fn check_template(has_section: bool) -> SnResult<()> {
//!     if !has_section {
//!         return Err(SnError::template_section_missing("JUNCTIONS"));
//!     }
//!     Ok(())
//! }
//!
//! let mut log = ExportLog::new();
//! log.warn("degenerate ring dropped");
//! assert!(log.has_warnings());
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;
pub mod log;

// 重导出常用类型
pub use error::{SnError, SnResult};
pub use log::{ExportLog, LogEntry, LogLevel};

/// Prelude 模块，包含常用类型
pub mod prelude {
    pub use crate::error::{SnError, SnResult};
    pub use crate::log::{ExportLog, LogEntry, LogLevel};
}
