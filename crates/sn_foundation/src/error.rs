// crates/sn_foundation/src/error.rs

//! 错误处理模块，定义统一错误类型
//!
//! 提供 `SnError` 枚举和 `SnResult` 类型别名，用于整个项目的错误处理。
//!
//! # 设计原则
//!
//! 1. **分层**: 逐要素的数据缺口不产生错误（见 [`crate::log`]），
//!    只有结构性问题才构造 `SnError`
//! 2. **可呈现**: 每个错误携带严重级别，调用方可与日志条目统一展示
//! 3. **可追溯**: IO 错误保留底层 source

use crate::log::LogLevel;
use thiserror::Error;

/// 统一结果类型
pub type SnResult<T> = Result<T, SnError>;

/// StormNet 错误类型
///
/// 导出引擎的致命错误面。逐要素的软问题走 `ExportLog`，不在此处。
#[derive(Error, Debug)]
pub enum SnError {
    // ========================================================================
    // 模板相关错误
    // ========================================================================

    /// 模板缺少必需的小节
    #[error("模板缺少小节: [{section}]")]
    TemplateSectionMissing {
        /// 小节名（不含方括号）
        section: String,
    },

    /// 小节行格式非法
    #[error("小节 [{section}] 行格式非法: \"{line}\"")]
    MalformedSectionLine {
        /// 小节名
        section: &'static str,
        /// 原始行内容
        line: String,
    },

    // ========================================================================
    // 几何与投影错误
    // ========================================================================

    /// 投影失败
    #[error("投影失败: {0}")]
    Projection(String),

    // ========================================================================
    // IO 与解析错误
    // ========================================================================

    /// IO 错误
    #[error("IO错误: {message}")]
    Io {
        /// 描述性错误信息
        message: String,
        /// 可选的底层 IO 错误
        #[source]
        source: Option<std::io::Error>,
    },

    /// GeoJSON 解析错误
    #[error("GeoJSON 解析错误: {message}")]
    GeoJson {
        /// 解析失败原因
        message: String,
    },

    /// 无效输入
    #[error("无效的输入数据: {message}")]
    InvalidInput {
        /// 说明无效原因
        message: String,
    },
}

impl SnError {
    /// 构造模板小节缺失错误
    pub fn template_section_missing(section: impl Into<String>) -> Self {
        Self::TemplateSectionMissing {
            section: section.into(),
        }
    }

    /// 构造投影错误
    pub fn projection(message: impl Into<String>) -> Self {
        Self::Projection(message.into())
    }

    /// 构造 IO 错误
    pub fn io(message: impl Into<String>, source: Option<std::io::Error>) -> Self {
        Self::Io {
            message: message.into(),
            source,
        }
    }

    /// 构造无效输入错误
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput {
            message: message.into(),
        }
    }

    /// 错误的严重级别
    ///
    /// 目前所有 `SnError` 都是致命的，统一为 [`LogLevel::Error`]；
    /// 调用方据此与软问题日志统一呈现。
    #[must_use]
    pub fn level(&self) -> LogLevel {
        LogLevel::Error
    }
}

impl From<std::io::Error> for SnError {
    fn from(e: std::io::Error) -> Self {
        Self::Io {
            message: e.to_string(),
            source: Some(e),
        }
    }
}

// ============================================================================
// 测试
// ============================================================================
