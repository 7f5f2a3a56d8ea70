// crates/sn_foundation/src/log.rs

//! 导出日志
//!
//! 记录合成过程中遇到的软问题（退化环、被丢弃的要素、缺失字段），
//! 导出成功时整个日志仍返回给调用方展示。
//!
//! # 示例
//!
//! ```
//! use sn_foundation::log::{ExportLog, LogLevel};
//!
//! let mut log = ExportLog::new();
//! log.info("SWMM file exported");
//! log.warn("[POLYGONS] degenerate ring in DA-3");
//!
//! assert_eq!(log.len(), 2);
//! assert!(log.has_warnings());
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;

/// 日志级别
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// 提示信息
    Info,
    /// 警告（要素被修复或丢弃，导出继续）
    Warn,
    /// 错误（与致命 `SnError` 同级呈现）
    Error,
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Info => write!(f, "info"),
            Self::Warn => write!(f, "warn"),
            Self::Error => write!(f, "error"),
        }
    }
}

/// 单条日志
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEntry {
    /// 消息文本
    pub message: String,
    /// 级别
    pub level: LogLevel,
}

/// 导出日志
///
/// 条目按产生顺序保存，保证同一输入得到相同日志序列。
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExportLog {
    /// 日志条目
    pub entries: Vec<LogEntry>,
}

impl ExportLog {
    /// 创建空日志
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// 追加一条日志
    pub fn push(&mut self, level: LogLevel, message: impl Into<String>) {
        self.entries.push(LogEntry {
            message: message.into(),
            level,
        });
    }

    /// 追加提示
    pub fn info(&mut self, message: impl Into<String>) {
        self.push(LogLevel::Info, message);
    }

    /// 追加警告
    pub fn warn(&mut self, message: impl Into<String>) {
        self.push(LogLevel::Warn, message);
    }

    /// 追加错误
    pub fn error(&mut self, message: impl Into<String>) {
        self.push(LogLevel::Error, message);
    }

    /// 条目数量
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// 是否为空
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// 是否含警告
    #[must_use]
    pub fn has_warnings(&self) -> bool {
        self.entries.iter().any(|e| e.level == LogLevel::Warn)
    }

    /// 是否含错误
    #[must_use]
    pub fn has_errors(&self) -> bool {
        self.entries.iter().any(|e| e.level == LogLevel::Error)
    }

    /// 按级别计数
    #[must_use]
    pub fn count(&self, level: LogLevel) -> usize {
        self.entries.iter().filter(|e| e.level == level).count()
    }

    /// 合并另一个日志
    pub fn merge(&mut self, other: ExportLog) {
        self.entries.extend(other.entries);
    }
}

impl fmt::Display for ExportLog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "导出日志:")?;
        writeln!(f, "  提示: {} 条", self.count(LogLevel::Info))?;
        writeln!(f, "  警告: {} 条", self.count(LogLevel::Warn))?;
        writeln!(f, "  错误: {} 条", self.count(LogLevel::Error))?;
        for entry in &self.entries {
            writeln!(f, "  [{}] {}", entry.level, entry.message)?;
        }
        Ok(())
    }
}

// ============================================================================
// 测试
// ============================================================================
