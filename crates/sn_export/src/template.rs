// crates/sn_export/src/template.rs

//! 结构化模板文档
//!
//! SWMM 输入文件由 `[NAME]` 方括号小节组成。模板在这里解析成命名小节
//! 的有序列表，替换按小节名进行——不做正则拼接，杜绝小节边界误判。
//!
//! 模板来源是一次性加载（内置常量或调用方提供的文本），没有重试逻辑；
//! 加载失败对导出是致命的。

use sn_foundation::{SnError, SnResult};

/// 内置最小模板
pub const DEFAULT_TEMPLATE: &str = include_str!("templates/default.inp");

/// 一个命名小节
#[derive(Debug, Clone)]
struct Section {
    /// 小节名（不含方括号）
    name: String,
    /// 小节体（不含头行，保留原有行）
    body: String,
}

/// 结构化模板文档
///
/// 保留小节的原始顺序和未被替换小节的原始内容。
#[derive(Debug, Clone)]
pub struct TemplateDocument {
    /// 首个小节之前的内容
    preamble: String,
    sections: Vec<Section>,
}

/// 判断是否为 `[NAME]` 小节头行
fn section_name(line: &str) -> Option<&str> {
    let trimmed = line.trim();
    if trimmed.len() >= 2 && trimmed.starts_with('[') && trimmed.ends_with(']') {
        Some(&trimmed[1..trimmed.len() - 1])
    } else {
        None
    }
}

impl TemplateDocument {
    /// 解析模板文本
    #[must_use]
    pub fn parse(text: &str) -> Self {
        let mut preamble = String::new();
        let mut sections: Vec<Section> = Vec::new();

        for line in text.lines() {
            if let Some(name) = section_name(line) {
                sections.push(Section {
                    name: name.to_string(),
                    body: String::new(),
                });
            } else if let Some(current) = sections.last_mut() {
                current.body.push_str(line);
                current.body.push('\n');
            } else {
                preamble.push_str(line);
                preamble.push('\n');
            }
        }

        Self { preamble, sections }
    }

    /// 是否存在指定小节
    #[must_use]
    pub fn has_section(&self, name: &str) -> bool {
        self.sections.iter().any(|s| s.name == name)
    }

    /// 替换小节体
    ///
    /// `body` 不需要带尾随换行。小节不存在时返回错误——
    /// 需要写入的小节在模板里必须有落点。
    ///
    /// # Errors
    /// 小节缺失时返回 [`SnError::TemplateSectionMissing`]。
    pub fn replace_section(&mut self, name: &str, body: &str) -> SnResult<()> {
        let section = self
            .sections
            .iter_mut()
            .find(|s| s.name == name)
            .ok_or_else(|| SnError::template_section_missing(name))?;
        section.body = if body.is_empty() {
            String::new()
        } else {
            format!("{body}\n")
        };
        Ok(())
    }

    /// 渲染为完整文本
    #[must_use]
    pub fn render(&self) -> String {
        let mut out = String::with_capacity(self.preamble.len() + 256);
        out.push_str(&self.preamble);
        for (i, section) in self.sections.iter().enumerate() {
            out.push('[');
            out.push_str(&section.name);
            out.push_str("]\n");
            out.push_str(&section.body);
            // 小节之间保持一个空行分隔
            if i + 1 < self.sections.len() && !section.body.ends_with("\n\n") {
                out.push('\n');
            }
        }
        out
    }
}

// ============================================================================
// 测试
// ============================================================================
