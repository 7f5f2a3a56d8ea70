// crates/sn_layers/src/ident.rs

//! 模型标识符清理
//!
//! 建模软件的节点/管段/分区名不允许空白和特殊字符，长度上限 31。
//! 源属性里的标签按下列规则清理：
//!
//! 1. 空白标签用 `S{序号+1}` 占位
//! 2. 非字母数字、下划线、连字符的字符替换为 `_`
//! 3. 连续 `_` 折叠为一个
//! 4. 截断到 31 个字符

/// 标识符长度上限
const MAX_ID_LEN: usize = 31;

/// 清理标识符
///
/// `index` 是要素在图层中的序号，仅在标签为空时用于合成占位名。
///
/// # 示例
///
/// ```
/// use sn_layers::ident::sanitize_id;
///
/// assert_eq!(sanitize_id("CB #4 (new)", 0), "CB_4_new_");
/// assert_eq!(sanitize_id("", 2), "S3");
/// ```
#[must_use]
pub fn sanitize_id(raw: &str, index: usize) -> String {
    let trimmed = raw.trim();
    let source: String = if trimmed.is_empty() {
        format!("S{}", index + 1)
    } else {
        trimmed.to_string()
    };

    // 非法字符替换为 _，连续 _ 折叠
    let mut out = String::with_capacity(source.len());
    for ch in source.chars() {
        if ch.is_ascii_alphanumeric() || ch == '-' {
            out.push(ch);
        } else if !out.ends_with('_') {
            out.push('_');
        }
    }

    out.chars().take(MAX_ID_LEN).collect()
}

// ============================================================================
// 测试
// ============================================================================
