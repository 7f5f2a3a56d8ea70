// crates/sn_layers/src/fields.rs

//! 规范字段解析器
//!
//! 上传图层的属性名拼写千差万别（"Inv Out [ft]"、"INV_OUT"、
//! "inv out ft:"），解析分两级：
//!
//! 1. 显式字段映射优先：用户在界面上把规范键绑定到了某个源属性名，
//!    且该属性存在，则原样返回
//! 2. 候选名兜底：属性键和候选名都规范化（转小写、去掉非字母数字）
//!    后逐个尝试，返回首个命中
//!
//! 没有命中返回 `None`——属性缺失是异构测绘数据的常态，不是错误。
//! 数值/字符串的类型收敛由 [`resolve_number`] / [`resolve_string`] 处理。

use crate::layer::FieldMap;
use serde_json::{Map, Value};

/// 规范键：标签
pub const KEY_LABEL: &str = "label";
/// 规范键：地面高程
pub const KEY_GROUND: &str = "ground";
/// 规范键：出口管底高程
pub const KEY_INV_OUT: &str = "inv_out";
/// 规范键：进口管底高程
pub const KEY_INV_IN: &str = "inv_in";
/// 规范键：管径
pub const KEY_DIAMETER: &str = "diameter";
/// 规范键：糙率
pub const KEY_ROUGHNESS: &str = "roughness";
/// 规范键：流向描述
pub const KEY_DIRECTION: &str = "direction";

/// 方向性管底高程的规范键，按罗盘顺序 N, NE, E, SE, S, SW, W, NW
pub const KEYS_DIR_INVERT: [&str; 8] = [
    "inv_n", "inv_ne", "inv_e", "inv_se", "inv_s", "inv_sw", "inv_w", "inv_nw",
];

/// 方向性管底高程的源属性候选名，与 [`KEYS_DIR_INVERT`] 同序
pub const CANDIDATES_DIR_INVERT: [&str; 8] = [
    "Invert N [ft]",
    "Invert NE [ft]",
    "Invert E [ft]",
    "Invert SE [ft]",
    "Invert S [ft]",
    "Invert SW [ft]",
    "Invert W [ft]",
    "Invert NW [ft]",
];

/// 属性键规范化：转小写、去掉非字母数字
#[must_use]
pub fn normalize_key(key: &str) -> String {
    key.chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

/// 解析规范字段
///
/// 显式映射命中时原样返回映射到的属性值；否则按规范化候选名兜底。
/// 都未命中返回 `None`。
#[must_use]
pub fn resolve_field<'a>(
    props: Option<&'a Map<String, Value>>,
    field_map: Option<&FieldMap>,
    key: &str,
    candidates: &[&str],
) -> Option<&'a Value> {
    let props = props?;

    // 显式映射优先
    if let Some(map) = field_map {
        if let Some(source) = map.get(key) {
            if let Some(value) = props.get(source) {
                return Some(value);
            }
        }
    }

    // 规范化兜底查找
    let lookup: std::collections::HashMap<String, &String> = props
        .keys()
        .map(|k| (normalize_key(k), k))
        .collect();
    for cand in candidates {
        if let Some(actual) = lookup.get(&normalize_key(cand)) {
            return props.get(*actual);
        }
    }
    None
}

/// 解析为数值
///
/// JSON 数值直接取值；字符串尝试按十进制解析（shapefile 属性表经常
/// 把数值列导出成文本）。`null`、非数值文本返回 `None`。
#[must_use]
pub fn resolve_number(
    props: Option<&Map<String, Value>>,
    field_map: Option<&FieldMap>,
    key: &str,
    candidates: &[&str],
) -> Option<f64> {
    let value = resolve_field(props, field_map, key, candidates)?;
    coerce_number(value)
}

/// 解析为非空字符串
///
/// 数值会被格式化为文本；空串和 `null` 返回 `None`。
#[must_use]
pub fn resolve_string(
    props: Option<&Map<String, Value>>,
    field_map: Option<&FieldMap>,
    key: &str,
    candidates: &[&str],
) -> Option<String> {
    let value = resolve_field(props, field_map, key, candidates)?;
    match value {
        Value::String(s) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                None
            } else {
                Some(s.clone())
            }
        }
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// JSON 值到 f64 的收敛
#[must_use]
pub fn coerce_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64().filter(|v| v.is_finite()),
        Value::String(s) => s.trim().parse::<f64>().ok().filter(|v| v.is_finite()),
        _ => None,
    }
}

// ============================================================================
// 测试
// ============================================================================
