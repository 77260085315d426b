//! 用户选择格式化
//!
//! 把前端收集到的选项（如 `["A", "B", "A", "C"]`）转换成 Agent 可识别的 "A、B、A、C"。

use serde_json::Value;

/// 选项分隔符（全角顿号 U+3001）
pub const CHOICE_SEPARATOR: &str = "、";

/// 过滤空白选项后用顿号连接
pub fn format_user_choices<S: AsRef<str>>(choices: &[S]) -> String {
    choices
        .iter()
        .map(|c| c.as_ref())
        .filter(|c| !c.trim().is_empty())
        .collect::<Vec<_>>()
        .join(CHOICE_SEPARATOR)
}

/// 前端直接传入 JSON 时使用：非数组返回空串，非字符串条目丢弃
pub fn format_user_choices_value(choices: &Value) -> String {
    match choices.as_array() {
        Some(items) => {
            let strings: Vec<&str> = items.iter().filter_map(|v| v.as_str()).collect();
            format_user_choices(&strings)
        }
        None => String::new(),
    }
}
