//! 前置条件问题提取
//!
//! Agent 输出的 JSON 格式并不稳定：可能是纯 JSON、```json 代码块、
//! 普通代码块，或者夹在说明文字中的对象/数组。这里按固定顺序依次尝试，
//! 第一个通过形状检查的结果胜出。

use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value;
use tracing::{debug, trace};

use crate::interpreter::types::{AgentReply, QuestionSet};

/// ```json ... ``` 代码块（非贪婪，只取第一个）
static FENCED_JSON_BLOCK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)```json\s*(.*?)\s*```").expect("valid fenced json regex"));

/// ``` ... ``` 代码块（无语言标记）
static FENCED_BLOCK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)```\s*(.*?)\s*```").expect("valid fenced block regex"));

/// 第一个 `{` 到最后一个 `}`
static OUTER_OBJECT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)\{.*\}").expect("valid object regex"));

/// 第一个 `[` 到最后一个 `]`
static OUTER_ARRAY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)\[.*\]").expect("valid array regex"));

/// 单次尝试的结果
#[derive(Debug, Clone, PartialEq)]
pub enum Attempt {
    /// 提取成功
    Matched(QuestionSet),
    /// 本次未命中，继续下一种方式
    Absent,
    /// 结论性否定：整段文本是合法 JSON 但不是问题集，终止后续尝试
    Conclusive,
}

/// 单个提取策略：`(trimmed_text, default_message) -> Attempt`
pub type Strategy = fn(&str, &str) -> Attempt;

/// 按顺序执行的提取策略
pub const STRATEGIES: &[(&str, Strategy)] = &[
    ("whole_json", parse_whole_text),
    ("fenced_json_block", parse_fenced_json_block),
    ("fenced_block", parse_fenced_block),
    ("outer_object", parse_outer_object),
    ("outer_array", parse_outer_array),
];

/// 从 Agent 回复中提取前置条件问题集
///
/// # 返回
/// - `Some(QuestionSet)`: 提取成功
/// - `None`: 所有方式都失败
pub fn extract_questions(reply: &AgentReply, default_message: &str) -> Option<QuestionSet> {
    if let Some(text) = reply.as_text() {
        return extract_from_text(text, default_message);
    }
    match reply {
        AgentReply::Structured(value) => extract_from_value(value, default_message),
        AgentReply::Text(_) => None,
    }
}

/// 已结构化的输入
///
/// 带正确类型标记的对象原样返回；只有 `questions` 数组的对象补全包装。
pub fn extract_from_value(value: &Value, default_message: &str) -> Option<QuestionSet> {
    if let Some(set) = QuestionSet::from_tagged(value.clone()) {
        return Some(set);
    }
    let questions = value.get("questions").and_then(|q| q.as_array())?;
    debug!("Structured reply has questions but no type tag, wrapping");
    Some(QuestionSet::wrap(default_message, questions.clone()))
}

/// 文本输入：依次执行 [`STRATEGIES`]
pub fn extract_from_text(text: &str, default_message: &str) -> Option<QuestionSet> {
    let content = text.trim();
    trace!(reply = %content, "Extracting precondition questions");

    for &(name, strategy) in STRATEGIES {
        match strategy(content, default_message) {
            Attempt::Matched(set) => {
                debug!(strategy = name, questions = set.questions().len(), "Precondition questions extracted");
                return Some(set);
            }
            Attempt::Absent => continue,
            Attempt::Conclusive => {
                debug!(strategy = name, "Reply is valid JSON but not a question set, stopping");
                return None;
            }
        }
    }

    debug!("No precondition questions found in reply");
    None
}

/// 1. 整段文本直接解析
fn parse_whole_text(content: &str, _default_message: &str) -> Attempt {
    match serde_json::from_str::<Value>(content) {
        Ok(parsed) => match QuestionSet::from_tagged(parsed) {
            Some(set) => Attempt::Matched(set),
            None => Attempt::Conclusive,
        },
        Err(_) => Attempt::Absent,
    }
}

/// 2. ```json 代码块
fn parse_fenced_json_block(content: &str, _default_message: &str) -> Attempt {
    parse_captured(&FENCED_JSON_BLOCK, content)
}

/// 3. 普通代码块
fn parse_fenced_block(content: &str, _default_message: &str) -> Attempt {
    parse_captured(&FENCED_BLOCK, content)
}

/// 4. 最外层对象（贪婪匹配，不做括号配对）
fn parse_outer_object(content: &str, _default_message: &str) -> Attempt {
    OUTER_OBJECT
        .find(content)
        .map_or(Attempt::Absent, |m| parse_tagged(m.as_str()))
}

/// 5. 最外层数组：Agent 直接输出了 questions 数组
fn parse_outer_array(content: &str, default_message: &str) -> Attempt {
    let Some(m) = OUTER_ARRAY.find(content) else {
        return Attempt::Absent;
    };
    let Ok(Value::Array(items)) = serde_json::from_str::<Value>(m.as_str()) else {
        return Attempt::Absent;
    };
    let first_is_question = items
        .first()
        .and_then(|first| first.get("question"))
        .map_or(false, is_truthy);
    if first_is_question {
        Attempt::Matched(QuestionSet::wrap(default_message, items))
    } else {
        Attempt::Absent
    }
}

fn parse_captured(pattern: &Regex, content: &str) -> Attempt {
    pattern
        .captures(content)
        .and_then(|caps| caps.get(1))
        .map_or(Attempt::Absent, |inner| parse_tagged(inner.as_str().trim()))
}

/// 解析并做形状检查，任何失败都只算本次未命中
fn parse_tagged(candidate: &str) -> Attempt {
    serde_json::from_str::<Value>(candidate)
        .ok()
        .and_then(QuestionSet::from_tagged)
        .map_or(Attempt::Absent, Attempt::Matched)
}

/// JSON 值的真值判断：null / false / 0 / 空字符串为假
fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map_or(true, |f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}
