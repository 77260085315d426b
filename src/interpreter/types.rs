//! Agent 回复解析的共享类型
//!
//! 包含原始回复、前置条件问题集、手动输入降级表单和最终处理结果。

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// 前置条件选择题的类型标记（JSON 中的 `type` 字段）
pub const PRECONDITION_QUESTIONS: &str = "precondition_questions";

/// 手动输入降级表单的类型标记
pub const MANUAL_INPUT: &str = "manual_input";

/// 自动补全包装时使用的默认提示语
pub const DEFAULT_QUESTION_MESSAGE: &str = "请选择以下问题";

// ============================================================================
// AgentReply - Agent 原始回复
// ============================================================================

/// Agent 原始回复
///
/// 可能是一段自由文本，也可能是上游已经解析好的 JSON 值。
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum AgentReply {
    /// 原始文本
    Text(String),
    /// 已结构化的 JSON 值
    Structured(Value),
}

impl AgentReply {
    /// 文本回复的内容
    ///
    /// 上游解码出的 JSON 字符串同样按文本处理，其余结构化值返回 None。
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            Self::Structured(Value::String(text)) => Some(text),
            Self::Structured(_) => None,
        }
    }

    pub fn is_text(&self) -> bool {
        self.as_text().is_some()
    }
}

impl From<&str> for AgentReply {
    fn from(text: &str) -> Self {
        Self::Text(text.to_string())
    }
}

impl From<String> for AgentReply {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

impl From<Value> for AgentReply {
    fn from(value: Value) -> Self {
        match value {
            Value::String(text) => Self::Text(text),
            other => Self::Structured(other),
        }
    }
}

// ============================================================================
// Question - 单个选择题
// ============================================================================

/// 选择题选项
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionOption {
    /// 选项标识（"A" / "B" / "C"）
    pub key: String,
    /// 选项文本
    pub label: String,
}

impl QuestionOption {
    pub fn new(key: &str, label: &str) -> Self {
        Self {
            key: key.to_string(),
            label: label.to_string(),
        }
    }
}

/// 单个选择题
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    #[serde(default)]
    pub id: u32,
    /// 问题文本
    pub question: String,
    #[serde(default)]
    pub options: Vec<QuestionOption>,
}

// ============================================================================
// QuestionSet - 前置条件问题集
// ============================================================================

/// 前置条件问题集
///
/// 内部保留提取到的 JSON 对象本身，来源对象中的额外字段原样保留。
/// 只能通过形状检查或自动包装构造，因此 `type` 和 `questions` 总是存在。
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct QuestionSet(Value);

impl QuestionSet {
    /// 形状检查：`type == "precondition_questions"` 且 `questions` 为数组
    pub fn from_tagged(value: Value) -> Option<Self> {
        if has_question_set_shape(&value) {
            Some(Self(value))
        } else {
            None
        }
    }

    /// 用给定提示语包装一组问题
    pub fn wrap(message: &str, questions: Vec<Value>) -> Self {
        let mut object = Map::new();
        object.insert("type".to_string(), Value::from(PRECONDITION_QUESTIONS));
        object.insert("message".to_string(), Value::from(message));
        object.insert("questions".to_string(), Value::Array(questions));
        Self(Value::Object(object))
    }

    /// 类型标记
    pub fn kind(&self) -> &str {
        self.0
            .get("type")
            .and_then(|v| v.as_str())
            .unwrap_or(PRECONDITION_QUESTIONS)
    }

    /// 提示语（来源对象可能没有或不是字符串）
    pub fn message(&self) -> Option<&str> {
        self.0.get("message").and_then(|v| v.as_str())
    }

    /// 原始问题列表
    pub fn questions(&self) -> &[Value] {
        self.0
            .get("questions")
            .and_then(|v| v.as_array())
            .map(|arr| arr.as_slice())
            .unwrap_or(&[])
    }

    /// 转换为强类型问题列表，跳过结构不符合的条目
    pub fn typed_questions(&self) -> Vec<Question> {
        self.questions()
            .iter()
            .filter_map(|q| serde_json::from_value(q.clone()).ok())
            .collect()
    }

    pub fn as_value(&self) -> &Value {
        &self.0
    }

    pub fn into_value(self) -> Value {
        self.0
    }
}

pub(crate) fn has_question_set_shape(value: &Value) -> bool {
    value.get("type").and_then(|v| v.as_str()) == Some(PRECONDITION_QUESTIONS)
        && value.get("questions").map_or(false, |q| q.is_array())
}

// ============================================================================
// ManualFallback - 手动输入降级表单
// ============================================================================

/// 手动输入降级表单
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ManualFallback {
    /// 固定为 "manual_input"
    #[serde(rename = "type")]
    pub kind: String,
    pub message: String,
    pub manual_questions: Vec<Question>,
}

// ============================================================================
// ResponseType / ResultKind
// ============================================================================

/// 回复分类
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResponseType {
    /// 前置条件选择题
    Questions,
    /// 成本分析报告
    Analysis,
    /// 无法识别
    Error,
}

impl ResponseType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Questions => "questions",
            Self::Analysis => "analysis",
            Self::Error => "error",
        }
    }
}

impl std::fmt::Display for ResponseType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 处理结果类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResultKind {
    Questions,
    Analysis,
    /// 解析失败，降级为手动输入
    Fallback,
}

// ============================================================================
// InterpretationResult - 处理结果
// ============================================================================

/// 处理结果携带的数据
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ResultData {
    Questions(QuestionSet),
    /// 原样返回的分析报告
    Analysis(AgentReply),
    Fallback(ManualFallback),
}

/// Agent 回复的最终处理结果，前端按 `type` 分支渲染
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InterpretationResult {
    pub success: bool,
    #[serde(rename = "type")]
    pub kind: ResultKind,
    pub data: ResultData,
    /// 仅降级时存在，便于前端展示原始内容
    #[serde(skip_serializing_if = "Option::is_none")]
    pub original_reply: Option<AgentReply>,
}

impl InterpretationResult {
    pub fn questions(set: QuestionSet) -> Self {
        Self {
            success: true,
            kind: ResultKind::Questions,
            data: ResultData::Questions(set),
            original_reply: None,
        }
    }

    pub fn analysis(reply: AgentReply) -> Self {
        Self {
            success: true,
            kind: ResultKind::Analysis,
            data: ResultData::Analysis(reply),
            original_reply: None,
        }
    }

    pub fn fallback(form: ManualFallback, reply: AgentReply) -> Self {
        Self {
            success: false,
            kind: ResultKind::Fallback,
            data: ResultData::Fallback(form),
            original_reply: Some(reply),
        }
    }

    /// 问题集（仅 questions 结果有值）
    pub fn question_set(&self) -> Option<&QuestionSet> {
        match &self.data {
            ResultData::Questions(set) => Some(set),
            _ => None,
        }
    }
}
