//! DecideX Reply Parser - 容错解析 DecideX Agent 回复
//!
//! 从 Agent 的自由文本回复中提取前置条件选择题，识别成本分析报告，
//! 解析失败时提供手动输入降级表单。

pub mod cli;
pub mod config;
pub mod interpreter;

pub use config::InterpreterConfig;
pub use interpreter::{
    detect_response_type, extract_precondition_questions, format_user_choices,
    format_user_choices_value, handle_agent_response, manual_input_fallback, AgentReply,
    InterpretationResult, ManualFallback, Question, QuestionOption, QuestionSet,
    ResponseInterpreter, ResponseType, ResultData, ResultKind,
};
