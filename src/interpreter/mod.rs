//! Agent 回复解析
//!
//! 容错提取前置条件选择题、识别成本分析报告，失败时降级为手动输入表单。
//! 前端只需调用 [`handle_agent_response`] 并按结果的 `type` 分支渲染。

pub mod choices;
pub mod classifier;
pub mod extractor;
pub mod fallback;
pub mod types;

use std::sync::LazyLock;

use tracing::{info, warn};

use crate::config::InterpreterConfig;

pub use choices::{format_user_choices, format_user_choices_value, CHOICE_SEPARATOR};
pub use classifier::ANALYSIS_MARKERS;
pub use extractor::{Attempt, Strategy, STRATEGIES};
pub use fallback::manual_input_fallback;
pub use types::{
    AgentReply, InterpretationResult, ManualFallback, Question, QuestionOption, QuestionSet,
    ResponseType, ResultData, ResultKind, DEFAULT_QUESTION_MESSAGE, PRECONDITION_QUESTIONS,
};

static DEFAULT_INTERPRETER: LazyLock<ResponseInterpreter> =
    LazyLock::new(ResponseInterpreter::default);

/// Agent 回复解释器
#[derive(Debug, Clone, Default)]
pub struct ResponseInterpreter {
    config: InterpreterConfig,
}

impl ResponseInterpreter {
    pub fn new(config: InterpreterConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &InterpreterConfig {
        &self.config
    }

    /// 提取前置条件问题集，失败返回 None
    pub fn extract(&self, reply: &AgentReply) -> Option<QuestionSet> {
        extractor::extract_questions(reply, &self.config.default_message)
    }

    /// 判断回复类型
    pub fn detect(&self, reply: &AgentReply) -> ResponseType {
        classifier::classify(
            reply,
            &self.config.default_message,
            self.config.analysis_markers.as_slice(),
        )
    }

    /// 处理 Agent 回复，返回前端可直接渲染的结果
    pub fn handle(&self, reply: &AgentReply) -> InterpretationResult {
        match self.detect(reply) {
            // 提取没有副作用，重新执行与分类时的结果一致
            ResponseType::Questions => match self.extract(reply) {
                Some(set) => {
                    info!(questions = set.questions().len(), "Agent replied with precondition questions");
                    InterpretationResult::questions(set)
                }
                None => self.fallback(reply),
            },
            ResponseType::Analysis => {
                info!("Agent replied with analysis report");
                InterpretationResult::analysis(reply.clone())
            }
            ResponseType::Error => self.fallback(reply),
        }
    }

    fn fallback(&self, reply: &AgentReply) -> InterpretationResult {
        warn!(structured = !reply.is_text(), "Failed to interpret agent reply, falling back to manual input");
        InterpretationResult::fallback(manual_input_fallback().clone(), reply.clone())
    }
}

/// 使用默认配置提取前置条件问题集
pub fn extract_precondition_questions(reply: &AgentReply) -> Option<QuestionSet> {
    DEFAULT_INTERPRETER.extract(reply)
}

/// 使用默认配置判断回复类型
pub fn detect_response_type(reply: &AgentReply) -> ResponseType {
    DEFAULT_INTERPRETER.detect(reply)
}

/// 使用默认配置处理 Agent 回复
pub fn handle_agent_response(reply: &AgentReply) -> InterpretationResult {
    DEFAULT_INTERPRETER.handle(reply)
}
