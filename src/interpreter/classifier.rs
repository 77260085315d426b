//! 回复分类：问题集 / 分析报告 / 无法识别

use tracing::debug;

use crate::interpreter::extractor::extract_questions;
use crate::interpreter::types::{AgentReply, ResponseType};

/// 成本分析报告的特征短语
pub const ANALYSIS_MARKERS: [&str; 3] = ["成本总览", "显性成本", "决策建议"];

/// 判断回复类型
///
/// 能提取到问题集即为 `Questions`；否则仅对文本回复检查分析报告特征短语。
/// 结构化回复提取失败一律为 `Error`。
pub fn classify<S: AsRef<str>>(
    reply: &AgentReply,
    default_message: &str,
    markers: &[S],
) -> ResponseType {
    if extract_questions(reply, default_message).is_some() {
        return ResponseType::Questions;
    }

    if let Some(text) = reply.as_text() {
        if contains_marker(text, markers) {
            return ResponseType::Analysis;
        }
    }

    debug!(structured = !reply.is_text(), "Reply is neither questions nor analysis");
    ResponseType::Error
}

fn contains_marker<S: AsRef<str>>(text: &str, markers: &[S]) -> bool {
    let lowered = text.to_lowercase();
    markers
        .iter()
        .map(|m| m.as_ref())
        .filter(|m| !m.is_empty())
        .any(|m| lowered.contains(&m.to_lowercase()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interpreter::types::DEFAULT_QUESTION_MESSAGE;
    use serde_json::json;

    fn detect(reply: AgentReply) -> ResponseType {
        classify(&reply, DEFAULT_QUESTION_MESSAGE, &ANALYSIS_MARKERS)
    }

    #[test]
    fn test_questions_take_priority_over_markers() {
        let text = r#"成本总览之前先确认：{"type": "precondition_questions", "questions": []}"#;
        assert_eq!(detect(text.into()), ResponseType::Questions);
    }

    #[test]
    fn test_each_marker_detected() {
        for marker in ANALYSIS_MARKERS {
            let text = format!("## {marker}\n内容");
            assert_eq!(detect(text.into()), ResponseType::Analysis);
        }
    }

    #[test]
    fn test_structured_reply_never_analysis() {
        let value = json!({"content": "成本总览"});
        assert_eq!(detect(value.into()), ResponseType::Error);
    }

    #[test]
    fn test_marker_match_is_case_insensitive() {
        let markers = ["Cost Overview"];
        let reply = AgentReply::from("## COST OVERVIEW");
        assert_eq!(classify(&reply, "", &markers), ResponseType::Analysis);
    }

    #[test]
    fn test_empty_marker_ignored() {
        let markers = [""];
        let reply = AgentReply::from("anything");
        assert_eq!(classify(&reply, "", &markers), ResponseType::Error);
    }
}
