//! 回复分类与处理流程测试

use decidex_reply_parser::{
    detect_response_type, format_user_choices, handle_agent_response, manual_input_fallback,
    AgentReply, ResponseType, ResultData, ResultKind,
};
use serde_json::json;

const COST_REPORT: &str = r#"# 成本分析报告

## 一、成本总览
| 方案 | 显性成本 | 隐性成本 |
|------|----------|----------|
| A    | 3000元   | 高       |

## 决策建议
综合来看建议选择方案 A。"#;

const QUESTIONS_REPLY: &str = r#"为了给你提供精准的风险评估，请先回答：
```json
{
  "type": "precondition_questions",
  "message": "为了给你提供精准的风险评估，请快速选择以下问题",
  "questions": [
    {"id": 1, "question": "你的风险承受能力如何？", "options": [{"key": "A", "label": "保守"}]}
  ]
}
```"#;

// ============================================================================
// detect_response_type
// ============================================================================

mod detect_tests {
    use super::*;

    #[test]
    fn test_detect_questions() {
        assert_eq!(detect_response_type(&QUESTIONS_REPLY.into()), ResponseType::Questions);
    }

    #[test]
    fn test_detect_analysis_without_json() {
        assert_eq!(detect_response_type(&"# 成本总览\n总计 5000 元".into()), ResponseType::Analysis);
        assert_eq!(detect_response_type(&COST_REPORT.into()), ResponseType::Analysis);
    }

    #[test]
    fn test_detect_analysis_from_json_string_value() {
        let reply = AgentReply::from(json!("## 成本总览\n总计 5000 元"));
        assert_eq!(detect_response_type(&reply), ResponseType::Analysis);

        let reply = AgentReply::Structured(json!("## 决策建议"));
        assert_eq!(detect_response_type(&reply), ResponseType::Analysis);
    }

    #[test]
    fn test_detect_error() {
        assert_eq!(detect_response_type(&"抱歉，我无法回答。".into()), ResponseType::Error);
        assert_eq!(detect_response_type(&AgentReply::from(json!(null))), ResponseType::Error);
        assert_eq!(detect_response_type(&AgentReply::from(json!(7))), ResponseType::Error);
    }

    #[test]
    fn test_wrong_shape_json_with_marker_is_analysis() {
        // 合法 JSON 但不是问题集：提取终止，文本中仍可命中特征短语
        let text = json!({"type": "report", "summary": "决策建议：方案 B"}).to_string();
        assert_eq!(detect_response_type(&text.into()), ResponseType::Analysis);
    }
}

// ============================================================================
// handle_agent_response
// ============================================================================

mod handle_tests {
    use super::*;

    #[test]
    fn test_handle_questions() {
        let result = handle_agent_response(&QUESTIONS_REPLY.into());
        assert!(result.success);
        assert_eq!(result.kind, ResultKind::Questions);

        let set = result.question_set().unwrap();
        assert_eq!(set.message(), Some("为了给你提供精准的风险评估，请快速选择以下问题"));
        let typed = set.typed_questions();
        assert_eq!(typed.len(), 1);
        assert_eq!(typed[0].options[0].label, "保守");
    }

    #[test]
    fn test_handle_analysis() {
        let reply = AgentReply::from(COST_REPORT);
        let result = handle_agent_response(&reply);
        assert!(result.success);
        assert_eq!(result.kind, ResultKind::Analysis);
        assert_eq!(result.data, ResultData::Analysis(reply));
        assert!(result.original_reply.is_none());
    }

    #[test]
    fn test_handle_fallback_json_shape() {
        let raw = "Agent 输出了无法解析的内容 {type: questions";
        let result = handle_agent_response(&raw.into());
        let value = serde_json::to_value(&result).unwrap();

        assert_eq!(value["success"], json!(false));
        assert_eq!(value["type"], json!("fallback"));
        assert_eq!(value["originalReply"], json!(raw));
        assert_eq!(value["data"], serde_json::to_value(manual_input_fallback()).unwrap());
        assert_eq!(value["data"]["manualQuestions"].as_array().unwrap().len(), 4);
        assert_eq!(value["data"]["manualQuestions"][0]["options"][0], json!({"key": "A", "label": "非常紧张"}));
    }

    #[test]
    fn test_handle_structured_fallback_keeps_original() {
        let value = json!({"content": "成本总览"});
        let result = handle_agent_response(&AgentReply::from(value.clone()));
        assert_eq!(result.kind, ResultKind::Fallback);
        assert_eq!(result.original_reply, Some(AgentReply::Structured(value)));
    }

    #[test]
    fn test_handle_questions_serialization() {
        let result = handle_agent_response(&AgentReply::from(r#"[{"question": "q1"}] 以上"#));
        let value = serde_json::to_value(&result).unwrap();
        assert_eq!(
            value,
            json!({
                "success": true,
                "type": "questions",
                "data": {
                    "type": "precondition_questions",
                    "message": "请选择以下问题",
                    "questions": [{"question": "q1"}]
                }
            })
        );
    }
}

// ============================================================================
// format_user_choices
// ============================================================================

mod choices_tests {
    use super::*;

    #[test]
    fn test_choices_joined_with_ideographic_comma() {
        assert_eq!(format_user_choices(&["A", "", " ", "B"]), "A\u{3001}B");
        assert_eq!(format_user_choices(&["A", "B", "A", "C"]), "A、B、A、C");
    }
}
