//! Output formatting for CLI commands

use serde::Serialize;

use crate::interpreter::{InterpretationResult, ManualFallback, Question, ResultData};

/// Format output as pretty JSON (used by --json)
pub fn format_output<T: Serialize>(data: &T) -> String {
    serde_json::to_string_pretty(data).unwrap_or_else(|_| "{}".to_string())
}

/// 渲染处理结果（人类可读）
pub fn render_result(result: &InterpretationResult) -> String {
    match &result.data {
        ResultData::Questions(set) => {
            let mut out = String::new();
            if let Some(message) = set.message() {
                out.push_str(message);
                out.push('\n');
            }
            out.push_str(&render_questions(&set.typed_questions()));
            out
        }
        ResultData::Analysis(reply) => match reply.as_text() {
            Some(text) => text.to_string(),
            None => format_output(reply),
        },
        ResultData::Fallback(form) => {
            let mut out = String::from("⚠️ 无法自动解析 Agent 回复，已切换到手动输入模式\n");
            out.push_str(&render_fallback(form));
            out
        }
    }
}

/// 渲染手动输入表单
pub fn render_fallback(form: &ManualFallback) -> String {
    format!("{}\n{}", form.message, render_questions(&form.manual_questions))
}

fn render_questions(questions: &[Question]) -> String {
    let mut out = String::new();
    for (index, q) in questions.iter().enumerate() {
        let number = if q.id > 0 { q.id as usize } else { index + 1 };
        out.push_str(&format!("\n{}. {}\n", number, q.question));
        for option in &q.options {
            out.push_str(&format!("   {}. {}\n", option.key, option.label));
        }
    }
    out
}
