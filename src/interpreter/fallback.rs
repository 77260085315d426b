//! 手动输入降级表单
//!
//! 自动解析失败时交给用户手动选择的固定问题。进程内只构建一次，只读共享。

use std::sync::LazyLock;

use crate::interpreter::types::{ManualFallback, Question, QuestionOption, MANUAL_INPUT};

/// 降级表单提示语
pub const MANUAL_INPUT_MESSAGE: &str = "系统无法自动解析问题，请手动输入你的选择：";

static MANUAL_FALLBACK: LazyLock<ManualFallback> = LazyLock::new(|| ManualFallback {
    kind: MANUAL_INPUT.to_string(),
    message: MANUAL_INPUT_MESSAGE.to_string(),
    manual_questions: vec![
        question(1, "你的预算/成本承受能力如何？", ["非常紧张", "适中", "充裕"]),
        question(2, "你计划使用/持有多久？", ["短期（< 1年）", "中期（1-3年）", "长期（> 3年）"]),
        question(3, "你的风险承受能力如何？", ["保守", "平衡", "激进"]),
        question(4, "你最关注什么？", ["总成本最低", "性价比最高", "现金流压力最小"]),
    ],
});

fn question(id: u32, text: &str, labels: [&str; 3]) -> Question {
    let options = ["A", "B", "C"]
        .iter()
        .zip(labels)
        .map(|(key, label)| QuestionOption::new(key, label))
        .collect();
    Question {
        id,
        question: text.to_string(),
        options,
    }
}

/// 获取手动输入降级表单（每次返回同一份只读数据）
pub fn manual_input_fallback() -> &'static ManualFallback {
    &MANUAL_FALLBACK
}
