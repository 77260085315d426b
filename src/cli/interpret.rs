//! Interpret / Detect 命令 - 解析 Agent 回复
//!
//! 从文件或 stdin 读取 Agent 回复，输出解析结果。

use std::io::Read;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Result};
use clap::Args;
use tracing::debug;

use crate::cli::output::{format_output, render_result};
use crate::config::InterpreterConfig;
use crate::interpreter::{AgentReply, ResponseInterpreter};

/// Interpret 命令参数
#[derive(Args)]
pub struct InterpretArgs {
    /// 回复文件路径（省略或为 "-" 时读取 stdin）
    pub file: Option<PathBuf>,

    /// 输入已是结构化 JSON（按对象处理而非文本）
    #[arg(long)]
    pub structured: bool,

    /// 输出 JSON 格式
    #[arg(long)]
    pub json: bool,
}

/// Detect 命令参数
#[derive(Args)]
pub struct DetectArgs {
    /// 回复文件路径（省略或为 "-" 时读取 stdin）
    pub file: Option<PathBuf>,

    /// 输入已是结构化 JSON（按对象处理而非文本）
    #[arg(long)]
    pub structured: bool,
}

/// 处理 interpret 命令
pub fn handle_interpret(args: InterpretArgs, config: InterpreterConfig) -> Result<()> {
    let reply = read_reply(args.file.as_deref(), args.structured)?;
    let result = ResponseInterpreter::new(config).handle(&reply);

    if args.json {
        println!("{}", format_output(&result));
    } else {
        println!("{}", render_result(&result));
    }
    Ok(())
}

/// 处理 detect 命令
pub fn handle_detect(args: DetectArgs, config: InterpreterConfig) -> Result<()> {
    let reply = read_reply(args.file.as_deref(), args.structured)?;
    let response_type = ResponseInterpreter::new(config).detect(&reply);
    println!("{}", response_type);
    Ok(())
}

/// 读取 Agent 回复
pub fn read_reply(file: Option<&Path>, structured: bool) -> Result<AgentReply> {
    let raw = match file {
        Some(path) if path != Path::new("-") => std::fs::read_to_string(path)
            .map_err(|e| anyhow!("无法读取回复文件 {}: {}", path.display(), e))?,
        _ => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .map_err(|e| anyhow!("无法读取 stdin: {}", e))?;
            buf
        }
    };
    debug!(bytes = raw.len(), structured, "Read agent reply");
    parse_reply(raw, structured)
}

/// 按输入模式构造回复
pub fn parse_reply(raw: String, structured: bool) -> Result<AgentReply> {
    if structured {
        let value: serde_json::Value = serde_json::from_str(&raw)
            .map_err(|e| anyhow!("--structured 输入不是合法 JSON: {}", e))?;
        Ok(AgentReply::from(value))
    } else {
        Ok(AgentReply::Text(raw))
    }
}
