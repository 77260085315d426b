//! DecideX Reply Parser CLI
//!
//! 解析 DecideX Agent 回复：前置条件选择题 / 成本分析报告 / 手动输入降级

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use decidex_reply_parser::{
    cli::{format_output, handle_detect, handle_interpret, render_fallback, DetectArgs, InterpretArgs},
    format_user_choices, manual_input_fallback, InterpreterConfig,
};
use tracing::debug;
use tracing_subscriber::{fmt, EnvFilter};

const USAGE_BANNER: &str = r#"前端使用示例：
  const result = handleAgentResponse(agentResponse);
  if (result.type === "questions") {
    renderQuestions(result.data);
  } else if (result.type === "fallback") {
    renderManualInput(result.data);
  }"#;

#[derive(Parser)]
#[command(name = "decidex-parse")]
#[command(about = "DecideX Agent JSON 解析工具 - 容错解析 Agent 回复")]
#[command(after_help = USAGE_BANNER)]
#[command(version)]
struct Cli {
    /// 配置文件路径（默认读取 $DECIDEX_CONFIG 或 ~/.config/decidex/config.json）
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// 解析 Agent 回复并输出处理结果
    Interpret(InterpretArgs),
    /// 只输出回复类型（questions / analysis / error）
    Detect(DetectArgs),
    /// 输出手动输入降级表单
    Fallback {
        /// 输出 JSON 格式
        #[arg(long)]
        json: bool,
    },
    /// 将用户选择格式化为 Agent 可识别的字符串（如 A、B、C）
    FormatChoices {
        /// 用户选择
        choices: Vec<String>,
    },
}

fn main() -> Result<()> {
    // 通过 RUST_LOG 环境变量控制日志级别，默认为 info
    // 例如: RUST_LOG=debug decidex-parse interpret reply.txt
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("decidex_reply_parser=info,decidex_parse=info"));

    fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .init();

    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => InterpreterConfig::load_from_file(path)?,
        None => InterpreterConfig::auto_load(),
    };
    debug!(markers = ?config.analysis_markers, "Interpreter config ready");

    match cli.command {
        Commands::Interpret(args) => handle_interpret(args, config)?,
        Commands::Detect(args) => handle_detect(args, config)?,
        Commands::Fallback { json } => {
            let form = manual_input_fallback();
            if json {
                println!("{}", format_output(form));
            } else {
                println!("{}", render_fallback(form));
            }
        }
        Commands::FormatChoices { choices } => {
            println!("{}", format_user_choices(choices.as_slice()));
        }
    }

    Ok(())
}
