//! 患者管理系统命令行工具

mod cli;
mod commands;

use anyhow::Result;
use clap::Parser;
use clinic_client::{ApiError, ApiProvider, ClientConfig};
use tracing::debug;

use crate::cli::Cli;

#[tokio::main]
async fn main() {
    let args = Cli::parse();

    // 初始化日志，输出到标准错误，标准输出只保留JSON结果
    tracing_subscriber::fmt()
        .with_env_filter(&args.log_level)
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run(args).await {
        eprintln!("{}", failure_message(&e));
        std::process::exit(1);
    }
}

/// 错误提示，服务器错误附带HTTP状态码
fn failure_message(e: &anyhow::Error) -> String {
    match e.downcast_ref::<ApiError>().and_then(ApiError::status_code) {
        Some(status) => format!("Error (HTTP {}): {:#}", status, e),
        None => format!("Error: {:#}", e),
    }
}

async fn run(args: Cli) -> Result<()> {
    let mut config = ClientConfig::load(args.config.as_deref())?;
    if let Some(base_url) = args.base_url {
        config.base_url = base_url;
    }
    if let Some(token) = args.token {
        config.token = Some(token);
    }
    debug!("Using backend {}", config.base_url);

    let provider = ApiProvider::from_config(&config)?;
    let output = commands::execute(&provider, args.command).await?;
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}
