//! glbatch - Batch Model Converter
//!
//! 3DモデルをGLBに一括変換

// coverage_nightly cfg が設定されている場合のみ coverage_attribute を有効化
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

use clap::Parser;
use std::process::ExitCode;

use glbatch::adapter::config::Config;
use glbatch::domain::entities::batch_result::ExitStatus;
use glbatch::driver::{Args, ConvertModelsWorkflow};

#[cfg_attr(coverage_nightly, coverage(off))]
#[tokio::main]
async fn main() -> ExitCode {
    env_logger::init();

    let args = Args::parse();

    // Load configuration
    let config = match Config::load(&args.config) {
        Ok(config) => config,
        Err(e) => {
            println!("[error] {:#}", e);
            return ExitStatus::Fatal.into();
        }
    };

    // Create workflow with injected dependencies
    let workflow = ConvertModelsWorkflow::new(config);

    match workflow.execute(args).await {
        Ok(status) => status.into(),
        Err(e) => {
            println!("[error] {:#}", e);
            ExitStatus::Fatal.into()
        }
    }
}
