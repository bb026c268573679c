//! Process Model Converter
//!
//! 外部変換ツール（デフォルトはヘッドレスBlender）をジョブごとに子プロセスとして実行する。
//! ツール内部のシーン状態がジョブ間で混ざらないよう、プロセスは再利用しない。

use anyhow::{Context, Result};
use async_trait::async_trait;
use log::{debug, info, warn};
use std::path::PathBuf;
use std::process::Stdio;
use tokio::process::Command;

use crate::adapter::config::Config;
use crate::domain::repositories::model_converter::{
    ConversionRequest, ConversionResponse, ModelConverter,
};

/// エラー出力として保持する最大文字数
const MAX_ERROR_TEXT_CHARS: usize = 2000;

/// 外部プロセスによるモデル変換器
#[derive(Debug, Clone)]
pub struct ProcessModelConverter {
    program: String,
    args: Vec<String>,
    script: PathBuf,
    apply_unit_scale: bool,
}

impl ProcessModelConverter {
    /// 新しい変換器を作成
    ///
    /// # Arguments
    ///
    /// * `program` - 実行するプログラム
    /// * `args` - 引数テンプレート
    /// * `script` - `{script}` に展開されるパス
    pub fn new(program: impl Into<String>, args: Vec<String>, script: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            args,
            script: script.into(),
            apply_unit_scale: false,
        }
    }

    /// 設定から変換器を作成
    pub fn from_config(config: &Config) -> Self {
        let script = shellexpand::tilde(&config.export_script).to_string();
        let mut converter = Self::new(
            shellexpand::tilde(&config.converter_program).to_string(),
            config.converter_args.clone(),
            script,
        );
        converter.apply_unit_scale = config.apply_unit_scale;
        converter
    }

    /// 引数テンプレートのプレースホルダーを置換する
    ///
    /// `{scale}` は `1.0` のように常に小数点を含む形式で渡す
    pub fn substitute_args(&self, request: &ConversionRequest) -> Vec<String> {
        let input = request.input.to_string_lossy();
        let output = request.output.to_string_lossy();
        let script = self.script.to_string_lossy();
        let scale = format!("{:?}", request.scale);
        let input_dir = request
            .input
            .parent()
            .map(|p| p.to_string_lossy().to_string())
            .unwrap_or_default();
        let output_dir = request
            .output
            .parent()
            .map(|p| p.to_string_lossy().to_string())
            .unwrap_or_default();

        let mut args: Vec<String> = self
            .args
            .iter()
            .map(|arg| {
                arg.replace("{input_dir}", &input_dir)
                    .replace("{output_dir}", &output_dir)
                    .replace("{input}", &input)
                    .replace("{output}", &output)
                    .replace("{scale}", &scale)
                    .replace("{script}", &script)
            })
            .collect();

        if self.apply_unit_scale {
            args.push("--apply-unit-scale".to_string());
        }

        args
    }
}

/// 文字列の末尾 `max_chars` 文字を返す
fn tail_chars(text: &str, max_chars: usize) -> String {
    let count = text.chars().count();
    text.chars().skip(count.saturating_sub(max_chars)).collect()
}

#[async_trait]
impl ModelConverter for ProcessModelConverter {
    async fn convert(&self, request: &ConversionRequest) -> Result<ConversionResponse> {
        let args = self.substitute_args(request);

        info!("Running converter: {} {:?}", self.program, args);

        let output = Command::new(&self.program)
            .args(&args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .output()
            .await
            .with_context(|| format!("failed to run converter '{}'", self.program))?;

        let stdout = String::from_utf8_lossy(&output.stdout);
        for line in stdout.lines().filter(|l| !l.trim().is_empty()) {
            debug!("[converter] {}", line);
        }

        let exit_code = output.status.code();

        if output.status.success() {
            return Ok(ConversionResponse::success(exit_code));
        }

        let stderr = String::from_utf8_lossy(&output.stderr);
        let error_text = tail_chars(stderr.trim_end(), MAX_ERROR_TEXT_CHARS);
        warn!(
            "Converter failed for {} (exit code {:?}): {}",
            request.input.display(),
            exit_code,
            error_text
        );

        let error_text = if error_text.is_empty() {
            None
        } else {
            Some(error_text)
        };
        Ok(ConversionResponse::failure(exit_code, error_text))
    }
}
