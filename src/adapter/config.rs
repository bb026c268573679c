//! Configuration
//!
//! 外部変換ツールの呼び出し設定（JSONファイル）

use anyhow::{Context, Result};
use log::info;
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// デフォルトの変換プログラム
pub const DEFAULT_CONVERTER_PROGRAM: &str = "blender";

/// デフォルトのエクスポートスクリプト
pub const DEFAULT_EXPORT_SCRIPT: &str = "scripts/blender_export_glb.py";

/// デフォルトの引数テンプレート（Blenderをヘッドレスで起動し、スクリプトに引数を渡す）
pub fn default_converter_args() -> Vec<String> {
    [
        "-b", "--python", "{script}", "--", "--input", "{input}", "--output", "{output}",
        "--scale", "{scale}",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

fn default_converter_program() -> String {
    DEFAULT_CONVERTER_PROGRAM.to_string()
}

fn default_export_script() -> String {
    DEFAULT_EXPORT_SCRIPT.to_string()
}

/// 設定
///
/// 引数テンプレートでは `{input}` `{output}` `{scale}` `{script}`
/// `{input_dir}` `{output_dir}` がジョブごとに置換される
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Config {
    /// 変換プログラム
    #[serde(default = "default_converter_program")]
    pub converter_program: String,

    /// 変換プログラムの引数テンプレート
    #[serde(default = "default_converter_args")]
    pub converter_args: Vec<String>,

    /// エクスポートスクリプトのパス（`{script}` に展開される）
    #[serde(default = "default_export_script")]
    pub export_script: String,

    /// シーンの単位スケールを適用する（`--apply-unit-scale` を引数に追加）
    #[serde(default)]
    pub apply_unit_scale: bool,
}

impl Config {
    /// 設定ファイルを読み込む
    ///
    /// ファイルが存在しない場合はデフォルト設定を返す
    pub fn load(path: &str) -> Result<Self> {
        let expanded = shellexpand::tilde(path);
        let path = Path::new(expanded.as_ref());

        if !path.exists() {
            info!(
                "No config file at {}, using default converter settings",
                path.display()
            );
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let config: Config = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        info!("Loaded config from {}", path.display());
        Ok(config)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            converter_program: default_converter_program(),
            converter_args: default_converter_args(),
            export_script: default_export_script(),
            apply_unit_scale: false,
        }
    }
}
