//! # Model Converter Trait
//!
//! 外部変換ツール（1アセットの import → transform → export）の呼び出し境界

use anyhow::Result;
use async_trait::async_trait;
use std::path::PathBuf;

#[cfg(test)]
use mockall::automock;

/// 変換リクエスト
///
/// 1回の外部プロセス呼び出しに渡す内容のすべて。呼び出し間で共有される状態はない。
#[derive(Debug, Clone, PartialEq)]
pub struct ConversionRequest {
    /// 変換元ファイル（存在し、サポート対象の拡張子を持つ）
    pub input: PathBuf,
    /// 出力先ファイル（親ディレクトリは呼び出し側が作成済み）
    pub output: PathBuf,
    /// 一様スケール
    pub scale: f64,
}

/// 変換レスポンス
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionResponse {
    /// プロセスが正常終了したかどうか
    pub success: bool,
    /// 終了コード（シグナルで終了した場合は `None`）
    pub exit_code: Option<i32>,
    /// 失敗時のエラー出力（末尾のみ）
    pub error_text: Option<String>,
}

impl ConversionResponse {
    /// 成功レスポンスを作成
    pub fn success(exit_code: Option<i32>) -> Self {
        Self {
            success: true,
            exit_code,
            error_text: None,
        }
    }

    /// 失敗レスポンスを作成
    pub fn failure(exit_code: Option<i32>, error_text: Option<String>) -> Self {
        Self {
            success: false,
            exit_code,
            error_text,
        }
    }

    /// オペレーター向けの失敗理由を返します。
    ///
    /// # 例
    ///
    /// ```
    /// use glbatch::domain::repositories::model_converter::ConversionResponse;
    ///
    /// let response = ConversionResponse::failure(
    ///     Some(1),
    ///     Some("Traceback...\nRuntimeError: Unsupported input\n".to_string()),
    /// );
    /// assert_eq!(
    ///     response.failure_reason(),
    ///     "exit status 1: RuntimeError: Unsupported input"
    /// );
    ///
    /// let killed = ConversionResponse::failure(None, None);
    /// assert_eq!(killed.failure_reason(), "terminated by signal");
    /// ```
    pub fn failure_reason(&self) -> String {
        let status = match self.exit_code {
            Some(code) => format!("exit status {}", code),
            None => "terminated by signal".to_string(),
        };

        let last_line = self
            .error_text
            .as_deref()
            .and_then(|text| text.lines().rev().find(|l| !l.trim().is_empty()))
            .map(str::trim);

        match last_line {
            Some(line) => format!("{}: {}", status, line),
            None => status,
        }
    }
}

/// モデル変換器
///
/// 実装は1ジョブにつき1つの独立したプロセスを起動し、終了を同期的に待つ。
/// 成否は終了ステータスのみで判定し、プロセスのログは解釈しない。
#[cfg_attr(test, automock)]
#[async_trait]
pub trait ModelConverter: Send + Sync {
    /// 1アセットを変換する
    ///
    /// # Errors
    ///
    /// プロセスを起動できなかった場合にエラーを返す
    /// （プロセスの異常終了はエラーではなく失敗レスポンスとして返す）
    async fn convert(&self, request: &ConversionRequest) -> Result<ConversionResponse>;
}
