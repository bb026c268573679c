//! # BatchResult Value Object
//!
//! バッチ実行の集計結果とプロセス終了ステータス

use std::process::ExitCode;

use super::conversion_job::JobOutcome;

/// プロセスの終了ステータス
///
/// 「何もしなかった」「入力ディレクトリ不正」「変換失敗あり」を区別する
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitStatus {
    /// 成功（対象なし・dry-runを含む）
    Success,
    /// 1件以上の変換が失敗した（バッチ自体は最後まで実行済み）
    ConversionsFailed,
    /// 入力ディレクトリが存在しない
    InputNotFound,
    /// 複数の変換元が同じ出力先にマッピングされた
    OutputCollision,
    /// 設定エラーなど、その他の致命的エラー
    Fatal,
}

impl ExitStatus {
    /// 終了コード
    pub fn code(&self) -> u8 {
        match self {
            Self::Success => 0,
            Self::ConversionsFailed => 1,
            Self::InputNotFound => 2,
            Self::OutputCollision => 3,
            Self::Fatal => 4,
        }
    }
}

impl From<ExitStatus> for ExitCode {
    fn from(status: ExitStatus) -> Self {
        ExitCode::from(status.code())
    }
}

/// バッチ結果
///
/// バッチドライバーが1回の実行の間だけ保持する集計値
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchResult {
    /// 発見されたアセット数
    pub discovered: usize,
    /// スキップされたジョブ数
    pub skipped: usize,
    /// 変換に成功したジョブ数
    pub converted: usize,
    /// 変換に失敗したジョブ数
    pub failed: usize,
    /// dry-runで変換予定となったジョブ数
    pub planned: usize,
    /// dry-runで実行されたかどうか
    pub dry_run: bool,
}

impl BatchResult {
    /// 新しいバッチ結果を作成
    pub fn new(discovered: usize, dry_run: bool) -> Self {
        Self {
            discovered,
            dry_run,
            ..Self::default()
        }
    }

    /// ジョブの結果を集計に反映
    pub fn record(&mut self, outcome: &JobOutcome) {
        match outcome {
            JobOutcome::Skipped => self.skipped += 1,
            JobOutcome::DryPlanned => self.planned += 1,
            JobOutcome::Converted { .. } => self.converted += 1,
            JobOutcome::Failed { .. } => self.failed += 1,
        }
    }

    /// 処理済みジョブ数
    pub fn processed(&self) -> usize {
        self.skipped + self.planned + self.converted + self.failed
    }

    /// 失敗したジョブがあるかどうか
    pub fn has_failures(&self) -> bool {
        self.failed > 0
    }

    /// バッチ全体の終了ステータスを返します。
    ///
    /// # 例
    ///
    /// ```
    /// use glbatch::domain::entities::batch_result::{BatchResult, ExitStatus};
    /// use glbatch::domain::entities::conversion_job::JobOutcome;
    ///
    /// let mut result = BatchResult::new(2, false);
    /// result.record(&JobOutcome::Converted { elapsed_ms: 120 });
    /// assert_eq!(result.exit_status(), ExitStatus::Success);
    ///
    /// result.record(&JobOutcome::Failed { reason: "exit status 1".to_string() });
    /// assert_eq!(result.exit_status(), ExitStatus::ConversionsFailed);
    /// ```
    pub fn exit_status(&self) -> ExitStatus {
        if self.has_failures() {
            ExitStatus::ConversionsFailed
        } else {
            ExitStatus::Success
        }
    }
}
