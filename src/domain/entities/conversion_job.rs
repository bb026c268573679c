//! # ConversionJob Entity
//!
//! 変換ジョブ（変換元アセットと出力先パスのペア）

use std::path::{Path, PathBuf};

use super::source_asset::SourceAsset;

/// 変換ジョブ
///
/// 出力先パスは `OutputMappingService` によって計算され、
/// 常に出力ルート配下に収まる。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionJob {
    source: SourceAsset,
    target: PathBuf,
}

impl ConversionJob {
    /// 新しいジョブを作成
    ///
    /// # Arguments
    ///
    /// * `source` - 変換元アセット
    /// * `target` - 出力先パス
    pub fn new(source: SourceAsset, target: PathBuf) -> Self {
        Self { source, target }
    }

    /// 変換元アセット
    pub fn source(&self) -> &SourceAsset {
        &self.source
    }

    /// 変換元ファイルのパス
    pub fn source_path(&self) -> &Path {
        self.source.path()
    }

    /// 出力先パス
    pub fn target(&self) -> &Path {
        &self.target
    }
}

/// ジョブの終端状態
///
/// 1ジョブの状態遷移は
/// `Discovered → {Skipped | DryPlanned | Converting → {Converted | Failed}}`
/// で、終端状態から戻ることはない。
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JobOutcome {
    /// 出力が既に存在し、上書きが指定されていない
    Skipped,
    /// dry-runで変換予定として記録された
    DryPlanned,
    /// 変換に成功した
    Converted {
        /// 変換にかかった時間（ミリ秒）
        elapsed_ms: u64,
    },
    /// 変換に失敗した
    Failed {
        /// 失敗理由
        reason: String,
    },
}
