//! # Domain Errors
//!
//! バッチ全体の終了ステータスに影響するエラー。
//! ジョブ単位の失敗は `JobOutcome::Failed` として記録され、ここには含まれない。

use std::path::PathBuf;
use thiserror::Error;

/// 同じ出力先にマッピングされた変換元の組
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputCollision {
    /// 衝突した出力先
    pub target: PathBuf,
    /// 出力先を共有する変換元（パス順）
    pub sources: Vec<PathBuf>,
}

/// バッチを中断させるエラー
#[derive(Debug, Error)]
pub enum ConvertError {
    /// 入力ディレクトリが存在しない
    #[error("input dir not found: {}", .0.display())]
    InputDirectoryNotFound(PathBuf),

    /// 入力パスがディレクトリではない
    #[error("input path is not a directory: {}", .0.display())]
    InputNotADirectory(PathBuf),

    /// 変換元が入力ルートの外にある
    #[error("{} is not inside input root {}", .path.display(), .root.display())]
    SourceOutsideInputRoot {
        /// 変換元のパス
        path: PathBuf,
        /// 入力ルート
        root: PathBuf,
    },

    /// 複数の変換元が同じ出力先にマッピングされた
    #[error("{} output collision(s) detected", .0.len())]
    OutputCollision(Vec<OutputCollision>),
}
