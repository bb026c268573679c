//! # BatchEvent
//!
//! オペレーター向けのイベント。1イベントにつき1行、固定のタグ付きで出力される。

use std::fmt;
use std::path::{Path, PathBuf};

use super::batch_result::BatchResult;
use super::conversion_job::ConversionJob;

/// バッチ実行中に発生するイベント
#[derive(Debug, Clone, Copy)]
pub enum BatchEvent<'a> {
    /// アセットを発見した
    Discovered { root: &'a Path, count: usize },
    /// 対象ファイルが1件もなかった
    NothingFound { root: &'a Path },
    /// 入力ディレクトリが存在しない
    InputMissing { root: &'a Path },
    /// 複数の変換元が同じ出力先を指している
    Collision {
        target: &'a Path,
        sources: &'a [PathBuf],
    },
    /// 出力が既に存在するためスキップ
    Skipped(&'a ConversionJob),
    /// 変換開始
    Converting(&'a ConversionJob),
    /// dry-runでの変換予定
    WouldConvert(&'a ConversionJob),
    /// 変換成功
    Converted {
        job: &'a ConversionJob,
        elapsed_ms: u64,
    },
    /// 変換失敗
    Failed {
        job: &'a ConversionJob,
        reason: &'a str,
    },
    /// 最終サマリー
    Summary(&'a BatchResult),
}

impl fmt::Display for BatchEvent<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Discovered { root, count } => {
                write!(f, "[info] found {} model(s) under {}", count, root.display())
            }
            Self::NothingFound { root } => write!(
                f,
                "[warn] no supported model files found under: {}",
                root.display()
            ),
            Self::InputMissing { root } => {
                write!(f, "[error] input dir not found: {}", root.display())
            }
            Self::Collision { target, sources } => {
                let sources: Vec<String> = sources
                    .iter()
                    .map(|s| s.display().to_string())
                    .collect();
                write!(
                    f,
                    "[error] output collision: {} <- {}",
                    target.display(),
                    sources.join(", ")
                )
            }
            Self::Skipped(job) => write!(
                f,
                "[skip] {} (exists)  <- {}",
                job.target().display(),
                job.source_path().display()
            ),
            Self::Converting(job) => write!(
                f,
                "[conv] {}  <- {}",
                job.target().display(),
                job.source_path().display()
            ),
            Self::WouldConvert(job) => write!(
                f,
                "[dry] would convert {}  <- {}",
                job.target().display(),
                job.source_path().display()
            ),
            Self::Converted { job, elapsed_ms } => {
                write!(f, "[ok] {} ({} ms)", job.target().display(), elapsed_ms)
            }
            Self::Failed { job, reason } => write!(
                f,
                "[fail] {}  <- {}: {}",
                job.target().display(),
                job.source_path().display(),
                reason
            ),
            Self::Summary(result) if result.dry_run => write!(
                f,
                "[done] dry run: discovered={} planned={} skipped={}",
                result.discovered, result.planned, result.skipped
            ),
            Self::Summary(result) => write!(
                f,
                "[done] discovered={} converted={} skipped={} failed={}",
                result.discovered, result.converted, result.skipped, result.failed
            ),
        }
    }
}
