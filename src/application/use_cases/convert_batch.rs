//! # Convert Batch Use Case
//!
//! バッチドライバー。ジョブ列を1件ずつ処理し、ファイルシステムへの作用と集計結果に変換する。

use chrono::Utc;
use log::{debug, info, warn};
use std::sync::Arc;

use crate::application::dto::conversion_params::ConversionParams;
use crate::domain::entities::batch_event::BatchEvent;
use crate::domain::entities::batch_result::BatchResult;
use crate::domain::entities::conversion_job::{ConversionJob, JobOutcome};
use crate::domain::repositories::asset_repository::AssetRepository;
use crate::domain::repositories::event_sink::BatchEventSink;
use crate::domain::repositories::model_converter::{ConversionRequest, ModelConverter};

/// バッチ変換ユースケース
///
/// ジョブは厳密に1件ずつ処理する。外部変換ツールは重いシーンホストプロセスで、
/// 同時に複数起動することは想定していない。
pub struct ConvertBatchUseCase<R: AssetRepository, C: ModelConverter, S: BatchEventSink> {
    asset_repository: Arc<R>,
    converter: Arc<C>,
    event_sink: Arc<S>,
}

impl<R: AssetRepository, C: ModelConverter, S: BatchEventSink> ConvertBatchUseCase<R, C, S> {
    /// 新しいユースケースを作成
    ///
    /// # Arguments
    ///
    /// * `asset_repository` - アセットリポジトリ
    /// * `converter` - モデル変換器
    /// * `event_sink` - イベントの出力先
    pub fn new(asset_repository: Arc<R>, converter: Arc<C>, event_sink: Arc<S>) -> Self {
        Self {
            asset_repository,
            converter,
            event_sink,
        }
    }

    /// ジョブ列を順に処理する
    ///
    /// 1件の失敗でバッチは中断しない。ジョブ単位のエラーはすべてここで
    /// `JobOutcome::Failed` に変換されるため、このメソッドはエラーを返さない。
    ///
    /// # Arguments
    ///
    /// * `jobs` - 変換ジョブ（パス順）
    /// * `params` - 変換パラメータ
    ///
    /// # Returns
    ///
    /// 集計結果
    pub async fn execute(&self, jobs: &[ConversionJob], params: &ConversionParams) -> BatchResult {
        let mut result = BatchResult::new(jobs.len(), params.dry_run);

        for job in jobs {
            let outcome = self.process_job(job, params).await;
            result.record(&outcome);
        }

        info!(
            "Batch finished: processed={} converted={} skipped={} failed={} planned={}",
            result.processed(),
            result.converted,
            result.skipped,
            result.failed,
            result.planned
        );

        result
    }

    /// 1ジョブを終端状態まで進める
    async fn process_job(&self, job: &ConversionJob, params: &ConversionParams) -> JobOutcome {
        if !params.overwrite && self.asset_repository.target_exists(job.target()).await {
            self.event_sink.emit(&BatchEvent::Skipped(job));
            return JobOutcome::Skipped;
        }

        if params.dry_run {
            self.event_sink.emit(&BatchEvent::WouldConvert(job));
            return JobOutcome::DryPlanned;
        }

        if let Err(e) = self.asset_repository.prepare_target_dir(job.target()).await {
            return self.fail(job, format!("{:#}", e));
        }

        self.event_sink.emit(&BatchEvent::Converting(job));

        let request = ConversionRequest {
            input: job.source_path().to_path_buf(),
            output: job.target().to_path_buf(),
            scale: params.scale,
        };

        let started = Utc::now();
        let response = match self.converter.convert(&request).await {
            Ok(response) => response,
            Err(e) => return self.fail(job, format!("{:#}", e)),
        };
        let elapsed_ms = (Utc::now() - started).num_milliseconds().max(0) as u64;

        if !response.success {
            if job.target() == job.source_path() {
                warn!(
                    "Keeping {}: output path is the source itself",
                    job.target().display()
                );
            } else if let Err(e) = self.asset_repository.discard_target(job.target()).await {
                warn!(
                    "Failed to discard partial output {}: {:#}",
                    job.target().display(),
                    e
                );
            }
            return self.fail(job, response.failure_reason());
        }

        if !self.asset_repository.target_exists(job.target()).await {
            warn!(
                "Converter exited successfully but output was not found: {}",
                job.target().display()
            );
        }

        debug!(
            "Converted {} ({}) in {} ms",
            job.source_path().display(),
            job.source().format(),
            elapsed_ms
        );
        self.event_sink
            .emit(&BatchEvent::Converted { job, elapsed_ms });
        JobOutcome::Converted { elapsed_ms }
    }

    fn fail(&self, job: &ConversionJob, reason: String) -> JobOutcome {
        self.event_sink.emit(&BatchEvent::Failed {
            job,
            reason: &reason,
        });
        JobOutcome::Failed { reason }
    }
}
