//! Workflow Orchestration
//!
//! ワークフローのオーケストレーション

use anyhow::{Context, Result};
use chrono::Utc;
use log::info;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::adapter::config::Config;
use crate::adapter::console::ConsoleEventSink;
use crate::adapter::converter::process_converter::ProcessModelConverter;
use crate::adapter::repositories::file_asset_repository::FileAssetRepository;
use crate::application::use_cases::convert_batch::ConvertBatchUseCase;
use crate::application::use_cases::discover_assets::DiscoverAssetsUseCase;
use crate::domain::entities::batch_event::BatchEvent;
use crate::domain::entities::batch_result::ExitStatus;
use crate::domain::error::ConvertError;
use crate::domain::repositories::event_sink::BatchEventSink;

use super::cli::Args;

/// パスのチルダを展開し、絶対パスに変換する
///
/// パスが存在する場合はシンボリックリンクを解決した正規パスを返す
pub fn resolve_path(raw: &str) -> Result<PathBuf> {
    let expanded = shellexpand::tilde(raw);
    let path = std::path::absolute(expanded.as_ref())
        .with_context(|| format!("Failed to resolve path: {}", raw))?;
    Ok(path.canonicalize().unwrap_or(path))
}

/// Model Conversion Workflow
pub struct ConvertModelsWorkflow<S: BatchEventSink = ConsoleEventSink> {
    config: Config,
    asset_repository: Arc<FileAssetRepository>,
    discover_use_case: DiscoverAssetsUseCase<FileAssetRepository>,
    event_sink: Arc<S>,
}

impl ConvertModelsWorkflow<ConsoleEventSink> {
    /// Create a new workflow that reports to stdout
    pub fn new(config: Config) -> Self {
        Self::with_event_sink(config, Arc::new(ConsoleEventSink::new()))
    }
}

impl<S: BatchEventSink> ConvertModelsWorkflow<S> {
    /// Create a new workflow with dependency injection
    pub fn with_event_sink(config: Config, event_sink: Arc<S>) -> Self {
        let asset_repository = Arc::new(FileAssetRepository::new());
        let discover_use_case = DiscoverAssetsUseCase::new(asset_repository.clone());

        Self {
            config,
            asset_repository,
            discover_use_case,
            event_sink,
        }
    }

    /// Execute the conversion workflow
    ///
    /// 入力ディレクトリの欠落・出力先の衝突・変換失敗は終了ステータスとして返す。
    /// `Err` になるのはパラメータ不正などの想定外のエラーのみ。
    pub async fn execute(&self, args: Args) -> Result<ExitStatus> {
        let run_id = uuid::Uuid::new_v4();
        let started = Utc::now();
        info!("Starting model conversion run {}", run_id);

        let params = args.conversion_params();
        params.validate()?;

        let input_root = resolve_path(&args.input_dir)?;
        let output_root = resolve_path(&args.output_dir)?;
        info!(
            "Input: {} | Output: {} | scale={} overwrite={} dry_run={}",
            input_root.display(),
            output_root.display(),
            params.scale,
            params.overwrite,
            params.dry_run
        );

        let jobs = match self
            .discover_use_case
            .execute(&input_root, &output_root)
            .await
        {
            Ok(jobs) => jobs,
            Err(e) => return self.report_discovery_error(e),
        };

        if jobs.is_empty() {
            self.event_sink
                .emit(&BatchEvent::NothingFound { root: &input_root });
            return Ok(ExitStatus::Success);
        }

        self.event_sink.emit(&BatchEvent::Discovered {
            root: &input_root,
            count: jobs.len(),
        });

        let converter = Arc::new(self.build_converter(&args));
        let batch_use_case = ConvertBatchUseCase::new(
            self.asset_repository.clone(),
            converter,
            self.event_sink.clone(),
        );

        let result = batch_use_case.execute(&jobs, &params).await;
        self.event_sink.emit(&BatchEvent::Summary(&result));

        info!(
            "Run {} finished in {} ms",
            run_id,
            (Utc::now() - started).num_milliseconds()
        );

        Ok(result.exit_status())
    }

    /// 変換器を組み立てる（CLIのプログラム指定が設定ファイルより優先）
    fn build_converter(&self, args: &Args) -> ProcessModelConverter {
        let mut config = self.config.clone();
        if let Some(program) = &args.converter {
            config.converter_program = program.clone();
        }
        ProcessModelConverter::from_config(&config)
    }

    /// 発見段階のエラーをイベントと終了ステータスに変換する
    fn report_discovery_error(&self, err: anyhow::Error) -> Result<ExitStatus> {
        let status = match err.downcast_ref::<ConvertError>() {
            Some(ConvertError::InputDirectoryNotFound(root))
            | Some(ConvertError::InputNotADirectory(root)) => {
                self.emit_input_missing(root);
                ExitStatus::InputNotFound
            }
            Some(ConvertError::OutputCollision(collisions)) => {
                for collision in collisions {
                    self.event_sink.emit(&BatchEvent::Collision {
                        target: &collision.target,
                        sources: &collision.sources,
                    });
                }
                ExitStatus::OutputCollision
            }
            _ => return Err(err),
        };
        Ok(status)
    }

    fn emit_input_missing(&self, root: &Path) {
        self.event_sink.emit(&BatchEvent::InputMissing { root });
    }
}
