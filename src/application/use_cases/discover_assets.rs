//! # Discover Assets Use Case
//!
//! アセット発見と出力先マッピングのユースケース

use anyhow::Result;
use log::info;
use std::path::Path;
use std::sync::Arc;

use crate::domain::entities::conversion_job::ConversionJob;
use crate::domain::repositories::asset_repository::AssetRepository;
use crate::domain::services::output_mapping::OutputMappingService;

/// アセット発見ユースケース
///
/// 入力ツリーからアセットを発見し、パス順に並んだ変換ジョブ列を作る
pub struct DiscoverAssetsUseCase<R: AssetRepository> {
    asset_repository: Arc<R>,
}

impl<R: AssetRepository> DiscoverAssetsUseCase<R> {
    /// 新しいユースケースを作成
    ///
    /// # Arguments
    ///
    /// * `asset_repository` - アセットリポジトリ
    pub fn new(asset_repository: Arc<R>) -> Self {
        Self { asset_repository }
    }

    /// アセットを発見してジョブ列を作る
    ///
    /// # Arguments
    ///
    /// * `input_root` - 入力ディレクトリ
    /// * `output_root` - 出力ディレクトリ
    ///
    /// # Returns
    ///
    /// 変換元パス順の変換ジョブ
    ///
    /// # Errors
    ///
    /// 入力ルートが存在しない場合、または出力先が衝突する場合に
    /// `ConvertError` を含むエラーを返す
    pub async fn execute(&self, input_root: &Path, output_root: &Path) -> Result<Vec<ConversionJob>> {
        let assets = self
            .asset_repository
            .discover_assets(input_root, output_root)
            .await?;
        let jobs = OutputMappingService::build_jobs(assets, input_root, output_root)?;

        info!(
            "Mapped {} job(s) from {} to {}",
            jobs.len(),
            input_root.display(),
            output_root.display()
        );

        Ok(jobs)
    }
}
