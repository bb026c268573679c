//! # Asset Repository Trait
//!
//! 変換元アセットの発見と、出力先ファイルの状態確認・準備を抽象化

use anyhow::Result;
use async_trait::async_trait;
use std::path::Path;

use crate::domain::entities::source_asset::SourceAsset;

/// アセットリポジトリ
///
/// 入力ツリーは読み取り専用、出力ツリーは書き込み先として扱う
#[async_trait]
pub trait AssetRepository: Send + Sync {
    /// 入力ルート配下のサポート対象ファイルを発見する
    ///
    /// 出力ルートが入力ルートの内側にある場合、そのサブツリーは走査しない。
    ///
    /// # Arguments
    ///
    /// * `input_root` - 入力ディレクトリのパス
    /// * `output_root` - 出力ディレクトリのパス
    ///
    /// # Returns
    ///
    /// 発見されたアセットのリスト（順序は保証しない）
    ///
    /// # Errors
    ///
    /// 入力ルートが存在しない、またはディレクトリでない場合に
    /// `ConvertError` を含むエラーを返す。入力ルート自体が読めない場合もエラー
    async fn discover_assets(
        &self,
        input_root: &Path,
        output_root: &Path,
    ) -> Result<Vec<SourceAsset>>;

    /// 出力先がファイルとして存在するかどうか
    async fn target_exists(&self, target: &Path) -> bool;

    /// 出力先の親ディレクトリを再帰的に作成する
    ///
    /// # Errors
    ///
    /// ディレクトリの作成に失敗した場合にエラーを返す
    async fn prepare_target_dir(&self, target: &Path) -> Result<()>;

    /// 変換失敗時に残った出力ファイルを破棄する
    ///
    /// ファイルが存在しない場合は何もしない
    async fn discard_target(&self, target: &Path) -> Result<()>;
}
