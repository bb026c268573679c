//! # Conversion Parameters DTO
//!
//! バッチ変換の実行パラメータ

use anyhow::{bail, Result};

/// 変換パラメータ
///
/// 1回の実行の間だけ有効な設定で、永続化はされない
#[derive(Debug, Clone, PartialEq)]
pub struct ConversionParams {
    /// すべてのモデルに適用する一様スケール
    pub scale: f64,
    /// 既存の出力を上書きするかどうか
    pub overwrite: bool,
    /// 変換を行わず計画のみ出力するかどうか
    pub dry_run: bool,
}

impl ConversionParams {
    /// 新しい変換パラメータを作成します。
    ///
    /// # 例
    ///
    /// ```
    /// use glbatch::application::dto::conversion_params::ConversionParams;
    ///
    /// let params = ConversionParams::new(0.01, false, true);
    /// assert_eq!(params.scale, 0.01);
    /// assert!(params.dry_run);
    /// assert!(params.validate().is_ok());
    /// ```
    pub fn new(scale: f64, overwrite: bool, dry_run: bool) -> Self {
        Self {
            scale,
            overwrite,
            dry_run,
        }
    }

    /// パラメータを検証する
    ///
    /// # Errors
    ///
    /// スケールが有限の正の値でない場合にエラーを返す
    pub fn validate(&self) -> Result<()> {
        if !self.scale.is_finite() || self.scale <= 0.0 {
            bail!("scale must be a positive finite number, got {}", self.scale);
        }
        Ok(())
    }
}

impl Default for ConversionParams {
    fn default() -> Self {
        Self::new(1.0, false, false)
    }
}
