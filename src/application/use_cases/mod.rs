//! # Use Cases
//!
//! アプリケーションのビジネスフロー（ユースケース）
//!
//! ## ユースケース
//!
//! - **DiscoverAssetsUseCase**: アセットの発見と出力先のマッピング
//! - **ConvertBatchUseCase**: ジョブ列の逐次変換（バッチドライバー）

pub mod convert_batch;
pub mod discover_assets;
