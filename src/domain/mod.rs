//! # Domain Layer
//!
//! このモジュールはモデル変換バッチの核心的なルールとエンティティを定義します。
//!
//! ## 特徴
//!
//! - ファイルシステムや外部プロセスについて何も知らない
//! - 出力パスの計算は純粋関数（dry-runでもディスクに触れない）
//! - ポート（trait）の定義のみを持ち、実装はAdapter層が提供する
//!
//! ## 構成要素
//!
//! - **entities**: SourceAsset, ConversionJob, BatchResult, BatchEvent
//! - **repositories**: AssetRepository, ModelConverter, BatchEventSink
//! - **services**: OutputMappingService（出力パスのマッピングと衝突検出）
//! - **error**: バッチ全体に影響するエラー

pub mod entities;
pub mod error;
pub mod repositories;
pub mod services;
