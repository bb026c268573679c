//! # Domain Entities
//!
//! ビジネスエンティティとバリューオブジェクトを定義するモジュール
//!
//! ## エンティティ
//!
//! - **SourceAsset**: 変換元の3Dモデルファイル
//! - **ConversionJob**: 変換元と出力先のペア
//! - **BatchResult**: バッチ全体の集計結果と終了ステータス
//! - **BatchEvent**: オペレーター向けに出力されるイベント

pub mod batch_event;
pub mod batch_result;
pub mod conversion_job;
pub mod source_asset;
