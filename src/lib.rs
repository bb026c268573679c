//! # glbatch
//!
//! FBX/OBJ/GLTF の3DモデルをヘッドレスBlenderで GLB に一括変換するツール
//!
//! このプロジェクトはクリーンアーキテクチャを採用しており、以下の4層で構成されています：
//!
//! - **Domain層**: アセット・ジョブ・集計結果と、出力パスのマッピング規則（外部依存なし）
//! - **Application層**: アセット発見とバッチ変換のユースケース
//! - **Adapter層**: ファイルシステム、変換プロセス、コンソール出力、設定ファイル
//! - **Driver層**: CLI、依存性注入、終了ステータス
//!
//! ジョブは1件ずつ順に処理され、外部変換ツールはジョブごとに独立したプロセスとして起動される。

// coverage_nightly cfg が設定されている場合のみ coverage_attribute を有効化
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

// Domain層（純粋なビジネスロジック）
pub mod domain;

// Application層（ユースケース）
pub mod application;

// Adapter層（Infrastructure）
pub mod adapter;

// Driver層（Presentation）
pub mod driver;
