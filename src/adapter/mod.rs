//! Adapter Layer
//!
//! 外部システム（ファイルシステム、変換プロセス、コンソール）との統合

pub mod config;
pub mod console;
pub mod converter;
pub mod repositories;
