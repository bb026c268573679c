//! Model Converter Implementations
//!
//! ModelConverterトレイトの外部プロセス実装

pub mod process_converter;
