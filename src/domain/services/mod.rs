//! # Domain Services
//!
//! エンティティ単体に属さないビジネスルール

pub mod output_mapping;
