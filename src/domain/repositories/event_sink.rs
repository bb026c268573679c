//! # Batch Event Sink Trait
//!
//! バッチイベントの出力先を抽象化

use crate::domain::entities::batch_event::BatchEvent;

/// バッチイベントの出力先
pub trait BatchEventSink: Send + Sync {
    /// イベントを1件出力する
    fn emit(&self, event: &BatchEvent<'_>);
}
