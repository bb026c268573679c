//! Console Event Sink
//!
//! バッチイベントを標準出力に1行ずつ出力する

use crate::domain::entities::batch_event::BatchEvent;
use crate::domain::repositories::event_sink::BatchEventSink;

/// 標準出力へのイベント出力
#[derive(Debug, Default, Clone, Copy)]
pub struct ConsoleEventSink;

impl ConsoleEventSink {
    /// 新しい出力先を作成
    pub fn new() -> Self {
        Self
    }
}

impl BatchEventSink for ConsoleEventSink {
    fn emit(&self, event: &BatchEvent<'_>) {
        println!("{}", event);
    }
}
