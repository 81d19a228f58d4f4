//! Ticker Scheduler
//!
//! 動作中のタイマー 1 つにつき 1 本の tick タスクを起動する。
//! 各 tick はルームの Mutex を取得してからカウントを進め、ロックを保持した
//! まま `timer_update` をブロードキャストする。ライフサイクル操作と同じ
//! 直列化ドメインを通るため、同一タイマーの stop / delete と tick が
//! 並行して観測されることはない。
//!
//! ## キャンセルの保証
//!
//! `start` が返す `TickHandle` の `cancel` は tick タスクを abort する。
//! 呼び出し側（UseCase 層）はルームのロックを保持したまま cancel を呼ぶ
//! 契約であり、このときロック待ちの tick タスクはその await 地点で
//! 中断される。したがって cancel 後に tick が発火することはない。

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Mutex;
use tokio::time::{self, Instant};

use crate::domain::{MessagePusher, Room, RoomId, TickHandle, TimerId};
use crate::infrastructure::dto::websocket::{EventType, TimerUpdateMessage};

/// tick の周期
pub const TICK_PERIOD: Duration = Duration::from_millis(100);
/// 1 tick あたりのカウント増分（約 1.0 / 秒）
pub const TICK_INCREMENT: f64 = 0.1;

/// 動作中タイマーの tick 生成を管理するスケジューラ
pub struct TickerScheduler {
    message_pusher: Arc<dyn MessagePusher>,
}

impl TickerScheduler {
    pub fn new(message_pusher: Arc<dyn MessagePusher>) -> Self {
        Self { message_pusher }
    }

    /// タイマーの tick タスクを起動し、その所有トークンを返す
    ///
    /// 呼び出し側はルームのロックを保持したまま、対象タイマーが動作中で
    /// ないことを確認してから呼ぶこと（タイマーごとに tick source は
    /// 高々 1 本）。最初の tick は 1 周期後に発火する。
    pub fn start(
        &self,
        room: Arc<Mutex<Room>>,
        room_id: RoomId,
        timer_id: TimerId,
    ) -> TickHandle {
        let message_pusher = Arc::clone(&self.message_pusher);
        let task = tokio::spawn(async move {
            let mut interval = time::interval_at(Instant::now() + TICK_PERIOD, TICK_PERIOD);
            loop {
                interval.tick().await;
                let mut room = room.lock().await;
                let Some(timer) = room.timer_mut(&timer_id) else {
                    break;
                };
                if !timer.is_running() {
                    break;
                }
                let count = timer.advance(TICK_INCREMENT);
                let event = TimerUpdateMessage {
                    r#type: EventType::TimerUpdate,
                    timer_id: timer_id.as_str().to_string(),
                    count,
                };
                match serde_json::to_string(&event) {
                    Ok(json) => message_pusher.broadcast_to_room(&room_id, &json).await,
                    Err(e) => tracing::error!("Failed to serialize tick event: {}", e),
                }
            }
        });
        TickHandle::new(task.abort_handle())
    }
}
