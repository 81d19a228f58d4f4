//! UseCase: タイマー作成処理

use std::sync::Arc;

use crate::domain::{RoomId, RoomRegistry, TimerRecord, TimerSnapshot, TimerStore};

/// タイマー作成のユースケース
pub struct CreateTimerUseCase {
    /// Room Registry（アクティブなルームの権威的なマップ）
    registry: Arc<RoomRegistry>,
    /// Timer Store（永続ストアの抽象化）
    store: Arc<dyn TimerStore>,
}

impl CreateTimerUseCase {
    /// 新しい CreateTimerUseCase を作成
    pub fn new(registry: Arc<RoomRegistry>, store: Arc<dyn TimerStore>) -> Self {
        Self { registry, store }
    }

    /// タイマー作成を実行
    ///
    /// ルームの連番から ID を採番し、count 0・note 空・停止状態のタイマーを
    /// 挿入する。ルームが存在しない場合は何もしない（fail-quiet）。
    ///
    /// # Returns
    ///
    /// * `Some(TimerSnapshot)` - 作成されたタイマー（`timer_created` の元）
    /// * `None` - ルームが存在しない（ブロードキャスト不要）
    pub async fn execute(&self, room_id: &RoomId) -> Option<TimerSnapshot> {
        let Some(room) = self.registry.room(room_id).await else {
            tracing::debug!("create_timer for unknown room '{}', ignoring", room_id);
            return None;
        };

        let snapshot = {
            let mut room = room.lock().await;
            room.create_timer()
        };

        // 永続化はバックグラウンドで（ブロードキャストを遅らせない）
        let store = Arc::clone(&self.store);
        let record = TimerRecord {
            room_id: room_id.as_str().to_string(),
            timer_id: snapshot.timer_id.as_str().to_string(),
            count: 0.0,
            note: String::new(),
            is_running: false,
        };
        tokio::spawn(async move {
            if let Err(e) = store.create(record).await {
                tracing::warn!("Failed to persist created timer: {}", e);
            }
        });

        Some(snapshot)
    }
}
