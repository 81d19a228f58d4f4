//! UseCase: タイマー削除処理

use std::sync::Arc;

use crate::domain::{RoomId, RoomRegistry, TimerId, TimerStore};

/// タイマー削除のユースケース
pub struct DeleteTimerUseCase {
    /// Room Registry（アクティブなルームの権威的なマップ）
    registry: Arc<RoomRegistry>,
    /// Timer Store（永続ストアの抽象化）
    store: Arc<dyn TimerStore>,
}

impl DeleteTimerUseCase {
    /// 新しい DeleteTimerUseCase を作成
    pub fn new(registry: Arc<RoomRegistry>, store: Arc<dyn TimerStore>) -> Self {
        Self { registry, store }
    }

    /// タイマー削除を実行
    ///
    /// ルームのロックを保持したままタイマーを取り除き、tick source を
    /// キャンセルする。キャンセルは取り除いた後の `TickHandle` に対して
    /// 行われる（Timer が Registry から到達不能でも安全）。
    /// 永続レコードも削除する（バックグラウンド・ベストエフォート）。
    ///
    /// # Returns
    ///
    /// * `true` - 削除した（`timer_deleted` をブロードキャストする）
    /// * `false` - 対象が存在しない（何もしない）
    pub async fn execute(&self, room_id: &RoomId, timer_id: &TimerId) -> bool {
        let Some(room) = self.registry.room(room_id).await else {
            tracing::debug!("delete_timer for unknown room '{}', ignoring", room_id);
            return false;
        };

        {
            let mut guard = room.lock().await;
            let Some(mut timer) = guard.remove_timer(timer_id) else {
                tracing::debug!(
                    "delete_timer for unknown timer '{}/{}', ignoring",
                    room_id,
                    timer_id
                );
                return false;
            };
            if let Some(handle) = timer.detach_ticker() {
                handle.cancel();
            }
        }

        let store = Arc::clone(&self.store);
        let room_id = room_id.clone();
        let timer_id = timer_id.clone();
        tokio::spawn(async move {
            if let Err(e) = store.delete(&room_id, &timer_id).await {
                tracing::warn!(
                    "Failed to delete record for timer '{}/{}': {}",
                    room_id,
                    timer_id,
                    e
                );
            }
        });

        true
    }
}
