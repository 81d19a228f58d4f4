//! UseCase: メモ更新処理

use std::sync::Arc;

use crate::domain::{RoomId, RoomRegistry, TimerId, TimerStore};

/// メモ更新のユースケース
pub struct UpdateNoteUseCase {
    /// Room Registry（アクティブなルームの権威的なマップ）
    registry: Arc<RoomRegistry>,
    /// Timer Store（永続ストアの抽象化）
    store: Arc<dyn TimerStore>,
}

impl UpdateNoteUseCase {
    /// 新しい UpdateNoteUseCase を作成
    pub fn new(registry: Arc<RoomRegistry>, store: Arc<dyn TimerStore>) -> Self {
        Self { registry, store }
    }

    /// メモ更新を実行
    ///
    /// note をメモリ上で更新し、レコードの note フィールドだけを永続化する
    /// （バックグラウンド・ベストエフォート）。
    ///
    /// # Returns
    ///
    /// * `true` - 更新した（`note_updated` をブロードキャストする）
    /// * `false` - 対象が存在しない（何もしない）
    pub async fn execute(&self, room_id: &RoomId, timer_id: &TimerId, note: String) -> bool {
        let Some(room) = self.registry.room(room_id).await else {
            tracing::debug!("update_note for unknown room '{}', ignoring", room_id);
            return false;
        };

        {
            let mut guard = room.lock().await;
            let Some(timer) = guard.timer_mut(timer_id) else {
                tracing::debug!(
                    "update_note for unknown timer '{}/{}', ignoring",
                    room_id,
                    timer_id
                );
                return false;
            };
            timer.set_note(note.clone());
        }

        let store = Arc::clone(&self.store);
        let room_id = room_id.clone();
        let timer_id = timer_id.clone();
        tokio::spawn(async move {
            if let Err(e) = store.update_note(&room_id, &timer_id, &note).await {
                tracing::warn!(
                    "Failed to persist note for timer '{}/{}': {}",
                    room_id,
                    timer_id,
                    e
                );
            }
        });

        true
    }
}
