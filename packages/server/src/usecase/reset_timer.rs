//! UseCase: タイマーリセット処理

use std::sync::Arc;

use crate::domain::{RoomId, RoomRegistry, TimerId, TimerStore};

/// タイマーリセットのユースケース
pub struct ResetTimerUseCase {
    /// Room Registry（アクティブなルームの権威的なマップ）
    registry: Arc<RoomRegistry>,
    /// Timer Store（永続ストアの抽象化）
    store: Arc<dyn TimerStore>,
}

impl ResetTimerUseCase {
    /// 新しい ResetTimerUseCase を作成
    pub fn new(registry: Arc<RoomRegistry>, store: Arc<dyn TimerStore>) -> Self {
        Self { registry, store }
    }

    /// タイマーリセットを実行
    ///
    /// count をゼロに戻す。tick source には触れない：動作中のタイマーは
    /// ゼロからカウントを再開する。`count: 0, isRunning: false` を永続化する。
    ///
    /// # Returns
    ///
    /// * `true` - リセットした（`timer_update{count: 0}` をブロードキャストする）
    /// * `false` - 対象が存在しない（何もしない）
    pub async fn execute(&self, room_id: &RoomId, timer_id: &TimerId) -> bool {
        let Some(room) = self.registry.room(room_id).await else {
            tracing::debug!("reset_timer for unknown room '{}', ignoring", room_id);
            return false;
        };

        {
            let mut guard = room.lock().await;
            let Some(timer) = guard.timer_mut(timer_id) else {
                tracing::debug!(
                    "reset_timer for unknown timer '{}/{}', ignoring",
                    room_id,
                    timer_id
                );
                return false;
            };
            timer.reset();
        }

        let store = Arc::clone(&self.store);
        let room_id = room_id.clone();
        let timer_id = timer_id.clone();
        tokio::spawn(async move {
            if let Err(e) = store.upsert(&room_id, &timer_id, 0.0, false).await {
                tracing::warn!(
                    "Failed to persist reset timer '{}/{}': {}",
                    room_id,
                    timer_id,
                    e
                );
            }
        });

        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::message_pusher::WebSocketMessagePusher;
    use crate::infrastructure::store::InMemoryTimerStore;
    use crate::infrastructure::ticker::{TICK_PERIOD, TickerScheduler};
    use crate::usecase::{CreateTimerUseCase, ResumeTimerUseCase};
    use std::time::Duration;

    #[tokio::test]
    async fn test_reset_zeroes_count_and_persists() {
        // テスト項目: reset で count が 0 になり、永続化される
        // given (前提条件):
        let registry = Arc::new(RoomRegistry::new());
        let store = Arc::new(InMemoryTimerStore::new());
        let room_id = RoomId::new("r").unwrap();
        let timer_id = {
            let room = registry.ensure_room(&room_id).await;
            let mut room = room.lock().await;
            let snapshot = room.create_timer();
            room.timer_mut(&snapshot.timer_id).unwrap().advance(0.7);
            snapshot.timer_id
        };
        let usecase = ResetTimerUseCase::new(registry.clone(), store.clone());

        // when (操作):
        let result = usecase.execute(&room_id, &timer_id).await;

        // then (期待する結果):
        assert!(result);
        let room = registry.room(&room_id).await.unwrap();
        assert_eq!(room.lock().await.timer(&timer_id).unwrap().count(), 0.0);

        tokio::time::sleep(Duration::from_millis(50)).await;
        let records = store.find_by_room(&room_id).await.unwrap();
        assert_eq!(records[0].count, 0.0);
        assert!(!records[0].is_running);
    }

    #[tokio::test(start_paused = true)]
    async fn test_reset_does_not_stop_running_ticker() {
        // テスト項目: 動作中タイマーの reset 後もカウントはゼロから進み続ける
        // given (前提条件):
        let registry = Arc::new(RoomRegistry::new());
        let store = Arc::new(InMemoryTimerStore::new());
        let pusher = Arc::new(WebSocketMessagePusher::new());
        let scheduler = Arc::new(TickerScheduler::new(pusher));
        let room_id = RoomId::new("r").unwrap();
        registry.ensure_room(&room_id).await;
        let created = CreateTimerUseCase::new(registry.clone(), store.clone())
            .execute(&room_id)
            .await
            .unwrap();
        let resume = ResumeTimerUseCase::new(registry.clone(), scheduler);
        let usecase = ResetTimerUseCase::new(registry.clone(), store);

        assert!(resume.execute(&room_id, &created.timer_id).await);
        tokio::time::sleep(TICK_PERIOD * 5 + Duration::from_millis(10)).await;

        // when (操作):
        assert!(usecase.execute(&room_id, &created.timer_id).await);
        tokio::time::sleep(TICK_PERIOD * 3).await;

        // then (期待する結果): リセット後の 3 周期ぶんだけ進んでいる
        let room = registry.room(&room_id).await.unwrap();
        let room = room.lock().await;
        let timer = room.timer(&created.timer_id).unwrap();
        assert!(timer.is_running());
        assert!((timer.count() - 0.3).abs() < 1e-6, "count was {}", timer.count());
    }

    #[tokio::test]
    async fn test_reset_unknown_timer_is_ignored() {
        // テスト項目: 存在しないタイマーへの reset が無視される
        // given (前提条件):
        let registry = Arc::new(RoomRegistry::new());
        let store = Arc::new(InMemoryTimerStore::new());
        let room_id = RoomId::new("r").unwrap();
        registry.ensure_room(&room_id).await;
        let usecase = ResetTimerUseCase::new(registry, store);

        // when (操作):
        let result = usecase.execute(&room_id, &TimerId::new("1").unwrap()).await;

        // then (期待する結果):
        assert!(!result);
    }
}
