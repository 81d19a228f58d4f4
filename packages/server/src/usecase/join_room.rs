//! UseCase: ルーム参加処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - JoinRoomUseCase::execute() メソッド
//! - ルームの遅延作成と、永続ストアからの reconciliation
//!
//! ### なぜこのテストが必要か
//! - 再接続・サーバ再起動後に状態が復元されることはこのサービスの核心
//! - メモリ上の状態が常にストアより優先されること（memory wins）を保証
//!
//! ### どのような状況を想定しているか
//! - 正常系：ストアにレコードがある状態での初回 join
//! - エッジケース：メモリ上に同じ ID のタイマーが既にある join
//! - 異常系：ストアの読み込み失敗（メモリのみで継続）

use std::sync::Arc;

use crate::domain::{RoomId, RoomRegistry, TimerId, TimerSnapshot, TimerStore};

/// ルーム参加のユースケース
pub struct JoinRoomUseCase {
    /// Room Registry（アクティブなルームの権威的なマップ）
    registry: Arc<RoomRegistry>,
    /// Timer Store（永続ストアの抽象化）
    store: Arc<dyn TimerStore>,
}

impl JoinRoomUseCase {
    /// 新しい JoinRoomUseCase を作成
    pub fn new(registry: Arc<RoomRegistry>, store: Arc<dyn TimerStore>) -> Self {
        Self { registry, store }
    }

    /// ルーム参加を実行
    ///
    /// ルームが無ければ作成し、永続ストアのレコードのうちメモリに無い
    /// タイマーを復元してから、ルームの全タイマーのスナップショットを返す。
    /// 返り値は join したセッションにだけ送る `all_timers` の元になる。
    ///
    /// ストアの読み込みに失敗した場合はメモリ上の状態だけで継続する。
    pub async fn execute(&self, room_id: &RoomId) -> Vec<TimerSnapshot> {
        let room = self.registry.ensure_room(room_id).await;

        // 永続ストアとの突き合わせ。ロックを取る前に読み終えておく。
        let records = match self.store.find_by_room(room_id).await {
            Ok(records) => records,
            Err(e) => {
                tracing::warn!(
                    "Failed to load records for room '{}', continuing with in-memory state: {}",
                    room_id,
                    e
                );
                Vec::new()
            }
        };

        let mut room = room.lock().await;
        for record in records {
            match TimerId::new(record.timer_id) {
                Ok(timer_id) => room.restore_timer(timer_id, record.count, record.note),
                Err(e) => {
                    tracing::warn!("Skipping record with invalid timer id: {}", e);
                }
            }
        }
        room.snapshots()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{StoreError, TimerRecord};
    use crate::infrastructure::store::InMemoryTimerStore;
    use async_trait::async_trait;

    fn record(room_id: &str, timer_id: &str, count: f64, note: &str) -> TimerRecord {
        TimerRecord {
            room_id: room_id.to_string(),
            timer_id: timer_id.to_string(),
            count,
            note: note.to_string(),
            is_running: false,
        }
    }

    #[tokio::test]
    async fn test_join_restores_timers_from_store() {
        // テスト項目: メモリに無いルームへの join でストアのレコードが復元される
        // given (前提条件):
        let registry = Arc::new(RoomRegistry::new());
        let store = Arc::new(InMemoryTimerStore::new());
        store.create(record("r", "1", 5.0, "x")).await.unwrap();
        let usecase = JoinRoomUseCase::new(registry.clone(), store);

        // when (操作):
        let snapshots = usecase.execute(&RoomId::new("r").unwrap()).await;

        // then (期待する結果): 復元されたタイマーは停止状態
        assert_eq!(snapshots.len(), 1);
        assert_eq!(snapshots[0].timer_id.as_str(), "1");
        assert!((snapshots[0].count - 5.0).abs() < 1e-9);
        assert_eq!(snapshots[0].note, "x");
        assert!(!snapshots[0].is_running);
    }

    #[tokio::test]
    async fn test_join_prefers_in_memory_state_over_store() {
        // テスト項目: メモリ上に同じ ID のタイマーがある場合はストアを無視する
        // given (前提条件):
        let registry = Arc::new(RoomRegistry::new());
        let store = Arc::new(InMemoryTimerStore::new());
        let room_id = RoomId::new("r").unwrap();

        // メモリ側: count 0.3 のタイマー "1"
        {
            let room = registry.ensure_room(&room_id).await;
            let mut room = room.lock().await;
            let snapshot = room.create_timer();
            room.timer_mut(&snapshot.timer_id).unwrap().advance(0.3);
        }
        // ストア側: 同じ ID "1" で count 99.0
        store.create(record("r", "1", 99.0, "stale")).await.unwrap();

        let usecase = JoinRoomUseCase::new(registry, store);

        // when (操作):
        let snapshots = usecase.execute(&room_id).await;

        // then (期待する結果): メモリ側の値が残る
        assert_eq!(snapshots.len(), 1);
        assert!((snapshots[0].count - 0.3).abs() < 1e-9);
        assert_eq!(snapshots[0].note, "");
    }

    #[tokio::test]
    async fn test_join_twice_does_not_duplicate_timers() {
        // テスト項目: 同じルームへの join を繰り返してもタイマーは重複しない
        // given (前提条件):
        let registry = Arc::new(RoomRegistry::new());
        let store = Arc::new(InMemoryTimerStore::new());
        store.create(record("r", "1", 1.0, "")).await.unwrap();
        let usecase = JoinRoomUseCase::new(registry, store);
        let room_id = RoomId::new("r").unwrap();

        // when (操作):
        usecase.execute(&room_id).await;
        let snapshots = usecase.execute(&room_id).await;

        // then (期待する結果):
        assert_eq!(snapshots.len(), 1);
    }

    #[tokio::test]
    async fn test_join_survives_store_failure() {
        // テスト項目: ストアの読み込み失敗時もメモリ上の状態で join が完了する
        // given (前提条件):
        struct FailingStore;

        #[async_trait]
        impl TimerStore for FailingStore {
            async fn find_by_room(
                &self,
                _room_id: &RoomId,
            ) -> Result<Vec<TimerRecord>, StoreError> {
                Err(StoreError::Io(std::io::Error::other("store down")))
            }
            async fn create(&self, _record: TimerRecord) -> Result<(), StoreError> {
                Ok(())
            }
            async fn upsert(
                &self,
                _room_id: &RoomId,
                _timer_id: &TimerId,
                _count: f64,
                _is_running: bool,
            ) -> Result<(), StoreError> {
                Ok(())
            }
            async fn update_note(
                &self,
                _room_id: &RoomId,
                _timer_id: &TimerId,
                _note: &str,
            ) -> Result<(), StoreError> {
                Ok(())
            }
            async fn delete(
                &self,
                _room_id: &RoomId,
                _timer_id: &TimerId,
            ) -> Result<(), StoreError> {
                Ok(())
            }
        }

        let registry = Arc::new(RoomRegistry::new());
        let usecase = JoinRoomUseCase::new(registry.clone(), Arc::new(FailingStore));
        let room_id = RoomId::new("r").unwrap();

        // when (操作):
        let snapshots = usecase.execute(&room_id).await;

        // then (期待する結果): 空のルームとして参加できている
        assert!(snapshots.is_empty());
        assert!(registry.room(&room_id).await.is_some());
    }
}
