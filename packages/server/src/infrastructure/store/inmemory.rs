//! InMemory TimerStore 実装
//!
//! HashMap をインメモリ DB として使用する。プロセスを落とすと消えるため、
//! 再起動耐性が必要な場合は `jsonfile` 実装を使うこと。

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{RoomId, StoreError, TimerId, TimerRecord, TimerStore};

type RecordKey = (String, String);

/// インメモリ TimerStore 実装
pub struct InMemoryTimerStore {
    records: Mutex<HashMap<RecordKey, TimerRecord>>,
}

impl InMemoryTimerStore {
    pub fn new() -> Self {
        Self {
            records: Mutex::new(HashMap::new()),
        }
    }
}

impl Default for InMemoryTimerStore {
    fn default() -> Self {
        Self::new()
    }
}

fn key(room_id: &RoomId, timer_id: &TimerId) -> RecordKey {
    (room_id.as_str().to_string(), timer_id.as_str().to_string())
}

/// ルーム内のレコードを timerId 順（数値として比較）に並べる
pub(crate) fn sort_records(records: &mut [TimerRecord]) {
    records.sort_by(|a, b| {
        let lhs = a.timer_id.parse::<u64>();
        let rhs = b.timer_id.parse::<u64>();
        match (lhs, rhs) {
            (Ok(l), Ok(r)) => l.cmp(&r),
            _ => a.timer_id.cmp(&b.timer_id),
        }
    });
}

#[async_trait]
impl TimerStore for InMemoryTimerStore {
    async fn find_by_room(&self, room_id: &RoomId) -> Result<Vec<TimerRecord>, StoreError> {
        let records = self.records.lock().await;
        let mut found: Vec<TimerRecord> = records
            .values()
            .filter(|record| record.room_id == room_id.as_str())
            .cloned()
            .collect();
        sort_records(&mut found);
        Ok(found)
    }

    async fn create(&self, record: TimerRecord) -> Result<(), StoreError> {
        let mut records = self.records.lock().await;
        records.insert((record.room_id.clone(), record.timer_id.clone()), record);
        Ok(())
    }

    async fn upsert(
        &self,
        room_id: &RoomId,
        timer_id: &TimerId,
        count: f64,
        is_running: bool,
    ) -> Result<(), StoreError> {
        let mut records = self.records.lock().await;
        records
            .entry(key(room_id, timer_id))
            .and_modify(|record| {
                record.count = count;
                record.is_running = is_running;
            })
            .or_insert_with(|| TimerRecord {
                room_id: room_id.as_str().to_string(),
                timer_id: timer_id.as_str().to_string(),
                count,
                note: String::new(),
                is_running,
            });
        Ok(())
    }

    async fn update_note(
        &self,
        room_id: &RoomId,
        timer_id: &TimerId,
        note: &str,
    ) -> Result<(), StoreError> {
        let mut records = self.records.lock().await;
        if let Some(record) = records.get_mut(&key(room_id, timer_id)) {
            record.note = note.to_string();
        }
        Ok(())
    }

    async fn delete(&self, room_id: &RoomId, timer_id: &TimerId) -> Result<(), StoreError> {
        let mut records = self.records.lock().await;
        records.remove(&key(room_id, timer_id));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(room_id: &str, timer_id: &str, count: f64) -> TimerRecord {
        TimerRecord {
            room_id: room_id.to_string(),
            timer_id: timer_id.to_string(),
            count,
            note: String::new(),
            is_running: false,
        }
    }

    #[tokio::test]
    async fn test_create_then_find_by_room() {
        // テスト項目: 作成したレコードがルーム単位で取得できる
        // given (前提条件):
        let store = InMemoryTimerStore::new();
        store.create(record("a", "1", 0.0)).await.unwrap();
        store.create(record("a", "2", 1.5)).await.unwrap();
        store.create(record("b", "1", 9.0)).await.unwrap();

        // when (操作):
        let found = store
            .find_by_room(&RoomId::new("a").unwrap())
            .await
            .unwrap();

        // then (期待する結果): ルーム "a" の 2 件だけが timerId 順で返る
        assert_eq!(found.len(), 2);
        assert_eq!(found[0].timer_id, "1");
        assert_eq!(found[1].timer_id, "2");
    }

    #[tokio::test]
    async fn test_create_is_idempotent_by_key() {
        // テスト項目: 同一キーへの create の重複呼び出しが安全
        // given (前提条件):
        let store = InMemoryTimerStore::new();
        store.create(record("a", "1", 0.0)).await.unwrap();

        // when (操作):
        store.create(record("a", "1", 0.0)).await.unwrap();

        // then (期待する結果): レコードは 1 件のまま
        let found = store
            .find_by_room(&RoomId::new("a").unwrap())
            .await
            .unwrap();
        assert_eq!(found.len(), 1);
    }

    #[tokio::test]
    async fn test_upsert_updates_existing_record() {
        // テスト項目: upsert が既存レコードの count / isRunning を更新する
        // given (前提条件):
        let store = InMemoryTimerStore::new();
        let room_id = RoomId::new("a").unwrap();
        let timer_id = TimerId::new("1").unwrap();
        let mut created = record("a", "1", 0.0);
        created.note = "memo".to_string();
        store.create(created).await.unwrap();

        // when (操作):
        store.upsert(&room_id, &timer_id, 4.2, false).await.unwrap();

        // then (期待する結果): count が更新され、note は保持される
        let found = store.find_by_room(&room_id).await.unwrap();
        assert!((found[0].count - 4.2).abs() < 1e-9);
        assert_eq!(found[0].note, "memo");
        assert!(!found[0].is_running);
    }

    #[tokio::test]
    async fn test_upsert_creates_record_if_absent() {
        // テスト項目: upsert がレコード不在時に新規作成する
        // given (前提条件):
        let store = InMemoryTimerStore::new();
        let room_id = RoomId::new("a").unwrap();
        let timer_id = TimerId::new("7").unwrap();

        // when (操作):
        store.upsert(&room_id, &timer_id, 1.0, false).await.unwrap();

        // then (期待する結果):
        let found = store.find_by_room(&room_id).await.unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].timer_id, "7");
        assert_eq!(found[0].note, "");
    }

    #[tokio::test]
    async fn test_update_note_on_missing_record_is_noop() {
        // テスト項目: 存在しないレコードへの update_note が何もしない
        // given (前提条件):
        let store = InMemoryTimerStore::new();
        let room_id = RoomId::new("a").unwrap();

        // when (操作):
        store
            .update_note(&room_id, &TimerId::new("1").unwrap(), "memo")
            .await
            .unwrap();

        // then (期待する結果): レコードは作成されない
        assert!(store.find_by_room(&room_id).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_delete_removes_record_and_is_idempotent() {
        // テスト項目: delete がレコードを削除し、二重削除も安全
        // given (前提条件):
        let store = InMemoryTimerStore::new();
        let room_id = RoomId::new("a").unwrap();
        let timer_id = TimerId::new("1").unwrap();
        store.create(record("a", "1", 2.0)).await.unwrap();

        // when (操作):
        store.delete(&room_id, &timer_id).await.unwrap();
        store.delete(&room_id, &timer_id).await.unwrap();

        // then (期待する結果):
        assert!(store.find_by_room(&room_id).await.unwrap().is_empty());
    }
}
