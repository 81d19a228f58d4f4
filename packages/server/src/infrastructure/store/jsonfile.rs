//! JSON ファイルに書き通す TimerStore 実装
//!
//! 起動時にファイル全体を読み込み、以後は変更のたびに全レコードを
//! 一時ファイルへ書き出してから rename で置き換える。途中でプロセスが
//! 落ちても壊れたファイルが残らない。
//!
//! レコード数はルーム × タイマー程度で小さい前提。書き込み頻度も
//! stop / reset / note 更新などの遷移点に限られるため全書き出しで足りる。

use std::collections::HashMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{RoomId, StoreError, TimerId, TimerRecord, TimerStore};

use super::inmemory::sort_records;

type RecordKey = (String, String);

/// JSON ファイルバックの TimerStore 実装
pub struct JsonFileTimerStore {
    path: PathBuf,
    records: Mutex<HashMap<RecordKey, TimerRecord>>,
}

impl JsonFileTimerStore {
    /// ファイルを読み込んでストアを開く。ファイルが無ければ空で開始する。
    pub async fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref().to_path_buf();
        let records = match tokio::fs::read(&path).await {
            Ok(bytes) => {
                let list: Vec<TimerRecord> = serde_json::from_slice(&bytes)?;
                list.into_iter()
                    .map(|record| ((record.room_id.clone(), record.timer_id.clone()), record))
                    .collect()
            }
            Err(e) if e.kind() == ErrorKind::NotFound => HashMap::new(),
            Err(e) => return Err(e.into()),
        };
        Ok(Self {
            path,
            records: Mutex::new(records),
        })
    }

    /// 全レコードを一時ファイルへ書き出し、rename で置き換える
    async fn flush(&self, records: &HashMap<RecordKey, TimerRecord>) -> Result<(), StoreError> {
        let mut list: Vec<TimerRecord> = records.values().cloned().collect();
        list.sort_by(|a, b| {
            a.room_id.cmp(&b.room_id).then_with(|| {
                match (a.timer_id.parse::<u64>(), b.timer_id.parse::<u64>()) {
                    (Ok(l), Ok(r)) => l.cmp(&r),
                    _ => a.timer_id.cmp(&b.timer_id),
                }
            })
        });
        let json = serde_json::to_vec_pretty(&list)?;
        let tmp = self.path.with_extension("json.tmp");
        tokio::fs::write(&tmp, &json).await?;
        tokio::fs::rename(&tmp, &self.path).await?;
        Ok(())
    }
}

fn key(room_id: &RoomId, timer_id: &TimerId) -> RecordKey {
    (room_id.as_str().to_string(), timer_id.as_str().to_string())
}

#[async_trait]
impl TimerStore for JsonFileTimerStore {
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
        self.flush(&records).await
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
        self.flush(&records).await
    }

    async fn update_note(
        &self,
        room_id: &RoomId,
        timer_id: &TimerId,
        note: &str,
    ) -> Result<(), StoreError> {
        let mut records = self.records.lock().await;
        match records.get_mut(&key(room_id, timer_id)) {
            Some(record) => {
                record.note = note.to_string();
                self.flush(&records).await
            }
            None => Ok(()),
        }
    }

    async fn delete(&self, room_id: &RoomId, timer_id: &TimerId) -> Result<(), StoreError> {
        let mut records = self.records.lock().await;
        match records.remove(&key(room_id, timer_id)) {
            Some(_) => self.flush(&records).await,
            None => Ok(()),
        }
    }
}
