//! TimerStore trait 定義
//!
//! ドメイン層が必要とする永続ストアへのインターフェース。
//! UseCase 層はこの trait に依存し、Infrastructure 層の具体的な実装には
//! 依存しない（依存性の逆転）。
//!
//! ストアは (roomId, timerId) をキーとするレコードの upsert / find / delete
//! を提供する。この層が書き出すレコードの `isRunning` は常に false
//! （動作中という状態自体は永続化しない）。

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::value_object::{RoomId, TimerId};

/// タイマーの永続化レコード
///
/// ワイヤ・ファイル表現は camelCase（`roomId`, `timerId`, `isRunning`）。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimerRecord {
    pub room_id: String,
    pub timer_id: String,
    pub count: f64,
    pub note: String,
    pub is_running: bool,
}

/// 永続ストアのエラー
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("store I/O failure: {0}")]
    Io(#[from] std::io::Error),
    #[error("store serialization failure: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Timer Store trait
///
/// すべての操作は (`roomId`, `timerId`) をキーとする。
/// `create` / `upsert` はキーに対して冪等（重複呼び出しで安全）。
#[async_trait]
pub trait TimerStore: Send + Sync {
    /// ルームに属する全レコードを取得
    async fn find_by_room(&self, room_id: &RoomId) -> Result<Vec<TimerRecord>, StoreError>;

    /// レコードを作成（同一キーが既にあれば上書き）
    async fn create(&self, record: TimerRecord) -> Result<(), StoreError>;

    /// count / isRunning を更新。レコードが無ければ作成する。
    async fn upsert(
        &self,
        room_id: &RoomId,
        timer_id: &TimerId,
        count: f64,
        is_running: bool,
    ) -> Result<(), StoreError>;

    /// note フィールドだけを更新。レコードが無ければ何もしない。
    async fn update_note(
        &self,
        room_id: &RoomId,
        timer_id: &TimerId,
        note: &str,
    ) -> Result<(), StoreError>;

    /// レコードを削除。無ければ何もしない。
    async fn delete(&self, room_id: &RoomId, timer_id: &TimerId) -> Result<(), StoreError>;
}
