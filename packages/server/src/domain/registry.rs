//! Room Registry
//!
//! プロセス内で唯一の、アクティブなルームの権威的なマップ。
//! グローバル変数ではなく、依存として注入される明示的なインスタンスとして
//! 構築する（テストごとに独立したインスタンスを作れるようにするため）。
//!
//! ## 直列化ドメイン
//!
//! Registry 自体の Mutex はマップの参照・挿入の間だけ保持する。
//! ルーム単位の直列化は `Arc<Mutex<Room>>` のルームごとの Mutex が担い、
//! UseCase 層は 1 操作の間この Mutex を保持し続ける責務を負う。

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::Mutex;

use sunadokei_shared::time::get_jst_timestamp;

use super::entity::Room;
use super::value_object::RoomId;

/// アクティブなルームの権威的なマップ
pub struct RoomRegistry {
    rooms: Mutex<HashMap<RoomId, Arc<Mutex<Room>>>>,
}

impl RoomRegistry {
    pub fn new() -> Self {
        Self {
            rooms: Mutex::new(HashMap::new()),
        }
    }

    /// ルームが無ければ作成して返す（冪等）
    pub async fn ensure_room(&self, room_id: &RoomId) -> Arc<Mutex<Room>> {
        let mut rooms = self.rooms.lock().await;
        rooms
            .entry(room_id.clone())
            .or_insert_with(|| {
                tracing::info!("Room '{}' created", room_id);
                Arc::new(Mutex::new(Room::new(room_id.clone(), get_jst_timestamp())))
            })
            .clone()
    }

    /// 既存のルームを返す。暗黙の作成はしない。
    pub async fn room(&self, room_id: &RoomId) -> Option<Arc<Mutex<Room>>> {
        let rooms = self.rooms.lock().await;
        rooms.get(room_id).cloned()
    }

    /// アクティブな全ルームを返す（HTTP API 用）
    pub async fn rooms(&self) -> Vec<(RoomId, Arc<Mutex<Room>>)> {
        let rooms = self.rooms.lock().await;
        rooms
            .iter()
            .map(|(room_id, room)| (room_id.clone(), room.clone()))
            .collect()
    }
}

impl Default for RoomRegistry {
    fn default() -> Self {
        Self::new()
    }
}
