//! UseCase: ルーム一覧取得（HTTP API 用）

use std::sync::Arc;

use crate::domain::{RoomId, RoomRegistry};

/// ルーム一覧の 1 エントリ
#[derive(Debug, Clone, PartialEq)]
pub struct RoomSummary {
    pub room_id: RoomId,
    pub timer_count: usize,
    /// JST ミリ秒
    pub created_at: i64,
}

/// ルーム一覧取得のユースケース
pub struct GetRoomsUseCase {
    /// Room Registry（アクティブなルームの権威的なマップ）
    registry: Arc<RoomRegistry>,
}

impl GetRoomsUseCase {
    /// 新しい GetRoomsUseCase を作成
    pub fn new(registry: Arc<RoomRegistry>) -> Self {
        Self { registry }
    }

    /// アクティブな全ルームのサマリを room_id 順で返す
    pub async fn execute(&self) -> Vec<RoomSummary> {
        let mut summaries = Vec::new();
        for (room_id, room) in self.registry.rooms().await {
            let room = room.lock().await;
            summaries.push(RoomSummary {
                room_id,
                timer_count: room.timer_count(),
                created_at: room.created_at,
            });
        }
        summaries.sort_by(|a, b| a.room_id.cmp(&b.room_id));
        summaries
    }
}
