//! UseCase: ルーム詳細取得（HTTP API 用）

use std::sync::Arc;

use crate::domain::{RoomId, RoomRegistry, TimerSnapshot};

use super::error::GetRoomDetailError;

/// ルーム詳細
#[derive(Debug, Clone, PartialEq)]
pub struct RoomDetail {
    pub room_id: RoomId,
    /// JST ミリ秒
    pub created_at: i64,
    pub timers: Vec<TimerSnapshot>,
}

/// ルーム詳細取得のユースケース
pub struct GetRoomDetailUseCase {
    /// Room Registry（アクティブなルームの権威的なマップ）
    registry: Arc<RoomRegistry>,
}

impl GetRoomDetailUseCase {
    /// 新しい GetRoomDetailUseCase を作成
    pub fn new(registry: Arc<RoomRegistry>) -> Self {
        Self { registry }
    }

    /// ルーム詳細を取得
    ///
    /// # Returns
    ///
    /// * `Ok(RoomDetail)` - ルームの全タイマーのスナップショット
    /// * `Err(GetRoomDetailError::RoomNotFound)` - ルームがアクティブでない
    pub async fn execute(&self, room_id: String) -> Result<RoomDetail, GetRoomDetailError> {
        let room_id = RoomId::new(room_id).map_err(|_| GetRoomDetailError::RoomNotFound)?;
        let room = self
            .registry
            .room(&room_id)
            .await
            .ok_or(GetRoomDetailError::RoomNotFound)?;
        let room = room.lock().await;
        Ok(RoomDetail {
            room_id,
            created_at: room.created_at,
            timers: room.snapshots(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_execute_returns_timers_of_room() {
        // テスト項目: アクティブなルームの詳細が取得できる
        // given (前提条件):
        let registry = Arc::new(RoomRegistry::new());
        let room_id = RoomId::new("r").unwrap();
        {
            let room = registry.ensure_room(&room_id).await;
            let mut room = room.lock().await;
            room.create_timer();
            room.create_timer();
        }
        let usecase = GetRoomDetailUseCase::new(registry);

        // when (操作):
        let detail = usecase.execute("r".to_string()).await.unwrap();

        // then (期待する結果):
        assert_eq!(detail.room_id, room_id);
        assert_eq!(detail.timers.len(), 2);
        assert_eq!(detail.timers[0].timer_id.as_str(), "1");
        assert_eq!(detail.timers[1].timer_id.as_str(), "2");
    }

    #[tokio::test]
    async fn test_execute_unknown_room_returns_not_found() {
        // テスト項目: 存在しないルームは RoomNotFound になる
        // given (前提条件):
        let usecase = GetRoomDetailUseCase::new(Arc::new(RoomRegistry::new()));

        // when (操作):
        let result = usecase.execute("nowhere".to_string()).await;

        // then (期待する結果):
        assert_eq!(result.unwrap_err(), GetRoomDetailError::RoomNotFound);
    }
}
