//! Conversion logic between DTOs and domain entities.

use crate::domain::TimerSnapshot;
use crate::infrastructure::dto::http::TimerDetailDto;
use crate::infrastructure::dto::websocket::TimerInfo;

// ========================================
// Domain Entity → DTO
// ========================================

impl From<TimerSnapshot> for TimerInfo {
    fn from(snapshot: TimerSnapshot) -> Self {
        Self {
            timer_id: snapshot.timer_id.into_string(),
            count: snapshot.count,
            note: snapshot.note,
            is_running: snapshot.is_running,
        }
    }
}

impl From<TimerSnapshot> for TimerDetailDto {
    fn from(snapshot: TimerSnapshot) -> Self {
        Self {
            timer_id: snapshot.timer_id.into_string(),
            count: snapshot.count,
            note: snapshot.note,
            is_running: snapshot.is_running,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::TimerId;

    #[test]
    fn test_snapshot_to_timer_info() {
        // テスト項目: ドメインのスナップショットがワイヤ表現に変換される
        // given (前提条件):
        let snapshot = TimerSnapshot {
            timer_id: TimerId::new("3").unwrap(),
            count: 1.2,
            note: "memo".to_string(),
            is_running: true,
        };

        // when (操作):
        let info: TimerInfo = snapshot.into();

        // then (期待する結果):
        assert_eq!(info.timer_id, "3");
        assert!((info.count - 1.2).abs() < 1e-9);
        assert_eq!(info.note, "memo");
        assert!(info.is_running);
    }

    #[test]
    fn test_snapshot_to_timer_detail_dto() {
        // テスト項目: ドメインのスナップショットが HTTP 表現に変換される
        // given (前提条件):
        let snapshot = TimerSnapshot {
            timer_id: TimerId::new("1").unwrap(),
            count: 0.0,
            note: String::new(),
            is_running: false,
        };

        // when (操作):
        let dto: TimerDetailDto = snapshot.into();

        // then (期待する結果):
        assert_eq!(dto.timer_id, "1");
        assert_eq!(dto.count, 0.0);
        assert!(!dto.is_running);
    }
}
