//! UseCase: タイマー停止処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - StopTimerUseCase::execute() メソッド
//! - tick source のキャンセルと、停止時点の count の永続化
//!
//! ### なぜこのテストが必要か
//! - 停止後に tick が発火しないこと（キャンセルの同期性）を保証する
//! - 永続化失敗がメモリ上の遷移を妨げないことを保証
//!
//! ### どのような状況を想定しているか
//! - 正常系：動作中タイマーの stop と count の永続化
//! - エッジケース：停止済みタイマーへの stop（無視される）
//! - 異常系：ストアの書き込み失敗（遷移とブロードキャストは継続）

use std::sync::Arc;

use crate::domain::{RoomId, RoomRegistry, TimerId, TimerStore};

/// タイマー停止のユースケース
pub struct StopTimerUseCase {
    /// Room Registry（アクティブなルームの権威的なマップ）
    registry: Arc<RoomRegistry>,
    /// Timer Store（永続ストアの抽象化）
    store: Arc<dyn TimerStore>,
}

impl StopTimerUseCase {
    /// 新しい StopTimerUseCase を作成
    pub fn new(registry: Arc<RoomRegistry>, store: Arc<dyn TimerStore>) -> Self {
        Self { registry, store }
    }

    /// タイマー停止を実行
    ///
    /// ルームのロックを保持したまま tick source をキャンセルする。
    /// ロック待ちの tick はその場で中断されるため、この呼び出しが返った後に
    /// tick が観測されることはない。停止時点の count を `isRunning: false` で
    /// 永続化する（バックグラウンド・ベストエフォート）。
    ///
    /// # Returns
    ///
    /// * `Some(count)` - 動作→停止の遷移が起きた（`timer_status` の元）
    /// * `None` - 対象が存在しない、または既に停止中（何もしない）
    pub async fn execute(&self, room_id: &RoomId, timer_id: &TimerId) -> Option<f64> {
        let Some(room) = self.registry.room(room_id).await else {
            tracing::debug!("stop_timer for unknown room '{}', ignoring", room_id);
            return None;
        };

        let count = {
            let mut guard = room.lock().await;
            let Some(timer) = guard.timer_mut(timer_id) else {
                tracing::debug!(
                    "stop_timer for unknown timer '{}/{}', ignoring",
                    room_id,
                    timer_id
                );
                return None;
            };
            let Some(handle) = timer.detach_ticker() else {
                tracing::debug!("Timer '{}/{}' is not running", room_id, timer_id);
                return None;
            };
            handle.cancel();
            timer.count()
        };

        let store = Arc::clone(&self.store);
        let room_id = room_id.clone();
        let timer_id = timer_id.clone();
        tokio::spawn(async move {
            if let Err(e) = store.upsert(&room_id, &timer_id, count, false).await {
                tracing::warn!(
                    "Failed to persist stopped timer '{}/{}': {}",
                    room_id,
                    timer_id,
                    e
                );
            }
        });

        Some(count)
    }
}
