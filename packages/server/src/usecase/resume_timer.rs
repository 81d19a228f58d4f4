//! UseCase: タイマー再開処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - ResumeTimerUseCase::execute() メソッド
//! - tick source の起動と「タイマーごとに高々 1 本」の保証
//!
//! ### なぜこのテストが必要か
//! - resume の二重実行で tick が倍速になる事故を防ぐ
//! - 複数クライアントが同じタイマーを同時に操作する前提のサービスなので、
//!   冪等性がサービスの前提になる
//!
//! ### どのような状況を想定しているか
//! - 正常系：停止中タイマーの resume と tick の進行
//! - エッジケース：動作中タイマーへの resume（無視される）
//! - 異常系：存在しないルーム / タイマー（無視される）

use std::sync::Arc;

use crate::domain::{RoomId, RoomRegistry, TimerId};
use crate::infrastructure::ticker::TickerScheduler;

/// タイマー再開のユースケース
pub struct ResumeTimerUseCase {
    /// Room Registry（アクティブなルームの権威的なマップ）
    registry: Arc<RoomRegistry>,
    /// Ticker Scheduler（tick 生成の管理）
    scheduler: Arc<TickerScheduler>,
}

impl ResumeTimerUseCase {
    /// 新しい ResumeTimerUseCase を作成
    pub fn new(registry: Arc<RoomRegistry>, scheduler: Arc<TickerScheduler>) -> Self {
        Self {
            registry,
            scheduler,
        }
    }

    /// タイマー再開を実行
    ///
    /// ルームのロックを保持したまま tick source を起動して取り付けるので、
    /// 同じタイマーに tick source が 2 本付くことはない。
    /// 永続化はしない（動作状態が永続化されるのは stop 時のみ）。
    ///
    /// # Returns
    ///
    /// * `true` - 停止→動作の遷移が起きた（`timer_status` をブロードキャストする）
    /// * `false` - 対象が存在しない、または既に動作中（何もしない）
    pub async fn execute(&self, room_id: &RoomId, timer_id: &TimerId) -> bool {
        let Some(room) = self.registry.room(room_id).await else {
            tracing::debug!("resume_timer for unknown room '{}', ignoring", room_id);
            return false;
        };

        let mut guard = room.lock().await;
        let Some(timer) = guard.timer_mut(timer_id) else {
            tracing::debug!(
                "resume_timer for unknown timer '{}/{}', ignoring",
                room_id,
                timer_id
            );
            return false;
        };
        if timer.is_running() {
            tracing::debug!("Timer '{}/{}' is already running", room_id, timer_id);
            return false;
        }

        let handle = self
            .scheduler
            .start(Arc::clone(&room), room_id.clone(), timer_id.clone());
        timer.attach_ticker(handle);
        true
    }
}
