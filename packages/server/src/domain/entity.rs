//! ドメインエンティティ（Room / Timer）
//!
//! Timer の「動作中」状態は `tick_handle` の有無から導出する。
//! 「tick source が生きている ⇔ 動作中」という不変条件を、
//! boolean フラグとの二重管理ではなく構造そのもので保証するため。

use std::collections::HashMap;

use tokio::task::AbortHandle;

use super::value_object::{RoomId, TimerId};

/// 動作中タイマーの tick source に対する所有トークン
///
/// `cancel` はタイマーが Registry から削除された後でも安全に呼べる
/// （キャンセルに Timer 本体への到達可能性を要求しない）。
#[derive(Debug)]
pub struct TickHandle {
    inner: AbortHandle,
}

impl TickHandle {
    pub fn new(inner: AbortHandle) -> Self {
        Self { inner }
    }

    /// tick source を取り消す。取り消し後に tick が発火することはない。
    pub fn cancel(self) {
        self.inner.abort();
    }
}

/// ルーム内の共有タイマー
#[derive(Debug)]
pub struct Timer {
    count: f64,
    note: String,
    tick_handle: Option<TickHandle>,
}

impl Timer {
    /// 新規タイマーを作成する（count = 0, note = "", 停止状態）
    pub fn new() -> Self {
        Self {
            count: 0.0,
            note: String::new(),
            tick_handle: None,
        }
    }

    /// 永続ストアのレコードからタイマーを復元する（常に停止状態）
    pub fn restored(count: f64, note: String) -> Self {
        Self {
            // count は非負が不変条件
            count: count.max(0.0),
            note,
            tick_handle: None,
        }
    }

    pub fn count(&self) -> f64 {
        self.count
    }

    pub fn note(&self) -> &str {
        &self.note
    }

    pub fn is_running(&self) -> bool {
        self.tick_handle.is_some()
    }

    /// カウントを増分だけ進め、新しい値を返す
    pub fn advance(&mut self, increment: f64) -> f64 {
        self.count += increment;
        self.count
    }

    /// カウントをゼロに戻す。tick source には触れない。
    pub fn reset(&mut self) {
        self.count = 0.0;
    }

    pub fn set_note(&mut self, note: String) {
        self.note = note;
    }

    /// tick source の所有トークンを取り付ける
    pub fn attach_ticker(&mut self, handle: TickHandle) {
        self.tick_handle = Some(handle);
    }

    /// tick source の所有トークンを取り外す（停止・削除時）
    pub fn detach_ticker(&mut self) -> Option<TickHandle> {
        self.tick_handle.take()
    }

    /// 現在状態の不変スナップショットを作る
    pub fn snapshot(&self, timer_id: TimerId) -> TimerSnapshot {
        TimerSnapshot {
            timer_id,
            count: self.count,
            note: self.note.clone(),
            is_running: self.is_running(),
        }
    }
}

impl Default for Timer {
    fn default() -> Self {
        Self::new()
    }
}

/// タイマーの不変スナップショット
///
/// ブロードキャストや HTTP API へ渡すための射影。tick source は含まない。
#[derive(Debug, Clone, PartialEq)]
pub struct TimerSnapshot {
    pub timer_id: TimerId,
    pub count: f64,
    pub note: String,
    pub is_running: bool,
}

/// タイマーを所有するルーム
///
/// Room は RoomRegistry だけが所有し、ルームごとの Mutex を保持したまま
/// 操作することがアトミシティ契約（同一ルーム内の操作は直列化される）。
#[derive(Debug)]
pub struct Room {
    pub id: RoomId,
    /// ルーム作成時刻（JST ミリ秒）。HTTP API の表示にのみ使う。
    pub created_at: i64,
    timers: HashMap<TimerId, Timer>,
    next_timer_id: u64,
}

impl Room {
    pub fn new(id: RoomId, created_at: i64) -> Self {
        Self {
            id,
            created_at,
            timers: HashMap::new(),
            next_timer_id: 1,
        }
    }

    /// 次の連番 ID で新規タイマーを挿入し、そのスナップショットを返す
    pub fn create_timer(&mut self) -> TimerSnapshot {
        let timer_id = TimerId::from_index(self.next_timer_id);
        self.next_timer_id += 1;
        self.timers.insert(timer_id.clone(), Timer::new());
        TimerSnapshot {
            timer_id,
            count: 0.0,
            note: String::new(),
            is_running: false,
        }
    }

    /// 永続ストアのレコードからタイマーを復元する
    ///
    /// すでにメモリ上に同じ ID のタイマーがある場合は何もしない（メモリ優先）。
    /// 復元した ID が数値なら、次回の採番がそれと衝突しないよう連番を進める。
    pub fn restore_timer(&mut self, timer_id: TimerId, count: f64, note: String) {
        if self.timers.contains_key(&timer_id) {
            return;
        }
        if let Ok(index) = timer_id.as_str().parse::<u64>() {
            if index >= self.next_timer_id {
                self.next_timer_id = index + 1;
            }
        }
        self.timers.insert(timer_id, Timer::restored(count, note));
    }

    pub fn timer(&self, timer_id: &TimerId) -> Option<&Timer> {
        self.timers.get(timer_id)
    }

    pub fn timer_mut(&mut self, timer_id: &TimerId) -> Option<&mut Timer> {
        self.timers.get_mut(timer_id)
    }

    /// タイマーを取り除き、所有権ごと返す
    pub fn remove_timer(&mut self, timer_id: &TimerId) -> Option<Timer> {
        self.timers.remove(timer_id)
    }

    pub fn timer_count(&self) -> usize {
        self.timers.len()
    }

    /// 全タイマーのスナップショットを ID 順（数値として比較）で返す
    pub fn snapshots(&self) -> Vec<TimerSnapshot> {
        let mut snapshots: Vec<TimerSnapshot> = self
            .timers
            .iter()
            .map(|(timer_id, timer)| timer.snapshot(timer_id.clone()))
            .collect();
        snapshots.sort_by(|a, b| {
            let lhs = a.timer_id.as_str().parse::<u64>();
            let rhs = b.timer_id.as_str().parse::<u64>();
            match (lhs, rhs) {
                (Ok(l), Ok(r)) => l.cmp(&r),
                _ => a.timer_id.as_str().cmp(b.timer_id.as_str()),
            }
        });
        snapshots
    }
}
