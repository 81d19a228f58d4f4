//! WebSocket メッセージの DTO
//!
//! ワイヤ表現は `type` タグが snake_case、フィールドが camelCase。
//!
//! - クライアント → サーバ: `ClientMessage`（操作リクエスト）
//! - サーバ → クライアント: 各イベント構造体（ルームへのブロードキャスト、
//!   または join したセッションへのスナップショット）

use serde::{Deserialize, Serialize};

/// クライアントから届く操作リクエスト
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case", rename_all_fields = "camelCase")]
pub enum ClientMessage {
    JoinRoom {
        room_id: String,
    },
    LeaveRoom {
        room_id: String,
    },
    CreateTimer {
        room_id: String,
    },
    ResumeTimer {
        room_id: String,
        timer_id: String,
    },
    StopTimer {
        room_id: String,
        timer_id: String,
    },
    ResetTimer {
        room_id: String,
        timer_id: String,
    },
    DeleteTimer {
        room_id: String,
        timer_id: String,
    },
    UpdateNote {
        room_id: String,
        timer_id: String,
        note: String,
    },
}

/// サーバが送るイベントの種別
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventType {
    AllTimers,
    TimerCreated,
    TimerUpdate,
    TimerStatus,
    TimerDeleted,
    NoteUpdated,
}

/// タイマー 1 件のワイヤ表現
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimerInfo {
    pub timer_id: String,
    pub count: f64,
    pub note: String,
    pub is_running: bool,
}

/// join したセッションにだけ送る、ルームの全タイマーのスナップショット
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AllTimersMessage {
    pub r#type: EventType,
    pub timers: Vec<TimerInfo>,
}

/// タイマー作成イベント（ルームへブロードキャスト）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimerCreatedMessage {
    pub r#type: EventType,
    pub timer_id: String,
    pub count: f64,
    pub note: String,
}

/// tick とリセットによるカウント更新イベント（ルームへブロードキャスト）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimerUpdateMessage {
    pub r#type: EventType,
    pub timer_id: String,
    pub count: f64,
}

/// 動作状態の変更イベント（ルームへブロードキャスト）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimerStatusMessage {
    pub r#type: EventType,
    pub timer_id: String,
    pub is_running: bool,
}

/// タイマー削除イベント（ルームへブロードキャスト）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimerDeletedMessage {
    pub r#type: EventType,
    pub timer_id: String,
}

/// メモ更新イベント（ルームへブロードキャスト）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NoteUpdatedMessage {
    pub r#type: EventType,
    pub timer_id: String,
    pub note: String,
}
