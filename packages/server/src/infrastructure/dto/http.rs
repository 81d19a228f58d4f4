//! HTTP API レスポンスの DTO

use serde::{Deserialize, Serialize};

/// ルーム一覧のサマリ
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomSummaryDto {
    pub id: String,
    pub timer_count: usize,
    /// RFC 3339 (JST)
    pub created_at: String,
}

/// ルーム詳細
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomDetailDto {
    pub id: String,
    /// RFC 3339 (JST)
    pub created_at: String,
    pub timers: Vec<TimerDetailDto>,
}

/// ルーム詳細に含まれるタイマー 1 件
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimerDetailDto {
    pub timer_id: String,
    pub count: f64,
    pub note: String,
    pub is_running: bool,
}
