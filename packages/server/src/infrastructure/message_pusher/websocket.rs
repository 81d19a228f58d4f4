//! WebSocket を使った MessagePusher 実装
//!
//! ## 責務
//!
//! - WebSocket の `UnboundedSender` を管理
//! - セッションとルームのメンバーシップを管理
//! - セッションへのメッセージ送信（push_to, broadcast_to_room）
//!
//! ## 設計ノート
//!
//! WebSocket の生成は UI 層（`src/ui/handler/websocket.rs`）で行われます。
//! この実装は生成された `UnboundedSender` を受け取り、メッセージ送信に使用します。
//! セッションとルームのマップは単一の Mutex で守る（ロック順序の問題を避ける）。

use std::collections::{HashMap, HashSet};

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{MessagePushError, MessagePusher, PusherChannel, RoomId, SessionId};

#[derive(Default)]
struct PusherState {
    /// 接続中のセッションと対応する WebSocket sender
    sessions: HashMap<String, PusherChannel>,
    /// ルームごとの参加セッション集合
    rooms: HashMap<String, HashSet<String>>,
}

/// WebSocket を使った MessagePusher 実装
pub struct WebSocketMessagePusher {
    state: Mutex<PusherState>,
}

impl WebSocketMessagePusher {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(PusherState::default()),
        }
    }
}

impl Default for WebSocketMessagePusher {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl MessagePusher for WebSocketMessagePusher {
    async fn register_session(&self, session_id: SessionId, sender: PusherChannel) {
        let mut state = self.state.lock().await;
        state.sessions.insert(session_id.as_str().to_string(), sender);
        tracing::debug!("Session '{}' registered to MessagePusher", session_id);
    }

    async fn unregister_session(&self, session_id: &SessionId) {
        let mut state = self.state.lock().await;
        state.sessions.remove(session_id.as_str());
        // 全ルームから退出させ、空になったルームのメンバー集合は畳む
        state.rooms.retain(|_, members| {
            members.remove(session_id.as_str());
            !members.is_empty()
        });
        tracing::debug!("Session '{}' unregistered from MessagePusher", session_id);
    }

    async fn join_room(&self, room_id: &RoomId, session_id: &SessionId) {
        let mut state = self.state.lock().await;
        state
            .rooms
            .entry(room_id.as_str().to_string())
            .or_default()
            .insert(session_id.as_str().to_string());
        tracing::debug!("Session '{}' joined room '{}'", session_id, room_id);
    }

    async fn leave_room(&self, room_id: &RoomId, session_id: &SessionId) {
        let mut state = self.state.lock().await;
        let now_empty = match state.rooms.get_mut(room_id.as_str()) {
            Some(members) => {
                members.remove(session_id.as_str());
                members.is_empty()
            }
            None => false,
        };
        if now_empty {
            state.rooms.remove(room_id.as_str());
        }
        tracing::debug!("Session '{}' left room '{}'", session_id, room_id);
    }

    async fn push_to(
        &self,
        session_id: &SessionId,
        content: &str,
    ) -> Result<(), MessagePushError> {
        let state = self.state.lock().await;

        if let Some(sender) = state.sessions.get(session_id.as_str()) {
            sender
                .send(content.to_string())
                .map_err(|e| MessagePushError::PushFailed(e.to_string()))?;
            tracing::debug!("Pushed message to session '{}'", session_id);
            Ok(())
        } else {
            Err(MessagePushError::SessionNotFound(
                session_id.as_str().to_string(),
            ))
        }
    }

    async fn broadcast_to_room(&self, room_id: &RoomId, content: &str) {
        let state = self.state.lock().await;

        let Some(members) = state.rooms.get(room_id.as_str()) else {
            tracing::debug!("No sessions in room '{}', skipping broadcast", room_id);
            return;
        };

        for member in members {
            if let Some(sender) = state.sessions.get(member) {
                // ブロードキャストでは一部の送信失敗を許容
                if let Err(e) = sender.send(content.to_string()) {
                    tracing::warn!("Failed to push message to session '{}': {}", member, e);
                }
            } else {
                tracing::warn!("Session '{}' not found during broadcast, skipping", member);
            }
        }
    }
}
