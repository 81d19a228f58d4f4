//! MessagePusher trait 定義
//!
//! ドメイン層が必要とするメッセージ送信（通知）のインターフェース。
//! セッションとルームのメンバーシップはこの trait の実装が所有する。
//! 配送はベストエフォート（ack なし・リトライなし）。

use async_trait::async_trait;
use thiserror::Error;
use tokio::sync::mpsc;

use super::value_object::{RoomId, SessionId};

/// セッションへの送信チャンネル
pub type PusherChannel = mpsc::UnboundedSender<String>;

/// メッセージ送信のエラー
#[derive(Debug, Error)]
pub enum MessagePushError {
    #[error("session not found: {0}")]
    SessionNotFound(String),
    #[error("failed to push message: {0}")]
    PushFailed(String),
}

/// MessagePusher trait
#[async_trait]
pub trait MessagePusher: Send + Sync {
    /// セッションを登録する（接続時）
    async fn register_session(&self, session_id: SessionId, sender: PusherChannel);

    /// セッションを登録解除する（切断時）。全ルームからも退出する。
    async fn unregister_session(&self, session_id: &SessionId);

    /// セッションをルームに参加させる
    async fn join_room(&self, room_id: &RoomId, session_id: &SessionId);

    /// セッションをルームから退出させる
    async fn leave_room(&self, room_id: &RoomId, session_id: &SessionId);

    /// 特定のセッションにだけ送信する
    async fn push_to(&self, session_id: &SessionId, content: &str)
    -> Result<(), MessagePushError>;

    /// ルームの全セッションに送信する
    ///
    /// 個々のセッションへの送信失敗は無視される（ログのみ）。
    async fn broadcast_to_room(&self, room_id: &RoomId, content: &str);
}
