//! WebSocket connection handlers.
//!
//! 1 接続 = 1 セッション。接続ごとにサーバ側で SessionId を採番し、
//! 受信したリクエストを UseCase 層へディスパッチする。
//! 同一ルームへの操作はルームの Mutex で直列化される（UseCase 層の責務）。

use std::sync::Arc;

use axum::{
    extract::{
        State,
        ws::{Message, WebSocket, WebSocketUpgrade},
    },
    response::IntoResponse,
};
use futures_util::{sink::SinkExt, stream::StreamExt};
use serde::Serialize;
use tokio::sync::mpsc;

use crate::{
    domain::{MessagePusher, RoomId, SessionId, TimerId},
    infrastructure::dto::websocket::{
        AllTimersMessage, ClientMessage, EventType, NoteUpdatedMessage, TimerCreatedMessage,
        TimerDeletedMessage, TimerStatusMessage, TimerUpdateMessage,
    },
    ui::state::AppState,
};

pub async fn websocket_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_socket(socket, state))
}

/// Spawns a task that receives messages from the rx channel and pushes them
/// to the WebSocket sender.
fn pusher_loop(
    mut rx: mpsc::UnboundedReceiver<String>,
    mut sender: futures_util::stream::SplitSink<WebSocket, Message>,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        while let Some(msg) = rx.recv().await {
            // Send the message to this client
            if sender.send(Message::Text(msg.into())).await.is_err() {
                break;
            }
        }
    })
}

async fn handle_socket(socket: WebSocket, state: Arc<AppState>) {
    let session_id = SessionId::generate();
    let (tx, rx) = mpsc::unbounded_channel();
    state
        .message_pusher
        .register_session(session_id.clone(), tx)
        .await;
    tracing::info!("Session '{}' connected", session_id);

    let (sender, mut receiver) = socket.split();
    let mut send_task = pusher_loop(rx, sender);

    let recv_state = state.clone();
    let recv_session_id = session_id.clone();

    // Spawn a task to receive requests from this client
    let mut recv_task = tokio::spawn(async move {
        while let Some(msg) = receiver.next().await {
            let msg = match msg {
                Ok(msg) => msg,
                Err(e) => {
                    tracing::error!("WebSocket error: {}", e);
                    break;
                }
            };

            match msg {
                Message::Text(text) => {
                    tracing::debug!("Received text: {}", text);
                    match serde_json::from_str::<ClientMessage>(&text) {
                        Ok(request) => dispatch(&recv_state, &recv_session_id, request).await,
                        Err(e) => {
                            tracing::warn!("Failed to parse client message, dropping: {}", e);
                        }
                    }
                }
                Message::Ping(_) => {
                    tracing::debug!("Received ping");
                    // Ping/pong is handled automatically by the WebSocket protocol
                }
                Message::Close(_) => {
                    tracing::info!("Session '{}' requested close", recv_session_id);
                    break;
                }
                _ => {}
            }
        }
    });

    // If any one of the tasks completes, abort the other
    tokio::select! {
        _ = &mut recv_task => send_task.abort(),
        _ = &mut send_task => recv_task.abort(),
    };

    // Remove the session from the pusher (implicit leave of all rooms)
    state.message_pusher.unregister_session(&session_id).await;
    tracing::info!("Session '{}' disconnected", session_id);
}

/// 受信したリクエストを UseCase 層へ振り分け、結果のイベントを配送する
async fn dispatch(state: &Arc<AppState>, session_id: &SessionId, request: ClientMessage) {
    match request {
        ClientMessage::JoinRoom { room_id } => {
            let Some(room_id) = parse_room_id(&room_id) else {
                return;
            };
            // メンバーシップを先に確立してから reconciliation する
            state.message_pusher.join_room(&room_id, session_id).await;
            let snapshots = state.join_room_usecase.execute(&room_id).await;
            let msg = AllTimersMessage {
                r#type: EventType::AllTimers,
                timers: snapshots.into_iter().map(Into::into).collect(),
            };
            let json = serde_json::to_string(&msg).unwrap();
            // スナップショットは join したセッションにだけ送る
            if let Err(e) = state.message_pusher.push_to(session_id, &json).await {
                tracing::warn!("Failed to send all_timers to '{}': {}", session_id, e);
            }
        }
        ClientMessage::LeaveRoom { room_id } => {
            let Some(room_id) = parse_room_id(&room_id) else {
                return;
            };
            state.message_pusher.leave_room(&room_id, session_id).await;
        }
        ClientMessage::CreateTimer { room_id } => {
            let Some(room_id) = parse_room_id(&room_id) else {
                return;
            };
            if let Some(snapshot) = state.create_timer_usecase.execute(&room_id).await {
                let msg = TimerCreatedMessage {
                    r#type: EventType::TimerCreated,
                    timer_id: snapshot.timer_id.into_string(),
                    count: snapshot.count,
                    note: snapshot.note,
                };
                broadcast(state, &room_id, &msg).await;
            }
        }
        ClientMessage::ResumeTimer { room_id, timer_id } => {
            let Some((room_id, timer_id)) = parse_ids(&room_id, &timer_id) else {
                return;
            };
            if state
                .resume_timer_usecase
                .execute(&room_id, &timer_id)
                .await
            {
                let msg = TimerStatusMessage {
                    r#type: EventType::TimerStatus,
                    timer_id: timer_id.into_string(),
                    is_running: true,
                };
                broadcast(state, &room_id, &msg).await;
            }
        }
        ClientMessage::StopTimer { room_id, timer_id } => {
            let Some((room_id, timer_id)) = parse_ids(&room_id, &timer_id) else {
                return;
            };
            if state
                .stop_timer_usecase
                .execute(&room_id, &timer_id)
                .await
                .is_some()
            {
                let msg = TimerStatusMessage {
                    r#type: EventType::TimerStatus,
                    timer_id: timer_id.into_string(),
                    is_running: false,
                };
                broadcast(state, &room_id, &msg).await;
            }
        }
        ClientMessage::ResetTimer { room_id, timer_id } => {
            let Some((room_id, timer_id)) = parse_ids(&room_id, &timer_id) else {
                return;
            };
            if state.reset_timer_usecase.execute(&room_id, &timer_id).await {
                let msg = TimerUpdateMessage {
                    r#type: EventType::TimerUpdate,
                    timer_id: timer_id.into_string(),
                    count: 0.0,
                };
                broadcast(state, &room_id, &msg).await;
            }
        }
        ClientMessage::DeleteTimer { room_id, timer_id } => {
            let Some((room_id, timer_id)) = parse_ids(&room_id, &timer_id) else {
                return;
            };
            if state
                .delete_timer_usecase
                .execute(&room_id, &timer_id)
                .await
            {
                let msg = TimerDeletedMessage {
                    r#type: EventType::TimerDeleted,
                    timer_id: timer_id.into_string(),
                };
                broadcast(state, &room_id, &msg).await;
            }
        }
        ClientMessage::UpdateNote {
            room_id,
            timer_id,
            note,
        } => {
            let Some((room_id, timer_id)) = parse_ids(&room_id, &timer_id) else {
                return;
            };
            if state
                .update_note_usecase
                .execute(&room_id, &timer_id, note.clone())
                .await
            {
                let msg = NoteUpdatedMessage {
                    r#type: EventType::NoteUpdated,
                    timer_id: timer_id.into_string(),
                    note,
                };
                broadcast(state, &room_id, &msg).await;
            }
        }
    }
}

/// イベントをルームの全セッションへブロードキャストする
async fn broadcast<T: Serialize>(state: &Arc<AppState>, room_id: &RoomId, message: &T) {
    let json = serde_json::to_string(message).unwrap();
    state.message_pusher.broadcast_to_room(room_id, &json).await;
}

fn parse_room_id(room_id: &str) -> Option<RoomId> {
    match RoomId::new(room_id) {
        Ok(room_id) => Some(room_id),
        Err(e) => {
            tracing::warn!("Invalid room id, dropping request: {}", e);
            None
        }
    }
}

fn parse_ids(room_id: &str, timer_id: &str) -> Option<(RoomId, TimerId)> {
    let room_id = parse_room_id(room_id)?;
    match TimerId::new(timer_id) {
        Ok(timer_id) => Some((room_id, timer_id)),
        Err(e) => {
            tracing::warn!("Invalid timer id, dropping request: {}", e);
            None
        }
    }
}
