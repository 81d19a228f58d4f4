//! Server state and connection management.

use std::sync::Arc;

use crate::domain::MessagePusher;
use crate::usecase::{
    CreateTimerUseCase, DeleteTimerUseCase, GetRoomDetailUseCase, GetRoomsUseCase,
    JoinRoomUseCase, ResetTimerUseCase, ResumeTimerUseCase, StopTimerUseCase, UpdateNoteUseCase,
};

/// Shared application state
pub struct AppState {
    /// JoinRoomUseCase（ルーム参加のユースケース）
    pub join_room_usecase: Arc<JoinRoomUseCase>,
    /// CreateTimerUseCase（タイマー作成のユースケース）
    pub create_timer_usecase: Arc<CreateTimerUseCase>,
    /// ResumeTimerUseCase（タイマー再開のユースケース）
    pub resume_timer_usecase: Arc<ResumeTimerUseCase>,
    /// StopTimerUseCase（タイマー停止のユースケース）
    pub stop_timer_usecase: Arc<StopTimerUseCase>,
    /// ResetTimerUseCase（タイマーリセットのユースケース）
    pub reset_timer_usecase: Arc<ResetTimerUseCase>,
    /// DeleteTimerUseCase（タイマー削除のユースケース）
    pub delete_timer_usecase: Arc<DeleteTimerUseCase>,
    /// UpdateNoteUseCase（メモ更新のユースケース）
    pub update_note_usecase: Arc<UpdateNoteUseCase>,
    /// GetRoomsUseCase（ルーム一覧取得のユースケース）
    pub get_rooms_usecase: Arc<GetRoomsUseCase>,
    /// GetRoomDetailUseCase（ルーム詳細取得のユースケース）
    pub get_room_detail_usecase: Arc<GetRoomDetailUseCase>,
    /// MessagePusher（メッセージ通知の抽象化）
    pub message_pusher: Arc<dyn MessagePusher>,
}
