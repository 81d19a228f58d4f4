//! UseCase 層
//!
//! 受信した操作 1 種類につき 1 つの UseCase を定義する。各 UseCase は
//! Room Registry・Ticker Scheduler・Timer Store を組み合わせて、ルームの
//! Mutex を保持したままメモリ上の状態遷移をアトミックに適用する。
//!
//! ## fail-quiet 方針
//!
//! 存在しないルーム / タイマーへの操作は呼び出し元へエラーを返さず、
//! 黙って無視する（at-least-once 配送でのリトライ安全性のため）。
//! 無視したことは DEBUG レベルでログに残す。
//!
//! ## 永続化の扱い
//!
//! 変更系 UseCase の永続化はバックグラウンドのタスクとして投げる。
//! メモリ上の遷移とブロードキャストはストアの成否に影響されず、
//! 書き込み失敗は WARN ログのみ（次の書き込みか reconciliation で回復する）。

pub mod create_timer;
pub mod delete_timer;
pub mod error;
pub mod get_room_detail;
pub mod get_rooms;
pub mod join_room;
pub mod reset_timer;
pub mod resume_timer;
pub mod stop_timer;
pub mod update_note;

pub use create_timer::CreateTimerUseCase;
pub use delete_timer::DeleteTimerUseCase;
pub use error::GetRoomDetailError;
pub use get_room_detail::{GetRoomDetailUseCase, RoomDetail};
pub use get_rooms::{GetRoomsUseCase, RoomSummary};
pub use join_room::JoinRoomUseCase;
pub use reset_timer::ResetTimerUseCase;
pub use resume_timer::ResumeTimerUseCase;
pub use stop_timer::StopTimerUseCase;
pub use update_note::UpdateNoteUseCase;
