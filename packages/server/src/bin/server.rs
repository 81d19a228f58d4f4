//! Room-scoped shared timer server.
//!
//! Clients join a named room over WebSocket, create timers inside it, and
//! start/stop/reset/annotate them; every mutation is broadcast to all
//! sessions in the room and persisted.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin sunadokei-server
//! cargo run --bin sunadokei-server -- --host 0.0.0.0 --port 3001 --data-file timers.json
//! ```

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;

use sunadokei_server::{
    domain::{MessagePusher, RoomRegistry, TimerStore},
    infrastructure::{
        message_pusher::WebSocketMessagePusher,
        store::{InMemoryTimerStore, JsonFileTimerStore},
        ticker::TickerScheduler,
    },
    ui::{Server, state::AppState},
    usecase::{
        CreateTimerUseCase, DeleteTimerUseCase, GetRoomDetailUseCase, GetRoomsUseCase,
        JoinRoomUseCase, ResetTimerUseCase, ResumeTimerUseCase, StopTimerUseCase,
        UpdateNoteUseCase,
    },
};
use sunadokei_shared::logger::setup_logger;

#[derive(Parser, Debug)]
#[command(name = "server")]
#[command(about = "Room-scoped shared timer server with WebSocket broadcast", long_about = None)]
struct Args {
    /// Host address to bind the server to
    #[arg(short = 'H', long, default_value = "127.0.0.1")]
    host: String,

    /// Port number to bind the server to
    #[arg(short = 'p', long, default_value = "8080")]
    port: u16,

    /// Path to the JSON file used for timer persistence.
    /// Without this flag, timers are kept in memory only.
    #[arg(short = 'd', long)]
    data_file: Option<PathBuf>,
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    setup_logger(env!("CARGO_PKG_NAME"), "info");

    let args = Args::parse();

    // Initialize dependencies in order:
    // 1. Timer Store
    // 2. Room Registry
    // 3. MessagePusher + Ticker Scheduler
    // 4. UseCases
    // 5. AppState / Server

    // 1. Create Timer Store
    let store: Arc<dyn TimerStore> = if let Some(path) = args.data_file.as_deref() {
        match JsonFileTimerStore::open(path).await {
            Ok(store) => {
                tracing::info!("Using JSON file store at {}", path.display());
                Arc::new(store)
            }
            Err(e) => {
                tracing::error!("Failed to open data file {}: {}", path.display(), e);
                std::process::exit(1);
            }
        }
    } else {
        tracing::info!("Using in-memory store (timers will not survive a restart)");
        Arc::new(InMemoryTimerStore::new())
    };

    // 2. Create Room Registry
    let registry = Arc::new(RoomRegistry::new());

    // 3. Create MessagePusher (WebSocket implementation) and Ticker Scheduler
    let message_pusher: Arc<dyn MessagePusher> = Arc::new(WebSocketMessagePusher::new());
    let scheduler = Arc::new(TickerScheduler::new(message_pusher.clone()));

    // 4. Create UseCases
    let join_room_usecase = Arc::new(JoinRoomUseCase::new(registry.clone(), store.clone()));
    let create_timer_usecase = Arc::new(CreateTimerUseCase::new(registry.clone(), store.clone()));
    let resume_timer_usecase = Arc::new(ResumeTimerUseCase::new(
        registry.clone(),
        scheduler.clone(),
    ));
    let stop_timer_usecase = Arc::new(StopTimerUseCase::new(registry.clone(), store.clone()));
    let reset_timer_usecase = Arc::new(ResetTimerUseCase::new(registry.clone(), store.clone()));
    let delete_timer_usecase = Arc::new(DeleteTimerUseCase::new(registry.clone(), store.clone()));
    let update_note_usecase = Arc::new(UpdateNoteUseCase::new(registry.clone(), store.clone()));
    let get_rooms_usecase = Arc::new(GetRoomsUseCase::new(registry.clone()));
    let get_room_detail_usecase = Arc::new(GetRoomDetailUseCase::new(registry.clone()));

    // 5. Create and run the server
    let state = Arc::new(AppState {
        join_room_usecase,
        create_timer_usecase,
        resume_timer_usecase,
        stop_timer_usecase,
        reset_timer_usecase,
        delete_timer_usecase,
        update_note_usecase,
        get_rooms_usecase,
        get_room_detail_usecase,
        message_pusher,
    });
    let server = Server::new(state);
    if let Err(e) = server.run(args.host, args.port).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}
