//! TimerStore の実装
//!
//! - `inmemory`: HashMap によるインメモリ実装。テストおよび永続化なしの
//!   起動モードで使う。
//! - `jsonfile`: JSON ファイルに書き通す実装。再起動をまたいで状態が残る。
//!
//! 将来的に PostgreSQL などの DBMS 実装を追加する場合もこのモジュール配下に置く。

pub mod inmemory;
pub mod jsonfile;

pub use inmemory::InMemoryTimerStore;
pub use jsonfile::JsonFileTimerStore;
