//! ユースケース（ポート経由で I/O を行う）

pub mod app;
pub mod controller;
pub mod history_store;

pub use app::{QaDeps, QaUseCase};
pub use controller::{ConversationController, Phase};
pub use history_store::{HistoryStore, StorageDeps, HISTORY_KEY};
