//! Outbound ポートの qa 固有アダプタと設定読み込み

pub mod chat_answer_provider;
pub mod config;
pub mod stderr_notifier;

pub use chat_answer_provider::{ChatAnswerProvider, FALLBACK_ANSWER};
pub use config::{ProviderConfig, QaSettings};
pub use stderr_notifier::StderrNotifier;
