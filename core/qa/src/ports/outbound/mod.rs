//! Outbound ポート: アプリが外界に依頼するための trait

pub mod answer_provider;
pub mod notifier;

pub use answer_provider::AnswerProvider;
pub use notifier::Notifier;
