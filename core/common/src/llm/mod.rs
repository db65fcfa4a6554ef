//! LLM チャット API の共通部分
//!
//! メッセージ型と OpenAI Chat Completions 互換のワイヤ形式（リクエスト生成・レスポンス解析）。

pub mod chat_completions;
pub mod message;

pub use chat_completions::{build_request_payload, extract_answer, extract_error_message};
pub use message::{ChatMessage, Role};
