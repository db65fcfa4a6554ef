//! OpenAI Chat Completions 互換 (/chat/completions) のワイヤ形式
//!
//! リクエスト: `{model, messages:[{role, content}, ...]}`
//! レスポンス: `{choices:[{message:{content}}], ...}`

use crate::llm::message::ChatMessage;
use serde::Serialize;
use serde_json::Value;

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<&'a ChatMessage>,
}

/// リクエスト JSON を生成する
///
/// 順序は system → prior_turns（渡された順）→ 新しい user ターン。
pub fn build_request_payload(
    model: &str,
    system: &ChatMessage,
    prior_turns: &[ChatMessage],
    user: &ChatMessage,
) -> Value {
    let mut messages = Vec::with_capacity(prior_turns.len() + 2);
    messages.push(system);
    messages.extend(prior_turns.iter());
    messages.push(user);
    // 文字列と enum だけなので失敗しない
    serde_json::to_value(ChatRequest { model, messages }).unwrap_or(Value::Null)
}

/// `choices[0].message.content` を取り出す
///
/// 本文が JSON でない・フィールドが無い・文字列でない・空白のみの場合は None。
pub fn extract_answer(response_body: &str) -> Option<String> {
    let v: Value = serde_json::from_str(response_body).ok()?;
    v["choices"][0]["message"]["content"]
        .as_str()
        .filter(|s| !s.trim().is_empty())
        .map(|s| s.to_string())
}

/// 非 2xx の本文から `error.message` を取り出す（無ければ本文そのもの）
pub fn extract_error_message(response_body: &str) -> String {
    serde_json::from_str::<Value>(response_body)
        .ok()
        .and_then(|v| v["error"]["message"].as_str().map(|s| s.to_string()))
        .unwrap_or_else(|| response_body.trim().to_string())
}
