//! 端末向けの表示文字列

use crate::domain::{History, QaPair};
use chrono::{Local, TimeZone};

pub const REPL_BANNER: &str =
    "Ask any computer science question. Type /help for commands, /quit to leave.";

pub const REPL_HELP: &str = "\
Commands:
  <question>        Ask a question
  /history          List previous questions (newest first)
  /show <id>        Show a previous question and its answer
  /like [id]        Toggle \"helpful\" on the shown answer (or <id>)
  /dislike [id]     Toggle \"not helpful\" on the shown answer (or <id>)
  /delete <id>      Delete one entry
  /clear            Delete all entries
  /help             Show this help
  /quit             Leave";

/// `YYYY-MM-DD HH:MM`（ローカル時刻）
pub fn format_timestamp(ms: u64) -> String {
    i64::try_from(ms)
        .ok()
        .and_then(|ms| Local.timestamp_millis_opt(ms).single())
        .map(|dt| dt.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|| "-".to_string())
}

/// 好き/嫌いの印（両方立っていれば両方）
pub fn feedback_marker(pair: &QaPair) -> &'static str {
    match (pair.liked(), pair.disliked()) {
        (true, true) => "+-",
        (true, false) => "+",
        (false, true) => "-",
        (false, false) => "",
    }
}

/// 一覧の 1 行: `id  日時  [印] 質問（1 行目のみ）`
pub fn history_line(pair: &QaPair) -> String {
    let first_line = pair.question.lines().next().unwrap_or("");
    let marker = feedback_marker(pair);
    if marker.is_empty() {
        format!("{}  {}  {}", pair.id, format_timestamp(pair.timestamp), first_line)
    } else {
        format!(
            "{}  {}  [{}] {}",
            pair.id,
            format_timestamp(pair.timestamp),
            marker,
            first_line
        )
    }
}

pub fn history_listing(history: &History) -> String {
    if history.is_empty() {
        return "No questions yet.".to_string();
    }
    history
        .pairs()
        .iter()
        .map(history_line)
        .collect::<Vec<_>>()
        .join("\n")
}

/// 質問と回答の詳細表示
pub fn pair_detail(pair: &QaPair) -> String {
    let feedback = match (pair.liked(), pair.disliked()) {
        (true, true) => "helpful, not helpful",
        (true, false) => "helpful",
        (false, true) => "not helpful",
        (false, false) => "none",
    };
    format!(
        "Question: {}\n\n{}\n\n[id: {} | {} | feedback: {}]",
        pair.question,
        pair.answer,
        pair.id,
        format_timestamp(pair.timestamp),
        feedback
    )
}
