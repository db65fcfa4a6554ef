//! ユーザー向け通知 Outbound ポート
//!
//! 質問の失敗をプレゼンテーション層へ知らせる（Web 版のトーストに相当）。

use common::error::Error;

pub trait Notifier: Send + Sync {
    fn notify_failure(&self, error: &Error);
}
