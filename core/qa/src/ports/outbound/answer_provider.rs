//! 回答プロバイダ Outbound ポート
//!
//! 質問と過去ターンを渡して回答テキストを 1 回だけ取得する。

use common::error::Error;
use common::llm::ChatMessage;

/// リモートの回答プロバイダ
///
/// 呼び出し側は前の呼び出しが返るまで次を呼ばないこと（再入不可）。
pub trait AnswerProvider: Send + Sync {
    /// - 空白のみの質問は通信せずに `Error::EmptyInput`
    /// - 非 2xx は `Error::Upstream`
    /// - 回答フィールドが欠けていても失敗にはしない（代替文を返す）
    fn ask(&self, question: &str, prior_turns: &[ChatMessage]) -> Result<String, Error>;
}
