//! 1 件の質問・回答とフィードバック

use common::domain::QaId;
use serde::{Deserialize, Serialize};

/// 質問・回答の 1 組
///
/// 保存形式のフィールド名は `id` / `question` / `answer` / `timestamp` / `isLiked` / `isDisliked`。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QaPair {
    pub id: QaId,
    pub question: String,
    pub answer: String,
    /// 作成時刻（Unix epoch ミリ秒）
    pub timestamp: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_liked: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_disliked: Option<bool>,
}

impl QaPair {
    pub fn new(id: QaId, question: impl Into<String>, answer: impl Into<String>, timestamp: u64) -> Self {
        Self {
            id,
            question: question.into(),
            answer: answer.into(),
            timestamp,
            is_liked: None,
            is_disliked: None,
        }
    }

    pub fn liked(&self) -> bool {
        self.is_liked.unwrap_or(false)
    }

    pub fn disliked(&self) -> bool {
        self.is_disliked.unwrap_or(false)
    }
}
