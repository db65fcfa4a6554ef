//! 質問履歴のドメイン型
//!
//! 新しいものが先頭。`id` は列全体で一意。

use crate::domain::QaPair;
use common::domain::QaId;
use common::error::Error;
use common::llm::ChatMessage;
use std::collections::HashSet;

/// 質問履歴（QaPair の順序付き列）
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct History {
    pairs: Vec<QaPair>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    /// 保存済み JSON を復元する。構造が壊れていれば Err（呼び出し側で破棄する）。
    pub fn from_json(json: &str) -> Result<Self, Error> {
        let pairs: Vec<QaPair> = serde_json::from_str(json)?;
        let mut seen = HashSet::with_capacity(pairs.len());
        for pair in &pairs {
            if !seen.insert(&pair.id) {
                return Err(Error::json(format!("duplicate id '{}'", pair.id)));
            }
            if pair.question.trim().is_empty() {
                return Err(Error::json(format!("entry '{}' has an empty question", pair.id)));
            }
            if pair.answer.is_empty() {
                return Err(Error::json(format!("entry '{}' has an empty answer", pair.id)));
            }
        }
        Ok(Self { pairs })
    }

    pub fn to_json(&self) -> Result<String, Error> {
        Ok(serde_json::to_string(&self.pairs)?)
    }

    pub fn pairs(&self) -> &[QaPair] {
        &self.pairs
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn get(&self, id: &QaId) -> Option<&QaPair> {
        self.pairs.iter().find(|p| &p.id == id)
    }

    pub fn contains(&self, id: &QaId) -> bool {
        self.get(id).is_some()
    }

    /// 先頭（最新）に追加する。id の一意性は呼び出し側が保証する。
    pub fn push_front(&mut self, pair: QaPair) {
        debug_assert!(!self.contains(&pair.id), "duplicate id {}", pair.id);
        self.pairs.insert(0, pair);
    }

    /// 削除したら true
    pub fn remove(&mut self, id: &QaId) -> bool {
        let before = self.pairs.len();
        self.pairs.retain(|p| &p.id != id);
        self.pairs.len() != before
    }

    pub fn clear(&mut self) {
        self.pairs.clear();
    }

    /// フラグを丸ごと置き換える（マージしない）。該当があれば true。
    pub fn set_feedback(&mut self, id: &QaId, is_liked: Option<bool>, is_disliked: Option<bool>) -> bool {
        match self.pairs.iter_mut().find(|p| &p.id == id) {
            Some(pair) => {
                pair.is_liked = is_liked;
                pair.is_disliked = is_disliked;
                true
            }
            None => false,
        }
    }

    /// プロバイダに再送する過去ターン（user の質問のみ、古い順）
    pub fn user_turns(&self) -> Vec<ChatMessage> {
        self.pairs
            .iter()
            .rev()
            .map(|p| ChatMessage::user(p.question.clone()))
            .collect()
    }
}
