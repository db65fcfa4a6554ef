//! 質問履歴ストア
//!
//! メモリ上の History を唯一の所有者として持ち、変更のたびに列全体を
//! KeyValueStore の 1 キーへ書き戻す。ストレージの失敗は呼び出し側へ返さずログに残す。

use crate::domain::{History, QaPair};
use common::domain::QaId;
use common::llm::ChatMessage;
use common::ports::outbound::{Clock, IdGenerator, KeyValueStore, Log, LogLevel, LogRecord};
use std::sync::Arc;

/// 履歴を保存するキー
pub const HISTORY_KEY: &str = "question_history";

/// HistoryStore の依存
#[derive(Clone)]
pub struct StorageDeps {
    pub kv: Arc<dyn KeyValueStore>,
    pub id_gen: Arc<dyn IdGenerator>,
    pub clock: Arc<dyn Clock>,
    pub log: Arc<dyn Log>,
}

pub struct HistoryStore {
    deps: StorageDeps,
    history: History,
}

impl HistoryStore {
    /// ストレージから読み込んで開く
    pub fn open(deps: StorageDeps) -> Self {
        let history = load(&deps);
        Self { deps, history }
    }

    /// ストレージから読み直してメモリ上の履歴を置き換える
    pub fn load(&mut self) -> &History {
        self.history = load(&self.deps);
        &self.history
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn get(&self, id: &QaId) -> Option<&QaPair> {
        self.history.get(id)
    }

    pub fn len(&self) -> usize {
        self.history.len()
    }

    pub fn is_empty(&self) -> bool {
        self.history.is_empty()
    }

    pub fn user_turns(&self) -> Vec<ChatMessage> {
        self.history.user_turns()
    }

    /// 新しい組を先頭に追加して ID を返す
    ///
    /// 空の質問・回答は呼び出し側のバグ（debug ビルドでのみ検出）。
    pub fn add(&mut self, question: &str, answer: &str) -> QaId {
        debug_assert!(!question.trim().is_empty(), "question must not be empty");
        debug_assert!(!answer.is_empty(), "answer must not be empty");

        let id = self.unique_id(self.deps.id_gen.next_id());
        let pair = QaPair::new(id.clone(), question, answer, self.deps.clock.now_ms());
        self.history.push_front(pair);
        self.persist();
        id
    }

    /// 該当が無ければ何もしない（エラーにしない）
    pub fn remove(&mut self, id: &QaId) {
        self.history.remove(id);
        self.persist();
    }

    pub fn clear(&mut self) {
        self.history.clear();
        self.persist();
    }

    /// フラグを丸ごと置き換える。好き・嫌いの排他はここでは強制しない。
    pub fn update_feedback(&mut self, id: &QaId, is_liked: Option<bool>, is_disliked: Option<bool>) {
        self.history.set_feedback(id, is_liked, is_disliked);
        self.persist();
    }

    /// 既存と衝突したら `<id>-<n>` を振る。候補は毎回異なるので高々 len + 1 回で決まる。
    fn unique_id(&self, id: QaId) -> QaId {
        if !self.history.contains(&id) {
            return id;
        }
        let mut n = 1usize;
        loop {
            let candidate = QaId::new(format!("{}-{}", id, n));
            if !self.history.contains(&candidate) {
                return candidate;
            }
            n += 1;
        }
    }

    fn persist(&self) {
        let result = self
            .history
            .to_json()
            .and_then(|json| self.deps.kv.set(HISTORY_KEY, &json));
        if let Err(e) = result {
            log(
                &self.deps,
                LogRecord::new(LogLevel::Error, "failed to persist history")
                    .field("error", e.to_string())
                    .field("entries", self.history.len()),
            );
        }
    }
}

/// 保存済み履歴を読む。無ければ空、壊れていればキーを消して空。
fn load(deps: &StorageDeps) -> History {
    let raw = match deps.kv.get(HISTORY_KEY) {
        Ok(Some(raw)) => raw,
        Ok(None) => return History::new(),
        Err(e) => {
            log(
                deps,
                LogRecord::new(LogLevel::Error, "failed to read stored history")
                    .field("error", e.to_string()),
            );
            return History::new();
        }
    };

    match History::from_json(&raw) {
        Ok(history) => history,
        Err(e) => {
            log(
                deps,
                LogRecord::new(LogLevel::Warn, "stored history is corrupt; discarding")
                    .field("error", e.to_string()),
            );
            if let Err(e) = deps.kv.remove(HISTORY_KEY) {
                log(
                    deps,
                    LogRecord::new(LogLevel::Error, "failed to clear corrupt history")
                        .field("error", e.to_string()),
                );
            }
            History::new()
        }
    }
}

fn log(deps: &StorageDeps, record: LogRecord) {
    let _ = deps.log.log(&record.layer("usecase").kind("storage"));
}
