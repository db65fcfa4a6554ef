//! 会話コントローラ
//!
//! 質問 1 回分の流れ（Idle → Submitting → Idle）をまとめ、成功時は履歴に記録し、
//! 失敗時は履歴に触れず Notifier へ 1 回だけ通知する。表示中の質問・回答と
//! 現在選択中の ID を持つが、QaPair 自体は HistoryStore が所有する。

use crate::domain::{History, QaPair};
use crate::ports::outbound::{AnswerProvider, Notifier};
use crate::usecase::history_store::HistoryStore;
use common::domain::QaId;
use common::error::Error;
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Submitting,
}

pub struct ConversationController {
    store: HistoryStore,
    provider: Arc<dyn AnswerProvider>,
    notifier: Arc<dyn Notifier>,
    phase: Phase,
    current: Option<QaId>,
    displayed_question: String,
    displayed_answer: String,
}

impl ConversationController {
    pub fn new(store: HistoryStore, provider: Arc<dyn AnswerProvider>, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            store,
            provider,
            notifier,
            phase: Phase::Idle,
            current: None,
            displayed_question: String::new(),
            displayed_answer: String::new(),
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn current(&self) -> Option<&QaId> {
        self.current.as_ref()
    }

    pub fn current_pair(&self) -> Option<&QaPair> {
        self.current.as_ref().and_then(|id| self.store.get(id))
    }

    pub fn displayed_question(&self) -> &str {
        &self.displayed_question
    }

    pub fn displayed_answer(&self) -> &str {
        &self.displayed_answer
    }

    pub fn history(&self) -> &History {
        self.store.history()
    }

    /// 質問を送り、成功したら履歴に追加して新しい ID を返す
    ///
    /// 過去ターンは履歴の質問だけを古い順に渡す（回答は再送しない）。
    /// 失敗時は履歴を変えず、通知を 1 回出してからエラーを返す。
    pub fn submit(&mut self, question: &str) -> Result<QaId, Error> {
        self.phase = Phase::Submitting;
        self.displayed_question = question.trim().to_string();
        self.displayed_answer.clear();
        self.current = None;

        let prior_turns = self.store.user_turns();
        let result = self.provider.ask(question, &prior_turns);
        self.phase = Phase::Idle;

        match result {
            Ok(answer) => {
                let id = self.store.add(&self.displayed_question, &answer);
                self.displayed_answer = answer;
                self.current = Some(id.clone());
                Ok(id)
            }
            Err(e) => {
                self.notifier.notify_failure(&e);
                Err(e)
            }
        }
    }

    /// 既存の項目を表示対象にする。無い ID なら何もせず false。
    pub fn select(&mut self, id: &QaId) -> bool {
        let Some(pair) = self.store.get(id) else {
            return false;
        };
        self.displayed_question = pair.question.clone();
        self.displayed_answer = pair.answer.clone();
        self.current = Some(id.clone());
        true
    }

    pub fn delete(&mut self, id: &QaId) {
        self.store.remove(id);
        if self.current.as_ref() == Some(id) {
            self.reset_display();
        }
    }

    pub fn clear_all(&mut self) {
        self.store.clear();
        self.reset_display();
    }

    /// フラグをそのまま HistoryStore へ渡す
    pub fn feedback(&mut self, id: &QaId, is_liked: Option<bool>, is_disliked: Option<bool>) {
        self.store.update_feedback(id, is_liked, is_disliked);
    }

    /// 「役に立った」を反転し、「役に立たなかった」は外す
    pub fn toggle_like(&mut self, id: &QaId) -> bool {
        let Some(liked) = self.store.get(id).map(QaPair::liked) else {
            return false;
        };
        self.feedback(id, Some(!liked), Some(false));
        true
    }

    /// 「役に立たなかった」を反転し、「役に立った」は外す
    pub fn toggle_dislike(&mut self, id: &QaId) -> bool {
        let Some(disliked) = self.store.get(id).map(QaPair::disliked) else {
            return false;
        };
        self.feedback(id, Some(false), Some(!disliked));
        true
    }

    fn reset_display(&mut self) {
        self.current = None;
        self.displayed_question.clear();
        self.displayed_answer.clear();
    }
}
