//! qa のユースケース（コマンドごとの処理と対話ループ）

use crate::cli::render;
use crate::domain::{QaCommand, ReplCommand};
use crate::ports::inbound::RunQaApp;
use crate::ports::outbound::{AnswerProvider, Notifier};
use crate::usecase::controller::ConversationController;
use crate::usecase::history_store::{HistoryStore, StorageDeps};
use common::domain::QaId;
use common::error::Error;
use common::ports::outbound::{Log, LogLevel, LogRecord};
use std::io::{BufRead, Write};
use std::sync::Arc;

// --- 責務別 Deps（usecase が定義を所有し、wiring は組み立てるだけ）

pub struct QaDeps {
    pub storage: StorageDeps,
    /// 質問しないコマンドでは None（資格情報を要求しない）
    pub provider: Option<Arc<dyn AnswerProvider>>,
    pub notifier: Arc<dyn Notifier>,
    pub log: Arc<dyn Log>,
}

pub struct QaUseCase {
    deps: QaDeps,
}

impl QaUseCase {
    pub fn new(deps: QaDeps) -> Self {
        Self { deps }
    }

    fn open_store(&self) -> HistoryStore {
        HistoryStore::open(self.deps.storage.clone())
    }

    fn controller(&self) -> Result<ConversationController, Error> {
        let provider = self
            .deps
            .provider
            .clone()
            .ok_or_else(|| Error::configuration("answer provider is not configured"))?;
        Ok(ConversationController::new(
            self.open_store(),
            provider,
            Arc::clone(&self.deps.notifier),
        ))
    }

    /// 1 回だけ質問する。失敗は通知済みなので終了コードだけ返す。
    pub fn ask_once(&self, question: &str, out: &mut dyn Write) -> Result<i32, Error> {
        let mut controller = self.controller()?;
        match self.submit(&mut controller, question) {
            Ok(id) => {
                emit(out, controller.displayed_answer())?;
                emit(out, &format!("\n[id: {}]", id))?;
                Ok(0)
            }
            Err(e) => Ok(e.exit_code()),
        }
    }

    /// 対話ループ（EOF か /quit で終了）
    pub fn interactive(&self, input: &mut dyn BufRead, out: &mut dyn Write) -> Result<i32, Error> {
        let mut controller = self.controller()?;
        emit(out, render::REPL_BANNER)?;

        loop {
            write!(out, "> ").map_err(io_err)?;
            out.flush().map_err(io_err)?;

            let mut line = String::new();
            if input.read_line(&mut line).map_err(io_err)? == 0 {
                break;
            }

            match ReplCommand::parse(&line) {
                ReplCommand::Empty => {}
                ReplCommand::Ask(question) => {
                    emit(out, "Thinking...")?;
                    if let Ok(id) = self.submit(&mut controller, &question) {
                        emit(out, controller.displayed_answer())?;
                        emit(out, &format!("\n[id: {}]", id))?;
                    }
                }
                ReplCommand::History => emit(out, &render::history_listing(controller.history()))?,
                ReplCommand::Show(id) => {
                    if controller.select(&id) {
                        if let Some(pair) = controller.current_pair() {
                            emit(out, &render::pair_detail(pair))?;
                        }
                    } else {
                        emit(out, &no_entry(&id))?;
                    }
                }
                ReplCommand::Like(id) => {
                    self.toggle(&mut controller, id, out, ConversationController::toggle_like)?
                }
                ReplCommand::Dislike(id) => {
                    self.toggle(&mut controller, id, out, ConversationController::toggle_dislike)?
                }
                ReplCommand::Delete(id) => {
                    if controller.history().contains(&id) {
                        controller.delete(&id);
                        emit(out, &format!("Deleted {}.", id))?;
                    } else {
                        emit(out, &no_entry(&id))?;
                    }
                }
                ReplCommand::Clear => {
                    controller.clear_all();
                    emit(out, "History cleared.")?;
                }
                ReplCommand::Help => emit(out, render::REPL_HELP)?,
                ReplCommand::Quit => break,
                ReplCommand::Invalid(msg) => emit(out, &msg)?,
            }
        }
        Ok(0)
    }

    pub fn list_history(&self, out: &mut dyn Write) -> Result<i32, Error> {
        let store = self.open_store();
        emit(out, &render::history_listing(store.history()))?;
        Ok(0)
    }

    pub fn show(&self, id: &QaId, out: &mut dyn Write) -> Result<i32, Error> {
        let store = self.open_store();
        match store.get(id) {
            Some(pair) => {
                emit(out, &render::pair_detail(pair))?;
                Ok(0)
            }
            None => Err(Error::invalid_argument(no_entry(id))),
        }
    }

    pub fn delete(&self, id: &QaId, out: &mut dyn Write) -> Result<i32, Error> {
        let mut store = self.open_store();
        if store.get(id).is_none() {
            return Err(Error::invalid_argument(no_entry(id)));
        }
        store.remove(id);
        emit(out, &format!("Deleted {}.", id))?;
        Ok(0)
    }

    pub fn clear(&self, out: &mut dyn Write) -> Result<i32, Error> {
        let mut store = self.open_store();
        let removed = store.len();
        store.clear();
        emit(out, &format!("History cleared ({} entries).", removed))?;
        Ok(0)
    }

    /// 失敗は Notifier が伝え済みなので、ここではログだけ残す
    fn submit(&self, controller: &mut ConversationController, question: &str) -> Result<QaId, Error> {
        let result = controller.submit(question);
        match &result {
            Ok(id) => {
                self.log(
                    LogRecord::new(LogLevel::Info, "question answered")
                        .field("id", id.to_string())
                        .field("history_len", controller.history().len()),
                );
            }
            Err(e) => {
                self.log(
                    LogRecord::new(LogLevel::Info, "question failed")
                        .field("error", e.to_string())
                        .field("exit_code", e.exit_code()),
                );
            }
        }
        result
    }

    fn toggle(
        &self,
        controller: &mut ConversationController,
        id: Option<QaId>,
        out: &mut dyn Write,
        toggle: fn(&mut ConversationController, &QaId) -> bool,
    ) -> Result<(), Error> {
        let Some(id) = id.or_else(|| controller.current().cloned()) else {
            return emit(out, "Nothing selected. Ask a question or use /show <id> first.");
        };
        if !toggle(controller, &id) {
            return emit(out, &no_entry(&id));
        }
        match controller.history().get(&id) {
            Some(pair) => emit(
                out,
                &format!("Feedback for {}: {}", id, feedback_summary(pair.liked(), pair.disliked())),
            ),
            None => Ok(()),
        }
    }

    fn log(&self, record: LogRecord) {
        let _ = self.deps.log.log(&record.layer("usecase").kind("conversation"));
    }
}

impl RunQaApp for QaUseCase {
    fn run(&self, command: QaCommand, input: &mut dyn BufRead, out: &mut dyn Write) -> Result<i32, Error> {
        match command {
            QaCommand::Help => {
                emit(out, crate::cli::HELP_TEXT)?;
                Ok(0)
            }
            QaCommand::Ask { question } => self.ask_once(&question, out),
            QaCommand::Interactive => self.interactive(input, out),
            QaCommand::ListHistory => self.list_history(out),
            QaCommand::Show { id } => self.show(&id, out),
            QaCommand::Delete { id } => self.delete(&id, out),
            QaCommand::Clear => self.clear(out),
        }
    }
}

fn feedback_summary(liked: bool, disliked: bool) -> &'static str {
    match (liked, disliked) {
        (true, _) => "helpful",
        (false, true) => "not helpful",
        (false, false) => "cleared",
    }
}

fn no_entry(id: &QaId) -> String {
    format!("No entry with id {}.", id)
}

fn emit(out: &mut dyn Write, text: &str) -> Result<(), Error> {
    writeln!(out, "{}", text).map_err(io_err)
}

fn io_err(e: std::io::Error) -> Error {
    Error::io_msg(format!("Failed to write output: {}", e))
}
