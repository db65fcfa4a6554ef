//! Chat Completions 互換エンドポイントを使う AnswerProvider
//!
//! 1 回の POST だけを行い、リトライはしない。回答フィールドが欠けた 2xx は
//! 代替文で置き換えて成功扱いにする。

use crate::adapter::config::ProviderConfig;
use crate::ports::outbound::AnswerProvider;
use common::error::Error;
use common::llm::{build_request_payload, extract_answer, extract_error_message, ChatMessage};
use common::ports::outbound::{HttpClient, Log, LogLevel, LogRecord};
use std::sync::Arc;

/// 回答が取り出せなかったときに返す文
pub const FALLBACK_ANSWER: &str = "No answer available.";

pub struct ChatAnswerProvider {
    config: ProviderConfig,
    http: Arc<dyn HttpClient>,
    log: Arc<dyn Log>,
}

impl ChatAnswerProvider {
    pub fn new(config: ProviderConfig, http: Arc<dyn HttpClient>, log: Arc<dyn Log>) -> Self {
        Self { config, http, log }
    }

    fn headers(&self) -> Vec<(String, String)> {
        let mut headers = vec![(
            "Authorization".to_string(),
            format!("Bearer {}", self.config.credential.expose()),
        )];
        if let Some(referer) = &self.config.referer {
            headers.push(("HTTP-Referer".to_string(), referer.clone()));
        }
        if let Some(title) = &self.config.app_title {
            headers.push(("X-Title".to_string(), title.clone()));
        }
        headers
    }

    fn log(&self, record: LogRecord) {
        let _ = self.log.log(
            &record
                .layer("adapter")
                .kind("provider")
                .field("endpoint", self.config.endpoint.clone())
                .field("model", self.config.model.clone()),
        );
    }
}

impl AnswerProvider for ChatAnswerProvider {
    fn ask(&self, question: &str, prior_turns: &[ChatMessage]) -> Result<String, Error> {
        let question = question.trim();
        if question.is_empty() {
            return Err(Error::EmptyInput);
        }

        let payload = build_request_payload(
            &self.config.model,
            &ChatMessage::system(self.config.system_prompt.clone()),
            prior_turns,
            &ChatMessage::user(question),
        );
        let body = serde_json::to_string(&payload)?;

        let response = match self.http.post_json(&self.config.endpoint, &self.headers(), &body) {
            Ok(r) => r,
            Err(e) => {
                self.log(
                    LogRecord::new(LogLevel::Error, "request to answer provider failed")
                        .field("error", e.to_string()),
                );
                return Err(e);
            }
        };

        if !response.is_success() {
            let message = extract_error_message(&response.body);
            self.log(
                LogRecord::new(LogLevel::Error, "answer provider returned an error status")
                    .field("status", response.status)
                    .field("error", message.clone()),
            );
            return Err(Error::upstream(response.status, message));
        }

        match extract_answer(&response.body) {
            Some(answer) => Ok(answer),
            None => {
                self.log(
                    LogRecord::new(LogLevel::Warn, "malformed response; using fallback answer")
                        .field("status", response.status),
                );
                Ok(FALLBACK_ANSWER.to_string())
            }
        }
    }
}
