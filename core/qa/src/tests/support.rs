//! テスト用のポート実装

use crate::ports::outbound::{AnswerProvider, Notifier};
use crate::usecase::StorageDeps;
use common::adapter::MemoryKeyValueStore;
use common::domain::{HomeDir, QaId};
use common::error::Error;
use common::llm::ChatMessage;
use common::ports::outbound::{
    Clock, EnvResolver, HttpClient, HttpResponse, IdGenerator, KeyValueStore, Log, LogLevel, LogRecord,
};
use std::collections::{HashMap, VecDeque};
use std::path::PathBuf;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

/// StubHttpClient が受け取った 1 リクエスト
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: String,
}

/// 決まった応答（または失敗）を返す HttpClient
pub struct StubHttpClient {
    result: Result<HttpResponse, Error>,
    requests: Mutex<Vec<RecordedRequest>>,
}

impl StubHttpClient {
    pub fn responding(status: u16, body: &str) -> Self {
        Self {
            result: Ok(HttpResponse::new(status, body)),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Chat Completions 形式で `text` を返す
    pub fn answering(text: &str) -> Self {
        let body = serde_json::json!({
            "choices": [{ "message": { "role": "assistant", "content": text } }]
        });
        Self::responding(200, &body.to_string())
    }

    pub fn failing(msg: &str) -> Self {
        Self {
            result: Err(Error::http(msg)),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn call_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    pub fn last_request(&self) -> Option<RecordedRequest> {
        self.requests.lock().unwrap().last().cloned()
    }
}

impl HttpClient for StubHttpClient {
    fn post_json(&self, url: &str, headers: &[(String, String)], body: &str) -> Result<HttpResponse, Error> {
        self.requests.lock().unwrap().push(RecordedRequest {
            url: url.to_string(),
            headers: headers.to_vec(),
            body: body.to_string(),
        });
        self.result.clone()
    }
}

/// 受け取った LogRecord を溜める Log
#[derive(Default)]
pub struct RecordingLog {
    records: Mutex<Vec<LogRecord>>,
}

impl RecordingLog {
    pub fn records(&self) -> Vec<LogRecord> {
        self.records.lock().unwrap().clone()
    }

    pub fn count_level(&self, level: LogLevel) -> usize {
        self.records
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.level == level)
            .count()
    }

    pub fn messages(&self) -> Vec<String> {
        self.records
            .lock()
            .unwrap()
            .iter()
            .map(|r| r.message.clone())
            .collect()
    }
}

impl Log for RecordingLog {
    fn log(&self, record: &LogRecord) -> Result<(), Error> {
        self.records.lock().unwrap().push(record.clone());
        Ok(())
    }
}

/// 通知された失敗を溜める Notifier
#[derive(Default)]
pub struct RecordingNotifier {
    failures: Mutex<Vec<Error>>,
}

impl RecordingNotifier {
    pub fn failures(&self) -> Vec<Error> {
        self.failures.lock().unwrap().clone()
    }
}

impl Notifier for RecordingNotifier {
    fn notify_failure(&self, error: &Error) {
        self.failures.lock().unwrap().push(error.clone());
    }
}

/// 用意した結果を順に返し、渡された過去ターンを記録する AnswerProvider
///
/// 用意した結果が尽きたら質問をそのまま返す。
#[derive(Default)]
pub struct StubAnswerProvider {
    results: Mutex<VecDeque<Result<String, Error>>>,
    calls: Mutex<Vec<(String, Vec<ChatMessage>)>>,
}

impl StubAnswerProvider {
    pub fn with_results(results: Vec<Result<String, Error>>) -> Self {
        Self {
            results: Mutex::new(results.into()),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<(String, Vec<ChatMessage>)> {
        self.calls.lock().unwrap().clone()
    }
}

impl AnswerProvider for StubAnswerProvider {
    fn ask(&self, question: &str, prior_turns: &[ChatMessage]) -> Result<String, Error> {
        self.calls
            .lock()
            .unwrap()
            .push((question.to_string(), prior_turns.to_vec()));
        self.results
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(format!("answer to {}", question.trim())))
    }
}

/// 読めるが書き込みに失敗する KeyValueStore
#[derive(Default)]
pub struct FailingKeyValueStore {
    pub stored: Option<String>,
}

impl KeyValueStore for FailingKeyValueStore {
    fn get(&self, _key: &str) -> Result<Option<String>, Error> {
        Ok(self.stored.clone())
    }

    fn set(&self, _key: &str, _value: &str) -> Result<(), Error> {
        Err(Error::io_msg("disk full"))
    }

    fn remove(&self, _key: &str) -> Result<(), Error> {
        Err(Error::io_msg("disk full"))
    }
}

/// 呼ばれるたびに 1 ms 進む時計
pub struct StepClock(AtomicU64);

impl StepClock {
    pub fn starting_at(ms: u64) -> Self {
        Self(AtomicU64::new(ms))
    }
}

impl Clock for StepClock {
    fn now_ms(&self) -> u64 {
        self.0.fetch_add(1, Ordering::SeqCst)
    }
}

/// 用意した ID を順に返し、尽きたら連番を返す IdGenerator
#[derive(Default)]
pub struct ScriptedIdGenerator {
    ids: Mutex<VecDeque<QaId>>,
    next: AtomicU64,
}

impl ScriptedIdGenerator {
    pub fn with_ids(ids: &[&str]) -> Self {
        Self {
            ids: Mutex::new(ids.iter().map(|s| QaId::new(*s)).collect()),
            next: AtomicU64::new(0),
        }
    }
}

impl IdGenerator for ScriptedIdGenerator {
    fn next_id(&self) -> QaId {
        if let Some(id) = self.ids.lock().unwrap().pop_front() {
            return id;
        }
        QaId::new(format!("id{:06}", self.next.fetch_add(1, Ordering::SeqCst)))
    }
}

/// 固定の環境変数表とホームディレクトリを返す EnvResolver
pub struct MapEnvResolver {
    vars: HashMap<String, String>,
    home: PathBuf,
}

impl MapEnvResolver {
    pub fn new(home: impl Into<PathBuf>) -> Self {
        Self {
            vars: HashMap::new(),
            home: home.into(),
        }
    }

    pub fn with_var(mut self, name: &str, value: &str) -> Self {
        self.vars.insert(name.to_string(), value.to_string());
        self
    }
}

impl EnvResolver for MapEnvResolver {
    fn var(&self, name: &str) -> Option<String> {
        self.vars.get(name).cloned()
    }

    fn resolve_home_dir(&self) -> Result<HomeDir, Error> {
        Ok(HomeDir::new(self.home.clone()))
    }
}

/// メモリ上の KeyValueStore と記録用 Log で StorageDeps を組み立てる
pub fn memory_storage(kv: Arc<MemoryKeyValueStore>, log: Arc<RecordingLog>) -> StorageDeps {
    StorageDeps {
        kv,
        id_gen: Arc::new(ScriptedIdGenerator::default()),
        clock: Arc::new(StepClock::starting_at(1_714_000_000_000)),
        log,
    }
}

/// 常に同じ時刻を返す時計
pub struct FixedClock(pub u64);

impl Clock for FixedClock {
    fn now_ms(&self) -> u64 {
        self.0
    }
}

/// 常に同じ ID を返す IdGenerator
pub struct FixedIdGenerator(pub QaId);

impl IdGenerator for FixedIdGenerator {
    fn next_id(&self) -> QaId {
        self.0.clone()
    }
}
